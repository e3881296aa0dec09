//! orbital-engine: Headless engine for the orbital timeline widget
//!
//! This crate provides everything the widget does that is not drawing:
//! - Timeline item model, loading and the built-in demo list
//! - Orbit geometry and top-slot detection
//! - Owned one-shot timers on a logical clock
//! - The selection state machine (`Normal` → `Converging` → `Rearranging`)
//! - Configuration

pub mod config;
pub mod geometry;
pub mod item;
pub mod orbit;
pub mod timer;

// Re-export commonly used types
pub use config::{ConfigError, OrbitConfig};
pub use geometry::{
    circular_distance, normalize_angle, orbital_position, polar, slot_angle, top_anchor, top_slot,
    Position, TOP_ANGLE_DEG,
};
pub use item::{
    demo_items, load_items, parse_items, validate_items, IconKind, ItemsError, TimelineItem,
};
pub use orbit::{AnimationPhase, Orbit, PositionSwap, Toggle};
pub use timer::{TimerId, Timers};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
