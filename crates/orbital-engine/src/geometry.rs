//! Orbit geometry: slot angles, polar placement and top-slot detection.
//!
//! Angles are in degrees unless a name says otherwise. Screen space has its
//! origin at the orbit center with `y` growing downward, so -90° is the top.

use serde::Serialize;

/// Screen angle of the top anchor.
pub const TOP_ANGLE_DEG: f64 = -90.0;

/// Degrees in a full turn.
pub const FULL_TURN_DEG: f64 = 360.0;

/// A point in widget space (pixels, origin at the orbit center).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Direction of this point seen from the center, in degrees.
    pub fn angle_deg(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Distance from the center.
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Normalize an angle into `[0, 360)`.
pub fn normalize_angle(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= FULL_TURN_DEG {
        0.0
    } else {
        wrapped
    }
}

/// Shortest angular distance between two angles, in `[0, 180]`.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_angle(a - b);
    d.min(FULL_TURN_DEG - d)
}

/// Base angle of a slot when `total` slots divide the circle evenly.
pub fn slot_angle(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    index as f64 * FULL_TURN_DEG / total as f64
}

/// Point at `angle_deg` on a circle of `radius`.
pub fn polar(angle_deg: f64, radius: f64) -> Position {
    let a = angle_deg.to_radians();
    Position::new(a.cos() * radius, a.sin() * radius)
}

/// Default orbital position of slot `index` rotated by `global_angle`.
pub fn orbital_position(index: usize, total: usize, global_angle: f64, radius: f64) -> Position {
    polar(slot_angle(index, total) + global_angle, radius)
}

/// Fixed anchor at the top of the circle.
pub fn top_anchor(radius: f64) -> Position {
    Position::new(0.0, -radius)
}

/// Find the slot that lands closest to the top anchor at `global_angle`.
///
/// Returns `None` when there are no slots. Ties go to the lowest index.
pub fn top_slot(total: usize, global_angle: f64) -> Option<usize> {
    if total == 0 {
        return None;
    }

    let target = normalize_angle(TOP_ANGLE_DEG - normalize_angle(global_angle));

    let mut closest = 0;
    let mut min_diff = f64::INFINITY;
    for index in 0..total {
        let diff = circular_distance(slot_angle(index, total), target);
        if diff < min_diff {
            min_diff = diff;
            closest = index;
        }
    }
    Some(closest)
}
