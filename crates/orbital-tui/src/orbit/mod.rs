//! Orbit rendering.
//!
//! This module provides:
//! - [`Projection`] - Maps orbit pixels onto terminal cells
//! - [`OrbitWidget`] - Ring, center core and item nodes
//! - [`DetailCard`] - Status, content and progress of the expanded item

mod card;
mod projection;
mod widget;

pub use card::{DetailCard, CARD_WIDTH, MAX_CONTENT_LINES};
pub use projection::{Projection, CELL_ASPECT, LABEL_MARGIN, ROW_MARGIN};
pub use widget::{NodeLayout, OrbitWidget, MAX_LABEL_WIDTH};
