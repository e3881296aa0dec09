//! Mapping from orbit pixels onto terminal cells.

use orbital_engine::Position;
use ratatui::layout::Rect;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;

/// Columns kept free on each side so labels at 0° and 180° still fit.
pub const LABEL_MARGIN: u16 = 8;

/// Rows kept free above and below the orbit.
pub const ROW_MARGIN: u16 = 1;

/// Uniform scale that fits a circle of a given radius into an area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    center_x: f64,
    center_y: f64,
    scale_x: f64,
    scale_y: f64,
}

impl Projection {
    /// Fit a circle of `radius` pixels into `area`.
    pub fn fit(area: Rect, radius: f64) -> Self {
        let width = f64::from(area.width);
        let height = f64::from(area.height);
        let avail_x = (width / 2.0 - f64::from(LABEL_MARGIN)).max(1.0);
        let avail_y = (height / 2.0 - f64::from(ROW_MARGIN)).max(0.5);
        let radius = radius.max(f64::EPSILON);

        let scale_x = (avail_x / radius).min(CELL_ASPECT * avail_y / radius);
        Self {
            center_x: f64::from(area.x) + width / 2.0,
            center_y: f64::from(area.y) + height / 2.0,
            scale_x,
            scale_y: scale_x / CELL_ASPECT,
        }
    }

    /// Cell nearest `pos`. May lie outside the fitted area.
    pub fn to_cell(&self, pos: Position) -> (i32, i32) {
        (
            (self.center_x + pos.x * self.scale_x).round() as i32,
            (self.center_y + pos.y * self.scale_y).round() as i32,
        )
    }

    /// Cell of the orbit center.
    pub fn center_cell(&self) -> (i32, i32) {
        self.to_cell(Position::default())
    }

    /// Horizontal canvas bounds covering `area`, in orbit pixels.
    pub fn x_bounds(&self, area: Rect) -> [f64; 2] {
        [
            (f64::from(area.x) - self.center_x) / self.scale_x,
            (f64::from(area.x + area.width) - self.center_x) / self.scale_x,
        ]
    }

    /// Vertical canvas bounds covering `area`, in orbit pixels.
    ///
    /// Canvas `y` grows upward, so the bounds are mirrored.
    pub fn y_bounds(&self, area: Rect) -> [f64; 2] {
        [
            (self.center_y - f64::from(area.y + area.height)) / self.scale_y,
            (self.center_y - f64::from(area.y)) / self.scale_y,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_standard_terminal() {
        let projection = Projection::fit(Rect::new(0, 0, 80, 24), 265.0);
        assert_eq!(projection.center_cell(), (40, 12));
        // Height limits the scale: 11 rows above center, 22 columns to the side
        assert_eq!(projection.to_cell(Position::new(0.0, -265.0)), (40, 1));
        assert_eq!(projection.to_cell(Position::new(265.0, 0.0)), (62, 12));
        assert_eq!(projection.to_cell(Position::new(-265.0, 0.0)), (18, 12));
    }

    #[test]
    fn test_fit_respects_offset() {
        let projection = Projection::fit(Rect::new(10, 5, 80, 24), 265.0);
        assert_eq!(projection.center_cell(), (50, 17));
    }

    #[test]
    fn test_fit_wide_area_limited_by_height() {
        let narrow = Projection::fit(Rect::new(0, 0, 200, 24), 100.0);
        let (_, top) = narrow.to_cell(Position::new(0.0, -100.0));
        assert_eq!(top, 1);
    }

    #[test]
    fn test_fit_tall_area_limited_by_width() {
        let projection = Projection::fit(Rect::new(0, 0, 36, 60), 100.0);
        // 10 columns available on each side
        assert_eq!(projection.to_cell(Position::new(100.0, 0.0)), (28, 30));
        assert_eq!(projection.to_cell(Position::new(0.0, 100.0)), (18, 35));
    }

    #[test]
    fn test_bounds_are_symmetric_around_center() {
        let area = Rect::new(0, 0, 80, 24);
        let projection = Projection::fit(area, 265.0);
        let [left, right] = projection.x_bounds(area);
        let [bottom, top] = projection.y_bounds(area);
        assert!((left + right).abs() < 1e-9);
        assert!((bottom + top).abs() < 1e-9);
        assert!(right > 265.0);
        assert!(top > 265.0);
    }
}
