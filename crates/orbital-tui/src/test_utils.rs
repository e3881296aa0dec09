//! Test utilities for orbital-tui rendering tests.
//!
//! This module provides helper functions for building demo orbits and apps,
//! rendering them, and converting buffers to strings for assertions.

use crate::app::{App, UiConfig};
pub use crate::headless::buffer_to_string;
use crate::theme::{IconMode, IconSet, Theme};
use orbital_engine::{demo_items, Orbit, OrbitConfig};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// ASCII icons, so rendered output is plain text.
pub fn ascii_icons() -> IconSet {
    IconSet::new(IconMode::Ascii)
}

/// Orbit over the demo items with default config.
pub fn demo_orbit() -> Orbit {
    Orbit::new(demo_items(), OrbitConfig::default())
}

/// App over the demo items with ASCII icons.
pub fn create_test_app() -> App {
    let ui = UiConfig {
        icons: IconMode::Ascii,
        theme: Theme::default(),
    };
    App::new(demo_items(), OrbitConfig::default(), ui)
}

/// Render an app into a buffer of the given size and return it as a string.
pub fn render_app_to_string(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    app.render(area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.orbit.len(), 5);
        assert_eq!(app.icons.mode(), IconMode::Ascii);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
