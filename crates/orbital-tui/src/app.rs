//! Application state for the orbital TUI.

use std::time::Duration;

use orbital_engine::{Orbit, OrbitConfig, TimelineItem, Toggle};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::debug;

use crate::event::Action;
use crate::footer::{hints_for_state, FooterHints};
use crate::layout::{main_layout, render_help_overlay};
use crate::orbit::OrbitWidget;
use crate::theme::{IconMode, IconSet, Theme};

/// UI configuration.
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Icon mode (Nerd, Unicode, or ASCII).
    pub icons: IconMode,
    /// Color palette.
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl UiConfig {
    /// Create config from environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        let icons = if std::env::var("NO_COLOR").is_ok() {
            IconMode::Ascii
        } else {
            IconMode::Nerd
        };
        Self {
            icons,
            theme: Theme::default(),
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// The orbit being shown.
    pub orbit: Orbit,
    /// Slot index under the keyboard cursor.
    pub cursor: usize,
    /// Theme colors.
    pub theme: Theme,
    /// Icon set based on config.
    pub icons: IconSet,
    /// Should the app quit?
    pub should_quit: bool,
    /// Is the help overlay visible?
    pub show_help: bool,
}

impl App {
    /// Create an app over `items`.
    pub fn new(items: Vec<TimelineItem>, config: OrbitConfig, ui: UiConfig) -> Self {
        Self {
            orbit: Orbit::new(items, config),
            cursor: 0,
            theme: ui.theme,
            icons: IconSet::new(ui.icons),
            should_quit: false,
            show_help: false,
        }
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            if action != Action::None {
                self.show_help = false;
            }
            return;
        }

        match action {
            Action::Back => {
                if !self.orbit.collapse() {
                    self.should_quit = true;
                }
            }
            Action::Select => {
                self.orbit.toggle_index(self.cursor);
            }
            Action::Left => self.move_cursor(-1),
            Action::Right => self.move_cursor(1),
            Action::Item(index) => {
                if index < self.orbit.len() {
                    self.cursor = index;
                    self.orbit.toggle_index(index);
                }
            }
            Action::Quit | Action::Help | Action::None => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.orbit.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Advance animations by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        self.orbit.advance(elapsed);
    }

    /// Toggle the item drawn at (`col`, `row`) on a screen of size `area`.
    ///
    /// Returns whether a node was hit.
    pub fn handle_click(&mut self, area: Rect, col: u16, row: u16) -> bool {
        if self.show_help {
            self.show_help = false;
            return false;
        }

        let (body, _) = main_layout(area);
        let hit = self.orbit_widget().node_at(body, col, row);
        let Some(index) = hit else {
            return false;
        };

        self.cursor = index;
        let result = self.orbit.toggle_index(index);
        debug!(index, col, row, ?result, "click");
        result != Toggle::Ignored
    }

    /// Replace the item list, keeping the cursor in range.
    pub fn set_items(&mut self, items: Vec<TimelineItem>) {
        self.orbit.set_items(items);
        self.cursor = self.cursor.min(self.orbit.len().saturating_sub(1));
    }

    /// Title of the item under the cursor.
    pub fn cursor_title(&self) -> Option<&str> {
        self.orbit
            .items()
            .get(self.cursor)
            .map(|item| item.title.as_str())
    }

    fn orbit_widget(&self) -> OrbitWidget<'_> {
        let cursor = (!self.orbit.is_empty()).then_some(self.cursor);
        OrbitWidget::new(&self.orbit, &self.theme, &self.icons).cursor(cursor)
    }

    /// Draw the whole screen.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let (body, footer) = main_layout(area);

        self.orbit_widget().render(body, buf);

        let hints = hints_for_state(self.orbit.expanded_id().is_some());
        FooterHints::new(&hints, &self.theme)
            .focus(self.cursor_title())
            .phase(self.orbit.phase())
            .item_count(self.orbit.len())
            .render(footer, buf);

        if self.show_help {
            render_help_overlay(area, buf, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, create_test_app, render_app_to_string};
    use orbital_engine::{demo_items, AnimationPhase};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_app_uses_configured_icon_mode() {
        let ui = UiConfig {
            icons: IconMode::Ascii,
            theme: Theme::high_contrast(),
        };
        let app = App::new(demo_items(), OrbitConfig::default(), ui);
        assert_eq!(app.icons.mode(), IconMode::Ascii);
    }

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut app = create_test_app();
        assert_eq!(app.cursor, 0);

        app.handle_action(Action::Left);
        assert_eq!(app.cursor, 4);

        app.handle_action(Action::Right);
        assert_eq!(app.cursor, 0);
        app.handle_action(Action::Right);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_select_toggles_cursor_item() {
        let mut app = create_test_app();
        app.handle_action(Action::Right);
        app.handle_action(Action::Select);
        assert_eq!(app.orbit.expanded_id(), Some(2));
        assert_eq!(app.orbit.phase(), AnimationPhase::Converging);

        app.handle_action(Action::Select);
        assert_eq!(app.orbit.expanded_id(), None);
        assert_eq!(app.orbit.phase(), AnimationPhase::Normal);
    }

    #[test]
    fn test_digit_moves_cursor_and_toggles() {
        let mut app = create_test_app();
        app.handle_action(Action::Item(3));
        assert_eq!(app.cursor, 3);
        assert_eq!(app.orbit.expanded_id(), Some(4));

        // Past the end: nothing happens
        app.handle_action(Action::Item(7));
        assert_eq!(app.cursor, 3);
        assert_eq!(app.orbit.expanded_id(), Some(4));
    }

    #[test]
    fn test_back_collapses_then_quits() {
        let mut app = create_test_app();
        app.handle_action(Action::Item(0));
        app.tick(ms(1200));
        assert!(app.orbit.card_visible());

        app.handle_action(Action::Back);
        assert!(!app.should_quit);
        assert_eq!(app.orbit.expanded_id(), None);
        assert!(!app.orbit.card_visible());

        app.handle_action(Action::Back);
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        assert!(app.show_help);

        app.handle_action(Action::Select);
        assert!(!app.show_help);
        // The key only closed help
        assert_eq!(app.orbit.expanded_id(), None);

        app.handle_action(Action::Help);
        app.handle_action(Action::Quit);
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tick_rotates_until_expanded() {
        let mut app = create_test_app();
        app.tick(ms(100));
        assert!((app.orbit.angle() - 0.4).abs() < 1e-9);

        app.handle_action(Action::Select);
        app.tick(ms(1000));
        assert!((app.orbit.angle() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_click_toggles_node() {
        let mut app = create_test_app();
        let area = Rect::new(0, 0, 80, 24);

        let (body, _) = main_layout(area);
        let widget = app.orbit_widget();
        let node = widget.node_layout(widget.inner_area(body))[1].clone();

        assert!(app.handle_click(area, node.rect.x, node.rect.y));
        assert_eq!(app.cursor, 1);
        assert_eq!(app.orbit.expanded_id(), Some(2));

        // Empty space does nothing
        assert!(!app.handle_click(area, 0, 0));
        assert_eq!(app.orbit.expanded_id(), Some(2));
    }

    #[test]
    fn test_set_items_clamps_cursor() {
        let mut app = create_test_app();
        app.handle_action(Action::Item(4));

        let items: Vec<_> = demo_items().into_iter().take(2).collect();
        app.set_items(items);
        assert_eq!(app.cursor, 1);
        assert_eq!(app.orbit.expanded_id(), None);

        app.set_items(Vec::new());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.cursor_title(), None);
    }

    #[test]
    fn test_render_footer_tracks_state() {
        let mut app = create_test_app();
        let output = render_app_to_string(&app, 80, 24);
        assert!(output.contains("Planning │ normal │ 5 items"));
        assert!(output.contains("[q] quit"));

        app.handle_action(Action::Select);
        let output = render_app_to_string(&app, 80, 24);
        assert!(output.contains("converging"));
        assert!(output.contains("[Esc] collapse"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        assert!(buffer_to_string(&buf).contains(" Help "));
    }
}
