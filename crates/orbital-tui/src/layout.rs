//! Layout helpers and the help overlay.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::theme::Theme;

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Split the screen into the orbit area and a one-line footer.
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

const HELP_TEXT: &str = r"
  Orbit
    Left/Right or h/l   Move cursor
    Enter / Space       Expand or collapse
    1-9                 Toggle item by position
    Click               Toggle item under mouse
    Esc                 Collapse, or quit
    q / Ctrl+C          Quit
    ?                   Toggle this help

  [Press any key to close]
";

/// Render the keybinding help overlay centered in `area`.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let width = 50.min(area.width.saturating_sub(4));
    let height = 14.min(area.height.saturating_sub(4));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().fg(theme.text).bg(theme.base));

    Paragraph::new(HELP_TEXT)
        .block(block)
        .render(overlay_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_fixed(40, 10, area), Rect::new(20, 7, 40, 10));
        // Larger than the parent is clamped
        assert_eq!(centered_fixed(100, 30, area), Rect::new(0, 0, 80, 24));
    }

    #[test]
    fn test_main_layout_reserves_footer() {
        let (body, footer) = main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(body, Rect::new(0, 0, 80, 23));
        assert_eq!(footer, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_help_overlay_renders() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_help_overlay(area, &mut buf, &Theme::default());

        let output = buffer_to_string(&buf);
        assert!(output.contains(" Help "));
        assert!(output.contains("Expand or collapse"));
        assert!(output.contains("[Press any key to close]"));
    }
}
