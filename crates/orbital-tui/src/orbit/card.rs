//! Detail card shown under the expanded item.

use orbital_engine::TimelineItem;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget},
};

use crate::text::wrap_lines;
use crate::theme::{IconSet, Theme};

/// Preferred card width, including borders.
pub const CARD_WIDTH: u16 = 36;

/// Content lines shown before the text is cut with "...".
pub const MAX_CONTENT_LINES: usize = 3;

/// Card with status, date, content and progress of one item.
pub struct DetailCard<'a> {
    item: &'a TimelineItem,
    theme: &'a Theme,
    icons: &'a IconSet,
}

impl<'a> DetailCard<'a> {
    pub fn new(item: &'a TimelineItem, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self { item, theme, icons }
    }

    /// Height needed to show the whole card at `width` columns.
    pub fn height_for(&self, width: u16) -> u16 {
        let lines = self.content_lines(width).len() as u16;
        // borders + status row + content + gauge
        2 + 1 + lines + 1
    }

    fn content_lines(&self, width: u16) -> Vec<String> {
        let text_width = usize::from(width.saturating_sub(4));
        wrap_lines(&self.item.content, text_width, MAX_CONTENT_LINES)
    }
}

impl Widget for DetailCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        Clear.render(area, buf);

        let title = format!(" {} {} ", self.icons.item_icon(self.item), self.item.title);
        let block = Block::default()
            .title(Span::styled(
                title,
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.primary))
            .style(Style::default().bg(self.theme.surface));
        let inner = block.inner(area);
        block.render(area, buf);

        let text_area = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        let bottom = text_area.y + text_area.height;
        let mut y = text_area.y;

        // Status badge and date
        let badge_color = self.theme.status_color(&self.item.status);
        let status_line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.item.status.to_uppercase()),
                Style::default()
                    .fg(self.theme.base)
                    .bg(badge_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(&self.item.date, Style::default().fg(self.theme.muted)),
        ]);
        Paragraph::new(status_line).render(Rect::new(text_area.x, y, text_area.width, 1), buf);
        y += 1;

        // Leave the last row for the gauge
        for line in self.content_lines(area.width) {
            if y + 1 >= bottom {
                break;
            }
            let line = Line::from(Span::styled(line, Style::default().fg(self.theme.text)));
            Paragraph::new(line).render(Rect::new(text_area.x, y, text_area.width, 1), buf);
            y += 1;
        }

        if y < bottom {
            let percent = if self.item.progress.is_nan() {
                0.0
            } else {
                self.item.progress.clamp(0.0, 100.0)
            };
            Gauge::default()
                .gauge_style(
                    Style::default()
                        .fg(self.theme.secondary)
                        .bg(self.theme.overlay),
                )
                .ratio(percent / 100.0)
                .label(format!("{percent}%"))
                .render(Rect::new(text_area.x, bottom - 1, text_area.width, 1), buf);
        }
    }
}
