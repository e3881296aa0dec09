//! Orbit widget: ring, center core, item nodes and the detail card.

use orbital_engine::{AnimationPhase, Orbit};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Widget,
    },
};

use super::card::{DetailCard, CARD_WIDTH};
use super::projection::{Projection, LABEL_MARGIN};
use crate::text::{truncate_to_width, visual_width};
use crate::theme::{IconSet, Theme};

/// Widest node label, in cells.
pub const MAX_LABEL_WIDTH: usize = 2 * LABEL_MARGIN as usize;

/// Where one item is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLayout {
    /// Slot index of the item.
    pub index: usize,
    /// Cells covered by the label.
    pub rect: Rect,
    /// Rendered label text.
    pub text: String,
}

impl NodeLayout {
    /// Check if the cell at (`col`, `row`) falls on this node.
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.rect.x
            && col < self.rect.x + self.rect.width
            && row >= self.rect.y
            && row < self.rect.y + self.rect.height
    }
}

/// Renders an [`Orbit`] into a terminal area.
pub struct OrbitWidget<'a> {
    orbit: &'a Orbit,
    theme: &'a Theme,
    icons: &'a IconSet,
    cursor: Option<usize>,
    /// Whether to render with a border (default: true).
    with_border: bool,
}

impl<'a> OrbitWidget<'a> {
    /// Create a new orbit widget.
    pub fn new(orbit: &'a Orbit, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            orbit,
            theme,
            icons,
            cursor: None,
            with_border: true,
        }
    }

    /// Set the slot index marked by the keyboard cursor.
    #[must_use]
    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Set whether to render with a border.
    #[must_use]
    pub fn with_border(mut self, border: bool) -> Self {
        self.with_border = border;
        self
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .title(format!(" {} ", self.orbit.config().title))
            .title_style(
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
    }

    /// Area the orbit is drawn in, inside the border if there is one.
    pub fn inner_area(&self, area: Rect) -> Rect {
        if self.with_border {
            self.block().inner(area)
        } else {
            area
        }
    }

    /// Label placement for every item, in slot order.
    ///
    /// Labels are centered on their projected cell and clamped into `inner`.
    /// While converging only the icon is shown.
    pub fn node_layout(&self, inner: Rect) -> Vec<NodeLayout> {
        if inner.width == 0 || inner.height == 0 {
            return Vec::new();
        }

        let projection = Projection::fit(inner, self.orbit.config().radius);
        let converging = self.orbit.phase() == AnimationPhase::Converging;
        let max_width = MAX_LABEL_WIDTH.min(usize::from(inner.width));

        self.orbit
            .items()
            .iter()
            .zip(self.orbit.positions())
            .enumerate()
            .map(|(index, (item, pos))| {
                let icon = self.icons.item_icon(item);
                let label = if converging {
                    icon.to_string()
                } else {
                    format!("{icon} {}", item.title)
                };
                let text = truncate_to_width(&label, max_width);
                let width = visual_width(&text) as u16;

                let (col, row) = projection.to_cell(pos);
                let left = i32::from(inner.x);
                let top = i32::from(inner.y);
                let max_x = i32::from(inner.x + inner.width - width);
                let max_y = i32::from(inner.y + inner.height - 1);
                let x = (col - i32::from(width / 2)).clamp(left, max_x);
                let y = row.clamp(top, max_y);

                NodeLayout {
                    index,
                    rect: Rect::new(x as u16, y as u16, width, 1),
                    text,
                }
            })
            .collect()
    }

    /// Slot index of the node drawn at (`col`, `row`) when rendered in `area`.
    ///
    /// The expanded node is drawn on top, so it wins where labels overlap.
    pub fn node_at(&self, area: Rect, col: u16, row: u16) -> Option<usize> {
        let layouts = self.node_layout(self.inner_area(area));
        let expanded = self.orbit.expanded_index();

        expanded
            .and_then(|i| layouts.get(i))
            .filter(|node| node.contains(col, row))
            .or_else(|| layouts.iter().rev().find(|node| node.contains(col, row)))
            .map(|node| node.index)
    }

    fn node_style(&self, index: usize) -> Style {
        if self.orbit.expanded_index() == Some(index) {
            Style::default()
                .fg(self.theme.base)
                .bg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else if self.cursor == Some(index) {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else if self.orbit.phase() == AnimationPhase::Converging {
            Style::default().fg(self.theme.subtext)
        } else {
            Style::default().fg(self.theme.text)
        }
    }

    fn render_ring(&self, projection: &Projection, inner: Rect, buf: &mut Buffer) {
        let radius = self.orbit.config().radius;
        let color = self.theme.overlay;
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(projection.x_bounds(inner))
            .y_bounds(projection.y_bounds(inner))
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius,
                    color,
                });
            })
            .render(inner, buf);
    }

    fn render_core(&self, projection: &Projection, inner: Rect, buf: &mut Buffer) {
        let core = self.icons.center_core();
        let width = visual_width(core) as u16;
        if width > inner.width {
            return;
        }
        let (col, row) = projection.center_cell();
        let x = (col - i32::from(width / 2)).clamp(
            i32::from(inner.x),
            i32::from(inner.x + inner.width - width),
        );
        let y = row.clamp(i32::from(inner.y), i32::from(inner.y + inner.height - 1));
        buf.set_string(
            x as u16,
            y as u16,
            core,
            Style::default().fg(self.theme.secondary),
        );
    }

    fn render_cursor(&self, node: &NodeLayout, inner: Rect, buf: &mut Buffer) {
        let marker = format!("{} ", self.icons.cursor());
        let width = visual_width(&marker) as u16;
        if node.rect.x >= inner.x + width {
            buf.set_string(
                node.rect.x - width,
                node.rect.y,
                marker,
                Style::default().fg(self.theme.primary),
            );
        }
    }

    /// Card placement below the anchor node, clamped into `inner`.
    fn card_area(&self, anchor: Rect, height: u16, inner: Rect) -> Rect {
        let width = CARD_WIDTH.min(inner.width);
        let height = height.min(inner.height);
        let center = anchor.x + anchor.width / 2;
        let x = center
            .saturating_sub(width / 2)
            .clamp(inner.x, inner.x + inner.width - width);
        let y = (anchor.y + 2)
            .min(inner.y + inner.height - height)
            .max(inner.y);
        Rect::new(x, y, width, height)
    }
}

impl Widget for OrbitWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if self.with_border {
            let block = self.block();
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let projection = Projection::fit(inner, self.orbit.config().radius);
        self.render_ring(&projection, inner, buf);
        self.render_core(&projection, inner, buf);

        let layouts = self.node_layout(inner);
        let expanded = self.orbit.expanded_index();

        // Expanded node last so it stays on top
        let ordered = layouts
            .iter()
            .filter(|node| Some(node.index) != expanded)
            .chain(layouts.iter().filter(|node| Some(node.index) == expanded));
        for node in ordered {
            buf.set_string(
                node.rect.x,
                node.rect.y,
                &node.text,
                self.node_style(node.index),
            );
            if self.cursor == Some(node.index) {
                self.render_cursor(node, inner, buf);
            }
        }

        if !self.orbit.card_visible() {
            return;
        }
        let Some(item) = self.orbit.expanded_item() else {
            return;
        };
        let Some(anchor) = expanded.and_then(|i| layouts.get(i)) else {
            return;
        };

        let card = DetailCard::new(item, self.theme, self.icons);
        let width = CARD_WIDTH.min(inner.width);
        let card_area = self.card_area(anchor.rect, card.height_for(width), inner);
        card.render(card_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ascii_icons, buffer_to_string, demo_orbit};
    use orbital_engine::OrbitConfig;
    use std::time::Duration;

    fn render(orbit: &Orbit, cursor: Option<usize>) -> String {
        let theme = Theme::default();
        let icons = ascii_icons();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        OrbitWidget::new(orbit, &theme, &icons)
            .cursor(cursor)
            .render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_renders_title_core_and_labels() {
        let orbit = demo_orbit();
        let output = render(&orbit, None);

        assert!(output.contains(" Timeline "));
        assert!(output.contains("(*)"));
        assert!(output.contains("[#] Planning"));
        assert!(output.contains("[=] Design"));
        assert!(output.contains("</> Development"));
        assert!(output.contains("(u) Testing"));
        assert!(output.contains("(o) Release"));
    }

    #[test]
    fn test_node_layout_positions() {
        let orbit = demo_orbit();
        let theme = Theme::default();
        let icons = ascii_icons();
        let widget = OrbitWidget::new(&orbit, &theme, &icons);

        let inner = widget.inner_area(Rect::new(0, 0, 80, 24));
        assert_eq!(inner, Rect::new(1, 1, 78, 22));

        let layouts = widget.node_layout(inner);
        assert_eq!(layouts.len(), 5);
        // Slot 0 sits at 0°, right of center on the middle row
        assert_eq!(layouts[0].text, "[#] Planning");
        assert_eq!(layouts[0].rect, Rect::new(54, 12, 12, 1));
        // Slot 4 sits at 288°, near the top
        assert_eq!(layouts[4].rect.y, 2);
    }

    #[test]
    fn test_node_at_hits_labels_only() {
        let orbit = demo_orbit();
        let theme = Theme::default();
        let icons = ascii_icons();
        let widget = OrbitWidget::new(&orbit, &theme, &icons);
        let area = Rect::new(0, 0, 80, 24);

        assert_eq!(widget.node_at(area, 56, 12), Some(0));
        assert_eq!(widget.node_at(area, 54, 12), Some(0));
        assert_eq!(widget.node_at(area, 66, 12), None);
        assert_eq!(widget.node_at(area, 40, 12), None);
    }

    #[test]
    fn test_cursor_marker() {
        let orbit = demo_orbit();
        let output = render(&orbit, Some(0));
        assert!(output.contains("> [#] Planning"));
    }

    #[test]
    fn test_converging_hides_labels() {
        let mut orbit = demo_orbit();
        orbit.toggle(3);
        let output = render(&orbit, None);

        assert!(output.contains("[#]"));
        assert!(output.contains("</>"));
        assert!(!output.contains("Planning"));
        assert!(!output.contains("Development"));
    }

    #[test]
    fn test_expanded_item_at_top_with_card() {
        let mut orbit = demo_orbit();
        orbit.toggle(3);
        orbit.advance(Duration::from_millis(1200));
        assert!(orbit.card_visible());

        let theme = Theme::default();
        let icons = ascii_icons();
        let widget = OrbitWidget::new(&orbit, &theme, &icons);
        let layouts = widget.node_layout(Rect::new(1, 1, 78, 22));
        // Top anchor: horizontally centered, near the top row
        assert_eq!(layouts[2].rect, Rect::new(33, 2, 15, 1));

        let output = render(&orbit, None);
        assert!(output.contains("IN-PROGRESS"));
        assert!(output.contains("Mar 2024"));
        assert!(output.contains("60%"));
    }

    #[test]
    fn test_card_hidden_while_rearranging() {
        let mut orbit = demo_orbit();
        orbit.toggle(3);
        orbit.advance(Duration::from_millis(600));

        let output = render(&orbit, None);
        assert!(output.contains("</> Development"));
        assert!(!output.contains("IN-PROGRESS"));
    }

    #[test]
    fn test_empty_orbit_renders_ring_and_core() {
        let orbit = Orbit::new(Vec::new(), OrbitConfig::default());
        let output = render(&orbit, None);
        assert!(output.contains(" Timeline "));
        assert!(output.contains("(*)"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let mut orbit = demo_orbit();
        orbit.toggle(1);
        orbit.advance(Duration::from_millis(1200));

        let theme = Theme::default();
        let icons = ascii_icons();
        for (w, h) in [(2, 2), (5, 3), (12, 4), (20, 6)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            OrbitWidget::new(&orbit, &theme, &icons).render(area, &mut buf);
        }
    }
}
