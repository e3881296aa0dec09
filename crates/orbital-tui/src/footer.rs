//! Footer status bar widget.
//!
//! Format: `Development │ rearranging │ 5 items        [←/→] move │ [Enter] toggle`

use orbital_engine::AnimationPhase;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::text::visual_width;
use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Enter", "1-9").
    pub key: String,
    /// The action description (e.g., "toggle", "quit").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer status bar widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    focus: Option<&'a str>,
    phase: Option<AnimationPhase>,
    item_count: Option<usize>,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            focus: None,
            phase: None,
            item_count: None,
        }
    }

    /// Set the title of the item under the cursor.
    #[must_use]
    pub fn focus(mut self, title: Option<&'a str>) -> Self {
        self.focus = title;
        self
    }

    /// Set phase to display.
    #[must_use]
    pub fn phase(mut self, phase: AnimationPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Set the number of items on the orbit.
    #[must_use]
    pub fn item_count(mut self, count: usize) -> Self {
        self.item_count = Some(count);
        self
    }
}

/// Hints for the current state.
///
/// `Esc` collapses while an item is expanded and quits otherwise.
#[must_use]
pub fn hints_for_state(expanded: bool) -> Vec<KeyHint> {
    let mut hints = vec![
        KeyHint::new("←/→", "move"),
        KeyHint::new("Enter", "toggle"),
    ];
    if expanded {
        hints.push(KeyHint::new("Esc", "collapse"));
    } else {
        hints.push(KeyHint::new("q", "quit"));
    }
    hints.push(KeyHint::new("?", "help"));
    hints.push(KeyHint::new("1-9", "jump"));
    hints
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        // Left side: Focus │ Phase │ Count
        if let Some(title) = self.focus {
            left_spans.push(Span::styled(title, Style::default().fg(self.theme.primary)));
        }

        if let Some(phase) = self.phase {
            if !left_spans.is_empty() {
                left_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            left_spans.push(Span::styled(
                phase.label(),
                Style::default().fg(self.theme.subtext),
            ));
        }

        if let Some(count) = self.item_count {
            if !left_spans.is_empty() {
                left_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            let noun = if count == 1 { "item" } else { "items" };
            left_spans.push(Span::styled(
                format!("{count} {noun}"),
                Style::default().fg(self.theme.muted),
            ));
        }

        let left_width: usize = left_spans.iter().map(|s| visual_width(&s.content)).sum();
        let total_width = area.width as usize;

        // Right side: hints, dropping trailing ones that do not fit
        let mut right_width = 0;
        for (i, hint) in self.hints.iter().enumerate() {
            let separator = if i > 0 { 3 } else { 0 };
            let hint_width = separator + visual_width(&hint.key) + visual_width(&hint.action) + 3;
            if left_width + 1 + right_width + hint_width > total_width {
                break;
            }
            right_width += hint_width;

            if i > 0 {
                right_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.key, Style::default().fg(self.theme.primary)));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.action, Style::default().fg(self.theme.subtext)));
        }

        let padding = total_width.saturating_sub(left_width + right_width);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }

        left_spans.extend(right_spans);

        let line = Line::from(left_spans);
        let paragraph = Paragraph::new(line).style(Style::default().bg(self.theme.surface));
        paragraph.render(area, buf);
    }
}
