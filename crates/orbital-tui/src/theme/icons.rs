//! Icon sets for Nerd Fonts, Unicode, and ASCII fallback.

use orbital_engine::{IconKind, TimelineItem};

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Nerd Font icons (default, richest experience).
    #[default]
    Nerd,
    /// Standard Unicode symbols (wide compatibility).
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

/// Icon set based on configured mode.
#[derive(Debug, Clone)]
pub struct IconSet {
    mode: IconMode,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    // === Item Icons ===

    /// Glyph for an icon reference.
    pub fn icon(&self, kind: IconKind) -> &'static str {
        match (kind, self.mode) {
            (IconKind::Calendar, IconMode::Nerd) => "󰃭",
            (IconKind::Calendar, IconMode::Unicode) => "▦",
            (IconKind::Calendar, IconMode::Ascii) => "[#]",

            (IconKind::FileText, IconMode::Nerd) => "󰈙",
            (IconKind::FileText, IconMode::Unicode) => "▤",
            (IconKind::FileText, IconMode::Ascii) => "[=]",

            (IconKind::Code, IconMode::Nerd) => "󰅩",
            (IconKind::Code, IconMode::Unicode) => "◆",
            (IconKind::Code, IconMode::Ascii) => "</>",

            (IconKind::User, IconMode::Nerd) => "󰀄",
            (IconKind::User, IconMode::Unicode) => "◍",
            (IconKind::User, IconMode::Ascii) => "(u)",

            (IconKind::Clock, IconMode::Nerd) => "󰥔",
            (IconKind::Clock, IconMode::Unicode) => "◷",
            (IconKind::Clock, IconMode::Ascii) => "(o)",
        }
    }

    /// Glyph for an item: explicit icon, then title category, then clock.
    pub fn item_icon(&self, item: &TimelineItem) -> &'static str {
        self.icon(item.resolved_icon())
    }

    // === Orbit Decorations ===

    pub fn center_core(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰝥",
            IconMode::Unicode => "◉",
            IconMode::Ascii => "(*)",
        }
    }

    pub fn cursor(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰅂",
            IconMode::Unicode => "▸",
            IconMode::Ascii => ">",
        }
    }
}
