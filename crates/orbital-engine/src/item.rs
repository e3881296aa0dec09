//! Timeline item data model.
//!
//! Items are supplied by the host as an ordered list and never mutated by the
//! widget. The list order decides each item's slot on the orbit.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum progress value.
pub const MAX_PROGRESS: f64 = 100.0;

/// Icon reference for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Calendar,
    FileText,
    Code,
    User,
    /// Fallback icon for unknown categories.
    #[default]
    Clock,
}

impl IconKind {
    /// Look up the icon for a category title.
    ///
    /// Unknown titles fall back to [`IconKind::Clock`].
    pub fn for_category(title: &str) -> Self {
        match title {
            "Planning" => Self::Calendar,
            "Design" => Self::FileText,
            "Development" => Self::Code,
            "Testing" => Self::User,
            "Release" => Self::Clock,
            _ => Self::default(),
        }
    }
}

/// A single entry on the orbital timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Unique identifier within the list.
    pub id: u32,
    /// Title, also used as the icon category.
    pub title: String,
    /// Status label shown as a badge on the detail card.
    pub status: String,
    /// Free-form date string.
    pub date: String,
    /// Free-text content shown on the detail card.
    pub content: String,
    /// Progress in percent (0-100).
    #[serde(alias = "energy")]
    pub progress: f64,
    /// Explicit icon, overriding the category lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconKind>,
}

impl TimelineItem {
    /// Create an item with no explicit icon.
    pub fn new(
        id: u32,
        title: impl Into<String>,
        status: impl Into<String>,
        date: impl Into<String>,
        content: impl Into<String>,
        progress: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            status: status.into(),
            date: date.into(),
            content: content.into(),
            progress,
            icon: None,
        }
    }

    /// Set an explicit icon.
    #[must_use]
    pub fn with_icon(mut self, icon: IconKind) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Resolve the icon to display: explicit icon, then category, then default.
    pub fn resolved_icon(&self) -> IconKind {
        self.icon
            .unwrap_or_else(|| IconKind::for_category(&self.title))
    }
}

/// Errors that can occur when loading an item list.
#[derive(Debug, thiserror::Error)]
pub enum ItemsError {
    /// I/O error reading the item file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing item JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two items share the same id.
    #[error("Duplicate item id: {0}")]
    DuplicateId(u32),

    /// Progress outside 0-100.
    #[error("Item {id} has progress {progress} (max 100)")]
    ProgressOutOfRange { id: u32, progress: f64 },
}

/// Load and validate an item list from a JSON file.
pub fn load_items(path: &Path) -> Result<Vec<TimelineItem>, ItemsError> {
    let content = std::fs::read_to_string(path)?;
    parse_items(&content)
}

/// Parse and validate an item list from JSON text.
pub fn parse_items(json: &str) -> Result<Vec<TimelineItem>, ItemsError> {
    let items: Vec<TimelineItem> = serde_json::from_str(json)?;
    validate_items(&items)?;
    Ok(items)
}

/// Check ids are unique and progress values are in range.
pub fn validate_items(items: &[TimelineItem]) -> Result<(), ItemsError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(ItemsError::DuplicateId(item.id));
        }
        if !(0.0..=MAX_PROGRESS).contains(&item.progress) {
            return Err(ItemsError::ProgressOutOfRange {
                id: item.id,
                progress: item.progress,
            });
        }
    }
    Ok(())
}

/// Built-in five-phase project timeline.
pub fn demo_items() -> Vec<TimelineItem> {
    vec![
        TimelineItem::new(
            1,
            "Planning",
            "completed",
            "Jan 2024",
            "Project planning and requirements gathering phase.",
            100.0,
        ),
        TimelineItem::new(
            2,
            "Design",
            "completed",
            "Feb 2024",
            "UI/UX design and system architecture.",
            90.0,
        ),
        TimelineItem::new(
            3,
            "Development",
            "in-progress",
            "Mar 2024",
            "Core features implementation and testing.",
            60.0,
        ),
        TimelineItem::new(
            4,
            "Testing",
            "pending",
            "Apr 2024",
            "User testing and bug fixes.",
            30.0,
        ),
        TimelineItem::new(
            5,
            "Release",
            "pending",
            "May 2024",
            "Final deployment and release.",
            10.0,
        ),
    ]
}
