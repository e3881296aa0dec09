//! Orbit state: rotation, selection and the phased expand animation.
//!
//! Selecting an item runs a three-step sequence on logical time:
//!
//! 1. `Converging` immediately: every item gathers near the center.
//! 2. `Rearranging` after the rearrange delay: the clicked item takes the top
//!    anchor and swaps slots with whichever item was nearest the top.
//! 3. The detail card appears after the card delay.
//!
//! Each selection change bumps a generation counter. Scheduled transitions
//! carry the generation that created them and are dropped if it is stale.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::OrbitConfig;
use crate::geometry::{normalize_angle, orbital_position, polar, top_anchor, top_slot, Position};
use crate::item::TimelineItem;
use crate::timer::Timers;

/// Visual stage of the whole widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    /// Items orbit at full radius.
    #[default]
    Normal,
    /// Items gather near the center.
    Converging,
    /// The selected item sits at the top anchor.
    Rearranging,
}

impl AnimationPhase {
    /// Lowercase label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Converging => "converging",
            Self::Rearranging => "rearranging",
        }
    }
}

impl fmt::Display for AnimationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Two slots exchanged while rearranging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionSwap {
    /// Slot of the selected item.
    pub clicked: usize,
    /// Slot that was nearest the top anchor at selection time.
    pub top: usize,
}

impl PositionSwap {
    /// Slot an item at `index` occupies while the swap is active.
    pub fn effective_slot(&self, index: usize) -> usize {
        if index == self.clicked {
            self.top
        } else if index == self.top {
            self.clicked
        } else {
            index
        }
    }
}

/// Result of toggling an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Nothing was expanded; the item is now expanding.
    Expanded,
    /// A different item was expanded; the sequence restarted for this one.
    Retargeted,
    /// The item was already expanded and is now collapsed.
    Collapsed,
    /// No item with that id or index exists.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionKind {
    Rearrange,
    RevealCard,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    kind: TransitionKind,
    generation: u64,
}

/// State of one orbital timeline widget.
#[derive(Debug)]
pub struct Orbit {
    config: OrbitConfig,
    items: Vec<TimelineItem>,
    /// Global rotation offset in degrees, kept in `[0, 360)`.
    angle: f64,
    expanded: Option<u32>,
    phase: AnimationPhase,
    swap: Option<PositionSwap>,
    show_card: bool,
    /// Global angle captured when the current selection was made.
    selection_angle: f64,
    generation: u64,
    timers: Timers<Transition>,
    /// Time accumulated toward the next rotation tick.
    rotation_elapsed: Duration,
}

impl Orbit {
    /// Create an orbit over `items` with the given configuration.
    pub fn new(items: Vec<TimelineItem>, config: OrbitConfig) -> Self {
        Self {
            config,
            items,
            angle: 0.0,
            expanded: None,
            phase: AnimationPhase::Normal,
            swap: None,
            show_card: false,
            selection_angle: 0.0,
            generation: 0,
            timers: Timers::new(),
            rotation_elapsed: Duration::ZERO,
        }
    }

    /// Items in slot order.
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Configuration in use.
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Current global rotation angle in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Set the global rotation angle (normalized into `[0, 360)`).
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = normalize_angle(angle);
    }

    /// Current animation phase.
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Active slot swap, if any.
    pub fn swap(&self) -> Option<PositionSwap> {
        self.swap
    }

    /// Whether the detail card is visible.
    pub fn card_visible(&self) -> bool {
        self.show_card
    }

    /// Id of the expanded item.
    pub fn expanded_id(&self) -> Option<u32> {
        self.expanded
    }

    /// Slot index of the expanded item.
    pub fn expanded_index(&self) -> Option<usize> {
        self.expanded.and_then(|id| self.index_of(id))
    }

    /// The expanded item.
    pub fn expanded_item(&self) -> Option<&TimelineItem> {
        self.expanded_index().map(|i| &self.items[i])
    }

    /// Check if the item with `id` is expanded.
    pub fn is_expanded(&self, id: u32) -> bool {
        self.expanded == Some(id)
    }

    /// Whether the orbit is rotating (nothing expanded).
    pub fn is_rotating(&self) -> bool {
        self.expanded.is_none()
    }

    /// Logical time since the orbit was created.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Number of scheduled transitions that have not fired.
    pub fn pending_transitions(&self) -> usize {
        self.timers.len()
    }

    /// Selection generation; bumped on every expand, retarget or collapse.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Slot index of the item with `id`.
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Toggle expansion of the item with `id`.
    pub fn toggle(&mut self, id: u32) -> Toggle {
        if self.index_of(id).is_none() {
            warn!(id, "toggle ignored: no such item");
            return Toggle::Ignored;
        }

        match self.expanded {
            Some(current) if current == id => {
                self.collapse();
                Toggle::Collapsed
            }
            Some(_) => {
                self.begin_expand(id);
                Toggle::Retargeted
            }
            None => {
                self.begin_expand(id);
                Toggle::Expanded
            }
        }
    }

    /// Toggle expansion of the item in slot `index`.
    pub fn toggle_index(&mut self, index: usize) -> Toggle {
        match self.items.get(index) {
            Some(item) => {
                let id = item.id;
                self.toggle(id)
            }
            None => Toggle::Ignored,
        }
    }

    /// Collapse the expanded item, if any. Returns whether anything changed.
    ///
    /// Takes effect immediately: the card hides, the swap clears, the phase
    /// returns to `Normal` and rotation resumes.
    pub fn collapse(&mut self) -> bool {
        let Some(id) = self.expanded.take() else {
            return false;
        };
        self.generation += 1;
        let cancelled = self.timers.cancel_all();
        self.reset_animation();
        self.phase = AnimationPhase::Normal;
        self.rotation_elapsed = Duration::ZERO;
        debug!(id, cancelled, "collapsed");
        true
    }

    /// Replace the item list.
    ///
    /// Pending transitions are cancelled. If the expanded item survives, its
    /// sequence restarts; otherwise the orbit collapses.
    pub fn set_items(&mut self, items: Vec<TimelineItem>) {
        self.items = items;
        match self.expanded {
            Some(id) if self.index_of(id).is_some() => self.begin_expand(id),
            Some(_) => {
                self.collapse();
            }
            None => {
                self.timers.cancel_all();
            }
        }
    }

    /// Move logical time forward by `elapsed`.
    ///
    /// Fires any due transitions and, while nothing is expanded, advances the
    /// rotation by one step per elapsed rotation interval.
    pub fn advance(&mut self, elapsed: Duration) {
        for transition in self.timers.advance(elapsed) {
            self.apply(transition);
        }

        if !self.is_rotating() {
            return;
        }

        self.rotation_elapsed += elapsed;
        let interval = self.config.rotation_interval();
        if interval.is_zero() {
            return;
        }
        let elapsed_nanos = self.rotation_elapsed.as_nanos();
        let interval_nanos = interval.as_nanos();
        let ticks = elapsed_nanos / interval_nanos;
        if ticks > 0 {
            // Remainder is below one interval, which itself fits a Duration
            let rest = elapsed_nanos % interval_nanos;
            self.rotation_elapsed = Duration::new(
                u64::try_from(rest / 1_000_000_000).unwrap_or(u64::MAX),
                u32::try_from(rest % 1_000_000_000).unwrap_or(0),
            );
            self.angle = normalize_angle(self.angle + self.config.rotation_step_deg * ticks as f64);
        }
    }

    /// Screen position of the item in slot `index`.
    pub fn position(&self, index: usize) -> Option<Position> {
        let total = self.items.len();
        if index >= total {
            return None;
        }
        let radius = self.config.radius;

        if self.phase == AnimationPhase::Converging {
            let normal = orbital_position(index, total, self.angle, radius);
            return Some(polar(normal.angle_deg(), self.config.converge_radius));
        }

        if self.expanded_index() == Some(index) {
            return Some(top_anchor(radius));
        }

        if self.phase == AnimationPhase::Rearranging {
            if let Some(swap) = self.swap {
                let slot = swap.effective_slot(index);
                return Some(orbital_position(slot, total, self.angle, radius));
            }
        }

        Some(orbital_position(index, total, self.angle, radius))
    }

    /// Screen positions of every item in slot order.
    pub fn positions(&self) -> Vec<Position> {
        (0..self.items.len())
            .filter_map(|i| self.position(i))
            .collect()
    }

    fn begin_expand(&mut self, id: u32) {
        self.generation += 1;
        let cancelled = self.timers.cancel_all();
        self.reset_animation();

        self.expanded = Some(id);
        self.phase = AnimationPhase::Converging;
        self.selection_angle = self.angle;
        self.rotation_elapsed = Duration::ZERO;

        let generation = self.generation;
        self.timers.schedule(
            self.config.rearrange_delay(),
            Transition {
                kind: TransitionKind::Rearrange,
                generation,
            },
        );
        self.timers.schedule(
            self.config.card_delay(),
            Transition {
                kind: TransitionKind::RevealCard,
                generation,
            },
        );
        debug!(id, generation, cancelled, angle = self.angle, "converging");
    }

    fn reset_animation(&mut self) {
        self.swap = None;
        self.show_card = false;
    }

    fn apply(&mut self, transition: Transition) {
        if transition.generation != self.generation || self.expanded.is_none() {
            debug!(
                generation = transition.generation,
                current = self.generation,
                "dropping stale transition"
            );
            return;
        }

        match transition.kind {
            TransitionKind::Rearrange => {
                self.phase = AnimationPhase::Rearranging;
                let clicked = self.expanded_index();
                let top = top_slot(self.items.len(), self.selection_angle);
                self.swap = clicked
                    .zip(top)
                    .map(|(clicked, top)| PositionSwap { clicked, top });
                debug!(swap = ?self.swap, "rearranging");
            }
            TransitionKind::RevealCard => {
                self.show_card = true;
                debug!(id = ?self.expanded, "card visible");
            }
        }
    }
}
