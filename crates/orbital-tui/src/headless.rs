//! Headless mode for the orbital TUI.
//!
//! Runs the app against a test backend instead of a real terminal. Input is
//! sent through channels and the screen is captured after each render.
//! Animation time advances one tick interval per idle tick, independent of
//! how long rendering takes.

use crate::app::{App, UiConfig};
use crate::event::Action;
use crate::theme::{IconMode, Theme};
use orbital_engine::{AnimationPhase, OrbitConfig, TimelineItem};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Animation phase of the orbit.
    pub phase: AnimationPhase,
    /// Id of the expanded item.
    pub expanded: Option<u32>,
    /// Whether the detail card is visible.
    pub card_visible: bool,
    /// Slot index under the cursor.
    pub cursor: usize,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

#[derive(Debug, Clone, Copy)]
enum Input {
    Action(Action),
    Click { col: u16, row: u16 },
}

/// Handle to control a headless TUI instance.
///
/// Use this to send input and observe state changes.
pub struct HeadlessHandle {
    input_tx: mpsc::UnboundedSender<Input>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.input_tx.send(Input::Action(action)).is_ok()
    }

    /// Send a left click at a screen cell.
    pub fn send_click(&self, col: u16, row: u16) -> bool {
        self.input_tx.send(Input::Click { col, row }).is_ok()
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            if tokio::time::timeout(remaining, self.state_rx.changed())
                .await
                .is_err()
            {
                return None;
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        let text = text.to_string();
        self.wait_for(|s| s.screen_contents.contains(&text), timeout)
            .await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds; each idle tick advances animations by this much.
    pub tick_rate_ms: u64,
    /// Icon mode used for rendering.
    pub icons: IconMode,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50,
            icons: IconMode::Ascii,
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background task.
///
/// # Example
///
/// ```ignore
/// let (mut handle, task) =
///     run_tui_headless(demo_items(), OrbitConfig::default(), HeadlessConfig::default());
///
/// handle.send_action(Action::Item(2));
/// let state = handle.wait_for(|s| s.card_visible, Duration::from_secs(5)).await;
///
/// handle.send_action(Action::Quit);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless(
    items: Vec<TimelineItem>,
    orbit_config: OrbitConfig,
    config: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(items, orbit_config, config, input_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle { input_tx, state_rx };

    (handle, task)
}

async fn run_headless_loop(
    items: Vec<TimelineItem>,
    orbit_config: OrbitConfig,
    config: HeadlessConfig,
    mut input_rx: mpsc::UnboundedReceiver<Input>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;

    let ui = UiConfig {
        icons: config.icons,
        theme: Theme::default(),
    };
    let mut app = App::new(items, orbit_config, ui);

    let tick_duration = Duration::from_millis(config.tick_rate_ms);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.render(area, frame.buffer_mut());
        })?;

        let screen_contents = buffer_to_string(terminal.backend().buffer());

        let _ = state_tx.send(HeadlessState {
            screen_contents,
            phase: app.orbit.phase(),
            expanded: app.orbit.expanded_id(),
            card_visible: app.orbit.card_visible(),
            cursor: app.cursor,
            should_quit: app.should_quit,
            show_help: app.show_help,
        });

        if app.should_quit {
            break;
        }

        // Wait for input or tick
        let input = tokio::select! {
            Some(input) = input_rx.recv() => Some(input),
            () = tokio::time::sleep(tick_duration) => None,
        };

        match input {
            Some(Input::Action(action)) => app.handle_action(action),
            Some(Input::Click { col, row }) => {
                let area = ratatui::layout::Rect::new(0, 0, config.width, config.height);
                app.handle_click(area, col, row);
            }
            None => app.tick(tick_duration),
        }
    }

    Ok(())
}

/// Convert a terminal buffer to a string representation.
///
/// Trailing whitespace is trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}
