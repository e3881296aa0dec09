//! orbital-tui: Terminal UI for the orbital timeline widget
//!
//! This crate provides the TUI layer for orbital, including:
//! - The orbit widget (ring, nodes, detail card)
//! - Keyboard and mouse interaction
//! - Headless mode for testing and automation

mod app;
mod event;
pub mod footer;
pub mod headless;
pub mod layout;
pub mod orbit;
#[cfg(test)]
pub mod test_utils;
pub mod text;
pub mod theme;

pub use app::{App, UiConfig};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use orbit::{DetailCard, OrbitWidget};
pub use orbital_engine;
pub use theme::{IconMode, IconSet, Theme};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyEventKind, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use orbital_engine::{OrbitConfig, TimelineItem};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, stdout};
use std::time::Instant;
use tracing::{debug, info};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(
    items: Vec<TimelineItem>,
    config: OrbitConfig,
    ui: UiConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate_ms = config.rotation_interval_ms;
    info!(items = items.len(), icons = ?ui.icons, "starting tui");
    let mut app = App::new(items, config, ui);

    let mut events = EventHandler::new(tick_rate_ms);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.render(area, frame.buffer_mut());
        })?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        app.handle_action(key_to_action(key));
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let size = terminal.size()?;
                        let area = Rect::new(0, 0, size.width, size.height);
                        app.handle_click(area, mouse.column, mouse.row);
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "resize");
                }
                Event::Tick => {}
            }
        }

        // Animations follow wall-clock time between loop iterations
        let now = Instant::now();
        app.tick(now.duration_since(last_tick));
        last_tick = now;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
