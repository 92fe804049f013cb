// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest `DashboardSnapshot` plus
// local list state (search text, team filter, cursor). The app orchestrator
// pushes `UiUpdate` messages over an mpsc channel; the TUI applies them and
// re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream};
use crossterm::execute;
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::protocol::{DashboardSnapshot, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the latest snapshot plus roster-list UI state.
///
/// Search, team filter, and the cursor are purely presentational and never
/// leave the TUI; everything statistical lives in the snapshot.
#[derive(Default)]
pub struct ViewState {
    /// Latest full render model from the app orchestrator.
    pub snapshot: DashboardSnapshot,
    /// Roster name search text.
    pub filter_text: String,
    /// Whether the search input is capturing keys.
    pub filter_mode: bool,
    /// Team code filter for the roster list.
    pub team_filter: Option<String>,
    /// Cursor index into the filtered roster list.
    pub cursor: usize,
}

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            state.snapshot = *snapshot;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, &state.snapshot);
    widgets::roster::render(frame, layout.roster, state);
    widgets::chart::render(frame, layout.chart, &state.snapshot);
    widgets::detail::render(frame, layout.details, &state.snapshot);
    widgets::table::render(frame, layout.table, &state.snapshot);
    render_help_bar(frame, layout.help_bar);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let text = " q:Quit | /:Search | t:Team | Enter:Select | \u{2190}\u{2192}:Stat | click-click:Range | g:Pin | Esc:Clear";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal and enables mouse capture.
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, input events, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    // Restore the terminal on crash. Capture the original hook and chain
    // ours before it.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), DisableMouseCapture);
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // Snapshots from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Keyboard and mouse input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(command) = input::handle_key(key_event, &mut view_state) {
                            let quit = command == UserCommand::Quit;
                            let _ = cmd_tx.send(command).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(Event::Mouse(mouse_event))) => {
                        let size = terminal.size()?;
                        let screen = Rect::new(0, 0, size.width, size.height);
                        if let Some(command) =
                            input::handle_mouse(mouse_event, screen, &view_state)
                        {
                            let _ = cmd_tx.send(command).await;
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize and the rest are picked up on the next draw
                    }
                    Some(Err(_)) | None => {
                        break;
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stat;

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.snapshot.roster.is_empty());
        assert_eq!(state.snapshot.active_stat, Stat::Hr);
        assert!(state.filter_text.is_empty());
        assert!(!state.filter_mode);
        assert!(state.team_filter.is_none());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn apply_ui_update_replaces_the_snapshot() {
        let mut state = ViewState::default();
        state.filter_text = "soto".to_string();

        let mut snapshot = DashboardSnapshot::default();
        snapshot.active_stat = Stat::Avg;
        snapshot.roster_loaded = true;
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(snapshot)));

        assert_eq!(state.snapshot.active_stat, Stat::Avg);
        assert!(state.snapshot.roster_loaded);
        // Local list state survives snapshot pushes.
        assert_eq!(state.filter_text, "soto");
    }

    #[test]
    fn render_frame_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(160, 50);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }

    #[test]
    fn render_frame_does_not_panic_on_small_terminal() {
        let backend = ratatui::backend::TestBackend::new(60, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }
}
