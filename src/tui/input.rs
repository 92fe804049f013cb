// Keyboard and mouse input handling.
//
// Translates crossterm events into UserCommand messages sent to the app
// orchestrator, or into local ViewState mutations (roster search, team
// filter, cursor movement). Chart mouse positions are mapped to game numbers
// through the same layout math the renderer uses.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::protocol::UserCommand;

use super::layout::build_layout;
use super::widgets::{chart, roster};
use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator (player toggles, stat changes, pins, quit). Returns
/// `None` when the key press was handled locally by mutating `ViewState`
/// (search, team filter, cursor movement).
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // Search mode: capture printable characters and special keys
    if view_state.filter_mode {
        return handle_filter_mode(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),

        // Roster search and filtering
        KeyCode::Char('/') => {
            view_state.filter_mode = true;
            None
        }
        KeyCode::Char('t') => {
            cycle_team_filter(view_state);
            clamp_cursor(view_state);
            None
        }
        KeyCode::Esc => {
            view_state.filter_text.clear();
            view_state.team_filter = None;
            clamp_cursor(view_state);
            None
        }

        // Roster cursor
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.cursor = view_state.cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.cursor += 1;
            clamp_cursor(view_state);
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            player_under_cursor(view_state).map(UserCommand::TogglePlayer)
        }

        // Stat cycling
        KeyCode::Right | KeyCode::Char('s') => Some(UserCommand::NextStat),
        KeyCode::Left | KeyCode::Char('S') => Some(UserCommand::PrevStat),

        // Pin the aggregation views to the first N games at the hovered game
        KeyCode::Char('g') => view_state.snapshot.hover_game.map(UserCommand::PinGame),
        KeyCode::Char('G') => Some(UserCommand::ClearPin),

        _ => None,
    }
}

/// Handle key events while in search mode.
///
/// Printable characters are appended to the search text, Backspace removes
/// the last character, Enter keeps the text and exits, Esc clears and exits.
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.filter_mode = false;
            view_state.filter_text.clear();
            clamp_cursor(view_state);
            None
        }
        KeyCode::Enter => {
            view_state.filter_mode = false;
            None
        }
        KeyCode::Backspace => {
            view_state.filter_text.pop();
            clamp_cursor(view_state);
            None
        }
        KeyCode::Char(c) => {
            view_state.filter_text.push(c);
            clamp_cursor(view_state);
            None
        }
        _ => None,
    }
}

/// Handle a mouse event anywhere on the screen.
///
/// Left clicks and pointer movement inside the chart's plot area become
/// selection clicks and hover updates; movement outside it clears the hover.
pub fn handle_mouse(
    mouse: MouseEvent,
    screen: Rect,
    view_state: &ViewState,
) -> Option<UserCommand> {
    let layout = build_layout(screen);
    let plot = chart::plot_area(layout.chart);
    let max_game = view_state
        .snapshot
        .series
        .iter()
        .map(|s| s.points.len())
        .max()
        .unwrap_or(0);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let game = chart::game_at(plot, max_game, mouse.column, mouse.row)?;
            Some(UserCommand::ChartClick(game))
        }
        MouseEventKind::Moved => Some(UserCommand::ChartHover(chart::game_at(
            plot,
            max_game,
            mouse.column,
            mouse.row,
        ))),
        _ => None,
    }
}

/// Cycle the team filter through the codes present in the roster, ending
/// back at no filter.
fn cycle_team_filter(view_state: &mut ViewState) {
    let codes = roster::team_codes(&view_state.snapshot.roster);
    if codes.is_empty() {
        view_state.team_filter = None;
        return;
    }
    view_state.team_filter = match &view_state.team_filter {
        None => Some(codes[0].clone()),
        Some(current) => {
            let idx = codes.iter().position(|c| c == current);
            match idx {
                Some(i) if i + 1 < codes.len() => Some(codes[i + 1].clone()),
                _ => None, // last code or filter no longer present -> clear
            }
        }
    };
}

fn filtered_len(view_state: &ViewState) -> usize {
    roster::filtered_players(
        &view_state.snapshot.roster,
        &view_state.filter_text,
        view_state.team_filter.as_deref(),
    )
    .len()
}

fn clamp_cursor(view_state: &mut ViewState) {
    let len = filtered_len(view_state);
    view_state.cursor = view_state.cursor.min(len.saturating_sub(1));
}

fn player_under_cursor(view_state: &ViewState) -> Option<u64> {
    roster::filtered_players(
        &view_state.snapshot.roster,
        &view_state.filter_text,
        view_state.team_filter.as_deref(),
    )
    .get(view_state.cursor)
    .map(|p| p.player_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
