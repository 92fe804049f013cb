// Roster widget: searchable, filterable player list with selection markers.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::api::Player;
use crate::tui::ViewState;

use super::player_color;

/// Apply the name search and team filter to the roster, preserving upstream
/// order. Name matching is case-insensitive substring.
pub fn filtered_players<'a>(
    roster: &'a [Player],
    filter_text: &str,
    team_filter: Option<&str>,
) -> Vec<&'a Player> {
    let needle = filter_text.to_lowercase();
    roster
        .iter()
        .filter(|p| needle.is_empty() || p.player_full_name.to_lowercase().contains(&needle))
        .filter(|p| team_filter.is_none_or(|team| p.team_code() == team))
        .collect()
}

/// The distinct team codes present in the roster, sorted, for cycling the
/// team filter.
pub fn team_codes(roster: &[Player]) -> Vec<String> {
    let mut codes: Vec<String> = roster.iter().map(|p| p.team_code()).collect();
    codes.sort();
    codes.dedup();
    codes
}

/// Render the roster list into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snapshot = &state.snapshot;

    let mut title = String::from(" Players ");
    if let Some(team) = &state.team_filter {
        title = format!(" Players [{team}] ");
    }
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !snapshot.roster_loaded {
        frame.render_widget(
            Paragraph::new("Loading players...").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let players = filtered_players(
        &snapshot.roster,
        &state.filter_text,
        state.team_filter.as_deref(),
    );

    let mut lines = Vec::new();

    // Search line, shown while typing or when a filter is held.
    if state.filter_mode || !state.filter_text.is_empty() {
        let indicator = if state.filter_mode { "/" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(indicator, Style::default().fg(Color::LightYellow)),
            Span::raw(state.filter_text.clone()),
        ]));
    }

    if snapshot.cap_reached {
        lines.push(Line::from(Span::styled(
            "3 players selected (max)",
            Style::default().fg(Color::LightRed),
        )));
    }

    let list_rows = usize::from(inner.height).saturating_sub(lines.len());
    let scroll = state.cursor.saturating_sub(list_rows.saturating_sub(1));

    for (index, player) in players.iter().enumerate().skip(scroll).take(list_rows) {
        let selected = snapshot
            .selected
            .iter()
            .find(|s| s.player_id == player.player_id);

        let marker = match selected {
            Some(slot) => Span::styled("● ", Style::default().fg(player_color(slot.color_index))),
            None => Span::raw("  "),
        };
        let mut name_style = Style::default();
        if index == state.cursor {
            name_style = name_style
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray);
        }
        let loading = selected.map(|s| s.loading).unwrap_or(false);
        let suffix = if loading { " ..." } else { "" };

        lines.push(Line::from(vec![
            marker,
            Span::styled(
                format!("{:<4}", player.team_code()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(player.player_full_name.clone(), name_style),
            Span::styled(suffix, Style::default().fg(Color::DarkGray)),
        ]));
    }

    if players.is_empty() {
        lines.push(Line::from(Span::styled(
            "No players match",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
