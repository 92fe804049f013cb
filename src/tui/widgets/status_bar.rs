// Status bar widget: active stat, league average, current filter window,
// and the error banner.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::DashboardSnapshot;

/// Render the status bar into the given area.
///
/// Layout: [stat selector] [league avg] [filter window] [error banner]
pub fn render(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let mut spans = Vec::new();

    spans.push(Span::styled(
        format!(" {} ", snapshot.active_stat.label()),
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));

    spans.push(Span::styled(
        format!(
            " lg avg {}",
            snapshot.active_stat.format_value(snapshot.league_average)
        ),
        Style::default().fg(Color::Gray),
    ));

    spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        filter_label(snapshot),
        Style::default().fg(Color::White),
    ));

    if let Some(error) = &snapshot.error {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("error: {error}"),
            Style::default().fg(Color::LightRed),
        ));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Describe which games the aggregation views currently cover.
pub fn filter_label(snapshot: &DashboardSnapshot) -> String {
    if let Some(range) = snapshot.selection {
        return format!("games {}-{}", range.start, range.end);
    }
    if let Some(start) = snapshot.pending_start {
        return format!("selecting from game {start}...");
    }
    if let Some(pinned) = snapshot.pinned_game {
        return format!("first {pinned} games");
    }
    "full season".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
