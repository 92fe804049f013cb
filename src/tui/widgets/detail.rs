// Per-player detail panels: the filtered totals next to the season baseline,
// better-than-season values in green and worse in red.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::{DashboardSnapshot, DetailPanel};
use crate::stats::Stat;

use super::player_color;

/// Stats shown in each panel, two per row.
const DETAIL_STATS: [Stat; 16] = [
    Stat::Pa,
    Stat::Ab,
    Stat::H,
    Stat::Bb,
    Stat::Hbp,
    Stat::Sf,
    Stat::Tb,
    Stat::K,
    Stat::Rbi,
    Stat::Hr,
    Stat::Avg,
    Stat::Ops,
    Stat::Obp,
    Stat::Slg,
    Stat::Iso,
    Stat::Babip,
];

/// Render the detail panel row: one bordered panel per selected player.
pub fn render(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    if snapshot.details.is_empty() {
        let block = Block::default().borders(Borders::ALL).title(" Details ");
        frame.render_widget(block, area);
        return;
    }

    let constraints: Vec<Constraint> = snapshot
        .details
        .iter()
        .map(|_| Constraint::Ratio(1, snapshot.details.len() as u32))
        .collect();
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let show_season = snapshot.selection.is_some() || snapshot.pinned_game.is_some();
    for (panel, rect) in snapshot.details.iter().zip(panels.iter()) {
        render_panel(frame, *rect, panel, show_season);
    }
}

fn render_panel(frame: &mut Frame, area: Rect, panel: &DetailPanel, show_season: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", panel.name),
            Style::default().fg(player_color(panel.color_index)),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if panel.loading {
        frame.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let mut lines = Vec::new();
    for pair in DETAIL_STATS.chunks(2) {
        let mut spans = Vec::new();
        for stat in pair {
            spans.extend(stat_spans(panel, *stat, show_season));
            spans.push(Span::raw("  "));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Spans for one stat cell: label, filtered value colored against the season
/// baseline, and the season value in parens when a filter is active.
fn stat_spans(panel: &DetailPanel, stat: Stat, show_season: bool) -> Vec<Span<'static>> {
    let filtered = panel.filtered.value(stat);
    let season = panel.season.value(stat);
    let color = comparison_color(stat, filtered, season);

    let mut spans = vec![
        Span::styled(
            format!("{:>5} ", stat.label()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("{:>6}", panel.filtered.formatted(stat)),
            Style::default().fg(color),
        ),
    ];
    if show_season {
        spans.push(Span::styled(
            format!(" ({})", panel.season.formatted(stat)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}

/// Green when the filtered value beats the season value, red when it trails.
/// K% is the one stat where lower is better.
fn comparison_color(stat: Stat, filtered: f64, season: f64) -> Color {
    if (filtered - season).abs() < f64::EPSILON {
        return Color::White;
    }
    let better = if stat == Stat::KPct {
        filtered < season
    } else {
        filtered > season
    };
    if better {
        Color::Green
    } else {
        Color::Red
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
