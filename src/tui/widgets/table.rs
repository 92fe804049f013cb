// Comparison table: one row per selected player, every stat as a column,
// already sorted descending by the active stat.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::DashboardSnapshot;
use crate::stats::ALL_STATS;

use super::player_color;

const NAME_WIDTH: usize = 20;
const CELL_WIDTH: usize = 7;

/// Render the comparison table.
pub fn render(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let block = Block::default().borders(Borders::ALL).title(" Comparison ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if snapshot.table.is_empty() {
        frame.render_widget(
            Paragraph::new("No players selected").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let mut lines = vec![header_line(snapshot)];
    for row in &snapshot.table {
        let mut spans = vec![
            Span::styled("● ", Style::default().fg(player_color(row.color_index))),
            Span::raw(format!("{:<NAME_WIDTH$}", truncate(&row.name, NAME_WIDTH))),
        ];
        for stat in ALL_STATS {
            let mut style = Style::default();
            if *stat == snapshot.active_stat {
                style = style.fg(Color::LightYellow).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(
                format!("{:>CELL_WIDTH$}", row.totals.formatted(*stat)),
                style,
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn header_line(snapshot: &DashboardSnapshot) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("  {:<NAME_WIDTH$}", "Player"))];
    for stat in ALL_STATS {
        let mut style = Style::default().fg(Color::Gray);
        if *stat == snapshot.active_stat {
            style = style.fg(Color::LightYellow).add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(format!("{:>CELL_WIDTH$}", stat.label()), style));
    }
    Line::from(spans)
}

fn truncate(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::TableRow;
    use crate::stats::{Stat, Totals};

    fn snapshot_with_rows() -> DashboardSnapshot {
        let mut snapshot = DashboardSnapshot::default();
        snapshot.active_stat = Stat::Hr;
        snapshot.table = vec![
            TableRow {
                player_id: 2,
                name: "A Very Long Player Name That Overflows".to_string(),
                color_index: 1,
                totals: Totals {
                    pa: 300,
                    ab: 270,
                    h: 80,
                    hr: 20,
                    ..Totals::default()
                },
            },
            TableRow {
                player_id: 1,
                name: "Short Name".to_string(),
                color_index: 0,
                totals: Totals {
                    pa: 280,
                    ab: 250,
                    h: 60,
                    hr: 12,
                    ..Totals::default()
                },
            },
        ];
        snapshot
    }

    #[test]
    fn truncate_caps_long_names() {
        assert_eq!(truncate("abcdef", 4), "abcd");
        assert_eq!(truncate("ab", 4), "ab");
    }

    #[test]
    fn header_highlights_active_stat() {
        let snapshot = snapshot_with_rows();
        let header = header_line(&snapshot);
        let hr_span = header
            .spans
            .iter()
            .find(|s| s.content.trim() == "HR")
            .unwrap();
        assert!(hr_span.style.add_modifier.contains(Modifier::BOLD));
        let pa_span = header
            .spans
            .iter()
            .find(|s| s.content.trim() == "PA")
            .unwrap();
        assert!(!pa_span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn render_empty_table_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(120, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let snapshot = DashboardSnapshot::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &snapshot))
            .unwrap();
    }

    #[test]
    fn render_rows_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(160, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let snapshot = snapshot_with_rows();
        terminal
            .draw(|frame| render(frame, frame.area(), &snapshot))
            .unwrap();
    }
}
