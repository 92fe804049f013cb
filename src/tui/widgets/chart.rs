// Cumulative stat chart: one line per selected player, league-average
// reference line, best-stretch emphasis, and selection/hover guides.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::protocol::DashboardSnapshot;

use super::player_color;

// Columns reserved inside the border for y-axis labels, and rows reserved
// for the x axis. `plot_area` and the rendered chart must agree on these so
// mouse positions map onto game numbers.
const Y_LABEL_WIDTH: u16 = 6;
const X_AXIS_ROWS: u16 = 2;

/// The data region of the chart inside the given zone: the bordered area
/// minus the y-axis label gutter and the x-axis rows.
pub fn plot_area(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1).saturating_add(Y_LABEL_WIDTH),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2 + Y_LABEL_WIDTH),
        height: area.height.saturating_sub(2 + X_AXIS_ROWS),
    }
}

/// Map a terminal cell inside the plot to a 1-based game number.
///
/// Returns `None` when the position is outside the plot or there is nothing
/// plotted. Columns divide evenly across the game axis.
pub fn game_at(plot: Rect, max_game: usize, column: u16, row: u16) -> Option<usize> {
    if max_game == 0 || plot.width == 0 || plot.height == 0 {
        return None;
    }
    if !plot.contains((column, row).into()) {
        return None;
    }
    let offset = usize::from(column - plot.x);
    let game = 1 + offset * max_game / usize::from(plot.width);
    Some(game.min(max_game))
}

/// Render the chart zone.
pub fn render(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let stat = snapshot.active_stat;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} by game ", stat.label()));

    if snapshot.series.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let hint = if snapshot.selected.is_empty() {
            "Select up to 3 players to compare"
        } else {
            "Loading game logs..."
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let max_game = snapshot
        .series
        .iter()
        .map(|s| s.points.len())
        .max()
        .unwrap_or(0)
        .max(2);
    let x_max = max_game as f64;

    let y_peak = snapshot
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.value))
        .fold(snapshot.league_average, f64::max);
    let y_max = (y_peak * 1.1).max(1.0);

    // Owned point buffers; `Dataset` borrows its data.
    let series_data: Vec<Vec<(f64, f64)>> = snapshot
        .series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|p| (p.game_number as f64, p.value))
                .collect()
        })
        .collect();

    let window_data: Vec<Vec<(f64, f64)>> = snapshot
        .series
        .iter()
        .map(|s| match s.best_window {
            Some(window) => s
                .points
                .iter()
                .filter(|p| window.contains(p.game_number))
                .map(|p| (p.game_number as f64, p.value))
                .collect(),
            None => Vec::new(),
        })
        .collect();

    // Every other game, so the reference line reads as dashed.
    let average_data: Vec<(f64, f64)> = (1..=max_game)
        .step_by(2)
        .map(|g| (g as f64, snapshot.league_average))
        .collect();

    let guides = guide_games(snapshot);
    let guide_data: Vec<Vec<(f64, f64)>> = guides
        .iter()
        .map(|(game, _)| vertical_guide(*game, y_max))
        .collect();

    let mut datasets = Vec::new();

    datasets.push(
        Dataset::default()
            .name("lg avg")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::DarkGray))
            .data(&average_data),
    );

    for ((_, color), data) in guides.iter().zip(&guide_data) {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(*color))
                .data(data),
        );
    }

    for (series, data) in snapshot.series.iter().zip(&series_data) {
        datasets.push(
            Dataset::default()
                .name(series.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(player_color(series.color_index)))
                .data(data),
        );
    }

    // Best-stretch points drawn on top of their own line, heavier marker.
    for (series, data) in snapshot.series.iter().zip(&window_data) {
        if data.is_empty() {
            continue;
        }
        datasets.push(
            Dataset::default()
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Scatter)
                .style(
                    Style::default()
                        .fg(player_color(series.color_index))
                        .add_modifier(Modifier::BOLD),
                )
                .data(data),
        );
    }

    let x_labels = vec![
        Span::raw("1"),
        Span::raw(format!("{}", max_game / 2)),
        Span::raw(format!("{}", max_game)),
    ];
    let y_labels = vec![
        Span::raw(format!("{:>5}", stat.format_value(0.0))),
        Span::raw(format!("{:>5}", stat.format_value(y_max / 2.0))),
        Span::raw(format!("{:>5}", stat.format_value(y_max))),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([1.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(Color::Gray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(y_labels)
                .style(Style::default().fg(Color::Gray)),
        );

    frame.render_widget(chart, area);
}

/// Vertical guide positions: selection bounds, pending start, hover.
fn guide_games(snapshot: &DashboardSnapshot) -> Vec<(usize, Color)> {
    let mut guides = Vec::new();
    if let Some(range) = snapshot.selection {
        guides.push((range.start, Color::White));
        guides.push((range.end, Color::White));
    }
    if let Some(start) = snapshot.pending_start {
        guides.push((start, Color::LightYellow));
    }
    if let Some(game) = snapshot.hover_game {
        guides.push((game, Color::Gray));
    }
    guides
}

fn vertical_guide(game: usize, y_max: f64) -> Vec<(f64, f64)> {
    let x = game as f64;
    (0..=20).map(|i| (x, y_max * f64::from(i) / 20.0)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PlayerSeries;
    use crate::selection::SelectionRange;
    use crate::stats::{CumulativePoint, Stat};

    fn zone() -> Rect {
        Rect::new(0, 1, 100, 30)
    }

    fn snapshot_with_series(points: usize) -> DashboardSnapshot {
        DashboardSnapshot {
            active_stat: Stat::H,
            series: vec![PlayerSeries {
                player_id: 1,
                name: "Test Player".to_string(),
                color_index: 0,
                points: (1..=points)
                    .map(|g| CumulativePoint {
                        game_number: g,
                        value: g as f64,
                    })
                    .collect(),
                best_window: None,
            }],
            league_average: 140.0,
            ..DashboardSnapshot::default()
        }
    }

    #[test]
    fn plot_area_is_inside_the_borders_and_gutters() {
        let plot = plot_area(zone());
        assert_eq!(plot.x, 7);
        assert_eq!(plot.y, 2);
        assert_eq!(plot.width, 100 - 2 - 6);
        assert_eq!(plot.height, 30 - 2 - 2);
    }

    #[test]
    fn plot_area_degenerates_gracefully_on_tiny_zones() {
        let plot = plot_area(Rect::new(0, 0, 4, 3));
        assert_eq!(plot.width, 0);
        assert_eq!(plot.height, 0);
    }

    #[test]
    fn game_at_maps_edges_of_the_plot() {
        let plot = Rect::new(10, 5, 100, 20);
        assert_eq!(game_at(plot, 50, 10, 5), Some(1));
        assert_eq!(game_at(plot, 50, 109, 24), Some(50));
    }

    #[test]
    fn game_at_divides_columns_evenly() {
        let plot = Rect::new(0, 0, 100, 20);
        // Halfway across a 100-column plot of 50 games lands mid-season.
        assert_eq!(game_at(plot, 50, 50, 10), Some(26));
    }

    #[test]
    fn game_at_outside_plot_is_none() {
        let plot = Rect::new(10, 5, 100, 20);
        assert_eq!(game_at(plot, 50, 9, 5), None);
        assert_eq!(game_at(plot, 50, 110, 5), None);
        assert_eq!(game_at(plot, 50, 10, 25), None);
    }

    #[test]
    fn game_at_with_no_games_is_none() {
        let plot = Rect::new(0, 0, 100, 20);
        assert_eq!(game_at(plot, 0, 5, 5), None);
    }

    #[test]
    fn guide_games_collects_selection_pending_and_hover() {
        let mut snapshot = DashboardSnapshot::default();
        snapshot.selection = Some(SelectionRange::new(5, 12));
        snapshot.hover_game = Some(30);
        let guides = guide_games(&snapshot);
        let games: Vec<usize> = guides.iter().map(|(g, _)| *g).collect();
        assert_eq!(games, vec![5, 12, 30]);
    }

    #[test]
    fn render_empty_state_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let snapshot = DashboardSnapshot::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &snapshot))
            .unwrap();
    }

    #[test]
    fn render_with_series_and_guides_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut snapshot = snapshot_with_series(80);
        snapshot.selection = Some(SelectionRange::new(10, 20));
        snapshot.pending_start = None;
        snapshot.hover_game = Some(40);
        terminal
            .draw(|frame| render(frame, frame.area(), &snapshot))
            .unwrap();
    }
}
