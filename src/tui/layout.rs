// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the comparison dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +------------+-------------------------------------+
// | Roster     | Chart (fill)                         |
// | (28%)      |                                      |
// |            +-------------------------------------+
// |            | Details (9 rows)                     |
// +------------+-------------------------------------+
// | Comparison Table (6 rows)                         |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: active stat, league average, selection range, error banner.
    pub status_bar: Rect,
    /// Left column: searchable roster list.
    pub roster: Rect,
    /// Main area: cumulative line chart of the active stat.
    pub chart: Rect,
    /// Under the chart: per-player stat detail panels.
    pub details: Rect,
    /// Full width: comparison table sorted by the active stat.
    pub table: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
///
/// The layout uses fixed heights for the status bar, details row, table, and
/// help bar, with the remaining space going to the chart next to a roster
/// column.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | middle(fill) | table(6) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(14),   // middle section (roster + chart + details)
            Constraint::Length(6), // comparison table
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let middle = vertical[1];
    let table = vertical[2];
    let help_bar = vertical[3];

    // Horizontal: roster (28%) | main column (72%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(middle);

    let roster = horizontal[0];
    let main_column = horizontal[1];

    // Main column vertical: chart (fill) | details (9)
    let main_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(9)])
        .split(main_column);

    let chart = main_sections[0];
    let details = main_sections[1];

    AppLayout {
        status_bar,
        roster,
        chart,
        details,
        table,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
