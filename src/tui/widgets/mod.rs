// TUI widget modules for each dashboard panel.

pub mod chart;
pub mod detail;
pub mod roster;
pub mod status_bar;
pub mod table;

use ratatui::style::Color;

/// Line colors by selection order. Index 0 is the first selected player.
pub const PLAYER_COLORS: [Color; 3] = [Color::Cyan, Color::Magenta, Color::Yellow];

/// Color for a selection-order index.
pub fn player_color(color_index: usize) -> Color {
    PLAYER_COLORS[color_index % PLAYER_COLORS.len()]
}
