// Message types exchanged between background fetch tasks, the app
// orchestrator, and the TUI render loop.
//
// The orchestrator owns all authoritative state; after every state change it
// pushes a complete `DashboardSnapshot` so the TUI never computes statistics
// itself.

use crate::api::Player;
use crate::selection::SelectionRange;
use crate::stats::{BestWindow, CumulativePoint, GameLog, Stat, Totals};

// ---------------------------------------------------------------------------
// Fetch results
// ---------------------------------------------------------------------------

/// Result of a background fetch task.
///
/// Log results are keyed by player id so they apply idempotently no matter
/// when they arrive relative to selection changes.
#[derive(Debug)]
pub enum FetchEvent {
    PlayersLoaded(Vec<Player>),
    PlayersFailed(String),
    LogLoaded { player_id: u64, log: GameLog },
    LogFailed { player_id: u64, message: String },
}

// ---------------------------------------------------------------------------
// User commands
// ---------------------------------------------------------------------------

/// Commands from the TUI to the app orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Select or deselect a roster player.
    TogglePlayer(u64),
    /// Jump directly to a statistic (table header click equivalent).
    SetStat(Stat),
    /// Cycle the active statistic forward/backward in display order.
    NextStat,
    PrevStat,
    /// A click on the chart plot area at the given game number.
    ChartClick(usize),
    /// Pointer moved over the plot area (`None` when it left).
    ChartHover(Option<usize>),
    /// Pin the aggregation views to the first N games.
    PinGame(usize),
    ClearPin,
    Quit,
}

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// A selected roster slot, in selection order (which fixes the color).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPlayer {
    pub player_id: u64,
    pub name: String,
    pub color_index: usize,
    /// True while the player's game log fetch is still in flight.
    pub loading: bool,
}

/// One player's chart line: cumulative series plus its best-stretch window.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSeries {
    pub player_id: u64,
    pub name: String,
    pub color_index: usize,
    pub points: Vec<CumulativePoint>,
    pub best_window: Option<BestWindow>,
}

/// One row of the comparison table, pre-sorted by the active stat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub player_id: u64,
    pub name: String,
    pub color_index: usize,
    pub totals: Totals,
}

/// Data for one player's detail panel: the filtered view next to the
/// full-season baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub player_id: u64,
    pub name: String,
    pub color_index: usize,
    pub loading: bool,
    pub filtered: Totals,
    pub season: Totals,
}

/// Complete render model for one frame of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub roster: Vec<Player>,
    pub roster_loaded: bool,
    pub active_stat: Stat,
    pub selected: Vec<SelectedPlayer>,
    pub series: Vec<PlayerSeries>,
    /// League-average season value of the active stat (reference line).
    pub league_average: f64,
    pub selection: Option<SelectionRange>,
    /// First boundary of an in-progress two-click selection.
    pub pending_start: Option<usize>,
    pub hover_game: Option<usize>,
    pub pinned_game: Option<usize>,
    pub table: Vec<TableRow>,
    pub details: Vec<DetailPanel>,
    pub error: Option<String>,
    /// True when the 3-player cap is hit (shows the selection notice).
    pub cap_reached: bool,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        DashboardSnapshot {
            roster: Vec::new(),
            roster_loaded: false,
            // HR is the dashboard's landing stat.
            active_stat: Stat::Hr,
            selected: Vec::new(),
            series: Vec::new(),
            league_average: 0.0,
            selection: None,
            pending_start: None,
            hover_game: None,
            pinned_game: None,
            table: Vec::new(),
            details: Vec::new(),
            error: None,
            cap_reached: false,
        }
    }
}

// ---------------------------------------------------------------------------
// UI updates
// ---------------------------------------------------------------------------

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug)]
pub enum UiUpdate {
    Snapshot(Box<DashboardSnapshot>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
