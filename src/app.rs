// Application state and orchestration logic.
//
// The central event loop that coordinates background fetch results and user
// commands from the TUI. Maintains the complete dashboard state (roster,
// selections, cached game logs, active stat, range selection) and pushes a
// full `DashboardSnapshot` to the TUI after every state change.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::{ApiClient, Player};
use crate::averages::league_average;
use crate::config::Config;
use crate::protocol::{
    DashboardSnapshot, DetailPanel, FetchEvent, PlayerSeries, SelectedPlayer, TableRow, UiUpdate,
    UserCommand,
};
use crate::selection::RangeSelector;
use crate::stats::{aggregate, best_window, compute_series, GameLog, Stat, ViewFilter};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hard cap on concurrently selected players. Selection attempts beyond the
/// cap are silent no-ops.
pub const MAX_SELECTED: usize = 3;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    api: Arc<ApiClient>,
    /// Sender cloned into spawned fetch tasks; results come back through the
    /// orchestrator's fetch channel.
    fetch_tx: mpsc::Sender<FetchEvent>,
    pub roster: Vec<Player>,
    pub roster_loaded: bool,
    /// Selected player ids in selection order. The index in this vec is the
    /// player's stable color assignment.
    pub selected: Vec<u64>,
    /// Lazily fetched per-player logs, evicted only on explicit deselection.
    ///
    /// A fetch resolving after its player was deselected still lands here
    /// (insertion is keyed by player id and idempotent). That stale-response
    /// repopulation is a known gap in the current design, kept as-is.
    pub logs: HashMap<u64, GameLog>,
    in_flight: HashSet<u64>,
    pub active_stat: Stat,
    pub selector: RangeSelector,
    /// Prefix cutoff for the aggregation views (first N games). A finalized
    /// selection range takes precedence.
    pub pinned_game: Option<usize>,
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new(config: Config, api: Arc<ApiClient>, fetch_tx: mpsc::Sender<FetchEvent>) -> Self {
        AppState {
            config,
            api,
            fetch_tx,
            roster: Vec::new(),
            roster_loaded: false,
            selected: Vec::new(),
            logs: HashMap::new(),
            in_flight: HashSet::new(),
            active_stat: Stat::Hr,
            selector: RangeSelector::new(),
            pinned_game: None,
            last_error: None,
        }
    }

    /// Kick off the initial roster fetch.
    pub fn spawn_roster_fetch(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let event = match api.fetch_players().await {
                Ok(players) => {
                    info!("roster loaded: {} players", players.len());
                    FetchEvent::PlayersLoaded(players)
                }
                Err(e) => {
                    warn!("roster fetch failed: {e}");
                    FetchEvent::PlayersFailed(e.to_string())
                }
            };
            let _ = tx.send(event).await;
        });
    }

    fn spawn_log_fetch(&mut self, player_id: u64) {
        if self.logs.contains_key(&player_id) || self.in_flight.contains(&player_id) {
            return;
        }
        self.in_flight.insert(player_id);
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let event = match api.fetch_game_log(player_id).await {
                Ok(log) => {
                    info!("game log loaded for player {player_id}: {} games", log.len());
                    FetchEvent::LogLoaded { player_id, log }
                }
                Err(e) => {
                    warn!("game log fetch failed for player {player_id}: {e}");
                    FetchEvent::LogFailed {
                        player_id,
                        message: e.to_string(),
                    }
                }
            };
            let _ = tx.send(event).await;
        });
    }

    /// Select or deselect a player.
    ///
    /// Deselection evicts the cached log. Selecting a fourth player is a
    /// no-op. Deselecting the last player resets the range selection and the
    /// pinned game (the only external reset path).
    pub fn toggle_player(&mut self, player_id: u64) {
        if let Some(index) = self.selected.iter().position(|&id| id == player_id) {
            self.selected.remove(index);
            self.logs.remove(&player_id);
            if self.selected.is_empty() {
                self.selector.reset();
                self.pinned_game = None;
            }
        } else if self.selected.len() < MAX_SELECTED {
            self.selected.push(player_id);
            self.spawn_log_fetch(player_id);
        }
    }

    /// Apply a user command. Returns `true` when the app should quit.
    pub fn handle_command(&mut self, command: UserCommand) -> bool {
        match command {
            UserCommand::TogglePlayer(player_id) => self.toggle_player(player_id),
            UserCommand::SetStat(stat) => self.active_stat = stat,
            UserCommand::NextStat => self.active_stat = self.active_stat.next(),
            UserCommand::PrevStat => self.active_stat = self.active_stat.prev(),
            UserCommand::ChartClick(game_number) => {
                self.selector.click(game_number);
            }
            UserCommand::ChartHover(game_number) => self.selector.set_hover(game_number),
            UserCommand::PinGame(game_number) => self.pinned_game = Some(game_number),
            UserCommand::ClearPin => self.pinned_game = None,
            UserCommand::Quit => return true,
        }
        false
    }

    /// Apply a fetch result. Successful results clear the error banner.
    pub fn handle_fetch_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::PlayersLoaded(players) => {
                self.roster = players;
                self.roster_loaded = true;
                self.last_error = None;
            }
            FetchEvent::PlayersFailed(message) => {
                self.last_error = Some(message);
            }
            FetchEvent::LogLoaded { player_id, log } => {
                self.in_flight.remove(&player_id);
                // No deselection guard here: see the `logs` field docs.
                self.logs.insert(player_id, log);
                self.last_error = None;
            }
            FetchEvent::LogFailed { player_id, message } => {
                self.in_flight.remove(&player_id);
                self.last_error = Some(message);
            }
        }
    }

    fn player_name(&self, player_id: u64) -> String {
        self.roster
            .iter()
            .find(|p| p.player_id == player_id)
            .map(|p| p.player_full_name.clone())
            .unwrap_or_else(|| format!("Player {player_id}"))
    }

    /// Build the complete render model from the current state.
    ///
    /// Chart series and best windows come from the raw logs; the detail
    /// panels and the table go through the aggregation filter. The table is
    /// sorted descending by the active stat.
    pub fn build_snapshot(&self) -> DashboardSnapshot {
        let stat = self.active_stat;
        let filter = ViewFilter::from_view_state(self.selector.range(), self.pinned_game);

        let selected: Vec<SelectedPlayer> = self
            .selected
            .iter()
            .enumerate()
            .map(|(color_index, &player_id)| SelectedPlayer {
                player_id,
                name: self.player_name(player_id),
                color_index,
                loading: !self.logs.contains_key(&player_id),
            })
            .collect();

        let mut series = Vec::new();
        let mut details = Vec::new();
        let mut table = Vec::new();

        for (color_index, &player_id) in self.selected.iter().enumerate() {
            let name = self.player_name(player_id);
            let Some(log) = self.logs.get(&player_id) else {
                details.push(DetailPanel {
                    player_id,
                    name,
                    color_index,
                    loading: true,
                    filtered: Default::default(),
                    season: Default::default(),
                });
                continue;
            };

            series.push(PlayerSeries {
                player_id,
                name: name.clone(),
                color_index,
                points: compute_series(log, stat),
                best_window: best_window(log, stat, self.config.chart.best_window_games),
            });
            details.push(DetailPanel {
                player_id,
                name: name.clone(),
                color_index,
                loading: false,
                filtered: aggregate(log, &filter),
                season: aggregate(log, &ViewFilter::FullLog),
            });
            table.push(TableRow {
                player_id,
                name,
                color_index,
                totals: aggregate(log, &filter),
            });
        }

        table.sort_by(|a, b| {
            b.totals
                .value(stat)
                .partial_cmp(&a.totals.value(stat))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        DashboardSnapshot {
            roster: self.roster.clone(),
            roster_loaded: self.roster_loaded,
            active_stat: stat,
            selected,
            series,
            league_average: league_average(stat),
            selection: self.selector.range(),
            pending_start: self.selector.pending_start(),
            hover_game: self.selector.hover(),
            pinned_game: self.pinned_game,
            table,
            details,
            error: self.last_error.clone(),
            cap_reached: self.selected.len() == MAX_SELECTED,
        }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the orchestrator event loop until the TUI requests quit or both
/// channels close.
///
/// Every handled event is followed by a fresh snapshot push, so statistic
/// recomputation is always synchronous with the latest committed state.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut fetch_rx: mpsc::Receiver<FetchEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    state.spawn_roster_fetch();
    push_snapshot(&ui_tx, &state).await;

    loop {
        tokio::select! {
            command = cmd_rx.recv() => {
                match command {
                    Some(command) => {
                        if state.handle_command(command) {
                            info!("quit requested");
                            break;
                        }
                        push_snapshot(&ui_tx, &state).await;
                    }
                    None => break,
                }
            }
            event = fetch_rx.recv() => {
                match event {
                    Some(event) => {
                        state.handle_fetch_event(event);
                        push_snapshot(&ui_tx, &state).await;
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}

async fn push_snapshot(ui_tx: &mpsc::Sender<UiUpdate>, state: &AppState) {
    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.build_snapshot())))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, ChartConfig};
    use crate::stats::GameStatLine;

    fn test_state() -> (AppState, mpsc::Receiver<FetchEvent>) {
        let (fetch_tx, fetch_rx) = mpsc::channel(16);
        let config = Config {
            api: ApiConfig {
                base_url: "https://stats.example.test/api".to_string(),
                // No key: spawned fetches fail immediately without network.
                api_key: None,
            },
            chart: ChartConfig::default(),
        };
        let api = Arc::new(ApiClient::new(&config.api));
        (AppState::new(config, api, fetch_tx), fetch_rx)
    }

    fn log_of(hits: &[u32]) -> GameLog {
        hits.iter()
            .map(|&h| GameStatLine {
                pa: 4,
                ab: 4,
                h,
                tb: h,
                hr: h / 2,
                ..GameStatLine::default()
            })
            .collect()
    }

    fn roster_player(id: u64, name: &str) -> Player {
        serde_json::from_str(&format!(
            r#"{{"playerId": {id}, "playerFullName": "{name}"}}"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn selection_cap_is_enforced_silently() {
        let (mut state, _rx) = test_state();
        for id in 1..=4 {
            state.toggle_player(id);
        }
        assert_eq!(state.selected, vec![1, 2, 3]);
        assert!(state.build_snapshot().cap_reached);
    }

    #[tokio::test]
    async fn deselection_evicts_cached_log() {
        let (mut state, _rx) = test_state();
        state.toggle_player(7);
        state.handle_fetch_event(FetchEvent::LogLoaded {
            player_id: 7,
            log: log_of(&[1, 2]),
        });
        assert!(state.logs.contains_key(&7));

        state.toggle_player(7);
        assert!(state.selected.is_empty());
        assert!(!state.logs.contains_key(&7));
    }

    #[tokio::test]
    async fn reselect_spawns_a_fresh_fetch_after_eviction() {
        let (mut state, mut rx) = test_state();
        state.toggle_player(7);
        // First spawn fails fast (no API key configured).
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, FetchEvent::LogFailed { player_id: 7, .. }));
        state.handle_fetch_event(event);

        state.toggle_player(7); // deselect
        state.toggle_player(7); // reselect: cache is empty, fetch again
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, FetchEvent::LogFailed { player_id: 7, .. }));
    }

    #[tokio::test]
    async fn stale_log_response_repopulates_cache_for_deselected_player() {
        // Known gap, preserved: a fetch resolving after deselection lands in
        // the cache anyway.
        let (mut state, _rx) = test_state();
        state.toggle_player(7);
        state.toggle_player(7); // deselect while "fetch" is in flight
        state.handle_fetch_event(FetchEvent::LogLoaded {
            player_id: 7,
            log: log_of(&[1]),
        });
        assert!(state.logs.contains_key(&7));
        // But the snapshot ignores it: the player is not selected.
        assert!(state.build_snapshot().series.is_empty());
    }

    #[tokio::test]
    async fn deselecting_last_player_resets_selection_state() {
        let (mut state, _rx) = test_state();
        state.toggle_player(1);
        state.handle_command(UserCommand::ChartClick(5));
        state.handle_command(UserCommand::ChartClick(12));
        state.handle_command(UserCommand::PinGame(40));
        assert!(state.selector.range().is_some());

        state.toggle_player(1);
        assert!(state.selector.range().is_none());
        assert!(state.pinned_game.is_none());
    }

    #[tokio::test]
    async fn selection_survives_stat_and_player_changes() {
        // Current behavior: changing the stat or the player set does NOT
        // reset a finalized range.
        let (mut state, _rx) = test_state();
        state.toggle_player(1);
        state.toggle_player(2);
        state.handle_command(UserCommand::ChartClick(5));
        state.handle_command(UserCommand::ChartClick(12));

        state.handle_command(UserCommand::NextStat);
        state.toggle_player(3);
        assert!(state.selector.range().is_some());
    }

    #[tokio::test]
    async fn snapshot_series_and_details_follow_selection_order() {
        let (mut state, _rx) = test_state();
        state.roster = vec![roster_player(1, "First Player"), roster_player(2, "Second Player")];
        state.toggle_player(2);
        state.toggle_player(1);
        state.handle_fetch_event(FetchEvent::LogLoaded {
            player_id: 1,
            log: log_of(&[1, 1]),
        });
        state.handle_fetch_event(FetchEvent::LogLoaded {
            player_id: 2,
            log: log_of(&[2, 2]),
        });

        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.selected.len(), 2);
        assert_eq!(snapshot.selected[0].name, "Second Player");
        assert_eq!(snapshot.selected[0].color_index, 0);
        assert_eq!(snapshot.selected[1].color_index, 1);
        assert_eq!(snapshot.series.len(), 2);
        assert_eq!(snapshot.series[0].player_id, 2);
        assert_eq!(snapshot.details.len(), 2);
    }

    #[tokio::test]
    async fn snapshot_table_sorts_descending_by_active_stat() {
        let (mut state, _rx) = test_state();
        state.active_stat = Stat::H;
        state.toggle_player(1);
        state.toggle_player(2);
        state.handle_fetch_event(FetchEvent::LogLoaded {
            player_id: 1,
            log: log_of(&[1, 0, 1]),
        });
        state.handle_fetch_event(FetchEvent::LogLoaded {
            player_id: 2,
            log: log_of(&[3, 2, 2]),
        });

        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.table.len(), 2);
        assert_eq!(snapshot.table[0].player_id, 2);
        assert_eq!(snapshot.table[1].player_id, 1);
    }

    #[tokio::test]
    async fn snapshot_applies_range_filter_to_table_and_details() {
        let (mut state, _rx) = test_state();
        state.active_stat = Stat::H;
        state.toggle_player(1);
        state.handle_fetch_event(FetchEvent::LogLoaded {
            player_id: 1,
            log: log_of(&[1, 2, 3, 4]),
        });
        state.handle_command(UserCommand::ChartClick(2));
        state.handle_command(UserCommand::ChartClick(3));

        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.table[0].totals.h, 5);
        assert_eq!(snapshot.details[0].filtered.h, 5);
        assert_eq!(snapshot.details[0].season.h, 10);
    }

    #[tokio::test]
    async fn pinned_game_prefixes_aggregation_until_range_set() {
        let (mut state, _rx) = test_state();
        state.active_stat = Stat::H;
        state.toggle_player(1);
        state.handle_fetch_event(FetchEvent::LogLoaded {
            player_id: 1,
            log: log_of(&[1, 2, 3, 4]),
        });
        state.handle_command(UserCommand::PinGame(2));
        assert_eq!(state.build_snapshot().details[0].filtered.h, 3);

        // A finalized range overrides the pin.
        state.handle_command(UserCommand::ChartClick(4));
        state.handle_command(UserCommand::ChartClick(4));
        assert_eq!(state.build_snapshot().details[0].filtered.h, 4);
    }

    #[tokio::test]
    async fn fetch_failure_sets_banner_and_success_clears_it() {
        let (mut state, _rx) = test_state();
        state.handle_fetch_event(FetchEvent::PlayersFailed("token fetch failed".into()));
        assert_eq!(
            state.build_snapshot().error.as_deref(),
            Some("token fetch failed")
        );

        state.handle_fetch_event(FetchEvent::PlayersLoaded(vec![]));
        assert!(state.build_snapshot().error.is_none());
        assert!(state.build_snapshot().roster_loaded);
    }

    #[tokio::test]
    async fn loading_player_gets_placeholder_detail_panel() {
        let (mut state, _rx) = test_state();
        state.toggle_player(9);
        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.details.len(), 1);
        assert!(snapshot.details[0].loading);
        assert!(snapshot.series.is_empty());
        assert!(snapshot.table.is_empty());
    }

    #[tokio::test]
    async fn hover_is_reflected_in_snapshot_without_touching_range() {
        let (mut state, _rx) = test_state();
        state.handle_command(UserCommand::ChartHover(Some(42)));
        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.hover_game, Some(42));
        assert!(snapshot.selection.is_none());
    }

    #[tokio::test]
    async fn quit_command_signals_exit() {
        let (mut state, _rx) = test_state();
        assert!(!state.handle_command(UserCommand::NextStat));
        assert!(state.handle_command(UserCommand::Quit));
    }
}
