// Cumulative stat series: one point per game, computed from running sums.

use super::{GameStatLine, Stat, Totals};

/// One point of a cumulative series.
///
/// `value` is the raw numeric value; display formatting happens at the
/// rendering edge via `Stat::format_value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativePoint {
    /// 1-based game number.
    pub game_number: usize,
    pub value: f64,
}

/// Compute the cumulative series of `stat` over a game log.
///
/// Counting stats are running sums. Rate stats are recomputed at every game
/// from the running sums of their constituent counting stats, never averaged
/// from per-game ratios, so early small-sample games cannot distort the
/// season line. An empty log yields an empty series; otherwise the series
/// covers games 1..=N in order.
pub fn compute_series(log: &[GameStatLine], stat: Stat) -> Vec<CumulativePoint> {
    let mut running = Totals::default();
    log.iter()
        .enumerate()
        .map(|(index, game)| {
            running.add(game);
            CumulativePoint {
                game_number: index + 1,
                value: running.value(stat),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ALL_STATS;

    fn hits_log(pairs: &[(u32, u32)]) -> Vec<GameStatLine> {
        pairs
            .iter()
            .map(|&(h, ab)| GameStatLine {
                h,
                ab,
                pa: ab,
                tb: h,
                ..GameStatLine::default()
            })
            .collect()
    }

    #[test]
    fn empty_log_gives_empty_series_for_every_stat() {
        for stat in ALL_STATS {
            assert!(compute_series(&[], *stat).is_empty());
        }
    }

    #[test]
    fn series_covers_games_one_through_n_in_order() {
        let log = hits_log(&[(1, 4), (0, 3), (2, 5), (1, 4)]);
        for stat in ALL_STATS {
            let series = compute_series(&log, *stat);
            assert_eq!(series.len(), log.len());
            for (i, point) in series.iter().enumerate() {
                assert_eq!(point.game_number, i + 1);
            }
        }
    }

    #[test]
    fn counting_stat_accumulates() {
        let log: Vec<GameStatLine> = [2u32, 0, 1, 3]
            .iter()
            .map(|&hr| GameStatLine {
                hr,
                ..GameStatLine::default()
            })
            .collect();
        let series = compute_series(&log, Stat::Hr);
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.0, 2.0, 3.0, 6.0]);
    }

    #[test]
    fn counting_stat_last_point_equals_whole_log_sum() {
        let log = hits_log(&[(1, 4), (2, 5), (0, 3), (3, 4)]);
        let series = compute_series(&log, Stat::Ab);
        let total: u32 = log.iter().map(|g| g.ab).sum();
        assert_eq!(series.last().unwrap().value, total as f64);
    }

    #[test]
    fn avg_series_uses_cumulative_totals() {
        // Cumulative H/AB = 1/4, 1/7, 3/12.
        let log = hits_log(&[(1, 4), (0, 3), (2, 5)]);
        let series = compute_series(&log, Stat::Avg);
        let formatted: Vec<String> = series
            .iter()
            .map(|p| Stat::Avg.format_value(p.value))
            .collect();
        assert_eq!(formatted, vec![".250", ".143", ".250"]);
    }

    #[test]
    fn avg_series_matches_reference_scenario() {
        // H = [1, 0, 2] against AB = [4, 3, 5]: raw cumulative averages are
        // 1/4, 1/7, 3/12.
        let log = hits_log(&[(1, 4), (0, 3), (2, 5)]);
        let series = compute_series(&log, Stat::Avg);
        assert!((series[0].value - 0.25).abs() < 1e-12);
        assert!((series[1].value - 1.0 / 7.0).abs() < 1e-12);
        assert!((series[2].value - 0.25).abs() < 1e-12);
    }

    #[test]
    fn ops_equals_obp_plus_slg_at_every_point() {
        let log = hits_log(&[(1, 4), (2, 4), (0, 3), (3, 5), (1, 4)]);
        let ops = compute_series(&log, Stat::Ops);
        let obp = compute_series(&log, Stat::Obp);
        let slg = compute_series(&log, Stat::Slg);
        for i in 0..log.len() {
            assert_eq!(ops[i].value, obp[i].value + slg[i].value);
        }
    }

    #[test]
    fn avg_times_ab_recovers_hits() {
        let log = hits_log(&[(1, 4), (2, 5), (0, 2)]);
        let avg = compute_series(&log, Stat::Avg);
        let ab = compute_series(&log, Stat::Ab);
        let h = compute_series(&log, Stat::H);
        for i in 0..log.len() {
            assert!((avg[i].value * ab[i].value - h[i].value).abs() < 1e-9);
        }
    }

    #[test]
    fn all_zero_game_is_valid_and_contributes_nothing() {
        let mut log = hits_log(&[(2, 4)]);
        log.push(GameStatLine::default());
        let series = compute_series(&log, Stat::Avg);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].value, series[1].value);
    }

    #[test]
    fn rate_stat_zero_before_any_denominator() {
        let log = vec![GameStatLine::default(), GameStatLine::default()];
        let series = compute_series(&log, Stat::Avg);
        assert_eq!(series[0].value, 0.0);
        assert_eq!(series[1].value, 0.0);
    }
}
