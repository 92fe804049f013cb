// Totals over a filtered view of a game log.
//
// Shared by the detail panel (filtered vs. season comparison) and the
// comparison table (per-player totals sorted by the active stat). Unlike the
// cumulative series this reduces the filtered slice once; rates come from
// `Totals::value` applied to the final sums.

use crate::selection::SelectionRange;

use super::{GameStatLine, Totals};

/// Which slice of the log a view is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFilter {
    /// The whole season.
    #[default]
    FullLog,
    /// The first `k` games.
    Prefix(usize),
    /// An inclusive game-number range (already normalized).
    Range(SelectionRange),
}

impl ViewFilter {
    /// Resolve the active filter from global UI state: a finalized range
    /// takes precedence over a pinned game number.
    pub fn from_view_state(range: Option<SelectionRange>, pinned_game: Option<usize>) -> Self {
        match (range, pinned_game) {
            (Some(r), _) => ViewFilter::Range(r),
            (None, Some(k)) => ViewFilter::Prefix(k),
            (None, None) => ViewFilter::FullLog,
        }
    }
}

/// The sub-slice of `log` selected by `filter`, clamped to the log bounds.
pub fn filtered_slice<'a>(log: &'a [GameStatLine], filter: &ViewFilter) -> &'a [GameStatLine] {
    match filter {
        ViewFilter::FullLog => log,
        ViewFilter::Prefix(k) => &log[..(*k).min(log.len())],
        ViewFilter::Range(range) => {
            let start = range.start.max(1) - 1;
            let end = range.end.min(log.len());
            if start >= end {
                &[]
            } else {
                &log[start..end]
            }
        }
    }
}

/// Sum the counting stats over the filtered games.
pub fn aggregate(log: &[GameStatLine], filter: &ViewFilter) -> Totals {
    Totals::from_games(filtered_slice(log, filter))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stat;

    fn log_of(hits: &[u32]) -> Vec<GameStatLine> {
        hits.iter()
            .map(|&h| GameStatLine {
                pa: 4,
                ab: 4,
                h,
                tb: h,
                ..GameStatLine::default()
            })
            .collect()
    }

    #[test]
    fn full_log_sums_everything() {
        let log = log_of(&[1, 2, 0, 3]);
        let totals = aggregate(&log, &ViewFilter::FullLog);
        assert_eq!(totals.h, 6);
        assert_eq!(totals.pa, 16);
    }

    #[test]
    fn range_equal_to_whole_log_matches_unfiltered() {
        let log = log_of(&[1, 0, 2, 1, 1]);
        let whole = aggregate(&log, &ViewFilter::FullLog);
        let ranged = aggregate(
            &log,
            &ViewFilter::Range(SelectionRange::new(1, log.len())),
        );
        assert_eq!(whole, ranged);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let log = log_of(&[1, 2, 3, 4, 5]);
        let totals = aggregate(&log, &ViewFilter::Range(SelectionRange::new(2, 4)));
        assert_eq!(totals.h, 2 + 3 + 4);
    }

    #[test]
    fn range_clamps_past_end_of_log() {
        let log = log_of(&[1, 2, 3]);
        let totals = aggregate(&log, &ViewFilter::Range(SelectionRange::new(2, 50)));
        assert_eq!(totals.h, 5);
    }

    #[test]
    fn range_entirely_past_log_is_empty() {
        let log = log_of(&[1, 2, 3]);
        let totals = aggregate(&log, &ViewFilter::Range(SelectionRange::new(10, 20)));
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn prefix_takes_first_k_games() {
        let log = log_of(&[1, 2, 3, 4]);
        let totals = aggregate(&log, &ViewFilter::Prefix(2));
        assert_eq!(totals.h, 3);
    }

    #[test]
    fn prefix_longer_than_log_is_whole_log() {
        let log = log_of(&[1, 2]);
        let totals = aggregate(&log, &ViewFilter::Prefix(99));
        assert_eq!(totals.h, 3);
    }

    #[test]
    fn empty_log_yields_zero_totals_and_formatted_rates() {
        let totals = aggregate(&[], &ViewFilter::FullLog);
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.formatted(Stat::Avg), ".000");
        assert_eq!(totals.formatted(Stat::Ops), ".000");
    }

    #[test]
    fn filter_precedence_range_over_prefix() {
        let range = Some(SelectionRange::new(3, 7));
        assert_eq!(
            ViewFilter::from_view_state(range, Some(5)),
            ViewFilter::Range(SelectionRange::new(3, 7))
        );
        assert_eq!(
            ViewFilter::from_view_state(None, Some(5)),
            ViewFilter::Prefix(5)
        );
        assert_eq!(ViewFilter::from_view_state(None, None), ViewFilter::FullLog);
    }
}
