// Best-stretch search: sliding fixed-width window scan over a game log.

use super::{GameStatLine, Stat, Totals};

/// Fixed window length for the "best stretch" highlight.
pub const DEFAULT_WINDOW: usize = 10;

/// The 1-based inclusive game-number range of a winning window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestWindow {
    pub start: usize,
    pub end: usize,
}

impl BestWindow {
    /// Window length in games.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether a 1-based game number falls inside the window.
    pub fn contains(&self, game_number: usize) -> bool {
        (self.start..=self.end).contains(&game_number)
    }
}

/// Find the contiguous `window`-game stretch that maximizes `stat`.
///
/// The stat is computed over window-local totals (the same formulas as the
/// cumulative series, but summed only inside the window). The scan keeps a
/// running maximum seeded at 0.0 and compares with strict greater-than, so
/// ties resolve to the earliest-starting window. Returns `None` when the log
/// is shorter than the window.
pub fn best_window(log: &[GameStatLine], stat: Stat, window: usize) -> Option<BestWindow> {
    if window == 0 || log.len() < window {
        return None;
    }

    let mut totals = Totals::from_games(&log[..window]);
    let mut best_value = 0.0_f64;
    let mut best_start = 0;
    if totals.value(stat) > best_value {
        best_value = totals.value(stat);
    }

    // Slide: drop the game leaving the window, add the one entering it.
    for start in 1..=log.len() - window {
        totals.remove(&log[start - 1]);
        totals.add(&log[start + window - 1]);
        let value = totals.value(stat);
        if value > best_value {
            best_value = value;
            best_start = start;
        }
    }

    Some(BestWindow {
        start: best_start + 1,
        end: best_start + window,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
