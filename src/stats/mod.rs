// Statistics engine: stat identifiers, totals arithmetic, and formatting.
//
// The submodules build on the `Totals` accumulator defined here:
// `series` produces cumulative per-game time series, `window` scans for the
// best fixed-length stretch, and `aggregate` reduces a filtered slice of the
// game log to a single set of totals.

pub mod aggregate;
pub mod game_log;
pub mod series;
pub mod window;

pub use aggregate::{aggregate, ViewFilter};
pub use game_log::{GameLog, GameStatLine};
pub use series::{compute_series, CumulativePoint};
pub use window::{best_window, BestWindow, DEFAULT_WINDOW};

// ---------------------------------------------------------------------------
// Stat
// ---------------------------------------------------------------------------

/// Identifier for every statistic the dashboard can chart or tabulate.
///
/// The first ten are counting stats (plain sums); the rest are rate stats
/// derived from the counting totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Pa,
    Ab,
    H,
    Bb,
    Hbp,
    Sf,
    Tb,
    K,
    Rbi,
    Hr,
    Avg,
    Ops,
    Obp,
    Slg,
    Iso,
    Babip,
    BbPct,
    KPct,
}

/// All stats in display order (matches the stat selector and table columns).
pub const ALL_STATS: &[Stat] = &[
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
    Stat::BbPct,
    Stat::KPct,
];

impl Stat {
    /// Short display label, as it appears in column headers and the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Stat::Pa => "PA",
            Stat::Ab => "AB",
            Stat::H => "H",
            Stat::Bb => "BB",
            Stat::Hbp => "HBP",
            Stat::Sf => "SF",
            Stat::Tb => "TB",
            Stat::K => "K",
            Stat::Rbi => "RBI",
            Stat::Hr => "HR",
            Stat::Avg => "AVG",
            Stat::Ops => "OPS",
            Stat::Obp => "OBP",
            Stat::Slg => "SLG",
            Stat::Iso => "ISO",
            Stat::Babip => "BABIP",
            Stat::BbPct => "BB%",
            Stat::KPct => "K%",
        }
    }

    /// Whether this is a plain counting stat (cumulative sum) as opposed to a
    /// rate derived from the counting totals.
    pub fn is_counting(&self) -> bool {
        matches!(
            self,
            Stat::Pa
                | Stat::Ab
                | Stat::H
                | Stat::Bb
                | Stat::Hbp
                | Stat::Sf
                | Stat::Tb
                | Stat::K
                | Stat::Rbi
                | Stat::Hr
        )
    }

    /// Whether the stat is rendered as a percentage (one decimal place).
    pub fn is_percentage(&self) -> bool {
        matches!(self, Stat::BbPct | Stat::KPct)
    }

    /// The next stat in display order, wrapping at the end.
    pub fn next(&self) -> Stat {
        let idx = ALL_STATS.iter().position(|s| s == self).unwrap_or(0);
        ALL_STATS[(idx + 1) % ALL_STATS.len()]
    }

    /// The previous stat in display order, wrapping at the start.
    pub fn prev(&self) -> Stat {
        let idx = ALL_STATS.iter().position(|s| s == self).unwrap_or(0);
        ALL_STATS[(idx + ALL_STATS.len() - 1) % ALL_STATS.len()]
    }

    /// Render a computed value of this stat for display.
    ///
    /// Counting stats print as integers, percentages to one decimal, and
    /// rate stats in the conventional 3-decimal form with the leading zero
    /// dropped (".262"). Values at or above 1.0 keep the leading digit
    /// ("1.042"). Formatting never feeds back into arithmetic.
    pub fn format_value(&self, value: f64) -> String {
        if self.is_counting() {
            format!("{:.0}", value)
        } else if self.is_percentage() {
            format!("{:.1}", value)
        } else {
            format_rate(value)
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Format a rate stat in scoreboard style: 3 decimals, leading zero dropped
/// for values below 1.0.
pub fn format_rate(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    if value < 1.0 {
        formatted
            .strip_prefix('0')
            .map(str::to_string)
            .unwrap_or(formatted)
    } else {
        formatted
    }
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Running sums of the ten counting stats.
///
/// All rate stats are derived from these sums on demand; derived values are
/// never stored, so the counting stats stay the single source of truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub pa: u32,
    pub ab: u32,
    pub h: u32,
    pub bb: u32,
    pub hbp: u32,
    pub sf: u32,
    pub tb: u32,
    pub k: u32,
    pub rbi: u32,
    pub hr: u32,
}

impl Totals {
    /// Accumulate one game into the running sums.
    pub fn add(&mut self, game: &GameStatLine) {
        self.pa += game.pa;
        self.ab += game.ab;
        self.h += game.h;
        self.bb += game.bb;
        self.hbp += game.hbp;
        self.sf += game.sf;
        self.tb += game.tb;
        self.k += game.k;
        self.rbi += game.rbi;
        self.hr += game.hr;
    }

    /// Remove one previously-added game (used by the sliding window scan).
    pub fn remove(&mut self, game: &GameStatLine) {
        self.pa = self.pa.saturating_sub(game.pa);
        self.ab = self.ab.saturating_sub(game.ab);
        self.h = self.h.saturating_sub(game.h);
        self.bb = self.bb.saturating_sub(game.bb);
        self.hbp = self.hbp.saturating_sub(game.hbp);
        self.sf = self.sf.saturating_sub(game.sf);
        self.tb = self.tb.saturating_sub(game.tb);
        self.k = self.k.saturating_sub(game.k);
        self.rbi = self.rbi.saturating_sub(game.rbi);
        self.hr = self.hr.saturating_sub(game.hr);
    }

    /// Sum a sequence of games into a fresh `Totals`.
    pub fn from_games<'a, I>(games: I) -> Self
    where
        I: IntoIterator<Item = &'a GameStatLine>,
    {
        let mut totals = Totals::default();
        for game in games {
            totals.add(game);
        }
        totals
    }

    /// The value of any stat over these totals.
    ///
    /// Counting stats return the sum; rate stats are recomputed from the raw
    /// sums each call. Every degenerate denominator (zero or negative after
    /// subtraction) yields 0.0 rather than an error.
    pub fn value(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Pa => self.pa as f64,
            Stat::Ab => self.ab as f64,
            Stat::H => self.h as f64,
            Stat::Bb => self.bb as f64,
            Stat::Hbp => self.hbp as f64,
            Stat::Sf => self.sf as f64,
            Stat::Tb => self.tb as f64,
            Stat::K => self.k as f64,
            Stat::Rbi => self.rbi as f64,
            Stat::Hr => self.hr as f64,
            Stat::Avg => ratio(self.h as i64, self.ab as i64),
            Stat::Obp => self.obp(),
            Stat::Slg => ratio(self.tb as i64, self.ab as i64),
            // OBP and SLG from the same raw sums; never re-derived from
            // formatted strings.
            Stat::Ops => self.obp() + ratio(self.tb as i64, self.ab as i64),
            Stat::Iso => ratio(self.tb as i64 - self.h as i64, self.ab as i64),
            Stat::Babip => ratio(
                self.h as i64 - self.hr as i64,
                self.ab as i64 - self.k as i64 - self.hr as i64 + self.sf as i64,
            ),
            Stat::BbPct => 100.0 * ratio(self.bb as i64, self.pa as i64),
            Stat::KPct => 100.0 * ratio(self.k as i64, self.pa as i64),
        }
    }

    /// Stat value pre-formatted for display.
    pub fn formatted(&self, stat: Stat) -> String {
        stat.format_value(self.value(stat))
    }

    fn obp(&self) -> f64 {
        ratio(
            self.h as i64 + self.bb as i64 + self.hbp as i64,
            self.pa as i64 - self.sf as i64,
        )
    }
}

/// Division defined as 0.0 whenever the denominator is zero or negative.
fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
