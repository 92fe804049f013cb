// League-average reference values for the 2023 season.
//
// Drawn as a dashed horizontal line on the chart and shown next to the stat
// selector so a player's line can be read against a typical qualified hitter.
// Counting-stat averages are full-season figures; rate averages are derived
// from the counting averages with the same formulas the engine uses.

use crate::stats::Stat;

// Per-player full-season averages across qualified hitters, 2023.
const AVG_PA: f64 = 610.2;
const AVG_AB: f64 = 543.1;
const AVG_H: f64 = 142.5;
const AVG_BB: f64 = 55.0;
const AVG_HBP: f64 = 6.9;
const AVG_SF: f64 = 4.3;
const AVG_TB: f64 = 242.1;
const AVG_K: f64 = 126.2;
const AVG_RBI: f64 = 75.5;
const AVG_HR: f64 = 21.8;

/// League-average season value for a stat.
pub fn league_average(stat: Stat) -> f64 {
    match stat {
        Stat::Pa => AVG_PA,
        Stat::Ab => AVG_AB,
        Stat::H => AVG_H,
        Stat::Bb => AVG_BB,
        Stat::Hbp => AVG_HBP,
        Stat::Sf => AVG_SF,
        Stat::Tb => AVG_TB,
        Stat::K => AVG_K,
        Stat::Rbi => AVG_RBI,
        Stat::Hr => AVG_HR,
        Stat::Avg => AVG_H / AVG_AB,
        Stat::Obp => obp(),
        Stat::Slg => AVG_TB / AVG_AB,
        Stat::Ops => obp() + AVG_TB / AVG_AB,
        Stat::Iso => (AVG_TB - AVG_H) / AVG_AB,
        Stat::Babip => (AVG_H - AVG_HR) / (AVG_AB - AVG_K - AVG_HR + AVG_SF),
        Stat::BbPct => 100.0 * AVG_BB / AVG_PA,
        Stat::KPct => 100.0 * AVG_K / AVG_PA,
    }
}

fn obp() -> f64 {
    (AVG_H + AVG_BB + AVG_HBP) / (AVG_PA - AVG_SF)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
