// Per-game box-score lines as returned by the upstream stats API.
//
// The upstream feed is not fully trustworthy: a counting field can be
// missing, null, or a stringified number. All of those deserialize to 0
// instead of failing, so one bad line never poisons a whole log.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// One player's full season log, in chronological order.
///
/// Game numbers are 1-based: the line at index `i` is game `i + 1`.
pub type GameLog = Vec<GameStatLine>;

/// Counting stats for a single game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatLine {
    #[serde(rename = "PA", default, deserialize_with = "lenient_count")]
    pub pa: u32,
    #[serde(rename = "AB", default, deserialize_with = "lenient_count")]
    pub ab: u32,
    #[serde(rename = "H", default, deserialize_with = "lenient_count")]
    pub h: u32,
    #[serde(rename = "BB", default, deserialize_with = "lenient_count")]
    pub bb: u32,
    #[serde(rename = "HBP", default, deserialize_with = "lenient_count")]
    pub hbp: u32,
    #[serde(rename = "SF", default, deserialize_with = "lenient_count")]
    pub sf: u32,
    #[serde(rename = "TB", default, deserialize_with = "lenient_count")]
    pub tb: u32,
    #[serde(rename = "K", default, deserialize_with = "lenient_count")]
    pub k: u32,
    #[serde(rename = "RBI", default, deserialize_with = "lenient_count")]
    pub rbi: u32,
    #[serde(rename = "HR", default, deserialize_with = "lenient_count")]
    pub hr: u32,
}

/// Deserialize a counting field defensively: numbers and numeric strings
/// parse normally, anything else (null, negative, garbage) becomes 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u32)
        .unwrap_or(0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
