pub mod bonus;
pub mod client;
pub mod clock;
pub mod espn;
pub mod nba;
pub mod playbyplay;
pub mod regime;
pub mod scoreboard;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain types: canonical model, independent of either feed's wire format
// ---------------------------------------------------------------------------

/// Which upstream feed produced a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Broadcaster feed (ESPN site API).
    #[default]
    Espn,
    /// Official league feed (NBA live-data CDN).
    Nba,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Espn => "espn",
            Source::Nba => "nba",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Pre,
    In,
    Post,
    /// Broadcaster state string outside pre/in/post, kept verbatim.
    Other(String),
}

impl GameStatus {
    /// Known broadcaster states map onto their variants; anything else is
    /// carried as `Other`.
    pub fn from_state(state: &str) -> Self {
        match state {
            "pre" => GameStatus::Pre,
            "in" => GameStatus::In,
            "post" => GameStatus::Post,
            other => GameStatus::Other(other.to_owned()),
        }
    }

    /// `Other("post")` and friends collapse onto the known variant.
    fn canonical(self) -> Self {
        match self {
            GameStatus::Other(raw) => GameStatus::from_state(&raw),
            known => known,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GameStatus::Pre => "pre",
            GameStatus::In => "in",
            GameStatus::Post => "post",
            GameStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for GameStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Value stored in the `extra` side-table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl ExtraValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExtraValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Source-specific or forward-compatible fields. Ordered so that two states
/// built from the same input compare and serialize identically.
pub type Extra = BTreeMap<String, ExtraValue>;

/// Everything an adapter knows about one game. `build()` is the only way to
/// get a [`GameState`], and it derives the computed fields.
#[derive(Debug, Clone, Default)]
pub struct GameStateInit {
    pub game_id: String,
    pub source: Source,
    pub status: GameStatus,
    pub home_team: String,
    pub away_team: String,
    pub home_abbr: String,
    pub away_abbr: String,
    pub home_score: u32,
    pub away_score: u32,
    pub period: u32,
    pub clock: String, // "5:32", "END", ""
    pub start_time_utc: String,
    pub venue: String,
    pub extra: Extra,
}

impl GameStateInit {
    pub fn build(self) -> GameState {
        GameState::new(self)
    }
}

/// One live or finished game, source-agnostic. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    game_id: String,
    source: Source,
    status: GameStatus,
    home_team: String,
    away_team: String,
    home_abbr: String,
    away_abbr: String,
    home_score: u32,
    away_score: u32,
    period: u32,
    period_label: String,
    clock: String,
    score_diff: i64,
    is_final: bool,
    start_time_utc: String,
    venue: String,
    extra: Extra,
}

impl GameState {
    pub fn new(init: GameStateInit) -> Self {
        let score_diff = i64::from(init.home_score) - i64::from(init.away_score);
        let status = init.status.canonical();
        let is_final = status == GameStatus::Post;
        Self {
            period_label: period_label(init.period),
            score_diff,
            is_final,
            game_id: init.game_id,
            source: init.source,
            status,
            home_team: init.home_team,
            away_team: init.away_team,
            home_abbr: init.home_abbr,
            away_abbr: init.away_abbr,
            home_score: init.home_score,
            away_score: init.away_score,
            period: init.period,
            clock: init.clock,
            start_time_utc: init.start_time_utc,
            venue: init.venue,
            extra: init.extra,
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    pub fn home_abbr(&self) -> &str {
        &self.home_abbr
    }

    pub fn away_abbr(&self) -> &str {
        &self.away_abbr
    }

    pub fn home_score(&self) -> u32 {
        self.home_score
    }

    pub fn away_score(&self) -> u32 {
        self.away_score
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// "Q1".."Q4", "OT1".., or empty before the first period.
    pub fn period_label(&self) -> &str {
        &self.period_label
    }

    pub fn clock(&self) -> &str {
        &self.clock
    }

    /// Home score minus away score.
    pub fn score_diff(&self) -> i64 {
        self.score_diff
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn start_time_utc(&self) -> &str {
        &self.start_time_utc
    }

    /// Tip-off as a timestamp. Accepts RFC 3339 and the broadcaster's
    /// minute-precision form ("2026-02-28T00:00Z").
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.start_time_utc.as_str();
        if raw.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn extra(&self) -> &Extra {
        &self.extra
    }
}

fn period_label(period: u32) -> String {
    match period {
        0 => String::new(),
        1..=4 => format!("Q{period}"),
        _ => format!("OT{}", period - 4),
    }
}

/// One play-by-play action, source-agnostic. `event_type` vocabulary is
/// whatever the source uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PbpEvent {
    pub event_id: String,
    pub source: Source,
    pub game_id: String,
    pub period: u32,
    pub clock: String, // source-native, not forced into M:SS
    pub event_type: String,
    pub description: String,
    pub team_abbr: String,
    pub player_name: String,
    pub home_score: u32,
    pub away_score: u32,
    pub extra: Extra,
}

// ---------------------------------------------------------------------------
// Shared wire helpers and adapter errors
// ---------------------------------------------------------------------------

/// Both feeds send some counters as JSON numbers on one endpoint and as
/// strings ("105") on another.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Strict conversion to a non-negative count. `field` and `game_id` only
    /// label the error.
    pub fn to_u32(&self, field: &'static str, game_id: &str) -> AdapterResult<u32> {
        let invalid = || AdapterError::Number {
            field,
            value: self.to_string(),
            game_id: game_id.to_owned(),
        };
        match self {
            Numeric::Int(n) => u32::try_from(*n).map_err(|_| invalid()),
            Numeric::Float(x) if x.fract() == 0.0 && *x >= 0.0 && *x <= f64::from(u32::MAX) => {
                Ok(*x as u32)
            }
            Numeric::Float(_) => Err(invalid()),
            Numeric::Text(s) => s.trim().parse::<u32>().map_err(|_| invalid()),
        }
    }

    /// Lenient flag reading: "1"/1/"true" are set, anything else is not.
    pub fn is_truthy(&self) -> bool {
        match self {
            Numeric::Int(n) => *n != 0,
            Numeric::Float(x) => *x != 0.0,
            Numeric::Text(s) => matches!(s.trim(), "1" | "true" | "TRUE" | "True"),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(n) => write!(f, "{n}"),
            Numeric::Float(x) => write!(f, "{x}"),
            Numeric::Text(s) => f.write_str(s),
        }
    }
}

/// Read an optional counter, treating an absent field as zero.
pub(crate) fn count_or_zero(
    value: Option<&Numeric>,
    field: &'static str,
    game_id: &str,
) -> AdapterResult<u32> {
    value.map_or(Ok(0), |v| v.to_u32(field, game_id))
}

pub type AdapterResult<T> = Result<T, AdapterError>;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("unexpected {origin} {feed} payload: {error}")]
    Shape {
        origin: Source,
        feed: &'static str,
        #[source]
        error: serde_json::Error,
    },
    #[error("invalid {field} {value:?} in game {game_id}")]
    Number {
        field: &'static str,
        value: String,
        game_id: String,
    },
}
