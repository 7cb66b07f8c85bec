//! ESPN site API wire types. Mapped into the canonical model by
//! `scoreboard.rs` and `playbyplay.rs`.
use crate::Numeric;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
    pub date: Option<String>, // ISO 8601, minute precision: "2026-02-28T00:00Z"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u32>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub state: Option<String>, // "pre" | "in" | "post"
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>, // "Q3 - 4:32", "Final/OT"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub venue: Option<EspnVenue>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<Numeric>, // usually a string: "105"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Game summary  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub plays: Option<Vec<EspnPlay>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPlay {
    pub id: Option<Numeric>,
    pub period: Option<EspnPeriod>,
    pub clock: Option<EspnClock>,
    #[serde(rename = "type")]
    pub play_type: Option<EspnPlayType>,
    pub text: Option<String>,
    #[serde(rename = "homeScore")]
    pub home_score: Option<Numeric>,
    #[serde(rename = "awayScore")]
    pub away_score: Option<Numeric>,
    pub team: Option<EspnTeam>,
    #[serde(rename = "scoringPlay")]
    pub scoring_play: Option<bool>,
    #[serde(rename = "scoreValue")]
    pub score_value: Option<i64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPeriod {
    pub number: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnClock {
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPlayType {
    pub text: Option<String>, // "Jumpball", "Personal Foul", ...
}
