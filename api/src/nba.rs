/// Wire types for the NBA live-data CDN.
/// Scoreboard: https://cdn.nba.com/static/json/liveData/scoreboard/todaysScoreboard_00.json
/// Play-by-play: https://cdn.nba.com/static/json/liveData/playbyplay/playbyplay_{gameId}.json
use crate::Numeric;
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct NbaScoreboardResponse {
    pub scoreboard: Option<NbaScoreboard>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NbaScoreboard {
    #[serde(default)]
    pub games: Vec<NbaGame>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NbaGame {
    pub game_id: Option<String>,
    /// 1 = scheduled, 2 = live, 3 = final.
    pub game_status: Option<i64>,
    pub game_status_text: Option<String>,
    pub period: Option<u32>,
    /// ISO-8601 duration: "PT05M32.00S".
    pub game_clock: Option<String>,
    #[serde(rename = "gameTimeUTC")]
    pub game_time_utc: Option<String>,
    pub arena_name: Option<String>,
    #[serde(default)]
    pub home_team: NbaTeam,
    #[serde(default)]
    pub away_team: NbaTeam,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NbaTeam {
    pub team_name: Option<String>,
    pub team_tricode: Option<String>,
    pub score: Option<Numeric>,
    pub timeouts_remaining: Option<i64>,
    /// "1" / "0", or null outside live games.
    pub in_bonus: Option<Numeric>,
}

#[derive(Deserialize, Default, Debug)]
pub struct NbaPlayByPlayResponse {
    pub game: Option<NbaPbpGame>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NbaPbpGame {
    pub game_id: Option<String>,
    #[serde(default)]
    pub actions: Vec<NbaAction>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NbaAction {
    pub action_number: Option<Numeric>,
    pub period: Option<u32>,
    pub clock: Option<String>,
    pub action_type: Option<String>,
    pub sub_type: Option<String>,
    pub description: Option<String>,
    pub team_tricode: Option<String>,
    pub player_name_i: Option<String>,
    pub score_home: Option<Numeric>,
    pub score_away: Option<Numeric>,
    pub shot_result: Option<String>,
}
