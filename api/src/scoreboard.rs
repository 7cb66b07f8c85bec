use crate::clock::parse_iso_clock;
use crate::espn::{EspnCompetitor, EspnEvent, ScoreboardResponse};
use crate::nba::{NbaGame, NbaScoreboardResponse, NbaTeam};
use crate::{
    AdapterError, AdapterResult, Extra, ExtraValue, GameState, GameStateInit, GameStatus, Source,
    count_or_zero,
};
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Mapping: ESPN scoreboard → GameState
// ---------------------------------------------------------------------------

/// Normalize an ESPN scoreboard body, one state per event in feed order.
///
/// A score that is present but not a number fails the whole call; an absent
/// score counts as 0.
pub fn normalize_espn_scoreboard(raw: &Value) -> AdapterResult<Vec<GameState>> {
    let response = ScoreboardResponse::deserialize(raw).map_err(|error| AdapterError::Shape {
        origin: Source::Espn,
        feed: "scoreboard",
        error,
    })?;
    response
        .events
        .unwrap_or_default()
        .iter()
        .map(map_espn_event)
        .collect()
}

/// ESPN already speaks pre/in/post. Anything else is kept as-is rather than
/// guessed at.
fn espn_status(state: &str) -> GameStatus {
    GameStatus::from_state(state)
}

fn map_espn_event(event: &EspnEvent) -> AdapterResult<GameState> {
    let game_id = event.id.clone().unwrap_or_default();

    let status = event.status.clone().unwrap_or_default();
    let status_type = status.status_type.unwrap_or_default();
    let state = status_type
        .state
        .as_deref()
        .map(espn_status)
        .unwrap_or_default();

    let competition = event
        .competitions
        .as_deref()
        .and_then(|c| c.first())
        .cloned()
        .unwrap_or_default();
    let competitors = competition.competitors.as_deref().unwrap_or_default();
    let home = find_side(competitors, "home");
    let away = find_side(competitors, "away");

    let mut extra = Extra::new();
    if let Some(detail) = status_type.short_detail {
        extra.insert("status_text".into(), ExtraValue::Text(detail));
    }

    let team = |c: Option<&EspnCompetitor>| c.and_then(|c| c.team.clone()).unwrap_or_default();
    let home_team = team(home);
    let away_team = team(away);

    Ok(GameStateInit {
        home_score: count_or_zero(home.and_then(|c| c.score.as_ref()), "home score", &game_id)?,
        away_score: count_or_zero(away.and_then(|c| c.score.as_ref()), "away score", &game_id)?,
        game_id,
        source: Source::Espn,
        status: state,
        home_team: home_team.display_name.unwrap_or_default(),
        away_team: away_team.display_name.unwrap_or_default(),
        home_abbr: home_team.abbreviation.unwrap_or_default(),
        away_abbr: away_team.abbreviation.unwrap_or_default(),
        period: status.period.unwrap_or_default(),
        clock: status.display_clock.unwrap_or_default(),
        start_time_utc: event.date.clone().unwrap_or_default(),
        venue: competition
            .venue
            .and_then(|v| v.full_name)
            .unwrap_or_default(),
        extra,
    }
    .build())
}

fn find_side<'a>(competitors: &'a [EspnCompetitor], side: &str) -> Option<&'a EspnCompetitor> {
    competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some(side))
}

// ---------------------------------------------------------------------------
// Mapping: NBA official scoreboard → GameState
// ---------------------------------------------------------------------------

/// Normalize an NBA CDN scoreboard body, one state per game in feed order.
pub fn normalize_nba_scoreboard(raw: &Value) -> AdapterResult<Vec<GameState>> {
    let response = NbaScoreboardResponse::deserialize(raw).map_err(|error| AdapterError::Shape {
        origin: Source::Nba,
        feed: "scoreboard",
        error,
    })?;
    response
        .scoreboard
        .unwrap_or_default()
        .games
        .iter()
        .map(map_nba_game)
        .collect()
}

/// `gameStatus` is 1/2/3. Unknown codes are treated as not started.
fn nba_status(code: i64) -> GameStatus {
    match code {
        1 => GameStatus::Pre,
        2 => GameStatus::In,
        3 => GameStatus::Post,
        _ => GameStatus::Pre,
    }
}

fn map_nba_game(game: &NbaGame) -> AdapterResult<GameState> {
    let game_id = game.game_id.clone().unwrap_or_default();
    let home = &game.home_team;
    let away = &game.away_team;

    let mut extra = Extra::new();
    if let Some(text) = &game.game_status_text {
        extra.insert("status_text".into(), ExtraValue::Text(text.trim().to_owned()));
    }
    insert_team_extras(&mut extra, "home", home);
    insert_team_extras(&mut extra, "away", away);

    Ok(GameStateInit {
        home_score: count_or_zero(home.score.as_ref(), "home score", &game_id)?,
        away_score: count_or_zero(away.score.as_ref(), "away score", &game_id)?,
        game_id,
        source: Source::Nba,
        status: nba_status(game.game_status.unwrap_or(1)),
        home_team: home.team_name.clone().unwrap_or_default(),
        away_team: away.team_name.clone().unwrap_or_default(),
        home_abbr: home.team_tricode.clone().unwrap_or_default(),
        away_abbr: away.team_tricode.clone().unwrap_or_default(),
        period: game.period.unwrap_or_default(),
        clock: parse_iso_clock(game.game_clock.as_deref().unwrap_or_default()),
        start_time_utc: game.game_time_utc.clone().unwrap_or_default(),
        venue: game.arena_name.clone().unwrap_or_default(),
        extra,
    }
    .build())
}

/// The CDN reports its own per-team bonus flag and timeouts; carry them in
/// `extra` so the bonus detector and renderer can see them.
fn insert_team_extras(extra: &mut Extra, side: &str, team: &NbaTeam) {
    if let Some(flag) = &team.in_bonus {
        extra.insert(format!("{side}_bonus"), ExtraValue::Bool(flag.is_truthy()));
    }
    if let Some(timeouts) = team.timeouts_remaining {
        extra.insert(format!("{side}_timeouts"), ExtraValue::Int(timeouts));
    }
}
