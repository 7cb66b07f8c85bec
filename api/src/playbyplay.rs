use crate::espn::{EspnPlay, SummaryResponse};
use crate::nba::{NbaAction, NbaPlayByPlayResponse};
use crate::{AdapterError, AdapterResult, Extra, ExtraValue, PbpEvent, Source, count_or_zero};
use serde::Deserialize;
use serde_json::Value;

// Event types and descriptions pass through verbatim. The two feeds use
// different vocabularies ("Personal Foul" vs "foul") and nothing here tries
// to reconcile them.

/// Normalize an ESPN game summary into events, in feed order.
///
/// The summary does not reliably carry its own id, so events are tagged with
/// `game_id` or left empty.
pub fn normalize_espn_pbp(raw: &Value, game_id: Option<&str>) -> AdapterResult<Vec<PbpEvent>> {
    let response = SummaryResponse::deserialize(raw).map_err(|error| AdapterError::Shape {
        origin: Source::Espn,
        feed: "play-by-play",
        error,
    })?;
    let game_id = game_id.unwrap_or_default();
    response
        .plays
        .unwrap_or_default()
        .into_iter()
        .map(|play| map_espn_play(play, game_id))
        .collect()
}

fn map_espn_play(play: EspnPlay, game_id: &str) -> AdapterResult<PbpEvent> {
    let mut extra = Extra::new();
    if let Some(scoring) = play.scoring_play {
        extra.insert("scoring_play".into(), ExtraValue::Bool(scoring));
    }
    if let Some(value) = play.score_value {
        extra.insert("score_value".into(), ExtraValue::Int(value));
    }

    Ok(PbpEvent {
        event_id: play.id.map(|id| id.to_string()).unwrap_or_default(),
        source: Source::Espn,
        game_id: game_id.to_owned(),
        period: play.period.and_then(|p| p.number).unwrap_or_default(),
        clock: play
            .clock
            .and_then(|c| c.display_value)
            .unwrap_or_default(),
        event_type: play.play_type.and_then(|t| t.text).unwrap_or_default(),
        description: play.text.unwrap_or_default(),
        team_abbr: play.team.and_then(|t| t.abbreviation).unwrap_or_default(),
        player_name: String::new(),
        home_score: count_or_zero(play.home_score.as_ref(), "home score", game_id)?,
        away_score: count_or_zero(play.away_score.as_ref(), "away score", game_id)?,
        extra,
    })
}

/// Normalize an NBA CDN play-by-play body into events, in feed order.
///
/// A non-empty `game_id` overrides the id embedded in the payload.
pub fn normalize_nba_pbp(raw: &Value, game_id: Option<&str>) -> AdapterResult<Vec<PbpEvent>> {
    let response = NbaPlayByPlayResponse::deserialize(raw).map_err(|error| AdapterError::Shape {
        origin: Source::Nba,
        feed: "play-by-play",
        error,
    })?;
    let game = response.game.unwrap_or_default();
    let game_id = game_id
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .or(game.game_id)
        .unwrap_or_default();
    game.actions
        .into_iter()
        .map(|action| map_nba_action(action, &game_id))
        .collect()
}

fn map_nba_action(action: NbaAction, game_id: &str) -> AdapterResult<PbpEvent> {
    let mut extra = Extra::new();
    if let Some(sub_type) = action.sub_type.filter(|s| !s.is_empty()) {
        extra.insert("sub_type".into(), ExtraValue::Text(sub_type));
    }
    if let Some(result) = action.shot_result {
        extra.insert("shot_result".into(), ExtraValue::Text(result));
    }

    Ok(PbpEvent {
        event_id: action
            .action_number
            .map(|n| n.to_string())
            .unwrap_or_default(),
        source: Source::Nba,
        game_id: game_id.to_owned(),
        period: action.period.unwrap_or_default(),
        clock: action.clock.unwrap_or_default(),
        event_type: action.action_type.unwrap_or_default(),
        description: action.description.unwrap_or_default(),
        team_abbr: action.team_tricode.unwrap_or_default(),
        player_name: action.player_name_i.unwrap_or_default(),
        home_score: count_or_zero(action.score_home.as_ref(), "home score", game_id)?,
        away_score: count_or_zero(action.score_away.as_ref(), "away score", game_id)?,
        extra,
    })
}
