//! Team-foul bonus state.
//!
//! Placeholder: nothing here counts fouls yet. The flags are read out of
//! `GameState::extra`, which only the official scoreboard adapter fills in
//! (from the feed's own `inBonus`). Broadcaster games therefore always read
//! as "not in the bonus", which says nothing about the real foul situation.
//! Computing this properly needs per-period team-foul tallies from the
//! play-by-play stream.

use crate::GameState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BonusState {
    pub home_bonus: bool,
    pub away_bonus: bool,
    pub home_double_bonus: bool,
    pub away_double_bonus: bool,
}

/// Read bonus flags from `extra`, defaulting every missing or non-boolean
/// entry to `false`.
pub fn detect_bonus(state: &GameState) -> BonusState {
    // TODO: derive from play-by-play team-foul counts once the adapters emit them.
    let flag = |key: &str| {
        state
            .extra()
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    };
    BonusState {
        home_bonus: flag("home_bonus"),
        away_bonus: flag("away_bonus"),
        home_double_bonus: flag("home_double_bonus"),
        away_double_bonus: flag("away_double_bonus"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Extra, ExtraValue, GameStateInit, GameStatus};

    fn with_extra(extra: Extra) -> GameState {
        GameStateInit { game_id: "1".into(), status: GameStatus::In, extra, ..Default::default() }
            .build()
    }

    #[test]
    fn empty_extra_means_no_bonus() {
        assert_eq!(detect_bonus(&with_extra(Extra::new())), BonusState::default());
    }

    #[test]
    fn flags_come_from_extra() {
        let extra = Extra::from([("home_bonus".to_owned(), ExtraValue::Bool(true))]);
        let bonus = detect_bonus(&with_extra(extra));
        assert!(bonus.home_bonus);
        assert!(!bonus.away_bonus);
        assert!(!bonus.home_double_bonus);
        assert!(!bonus.away_double_bonus);
    }

    #[test]
    fn non_boolean_entries_are_ignored() {
        let extra = Extra::from([
            ("away_bonus".to_owned(), ExtraValue::Int(1)),
            ("away_double_bonus".to_owned(), ExtraValue::Text("true".into())),
        ]);
        assert_eq!(detect_bonus(&with_extra(extra)), BonusState::default());
    }
}
