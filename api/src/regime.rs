use crate::clock::minutes_remaining;
use crate::{GameState, GameStatus};
use serde::Serialize;
use std::fmt;

/// Fourth-quarter margin above which the game is out of reach.
pub const GARBAGE_MARGIN: i64 = 20;
/// Fourth-quarter margin at or below which a late game is clutch.
pub const CLUTCH_MARGIN: i64 = 5;
/// Clutch time starts when fewer than this many minutes remain.
pub const CLUTCH_MINUTES: f64 = 5.0;

/// Situational tag for one game snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Pregame,  // not started
    Early,    // Q1-Q2
    Mid,      // Q3
    Clutch,   // Q4, under 5:00, within 5
    Garbage,  // Q4, margin over 20
    Closing,  // Q4, anything else
    Overtime,
    Final,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Pregame => "pregame",
            Regime::Early => "early",
            Regime::Mid => "mid",
            Regime::Clutch => "clutch",
            Regime::Garbage => "garbage",
            Regime::Closing => "closing",
            Regime::Overtime => "overtime",
            Regime::Final => "final",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a game snapshot. Checks run in a fixed order and the first match
/// wins; in the fourth quarter a blowout is garbage time before the clock is
/// even looked at.
pub fn classify_regime(state: &GameState) -> Regime {
    if state.is_final() || *state.status() == GameStatus::Post {
        return Regime::Final;
    }
    if *state.status() == GameStatus::Pre {
        return Regime::Pregame;
    }

    match state.period() {
        // Period 0 shows up briefly when a game flips live before tip-off.
        0..=2 => Regime::Early,
        3 => Regime::Mid,
        4 => fourth_quarter(state),
        _ => Regime::Overtime,
    }
}

fn fourth_quarter(state: &GameState) -> Regime {
    let margin = state.score_diff().abs();
    if margin > GARBAGE_MARGIN {
        return Regime::Garbage;
    }
    // An unreadable clock is never clutch.
    match minutes_remaining(state.clock()) {
        Some(minutes) if minutes < CLUTCH_MINUTES && margin <= CLUTCH_MARGIN => Regime::Clutch,
        _ => Regime::Closing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameStateInit;

    fn live(period: u32, clock: &str, home_score: u32, away_score: u32) -> GameState {
        GameStateInit {
            game_id: "test".into(),
            status: GameStatus::In,
            period,
            clock: clock.into(),
            home_score,
            away_score,
            ..Default::default()
        }
        .build()
    }

    #[test]
    fn pregame() {
        let s = GameStateInit { status: GameStatus::Pre, ..Default::default() }.build();
        assert_eq!(classify_regime(&s), Regime::Pregame);
    }

    #[test]
    fn final_regardless_of_period() {
        for period in [2, 4, 6] {
            let s = GameStateInit {
                status: GameStatus::Post,
                period,
                home_score: 100,
                away_score: 95,
                ..Default::default()
            }
            .build();
            assert_eq!(classify_regime(&s), Regime::Final);
        }
    }

    #[test]
    fn early_regardless_of_score() {
        assert_eq!(classify_regime(&live(1, "8:00", 0, 0)), Regime::Early);
        assert_eq!(classify_regime(&live(2, "3:00", 60, 20)), Regime::Early);
        assert_eq!(classify_regime(&live(0, "", 0, 0)), Regime::Early);
    }

    #[test]
    fn mid_q3() {
        assert_eq!(classify_regime(&live(3, "6:00", 70, 68)), Regime::Mid);
    }

    #[test]
    fn clutch() {
        assert_eq!(classify_regime(&live(4, "2:30", 100, 98)), Regime::Clutch);
        assert_eq!(classify_regime(&live(4, "45.3", 90, 95)), Regime::Clutch);
    }

    #[test]
    fn garbage_overrides_clutch_clock() {
        assert_eq!(classify_regime(&live(4, "4:00", 120, 90)), Regime::Garbage);
        assert_eq!(classify_regime(&live(4, "Halftime", 70, 100)), Regime::Garbage);
    }

    #[test]
    fn closing() {
        assert_eq!(classify_regime(&live(4, "8:00", 90, 85)), Regime::Closing);
        assert_eq!(classify_regime(&live(4, "2:00", 90, 80)), Regime::Closing);
        assert_eq!(classify_regime(&live(4, "5:00", 90, 88)), Regime::Closing);
    }

    #[test]
    fn unknown_clock_is_never_clutch() {
        assert_eq!(classify_regime(&live(4, "??", 90, 89)), Regime::Closing);
    }

    #[test]
    fn end_of_quarter_counts_as_no_time_left() {
        assert_eq!(classify_regime(&live(4, "END", 90, 89)), Regime::Clutch);
    }

    #[test]
    fn overtime() {
        assert_eq!(classify_regime(&live(5, "3:00", 110, 110)), Regime::Overtime);
        assert_eq!(classify_regime(&live(7, "0:10", 140, 120)), Regime::Overtime);
    }

    #[test]
    fn passthrough_status_uses_period_rules() {
        let s = GameStateInit {
            status: GameStatus::Other("delayed".into()),
            period: 3,
            ..Default::default()
        }
        .build();
        assert_eq!(classify_regime(&s), Regime::Mid);
    }

    #[test]
    fn classification_is_idempotent() {
        let s = live(4, "1:12", 101, 100);
        assert_eq!(classify_regime(&s), classify_regime(&s));
    }

    #[test]
    fn regime_labels() {
        assert_eq!(Regime::Garbage.to_string(), "garbage");
        assert_eq!(serde_json::to_string(&Regime::Overtime).unwrap(), "\"overtime\"");
    }
}
