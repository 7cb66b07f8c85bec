use chrono::Local;
use courtside_api::bonus::{BonusState, detect_bonus};
use courtside_api::regime::{Regime, classify_regime};
use courtside_api::{GameState, GameStatus, PbpEvent};
use serde::Serialize;

/// A game plus everything derived from it, as emitted in JSON mode.
#[derive(Debug, Serialize)]
pub struct EvalRow<'a> {
    #[serde(flatten)]
    pub state: &'a GameState,
    pub regime: Regime,
    pub bonus: BonusState,
}

impl<'a> EvalRow<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state, regime: classify_regime(state), bonus: detect_bonus(state) }
    }
}

pub fn render_scoreboard(states: &[GameState]) -> String {
    if states.is_empty() {
        return "No games found.".into();
    }

    let header = format!(
        "{:<14} {:<28} {:>11} {:<6} {:<8} {:<6}",
        "ID", "Matchup", "Score", "Period", "Clock", "Status"
    );
    let mut lines = vec![header.clone(), rule(&header)];

    for s in states {
        let line = format!(
            "{:<14} {:<28} {:>11} {:<6} {:<8} {:<6}",
            s.game_id(),
            matchup(s),
            score(s),
            s.period_label(),
            clock_or_tipoff(s),
            s.status()
        );
        lines.push(line.trim_end().to_owned());
    }
    lines.join("\n")
}

pub fn render_eval(states: &[GameState]) -> String {
    if states.is_empty() {
        return "No games to evaluate.".into();
    }

    let header = format!(
        "{:<14} {:<28} {:>11} {:<10} {:>5}  {}",
        "ID", "Matchup", "Score", "Regime", "Diff", "Bonus"
    );
    let mut lines = vec![header.clone(), rule(&header)];

    for s in states {
        let row = EvalRow::new(s);
        let line = format!(
            "{:<14} {:<28} {:>11} {:<10} {:>+5}  {}",
            s.game_id(),
            matchup(s),
            score(s),
            row.regime,
            s.score_diff(),
            bonus_label(s, &row.bonus)
        );
        lines.push(line.trim_end().to_owned());
    }
    lines.join("\n")
}

pub fn render_playbyplay(events: &[PbpEvent]) -> String {
    if events.is_empty() {
        return "No plays found.".into();
    }

    let header = format!(
        "{:<3} {:<12} {:<4} {:>7} {:<20} {}",
        "P", "Clock", "Team", "Score", "Type", "Description"
    );
    let mut lines = vec![header.clone(), rule(&header)];

    for e in events {
        let line = format!(
            "{:<3} {:<12} {:<4} {:>7} {:<20} {}",
            e.period,
            e.clock,
            e.team_abbr,
            format!("{}-{}", e.away_score, e.home_score),
            e.event_type,
            e.description
        );
        lines.push(line.trim_end().to_owned());
    }
    lines.join("\n")
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn rule(header: &str) -> String {
    "-".repeat(header.len())
}

fn matchup(s: &GameState) -> String {
    format!("{} @ {}", s.away_abbr(), s.home_abbr())
}

fn score(s: &GameState) -> String {
    format!("{}-{}", s.away_score(), s.home_score())
}

/// Scheduled games with a known start show local tip-off in place of the
/// clock; feeds put "0.0" or "" there before the game.
fn clock_or_tipoff(s: &GameState) -> String {
    if *s.status() == GameStatus::Pre
        && let Some(start) = s.start_time()
    {
        return start.with_timezone(&Local).format("%H:%M").to_string();
    }
    s.clock().to_owned()
}

/// Team codes currently in the bonus, "+" marking the double bonus.
fn bonus_label(s: &GameState, bonus: &BonusState) -> String {
    let side = |abbr: &str, single: bool, double: bool| match (single, double) {
        (_, true) => Some(format!("{abbr}+")),
        (true, false) => Some(abbr.to_owned()),
        _ => None,
    };
    [
        side(s.away_abbr(), bonus.away_bonus, bonus.away_double_bonus),
        side(s.home_abbr(), bonus.home_bonus, bonus.home_double_bonus),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_api::{Extra, ExtraValue, GameStateInit, Source};

    fn knicks_heat() -> GameState {
        GameStateInit {
            game_id: "0022400100".into(),
            source: Source::Nba,
            status: GameStatus::In,
            home_abbr: "NYK".into(),
            away_abbr: "MIA".into(),
            home_score: 88,
            away_score: 85,
            period: 4,
            clock: "2:30".into(),
            extra: Extra::from([("home_bonus".to_owned(), ExtraValue::Bool(true))]),
            ..Default::default()
        }
        .build()
    }

    #[test]
    fn empty_inputs_have_placeholders() {
        assert_eq!(render_scoreboard(&[]), "No games found.");
        assert_eq!(render_eval(&[]), "No games to evaluate.");
        assert_eq!(render_playbyplay(&[]), "No plays found.");
    }

    #[test]
    fn scoreboard_rows() {
        let out = render_scoreboard(&[knicks_heat()]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("MIA @ NYK"));
        assert!(lines[2].contains("85-88"));
        assert!(lines[2].contains("Q4"));
        assert!(lines[2].contains("2:30"));
        assert!(lines[2].trim_end().ends_with("in"));
    }

    #[test]
    fn eval_rows_carry_regime_diff_and_bonus() {
        let out = render_eval(&[knicks_heat()]);
        let row = out.lines().nth(2).unwrap();
        assert!(row.contains("clutch"));
        assert!(row.contains("+3"));
        assert!(row.ends_with("NYK"));
    }

    #[test]
    fn pregame_rows_show_local_tipoff() {
        let pregame = GameStateInit {
            game_id: "401584800".into(),
            status: GameStatus::Pre,
            home_abbr: "LAL".into(),
            away_abbr: "BOS".into(),
            clock: "0.0".into(),
            start_time_utc: "2026-02-28T03:30Z".into(),
            ..Default::default()
        }
        .build();
        let tipoff = pregame
            .start_time()
            .unwrap()
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string();

        assert_eq!(clock_or_tipoff(&pregame), tipoff);
        let row = render_scoreboard(&[pregame]).lines().nth(2).unwrap().to_owned();
        assert!(row.contains(&tipoff));
        assert!(!row.contains("0.0"));
    }

    #[test]
    fn pregame_without_start_time_keeps_clock() {
        let pregame = GameStateInit { status: GameStatus::Pre, clock: "12:00".into(), ..Default::default() }.build();
        assert_eq!(clock_or_tipoff(&pregame), "12:00");
        assert_eq!(clock_or_tipoff(&knicks_heat()), "2:30");
    }

    #[test]
    fn diff_column_is_signed() {
        let trailing = GameStateInit { home_score: 90, away_score: 97, ..Default::default() }.build();
        let row = render_eval(&[trailing]).lines().nth(2).unwrap().to_owned();
        assert!(row.ends_with(" pregame       -7"));
    }

    #[test]
    fn bonus_labels() {
        let s = knicks_heat();
        let both = BonusState { away_bonus: true, home_double_bonus: true, ..Default::default() };
        assert_eq!(bonus_label(&s, &both), "MIA NYK+");
        assert_eq!(bonus_label(&s, &BonusState::default()), "");
    }

    #[test]
    fn playbyplay_rows() {
        let events = vec![PbpEvent {
            event_id: "4".into(),
            source: Source::Nba,
            period: 1,
            clock: "PT11M38.00S".into(),
            event_type: "2pt".into(),
            description: "J. Brunson driving Layup (2 PTS)".into(),
            team_abbr: "NYK".into(),
            home_score: 2,
            ..Default::default()
        }];
        let out = render_playbyplay(&events);
        let row = out.lines().nth(2).unwrap();
        assert!(row.starts_with("1 "));
        assert!(row.contains("0-2"));
        assert!(row.ends_with("J. Brunson driving Layup (2 PTS)"));
    }

    #[test]
    fn json_rows_are_flat() {
        let state = knicks_heat();
        let json = render_json(&[EvalRow::new(&state)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let row = &value[0];
        assert_eq!(row["game_id"], "0022400100");
        assert_eq!(row["source"], "nba");
        assert_eq!(row["status"], "in");
        assert_eq!(row["score_diff"], 3);
        assert_eq!(row["regime"], "clutch");
        assert_eq!(row["bonus"]["home_bonus"], true);
        assert_eq!(row["extra"]["home_bonus"], true);
    }
}
