mod feeds;
mod render;
mod settings;

use crate::feeds::{load_all, require_any};
use crate::render::{EvalRow, render_eval, render_json, render_playbyplay, render_scoreboard};
use crate::settings::{AppSettings, Command};
use anyhow::{Context, bail};
use chrono::NaiveDate;
use courtside_api::client::FeedApi;
use log::{LevelFilter, debug};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    better_panic::install();

    let settings = AppSettings::load();
    init_logger(settings.log_level);
    debug!("{settings:?}");

    let api = FeedApi::with_endpoints(settings.endpoints.clone(), settings.timeout);

    match &settings.command {
        Command::Scoreboard { date } => run_scoreboard(&api, &settings, *date).await,
        Command::Pbp { game_id } => run_playbyplay(&api, &settings, game_id).await,
    }
}

/// RUST_LOG applies unless `--log-level` is given; warnings only by default.
/// Logs go to stderr so stdout stays parseable in JSON mode.
fn init_logger(level: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

/// A feed that fails is reported and skipped; the command only fails when
/// none of them came back.
async fn run_scoreboard(
    api: &FeedApi,
    settings: &AppSettings,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let (boards, _failures) = load_all(api, &settings.sources, date).await;
    let loaded = require_any(boards)?;

    if settings.json {
        let rows: Vec<EvalRow> = loaded
            .iter()
            .flat_map(|(_, states)| states.iter().map(EvalRow::new))
            .collect();
        println!("{}", render_json(&rows)?);
        return Ok(());
    }

    for (source, states) in &loaded {
        println!("{}", "=".repeat(60));
        println!("{} FEED | Games: {}", source.as_str().to_uppercase(), states.len());
        println!("{}", "=".repeat(60));
        println!();
        println!("--- SCOREBOARD ---");
        println!("{}", render_scoreboard(states));
        println!();
        println!("--- GAME EVAL ---");
        println!("{}", render_eval(states));
        println!();
    }
    Ok(())
}

async fn run_playbyplay(api: &FeedApi, settings: &AppSettings, game_id: &str) -> anyhow::Result<()> {
    let &[source] = settings.sources.as_slice() else {
        bail!("play-by-play needs a single feed: pass --source espn or --source nba");
    };

    let events = api
        .load_playbyplay(source, game_id)
        .await
        .with_context(|| format!("loading {source} play-by-play for {game_id}"))?;

    if settings.json {
        println!("{}", render_json(&events)?);
    } else {
        println!("{}", render_playbyplay(&events));
    }
    Ok(())
}
