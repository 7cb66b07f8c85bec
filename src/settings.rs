use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use courtside_api::Source;
use courtside_api::client::{ESPN_SITE_V2, Endpoints, NBA_LIVE_DATA};
use log::LevelFilter;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "courtside", version, about = "Normalized NBA scoreboard from the ESPN and NBA feeds")]
pub struct Cli {
    /// Feed to read from.
    #[arg(long, short, value_enum, env = "COURTSIDE_SOURCE", default_value_t = SourceChoice::Both, global = true)]
    pub source: SourceChoice,

    /// Print JSON instead of text tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level (overrides RUST_LOG).
    #[arg(long, global = true)]
    pub log_level: Option<LevelFilter>,

    #[arg(long, env = "COURTSIDE_ESPN_URL", default_value = ESPN_SITE_V2, hide_default_value = true, global = true)]
    pub espn_url: String,

    #[arg(long, env = "COURTSIDE_NBA_URL", default_value = NBA_LIVE_DATA, hide_default_value = true, global = true)]
    pub nba_url: String,

    /// HTTP timeout per request, in seconds.
    #[arg(long, env = "COURTSIDE_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Scoreboard and regime evaluation (default).
    Scoreboard {
        /// Game date, YYYYMMDD or YYYY-MM-DD. ESPN only; defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Play-by-play for one game.
    Pbp {
        game_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceChoice {
    Espn,
    Nba,
    Both,
}

impl SourceChoice {
    pub fn sources(self) -> Vec<Source> {
        match self {
            SourceChoice::Espn => vec![Source::Espn],
            SourceChoice::Nba => vec![Source::Nba],
            SourceChoice::Both => vec![Source::Espn, Source::Nba],
        }
    }
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub sources: Vec<Source>,
    pub json: bool,
    pub log_level: Option<LevelFilter>,
    pub endpoints: Endpoints,
    pub timeout: Duration,
    pub command: Command,
}

impl From<Cli> for AppSettings {
    fn from(cli: Cli) -> Self {
        Self {
            sources: cli.source.sources(),
            json: cli.json,
            log_level: cli.log_level,
            endpoints: Endpoints { espn: cli.espn_url, nba: cli.nba_url },
            timeout: Duration::from_secs(cli.timeout_secs),
            command: cli.command.unwrap_or(Command::Scoreboard { date: None }),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Cli::parse().into()
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| format!("expected YYYYMMDD or YYYY-MM-DD, got {s:?}"))
}
