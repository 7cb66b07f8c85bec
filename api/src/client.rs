use crate::playbyplay::{normalize_espn_pbp, normalize_nba_pbp};
use crate::scoreboard::{normalize_espn_scoreboard, normalize_nba_scoreboard};
use crate::{AdapterError, GameState, PbpEvent, Source};
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{ACCEPT, REFERER, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/basketball/nba";
pub const NBA_LIVE_DATA: &str = "https://cdn.nba.com/static/json/liveData";

/// The CDN rejects requests that don't look like they come from a browser.
const NBA_USER_AGENT: &str = "Mozilla/5.0";
const NBA_REFERER: &str = "https://www.nba.com/";

/// Base URLs for both feeds. Overridable for tests and mirrors.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub espn: String,
    pub nba: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self { espn: ESPN_SITE_V2.into(), nba: NBA_LIVE_DATA.into() }
    }
}

/// Raw feed fetcher. Returns parsed JSON bodies; normalization is left to the
/// adapters (or the `load_*` helpers).
#[derive(Debug, Clone)]
pub struct FeedApi {
    client: Client,
    timeout: Duration,
    endpoints: Endpoints,
}

impl Default for FeedApi {
    fn default() -> Self {
        Self::with_endpoints(Endpoints::default(), Duration::from_secs(10))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error for {1}: {0}")]
    Network(#[source] reqwest::Error, String),
    #[error("API error for {1}: {0}")]
    Api(#[source] reqwest::Error, String),
    #[error("Parse error for {1}: {0}")]
    Parsing(#[source] reqwest::Error, String),
    #[error("Invalid game id {0:?}")]
    InvalidGameId(String),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl FeedApi {
    pub fn with_endpoints(endpoints: Endpoints, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("courtside/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            timeout,
            endpoints,
        }
    }

    /// Fetch the raw scoreboard body for `source`.
    ///
    /// ESPN takes a date (today when `None`). The NBA CDN only publishes
    /// today's board, so a date there is ignored.
    pub async fn fetch_scoreboard(&self, source: Source, date: Option<NaiveDate>) -> ApiResult<Value> {
        match source {
            Source::Espn => {
                let date = date.unwrap_or_else(|| Local::now().date_naive());
                let url = format!("{}/scoreboard", self.endpoints.espn);
                self.get(&url, &[("dates", date.format("%Y%m%d").to_string())], source)
                    .await
            }
            Source::Nba => {
                if let Some(date) = date {
                    warn!("official scoreboard only covers today; ignoring date {date}");
                }
                let url = format!("{}/scoreboard/todaysScoreboard_00.json", self.endpoints.nba);
                self.get(&url, &[], source).await
            }
        }
    }

    /// Fetch the raw play-by-play body for one game. Both feeds use plain
    /// alphanumeric ids; anything else is refused before a request is made.
    pub async fn fetch_playbyplay(&self, source: Source, game_id: &str) -> ApiResult<Value> {
        if game_id.is_empty() || !game_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ApiError::InvalidGameId(game_id.to_owned()));
        }
        match source {
            Source::Espn => {
                let url = format!("{}/summary", self.endpoints.espn);
                self.get(&url, &[("event", game_id.to_owned())], source).await
            }
            Source::Nba => {
                let url = format!("{}/playbyplay/playbyplay_{game_id}.json", self.endpoints.nba);
                self.get(&url, &[], source).await
            }
        }
    }

    /// Fetch and normalize a scoreboard.
    pub async fn load_scoreboard(&self, source: Source, date: Option<NaiveDate>) -> ApiResult<Vec<GameState>> {
        let raw = self.fetch_scoreboard(source, date).await?;
        let states = match source {
            Source::Espn => normalize_espn_scoreboard(&raw)?,
            Source::Nba => normalize_nba_scoreboard(&raw)?,
        };
        debug!("{source}: {} games", states.len());
        Ok(states)
    }

    /// Fetch and normalize play-by-play, tagging every event with `game_id`.
    pub async fn load_playbyplay(&self, source: Source, game_id: &str) -> ApiResult<Vec<PbpEvent>> {
        let raw = self.fetch_playbyplay(source, game_id).await?;
        let events = match source {
            Source::Espn => normalize_espn_pbp(&raw, Some(game_id))?,
            Source::Nba => normalize_nba_pbp(&raw, Some(game_id))?,
        };
        debug!("{source}: {} plays for {game_id}", events.len());
        Ok(events)
    }

    async fn get(&self, url: &str, query: &[(&str, String)], source: Source) -> ApiResult<Value> {
        debug!("GET {url} {query:?}");
        let mut request = self.client.get(url).query(query).timeout(self.timeout);
        if source == Source::Nba {
            request = request
                .header(USER_AGENT, NBA_USER_AGENT)
                .header(ACCEPT, "application/json")
                .header(REFERER, NBA_REFERER);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        // Any non-success status is the caller's problem; nothing is retried
        // or papered over here.
        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}
