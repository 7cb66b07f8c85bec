use anyhow::bail;
use chrono::NaiveDate;
use courtside_api::client::{ApiError, FeedApi};
use courtside_api::{GameState, Source};
use futures_util::future::join_all;
use log::error;

pub type Boards = Vec<(Source, Vec<GameState>)>;
pub type Failures = Vec<(Source, ApiError)>;

/// Load every requested scoreboard concurrently. Each feed succeeds or fails
/// on its own; results keep the order of `sources`.
pub async fn load_all(api: &FeedApi, sources: &[Source], date: Option<NaiveDate>) -> (Boards, Failures) {
    let results = join_all(
        sources
            .iter()
            .map(|&source| async move { (source, api.load_scoreboard(source, date).await) }),
    )
    .await;

    let mut boards = Boards::new();
    let mut failures = Failures::new();
    for (source, result) in results {
        match result {
            Ok(states) => boards.push((source, states)),
            Err(e) => {
                error!("{source} scoreboard unavailable: {e}");
                failures.push((source, e));
            }
        }
    }
    (boards, failures)
}

/// A run with no board at all is an error; partial results are not.
pub fn require_any(boards: Boards) -> anyhow::Result<Boards> {
    if boards.is_empty() {
        bail!("no scoreboard could be loaded");
    }
    Ok(boards)
}
