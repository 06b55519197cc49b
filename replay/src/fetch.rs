//! HTTP fetching of replay pages

use std::time::Duration;

use crate::{Replay, ReplayError, extract};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!("espy-replay/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Per-request timeout, applied to the page and to the JSON fallback
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Fetch a replay page with default options
pub async fn fetch_replay(url: &str) -> Result<Replay, ReplayError> {
    fetch_replay_with(url, &FetchOptions::default()).await
}

/// Fetch a replay page and extract its log.
///
/// If the page loads but holds no recognizable replay data, the JSON
/// endpoint (`<url>.json`) is tried. When that fails too, the page's
/// extraction error is returned.
pub async fn fetch_replay_with(url: &str, options: &FetchOptions) -> Result<Replay, ReplayError> {
    let client = reqwest::Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str())
        .build()?;

    let html = get_text(&client, url).await?;

    let err = match extract::from_html(&html) {
        Ok(replay) => return Ok(replay),
        Err(e) => e,
    };

    let json_url = json_endpoint(url);
    tracing::info!(%url, %json_url, error = %err, "no replay data in page, trying JSON endpoint");

    match get_text(&client, &json_url).await {
        Ok(text) => match extract::from_json(&text) {
            Ok(replay) => Ok(replay),
            Err(e) => {
                tracing::warn!(%json_url, error = %e, "JSON endpoint returned no replay");
                Err(err)
            }
        },
        Err(e) => {
            tracing::warn!(%json_url, error = %e, "JSON endpoint fetch failed");
            Err(err)
        }
    }
}

/// `https://replay.pokemonshowdown.com/gen9ou-1/` -> `.../gen9ou-1.json`
pub fn json_endpoint(url: &str) -> String {
    let base = url.trim_end_matches('/');
    if base.ends_with(".json") {
        base.to_string()
    } else {
        format!("{}.json", base)
    }
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, ReplayError> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}
