//! Locate the battle log inside whatever the user handed us
//!
//! Replay pages have carried the log in a few different shapes over the
//! years, so HTML extraction tries each of them in turn:
//!
//! 1. `<script type="text/plain" class="battle-log-data">` with the raw log
//! 2. an inline `Replays.embed(...)`, `Replays.append(...)` or
//!    `Replays.render(...)` call with a JSON object argument
//! 3. any JSON-looking object with a `"log"` string

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::metadata::RawReplay;
use crate::{Replay, ReplayError};

static LOG_DATA_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script[^>]*class="battle-log-data"[^>]*>(.*?)</script>"#).unwrap()
});

static REPLAYS_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Replays\s*\.\s*(?:embed|append|render)\s*\(\s*(\{[^}]*(?:\{[^}]*\}[^}]*)*\})\s*\)")
        .unwrap()
});

static LOG_BLOB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\{[^{]*"log"\s*:\s*"[^"]*"[^}]*\})"#).unwrap());

static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(\s*[}\]])").unwrap());

/// Parse a replay JSON document (an object with a `log` field)
pub fn from_json(text: &str) -> Result<Replay, ReplayError> {
    let raw: RawReplay = serde_json::from_str(text)?;
    raw.into_replay()
}

/// Find the battle log in a replay page
pub fn from_html(html: &str) -> Result<Replay, ReplayError> {
    if let Some(caps) = LOG_DATA_SCRIPT.captures(html) {
        let log = caps[1].replace(r"<\/", "</");
        if !log.trim().is_empty() {
            return Ok(from_raw_log(&log));
        }
    }

    for pattern in [&*REPLAYS_CALL, &*LOG_BLOB] {
        for caps in pattern.captures_iter(html) {
            if let Some(replay) = parse_candidate(&caps[1]) {
                return Ok(replay);
            }
        }
    }

    Err(ReplayError::NoLogData(
        "no replay data found in page".to_string(),
    ))
}

/// Wrap a raw pipe-delimited log; no metadata is available
pub fn from_raw_log(text: &str) -> Replay {
    Replay {
        metadata: Default::default(),
        log: text.to_string(),
    }
}

/// Read a saved replay: JSON document, replay page or raw log, sniffed in
/// that order
pub fn from_file(path: impl AsRef<Path>) -> Result<Replay, ReplayError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&content) {
        let raw: RawReplay = serde_json::from_value(value)?;
        if raw.has_log() {
            return raw.into_replay();
        }
    }

    let lower = content.to_lowercase();
    if lower.contains("<html") || lower.contains("<script") {
        return from_html(&content);
    }

    Ok(from_raw_log(&content))
}

/// Page scripts are JavaScript, not JSON; trailing commas are the usual
/// difference
fn clean_js_json(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

fn parse_candidate(text: &str) -> Option<Replay> {
    let cleaned = clean_js_json(text);
    match serde_json::from_str::<RawReplay>(&cleaned) {
        Ok(raw) if raw.has_log() => raw.into_replay().ok(),
        Ok(_) => None,
        Err(e) => {
            tracing::trace!(error = %e, "skipping unparseable replay candidate");
            None
        }
    }
}
