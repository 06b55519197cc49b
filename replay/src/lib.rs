//! Replay extraction, fetching and reporting.
//!
//! Turns a replay page, a replay JSON document, a saved file or a raw log
//! into a [`Replay`], and feeds its log through `espy-battle`.
//!
//! ```text
//! URL ──fetch──┐
//! file ────────┼──> extract ──> Replay { metadata, log } ──> BattleSummary
//! raw log ─────┘
//! ```

pub mod calc;
pub mod extract;
pub mod fetch;
pub mod metadata;
pub mod report;

use std::path::PathBuf;
use std::sync::Arc;

use espy_battle::{BattleSummary, MoveClassifier, StatsTracker, TrackerConfig};
use espy_protocol::{LogLine, process_log};
use serde::Serialize;
use thiserror::Error;

pub use calc::ProcessCalculator;
pub use fetch::{FetchOptions, fetch_replay, fetch_replay_with};
pub use metadata::ReplayMetadata;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch replay: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid replay JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No battle log found: {0}")]
    NoLogData(String),
}

/// An extracted replay: whatever metadata was available plus the raw log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Replay {
    pub metadata: ReplayMetadata,
    pub log: String,
}

impl Replay {
    /// Tokenized battle lines, noise removed and cut at the terminal line
    pub fn lines(&self) -> Vec<LogLine> {
        process_log(&self.log)
    }

    /// Track the log with the built-in move table and default config
    pub fn analyze(&self) -> BattleSummary {
        self.analyze_with(MoveClassifier::builtin(), TrackerConfig::default())
    }

    pub fn analyze_with(
        &self,
        classifier: Arc<MoveClassifier>,
        config: TrackerConfig,
    ) -> BattleSummary {
        let mut tracker = StatsTracker::with_config(classifier, config);
        tracker.process_lines(&self.lines());
        tracker.summary()
    }
}
