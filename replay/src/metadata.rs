//! Replay metadata as published alongside the log

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Replay, ReplayError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Display names in seat order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<String>,
    /// Normalized user ids in seat order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub player_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    /// Unix timestamp in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_time: Option<i64>,
}

impl ReplayMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Replay document as served by the replay site (`<id>.json`) or embedded in
/// a replay page. Only `log` has to be a string; metadata fields of an
/// unexpected type are dropped rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawReplay {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    format: Option<Value>,
    #[serde(default)]
    p1: Option<Value>,
    #[serde(default)]
    p2: Option<Value>,
    #[serde(default)]
    p1id: Option<Value>,
    #[serde(default)]
    p2id: Option<Value>,
    #[serde(default)]
    players: Option<Value>,
    #[serde(default)]
    rating: Option<Value>,
    #[serde(default)]
    uploadtime: Option<Value>,
    #[serde(default)]
    log: Option<String>,
}

impl RawReplay {
    pub(crate) fn has_log(&self) -> bool {
        self.log.is_some()
    }

    pub(crate) fn into_replay(self) -> Result<Replay, ReplayError> {
        let Some(log) = self.log else {
            return Err(ReplayError::NoLogData(
                "replay document has no \"log\" field".to_string(),
            ));
        };

        let players: Vec<String> = match &self.players {
            Some(Value::Array(items)) => items.iter().filter_map(loose_text).collect(),
            _ => Vec::new(),
        };
        let players = if players.is_empty() {
            [&self.p1, &self.p2]
                .into_iter()
                .filter_map(|v| v.as_ref().and_then(loose_text))
                .collect()
        } else {
            players
        };

        Ok(Replay {
            metadata: ReplayMetadata {
                id: self.id.as_ref().and_then(loose_text),
                format: self.format.as_ref().and_then(loose_text),
                players,
                player_ids: [&self.p1id, &self.p2id]
                    .into_iter()
                    .filter_map(|v| v.as_ref().and_then(loose_text))
                    .collect(),
                rating: self.rating.as_ref().and_then(loose_int),
                upload_time: self.uploadtime.as_ref().and_then(loose_int),
            },
            log,
        })
    }
}

fn loose_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn loose_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_metadata_from_replay_json() {
        let raw: RawReplay = serde_json::from_str(
            r#"{
                "id": "gen9ou-2172099392",
                "format": "[Gen 9] OU",
                "p1": "Alice",
                "p2": "Bob",
                "p1id": "alice",
                "p2id": "bob",
                "rating": 1523,
                "uploadtime": 1718000000,
                "views": 12,
                "log": "|win|Alice"
            }"#,
        )
        .unwrap();
        let replay = raw.into_replay().unwrap();

        assert_eq!(
            replay.metadata,
            ReplayMetadata {
                id: Some("gen9ou-2172099392".to_string()),
                format: Some("[Gen 9] OU".to_string()),
                players: vec!["Alice".to_string(), "Bob".to_string()],
                player_ids: vec!["alice".to_string(), "bob".to_string()],
                rating: Some(1523),
                upload_time: Some(1718000000),
            }
        );
        assert_eq!(replay.log, "|win|Alice");
    }

    #[test]
    fn test_players_array_wins_over_seats() {
        let raw: RawReplay = serde_json::from_str(
            r#"{"players": ["Alice", "Bob", "Carol", "Dave"], "p1": "Alice", "rating": "1400", "log": ""}"#,
        )
        .unwrap();
        let replay = raw.into_replay().unwrap();

        assert_eq!(replay.metadata.players.len(), 4);
        assert_eq!(replay.metadata.rating, Some(1400));
    }

    #[test]
    fn test_unexpected_metadata_types_are_dropped() {
        let raw: RawReplay = serde_json::from_str(
            r#"{"id": 2172099392, "format": ["gen9ou"], "p1": "Alice", "p2": null, "p1id": {"x": 1}, "players": "Alice", "log": "|tie"}"#,
        )
        .unwrap();
        let replay = raw.into_replay().unwrap();

        assert_eq!(replay.metadata.id.as_deref(), Some("2172099392"));
        assert_eq!(replay.metadata.format, None);
        assert_eq!(replay.metadata.players, vec!["Alice".to_string()]);
        assert!(replay.metadata.player_ids.is_empty());
        assert_eq!(replay.log, "|tie");
    }

    #[test]
    fn test_missing_log() {
        let raw: RawReplay = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(!raw.has_log());
        assert!(matches!(raw.into_replay(), Err(ReplayError::NoLogData(_))));
    }

    #[test]
    fn test_empty_metadata_serializes_to_empty_object() {
        let meta = ReplayMetadata::default();
        assert!(meta.is_empty());
        assert_eq!(serde_json::to_string(&meta).unwrap(), "{}");
    }
}
