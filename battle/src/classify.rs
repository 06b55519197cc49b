//! Move classification table
//!
//! Splits move names into direct attacks and everything else (status,
//! hazards, field setters, boosts, recovery, protection, pivots, support,
//! binding). The table is data: `data/non_attack_moves.json` is embedded at
//! build time, and a replacement table can be loaded from disk.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_TABLE: &str = include_str!("../data/non_attack_moves.json");

static BUILTIN: LazyLock<Arc<MoveClassifier>> = LazyLock::new(|| {
    Arc::new(
        MoveClassifier::from_json(BUILTIN_TABLE).expect("embedded move table is valid JSON"),
    )
});

/// Category of a move that cannot deal a direct knockout blow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonAttackKind {
    Status,
    Hazard,
    Field,
    Boost,
    Recovery,
    Protection,
    Pivot,
    Support,
    Binding,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveClass {
    Attack,
    NonAttack(NonAttackKind),
}

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to read move table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid move table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exact-match lookup of non-attacking move names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveClassifier {
    non_attack: HashMap<String, NonAttackKind>,
}

impl MoveClassifier {
    /// Process-wide table built from the embedded data file
    pub fn builtin() -> Arc<MoveClassifier> {
        Arc::clone(&BUILTIN)
    }

    /// Parse a table shaped like `{"status": ["Toxic", ...], "hazard": [...]}`.
    ///
    /// A move listed under several categories keeps the first one in file
    /// order.
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let table: IndexMap<NonAttackKind, Vec<String>> = serde_json::from_str(json)?;

        let mut non_attack = HashMap::new();
        for (kind, moves) in table {
            for name in moves {
                non_attack.entry(name).or_insert(kind);
            }
        }

        Ok(Self { non_attack })
    }

    /// Load a replacement table from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn classify(&self, move_name: &str) -> MoveClass {
        match self.non_attack.get(move_name) {
            Some(kind) => MoveClass::NonAttack(*kind),
            None => MoveClass::Attack,
        }
    }

    /// Whether the move is a direct attack (anything not in the table)
    pub fn is_attack(&self, move_name: &str) -> bool {
        !self.non_attack.contains_key(move_name)
    }

    /// Number of non-attacking moves in the table
    pub fn len(&self) -> usize {
        self.non_attack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.non_attack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let classifier = MoveClassifier::builtin();
        assert!(classifier.len() > 150);
    }

    #[test]
    fn test_attack_moves() {
        let classifier = MoveClassifier::builtin();

        for name in [
            "Earthquake",
            "Thunderbolt",
            "Hydro Pump",
            "Flamethrower",
            "Ice Beam",
            "Dragon Claw",
            "U-turn",
        ] {
            assert!(classifier.is_attack(name), "{name} should be an attack");
        }
    }

    #[test]
    fn test_non_attack_moves() {
        let classifier = MoveClassifier::builtin();

        assert_eq!(
            classifier.classify("Stealth Rock"),
            MoveClass::NonAttack(NonAttackKind::Hazard)
        );
        assert_eq!(
            classifier.classify("Toxic"),
            MoveClass::NonAttack(NonAttackKind::Status)
        );
        assert_eq!(
            classifier.classify("Recover"),
            MoveClass::NonAttack(NonAttackKind::Recovery)
        );
        assert_eq!(
            classifier.classify("Swords Dance"),
            MoveClass::NonAttack(NonAttackKind::Boost)
        );
        assert_eq!(
            classifier.classify("Fire Spin"),
            MoveClass::NonAttack(NonAttackKind::Binding)
        );
        for name in ["Will-O-Wisp", "Thunder Wave", "Leech Seed", "Spikes", "Protect"] {
            assert!(!classifier.is_attack(name), "{name} should not be an attack");
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        let classifier = MoveClassifier::builtin();

        assert!(!classifier.is_attack("Recover"));
        assert!(classifier.is_attack("recover"));
        assert!(classifier.is_attack("Recover "));
    }

    #[test]
    fn test_custom_table() {
        let classifier =
            MoveClassifier::from_json(r#"{"hazard": ["Ceaseless Edge"], "status": []}"#).unwrap();

        assert_eq!(classifier.len(), 1);
        assert!(!classifier.is_attack("Ceaseless Edge"));
        assert!(classifier.is_attack("Toxic"));
    }

    #[test]
    fn test_duplicate_move_keeps_first_category() {
        for _ in 0..8 {
            let classifier = MoveClassifier::from_json(
                r#"{"pivot": ["Parting Shot"], "status": ["Parting Shot"], "support": ["Parting Shot"]}"#,
            )
            .unwrap();

            assert_eq!(classifier.len(), 1);
            assert_eq!(
                classifier.classify("Parting Shot"),
                MoveClass::NonAttack(NonAttackKind::Pivot)
            );
        }

        let reversed =
            MoveClassifier::from_json(r#"{"support": ["Parting Shot"], "pivot": ["Parting Shot"]}"#)
                .unwrap();
        assert_eq!(
            reversed.classify("Parting Shot"),
            MoveClass::NonAttack(NonAttackKind::Support)
        );
    }

    #[test]
    fn test_invalid_table() {
        assert!(matches!(
            MoveClassifier::from_json(r#"{"weather": ["Rain Dance"]}"#),
            Err(ClassifierError::Json(_))
        ));
        assert!(matches!(
            MoveClassifier::from_path("/definitely/not/here.json"),
            Err(ClassifierError::Io { .. })
        ));
    }
}
