//! Combatant statistics and kill attribution for Pokemon Showdown battle logs.
//!
//! # Overview
//!
//! `espy-battle` sits between `espy-protocol` (tokenizer and typed events)
//! and whatever renders the result:
//!
//! ```text
//! espy-protocol (LogLine, BattleEvent)
//!        │
//!        ▼
//! espy-battle (registry + attribution + summary) ← THIS CRATE
//!        │
//!        └─> espy-replay (extraction, fetching, CLI)
//! ```
//!
//! # Attribution
//!
//! The tracker remembers the last move each side used. When a combatant
//! loses HP or faints, the opposing side's last mover gets the credit. This
//! is a heuristic: poison, hazards and weather are credited the same way as
//! a direct hit, because the log gives no better signal at this level.
//!
//! Knockouts are always credited to that last mover. A *move kill* is only
//! recorded when the move is a direct attack according to the
//! [`MoveClassifier`] table.
//!
//! # Example Usage
//!
//! ```
//! use espy_battle::{StatsTracker, Side};
//!
//! let log = "\
//! |switch|p1a: Pikachu|Pikachu, L50|150/150
//! |switch|p2a: Charizard|Charizard, L50|200/200
//! |move|p1a: Pikachu|Thunderbolt|p2a: Charizard
//! |-damage|p2a: Charizard|0 fnt
//! |faint|p2a: Charizard
//! |win|Player1
//! ";
//!
//! let mut tracker = StatsTracker::new();
//! tracker.process_lines(&espy_protocol::process_log(log));
//!
//! let summary = tracker.summary();
//! let pikachu = summary.combatant(Side::P1, "Pikachu").unwrap();
//! assert_eq!(pikachu.knockouts, 1);
//! assert_eq!(pikachu.move_kills["Thunderbolt"], 1);
//! ```

pub mod calc;
pub mod classify;
pub mod query;
pub mod tracking;
pub mod types;

pub use calc::{CalcError, CalcRequest, DamageCalculator, DamageRange, NoCalculator};
pub use classify::{ClassifierError, MoveClass, MoveClassifier, NonAttackKind};
pub use query::{BattleSummary, CombatantSummary, PlayerSummary};
pub use tracking::{CombatantRegistry, LastMove, StatsTracker, TrackerConfig};
pub use types::{CombatantId, CombatantRecord};

// Re-export commonly used protocol types
pub use espy_protocol::{BattleEvent, LogLine, Side};

/// Tokenize, type and track a raw log with default settings
pub fn analyze_log(text: &str) -> BattleSummary {
    let mut tracker = StatsTracker::new();
    tracker.process_lines(&espy_protocol::process_log(text));
    tracker.summary()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_log_ignores_chat_and_trailing_lines() {
        let summary = analyze_log(
            "\
|j|☆Alice
|c|☆Alice|gl hf
|switch|p1a: Pikachu|Pikachu, L50|150/150
|html|<div class=\"broadcast-blue\">Rated battle</div>
|switch|p2a: Charizard|Charizard, L50|200/200
|error|[Invalid choice]
|move|p1a: Pikachu|Thunderbolt|p2a: Charizard
|-damage|p2a: Charizard|0 fnt
|faint|p2a: Charizard
|win|Alice
|c|☆Bob|gg
|switch|p2a: Blastoise|Blastoise|180/180
|faint|p1a: Pikachu
",
        );

        assert_eq!(summary.winner.as_deref(), Some("Alice"));
        assert_eq!(summary.combatants.len(), 2);
        let pikachu = summary.combatant(Side::P1, "Pikachu").unwrap();
        assert_eq!(pikachu.deaths, 0);
        assert_eq!(pikachu.knockouts, 1);
    }
}
