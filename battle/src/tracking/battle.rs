//! StatsTracker - per-battle attribution state

use std::sync::Arc;

use espy_protocol::{BattleEvent, LogLine, Side};

use super::registry::CombatantRegistry;
use crate::classify::MoveClassifier;
use crate::types::CombatantId;

/// Knobs for kill attribution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Only credit a move kill when the opponent's last move was used in the
    /// same turn as the faint. Knockout credit is unaffected.
    pub require_same_turn_move_kill: bool,
}

/// Most recent move executed by a side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastMove {
    pub actor: CombatantId,
    pub move_name: String,
    /// Turn the move was used in (0 before the first |turn|)
    pub turn: u32,
}

/// Player seat information from |player|
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInfo {
    pub username: String,
    pub rating: Option<u32>,
}

/// Accumulates combatant statistics from battle events.
///
/// Events must be fed in log order. Damage and knockouts are credited to
/// whoever on the opposing side moved last, so reordering events changes
/// the result.
#[derive(Debug, Clone)]
pub struct StatsTracker {
    // === Battle metadata ===
    /// Format/tier name
    pub tier: Option<String>,

    /// Generation (1-9), if announced
    pub generation: Option<u8>,

    /// Current turn number (0 = not started)
    pub turn: u32,

    pub(crate) players: [Option<PlayerInfo>; 4],

    // === State ===
    pub(crate) registry: CombatantRegistry,

    /// Last combatant switched in per side
    pub(crate) active: [Option<CombatantId>; 4],

    /// Last move per side; overwritten on every move, never expired
    pub(crate) last_move: [Option<LastMove>; 4],

    pub(crate) classifier: Arc<MoveClassifier>,
    pub(crate) config: TrackerConfig,

    // === Outcome ===
    /// Whether a terminal event was seen
    pub ended: bool,

    /// Winner's username (if ended with a winner)
    pub winner: Option<String>,

    /// Whether the battle ended in a tie
    pub tie: bool,
}

impl StatsTracker {
    /// Create a tracker with the built-in move table and default config
    pub fn new() -> Self {
        Self::with_config(MoveClassifier::builtin(), TrackerConfig::default())
    }

    pub fn with_config(classifier: Arc<MoveClassifier>, config: TrackerConfig) -> Self {
        Self {
            tier: None,
            generation: None,
            turn: 0,
            players: Default::default(),
            registry: CombatantRegistry::new(),
            active: Default::default(),
            last_move: Default::default(),
            classifier,
            config,
            ended: false,
            winner: None,
            tie: false,
        }
    }

    /// Type and apply tokenized lines in order.
    ///
    /// Lines that fail typed parsing (e.g. a faint without an identifier)
    /// are logged and skipped.
    pub fn process_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a LogLine>) {
        for line in lines {
            match BattleEvent::parse(line) {
                Ok(event) => self.update(&event),
                Err(e) => {
                    tracing::debug!(error = %e, line = %line.raw, "skipping malformed event");
                }
            }
        }
    }

    /// Apply typed events in order
    pub fn process<'a>(&mut self, events: impl IntoIterator<Item = &'a BattleEvent>) {
        for event in events {
            self.update(event);
        }
    }

    pub fn registry(&self) -> &CombatantRegistry {
        &self.registry
    }

    pub fn classifier(&self) -> &MoveClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn player(&self, side: Side) -> Option<&PlayerInfo> {
        self.players[side.index()].as_ref()
    }

    /// Combatant most recently switched in for a side
    pub fn active(&self, side: Side) -> Option<&CombatantId> {
        self.active[side.index()].as_ref()
    }

    pub fn last_move(&self, side: Side) -> Option<&LastMove> {
        self.last_move[side.index()].as_ref()
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
