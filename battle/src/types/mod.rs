//! Domain types for combatant statistics

mod combatant;

pub use combatant::{CombatantId, CombatantRecord};
