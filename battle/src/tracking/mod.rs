//! Combatant tracking from battle events

mod battle;
mod registry;
mod updater;

pub use battle::{LastMove, PlayerInfo, StatsTracker, TrackerConfig};
pub use registry::CombatantRegistry;
