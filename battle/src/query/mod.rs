//! Read-only views over tracked battle state

mod summary;

pub use summary::{BattleSummary, CombatantSummary, PlayerSummary};
