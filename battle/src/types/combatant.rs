//! Combatant records

use std::fmt;

use espy_protocol::{HpStatus, PokemonDetails, PokemonIdent, Side};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Stable key for a combatant: side + nickname.
///
/// The slot letter is not part of the key, so a pokemon that switches out
/// and back in (possibly into another slot) keeps its record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CombatantId {
    pub side: Side,
    pub nickname: String,
}

impl CombatantId {
    pub fn new(side: Side, nickname: impl Into<String>) -> Self {
        Self {
            side,
            nickname: nickname.into(),
        }
    }
}

impl From<&PokemonIdent> for CombatantId {
    fn from(ident: &PokemonIdent) -> Self {
        Self::new(ident.side, ident.nickname.clone())
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.side, self.nickname)
    }
}

/// Everything observed about one combatant over a battle
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantRecord {
    pub id: CombatantId,

    // === Identity (from the first switch-in) ===
    pub species: String,
    /// Level (1-100), 100 when the details string omits it
    pub level: u8,
    /// 'M', 'F', or None when unspecified
    pub gender: Option<char>,
    pub shiny: bool,

    // === Revealed information ===
    pub revealed_moves: IndexSet<String>,
    pub ability: Option<String>,
    pub item: Option<String>,
    /// Whether the revealed item was used up or knocked off
    pub item_consumed: bool,

    // === HP ===
    pub hp_current: Option<u32>,
    pub hp_max: Option<u32>,

    // === Battle statistics ===
    pub knockouts: u32,
    pub deaths: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    /// Knockouts credited to a specific attacking move
    pub move_kills: IndexMap<String, u32>,
}

impl CombatantRecord {
    pub fn new(id: CombatantId, details: &PokemonDetails) -> Self {
        let species = if details.species.is_empty() {
            id.nickname.clone()
        } else {
            details.species.clone()
        };

        Self {
            id,
            species,
            level: details.level.unwrap_or(100),
            gender: details.gender,
            shiny: details.shiny,
            revealed_moves: IndexSet::new(),
            ability: None,
            item: None,
            item_consumed: false,
            hp_current: None,
            hp_max: None,
            knockouts: 0,
            deaths: 0,
            damage_dealt: 0,
            damage_taken: 0,
            move_kills: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.id.nickname
    }

    pub fn record_move(&mut self, move_name: &str) {
        if !self.revealed_moves.contains(move_name) {
            self.revealed_moves.insert(move_name.to_string());
        }
    }

    pub fn record_ability(&mut self, ability: &str) {
        self.ability = Some(ability.to_string());
    }

    pub fn record_item(&mut self, item: &str) {
        self.item = Some(item.to_string());
        self.item_consumed = false;
    }

    /// Item ended (eaten berry, popped balloon, Knock Off).
    ///
    /// This is often the first time the item is seen at all.
    pub fn consume_item(&mut self, item: &str) {
        if self.item.is_none() && !item.is_empty() {
            self.item = Some(item.to_string());
        }
        self.item_consumed = true;
    }

    pub fn apply_hp_status(&mut self, hp: &HpStatus) {
        self.hp_current = Some(hp.current);
        self.hp_max = Some(hp.max);
    }

    pub fn add_move_kill(&mut self, move_name: &str) {
        let count = self.move_kills.entry(move_name.to_string()).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Total kills credited to named moves
    pub fn move_kill_total(&self) -> u32 {
        self.move_kills
            .values()
            .fold(0u32, |total, count| total.saturating_add(*count))
    }

    /// Knockouts per death; equals knockouts when never fainted
    pub fn kd_ratio(&self) -> f64 {
        if self.deaths == 0 {
            self.knockouts as f64
        } else {
            self.knockouts as f64 / self.deaths as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(details: &str) -> CombatantRecord {
        CombatantRecord::new(
            CombatantId::new(Side::P1, "Sparky"),
            &PokemonDetails::parse(details),
        )
    }

    #[test]
    fn test_new_record_defaults() {
        let rec = record("Pikachu");
        assert_eq!(rec.species, "Pikachu");
        assert_eq!(rec.level, 100);
        assert_eq!(rec.gender, None);
        assert_eq!(rec.hp_current, None);
        assert!(rec.revealed_moves.is_empty());
    }

    #[test]
    fn test_new_record_without_species_uses_nickname() {
        let rec = record("");
        assert_eq!(rec.species, "Sparky");
    }

    #[test]
    fn test_moves_are_a_set() {
        let mut rec = record("Pikachu, L50");
        rec.record_move("Thunderbolt");
        rec.record_move("Volt Tackle");
        rec.record_move("Thunderbolt");

        assert_eq!(rec.revealed_moves.len(), 2);
        assert!(rec.revealed_moves.contains("Volt Tackle"));
    }

    #[test]
    fn test_consume_item() {
        let mut rec = record("Pikachu");
        rec.consume_item("Sitrus Berry");
        assert_eq!(rec.item.as_deref(), Some("Sitrus Berry"));
        assert!(rec.item_consumed);

        let mut known = record("Pikachu");
        known.record_item("Light Ball");
        known.consume_item("");
        assert_eq!(known.item.as_deref(), Some("Light Ball"));
        assert!(known.item_consumed);
    }

    #[test]
    fn test_kd_ratio() {
        let mut rec = record("Pikachu");
        assert_eq!(rec.kd_ratio(), 0.0);

        rec.knockouts = 3;
        assert_eq!(rec.kd_ratio(), 3.0);

        rec.deaths = 2;
        assert_eq!(rec.kd_ratio(), 1.5);
    }

    #[test]
    fn test_move_kills() {
        let mut rec = record("Pikachu");
        rec.add_move_kill("Thunderbolt");
        rec.add_move_kill("Thunderbolt");
        rec.add_move_kill("Iron Tail");

        assert_eq!(rec.move_kills.get("Thunderbolt"), Some(&2));
        assert_eq!(rec.move_kill_total(), 3);
    }

    #[test]
    fn test_display_id() {
        assert_eq!(CombatantId::new(Side::P2, "Zard").to_string(), "p2: Zard");
    }
}
