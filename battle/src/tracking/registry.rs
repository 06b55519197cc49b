//! Combatant registry
//!
//! One record per (side, nickname), kept in first-registration order. Every
//! `record_*` call on an unknown id is a logged no-op so that a bad line can
//! never abort the pass.

use espy_protocol::{HpStatus, PokemonDetails, PokemonIdent, Side};
use indexmap::IndexMap;

use crate::types::{CombatantId, CombatantRecord};

#[derive(Debug, Clone, Default)]
pub struct CombatantRegistry {
    combatants: IndexMap<CombatantId, CombatantRecord>,
}

impl CombatantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a combatant on first sighting.
    ///
    /// `details` only matters the first time; later calls for the same id
    /// leave species, level and gender untouched.
    pub fn register_if_absent(
        &mut self,
        ident: &PokemonIdent,
        details: &PokemonDetails,
    ) -> CombatantId {
        let id = CombatantId::from(ident);
        if !self.combatants.contains_key(&id) {
            tracing::debug!(combatant = %id, species = %details.species, "registering combatant");
            self.combatants
                .insert(id.clone(), CombatantRecord::new(id.clone(), details));
        }
        id
    }

    pub fn contains(&self, id: &CombatantId) -> bool {
        self.combatants.contains_key(id)
    }

    pub fn get(&self, id: &CombatantId) -> Option<&CombatantRecord> {
        self.combatants.get(id)
    }

    /// Current HP of a combatant, if both the combatant and its HP are known
    pub fn hp_current(&self, id: &CombatantId) -> Option<u32> {
        self.get(id).and_then(|rec| rec.hp_current)
    }

    pub fn record_move(&mut self, id: &CombatantId, move_name: &str) {
        if let Some(rec) = self.lookup_mut(id, "move") {
            rec.record_move(move_name);
        }
    }

    pub fn record_ability(&mut self, id: &CombatantId, ability: &str) {
        if let Some(rec) = self.lookup_mut(id, "ability") {
            rec.record_ability(ability);
        }
    }

    pub fn record_item(&mut self, id: &CombatantId, item: &str) {
        if let Some(rec) = self.lookup_mut(id, "item") {
            rec.record_item(item);
        }
    }

    pub fn record_item_consumed(&mut self, id: &CombatantId, item: &str) {
        if let Some(rec) = self.lookup_mut(id, "enditem") {
            rec.consume_item(item);
        }
    }

    pub fn record_hp(&mut self, id: &CombatantId, hp: &HpStatus) {
        if let Some(rec) = self.lookup_mut(id, "hp") {
            rec.apply_hp_status(hp);
        }
    }

    pub fn record_faint(&mut self, id: &CombatantId) {
        if let Some(rec) = self.lookup_mut(id, "faint") {
            rec.deaths = rec.deaths.saturating_add(1);
        }
    }

    pub fn record_knockout(&mut self, id: &CombatantId) {
        if let Some(rec) = self.lookup_mut(id, "knockout") {
            rec.knockouts = rec.knockouts.saturating_add(1);
        }
    }

    pub fn record_move_kill(&mut self, id: &CombatantId, move_name: &str) {
        if let Some(rec) = self.lookup_mut(id, "move kill") {
            rec.add_move_kill(move_name);
        }
    }

    /// Credit `amount` as dealt by `attacker` and taken by `defender`.
    ///
    /// Both must be registered, otherwise nothing is recorded, so total dealt
    /// always equals total taken. Totals saturate at `u32::MAX`.
    pub fn record_damage(&mut self, attacker: &CombatantId, defender: &CombatantId, amount: u32) {
        if !self.contains(attacker) || !self.contains(defender) {
            tracing::debug!(%attacker, %defender, amount, "ignoring damage with unknown combatant");
            return;
        }
        if let Some(rec) = self.combatants.get_mut(attacker) {
            rec.damage_dealt = rec.damage_dealt.saturating_add(amount);
        }
        if let Some(rec) = self.combatants.get_mut(defender) {
            rec.damage_taken = rec.damage_taken.saturating_add(amount);
        }
    }

    /// All combatants in first-registration order
    pub fn iter(&self) -> impl Iterator<Item = &CombatantRecord> {
        self.combatants.values()
    }

    /// One side's combatants in first-registration order
    pub fn team(&self, side: Side) -> impl Iterator<Item = &CombatantRecord> {
        self.iter().filter(move |rec| rec.id.side == side)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    fn lookup_mut(&mut self, id: &CombatantId, what: &str) -> Option<&mut CombatantRecord> {
        let rec = self.combatants.get_mut(id);
        if rec.is_none() {
            tracing::debug!(combatant = %id, what, "ignoring update for unknown combatant");
        }
        rec
    }
}
