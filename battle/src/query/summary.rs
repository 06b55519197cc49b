//! Read-only battle summary built from tracked state

use espy_protocol::Side;
use indexmap::IndexMap;
use serde::Serialize;

use crate::tracking::{PlayerInfo, StatsTracker};
use crate::types::{CombatantId, CombatantRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantSummary {
    pub id: CombatantId,
    pub name: String,
    pub species: String,
    pub level: u8,
    pub gender: Option<char>,
    pub moves: Vec<String>,
    pub ability: Option<String>,
    pub item: Option<String>,
    pub knockouts: u32,
    pub deaths: u32,
    pub kd_ratio: f64,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub move_kills: IndexMap<String, u32>,
}

impl From<&CombatantRecord> for CombatantSummary {
    fn from(rec: &CombatantRecord) -> Self {
        Self {
            id: rec.id.clone(),
            name: rec.name().to_string(),
            species: rec.species.clone(),
            level: rec.level,
            gender: rec.gender,
            moves: rec.revealed_moves.iter().cloned().collect(),
            ability: rec.ability.clone(),
            item: rec.item.clone(),
            knockouts: rec.knockouts,
            deaths: rec.deaths,
            kd_ratio: rec.kd_ratio(),
            damage_dealt: rec.damage_dealt,
            damage_taken: rec.damage_taken,
            move_kills: rec.move_kills.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub side: Side,
    pub username: String,
    pub rating: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleSummary {
    pub format: Option<String>,
    pub generation: Option<u8>,
    pub turns: u32,
    pub players: Vec<PlayerSummary>,
    pub winner: Option<String>,
    pub tie: bool,
    /// Every combatant in first-registration order
    pub combatants: Vec<CombatantSummary>,
    /// Nicknames per side in first-registration order
    pub teams: IndexMap<Side, Vec<String>>,
}

impl BattleSummary {
    /// Look up a combatant by side and nickname
    pub fn combatant(&self, side: Side, nickname: &str) -> Option<&CombatantSummary> {
        self.combatants
            .iter()
            .find(|c| c.id.side == side && c.id.nickname == nickname)
    }

    /// Combatants belonging to one side
    pub fn team(&self, side: Side) -> impl Iterator<Item = &CombatantSummary> {
        self.combatants.iter().filter(move |c| c.id.side == side)
    }
}

impl StatsTracker {
    /// Snapshot the tracked state.
    ///
    /// p1 and p2 always appear in `teams`, even with no combatants.
    pub fn summary(&self) -> BattleSummary {
        let combatants = self
            .registry
            .iter()
            .map(CombatantSummary::from)
            .collect();

        let mut teams = IndexMap::new();
        for side in Side::ALL {
            let members: Vec<String> = self
                .registry
                .team(side)
                .map(|rec| rec.name().to_string())
                .collect();
            if !members.is_empty() || matches!(side, Side::P1 | Side::P2) {
                teams.insert(side, members);
            }
        }

        let players = Side::ALL
            .iter()
            .filter_map(|side| {
                self.player(*side)
                    .map(|PlayerInfo { username, rating }| PlayerSummary {
                        side: *side,
                        username: username.clone(),
                        rating: *rating,
                    })
            })
            .collect();

        BattleSummary {
            format: self.tier.clone(),
            generation: self.generation,
            turns: self.turn,
            players,
            winner: self.winner.clone(),
            tie: self.tie,
            combatants,
            teams,
        }
    }
}
