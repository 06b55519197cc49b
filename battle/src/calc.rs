//! Damage calculator bridge
//!
//! Tracking never depends on a calculator. This is the seam for an optional
//! external one (e.g. a damage-calc process): descriptors built from tracked
//! combatants go in, a damage range or a failure comes out.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CombatantRecord;

/// What is known about one side of a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcPokemon {
    pub species: String,
    pub level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

impl CalcPokemon {
    pub fn from_record(rec: &CombatantRecord) -> Self {
        Self {
            species: rec.species.clone(),
            level: rec.level,
            ability: rec.ability.clone(),
            item: if rec.item_consumed {
                None
            } else {
                rec.item.clone()
            },
        }
    }
}

/// Field conditions passed through to the calculator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcRequest {
    pub attacker: CalcPokemon,
    pub defender: CalcPokemon,
    #[serde(rename = "move")]
    pub move_name: String,
    #[serde(default)]
    pub field: CalcField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Damage calculator unavailable: {0}")]
    Unavailable(String),

    #[error("Damage calculator timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Damage calculation failed: {0}")]
    Failed(String),
}

pub trait DamageCalculator {
    fn calculate(
        &self,
        request: &CalcRequest,
    ) -> impl Future<Output = Result<DamageRange, CalcError>> + Send;
}

/// Calculator used when none is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCalculator;

impl DamageCalculator for NoCalculator {
    async fn calculate(&self, _request: &CalcRequest) -> Result<DamageRange, CalcError> {
        Err(CalcError::Unavailable("no calculator configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use espy_protocol::{PokemonDetails, Side};

    use super::*;
    use crate::types::CombatantId;

    fn request() -> CalcRequest {
        let mut attacker = CombatantRecord::new(
            CombatantId::new(Side::P1, "Sparky"),
            &PokemonDetails::parse("Pikachu, L50"),
        );
        attacker.record_item("Light Ball");
        let mut defender = CombatantRecord::new(
            CombatantId::new(Side::P2, "Zard"),
            &PokemonDetails::parse("Charizard"),
        );
        defender.consume_item("Heavy-Duty Boots");

        CalcRequest {
            attacker: CalcPokemon::from_record(&attacker),
            defender: CalcPokemon::from_record(&defender),
            move_name: "Thunderbolt".to_string(),
            field: CalcField::default(),
        }
    }

    #[test]
    fn test_descriptor_from_record() {
        let req = request();
        assert_eq!(req.attacker.species, "Pikachu");
        assert_eq!(req.attacker.level, 50);
        assert_eq!(req.attacker.item.as_deref(), Some("Light Ball"));
        assert_eq!(req.defender.level, 100);
        assert_eq!(req.defender.item, None);
    }

    #[test]
    fn test_request_json_shape() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["move"], "Thunderbolt");
        assert_eq!(json["attacker"]["species"], "Pikachu");
        assert!(json["defender"].get("item").is_none());
    }

    #[tokio::test]
    async fn test_no_calculator() {
        assert!(matches!(
            NoCalculator.calculate(&request()).await,
            Err(CalcError::Unavailable(_))
        ));
    }
}
