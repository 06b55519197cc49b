//! Minor battle action parsers
//!
//! Secondary effects that change tracked state: HP changes and reveals.

use super::BattleEvent;
use super::battle::{parse_from_tag, parse_hp_status, parse_ident, parse_text};
use anyhow::Result;

/// Parse |-damage|POKEMON|HP STATUS with an optional [from] tag
pub fn parse_damage(args: &[String]) -> Result<BattleEvent> {
    let pokemon = parse_ident(args, 0)?;
    let hp_status = parse_hp_status(args, 1);
    let from = parse_from_tag(args, 2);

    Ok(BattleEvent::Damage {
        pokemon,
        hp_status,
        from,
    })
}

/// Parse |-heal|POKEMON|HP STATUS with an optional [from] tag
pub fn parse_heal(args: &[String]) -> Result<BattleEvent> {
    let pokemon = parse_ident(args, 0)?;
    let hp_status = parse_hp_status(args, 1);
    let from = parse_from_tag(args, 2);

    Ok(BattleEvent::Heal {
        pokemon,
        hp_status,
        from,
    })
}

/// Parse |-ability|POKEMON|ABILITY
pub fn parse_ability(args: &[String]) -> Result<BattleEvent> {
    let pokemon = parse_ident(args, 0)?;
    let ability = parse_text(args, 1);
    let from = parse_from_tag(args, 2);

    Ok(BattleEvent::Ability {
        pokemon,
        ability,
        from,
    })
}

/// Parse |-item|POKEMON|ITEM
pub fn parse_item(args: &[String]) -> Result<BattleEvent> {
    let pokemon = parse_ident(args, 0)?;
    let item = parse_text(args, 1);
    let from = parse_from_tag(args, 2);

    Ok(BattleEvent::Item {
        pokemon,
        item,
        from,
    })
}

/// Parse |-enditem|POKEMON|ITEM
pub fn parse_enditem(args: &[String]) -> Result<BattleEvent> {
    let pokemon = parse_ident(args, 0)?;
    let item = parse_text(args, 1);
    let from = parse_from_tag(args, 2);

    Ok(BattleEvent::EndItem {
        pokemon,
        item,
        from,
    })
}
