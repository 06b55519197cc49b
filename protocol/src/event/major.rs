//! Major battle action parsers
//!
//! These are the primary actions in battle: moves, switches, faints.

use super::BattleEvent;
use super::battle::{PokemonIdent, parse_details, parse_hp_status, parse_ident, parse_text};
use anyhow::Result;

/// Parse |switch|POKEMON|DETAILS|HP STATUS
pub fn parse_switch(args: &[String]) -> Result<BattleEvent> {
    let pokemon = parse_ident(args, 0)?;
    let details = parse_details(args, 1);
    let hp_status = parse_hp_status(args, 2);

    Ok(BattleEvent::Switch {
        pokemon,
        details,
        hp_status,
    })
}

/// Parse |drag|POKEMON|DETAILS|HP STATUS
pub fn parse_drag(args: &[String]) -> Result<BattleEvent> {
    let pokemon = parse_ident(args, 0)?;
    let details = parse_details(args, 1);
    let hp_status = parse_hp_status(args, 2);

    Ok(BattleEvent::Drag {
        pokemon,
        details,
        hp_status,
    })
}

/// Parse |move|POKEMON|MOVE|TARGET with optional tags
pub fn parse_move(args: &[String]) -> Result<BattleEvent> {
    let pokemon = parse_ident(args, 0)?;
    let move_name = parse_text(args, 1);
    if move_name.is_empty() {
        return Err(anyhow::anyhow!("Missing move name"));
    }
    let target = args.get(2).and_then(|s| PokemonIdent::parse(s));

    Ok(BattleEvent::Move {
        pokemon,
        move_name,
        target,
    })
}

/// Parse |faint|POKEMON
pub fn parse_faint(args: &[String]) -> Result<BattleEvent> {
    let pokemon = parse_ident(args, 0)?;
    Ok(BattleEvent::Faint(pokemon))
}
