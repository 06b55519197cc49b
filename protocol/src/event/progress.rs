//! Battle metadata and progress parsers

use super::BattleEvent;
use super::battle::{Side, parse_text};
use crate::ParseError;
use anyhow::Result;

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
pub fn parse_player(args: &[String]) -> Result<BattleEvent> {
    let side = args
        .first()
        .and_then(|s| Side::parse(s))
        .ok_or_else(|| ParseError::MissingField("player".to_string()))?;

    let username = parse_text(args, 1);
    let rating = args.get(3).and_then(|s| s.parse().ok());

    Ok(BattleEvent::Player {
        side,
        username,
        rating,
    })
}

/// Parse |gen|GENNUM
pub fn parse_gen(args: &[String]) -> Result<BattleEvent> {
    let generation = args
        .first()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ParseError::InvalidFormat("generation".to_string()))?;

    Ok(BattleEvent::Gen(generation))
}

/// Parse |tier|FORMATNAME
pub fn parse_tier(args: &[String]) -> Result<BattleEvent> {
    Ok(BattleEvent::Tier(parse_text(args, 0)))
}

/// Parse |turn|NUMBER
pub fn parse_turn(args: &[String]) -> Result<BattleEvent> {
    let turn = args
        .first()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ParseError::InvalidFormat("turn number".to_string()))?;

    Ok(BattleEvent::Turn(turn))
}

/// Parse |win|USER
pub fn parse_win(args: &[String]) -> Result<BattleEvent> {
    Ok(BattleEvent::Win(parse_text(args, 0)))
}

/// Parse |tie
pub fn parse_tie(_args: &[String]) -> Result<BattleEvent> {
    Ok(BattleEvent::Tie)
}

/// Parse |forcewin or |forcewin|PLAYER
pub fn parse_forcewin(args: &[String]) -> Result<BattleEvent> {
    let player = args.first().filter(|s| !s.is_empty()).cloned();
    Ok(BattleEvent::ForceWin(player))
}
