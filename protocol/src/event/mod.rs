//! Typed battle events
//!
//! [`BattleEvent`] is a closed enum: every command the stats engine consumes
//! has its own variant, everything else lands in [`BattleEvent::Ignored`].

mod battle;
mod major;
mod minor;
mod progress;

pub use battle::{HpStatus, PokemonDetails, PokemonIdent, Side};

use anyhow::Result;

use crate::log::LogLine;

#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // === Battle metadata ===
    /// |player|PLAYER|USERNAME|AVATAR|RATING
    Player {
        side: Side,
        username: String,
        rating: Option<u32>,
    },
    /// |gen|GENNUM
    Gen(u8),
    /// |tier|FORMATNAME
    Tier(String),
    /// |turn|NUMBER
    Turn(u32),

    // === Major actions ===
    /// |switch|POKEMON|DETAILS|HP STATUS
    Switch {
        pokemon: PokemonIdent,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    /// |drag|POKEMON|DETAILS|HP STATUS
    Drag {
        pokemon: PokemonIdent,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    /// |move|POKEMON|MOVE|TARGET
    Move {
        pokemon: PokemonIdent,
        move_name: String,
        target: Option<PokemonIdent>,
    },
    /// |faint|POKEMON
    Faint(PokemonIdent),

    // === Minor actions ===
    /// |-damage|POKEMON|HP STATUS
    Damage {
        pokemon: PokemonIdent,
        hp_status: Option<HpStatus>,
        from: Option<String>,
    },
    /// |-heal|POKEMON|HP STATUS
    Heal {
        pokemon: PokemonIdent,
        hp_status: Option<HpStatus>,
        from: Option<String>,
    },
    /// |-ability|POKEMON|ABILITY
    Ability {
        pokemon: PokemonIdent,
        ability: String,
        from: Option<String>,
    },
    /// |-item|POKEMON|ITEM
    Item {
        pokemon: PokemonIdent,
        item: String,
        from: Option<String>,
    },
    /// |-enditem|POKEMON|ITEM
    EndItem {
        pokemon: PokemonIdent,
        item: String,
        from: Option<String>,
    },

    // === Battle end ===
    /// |win|USER
    Win(String),
    /// |tie
    Tie,
    /// |forcewin|PLAYER
    ForceWin(Option<String>),

    /// Any command without an effect on tracked stats
    Ignored(String),
}

impl BattleEvent {
    /// Type a tokenized line.
    ///
    /// Known commands with a missing or malformed identifier are errors;
    /// unknown commands become [`BattleEvent::Ignored`].
    pub fn parse(line: &LogLine) -> Result<BattleEvent> {
        let args = line.args.as_slice();

        match line.command.as_str() {
            "player" => progress::parse_player(args),
            "gen" => progress::parse_gen(args),
            "tier" => progress::parse_tier(args),
            "turn" => progress::parse_turn(args),
            "win" => progress::parse_win(args),
            "tie" => progress::parse_tie(args),
            "forcewin" => progress::parse_forcewin(args),

            "switch" => major::parse_switch(args),
            "drag" => major::parse_drag(args),
            "move" => major::parse_move(args),
            "faint" => major::parse_faint(args),

            "-damage" => minor::parse_damage(args),
            "-heal" => minor::parse_heal(args),
            "-ability" => minor::parse_ability(args),
            "-item" => minor::parse_item(args),
            "-enditem" => minor::parse_enditem(args),

            other => Ok(BattleEvent::Ignored(other.to_string())),
        }
    }

    /// Whether this event ends the battle
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BattleEvent::Win(_) | BattleEvent::Tie | BattleEvent::ForceWin(_)
        )
    }
}
