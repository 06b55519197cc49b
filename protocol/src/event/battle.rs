//! Shared field types for battle events

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Side of the battle (p1, p2, p3, p4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    P1,
    P2,
    P3,
    P4,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::P1, Side::P2, Side::P3, Side::P4];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Side::P1),
            "p2" => Some(Side::P2),
            "p3" => Some(Side::P3),
            "p4" => Some(Side::P4),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::P1 => "p1",
            Side::P2 => "p2",
            Side::P3 => "p3",
            Side::P4 => "p4",
        }
    }

    /// The side whose moves are credited for damage on this side.
    ///
    /// p1 and p2 face each other; p3 and p4 face each other.
    pub fn opponent(&self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
            Side::P3 => Side::P4,
            Side::P4 => Side::P3,
        }
    }

    /// Array index (p1 = 0)
    pub fn index(&self) -> usize {
        match self {
            Side::P1 => 0,
            Side::P2 => 1,
            Side::P3 => 2,
            Side::P4 => 3,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pokemon identifier in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonIdent {
    /// Side that owns this pokemon
    pub side: Side,
    /// Slot letter (a, b, c) when the identifier names an active position
    pub position: Option<char>,
    /// Nickname, unique per side
    pub nickname: String,
}

impl PokemonIdent {
    /// Parse an identifier like "p1a: Pikachu" or "p2: Zard".
    ///
    /// Splits on the first colon. Returns `None` without a colon, with an
    /// unknown side tag, or with an empty nickname.
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = s.split_once(':')?;
        let pos_part = pos_part.trim();

        let side = Side::parse(pos_part.get(..2)?)?;
        let position = pos_part.chars().nth(2);

        let nickname = name.trim();
        if nickname.is_empty() {
            return None;
        }

        Some(PokemonIdent {
            side,
            position,
            nickname: nickname.to_string(),
        })
    }
}

/// Pokemon details string (species, level, gender, shiny, tera)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PokemonDetails {
    pub species: String,
    pub level: Option<u8>,
    pub gender: Option<char>,
    pub shiny: bool,
    pub tera_type: Option<String>,
}

impl PokemonDetails {
    /// Parse a details string like "Pikachu, L50, M, shiny" or "Arceus-*"
    pub fn parse(s: &str) -> Self {
        let mut details = PokemonDetails::default();
        let mut parts = s.split(',').map(str::trim);

        if let Some(species) = parts.next() {
            details.species = species.to_string();
        }

        for part in parts {
            if let Some(level_str) = part.strip_prefix('L') {
                details.level = level_str.parse().ok();
            } else if part == "M" {
                details.gender = Some('M');
            } else if part == "F" {
                details.gender = Some('F');
            } else if part == "shiny" {
                details.shiny = true;
            } else if let Some(tera) = part.strip_prefix("tera:") {
                details.tera_type = Some(tera.to_string());
            }
        }

        details
    }
}

/// HP and status condition (e.g., "100/100", "50/100 slp", "0 fnt")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpStatus {
    pub current: u32,
    /// Zero when the pokemon has fainted
    pub max: u32,
    /// Status condition (slp, par, brn, psn, tox, frz, fnt)
    pub status: Option<String>,
}

impl HpStatus {
    /// Parse an HP status string like "100/100", "50/100 slp", or "0 fnt".
    ///
    /// A bare "0" means fainted and yields 0/0. Any other shape without a
    /// slash is unparseable.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let hp_part = parts.next()?;
        let status = parts.next().map(str::to_string);

        if hp_part == "0" {
            return Some(HpStatus {
                current: 0,
                max: 0,
                status,
            });
        }

        let (current_str, max_str) = hp_part.split_once('/')?;
        Some(HpStatus {
            current: current_str.parse().ok()?,
            max: max_str.parse().ok()?,
            status,
        })
    }

    pub fn is_fainted(&self) -> bool {
        self.current == 0
    }
}

/// Value of a `[from] EFFECT` tag among trailing arguments
pub fn parse_from_tag(args: &[String], start: usize) -> Option<String> {
    args.iter()
        .skip(start)
        .find_map(|arg| arg.strip_prefix("[from]"))
        .map(|effect| effect.trim().to_string())
}

/// Helper to parse a PokemonIdent from event arguments
pub fn parse_ident(args: &[String], index: usize) -> Result<PokemonIdent, anyhow::Error> {
    args.get(index)
        .and_then(|s| PokemonIdent::parse(s))
        .ok_or_else(|| ParseError::MissingField("pokemon".to_string()).into())
}

/// Helper to parse PokemonDetails from event arguments
pub fn parse_details(args: &[String], index: usize) -> PokemonDetails {
    args.get(index)
        .map(|s| PokemonDetails::parse(s))
        .unwrap_or_default()
}

/// Helper to parse HpStatus from event arguments
pub fn parse_hp_status(args: &[String], index: usize) -> Option<HpStatus> {
    args.get(index).and_then(|s| HpStatus::parse(s))
}

/// Helper to read a plain text argument, empty when absent
pub fn parse_text(args: &[String], index: usize) -> String {
    args.get(index).cloned().unwrap_or_default()
}
