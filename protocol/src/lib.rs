//! Tokenizer and typed events for Pokemon Showdown battle logs.
//!
//! Raw log text flows through two stages:
//!
//! ```text
//! raw log text
//!      │  process_log / LogLines
//!      ▼
//! LogLine { command, args, raw }   (noise filtered, stops after win/tie/forcewin)
//!      │  BattleEvent::parse
//!      ▼
//! BattleEvent                      (closed enum, one variant per consumed command)
//! ```

use thiserror::Error;

pub mod event;
pub mod log;

pub use event::{BattleEvent, HpStatus, PokemonDetails, PokemonIdent, Side};
pub use log::{LogLine, LogLines, process_log};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}
