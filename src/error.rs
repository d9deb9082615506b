//! Typed errors shared by the engine and table layers.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed construction input: bad game id, too few players, invalid blinds.
    #[error("{0}")]
    Validation(String),

    /// The deck cannot satisfy a deal.
    #[error("not enough cards in deck: requested {requested}, available {available}")]
    DeckExhausted { requested: usize, available: usize },

    /// A card count that is not positive.
    #[error("number of cards must be positive")]
    InvalidCardCount,

    /// Hand evaluation requires exactly five cards.
    #[error("invalid number of cards: {0}, expected 5")]
    InvalidHandSize(usize),

    /// An action the acting seat is not allowed to take right now.
    #[error("{0}")]
    Unauthorized(String),

    /// Lookup of an unknown table.
    #[error("game not found: {0}")]
    GameNotFound(String),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
