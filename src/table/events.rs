//! Events broadcast to whoever is watching a table. The transport that
//! frames these for clients lives outside this crate; subscribers get the
//! same payload regardless.

use serde::{Deserialize, Serialize};

use crate::game::GameSnapshot;
use crate::poker::{Card, HandRank};

/// One showdown hand as shown to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownHand {
    pub player: String,
    pub rank: HandRank,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableEvent {
    /// Full public state, sent after every mutation.
    State(GameSnapshot),
    /// A message for one seat only, e.g. an action-conversion notice.
    PlayerNotice { player: String, message: String },
    /// The table is advancing itself because betting is finished.
    AutoAdvance { message: String },
    /// Outcome of a showdown.
    ShowdownResult {
        winners: Vec<String>,
        winnings_each: u32,
        pot_remainder: u32,
        hands: Vec<ShowdownHand>,
    },
    /// The match is over.
    GameEnded { winner: Option<String> },
}
