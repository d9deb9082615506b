//! Hand strength categories and the evaluator's result type.

use serde::{Deserialize, Serialize};

use crate::poker::card::Card;

/// Poker hand categories ordered by strength. `NoHand` is the state of a
/// seat whose cards were never evaluated; `evaluate_hand` itself never
/// returns anything below `HighCard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    NoHand,
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandRank {
    /// Standard hand-strength relation.
    pub fn beats(self, other: HandRank) -> bool {
        self > other
    }
}

impl std::fmt::Display for HandRank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            HandRank::NoHand => "no hand",
            HandRank::HighCard => "high card",
            HandRank::OnePair => "one pair",
            HandRank::TwoPair => "two pair",
            HandRank::ThreeOfAKind => "three of a kind",
            HandRank::Straight => "straight",
            HandRank::Flush => "flush",
            HandRank::FullHouse => "full house",
            HandRank::FourOfAKind => "four of a kind",
            HandRank::StraightFlush => "straight flush",
            HandRank::RoyalFlush => "royal flush",
        };
        write!(f, "{}", s)
    }
}

/// The five cards picked by the evaluator together with their rank.
///
/// Only the evaluation module constructs these; everything else reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluatedHand {
    cards: [Card; 5],
    rank: HandRank,
}

impl EvaluatedHand {
    pub(crate) fn new(cards: [Card; 5], rank: HandRank) -> Self {
        EvaluatedHand { cards, rank }
    }

    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }

    pub fn rank(&self) -> HandRank {
        self.rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_ordering_matches_poker_strength() {
        assert!(HandRank::RoyalFlush.beats(HandRank::StraightFlush));
        assert!(HandRank::StraightFlush.beats(HandRank::FourOfAKind));
        assert!(HandRank::FourOfAKind.beats(HandRank::FullHouse));
        assert!(HandRank::FullHouse.beats(HandRank::Flush));
        assert!(HandRank::Flush.beats(HandRank::Straight));
        assert!(HandRank::Straight.beats(HandRank::ThreeOfAKind));
        assert!(HandRank::ThreeOfAKind.beats(HandRank::TwoPair));
        assert!(HandRank::TwoPair.beats(HandRank::OnePair));
        assert!(HandRank::OnePair.beats(HandRank::HighCard));
        assert!(HandRank::HighCard.beats(HandRank::NoHand));
    }

    #[test]
    fn beats_is_irreflexive() {
        assert!(!HandRank::Flush.beats(HandRank::Flush));
    }
}
