//! A standard 52-card deck, shuffled on construction and depleted by dealing.

use rand::seq::SliceRandom;

use crate::error::{EngineError, Result};
use crate::poker::card::{Card, Rank, Suit};

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A full 52-card deck in uniformly random order.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        let mut deck = Deck { cards };
        deck.shuffle();
        deck
    }

    /// Re-randomize whatever cards are still held.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Remove and return the top card.
    pub fn deal(&mut self) -> Result<Card> {
        self.cards.pop().ok_or_else(|| {
            tracing::error!("attempted to deal from an empty deck");
            EngineError::DeckExhausted {
                requested: 1,
                available: 0,
            }
        })
    }

    /// Remove and return `n` cards. Either all `n` come back or the deck is
    /// left untouched.
    pub fn deal_many(&mut self, n: usize) -> Result<Vec<Card>> {
        if n == 0 {
            tracing::error!("invalid number of cards requested: 0");
            return Err(EngineError::InvalidCardCount);
        }
        if n > self.cards.len() {
            tracing::error!(
                requested = n,
                available = self.cards.len(),
                "not enough cards in deck"
            );
            return Err(EngineError::DeckExhausted {
                requested: n,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.split_off(self.cards.len() - n))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fresh_deck_deals_52_distinct_cards() {
        let mut deck = Deck::new();
        let mut seen = HashSet::new();
        for _ in 0..52 {
            let card = deck.deal().expect("deck should hold 52 cards");
            assert!(seen.insert(card), "duplicate card dealt: {}", card);
        }
        assert_eq!(seen.len(), 52);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn dealing_from_empty_deck_fails() {
        let mut deck = Deck::new();
        deck.deal_many(52).unwrap();
        assert_eq!(
            deck.deal(),
            Err(EngineError::DeckExhausted {
                requested: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn deal_many_rejects_zero() {
        let mut deck = Deck::new();
        assert_eq!(deck.deal_many(0), Err(EngineError::InvalidCardCount));
        assert_eq!(deck.remaining(), 52);
    }

    #[test]
    fn deal_many_is_all_or_nothing() {
        let mut deck = Deck::new();
        deck.deal_many(50).unwrap();
        let err = deck.deal_many(5).unwrap_err();
        assert_eq!(
            err,
            EngineError::DeckExhausted {
                requested: 5,
                available: 2,
            }
        );
        // the failed request must not have consumed anything
        assert_eq!(deck.remaining(), 2);
    }

    #[test]
    fn deal_many_returns_exact_count() {
        let mut deck = Deck::new();
        let flop = deck.deal_many(3).unwrap();
        assert_eq!(flop.len(), 3);
        assert_eq!(deck.remaining(), 49);
    }
}
