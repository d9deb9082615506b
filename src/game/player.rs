//! One seat at the table: chips, bets, hole cards, and per-hand flags.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::poker::{Card, EvaluatedHand, HandRank};

/// The closed set of betting actions a seat can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            PlayerAction::Fold => "fold",
            PlayerAction::Check => "check",
            PlayerAction::Call => "call",
            PlayerAction::Bet => "bet",
            PlayerAction::Raise => "raise",
            PlayerAction::AllIn => "all-in",
        };
        write!(f, "{}", s)
    }
}

/// An action together with the chip amount it carries. The amount is only
/// meaningful for Bet and Raise; the engine computes the real amount for
/// Call and ignores it elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: PlayerAction,
    pub amount: u32,
}

impl Decision {
    pub fn new(action: PlayerAction, amount: u32) -> Self {
        Decision { action, amount }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
    chips: u32,
    current_bet: u32,
    hole_cards: Vec<Card>,
    has_folded: bool,
    is_all_in: bool,
    is_out: bool,
    best_hand: Option<EvaluatedHand>,
}

impl Player {
    pub fn new(name: impl Into<String>, id: impl Into<String>, chips: u32) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EngineError::Validation("Player name required".into()));
        }
        Ok(Player {
            id: id.into(),
            name,
            chips,
            current_bet: 0,
            hole_cards: Vec::with_capacity(2),
            has_folded: false,
            is_all_in: false,
            is_out: false,
            best_hand: None,
        })
    }

    pub fn chips(&self) -> u32 {
        self.chips
    }

    /// Chips committed in the current betting round (not the whole hand).
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    pub fn hole_cards(&self) -> &[Card] {
        &self.hole_cards
    }

    pub fn has_folded(&self) -> bool {
        self.has_folded
    }

    pub fn is_all_in(&self) -> bool {
        self.is_all_in
    }

    /// Permanently eliminated from the match. Never cleared once set.
    pub fn is_out(&self) -> bool {
        self.is_out
    }

    pub fn best_hand(&self) -> Option<&EvaluatedHand> {
        self.best_hand.as_ref()
    }

    /// Rank of the showdown hand, or `NoHand` before evaluation.
    pub fn hand_rank(&self) -> HandRank {
        self.best_hand
            .as_ref()
            .map(|h| h.rank())
            .unwrap_or(HandRank::NoHand)
    }

    pub(crate) fn receive_hole_cards(&mut self, cards: Vec<Card>) {
        self.hole_cards = cards;
    }

    pub(crate) fn set_best_hand(&mut self, hand: EvaluatedHand) {
        self.best_hand = Some(hand);
    }

    pub(crate) fn mark_out(&mut self) {
        self.is_out = true;
    }

    /// Apply a betting action, moving chips into the pot as needed.
    ///
    /// Monetary actions are capped at the remaining stack, and a stack that
    /// reaches zero marks the seat all-in, so chips never go negative.
    pub fn do_action(&mut self, action: PlayerAction, amount: u32, pot: &mut u32) {
        match action {
            PlayerAction::Fold => self.has_folded = true,
            PlayerAction::Check => {}
            PlayerAction::Call | PlayerAction::Bet | PlayerAction::Raise => {
                self.commit(amount, pot);
            }
            PlayerAction::AllIn => {
                let stack = self.chips;
                self.commit(stack, pot);
                self.is_all_in = true;
            }
        }
    }

    /// Move chips into the pot without any action bookkeeping. Used to top
    /// up a seat's bet to the table's current highest bet.
    pub fn pay_chips(&mut self, pot: &mut u32, amount: u32) {
        self.commit(amount, pot);
    }

    fn commit(&mut self, amount: u32, pot: &mut u32) {
        let pay = amount.min(self.chips);
        self.chips -= pay;
        self.current_bet += pay;
        *pot += pay;
        if self.chips == 0 && pay > 0 {
            self.is_all_in = true;
        }
    }

    /// Credit winnings (or a refund) to the stack.
    pub fn add_chips(&mut self, amount: u32) {
        self.chips += amount;
    }

    /// Per-hand reset: cards, flags, bet, and the showdown cache go; the
    /// stack, identity, and elimination status stay.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.best_hand = None;
        self.has_folded = false;
        self.is_all_in = false;
        self.current_bet = 0;
    }

    /// Between betting rounds within the same hand.
    pub fn reset_current_bet(&mut self) {
        self.current_bet = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new("TestPlayer", "player123", 1000).unwrap()
    }

    #[test]
    fn creation_and_initial_state() {
        let p = player();
        assert_eq!(p.name, "TestPlayer");
        assert_eq!(p.id, "player123");
        assert_eq!(p.chips(), 1000);
        assert_eq!(p.current_bet(), 0);
        assert!(!p.has_folded());
        assert!(!p.is_all_in());
        assert!(!p.is_out());
        assert!(p.hole_cards().is_empty());
        assert_eq!(p.hand_rank(), HandRank::NoHand);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Player::new("   ", "p", 1000).unwrap_err();
        assert_eq!(err, EngineError::Validation("Player name required".into()));
    }

    #[test]
    fn fold_leaves_money_alone() {
        let mut p = player();
        let mut pot = 100;
        p.do_action(PlayerAction::Fold, 0, &mut pot);
        assert_eq!(pot, 100);
        assert_eq!(p.chips(), 1000);
        assert!(p.has_folded());
    }

    #[test]
    fn check_has_no_monetary_effect() {
        let mut p = player();
        let mut pot = 100;
        p.do_action(PlayerAction::Check, 0, &mut pot);
        assert_eq!(pot, 100);
        assert_eq!(p.chips(), 1000);
        assert_eq!(p.current_bet(), 0);
    }

    #[test]
    fn bet_moves_chips_to_pot() {
        let mut p = player();
        let mut pot = 100;
        p.do_action(PlayerAction::Bet, 50, &mut pot);
        assert_eq!(pot, 150);
        assert_eq!(p.chips(), 950);
        assert_eq!(p.current_bet(), 50);
    }

    #[test]
    fn bets_accumulate_within_a_round() {
        let mut p = player();
        let mut pot = 0;
        p.do_action(PlayerAction::Bet, 50, &mut pot);
        p.do_action(PlayerAction::Raise, 100, &mut pot);
        assert_eq!(p.current_bet(), 150);
        assert_eq!(p.chips(), 850);
        assert_eq!(pot, 150);
    }

    #[test]
    fn all_in_commits_the_entire_stack() {
        let mut p = player();
        let mut pot = 100;
        p.do_action(PlayerAction::AllIn, 0, &mut pot);
        assert_eq!(pot, 1100);
        assert_eq!(p.chips(), 0);
        assert!(p.is_all_in());
        assert_eq!(p.current_bet(), 1000);
    }

    #[test]
    fn call_capped_at_stack_marks_all_in() {
        let mut p = Player::new("Short", "s", 30).unwrap();
        let mut pot = 0;
        p.do_action(PlayerAction::Call, 100, &mut pot);
        assert_eq!(p.chips(), 0);
        assert_eq!(p.current_bet(), 30);
        assert_eq!(pot, 30);
        assert!(p.is_all_in());
    }

    #[test]
    fn pay_chips_tops_up_without_action_flags() {
        let mut p = player();
        let mut pot = 100;
        p.pay_chips(&mut pot, 250);
        assert_eq!(pot, 350);
        assert_eq!(p.chips(), 750);
        assert_eq!(p.current_bet(), 250);
        assert!(!p.has_folded());
    }

    #[test]
    fn add_chips_credits_the_stack() {
        let mut p = player();
        p.add_chips(500);
        assert_eq!(p.chips(), 1500);
    }

    #[test]
    fn reset_for_hand_preserves_stack_and_elimination() {
        let mut p = player();
        let mut pot = 0;
        p.do_action(PlayerAction::Bet, 200, &mut pot);
        p.do_action(PlayerAction::Fold, 0, &mut pot);
        p.mark_out();
        p.reset_for_hand();
        assert_eq!(p.chips(), 800);
        assert_eq!(p.current_bet(), 0);
        assert!(!p.has_folded());
        assert!(!p.is_all_in());
        assert!(p.is_out(), "elimination is permanent");
    }

    #[test]
    fn reset_current_bet_only_clears_the_round_bet() {
        let mut p = player();
        let mut pot = 0;
        p.do_action(PlayerAction::Bet, 200, &mut pot);
        p.reset_current_bet();
        assert_eq!(p.current_bet(), 0);
        assert_eq!(p.chips(), 800);
    }
}
