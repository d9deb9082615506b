//! Hand initialization and community-card dealing.

use crate::error::Result;
use crate::game::engine::{Game, Phase};
use crate::poker::Deck;

impl Game {
    /// Start over for a new hand: fresh shuffled deck, cleared board and
    /// bets, phase back to pre-flop, and the active roster rebuilt from
    /// seats that are still in the match.
    ///
    /// The pot is deliberately not cleared: a remainder left by an uneven
    /// split carries into the next hand.
    pub fn reset_for_new_hand(&mut self) {
        self.deck = Deck::new();
        self.community.clear();
        self.current_highest_bet = 0;
        self.phase = Phase::Preflop;
        self.acted_this_round.clear();
        self.hand_no += 1;

        self.active.clear();
        for idx in 0..self.players.len() {
            if !self.players[idx].is_out() {
                self.players[idx].reset_for_hand();
                self.active.push(idx);
            }
        }

        if self.active.len() <= 1 {
            tracing::info!(game = %self.id, remaining = self.active.len(), "not enough seats for a new hand");
            self.game_over = true;
        }
    }

    /// Give every active seat its two private cards.
    pub fn deal_hole_cards(&mut self) -> Result<()> {
        for &idx in &self.active {
            let cards = self.deck.deal_many(2)?;
            tracing::debug!(
                game = %self.id,
                player = %self.players[idx].name,
                "dealt hole cards"
            );
            self.players[idx].receive_hole_cards(cards);
        }
        Ok(())
    }

    /// Deal the first three community cards and open the flop betting round.
    pub fn deal_flop(&mut self) -> Result<()> {
        let cards = self.deck.deal_many(3)?;
        self.community.extend(cards);
        self.phase = Phase::Flop;
        tracing::info!(game = %self.id, board = ?self.community, "flop dealt");
        self.reset_bets_for_round();
        Ok(())
    }

    /// Deal the fourth community card and open the turn betting round.
    pub fn deal_turn(&mut self) -> Result<()> {
        let card = self.deck.deal()?;
        self.community.push(card);
        self.phase = Phase::Turn;
        tracing::info!(game = %self.id, card = %card, "turn dealt");
        self.reset_bets_for_round();
        Ok(())
    }

    /// Deal the fifth community card and open the river betting round.
    pub fn deal_river(&mut self) -> Result<()> {
        let card = self.deck.deal()?;
        self.community.push(card);
        self.phase = Phase::River;
        tracing::info!(game = %self.id, card = %card, "river dealt");
        self.reset_bets_for_round();
        Ok(())
    }

    /// Zero every active seat's round bet and the table's highest bet, and
    /// forget who has acted; the new betting round starts clean.
    pub fn reset_bets_for_round(&mut self) {
        for &idx in &self.active {
            self.players[idx].reset_current_bet();
        }
        self.current_highest_bet = 0;
        self.acted_this_round.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::{Player, PlayerAction};

    fn test_players(count: usize, chips: u32) -> Vec<Player> {
        (0..count)
            .map(|i| Player::new(format!("Player {}", i + 1), format!("p{}", i + 1), chips).unwrap())
            .collect()
    }

    fn fresh_game(count: usize) -> Game {
        let mut game = Game::new("g1", test_players(count, 1000), 10, 20).unwrap();
        game.reset_for_new_hand();
        game
    }

    #[test]
    fn hole_cards_go_out_in_pairs() {
        let mut game = fresh_game(4);
        game.deal_hole_cards().unwrap();
        for p in game.active_players() {
            assert_eq!(p.hole_cards().len(), 2);
        }
        assert_eq!(game.deck.remaining(), 52 - 8);
    }

    #[test]
    fn community_grows_with_each_street() {
        let mut game = fresh_game(3);
        game.deal_hole_cards().unwrap();

        game.deal_flop().unwrap();
        assert_eq!(game.community().len(), 3);
        assert_eq!(game.phase(), Phase::Flop);

        game.deal_turn().unwrap();
        assert_eq!(game.community().len(), 4);
        assert_eq!(game.phase(), Phase::Turn);

        game.deal_river().unwrap();
        assert_eq!(game.community().len(), 5);
        assert_eq!(game.phase(), Phase::River);
    }

    #[test]
    fn streets_reset_round_betting_state() {
        let mut game = fresh_game(3);
        game.deal_hole_cards().unwrap();
        let idx = game.active[0];
        game.players[idx].do_action(PlayerAction::Bet, 50, &mut game.pot);
        game.current_highest_bet = 50;
        game.acted_this_round.insert("p1".into());

        game.deal_flop().unwrap();
        assert_eq!(game.current_highest_bet(), 0);
        assert!(game.acted_this_round.is_empty());
        assert!(game.active_players().all(|p| p.current_bet() == 0));
    }

    #[test]
    fn reset_for_new_hand_rebuilds_the_roster_and_keeps_the_pot() {
        let mut game = fresh_game(3);
        game.deal_hole_cards().unwrap();
        game.pot = 1; // remainder from an uneven split
        let idx = game.active[1];
        game.players[idx].do_action(PlayerAction::Fold, 0, &mut game.pot);

        let hand_before = game.hand_no();
        game.reset_for_new_hand();
        assert_eq!(game.pot(), 1, "split remainder carries into the next hand");
        assert_eq!(game.phase(), Phase::Preflop);
        assert_eq!(game.community().len(), 0);
        assert_eq!(game.hand_no(), hand_before + 1);
        assert!(game.active_players().all(|p| !p.has_folded()));
        assert!(game.active_players().all(|p| p.hole_cards().is_empty()));
    }

    #[test]
    fn reset_with_one_seat_left_ends_the_match() {
        let mut game = fresh_game(2);
        game.players[1].mark_out();
        game.reset_for_new_hand();
        assert!(game.game_over());
    }
}
