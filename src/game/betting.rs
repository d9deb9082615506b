//! Blinds, decision processing, and betting-round completion.

use crate::error::{EngineError, Result};
use crate::game::engine::Game;
use crate::game::player::{Decision, PlayerAction};

impl Game {
    /// Charge the small and big blind at the start of a hand. A seat whose
    /// stack cannot cover its blind goes all-in instead, so stacks never go
    /// negative. The big blind becomes the bet to match.
    pub fn post_blinds(&mut self) {
        if self.active.len() < 2 {
            return;
        }
        let sb_idx = self.active[self.small_blind_pos];
        let bb_idx = self.active[self.big_blind_pos];

        for (idx, blind) in [(sb_idx, self.small_blind), (bb_idx, self.big_blind)] {
            let player = &mut self.players[idx];
            if player.chips() <= blind {
                player.do_action(PlayerAction::AllIn, 0, &mut self.pot);
                tracing::info!(
                    game = %self.id,
                    player = %self.players[idx].name,
                    "short stack posted blind all-in"
                );
            } else {
                player.do_action(PlayerAction::Bet, blind, &mut self.pot);
            }
        }

        self.current_highest_bet = self.big_blind;
        tracing::debug!(
            game = %self.id,
            pot = self.pot,
            current_highest_bet = self.current_highest_bet,
            "blinds posted"
        );
    }

    /// Process the current actor's decision and update the table state.
    ///
    /// When some seat is already all-in, a raise (or an all-in that could
    /// afford a plain call) is downgraded to a call, and the returned notice
    /// tells the actor why. A raise that would not exceed the current
    /// highest bet is rejected before any chips move.
    pub fn process_player_decision(&mut self, decision: Decision) -> Result<Option<String>> {
        let seat = self
            .active
            .get(self.current_pos)
            .copied()
            .ok_or_else(|| EngineError::Unauthorized("No seat is due to act".into()))?;

        let has_all_in_players = self
            .active_players()
            .any(|p| p.is_all_in() && !p.has_folded());

        let player = &self.players[seat];
        let mut action = decision.action;
        let mut conversion_notice = None;

        if has_all_in_players
            && matches!(action, PlayerAction::Raise | PlayerAction::AllIn)
        {
            let call_amount = self.current_highest_bet.saturating_sub(player.current_bet());
            if action == PlayerAction::AllIn && player.chips() <= call_amount {
                // cannot even cover the call, so the all-in stands
                tracing::debug!(
                    game = %self.id,
                    player = %player.name,
                    "all-in below the call amount allowed"
                );
            } else {
                tracing::info!(
                    game = %self.id,
                    player = %player.name,
                    attempted = %action,
                    "converting to call because of all-in players"
                );
                conversion_notice = Some(format!(
                    "Your {} was converted to a call because there are all-in players.",
                    action
                ));
                action = PlayerAction::Call;
            }
        }

        if action == PlayerAction::Raise {
            let total_bet_after_raise = player.current_bet() + decision.amount;
            if total_bet_after_raise <= self.current_highest_bet {
                tracing::warn!(
                    game = %self.id,
                    player = %player.name,
                    attempted_total = total_bet_after_raise,
                    current_highest_bet = self.current_highest_bet,
                    "invalid raise"
                );
                return Err(EngineError::Unauthorized(format!(
                    "Raise amount must result in a bet higher than current highest bet of {}. \
                     Your current bet is {}, so you need to raise by at least {}",
                    self.current_highest_bet,
                    player.current_bet(),
                    self.current_highest_bet - player.current_bet() + 1
                )));
            }
        }

        let amount = match action {
            PlayerAction::Call => self.current_highest_bet.saturating_sub(player.current_bet()),
            PlayerAction::Bet | PlayerAction::Raise => decision.amount,
            _ => 0,
        };

        let player = &mut self.players[seat];
        player.do_action(action, amount, &mut self.pot);
        if player.current_bet() > self.current_highest_bet {
            self.current_highest_bet = player.current_bet();
        }
        let player_id = player.id.clone();
        self.acted_this_round.insert(player_id);

        Ok(conversion_notice)
    }

    /// A betting round is complete when every seat still able to act has
    /// acted at least once this round AND nobody eligible is below the
    /// current highest bet. The first condition matters on its own: with
    /// every bet at zero the second is trivially true, yet an all-check
    /// round only ends once everyone has actually checked.
    pub fn is_betting_round_complete(&self) -> bool {
        let everyone_has_acted = self
            .active_players()
            .filter(|p| !p.has_folded() && !p.is_all_in())
            .all(|p| self.acted_this_round.contains(&p.id));
        if !everyone_has_acted {
            tracing::debug!(game = %self.id, "betting round open: not everyone has acted");
            return false;
        }

        let someone_needs_to_act = self.active_players().any(|p| {
            p.current_bet() < self.current_highest_bet && !p.has_folded() && !p.is_all_in()
        });
        tracing::debug!(
            game = %self.id,
            current_highest_bet = self.current_highest_bet,
            someone_needs_to_act,
            "betting round completion check"
        );
        !someone_needs_to_act
    }
}
