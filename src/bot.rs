//! Simple probabilistic bot used by the demo binary to drive full matches
//! through the table API.

use rand::random;

use crate::game::{Decision, GameSnapshot, Phase, PlayerAction};

/// What a bot needs to know about its own situation to pick an action.
#[derive(Debug, Clone)]
pub struct BotContext {
    pub stack: u32,
    /// Chips needed to match the current highest bet.
    pub call_amount: u32,
    pub current_highest_bet: u32,
    pub big_blind: u32,
    pub phase: Phase,
}

impl BotContext {
    /// Build the context for `player_name` out of a table snapshot, if that
    /// seat exists.
    pub fn from_snapshot(snapshot: &GameSnapshot, player_name: &str) -> Option<Self> {
        let seat = snapshot.players.iter().find(|p| p.name == player_name)?;
        Some(BotContext {
            stack: seat.chips,
            call_amount: snapshot.current_highest_bet.saturating_sub(seat.current_bet),
            current_highest_bet: snapshot.current_highest_bet,
            big_blind: snapshot.big_blind,
            phase: snapshot.phase,
        })
    }
}

/// Basic probabilistic decision making: mostly calls, occasional opening
/// bets and raises, folds more often as the price goes up.
#[derive(Debug, Clone)]
pub struct SimpleBot {
    pub base_fold_chance: f64,
    pub max_fold_chance: f64,
}

impl Default for SimpleBot {
    fn default() -> Self {
        SimpleBot {
            base_fold_chance: 0.10,
            max_fold_chance: 0.95,
        }
    }
}

impl SimpleBot {
    pub fn decide(&self, context: &BotContext) -> Decision {
        if context.call_amount == 0 {
            // nothing to call: check sometimes, otherwise open
            if random::<f64>() < 0.3 {
                return Decision::new(PlayerAction::Check, 0);
            }
            let options = [
                context.big_blind,
                context.big_blind * 2,
                context.big_blind * 3,
            ];
            let pick = (random::<f32>() * options.len() as f32) as usize;
            let amount = options[pick.min(options.len() - 1)].min(context.stack);
            if amount == 0 {
                return Decision::new(PlayerAction::Check, 0);
            }
            return Decision::new(PlayerAction::Bet, amount);
        }

        if context.call_amount >= context.stack {
            // calling is already all of it
            return Decision::new(PlayerAction::Call, 0);
        }

        // the bigger the bet relative to the stack, the more likely a fold
        let relative = context.call_amount as f64 / (context.stack + context.call_amount) as f64;
        let fold_chance =
            (self.base_fold_chance + relative * (1.0 - self.base_fold_chance)).min(self.max_fold_chance);
        if random::<f64>() < fold_chance {
            return Decision::new(PlayerAction::Fold, 0);
        }

        let raise_chance = 0.2;
        if random::<f64>() < raise_chance {
            let raise_by = context.big_blind.max(context.current_highest_bet / 2);
            let amount = (context.call_amount + raise_by).min(context.stack);
            if amount > context.call_amount {
                return Decision::new(PlayerAction::Raise, amount);
            }
        }
        Decision::new(PlayerAction::Call, 0)
    }
}
