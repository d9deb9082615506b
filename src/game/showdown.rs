//! Showdown resolution: hand evaluation, winner determination, and pot
//! distribution.

use std::cmp::Ordering;

use crate::error::Result;
use crate::game::engine::{Game, Phase};
use crate::poker::evaluation::{best_hand, is_better_hand_of_same_rank};

impl Game {
    /// Resolve the hand. With a single unfolded seat left the pot goes to
    /// it without any evaluation; otherwise every remaining hand is
    /// evaluated, ranked, and the pot is split among the seats tied for
    /// best. Returns the winners as indices into the full roster.
    pub fn conduct_showdown(&mut self) -> Result<Vec<usize>> {
        tracing::info!(game = %self.id, pot = self.pot, "conducting showdown");
        self.phase = Phase::Showdown;

        let contenders: Vec<usize> = self
            .active
            .iter()
            .copied()
            .filter(|&i| !self.players[i].has_folded())
            .collect();

        if contenders.len() == 1 {
            tracing::info!(
                game = %self.id,
                winner = %self.players[contenders[0]].name,
                "single seat left, auto-win"
            );
            self.distribute_pot(&contenders);
            return Ok(contenders);
        }

        for &idx in &contenders {
            let result = best_hand(&self.community, self.players[idx].hole_cards())?;
            tracing::debug!(
                game = %self.id,
                player = %self.players[idx].name,
                rank = %result.rank(),
                "hand evaluated"
            );
            self.players[idx].set_best_hand(result);
        }

        let winners = self.determine_winners(contenders);
        tracing::info!(
            game = %self.id,
            winners = ?winners.iter().map(|&i| &self.players[i].name).collect::<Vec<_>>(),
            "winners determined"
        );
        self.distribute_pot(&winners);
        Ok(winners)
    }

    /// Rank the contenders best-first (category, then the same-rank
    /// comparator) and collect everyone tied with the leader.
    fn determine_winners(&self, mut contenders: Vec<usize>) -> Vec<usize> {
        contenders.sort_by(|&a, &b| {
            let (pa, pb) = (&self.players[a], &self.players[b]);
            pb.hand_rank().cmp(&pa.hand_rank()).then_with(|| {
                match (pa.best_hand(), pb.best_hand()) {
                    (Some(ha), Some(hb)) => {
                        let rank = pa.hand_rank();
                        if is_better_hand_of_same_rank(ha.cards(), hb.cards(), rank) {
                            Ordering::Less
                        } else if is_better_hand_of_same_rank(hb.cards(), ha.cards(), rank) {
                            Ordering::Greater
                        } else {
                            Ordering::Equal
                        }
                    }
                    _ => Ordering::Equal,
                }
            })
        });

        let Some(&best) = contenders.first() else {
            return Vec::new();
        };
        let best_rank = self.players[best].hand_rank();
        let mut winners = vec![best];
        for &idx in &contenders[1..] {
            let p = &self.players[idx];
            if p.hand_rank() != best_rank {
                break;
            }
            let tied = match (self.players[best].best_hand(), p.best_hand()) {
                (Some(hb), Some(hp)) => {
                    !is_better_hand_of_same_rank(hb.cards(), hp.cards(), best_rank)
                        && !is_better_hand_of_same_rank(hp.cards(), hb.cards(), best_rank)
                }
                _ => false,
            };
            if tied {
                winners.push(idx);
            } else {
                break;
            }
        }
        winners
    }

    /// Split the pot by integer division; the remainder is not paid out and
    /// stays in the pot for the next hand.
    fn distribute_pot(&mut self, winners: &[usize]) {
        if winners.is_empty() {
            tracing::warn!(game = %self.id, "no winners to distribute pot to");
            return;
        }
        let share = self.pot / winners.len() as u32;
        for &idx in winners {
            self.players[idx].add_chips(share);
            tracing::debug!(
                game = %self.id,
                player = %self.players[idx].name,
                share,
                "pot share paid"
            );
        }
        self.pot %= winners.len() as u32;
        if self.pot > 0 {
            tracing::debug!(game = %self.id, remainder = self.pot, "pot remainder carries over");
        }
    }
}
