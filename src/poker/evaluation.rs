//! Five-card hand evaluation and the 5-of-7 best-hand search.
//!
//! Everything here is pure: functions from card sets to ranks, with no game
//! state involved. `best_hand` enumerates every 5-card subset of the pooled
//! hole + community cards (1, 6 or 21 combinations depending on the street)
//! and keeps the strongest one.

use crate::error::{EngineError, Result};
use crate::poker::card::{Card, Rank};
use crate::poker::hand::{EvaluatedHand, HandRank};

/// Evaluate exactly five cards into their hand rank.
///
/// Checks run in descending strength order and the first match wins, so an
/// ace-high straight flush is reported as a royal flush, never a straight
/// flush. The wheel (A-2-3-4-5) counts as a straight.
pub fn evaluate_hand(cards: &[Card]) -> Result<HandRank> {
    if cards.len() != 5 {
        tracing::error!(size = cards.len(), "invalid hand size, expected 5");
        return Err(EngineError::InvalidHandSize(cards.len()));
    }

    let mut hand: [Card; 5] = [cards[0], cards[1], cards[2], cards[3], cards[4]];
    hand.sort_unstable_by_key(|c| c.value());

    let rank = if is_royal_flush(&hand) {
        HandRank::RoyalFlush
    } else if is_flush(&hand) && is_straight(&hand) {
        HandRank::StraightFlush
    } else if has_count(&hand, 4) {
        HandRank::FourOfAKind
    } else if is_full_house(&hand) {
        HandRank::FullHouse
    } else if is_flush(&hand) {
        HandRank::Flush
    } else if is_straight(&hand) {
        HandRank::Straight
    } else if has_count(&hand, 3) {
        HandRank::ThreeOfAKind
    } else if is_two_pair(&hand) {
        HandRank::TwoPair
    } else if has_count(&hand, 2) {
        HandRank::OnePair
    } else {
        HandRank::HighCard
    };
    Ok(rank)
}

/// Find the best five cards out of hole + community (5 to 7 cards pooled).
///
/// Subsets tied at the same non-high-card rank are settled with
/// [`is_better_hand_of_same_rank`]. When nothing better than high card
/// exists, the result is the five highest cards of the whole pool rather
/// than whichever high-card subset the enumeration happened to keep.
pub fn best_hand(community: &[Card], hole: &[Card]) -> Result<EvaluatedHand> {
    let mut pool: Vec<Card> = hole.to_vec();
    pool.extend_from_slice(community);
    if pool.len() < 5 {
        return Err(EngineError::InvalidHandSize(pool.len()));
    }

    let n = pool.len();
    let mut best: Option<([Card; 5], HandRank)> = None;
    for i in 0..n - 4 {
        for j in i + 1..n - 3 {
            for k in j + 1..n - 2 {
                for l in k + 1..n - 1 {
                    for m in l + 1..n {
                        let mut subset = [pool[i], pool[j], pool[k], pool[l], pool[m]];
                        subset.sort_unstable_by_key(|c| c.value());
                        let rank = evaluate_hand(&subset)?;
                        best = Some(match best {
                            None => (subset, rank),
                            Some((held, held_rank)) => {
                                if rank.beats(held_rank) {
                                    (subset, rank)
                                } else if rank == held_rank
                                    && rank != HandRank::HighCard
                                    && is_better_hand_of_same_rank(&subset, &held, rank)
                                {
                                    (subset, rank)
                                } else {
                                    (held, held_rank)
                                }
                            }
                        });
                    }
                }
            }
        }
    }

    let (mut cards, rank) = best.ok_or(EngineError::InvalidHandSize(n))?;
    if rank == HandRank::HighCard {
        cards = best_high_card_hand(&pool);
    }
    Ok(EvaluatedHand::new(cards, rank))
}

/// Strict "a beats b" for two hands already known to share `rank`.
///
/// Returns false when the hands are identical at every decisive position
/// (a true tie), and false for high-card/no-hand where no tie-break is
/// defined. Card order in the inputs does not matter.
pub fn is_better_hand_of_same_rank(a: &[Card], b: &[Card], rank: HandRank) -> bool {
    match rank {
        HandRank::FourOfAKind => compare_four_of_a_kind(a, b),
        HandRank::FullHouse => compare_full_house(a, b),
        HandRank::Flush => compare_flush(a, b),
        HandRank::Straight | HandRank::StraightFlush => compare_straight(a, b),
        HandRank::ThreeOfAKind => compare_three_of_a_kind(a, b),
        HandRank::TwoPair => compare_two_pair(a, b),
        HandRank::OnePair => compare_one_pair(a, b),
        _ => false,
    }
}

// ===== category checks (sorted ascending input) =====

fn is_royal_flush(hand: &[Card; 5]) -> bool {
    is_flush(hand) && hand.iter().all(|c| c.value() >= 10)
}

fn is_flush(hand: &[Card; 5]) -> bool {
    hand.iter().all(|c| c.suit == hand[0].suit)
}

fn is_straight(hand: &[Card; 5]) -> bool {
    let consecutive = hand.windows(2).all(|w| w[0].value() + 1 == w[1].value());
    if consecutive {
        return true;
    }
    // the wheel: A-2-3-4-5 sorts as 2,3,4,5,A
    hand[0].rank == Rank::Two
        && hand[1].rank == Rank::Three
        && hand[2].rank == Rank::Four
        && hand[3].rank == Rank::Five
        && hand[4].rank == Rank::Ace
}

fn is_full_house(hand: &[Card; 5]) -> bool {
    let counts = group_sizes(hand);
    counts == [3, 2]
}

fn is_two_pair(hand: &[Card; 5]) -> bool {
    let counts = group_sizes(hand);
    counts == [2, 2, 1]
}

fn has_count(hand: &[Card; 5], n: u8) -> bool {
    value_counts(hand).iter().any(|&c| c == n)
}

/// Group sizes by rank, largest first (e.g. a full house is [3, 2]).
fn group_sizes(hand: &[Card; 5]) -> Vec<u8> {
    let mut sizes: Vec<u8> = value_counts(hand).into_iter().filter(|&c| c > 0).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

// ===== same-rank comparators =====

fn compare_four_of_a_kind(a: &[Card], b: &[Card]) -> bool {
    let (quad_a, quad_b) = (value_with_count(a, 4), value_with_count(b, 4));
    if quad_a != quad_b {
        return quad_a > quad_b;
    }
    value_with_count(a, 1) > value_with_count(b, 1)
}

fn compare_full_house(a: &[Card], b: &[Card]) -> bool {
    let (trip_a, trip_b) = (value_with_count(a, 3), value_with_count(b, 3));
    if trip_a != trip_b {
        return trip_a > trip_b;
    }
    value_with_count(a, 2) > value_with_count(b, 2)
}

fn compare_flush(a: &[Card], b: &[Card]) -> bool {
    first_higher(&values_desc(a), &values_desc(b))
}

fn compare_straight(a: &[Card], b: &[Card]) -> bool {
    straight_high_value(a) > straight_high_value(b)
}

fn compare_three_of_a_kind(a: &[Card], b: &[Card]) -> bool {
    let (trip_a, trip_b) = (value_with_count(a, 3), value_with_count(b, 3));
    if trip_a != trip_b {
        return trip_a > trip_b;
    }
    first_higher(&kickers_desc(a, trip_a), &kickers_desc(b, trip_b))
}

fn compare_two_pair(a: &[Card], b: &[Card]) -> bool {
    let (pairs_a, pairs_b) = (pair_values_desc(a), pair_values_desc(b));
    if pairs_a[0] != pairs_b[0] {
        return pairs_a[0] > pairs_b[0];
    }
    if pairs_a[1] != pairs_b[1] {
        return pairs_a[1] > pairs_b[1];
    }
    value_with_count(a, 1) > value_with_count(b, 1)
}

fn compare_one_pair(a: &[Card], b: &[Card]) -> bool {
    let (pair_a, pair_b) = (value_with_count(a, 2), value_with_count(b, 2));
    if pair_a != pair_b {
        return pair_a > pair_b;
    }
    first_higher(&kickers_desc(a, pair_a), &kickers_desc(b, pair_b))
}

// ===== value helpers =====

fn value_counts(hand: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in hand {
        counts[c.value() as usize] += 1;
    }
    counts
}

/// Highest card value occurring exactly `n` times, or 0 when none does.
fn value_with_count(hand: &[Card], n: u8) -> u8 {
    let counts = value_counts(hand);
    (2..=14u8).rev().find(|&v| counts[v as usize] == n).unwrap_or(0)
}

fn values_desc(hand: &[Card]) -> Vec<u8> {
    let mut values: Vec<u8> = hand.iter().map(|c| c.value()).collect();
    values.sort_unstable_by(|x, y| y.cmp(x));
    values
}

fn kickers_desc(hand: &[Card], exclude: u8) -> Vec<u8> {
    let mut values: Vec<u8> = hand
        .iter()
        .map(|c| c.value())
        .filter(|&v| v != exclude)
        .collect();
    values.sort_unstable_by(|x, y| y.cmp(x));
    values
}

fn pair_values_desc(hand: &[Card]) -> [u8; 2] {
    let counts = value_counts(hand);
    let mut pairs = (2..=14u8).rev().filter(|&v| counts[v as usize] == 2);
    [pairs.next().unwrap_or(0), pairs.next().unwrap_or(0)]
}

/// Top card of a straight, with the wheel valued at 5.
fn straight_high_value(hand: &[Card]) -> u8 {
    let mut values: Vec<u8> = hand.iter().map(|c| c.value()).collect();
    values.sort_unstable();
    if values == [2, 3, 4, 5, 14] {
        return 5;
    }
    values[values.len() - 1]
}

/// True if `a` outranks `b` at the first position where they differ.
fn first_higher(a: &[u8], b: &[u8]) -> bool {
    for (x, y) in a.iter().zip(b.iter()) {
        if x != y {
            return x > y;
        }
    }
    false
}

/// The five highest-value cards of the pool, sorted ascending.
fn best_high_card_hand(pool: &[Card]) -> [Card; 5] {
    let mut sorted = pool.to_vec();
    sorted.sort_unstable_by(|a, b| b.value().cmp(&a.value()));
    let mut top: Vec<Card> = sorted.into_iter().take(5).collect();
    top.sort_unstable_by_key(|c| c.value());
    [top[0], top[1], top[2], top[3], top[4]]
}
