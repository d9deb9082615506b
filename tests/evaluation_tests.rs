//! Property-level tests for the deck and the hand evaluator through the
//! public API.

use holdem_engine::error::EngineError;
use holdem_engine::poker::evaluation::{best_hand, evaluate_hand, is_better_hand_of_same_rank};
use holdem_engine::poker::{Card, Deck, HandRank, Rank, Suit};

/// Parse "AH KD TS ..." into cards.
fn cards(spec: &str) -> Vec<Card> {
    spec.split_whitespace()
        .map(|s| {
            let mut chars = s.chars();
            let rank = match chars.next().unwrap() {
                '2' => Rank::Two,
                '3' => Rank::Three,
                '4' => Rank::Four,
                '5' => Rank::Five,
                '6' => Rank::Six,
                '7' => Rank::Seven,
                '8' => Rank::Eight,
                '9' => Rank::Nine,
                'T' => Rank::Ten,
                'J' => Rank::Jack,
                'Q' => Rank::Queen,
                'K' => Rank::King,
                'A' => Rank::Ace,
                c => panic!("bad rank {}", c),
            };
            let suit = match chars.next().unwrap() {
                'H' => Suit::Hearts,
                'D' => Suit::Diamonds,
                'C' => Suit::Clubs,
                'S' => Suit::Spades,
                c => panic!("bad suit {}", c),
            };
            Card::new(rank, suit)
        })
        .collect()
}

#[test]
fn a_deck_deals_52_distinct_cards_and_then_fails() {
    let mut deck = Deck::new();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..52 {
        assert!(seen.insert(deck.deal().unwrap()));
    }
    assert!(matches!(
        deck.deal(),
        Err(EngineError::DeckExhausted { .. })
    ));
}

#[test]
fn every_five_card_hand_gets_exactly_one_rank() {
    // a spread of pools; each evaluation must succeed with a single rank
    let pools = [
        "AH KH QH JH TH",
        "AH 2D 3C 4S 5H",
        "7H 7D 7C 7S 2H",
        "2H 9D QC 4S KH",
    ];
    for pool in pools {
        let rank = evaluate_hand(&cards(pool)).unwrap();
        assert!(rank >= HandRank::HighCard);
    }
}

#[test]
fn ace_high_straight_flush_is_royal() {
    assert_eq!(
        evaluate_hand(&cards("TH JH QH KH AH")).unwrap(),
        HandRank::RoyalFlush
    );
    assert_eq!(
        evaluate_hand(&cards("9H TH JH QH KH")).unwrap(),
        HandRank::StraightFlush
    );
}

#[test]
fn best_hand_matches_a_brute_force_subset_search() {
    let pools = [
        ("AH 8D 8C 2S QH", "AD AS"),      // full house available
        ("2H 6H 9H JH 3D", "TH 8S"),      // flush on the board
        ("5H 6D 7C 8S 9H", "2D 3S"),      // board straight
        ("2H 5D 9C JS 3H", "KD 7S"),      // nothing but high card
        ("QH QD 7C 4S 2H", "AH 3C"),      // pair plus kickers
    ];
    for (community, hole) in pools {
        let community = cards(community);
        let hole = cards(hole);
        let got = best_hand(&community, &hole).unwrap();

        // brute force over every 5-card subset
        let mut pool = hole.clone();
        pool.extend_from_slice(&community);
        let n = pool.len();
        let mut max_rank = HandRank::NoHand;
        for i in 0..n - 4 {
            for j in i + 1..n - 3 {
                for k in j + 1..n - 2 {
                    for l in k + 1..n - 1 {
                        for m in l + 1..n {
                            let subset = [pool[i], pool[j], pool[k], pool[l], pool[m]];
                            let rank = evaluate_hand(&subset).unwrap();
                            if rank.beats(max_rank) {
                                max_rank = rank;
                            }
                        }
                    }
                }
            }
        }

        assert_eq!(got.rank(), max_rank);
        assert_eq!(got.cards().len(), 5);
        // the chosen cards themselves evaluate to the reported rank, except
        // for the high-card fallback which picks from the whole pool
        if got.rank() != HandRank::HighCard {
            assert_eq!(evaluate_hand(got.cards()).unwrap(), got.rank());
        }
    }
}

#[test]
fn comparator_never_prefers_a_hand_over_itself() {
    let hands = [
        ("7H 7D 7C 7S KH", HandRank::FourOfAKind),
        ("9H 9D 9C 2S 2H", HandRank::FullHouse),
        ("2D 6D 9D JD AD", HandRank::Flush),
        ("5H 6D 7C 8S 9H", HandRank::Straight),
        ("JH JD 9C 8S 2H", HandRank::OnePair),
    ];
    for (spec, rank) in hands {
        let hand = cards(spec);
        assert!(
            !is_better_hand_of_same_rank(&hand, &hand, rank),
            "{} preferred over itself",
            spec
        );
    }
}

#[test]
fn comparator_gives_opposite_answers_for_swapped_arguments() {
    let a = cards("KH KD KC 9S 9H");
    let b = cards("QH QD QC AS AH");
    assert!(is_better_hand_of_same_rank(&a, &b, HandRank::FullHouse));
    assert!(!is_better_hand_of_same_rank(&b, &a, HandRank::FullHouse));
}

#[test]
fn wheel_counts_as_five_high() {
    let wheel = cards("AH 2D 3C 4S 5H");
    let three_to_seven = cards("3H 4D 5C 6S 7H");
    assert_eq!(evaluate_hand(&wheel).unwrap(), HandRank::Straight);
    assert!(is_better_hand_of_same_rank(
        &three_to_seven,
        &wheel,
        HandRank::Straight
    ));
    assert!(!is_better_hand_of_same_rank(
        &wheel,
        &three_to_seven,
        HandRank::Straight
    ));
}
