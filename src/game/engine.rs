//! The `Game` type: one table playing a match of hands, with betting
//! cursors into the active roster and the per-hand phase machine.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::game::player::Player;
use crate::poker::{Card, Deck, HandRank};

/// The streets of a hand. A hand ends at `Showdown`; the next hand starts
/// back at `Preflop` unless the match itself is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Phase::Preflop => "pre-flop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
        };
        write!(f, "{}", s)
    }
}

/// A poker match: the full seat roster for its lifetime, plus the per-hand
/// state the betting rounds mutate.
///
/// The active roster holds indices into `players` and is rebuilt every hand
/// to exclude eliminated seats. All four position cursors index into the
/// active roster, not the full one.
#[derive(Debug)]
pub struct Game {
    pub id: String,
    pub(crate) players: Vec<Player>,
    pub(crate) active: Vec<usize>,
    pub(crate) deck: Deck,
    pub(crate) community: Vec<Card>,
    pub(crate) pot: u32,
    pub(crate) dealer_pos: usize,
    pub(crate) small_blind_pos: usize,
    pub(crate) big_blind_pos: usize,
    pub(crate) current_pos: usize,
    pub(crate) current_highest_bet: u32,
    pub(crate) phase: Phase,
    pub(crate) game_over: bool,
    pub(crate) small_blind: u32,
    pub(crate) big_blind: u32,
    /// Ids of seats that have acted at least once this betting round.
    pub(crate) acted_this_round: HashSet<String>,
    /// Bumped on every hand reset so deferred tasks can detect staleness.
    pub(crate) hand_no: u64,
}

impl Game {
    pub fn new(
        id: impl Into<String>,
        players: Vec<Player>,
        small_blind: u32,
        big_blind: u32,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            tracing::error!("invalid game id: {:?}", id);
            return Err(EngineError::Validation("Game ID cannot be empty".into()));
        }
        if players.len() < 2 {
            tracing::error!(count = players.len(), "too few players");
            return Err(EngineError::Validation(
                "At least 2 players are required to start a game".into(),
            ));
        }
        if small_blind < 1 {
            return Err(EngineError::Validation(
                "Small blind must be at least 1".into(),
            ));
        }
        if big_blind < small_blind {
            return Err(EngineError::Validation(
                "Big blind must be at least the small blind".into(),
            ));
        }

        let n = players.len();
        Ok(Game {
            id,
            active: (0..n).collect(),
            players,
            deck: Deck::new(),
            community: Vec::with_capacity(5),
            pot: 0,
            dealer_pos: 0,
            small_blind_pos: 1 % n,
            big_blind_pos: 2 % n,
            current_pos: 3 % n,
            current_highest_bet: 0,
            phase: Phase::Preflop,
            game_over: false,
            small_blind,
            big_blind,
            acted_this_round: HashSet::new(),
            hand_no: 0,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, idx: usize) -> &Player {
        &self.players[idx]
    }

    /// Seats taking part in the current hand.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.active.iter().map(|&i| &self.players[i])
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn community(&self) -> &[Card] {
        self.community.as_slice()
    }

    pub fn current_highest_bet(&self) -> u32 {
        self.current_highest_bet
    }

    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }

    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }

    pub fn dealer_position(&self) -> usize {
        self.dealer_pos
    }

    pub fn hand_no(&self) -> u64 {
        self.hand_no
    }

    /// The seat whose turn it is, if the active roster is non-empty.
    pub fn current_player(&self) -> Option<&Player> {
        self.active
            .get(self.current_pos)
            .map(|&i| &self.players[i])
    }

    /// Advance the turn to the next seat still able to act.
    pub fn next_player(&mut self) {
        let n = self.active.len();
        if n == 0 {
            return;
        }
        for step in 1..=n {
            let pos = (self.current_pos + step) % n;
            let p = &self.players[self.active[pos]];
            if !p.has_folded() && !p.is_all_in() {
                self.current_pos = pos;
                return;
            }
        }
    }

    /// Put the turn on the first seat after the dealer that can still act.
    /// Called when a new street opens.
    pub fn begin_round_after_dealer(&mut self) {
        self.current_pos = self.dealer_pos;
        self.next_player();
    }

    /// Rotate dealer, blinds, and first actor one seat clockwise for the
    /// next hand.
    pub fn advance_positions(&mut self) {
        let n = self.active.len();
        if n == 0 {
            return;
        }
        self.dealer_pos = (self.dealer_pos + 1) % n;
        self.small_blind_pos = (self.dealer_pos + 1) % n;
        self.big_blind_pos = (self.small_blind_pos + 1) % n;
        self.current_pos = (self.big_blind_pos + 1) % n;
    }

    /// Seats that can still make a decision this hand.
    pub fn players_able_to_act(&self) -> usize {
        self.active_players()
            .filter(|p| !p.has_folded() && !p.is_all_in())
            .count()
    }

    /// The hand is over once at most one seat remains unfolded.
    pub fn is_hand_over(&self) -> bool {
        self.active_players().filter(|p| !p.has_folded()).count() <= 1
    }

    /// Mark broke seats permanently out and drop them from the active
    /// roster. The match ends when one seat or fewer remains.
    pub fn cleanup_after_hand(&mut self) {
        for p in &mut self.players {
            if p.chips() == 0 && !p.is_out() {
                tracing::info!(game = %self.id, player = %p.name, "player is out of chips");
                p.mark_out();
            }
        }
        let before = self.active.len();
        let players = &self.players;
        self.active.retain(|&i| !players[i].is_out());
        if before != self.active.len() {
            tracing::info!(
                game = %self.id,
                before,
                after = self.active.len(),
                "active roster shrank"
            );
        }
        if self.active.len() <= 1 {
            tracing::info!(game = %self.id, remaining = self.active.len(), "game over");
            self.game_over = true;
        }
    }

    /// Remove a seat that leaves mid-match from both rosters. If the leaver
    /// held the turn, the turn slides to the next seat.
    pub fn remove_player(&mut self, name: &str) -> Result<()> {
        let idx = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| EngineError::Validation("Player not found in game".into()))?;

        self.players.remove(idx);
        self.active.retain(|&i| i != idx);
        for i in self.active.iter_mut() {
            if *i > idx {
                *i -= 1;
            }
        }

        let n = self.active.len();
        if n == 0 {
            self.game_over = true;
            return Ok(());
        }
        self.dealer_pos %= n;
        self.small_blind_pos %= n;
        self.big_blind_pos %= n;
        self.current_pos %= n;
        if n <= 1 {
            self.game_over = true;
        }
        tracing::info!(game = %self.id, player = name, remaining = self.players.len(), "player left");
        Ok(())
    }

    /// Serializable public view of the table, broadcast after every mutation.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id.clone(),
            players: self
                .active_players()
                .map(|p| PlayerSnapshot {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    chips: p.chips(),
                    current_bet: p.current_bet(),
                    has_folded: p.has_folded(),
                    is_all_in: p.is_all_in(),
                    hole_cards: p.hole_cards().to_vec(),
                    hand_rank: p.hand_rank(),
                })
                .collect(),
            community: self.community.clone(),
            pot: self.pot,
            phase: self.phase,
            current_highest_bet: self.current_highest_bet,
            to_act: self.current_player().map(|p| p.name.clone()),
            dealer: self.dealer_pos,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            game_over: self.game_over,
            hand_no: self.hand_no,
        }
    }
}

/// Public per-seat state. Hole cards are exposed here; concealing them from
/// other seats is the transport's concern, not the engine's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
    pub chips: u32,
    pub current_bet: u32,
    pub has_folded: bool,
    pub is_all_in: bool,
    pub hole_cards: Vec<Card>,
    pub hand_rank: HandRank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: String,
    pub players: Vec<PlayerSnapshot>,
    pub community: Vec<Card>,
    pub pot: u32,
    pub phase: Phase,
    pub current_highest_bet: u32,
    pub to_act: Option<String>,
    pub dealer: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub game_over: bool,
    pub hand_no: u64,
}
