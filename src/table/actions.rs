//! Entry points that drive a table: player decisions and hand lifecycle.
//! Every one of them runs a full decision cycle (validate, apply, derive
//! the next state) under the table's game lock.

use std::sync::Arc;

use crate::error::{EngineError, Result};
use crate::game::{Decision, Game, Phase};
use crate::table::events::{ShowdownHand, TableEvent};
use crate::table::pacing;
use crate::table::registry::{TableHandle, Tables};

/// Apply one seat's decision to a table.
///
/// A decision from anyone but the designated actor is rejected here,
/// synchronously, before the engine sees it. After a successful action the
/// table advances itself: next street, showdown, auto-advance chain, or
/// just the next actor.
pub async fn process_player_action(
    tables: &Tables,
    game_id: &str,
    player_name: &str,
    decision: Decision,
) -> Result<()> {
    let handle = tables.get(game_id).await?;
    let mut game = handle.game.lock().await;

    if game.game_over() || game.phase() == Phase::Showdown {
        return Err(EngineError::Unauthorized(
            "The table is not accepting decisions right now".into(),
        ));
    }
    let current = game
        .current_player()
        .ok_or_else(|| EngineError::Unauthorized("No seat is due to act".into()))?;
    if current.name != player_name {
        tracing::warn!(
            game = %game_id,
            expected = %current.name,
            got = %player_name,
            "decision from a seat that is not due to act"
        );
        return Err(EngineError::Unauthorized(format!(
            "It's not your turn. Current player is: {}",
            current.name
        )));
    }

    tracing::debug!(
        game = %game_id,
        player = %player_name,
        action = %decision.action,
        amount = decision.amount,
        phase = %game.phase(),
        "processing player decision"
    );
    let notice = game.process_player_decision(decision)?;
    if let Some(message) = notice {
        tracing::info!(game = %game_id, player = %player_name, %message, "action converted");
        handle.emit(TableEvent::PlayerNotice {
            player: player_name.to_string(),
            message,
        });
    }
    handle.emit(TableEvent::State(game.snapshot()));

    advance_game(tables, &handle, &mut game)
}

/// Move the table forward after an applied decision.
fn advance_game(tables: &Tables, handle: &Arc<TableHandle>, game: &mut Game) -> Result<()> {
    if game.is_hand_over() {
        tracing::info!(game = %game.id, "hand is over, conducting showdown");
        return resolve_showdown(tables, handle, game);
    }

    if !game.is_betting_round_complete() {
        game.next_player();
        handle.emit(TableEvent::State(game.snapshot()));
        return Ok(());
    }

    // Betting is done but nobody can act anymore: let the pacing worker
    // deal the rest of the board on its own schedule.
    if game.players_able_to_act() <= 1 {
        tracing::info!(game = %game.id, "all remaining bettors are all-in, auto-advancing");
        handle.emit(TableEvent::AutoAdvance {
            message: "All remaining players are all-in. Dealing out the board...".into(),
        });
        pacing::spawn_auto_advance(tables.clone(), handle, game.id.clone(), game.hand_no());
        return Ok(());
    }

    match game.phase() {
        Phase::Preflop => {
            game.deal_flop()?;
            game.begin_round_after_dealer();
            handle.emit(TableEvent::State(game.snapshot()));
        }
        Phase::Flop => {
            game.deal_turn()?;
            game.begin_round_after_dealer();
            handle.emit(TableEvent::State(game.snapshot()));
        }
        Phase::Turn => {
            game.deal_river()?;
            game.begin_round_after_dealer();
            handle.emit(TableEvent::State(game.snapshot()));
        }
        Phase::River => {
            tracing::info!(game = %game.id, "river betting complete, conducting showdown");
            resolve_showdown(tables, handle, game)?;
        }
        Phase::Showdown => {
            tracing::warn!(game = %game.id, "already in showdown");
        }
    }
    Ok(())
}

/// Run the showdown, tell the table, and put the next hand on the clock.
pub(crate) fn resolve_showdown(
    tables: &Tables,
    handle: &Arc<TableHandle>,
    game: &mut Game,
) -> Result<()> {
    let pot_before = game.pot();
    let winners = game.conduct_showdown()?;
    let winnings_each = if winners.is_empty() {
        0
    } else {
        pot_before / winners.len() as u32
    };

    let hands: Vec<ShowdownHand> = game
        .active_players()
        .filter_map(|p| {
            p.best_hand().map(|h| ShowdownHand {
                player: p.name.clone(),
                rank: h.rank(),
                cards: h.cards().to_vec(),
            })
        })
        .collect();

    handle.emit(TableEvent::ShowdownResult {
        winners: winners.iter().map(|&i| game.player(i).name.clone()).collect(),
        winnings_each,
        pot_remainder: game.pot(),
        hands,
    });
    handle.emit(TableEvent::State(game.snapshot()));

    pacing::schedule_new_hand(tables.clone(), handle, game.id.clone());
    Ok(())
}

/// Start the next hand on a table: retire broke seats, rotate positions,
/// reshuffle, deal, and post blinds.
pub async fn start_new_hand(tables: &Tables, game_id: &str) -> Result<()> {
    let handle = tables.get(game_id).await?;
    let mut game = handle.game.lock().await;
    start_new_hand_locked(tables, &handle, &mut game)
}

pub(crate) fn start_new_hand_locked(
    tables: &Tables,
    handle: &Arc<TableHandle>,
    game: &mut Game,
) -> Result<()> {
    if game.game_over() {
        tracing::warn!(game = %game.id, "cannot start new hand, game is over");
        return Ok(());
    }

    game.cleanup_after_hand();
    if game.game_over() {
        let winner = game.active_players().next().map(|p| p.name.clone());
        tracing::info!(game = %game.id, winner = ?winner, "match ended");
        handle.emit(TableEvent::GameEnded { winner });
        pacing::schedule_cleanup(tables.clone(), game.id.clone(), handle.pacing.cleanup_delay);
        return Ok(());
    }

    if game.hand_no() > 0 {
        game.advance_positions();
    }
    game.reset_for_new_hand();
    if game.game_over() {
        let winner = game.active_players().next().map(|p| p.name.clone());
        handle.emit(TableEvent::GameEnded { winner });
        pacing::schedule_cleanup(tables.clone(), game.id.clone(), handle.pacing.cleanup_delay);
        return Ok(());
    }

    game.deal_hole_cards()?;
    game.post_blinds();
    handle.emit(TableEvent::State(game.snapshot()));
    tracing::info!(
        game = %game.id,
        hand = game.hand_no(),
        pot = game.pot(),
        to_act = ?game.current_player().map(|p| &p.name),
        "new hand started"
    );
    Ok(())
}

/// Remove a seat from a running table. The last seat standing ends the
/// match; an empty table is destroyed outright.
pub async fn leave_table(tables: &Tables, game_id: &str, player_name: &str) -> Result<()> {
    let handle = tables.get(game_id).await?;
    let mut game = handle.game.lock().await;

    game.remove_player(player_name)?;

    if game.players().is_empty() {
        drop(game);
        tables.remove(game_id).await;
        return Ok(());
    }
    if game.game_over() {
        let winner = game.active_players().next().map(|p| p.name.clone());
        handle.emit(TableEvent::GameEnded { winner });
        pacing::schedule_cleanup(tables.clone(), game.id.clone(), handle.pacing.cleanup_delay);
        return Ok(());
    }
    handle.emit(TableEvent::State(game.snapshot()));
    Ok(())
}
