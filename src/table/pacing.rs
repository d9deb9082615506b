//! Deferred table work: the all-in auto-advance chain, the pause between
//! hands, and end-of-match cleanup.
//!
//! Every task here holds only a `Weak` reference to its table and
//! re-acquires the game lock when it fires, because the table may have
//! been destroyed or moved on to another hand in the meantime. A stale
//! step logs and does nothing; it never errors.

use std::sync::Arc;
use std::time::Duration;

use crate::game::Phase;
use crate::table::actions;
use crate::table::events::TableEvent;
use crate::table::registry::{TableHandle, Tables};

/// What the auto-advance worker does next, decided from the phase it finds
/// when it wakes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AutoAdvanceStep {
    DealFlop,
    DealTurn,
    DealRiver,
    Finish,
}

impl AutoAdvanceStep {
    fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Preflop => AutoAdvanceStep::DealFlop,
            Phase::Flop => AutoAdvanceStep::DealTurn,
            Phase::Turn => AutoAdvanceStep::DealRiver,
            Phase::River | Phase::Showdown => AutoAdvanceStep::Finish,
        }
    }
}

/// Deal the rest of the board one street at a time, with a pause between
/// streets, then run the showdown. Used when betting is finished because
/// all remaining bettors are all-in.
pub(crate) fn spawn_auto_advance(
    tables: Tables,
    handle: &Arc<TableHandle>,
    game_id: String,
    hand_no: u64,
) {
    let weak = Arc::downgrade(handle);
    let delay = handle.pacing.stage_delay;
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(delay).await;
            let Some(handle) = weak.upgrade() else {
                tracing::debug!(game = %game_id, "table gone, dropping auto-advance step");
                return;
            };
            let mut game = handle.game.lock().await;
            if game.game_over() || game.hand_no() != hand_no {
                tracing::debug!(game = %game_id, "hand moved on, dropping auto-advance step");
                return;
            }

            let step = AutoAdvanceStep::for_phase(game.phase());
            let dealt = match step {
                AutoAdvanceStep::DealFlop => game.deal_flop().map(|_| "Dealing flop..."),
                AutoAdvanceStep::DealTurn => game.deal_turn().map(|_| "Dealing turn..."),
                AutoAdvanceStep::DealRiver => game.deal_river().map(|_| "Dealing river..."),
                AutoAdvanceStep::Finish => {
                    if let Err(e) = actions::resolve_showdown(&tables, &handle, &mut game) {
                        tracing::error!(game = %game_id, error = %e, "auto-advance showdown failed");
                    }
                    return;
                }
            };
            match dealt {
                Ok(message) => {
                    handle.emit(TableEvent::AutoAdvance {
                        message: message.to_string(),
                    });
                    handle.emit(TableEvent::State(game.snapshot()));
                }
                Err(e) => {
                    tracing::error!(game = %game_id, error = %e, "auto-advance deal failed");
                    return;
                }
            }
        }
    });
}

/// Start the next hand after the post-showdown pause.
pub(crate) fn schedule_new_hand(tables: Tables, handle: &Arc<TableHandle>, game_id: String) {
    let weak = Arc::downgrade(handle);
    let delay = handle.pacing.hand_delay;
    tracing::debug!(game = %game_id, delay_ms = delay.as_millis() as u64, "scheduling next hand");
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let Some(handle) = weak.upgrade() else {
            tracing::debug!(game = %game_id, "table gone, dropping scheduled hand start");
            return;
        };
        let mut game = handle.game.lock().await;
        if let Err(e) = actions::start_new_hand_locked(&tables, &handle, &mut game) {
            tracing::error!(game = %game_id, error = %e, "scheduled hand start failed");
        }
    });
}

/// Destroy the table a little while after the match ends, so watchers see
/// the final state first.
pub(crate) fn schedule_cleanup(tables: Tables, game_id: String, delay: Duration) {
    tracing::debug!(game = %game_id, delay_ms = delay.as_millis() as u64, "scheduling table cleanup");
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tables.remove(&game_id).await.is_some() {
            tracing::info!(game = %game_id, "table cleaned up after match end");
        } else {
            tracing::debug!(game = %game_id, "table already gone at cleanup time");
        }
    });
}
