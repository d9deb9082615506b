//! The concurrency shell around the engine: a registry of running tables,
//! per-table locks, action entry points, broadcast events, and the timers
//! that pace the game between the moments players act.

mod actions;
mod events;
mod pacing;
mod registry;

pub use actions::{leave_table, process_player_action, start_new_hand};
pub use events::{ShowdownHand, TableEvent};
pub use registry::{Pacing, TableHandle, Tables};
