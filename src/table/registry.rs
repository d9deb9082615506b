//! The table registry: one handle per running match, each with its own
//! lock. The registry map is only ever held long enough to look a handle
//! up; all real work happens under the per-table game lock, so unrelated
//! tables never contend.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex, RwLock};

use crate::error::{EngineError, Result};
use crate::game::{Game, GameSnapshot, Player};
use crate::table::events::TableEvent;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Delays for everything the table does on its own time.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Between auto-dealt streets when all bettors are all-in.
    pub stage_delay: Duration,
    /// Between a showdown and the next hand.
    pub hand_delay: Duration,
    /// Between the end of a match and the table being destroyed.
    pub cleanup_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            stage_delay: Duration::from_millis(2000),
            hand_delay: Duration::from_millis(5000),
            cleanup_delay: Duration::from_millis(5000),
        }
    }
}

/// One running match: the game behind its exclusive-writer lock, plus the
/// event channel its watchers subscribe to.
pub struct TableHandle {
    pub(crate) game: Mutex<Game>,
    pub(crate) events: broadcast::Sender<TableEvent>,
    pub(crate) pacing: Pacing,
}

impl TableHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<TableEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.game.lock().await.snapshot()
    }

    pub(crate) fn emit(&self, event: TableEvent) {
        // nobody listening is fine
        let _ = self.events.send(event);
    }
}

#[derive(Clone)]
pub struct Tables {
    inner: Arc<RwLock<HashMap<String, Arc<TableHandle>>>>,
    pacing: Pacing,
}

impl Tables {
    pub fn new(pacing: Pacing) -> Self {
        Tables {
            inner: Arc::new(RwLock::new(HashMap::new())),
            pacing,
        }
    }

    /// Create a table and register it under its game id.
    pub async fn create(
        &self,
        id: impl Into<String>,
        players: Vec<Player>,
        small_blind: u32,
        big_blind: u32,
    ) -> Result<Arc<TableHandle>> {
        let id = id.into();
        let mut map = self.inner.write().await;
        if map.contains_key(&id) {
            return Err(EngineError::Validation(format!(
                "A game with id {} already exists",
                id
            )));
        }
        let game = Game::new(id.clone(), players, small_blind, big_blind)?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let handle = Arc::new(TableHandle {
            game: Mutex::new(game),
            events,
            pacing: self.pacing,
        });
        map.insert(id.clone(), Arc::clone(&handle));
        tracing::info!(game = %id, "table created");
        Ok(handle)
    }

    pub async fn get(&self, id: &str) -> Result<Arc<TableHandle>> {
        self.inner
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::GameNotFound(id.to_string()))
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.inner.read().await.contains_key(id)
    }

    pub async fn remove(&self, id: &str) -> Option<Arc<TableHandle>> {
        let removed = self.inner.write().await.remove(id);
        if removed.is_some() {
            tracing::info!(game = %id, "table removed");
        }
        removed
    }
}

impl Default for Tables {
    fn default() -> Self {
        Tables::new(Pacing::default())
    }
}
