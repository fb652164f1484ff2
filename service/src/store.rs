use hashbrown::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use sweeper_core::Game;
use sweeper_protocol::GameId;

use crate::*;

/// Key-value storage for whole games.
///
/// A game is always read and written as one unit, so a single `save` per operation is enough to
/// persist every square it touched. Implementations only need to be consistent per key; the
/// service serializes access to each game itself.
pub trait GameStore {
    /// Reserves an id no other game uses.
    fn next_id(&self) -> std::result::Result<GameId, StoreError>;

    fn load(&self, id: GameId) -> std::result::Result<Option<Game>, StoreError>;

    fn save(&self, id: GameId, game: &Game) -> std::result::Result<(), StoreError>;

    /// Returns whether a game was stored under `id`.
    fn remove(&self, id: GameId) -> std::result::Result<bool, StoreError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: u64,
    games: HashMap<GameId, Vec<u8>>,
}

/// In-process store keeping every game JSON encoded, the same way an external object store
/// would hold it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state().games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // every write leaves the map consistent, so a panicked holder cannot corrupt it
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GameStore for MemoryStore {
    fn next_id(&self) -> std::result::Result<GameId, StoreError> {
        let mut state = self.state();
        state.last_id += 1;
        Ok(GameId(state.last_id))
    }

    fn load(&self, id: GameId) -> std::result::Result<Option<Game>, StoreError> {
        self.state()
            .games
            .get(&id)
            .map(|bytes| serde_json::from_slice(bytes))
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&self, id: GameId, game: &Game) -> std::result::Result<(), StoreError> {
        let bytes = serde_json::to_vec(game)?;
        self.state().games.insert(id, bytes);
        Ok(())
    }

    fn remove(&self, id: GameId) -> std::result::Result<bool, StoreError> {
        Ok(self.state().games.remove(&id).is_some())
    }
}
