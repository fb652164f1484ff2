use hashbrown::HashMap;
use rand::prelude::*;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use sweeper_core::{
    CellCount, Game, GameView, MinefieldGenerator, RandomMinefieldGenerator, RevealOutcome,
};
use sweeper_protocol::{CreatedGame, ErrorResponse, GameId, Request, Response, SquareId};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::*;

/// Runs every game operation as one transaction against the store.
///
/// Operations on the same game are serialized through a per-game lock, so two reveals can never
/// flood the same grid at once. Operations on different games only share the lock table for the
/// instant it takes to look up their lock.
#[derive(Debug)]
pub struct GameService<S> {
    store: S,
    config: ServiceConfig,
    rng: Mutex<SmallRng>,
    locks: Mutex<HashMap<GameId, Arc<Mutex<()>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // the guarded values hold no invariants a panic could break
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S, config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(clock_seed);
        log::debug!("Game service seeded with {}", seed);

        Ok(Self {
            store,
            config,
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
            locks: Default::default(),
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a game with randomly placed mines.
    pub fn create_game(&self, difficulty: f64) -> Result<CreatedGame> {
        let game_config = self.config.game_config(difficulty)?;
        let seed = lock(&self.rng).random();
        self.insert(RandomMinefieldGenerator::new(seed).generate(game_config)?)
    }

    /// Creates a game whose mines come from `generator`, e.g. a replayed layout.
    pub fn create_game_with<G: MinefieldGenerator>(
        &self,
        generator: G,
        difficulty: f64,
    ) -> Result<CreatedGame> {
        let game_config = self.config.game_config(difficulty)?;
        self.insert(generator.generate(game_config)?)
    }

    fn insert(&self, game: Game) -> Result<CreatedGame> {
        let id = self.store.next_id()?;
        self.store.save(id, &game)?;
        log::debug!(
            "Created game {} with {} mines, difficulty {}",
            id,
            game.grid().total_mines(),
            game.difficulty().chance()
        );

        Ok(CreatedGame {
            id,
            game: game.public_view(),
        })
    }

    pub fn get_game(&self, id: GameId) -> Result<GameView> {
        self.locked(id, || Ok(self.load(id)?.public_view()))
    }

    /// Flags a square, returns the apparent remaining mines.
    pub fn set_flag(&self, square: SquareId) -> Result<CellCount> {
        self.with_game(square.game, |game| game.set_flag(square.coords()))
    }

    /// Removes the flag from a square, returns the apparent remaining mines.
    pub fn clear_flag(&self, square: SquareId) -> Result<CellCount> {
        self.with_game(square.game, |game| game.clear_flag(square.coords()))
    }

    pub fn reveal(&self, square: SquareId) -> Result<RevealOutcome> {
        let outcome = self.with_game(square.game, |game| game.reveal(square.coords()))?;
        if outcome.game_status().is_final() {
            log::debug!("Game {} ended: {:?}", square.game, outcome.game_status());
        }
        Ok(outcome)
    }

    /// Drops a game from the store, e.g. when the player walks away from it.
    pub fn abandon_game(&self, id: GameId) -> Result<()> {
        self.locked(id, || {
            if self.store.remove(id)? {
                Ok(())
            } else {
                Err(ServiceError::GameNotFound(id))
            }
        })?;
        self.forget_lock(id);
        log::debug!("Abandoned game {}", id);
        Ok(())
    }

    /// Dispatches one request, turning failures into an error response.
    pub fn handle(&self, request: Request) -> Response {
        let response = match request {
            Request::CreateGame { difficulty } => self.create_game(difficulty).map(Response::Created),
            Request::GetGame { id } => self.get_game(id).map(Response::Game),
            Request::SetFlag { square } => self
                .set_flag(square)
                .map(|mine_count| Response::MineCount { mine_count }),
            Request::ClearFlag { square } => self
                .clear_flag(square)
                .map(|mine_count| Response::MineCount { mine_count }),
            Request::Reveal { square } => self.reveal(square).map(Response::Reveal),
            Request::AbandonGame { id } => self.abandon_game(id).map(|()| Response::Abandoned { id }),
        };

        response.unwrap_or_else(|err| {
            let kind = err.kind();
            if kind == sweeper_core::ErrorKind::Internal {
                log::warn!("Request failed: {}", err);
            } else {
                log::debug!("Request rejected: {}", err);
            }
            Response::Error(ErrorResponse {
                kind,
                message: err.to_string(),
            })
        })
    }

    /// Loads a game, applies `operation` under the game's lock and stores the result.
    ///
    /// The store is only written when `operation` succeeds, so a rejected move leaves the stored
    /// game exactly as it was.
    fn with_game<T>(
        &self,
        id: GameId,
        operation: impl FnOnce(&mut Game) -> sweeper_core::Result<T>,
    ) -> Result<T> {
        self.locked(id, || {
            let mut game = self.load(id)?;
            let value = operation(&mut game)?;
            self.store.save(id, &game)?;
            Ok(value)
        })
    }

    /// Runs `operation` while holding the lock of game `id`.
    ///
    /// Unknown ids must not grow the lock table, so a lookup that finds no game gives its entry
    /// back once the guard is released.
    fn locked<T>(&self, id: GameId, operation: impl FnOnce() -> Result<T>) -> Result<T> {
        let result = {
            let game_lock = self.game_lock(id);
            let _guard = lock(&game_lock);
            operation()
        };
        if matches!(result, Err(ServiceError::GameNotFound(_))) {
            self.forget_lock(id);
        }
        result
    }

    fn load(&self, id: GameId) -> Result<Game> {
        self.store.load(id)?.ok_or(ServiceError::GameNotFound(id))
    }

    fn game_lock(&self, id: GameId) -> Arc<Mutex<()>> {
        lock(&self.locks).entry(id).or_default().clone()
    }

    /// Drops the lock entry of `id` unless another caller still holds or waits on it.
    ///
    /// Clones are only handed out under the table lock, so a count of one means the table owns
    /// the only reference and the next caller may start from a fresh lock.
    fn forget_lock(&self, id: GameId) {
        let mut locks = lock(&self.locks);
        if locks
            .get(&id)
            .is_some_and(|game_lock| Arc::strong_count(game_lock) == 1)
        {
            locks.remove(&id);
        }
    }
}
