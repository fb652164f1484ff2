use sweeper_core::{ErrorKind, GameError};
use sweeper_protocol::GameId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not encode or decode game: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Store backend failed: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Game {0} not found")]
    GameNotFound(GameId),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GameNotFound(_) => ErrorKind::NotFound,
            Self::Game(err) => err.kind(),
            Self::Config(_) => ErrorKind::InvalidInput,
            Self::Store(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
