//! Runs games on behalf of a request layer: every operation loads one game from an injected
//! store, applies one core operation under that game's lock, and writes the game back once.

pub use config::*;
pub use error::*;
pub use service::*;
pub use store::*;

mod config;
mod error;
mod service;
mod store;
