#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use grid::*;
pub use square::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod game;
mod generator;
mod grid;
mod square;
mod types;
mod view;

/// Chance of each square to hold a mine, always within `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Difficulty(f64);

impl Difficulty {
    pub fn new(chance: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&chance) {
            Ok(Self(chance))
        } else {
            Err(GameError::InvalidDifficulty)
        }
    }

    pub const fn chance(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Difficulty {
    type Error = GameError;

    fn try_from(chance: f64) -> Result<Self> {
        Self::new(chance)
    }
}

impl From<Difficulty> for f64 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub difficulty: Difficulty,
}

impl GameConfig {
    pub fn new(size: Coord2, difficulty: f64) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        Ok(Self {
            size,
            difficulty: Difficulty::new(difficulty)?,
        })
    }

    pub const fn total_squares(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Generates a new game with every square independently mined with chance `difficulty`.
pub fn generate(size: Coord2, difficulty: f64, seed: u64) -> Result<Game> {
    RandomMinefieldGenerator::new(seed).generate(GameConfig::new(size, difficulty)?)
}
