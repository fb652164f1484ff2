use serde::{Deserialize, Serialize};
use sweeper_core::{Coord, Coord2, GameConfig};

use crate::*;

/// Settings shared by every game the service creates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub width: Coord,
    pub height: Coord,
    /// Fixed seed for the master random source, every generated grid is reproducible with it
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            seed: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        GameConfig::new(self.size(), 0.0)?;
        Ok(())
    }

    /// Game parameters for a new game, rejecting a bad difficulty before anything is created
    pub fn game_config(&self, difficulty: f64) -> Result<GameConfig> {
        Ok(GameConfig::new(self.size(), difficulty)?)
    }
}
