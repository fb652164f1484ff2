use rand::prelude::*;

use super::*;

/// One independent draw for one square: `true` with probability `difficulty`.
pub fn place_mine<R: Rng>(rng: &mut R, difficulty: Difficulty) -> bool {
    rng.random_bool(difficulty.chance())
}

/// Draws every square of the grid independently, in a fixed column-major order so a given random
/// source always produces the same mask.
pub fn random_mine_mask<R: Rng>(rng: &mut R, config: &GameConfig) -> Array2<bool> {
    Array2::from_shape_fn(config.size.to_nd_index(), |_| {
        place_mine(rng, config.difficulty)
    })
}

/// Purely random placement where every square holds a mine with the configured chance.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn mine_mask(self, config: &GameConfig) -> Result<Array2<bool>> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        Ok(random_mine_mask(&mut rng, config))
    }
}
