use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Decides where the mines of a new game go.
///
/// Implementors only produce the mine mask; counting neighbors and wrapping the grid in a game
/// is shared, and always runs after the whole mask exists.
pub trait MinefieldGenerator {
    fn mine_mask(self, config: &GameConfig) -> Result<Array2<bool>>;

    fn generate(self, config: GameConfig) -> Result<Game>
    where
        Self: Sized,
    {
        let mine_mask = self.mine_mask(&config)?;
        let grid = Grid::from_mine_mask(&mine_mask);

        if grid.total_mines() == grid.total_squares() {
            log::warn!(
                "Every one of the {} squares holds a mine, the game cannot be won",
                grid.total_squares()
            );
        }
        log::debug!(
            "Generated {}x{} grid with {} mines",
            grid.width(),
            grid.height(),
            grid.total_mines()
        );

        Ok(Game::new(grid, config.difficulty))
    }
}

/// Mines at explicitly listed coordinates, used to replay known layouts.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator<'a> {
    mines: &'a [Coord2],
}

impl<'a> FixedMinefieldGenerator<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }

    /// Just the grid, for callers that do not need a game around it.
    pub fn generate_grid(self, size: Coord2) -> Result<Grid> {
        let config = GameConfig::new(size, 0.0)?;
        Ok(Grid::from_mine_mask(&self.mine_mask(&config)?))
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator<'_> {
    fn mine_mask(self, config: &GameConfig) -> Result<Array2<bool>> {
        let (size_x, size_y) = config.size;
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        for &coords in self.mines {
            if coords.0 >= size_x || coords.1 >= size_y {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(mine_mask)
    }
}
