use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ongoing -> Won
/// - Ongoing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Initial state, moves are accepted
    #[default]
    Ongoing,
    /// Every safe square was revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Represents a game from generation to its end
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    grid: Grid,
    status: GameStatus,
    difficulty: Difficulty,
}

impl Game {
    pub fn new(grid: Grid, difficulty: Difficulty) -> Self {
        Self {
            grid,
            status: Default::default(),
            difficulty,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_final()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// How many mines have not been flagged yet, as far as the player can tell
    pub fn mine_count(&self) -> CellCount {
        self.grid.mine_count()
    }

    /// Flag a hidden square, returns the apparent remaining mines
    pub fn set_flag(&mut self, coords: Coord2) -> Result<CellCount> {
        self.mark(coords, true)
    }

    /// Remove the flag from a hidden square, returns the apparent remaining mines
    pub fn clear_flag(&mut self, coords: Coord2) -> Result<CellCount> {
        self.mark(coords, false)
    }

    fn mark(&mut self, coords: Coord2, has_flag: bool) -> Result<CellCount> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_ongoing()?;

        if self.grid.set_flag(coords, has_flag)?.has_update() {
            log::trace!("Flag at {:?} set to {}", coords, has_flag);
        }
        Ok(self.grid.mine_count())
    }

    /// Reveal a hidden, unflagged square.
    ///
    /// Everything is validated before the first mutation, so an error leaves the game untouched.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_ongoing()?;

        let square = self.grid[coords];
        if square.is_revealed() {
            return Err(GameError::AlreadyRevealed);
        }
        if square.has_flag() {
            return Err(GameError::Flagged);
        }

        Ok(if square.has_mine() {
            self.explode(coords)
        } else {
            self.open(coords)
        })
    }

    fn explode(&mut self, coords: Coord2) -> RevealOutcome {
        let MineDisclosure {
            unflagged_mines,
            incorrect_flags,
        } = disclose_mines(&self.grid);

        // the clicked mine is unflagged, so it is part of the batch
        self.grid.reveal_all(&unflagged_mines);
        self.mark_ended(GameStatus::Lost);
        log::debug!("Mine hit at {:?}", coords);

        RevealOutcome::Failure {
            incorrect_flags: self.views(&incorrect_flags),
            unflagged_mines: self.views(&unflagged_mines),
            mine_count: self.grid.mine_count(),
        }
    }

    fn open(&mut self, coords: Coord2) -> RevealOutcome {
        let revealed = flood_fill(&self.grid, coords);
        self.grid.reveal_all(&revealed);
        log::debug!("Reveal at {:?} opened {} squares", coords, revealed.len());

        if self.grid.all_safe_revealed() {
            self.mark_ended(GameStatus::Won);
        }

        RevealOutcome::Success {
            revealed: self.views(&revealed),
            game_status: self.status,
            mine_count: self.grid.mine_count(),
        }
    }

    fn views(&self, coords: &[Coord2]) -> Vec<SquareView> {
        coords
            .iter()
            .map(|&pos| self.grid[pos].public_view())
            .collect()
    }

    fn mark_ended(&mut self, status: GameStatus) {
        if self.status.is_final() {
            return;
        }
        log::debug!("Game ended: {:?}", status);
        self.status = status;
    }

    fn check_ongoing(&self) -> Result<()> {
        if self.status.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    pub fn public_view(&self) -> GameView {
        GameView {
            status: self.status,
            difficulty: self.difficulty,
            grid: self.grid.public_view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> Game {
        let config = GameConfig::new(size, 0.1).unwrap();
        FixedMinefieldGenerator::new(mines).generate(config).unwrap()
    }

    fn coords_of(views: &[SquareView]) -> Vec<Coord2> {
        let mut coords: Vec<_> = views.iter().map(|view| (view.x, view.y)).collect();
        coords.sort_unstable();
        coords
    }

    #[test]
    fn mine_free_grid_is_won_in_one_reveal() {
        let mut game = game((5, 5), &[]);

        let outcome = game.reveal((0, 0)).unwrap();

        let RevealOutcome::Success {
            revealed,
            game_status,
            mine_count,
        } = outcome
        else {
            panic!("expected a successful reveal");
        };
        assert_eq!(revealed.len(), 25);
        assert_eq!(game_status, GameStatus::Won);
        assert_eq!(mine_count, 0);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn win_happens_on_the_last_safe_square_only() {
        // every safe square touches the mine, so each reveal opens exactly one square
        let mut game = game((3, 3), &[(1, 1)]);
        let safe: Vec<Coord2> = game
            .grid()
            .squares()
            .filter(|square| !square.has_mine())
            .map(Square::coords)
            .collect();

        let (last, rest) = safe.split_last().unwrap();
        for &coords in rest {
            let outcome = game.reveal(coords).unwrap();
            assert_eq!(outcome.game_status(), GameStatus::Ongoing);
        }
        assert_eq!(game.status(), GameStatus::Ongoing);

        let outcome = game.reveal(*last).unwrap();
        assert_eq!(outcome.game_status(), GameStatus::Won);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn revealing_a_mine_loses_and_discloses_unflagged_mines() {
        let mut game = game((3, 3), &[(0, 0), (2, 0), (2, 2)]);
        game.set_flag((2, 2)).unwrap();
        game.set_flag((1, 1)).unwrap();

        let outcome = game.reveal((0, 0)).unwrap();

        let RevealOutcome::Failure {
            incorrect_flags,
            unflagged_mines,
            mine_count,
        } = outcome
        else {
            panic!("expected a failed reveal");
        };
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(coords_of(&unflagged_mines), [(0, 0), (2, 0)]);
        assert_eq!(coords_of(&incorrect_flags), [(1, 1)]);
        assert_eq!(mine_count, 1);

        assert!(game.grid()[(0, 0)].is_revealed());
        assert!(game.grid()[(2, 0)].is_revealed());
        // flagged mine stays hidden under its flag
        assert!(!game.grid()[(2, 2)].is_revealed());
        assert!(game.grid()[(2, 2)].has_flag());
        assert!(unflagged_mines.iter().all(|view| matches!(
            view.state,
            SquareState::Revealed { has_mine: true, .. }
        )));
    }

    #[test]
    fn lost_is_not_overridden_by_won() {
        let mut game = game((2, 1), &[(0, 0)]);

        let outcome = game.reveal((0, 0)).unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome.game_status(), GameStatus::Lost);
        assert_eq!(game.reveal((1, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn revealing_twice_is_rejected_without_changes() {
        let mut game = game((3, 1), &[(1, 0)]);
        game.reveal((0, 0)).unwrap();
        let before = game.clone();

        assert_eq!(game.reveal((0, 0)), Err(GameError::AlreadyRevealed));
        assert_eq!(game, before);
    }

    #[test]
    fn flagged_square_must_be_unflagged_before_reveal() {
        let mut game = game((5, 1), &[]);
        game.set_flag((2, 0)).unwrap();

        assert_eq!(game.reveal((2, 0)), Err(GameError::Flagged));

        let outcome = game.reveal((0, 0)).unwrap();
        assert_eq!(outcome.game_status(), GameStatus::Ongoing);
        assert!(!game.grid()[(3, 0)].is_revealed());

        game.clear_flag((2, 0)).unwrap();
        let outcome = game.reveal((2, 0)).unwrap();
        assert_eq!(outcome.game_status(), GameStatus::Won);
    }

    #[test]
    fn unflagged_square_opens_through_an_earlier_revealed_zero() {
        let mut game = game((3, 3), &[]);
        let around_center: Vec<Coord2> = game
            .grid()
            .adjacent_squares((1, 1))
            .map(Square::coords)
            .collect();
        for &coords in &around_center {
            game.set_flag(coords).unwrap();
        }

        let outcome = game.reveal((1, 1)).unwrap();
        assert_eq!(outcome.game_status(), GameStatus::Ongoing);
        assert!(!game.grid()[(0, 0)].is_revealed());

        game.clear_flag((0, 0)).unwrap();
        game.clear_flag((2, 2)).unwrap();
        let RevealOutcome::Success {
            revealed,
            game_status,
            ..
        } = game.reveal((2, 2)).unwrap()
        else {
            panic!("expected a successful reveal");
        };

        assert_eq!(coords_of(&revealed), [(0, 0), (2, 2)]);
        assert_eq!(game_status, GameStatus::Ongoing);
        assert!(game.grid()[(0, 0)].is_revealed());
        assert!(game.grid()[(1, 0)].has_flag());
        assert!(!game.grid()[(1, 0)].is_revealed());
    }

    #[test]
    fn flags_update_the_apparent_mine_count() {
        let mut game = game((3, 3), &[(0, 0)]);

        assert_eq!(game.set_flag((0, 0)), Ok(0));
        assert_eq!(game.set_flag((1, 1)), Ok(0));
        assert_eq!(game.clear_flag((1, 1)), Ok(0));
        assert_eq!(game.clear_flag((0, 0)), Ok(1));
        assert_eq!(game.clear_flag((0, 0)), Ok(1));
    }

    #[test]
    fn flag_on_revealed_square_is_rejected() {
        let mut game = game((3, 1), &[(1, 0)]);
        game.reveal((0, 0)).unwrap();

        assert_eq!(game.set_flag((0, 0)), Err(GameError::AlreadyRevealed));
        assert_eq!(game.mine_count(), 1);
    }

    #[test]
    fn no_moves_after_the_game_ended() {
        let mut game = game((2, 1), &[(1, 0)]);
        game.reveal((0, 0)).unwrap();
        assert_eq!(game.status(), GameStatus::Won);

        assert_eq!(game.set_flag((1, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(game.clear_flag((1, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(game.reveal((1, 0)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn new_game_starts_ongoing() {
        let game = game((2, 2), &[(0, 0)]);

        assert_eq!(GameStatus::default(), GameStatus::Ongoing);
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert!(!game.is_finished());
    }

    #[test]
    fn out_of_bounds_is_invalid_input() {
        let mut game = game((2, 2), &[]);

        let err = game.reveal((2, 2)).unwrap_err();

        assert_eq!(err, GameError::InvalidCoords);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn public_view_hides_unrevealed_squares() {
        let mut game = game((4, 1), &[(2, 0)]);
        game.reveal((0, 0)).unwrap();

        let view = game.public_view();

        assert_eq!(view.status, GameStatus::Ongoing);
        assert_eq!(view.grid.mine_count, 1);
        for square in &view.grid.squares {
            match (square.x, square.state) {
                (0, SquareState::Revealed { has_mine, adjacent_mines }) => {
                    assert!(!has_mine);
                    assert_eq!(adjacent_mines, 0);
                }
                (1, SquareState::Revealed { adjacent_mines, .. }) => assert_eq!(adjacent_mines, 1),
                (2 | 3, SquareState::Hidden { has_flag }) => assert!(!has_flag),
                other => panic!("unexpected square view {other:?}"),
            }
        }
    }

    #[test]
    fn game_survives_a_json_round_trip_mid_play() {
        let mut game = game((4, 4), &[(3, 3)]);
        game.set_flag((3, 3)).unwrap();
        game.reveal((0, 3)).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, game);
    }
}
