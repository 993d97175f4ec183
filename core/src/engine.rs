use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::highscore::load_or_default;
use crate::*;

/// Number of tiles placed by [`Game::start`].
pub const STARTING_TILES: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Nothing started yet. Reserved for front-ends; a [`Game`] is never idle.
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Won => "win",
            Self::Lost => "lose",
        }
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// A single 2048 game: board, score, high score and status.
///
/// Randomness and high-score storage are injected so that front-ends pick
/// the medium and tests can script exact spawns.
#[derive(Clone, Debug)]
pub struct Game<R = SeededRandom, S = NoStore> {
    config: GameConfig,
    board: Board,
    score: Score,
    highscore: Score,
    status: GameStatus,
    rng: R,
    store: S,
}

impl Game {
    /// Default 4×4 game with a seeded generator and no high-score storage.
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameConfig::default(), SeededRandom::new(seed), NoStore)
    }

    /// Default game continuing from the given rows.
    pub fn from_rows<Row: AsRef<[Tile]>>(rows: &[Row], seed: u64) -> Result<Self> {
        let board = Board::from_rows(rows)?;
        Self::with_board(GameConfig::default(), board, SeededRandom::new(seed), NoStore)
    }
}

impl<R: RandomSource, S: HighscoreStore> Game<R, S> {
    /// Creates a game and immediately starts it.
    ///
    /// `config` is brought within the bounds of [`GameConfig::new`] first.
    pub fn new(config: GameConfig, rng: R, mut store: S) -> Self {
        let config = config.normalized();
        let highscore = load_or_default(&mut store);
        let mut game = Self {
            config,
            board: Board::empty(config.size),
            score: 0,
            highscore,
            status: GameStatus::Playing,
            rng,
            store,
        };
        game.start();
        game
    }

    /// Creates a game on a copy of `board` without spawning anything.
    ///
    /// The board must match the normalized `config.size` and hold only empty
    /// cells or powers of two.
    pub fn with_board(config: GameConfig, board: Board, rng: R, mut store: S) -> Result<Self> {
        let config = config.normalized();
        board.validate(config.size)?;
        let highscore = load_or_default(&mut store);
        Ok(Self {
            config,
            board,
            score: 0,
            highscore,
            status: GameStatus::Playing,
            rng,
            store,
        })
    }

    pub fn start(&mut self) {
        self.board = Board::empty(self.config.size);
        self.score = 0;
        self.status = GameStatus::Playing;
        for _ in 0..STARTING_TILES {
            spawn_tile(&mut self.board, &mut self.rng, self.config.four_probability);
        }
        log::info!(
            "Started {0}x{0} game, high score {1}",
            self.config.size,
            self.highscore
        );
    }

    /// Same as [`Game::start`], for front-ends that tell "play again" apart.
    pub fn restart(&mut self) {
        self.start();
    }

    /// Slides the board in `direction`.
    ///
    /// When any cell changes the merge points are scored and one tile is
    /// spawned; otherwise the board is left as is. Either way the status is
    /// re-evaluated afterwards.
    ///
    /// Once the game is won or lost, moves are ignored and return
    /// [`MoveOutcome::NoChange`]. The browser game keeps sliding a finished
    /// board; this engine freezes it instead, so front-ends that allow
    /// "keep going" after a win must start a new game.
    pub fn make_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.status.is_finished() {
            log::debug!(
                "Ignoring {} move, game is already {}",
                direction,
                self.status.as_str()
            );
            return MoveOutcome::NoChange;
        }

        let Slide { board, gained, .. } = self.board.slide(direction);
        let moved = board != self.board;
        if moved {
            self.board = board;
            self.add_score(gained);
            spawn_tile(&mut self.board, &mut self.rng, self.config.four_probability);
            log::debug!("Moved {}, gained {}, score {}", direction, gained, self.score);
        }

        self.update_status();

        match self.status {
            GameStatus::Won => MoveOutcome::Won,
            GameStatus::Lost => MoveOutcome::Lost,
            _ if moved => MoveOutcome::Moved { gained },
            _ => MoveOutcome::NoChange,
        }
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.make_move(Direction::Left)
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.make_move(Direction::Right)
    }

    pub fn move_up(&mut self) -> MoveOutcome {
        self.make_move(Direction::Up)
    }

    pub fn move_down(&mut self) -> MoveOutcome {
        self.make_move(Direction::Down)
    }

    fn add_score(&mut self, gained: Score) {
        self.score += gained;
        if self.score <= self.highscore {
            return;
        }

        self.highscore = self.score;
        if let Err(err) = self.store.save(self.highscore) {
            log::warn!("Could not save high score {}: {}", self.highscore, err);
        }
    }

    fn update_status(&mut self) {
        if self.board.is_stuck() {
            self.status = GameStatus::Lost;
            log::info!("No moves left, game lost with score {}", self.score);
        } else if self.board.has_winning_tile(self.config.winning_tile) {
            self.status = GameStatus::Won;
            log::info!(
                "Reached {}, game won with score {}",
                self.config.winning_tile,
                self.score
            );
        }
    }
}

impl<R, S> Game<R, S> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Copy of the current board; changing it never affects the game.
    pub fn state(&self) -> Board {
        self.board.clone()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn highscore(&self) -> Score {
        self.highscore
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether a move in `direction` would change the board.
    pub fn can_move(&self, direction: Direction) -> bool {
        !self.status.is_finished() && self.board.can_slide(direction)
    }

    pub fn available_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.can_move(direction))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(rows: [[Tile; 4]; 4], rolls: &[f64]) -> Game<ScriptedRandom, NoStore> {
        let board = Board::from_rows(&rows).unwrap();
        Game::with_board(
            GameConfig::default(),
            board,
            ScriptedRandom::new(rolls.iter().copied()),
            NoStore,
        )
        .unwrap()
    }

    /// Rolls that spawn a 2 in the last empty cell.
    const LAST_CELL_TWO: [f64; 2] = [0.999, 0.0];

    #[test]
    fn fresh_game_has_two_small_tiles() {
        for seed in 0..32 {
            let game = Game::seeded(seed);

            assert_eq!(game.board().tile_count(), 2);
            assert!(game
                .board()
                .cells()
                .iter()
                .all(|&value| matches!(value, 0 | 2 | 4)));
            assert_eq!(game.score(), 0);
            assert_eq!(game.status(), GameStatus::Playing);
        }
    }

    #[test]
    fn left_merge_scores_and_spawns_one_tile() {
        let mut game = scripted([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], &LAST_CELL_TWO);

        let outcome = game.move_left();

        assert_eq!(outcome, MoveOutcome::Moved { gained: 4 });
        assert_eq!(game.state().to_rows()[0], [4, 0, 0, 0]);
        assert_eq!(game.board()[(3, 3)], 2);
        assert_eq!(game.board().tile_count(), 2);
        assert_eq!(game.score(), 4);
        assert_eq!(game.highscore(), 4);
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let rows = [[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]];
        let mut game = scripted(rows, &LAST_CELL_TWO);

        let outcome = game.make_move(Direction::Up);

        assert_eq!(outcome, MoveOutcome::NoChange);
        assert_eq!(game.state(), Board::from_rows(&rows).unwrap());
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.rng.consumed(), 0);
    }

    #[test]
    fn filling_last_gap_without_pairs_loses() {
        let mut game = scripted(
            [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [0, 4, 2, 4]],
            &[0.0, 0.0],
        );

        let outcome = game.move_left();

        assert_eq!(outcome, MoveOutcome::Lost);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.state().to_rows()[3], [4, 2, 4, 2]);
    }

    #[test]
    fn stuck_board_with_winning_tile_still_loses() {
        let mut game = scripted(
            [[2048, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
            &[],
        );
        assert_eq!(game.status(), GameStatus::Playing);

        assert_eq!(game.move_right(), MoveOutcome::Lost);
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn reaching_winning_tile_wins() {
        let mut game = scripted([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]], &LAST_CELL_TWO);

        assert_eq!(game.move_left(), MoveOutcome::Won);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.score(), 2048);
    }

    #[test]
    fn finished_game_ignores_moves() {
        let mut game = scripted([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]], &LAST_CELL_TWO);
        game.move_left();
        let board = game.state();

        assert_eq!(game.move_down(), MoveOutcome::NoChange);
        assert_eq!(game.state(), board);
        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.available_moves().is_empty());
    }

    #[test]
    fn dead_board_is_only_marked_lost_on_next_move() {
        let mut game = scripted(
            [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
            &[],
        );

        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.available_moves().is_empty());

        assert_eq!(game.move_left(), MoveOutcome::Lost);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.rng.consumed(), 0);
    }

    #[test]
    fn largest_tiles_slide_without_merging() {
        let mut game = Game::from_rows(&[[MAX_TILE, MAX_TILE, 0, 0], [0; 4], [0; 4], [0; 4]], 0)
            .unwrap();

        assert_eq!(game.move_left(), MoveOutcome::NoChange);
        assert_eq!(game.move_right(), MoveOutcome::Moved { gained: 0 });
        assert_eq!(game.state().to_rows()[0], [0, 0, MAX_TILE, MAX_TILE]);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn constructors_normalize_the_config() {
        let config = GameConfig::new_unchecked(4, 0, -0.5);
        let board = Board::from_rows(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game =
            Game::with_board(config, board, ScriptedRandom::new(LAST_CELL_TWO), NoStore).unwrap();

        assert_eq!(game.config(), &GameConfig::new(4, 4, 0.0));
        assert_eq!(game.move_right(), MoveOutcome::Moved { gained: 0 });
        assert_eq!(game.status(), GameStatus::Playing);

        let fresh = Game::new(GameConfig::new_unchecked(0, 3, -1.0), SeededRandom::new(1), NoStore);
        assert_eq!(fresh.config(), &GameConfig::new(MIN_SIZE, 4, 0.0));
        assert_eq!(fresh.board().size(), MIN_SIZE);
    }

    #[test]
    fn state_is_a_copy() {
        let game = scripted([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], &[]);

        let mut cells = game.state().into_cells();
        cells[[0, 0]] = 1024;

        assert_eq!(game.board()[(0, 0)], 2);
    }

    #[test]
    fn with_board_rejects_malformed_grids() {
        let small = Board::from_rows(&[[2, 0, 0], [0, 0, 0], [0, 0, 0]]).unwrap();
        let result = Game::with_board(GameConfig::default(), small, SeededRandom::new(0), NoStore);

        assert_eq!(
            result.unwrap_err(),
            GameError::InvalidBoardState(BoardDefect::RowCount {
                expected: 4,
                found: 3
            })
        );
        assert!(Game::from_rows(&[[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 0).is_err());
    }

    #[test]
    fn highscore_is_loaded_and_saved_on_records() {
        let board = Board::from_rows(&[[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(
            GameConfig::default(),
            board,
            ScriptedRandom::new(LAST_CELL_TWO),
            MemoryStore::new(10),
        )
        .unwrap();
        assert_eq!(game.highscore(), 10);

        game.move_left();
        assert_eq!(game.score(), 12);
        assert_eq!(game.highscore(), 12);
        assert_eq!(game.store().highscore(), 12);
        assert_eq!(game.store().saves(), 1);

        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.highscore(), 12);
        assert_eq!(game.board().tile_count(), STARTING_TILES);
    }

    #[test]
    fn score_below_record_does_not_save() {
        let board = Board::from_rows(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(
            GameConfig::default(),
            board,
            ScriptedRandom::new(LAST_CELL_TWO),
            MemoryStore::new(100),
        )
        .unwrap();

        game.move_left();

        assert_eq!(game.score(), 4);
        assert_eq!(game.highscore(), 100);
        assert_eq!(game.store().saves(), 0);
    }

    #[test]
    fn store_failures_do_not_stop_play() {
        struct Offline;

        impl HighscoreStore for Offline {
            fn load(&mut self) -> core::result::Result<Score, StoreError> {
                Err(StoreError::Unavailable)
            }

            fn save(&mut self, _highscore: Score) -> core::result::Result<(), StoreError> {
                Err(StoreError::Unavailable)
            }
        }

        let board = Board::from_rows(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(
            GameConfig::default(),
            board,
            ScriptedRandom::new(LAST_CELL_TWO),
            Offline,
        )
        .unwrap();
        assert_eq!(game.highscore(), 0);

        assert_eq!(game.move_left(), MoveOutcome::Moved { gained: 4 });
        assert_eq!(game.highscore(), 4);
    }

    #[test]
    fn available_moves_lists_changing_directions() {
        let game = scripted([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]], &[]);

        assert_eq!(game.available_moves(), [Direction::Down]);
        assert!(game.can_move(Direction::Down));
        assert!(!game.can_move(Direction::Left));
    }

    #[test]
    fn custom_winning_tile() {
        let config = GameConfig::new(4, 64, 0.1);
        let board = Board::from_rows(&[[32, 32, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game =
            Game::with_board(config, board, ScriptedRandom::new(LAST_CELL_TWO), NoStore).unwrap();

        assert_eq!(game.move_right(), MoveOutcome::Won);
    }
}
