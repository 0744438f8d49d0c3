use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    NotStarted,
    Running,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Option<GameOutcome> {
        match self {
            Self::Won => Some(GameOutcome::Won),
            Self::Lost => Some(GameOutcome::Lost),
            Self::NotStarted | Self::Running => None,
        }
    }
}

/// Settings carried over from one game to the next.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Fixed seed for reproducible layouts, random when unset.
    pub seed: Option<u64>,
    pub cluster: ClusterPolicy,
    pub loss_policy: LossPolicy,
}

/// One game at a given difficulty, from the first click to a win or loss.
///
/// Valid transitions:
/// - NotStarted -> Running
/// - NotStarted -> Won / Lost (the first reveal already decides the game)
/// - Running -> Won / Lost
///
/// Once finished, reveals, flags and ticks are ignored until [`Session::new_game`] or
/// [`Session::set_difficulty`] replaces the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    difficulty: Difficulty,
    options: SessionOptions,
    board: Board,
    elapsed_ticks: u32,
    state: SessionState,
    reported: bool,
}

impl Session {
    /// Fails with a configuration error if a custom difficulty breaks the mine count rules.
    pub fn new(difficulty: Difficulty, options: SessionOptions) -> Result<Self> {
        let board = Board::new(difficulty.config(), options.seed, options.cluster)?;
        log::debug!("New {} game, seed {:?}", difficulty, options.seed);
        Ok(Self::with_board(difficulty, options, board))
    }

    /// Starts a session on a fixed layout.
    pub fn from_minefield(minefield: &Minefield, options: SessionOptions) -> Result<Self> {
        let board = Board::from_minefield(minefield)?;
        let difficulty = Difficulty::from_config(board.config());
        Ok(Self::with_board(difficulty, options, board))
    }

    fn with_board(difficulty: Difficulty, options: SessionOptions, board: Board) -> Self {
        Self {
            difficulty,
            options,
            board,
            elapsed_ticks: 0,
            state: SessionState::NotStarted,
            reported: false,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Flags the player may still place, never negative.
    pub fn flags_remaining(&self) -> CellCount {
        self.board.mine_count().saturating_sub(self.board.flagged_count())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.config().validate_coords(coords)?;
        if self.state.is_finished() {
            log::debug!("Ignoring reveal at {:?}, game already ended", coords);
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.board.reveal(coords)?;
        debug_assert!(self.board.is_generated());
        match outcome {
            RevealOutcome::NoChange => {}
            RevealOutcome::Revealed => self.mark_started(),
            RevealOutcome::HitMine => self.end_game(GameOutcome::Lost),
            RevealOutcome::Won => self.end_game(GameOutcome::Won),
        }
        Ok(outcome)
    }

    /// Toggles a flag, refusing new flags once the budget of one per mine is spent.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.config().validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let placing = self
            .board
            .tile(coords)
            .is_some_and(|tile| !tile.is_flagged() && !tile.is_revealed());
        if placing && self.flags_remaining() == 0 {
            log::debug!("No flags left for {:?}", coords);
            return Ok(MarkOutcome::NoChange);
        }

        self.board.toggle_flag(coords)
    }

    /// Counts one second of play. Returns whether the clock is running.
    pub fn tick(&mut self) -> bool {
        if self.state.is_running() {
            self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Throws the current game away and starts a fresh one at `difficulty`.
    ///
    /// On error the current game is kept as is.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        *self = Self::new(difficulty, self.options)?;
        Ok(())
    }

    /// Throws the current game away and starts a fresh one at the same difficulty.
    pub fn new_game(&mut self, seed: Option<u64>) -> Result<()> {
        let options = SessionOptions {
            seed,
            ..self.options
        };
        *self = Self::new(self.difficulty, options)?;
        Ok(())
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome()
    }

    pub fn tile_view(&self, coords: Coord2) -> Option<TileView> {
        self.board.view(coords, self.outcome())
    }

    /// Tiles changed since the previous call.
    pub fn take_changes(&mut self) -> Vec<Coord2> {
        self.board.take_dirty()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.outcome().map(|outcome| GameResult {
            difficulty: self.difficulty,
            elapsed_ticks: self.elapsed_ticks,
            outcome,
        })
    }

    /// Hands the finished game to `bridge`, at most once per game.
    ///
    /// Returns the submitted time, `None` if nothing was sent.
    pub fn report<B: ScoringBridge + ?Sized>(&mut self, bridge: &mut B, user: &str) -> Option<u32> {
        if self.reported {
            return None;
        }
        let result = self.result()?;
        self.reported = true;

        let score = self.options.loss_policy.score_for(&result)?;
        log::debug!("Submitting {} for {} ({:?})", score, user, result.difficulty);
        bridge.submit_score(result.difficulty, score, user);
        Some(score)
    }

    fn mark_started(&mut self) {
        if matches!(self.state, SessionState::NotStarted) {
            log::debug!("Game started");
            self.state = SessionState::Running;
        }
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        if self.state.is_finished() {
            return;
        }
        self.state = match outcome {
            GameOutcome::Won => SessionState::Won,
            GameOutcome::Lost => SessionState::Lost,
        };
        log::debug!("Game ended {:?} after {} ticks", outcome, self.elapsed_ticks);
    }
}
