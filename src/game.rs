//! One game in progress: board, history and AI opponent
//!
//! [`Game`] is the only mutation entry point. Every move, human or AI,
//! passes through [`Game::submit`], which validates it and either applies it
//! in full (board, turn and history) or leaves everything untouched.
//!
//! # Example
//!
//! ```
//! use boardgame::{Game, GameKind, Pos, Status};
//!
//! let mut game = Game::new(GameKind::Chess);
//! let e2 = Pos::from_algebraic("e2").unwrap();
//! let e4 = Pos::from_algebraic("e4").unwrap();
//!
//! let status = game.submit_move(Some(e2), e4, None).unwrap();
//! assert_eq!(status, Status::InProgress { check: false });
//! game.undo().unwrap();
//! ```

use tracing::{debug, info, instrument};

use crate::board::{Board, Cell, GameKind, Move, MoveRecord, PieceKind, Pos, Side};
use crate::config::AppConfig;
use crate::engine::{AIEngine, Difficulty, MoveResult};
use crate::error::EngineError;
use crate::rules::{self, find_line, Status};

/// A game of either kind with its move history and AI opponent.
#[derive(Debug)]
pub struct Game {
    board: Board,
    /// Position restored by [`Game::reset`]
    initial: Board,
    history: Vec<MoveRecord>,
    ai: AIEngine,
}

impl Game {
    /// Standard starting position for `kind`
    #[must_use]
    pub fn new(kind: GameKind) -> Self {
        Self::from_board(Board::new(kind))
    }

    /// Start from an arbitrary position with an empty history
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            initial: board.clone(),
            board,
            history: Vec::new(),
            ai: AIEngine::new(),
        }
    }

    /// Build the game and AI described by a configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, EngineError> {
        let board = match config.game.kind {
            GameKind::ConnectFour => Board::connect_four(config.game.columns, config.game.rows)?,
            GameKind::Chess => Board::new(GameKind::Chess),
        };
        Ok(Self::from_board(board).with_ai(AIEngine::from_config(&config.ai)))
    }

    /// Replace the AI opponent
    #[must_use]
    pub fn with_ai(mut self, ai: AIEngine) -> Self {
        self.ai = ai;
        self
    }

    /// Back to the starting position, first side to move, empty history
    pub fn reset(&mut self) {
        self.board = self.initial.clone();
        self.history.clear();
        debug!(kind = %self.board.kind(), "game reset");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn kind(&self) -> GameKind {
        self.board.kind()
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.board.turn()
    }

    /// Applied moves, oldest first
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn ai_mut(&mut self) -> &mut AIEngine {
        &mut self.ai
    }

    /// Contents of a cell; `Cell::OffBoard` outside the grid
    #[inline]
    pub fn piece_at(&self, pos: Pos) -> Cell {
        self.board.piece_at(pos)
    }

    /// Current outcome, recomputed from the board
    pub fn status(&self) -> Status {
        let mut scratch = self.board.clone();
        rules::status(&mut scratch)
    }

    /// Every legal move for the side to move; empty once the game is over
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut scratch = self.board.clone();
        if rules::status(&mut scratch).is_terminal() {
            return Vec::new();
        }
        rules::legal_moves(&mut scratch)
    }

    /// Destinations reachable from `pos` by the side to move, for highlighting.
    ///
    /// Empty for off-board positions, opposing pieces, or a finished game.
    pub fn legal_moves_for(&self, pos: Pos) -> Vec<Pos> {
        if !self.board.contains(pos) {
            return Vec::new();
        }
        let mut scratch = self.board.clone();
        if rules::status(&mut scratch).is_terminal() {
            return Vec::new();
        }
        let mut targets = rules::legal_destinations(&mut scratch, pos);
        targets.sort();
        targets
    }

    /// Cells of the connect-four winning line, if there is one
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        match self.board.kind() {
            GameKind::ConnectFour => find_line(&self.board).map(|(_, line)| line),
            GameKind::Chess => None,
        }
    }

    /// Validate and apply a move.
    ///
    /// On success the move is in the history and the status it produced is
    /// returned. On error nothing has changed.
    #[instrument(skip(self), fields(side = %self.board.turn()))]
    pub fn submit(&mut self, mv: Move) -> Result<Status, EngineError> {
        if rules::status(&mut self.board).is_terminal() {
            return Err(EngineError::GameOver);
        }
        if let Some(from) = mv.from.filter(|&from| !self.board.contains(from)) {
            return Err(EngineError::OutOfRange(from));
        }
        if !self.board.contains(mv.to) {
            return Err(EngineError::OutOfRange(mv.to));
        }
        if !rules::is_legal(&mut self.board, mv) {
            debug!(%mv, "illegal move rejected");
            return Err(EngineError::IllegalMove);
        }

        let record = self.board.apply(mv);
        self.history.push(record);
        let status = rules::status(&mut self.board);
        debug!(%mv, %status, ply = self.history.len(), "move applied");
        if status.is_terminal() {
            info!(%status, kind = %self.board.kind(), "game over");
        }
        Ok(status)
    }

    /// Submit a move given as origin, destination and optional promotion.
    ///
    /// Drops pass `None` as the origin.
    pub fn submit_move(
        &mut self,
        from: Option<Pos>,
        to: Pos,
        promotion: Option<PieceKind>,
    ) -> Result<Status, EngineError> {
        self.submit(Move { from, to, promotion })
    }

    /// Drop a disc into `column`, landing on its lowest open cell
    pub fn drop_in(&mut self, column: u8) -> Result<Status, EngineError> {
        if column >= self.board.cols() {
            return Err(EngineError::OutOfRange(Pos::new(0, column)));
        }
        if self.board.kind() != GameKind::ConnectFour {
            return Err(EngineError::IllegalMove);
        }
        match rules::drop_move(&self.board, column) {
            Some(mv) => self.submit(mv),
            None if self.status().is_terminal() => Err(EngineError::GameOver),
            None => Err(EngineError::IllegalMove),
        }
    }

    /// Ask the AI for a move for the side to move, without applying it
    #[instrument(skip(self))]
    pub fn request_ai_move(&mut self, difficulty: Difficulty) -> Result<MoveResult, EngineError> {
        if rules::status(&mut self.board).is_terminal() {
            return Err(EngineError::GameOver);
        }
        self.ai
            .choose_move(&mut self.board, difficulty)
            .ok_or(EngineError::GameOver)
    }

    /// Ask the AI for a move and submit it
    pub fn play_ai_move(&mut self, difficulty: Difficulty) -> Result<(MoveResult, Status), EngineError> {
        let result = self.request_ai_move(difficulty)?;
        let status = self.submit(result.best_move)?;
        Ok((result, status))
    }

    /// Take back the most recent move.
    ///
    /// Allowed after the game has ended; the game is in progress again
    /// afterwards.
    pub fn undo(&mut self) -> Result<MoveRecord, EngineError> {
        let record = self.history.pop().ok_or(EngineError::NoHistory)?;
        self.board.revert(&record);
        debug!(mv = %record.mv, side = %record.side, "move undone");
        Ok(record)
    }

    /// Take back up to two moves so the same side is to move again.
    ///
    /// Returns how many moves were undone.
    pub fn undo_pair(&mut self) -> Result<usize, EngineError> {
        self.undo()?;
        if self.history.is_empty() {
            return Ok(1);
        }
        self.undo()?;
        Ok(2)
    }
}
