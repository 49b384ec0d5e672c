//! Two-player board game engine for connect four and chess
//!
//! One board type serves both games:
//! - Connect four on a 7x6 grid (configurable), pieces fall to the lowest
//!   free cell of a column and four in a row wins
//! - 8x8 chess with promotion, check, checkmate and stalemate (no castling,
//!   no en passant)
//!
//! # Architecture
//!
//! - [`board`]: Grid, pieces, apply/revert and the move history
//! - [`rules`]: Legality, check detection and game status
//! - [`eval`]: Static evaluation (window scoring, material)
//! - [`search`]: Negamax with alpha-beta and the quick tactical checks
//! - [`engine`]: AI opponent with difficulty tiers
//! - [`game`]: Session facade used by front ends
//! - [`score`]: Win/draw totals persisted as JSON
//!
//! # Quick Start
//!
//! ```
//! use boardgame::{AIEngine, Difficulty, Game, GameKind, Status};
//!
//! let mut game = Game::new(GameKind::ConnectFour).with_ai(AIEngine::with_seed(7));
//! game.drop_in(3).unwrap();
//!
//! let (reply, status) = game.play_ai_move(Difficulty::Expert).unwrap();
//! assert!(reply.best_move.from.is_none());
//! assert_eq!(status, Status::InProgress { check: false });
//! ```
//!
//! # Move Selection
//!
//! The AI tries, in order:
//! 1. A deliberate random move (the tier's blunder chance)
//! 2. An immediate win
//! 3. Blocking the opponent's immediate win
//! 4. A double threat (connect four)
//! 5. Minimax search, or a one-ply heuristic on the easier tiers

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod score;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, GameKind, Move, MoveRecord, Piece, PieceKind, Pos, Side};
pub use config::AppConfig;
pub use engine::{AIEngine, Difficulty, MoveResult, SearchProfile, SearchType};
pub use error::{ConfigError, EngineError, ScoreError};
pub use game::Game;
pub use rules::Status;
pub use score::{score_key, ScoreStore, Scoreboard};
