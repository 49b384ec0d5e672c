//! AI engine integrating all search components
//!
//! This module provides the AI opponent. The search follows a priority
//! system and takes the first tier that yields a move:
//!
//! 1. **Blunder**: with the difficulty's blunder chance, play a random move
//! 2. **Immediate win**: any move that ends the game now
//! 3. **Block**: stop the opponent's immediate win
//! 4. **Double threat** (connect four): a drop that opens two winning columns
//! 5. **Minimax**: fixed-depth negamax with alpha-beta pruning, or the
//!    heuristic preference (center ordering / greedy capture scoring) when
//!    the difficulty has no search depth
//! 6. **Random**: uniform choice among legal moves
//!
//! # Example
//!
//! ```
//! use boardgame::{AIEngine, Board, Difficulty, GameKind};
//!
//! let mut engine = AIEngine::with_seed(7);
//! let mut board = Board::new(GameKind::ConnectFour);
//!
//! let result = engine.choose_move(&mut board, Difficulty::Expert).unwrap();
//! println!("Best move: {}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::{Board, GameKind, Move};
use crate::config::AiConfig;
use crate::eval::{evaluate, WIN_SCORE};
use crate::search::{
    center_move, find_block, find_double_threat, find_immediate_win, greedy_move, random_move,
    Searcher,
};

/// AI strength tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Built-in search profile of this tier for a game kind
    #[must_use]
    pub fn profile(self, kind: GameKind) -> SearchProfile {
        let (blunder_chance, connect_depth, chess_depth) = match self {
            Difficulty::Easy => (0.6, 0, 0),
            Difficulty::Medium => (0.3, 0, 0),
            Difficulty::Hard => (0.1, 4, 2),
            Difficulty::Expert => (0.0, 6, 3),
        };
        SearchProfile {
            blunder_chance,
            depth: match kind {
                GameKind::ConnectFour => connect_depth,
                GameKind::Chess => chess_depth,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Accepts tier names and the numeric levels 1 to 4
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            "expert" | "4" => Ok(Difficulty::Expert),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Resolved search parameters for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProfile {
    /// Probability of skipping every tier and playing a random move
    pub blunder_chance: f64,
    /// Minimax depth in plies; 0 selects the heuristic tier instead
    pub depth: u8,
}

/// Type of search that produced the result.
///
/// This indicates which tier of the pipeline found the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Move ends the game in the mover's favour
    ImmediateWin,
    /// Move stops the opponent's immediate win
    Block,
    /// Drop that leaves two winning columns
    DoubleThreat,
    /// Center preference or greedy capture scoring
    Heuristic,
    /// Alpha-beta search result
    Minimax,
    /// Random legal move (blunder or fallback)
    Random,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Move chosen; not yet applied
    pub best_move: Move,
    /// Score of the move for the side to move
    pub score: i32,
    /// Tier that found this move
    pub search_type: SearchType,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn new(best_move: Move, score: i32, search_type: SearchType, nodes: u64, start: Instant) -> Self {
        Self {
            best_move,
            score,
            search_type,
            nodes,
            time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// AI engine shared by both game kinds.
///
/// Owns its random source so choices are reproducible from a seed.
#[derive(Debug)]
pub struct AIEngine {
    /// Alpha-beta searcher
    searcher: Searcher,
    rng: StdRng,
    /// Replaces the tier's depth when set
    depth_override: Option<u8>,
    /// Replaces the tier's blunder chance when set
    blunder_override: Option<f64>,
}

impl AIEngine {
    /// Create an engine seeded from the OS.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create an engine whose choices are reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use boardgame::AIEngine;
    ///
    /// let engine = AIEngine::with_seed(42);
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            searcher: Searcher::new(),
            rng,
            depth_override: None,
            blunder_override: None,
        }
    }

    /// Create an engine from the `[ai]` configuration section.
    #[must_use]
    pub fn from_config(config: &AiConfig) -> Self {
        let mut engine = match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        engine.set_depth(config.depth);
        engine.set_blunder_chance(config.blunder_chance);
        engine
    }

    /// Override the minimax depth for every tier (`None` restores the table)
    pub fn set_depth(&mut self, depth: Option<u8>) {
        self.depth_override = depth;
    }

    /// Override the blunder chance for every tier (`None` restores the table).
    ///
    /// Values are clamped to `[0, 1]`; non-finite values count as 0.
    pub fn set_blunder_chance(&mut self, chance: Option<f64>) {
        self.blunder_override =
            chance.map(|p| if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 });
    }

    /// Effective profile for a request, overrides applied
    #[must_use]
    pub fn profile(&self, kind: GameKind, difficulty: Difficulty) -> SearchProfile {
        let mut profile = difficulty.profile(kind);
        if let Some(depth) = self.depth_override {
            profile.depth = depth;
        }
        if let Some(chance) = self.blunder_override {
            profile.blunder_chance = chance;
        }
        profile
    }

    /// Choose a move for the side to move without applying it.
    ///
    /// Returns `None` only when the side to move has no legal move. The
    /// board is unchanged on return.
    #[instrument(skip(self, board), fields(kind = %board.kind(), side = %board.turn()))]
    pub fn choose_move(&mut self, board: &mut Board, difficulty: Difficulty) -> Option<MoveResult> {
        let start = Instant::now();
        let profile = self.profile(board.kind(), difficulty);
        let mover = board.turn();

        let result = 'tiers: {
            if profile.blunder_chance > 0.0 && self.rng.random_bool(profile.blunder_chance) {
                let mv = random_move(board, &mut self.rng)?;
                debug!(%mv, chance = profile.blunder_chance, "deliberate blunder");
                break 'tiers MoveResult::new(mv, 0, SearchType::Random, 1, start);
            }

            if let Some(mv) = find_immediate_win(board) {
                break 'tiers MoveResult::new(mv, WIN_SCORE - 1, SearchType::ImmediateWin, 1, start);
            }

            if let Some(mv) = find_block(board) {
                let score = evaluate(&board.simulate(mv), mover);
                break 'tiers MoveResult::new(mv, score, SearchType::Block, 1, start);
            }

            if let Some(mv) = find_double_threat(board) {
                break 'tiers MoveResult::new(mv, WIN_SCORE - 3, SearchType::DoubleThreat, 1, start);
            }

            if profile.depth > 0 {
                let found = self.searcher.search(board, profile.depth);
                if let Some(mv) = found.best_move {
                    break 'tiers MoveResult::new(mv, found.score, SearchType::Minimax, found.nodes, start);
                }
            } else {
                let heuristic = match board.kind() {
                    GameKind::ConnectFour => {
                        center_move(board).map(|mv| (mv, evaluate(&board.simulate(mv), mover)))
                    }
                    GameKind::Chess => greedy_move(board, &mut self.rng),
                };
                if let Some((mv, score)) = heuristic {
                    break 'tiers MoveResult::new(mv, score, SearchType::Heuristic, 1, start);
                }
            }

            let mv = random_move(board, &mut self.rng)?;
            MoveResult::new(mv, 0, SearchType::Random, 1, start)
        };

        debug!(
            mv = %result.best_move,
            search_type = ?result.search_type,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "AI move chosen"
        );
        Some(result)
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Pos, Side};
    use crate::rules::{drop_move, is_legal};

    fn sq(name: &str) -> Pos {
        Pos::from_algebraic(name).unwrap()
    }

    #[test]
    fn test_profile_table() {
        let easy = Difficulty::Easy.profile(GameKind::Chess);
        assert_eq!(easy.depth, 0);
        assert!((easy.blunder_chance - 0.6).abs() < f64::EPSILON);

        assert_eq!(Difficulty::Hard.profile(GameKind::ConnectFour).depth, 4);
        assert_eq!(Difficulty::Hard.profile(GameKind::Chess).depth, 2);
        let expert = Difficulty::Expert.profile(GameKind::ConnectFour);
        assert_eq!(expert.depth, 6);
        assert_eq!(expert.blunder_chance, 0.0);
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        assert_eq!("expert".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert_eq!("1".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("impossible".parse::<Difficulty>().is_err());
        for tier in Difficulty::ALL {
            assert_eq!(tier.to_string().parse::<Difficulty>(), Ok(tier));
        }
    }

    #[test]
    fn test_overrides() {
        let mut engine = AIEngine::with_seed(1);
        engine.set_depth(Some(1));
        engine.set_blunder_chance(Some(2.5));
        let profile = engine.profile(GameKind::Chess, Difficulty::Expert);
        assert_eq!(profile.depth, 1);
        assert_eq!(profile.blunder_chance, 1.0);

        engine.set_blunder_chance(Some(f64::NAN));
        assert_eq!(engine.profile(GameKind::Chess, Difficulty::Easy).blunder_chance, 0.0);

        engine.set_depth(None);
        engine.set_blunder_chance(None);
        assert_eq!(
            engine.profile(GameKind::Chess, Difficulty::Hard),
            Difficulty::Hard.profile(GameKind::Chess)
        );
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut engine = AIEngine::with_seed(3);
        let mut board = Board::from_layout(
            GameKind::ConnectFour,
            &[".......", ".......", ".......", ".......", "OO.....", "XXX...."],
            Side::White,
        )
        .unwrap();
        let result = engine.choose_move(&mut board, Difficulty::Expert).unwrap();
        assert_eq!(Some(result.best_move), drop_move(&board, 3));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_prefers_win_over_block() {
        let mut engine = AIEngine::with_seed(3);
        let mut board = Board::from_layout(
            GameKind::ConnectFour,
            &[".......", ".......", ".......", "......X", "......X", "OOO...X"],
            Side::Black,
        )
        .unwrap();
        // Both sides threaten; taking the win comes before blocking
        let result = engine.choose_move(&mut board, Difficulty::Expert).unwrap();
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(Some(result.best_move), drop_move(&board, 3));

        let mut board = Board::from_layout(
            GameKind::ConnectFour,
            &[".......", ".......", ".......", "......O", "......O", "XXX...O"],
            Side::Black,
        )
        .unwrap();
        let result = engine.choose_move(&mut board, Difficulty::Expert).unwrap();
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(Some(result.best_move), drop_move(&board, 6));
    }

    #[test]
    fn test_engine_block_tier() {
        let mut engine = AIEngine::with_seed(3);
        let mut board = Board::from_layout(
            GameKind::ConnectFour,
            &[".......", ".......", ".......", ".......", "O......", "OXXX..."],
            Side::Black,
        )
        .unwrap();
        let result = engine.choose_move(&mut board, Difficulty::Expert).unwrap();
        assert_eq!(result.search_type, SearchType::Block);
        assert_eq!(Some(result.best_move), drop_move(&board, 4));
    }

    #[test]
    fn test_engine_minimax_on_quiet_position() {
        let mut engine = AIEngine::with_seed(5);
        let mut board = Board::new(GameKind::ConnectFour);
        let before = board.clone();
        let result = engine.choose_move(&mut board, Difficulty::Expert).unwrap();
        assert_eq!(result.search_type, SearchType::Minimax);
        assert!(result.nodes > 1);
        assert_eq!(board, before);
        assert!(is_legal(&mut board, result.best_move));
    }

    #[test]
    fn test_engine_heuristic_tier() {
        let mut engine = AIEngine::with_seed(5);
        engine.set_blunder_chance(Some(0.0));
        let mut board = Board::new(GameKind::ConnectFour);
        let result = engine.choose_move(&mut board, Difficulty::Easy).unwrap();
        assert_eq!(result.search_type, SearchType::Heuristic);
        assert_eq!(Some(result.best_move), drop_move(&board, 3));

        let mut chess = Board::new(GameKind::Chess);
        let result = engine.choose_move(&mut chess, Difficulty::Medium).unwrap();
        assert_eq!(result.search_type, SearchType::Heuristic);
        assert!(is_legal(&mut chess, result.best_move));
    }

    #[test]
    fn test_engine_always_blunders_at_full_chance() {
        let mut engine = AIEngine::with_seed(11);
        engine.set_blunder_chance(Some(1.0));
        let mut board = Board::new(GameKind::Chess);
        for _ in 0..20 {
            let result = engine.choose_move(&mut board, Difficulty::Expert).unwrap();
            assert_eq!(result.search_type, SearchType::Random);
            assert!(is_legal(&mut board, result.best_move));
        }
    }

    #[test]
    fn test_weak_tiers_sometimes_miss_a_win() {
        let board = Board::from_layout(
            GameKind::ConnectFour,
            &[".......", ".......", ".......", ".......", "OO.....", "XXX...."],
            Side::White,
        )
        .unwrap();
        for difficulty in [Difficulty::Easy, Difficulty::Medium] {
            let mut engine = AIEngine::with_seed(17);
            let mut seen = Vec::new();
            for _ in 0..60 {
                let mut scratch = board.clone();
                let result = engine.choose_move(&mut scratch, difficulty).unwrap();
                assert_eq!(scratch, board);
                assert!(is_legal(&mut scratch, result.best_move));
                if result.search_type == SearchType::ImmediateWin {
                    assert_eq!(Some(result.best_move), drop_move(&board, 3));
                }
                seen.push(result.search_type);
            }
            assert!(seen.contains(&SearchType::ImmediateWin), "{difficulty} never won");
            assert!(seen.contains(&SearchType::Random), "{difficulty} never blundered");
        }
    }

    #[test]
    fn test_engine_seed_reproducible() {
        let mut first = AIEngine::with_seed(99);
        let mut second = AIEngine::with_seed(99);
        let mut board = Board::new(GameKind::Chess);
        for _ in 0..10 {
            let a = first.choose_move(&mut board, Difficulty::Easy).unwrap();
            let b = second.choose_move(&mut board, Difficulty::Easy).unwrap();
            assert_eq!(a.best_move, b.best_move);
            assert_eq!(a.search_type, b.search_type);
        }
    }

    #[test]
    fn test_engine_mate_in_one_chess() {
        let mut engine = AIEngine::with_seed(2);
        let mut board = Board::from_layout(
            GameKind::Chess,
            &[
                "......k.", ".....ppp", "........", "........", "........", "........",
                "........", "R...K...",
            ],
            Side::White,
        )
        .unwrap();
        let result = engine.choose_move(&mut board, Difficulty::Expert).unwrap();
        assert_eq!(result.best_move, Move::step(sq("a1"), sq("a8")));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_no_move_when_stalemated() {
        let mut engine = AIEngine::with_seed(2);
        let mut board = Board::from_layout(
            GameKind::Chess,
            &[
                "k.......", "........", ".Q......", "........", "........", "........",
                "........", ".......K",
            ],
            Side::Black,
        )
        .unwrap();
        assert!(engine.choose_move(&mut board, Difficulty::Expert).is_none());
    }

    #[test]
    fn test_from_config() {
        let config = AiConfig {
            seed: Some(4),
            depth: Some(2),
            blunder_chance: Some(0.0),
            ..AiConfig::default()
        };
        let engine = AIEngine::from_config(&config);
        let profile = engine.profile(GameKind::ConnectFour, Difficulty::Easy);
        assert_eq!(profile.depth, 2);
        assert_eq!(profile.blunder_chance, 0.0);
    }
}
