//! Search module for the AI opponent
//!
//! Contains:
//! - Tactical tiers: immediate win, block, double threat, heuristics
//! - Fixed-depth negamax with alpha-beta pruning

pub mod minimax;
pub mod tactics;

pub use minimax::{is_decisive, order_moves, SearchResult, Searcher};
pub use tactics::{
    center_move, find_block, find_double_threat, find_immediate_win, greedy_move, greedy_score,
    random_move, GreedyScore,
};
