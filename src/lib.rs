//! Exhaustive minimax engine for Tic-Tac-Toe.
//!
//! The board logic lives in [`board`], the search in [`min_max`]. All
//! operations are pure: boards are values, transitions return fresh boards,
//! and the search is deterministic apart from the explicitly random helper.

pub mod board;
pub mod min_max;

pub use board::{Board, Cell, InvalidMoveError, Move, Player};
pub use min_max::{best_move, choose_random_move, optimal_moves, score_moves, ScoredMove};
