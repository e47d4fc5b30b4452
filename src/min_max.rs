use itertools::Itertools;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Move, Player};

/// A move together with its backed-up search value, always from X's
/// perspective.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct ScoredMove<M> {
    pub score: i32,
    pub min_max_move: M,
}

impl<M> ScoredMove<M> {
    pub fn new(score: i32, min_max_move: M) -> ScoredMove<M> {
        ScoredMove { score, min_max_move }
    }
}

/// The optimal move for the side to move, or `None` once the game is over.
///
/// The full game tree below each candidate is searched without pruning. X
/// maximizes the backed-up value, O minimizes it. Among equally scored moves
/// the first one in the row-major enumeration of the empty cells is kept, so
/// ties resolve lexicographically by row, then column.
pub fn best_move(board: &Board) -> Option<Move> {
    if board.is_terminal() {
        return None;
    }
    let player = board.current_player();
    let best = match player {
        Player::X => score_moves(board)
            .into_iter()
            .reduce(|best, m| if m.score > best.score { m } else { best }),
        Player::O => score_moves(board)
            .into_iter()
            .reduce(|best, m| if m.score < best.score { m } else { best }),
    };
    if let Some(chosen) = &best {
        debug!(
            "best move for {player}: {} (value {})",
            chosen.min_max_move, chosen.score
        );
    }
    best.map(|chosen| chosen.min_max_move)
}

/// Every legal move paired with its exhaustive minimax value.
pub fn score_moves(board: &Board) -> Vec<ScoredMove<Move>> {
    let to_move = board.current_player();
    board
        .legal_moves()
        .into_iter()
        .map(|m| {
            let next = board.apply(m).expect("legal_moves yields empty cells");
            ScoredMove::new(value(&next, !to_move), m)
        })
        .collect()
}

/// All moves tying for the best value for the side to move.
pub fn optimal_moves(board: &Board) -> Vec<ScoredMove<Move>> {
    let scored = score_moves(board);
    match board.current_player() {
        Player::X => scored.into_iter().max_set_by_key(|m| m.score),
        Player::O => scored.into_iter().min_set_by_key(|m| m.score),
    }
}

/// Uniform pick among the given moves, for callers that want variety among
/// equally good options.
pub fn choose_random_move<R: Rng>(
    moves: &[ScoredMove<Move>],
    rng: &mut R,
) -> Option<ScoredMove<Move>> {
    moves.choose(rng).cloned()
}

/// Backed-up value of `board` with `to_move` next to play. Terminal leaves
/// report their utility; interior nodes fold their children with max for X
/// and min for O. Depth is bounded by the nine cells, so plain recursion.
fn value(board: &Board, to_move: Player) -> i32 {
    if board.is_terminal() {
        return board.utility();
    }
    let children = board.legal_moves().into_iter().map(|m| {
        let next = board.apply(m).expect("legal_moves yields empty cells");
        value(&next, !to_move)
    });
    match to_move {
        Player::X => children.max().expect("non-terminal board has moves"),
        Player::O => children.min().expect("non-terminal board has moves"),
    }
}
