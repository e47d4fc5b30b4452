use std::fmt;
use std::ops::Not;

use itertools::Itertools;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// One grid position, either unclaimed or holding a player's mark.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Display, EnumIter)]
pub enum Cell {
    #[strum(serialize = ".")]
    Empty,
    X,
    O,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Display, EnumIter)]
pub enum Player {
    X,
    O,
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// A target coordinate for a mark, row and column each in `0..=2`.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Returned by [`Board::apply`] when the target cell is occupied or the
/// coordinate lies outside the grid.
#[derive(Error, Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[error("cell ({}, {}) is not open for play", .0.row, .0.col)]
pub struct InvalidMoveError(pub Move);

/// A complete 3x3 position. Value semantics throughout: every transition
/// produces a fresh board, no operation mutates the board it was given.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// The starting position, all nine cells empty.
    pub fn empty() -> Self {
        Self::new([Cell::Empty; 9])
    }

    /// Builds a board from cells given in row-major order.
    pub fn new(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        debug_assert!(row <= 2 && col <= 2);
        self.cells[row * 3 + col]
    }

    /// The side to move, recomputed from mark counts. X opens, so X is to
    /// move whenever the counts are level. Only meaningful for positions
    /// reachable through alternating play; reachability is not validated.
    pub fn current_player(&self) -> Player {
        if !self.cells.contains(&Cell::X) {
            return Player::X;
        }
        let x_count = self.cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = self.cells.iter().filter(|&&c| c == Cell::O).count();
        if o_count < x_count {
            Player::O
        } else {
            Player::X
        }
    }

    /// Every empty cell, enumerated row-major. The search relies on this
    /// order for its tie-break; other callers should treat it as a set.
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..3)
            .cartesian_product(0..3)
            .filter(|&(row, col)| self.cells[row * 3 + col] == Cell::Empty)
            .map(|(row, col)| Move::new(row, col))
            .collect()
    }

    /// Plays the side to move at the given coordinate, returning the
    /// resulting position. Fails if the cell is occupied or out of range.
    pub fn apply(&self, to_play: Move) -> Result<Board, InvalidMoveError> {
        if to_play.row > 2 || to_play.col > 2 {
            return Err(InvalidMoveError(to_play));
        }
        let index = to_play.row * 3 + to_play.col;
        if self.cells[index] != Cell::Empty {
            return Err(InvalidMoveError(to_play));
        }
        let mut next = self.clone();
        next.cells[index] = self.current_player().into();
        Ok(next)
    }

    /// The player holding a completed line, if any. Lines are scanned rows
    /// first, then columns, then diagonals; a valid position has at most one
    /// winner so the order is unobservable.
    pub fn winner(&self) -> Option<Player> {
        Self::WIN_LINES.iter().find_map(|line| {
            match (self.cells[line[0]], self.cells[line[1]], self.cells[line[2]]) {
                (Cell::X, Cell::X, Cell::X) => Some(Player::X),
                (Cell::O, Cell::O, Cell::O) => Some(Player::O),
                _ => None,
            }
        })
    }

    /// True once a line is complete or the grid is full.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.cells.contains(&Cell::Empty)
    }

    /// Outcome from X's perspective: +1 X won, -1 O won, 0 otherwise.
    /// Meaningful only on terminal boards.
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    const WIN_LINES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cells[row * 3 + col])?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::Cell::{Empty, O, X};
    use super::{Board, Cell, InvalidMoveError, Move, Player};

    #[test]
    fn empty_board() {
        let board = Board::empty();
        assert_eq!(board.current_player(), Player::X);
        assert_eq!(board.legal_moves().len(), 9);
        assert_eq!(board.winner(), None);
        assert!(!board.is_terminal());
    }

    #[test]
    fn players_alternate() {
        let mut board = Board::empty();
        let mut expected = Player::X;
        for to_play in [
            Move::new(1, 1),
            Move::new(0, 0),
            Move::new(2, 2),
            Move::new(0, 2),
            Move::new(2, 0),
        ] {
            assert_eq!(board.current_player(), expected);
            board = board.apply(to_play).unwrap();
            expected = !expected;
        }
        assert_eq!(board.current_player(), expected);
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let board = Board::empty().apply(Move::new(1, 1)).unwrap();
        let snapshot = board.clone();
        let next = board.apply(Move::new(0, 2)).unwrap();

        assert_eq!(board, snapshot);
        let changed = (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .filter(|&(row, col)| board.cell(row, col) != next.cell(row, col))
            .collect::<Vec<_>>();
        assert_eq!(changed, vec![(0, 2)]);
        assert_eq!(next.cell(0, 2), Cell::O);
    }

    #[test]
    fn apply_rejects_occupied_and_out_of_range() {
        let board = Board::new([X, O, Empty, Empty, X, Empty, Empty, Empty, Empty]);
        for taken in [Move::new(0, 0), Move::new(0, 1), Move::new(1, 1)] {
            assert_eq!(board.apply(taken), Err(InvalidMoveError(taken)));
        }
        for outside in [Move::new(3, 0), Move::new(0, 3), Move::new(9, 9)] {
            assert_eq!(board.apply(outside), Err(InvalidMoveError(outside)));
        }
    }

    #[test]
    fn every_line_produces_its_winner() {
        for player in Player::iter() {
            for line in Board::WIN_LINES {
                let mut cells = [Empty; 9];
                for index in line {
                    cells[index] = player.into();
                }
                let board = Board::new(cells);
                assert_eq!(board.winner(), Some(player));
                assert!(board.is_terminal());
            }
        }
    }

    #[test]
    fn won_boards_score_for_the_winner() {
        let board = Board::new([X, X, X, O, O, Empty, Empty, Empty, Empty]);
        assert_eq!(board.winner(), Some(Player::X));
        assert!(board.is_terminal());
        assert_eq!(board.utility(), 1);

        let board = Board::new([X, X, O, X, O, Empty, O, Empty, Empty]);
        assert_eq!(board.winner(), Some(Player::O));
        assert!(board.is_terminal());
        assert_eq!(board.utility(), -1);
    }

    #[test]
    fn full_board_without_a_line_is_a_draw() {
        let board = Board::new([X, X, O, O, O, X, X, X, O]);
        assert_eq!(board.winner(), None);
        assert!(board.legal_moves().is_empty());
        assert!(board.is_terminal());
        assert_eq!(board.utility(), 0);
    }

    #[test]
    fn queries_are_idempotent() {
        let board = Board::new([X, O, Empty, Empty, X, Empty, Empty, Empty, O]);
        assert_eq!(board.winner(), board.winner());
        assert_eq!(board.is_terminal(), board.is_terminal());
        assert_eq!(board.legal_moves(), board.legal_moves());
        assert_eq!(board.current_player(), board.current_player());
    }

    #[test]
    fn render_marks_row_by_row() {
        let board = Board::new([X, Empty, Empty, Empty, O, Empty, Empty, Empty, X]);
        assert_eq!(board.to_string(), "X . .\n. O .\n. . X");
    }
}
