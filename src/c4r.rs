//! Connect Four board model.

use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, ParseBoardError};

/// One of the two players. The discriminant is the player's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// The player whose turn follows this one.
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Numeric id (1 or 2).
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Glyph used for this player's pieces in the text form of a board.
    pub fn glyph(self) -> char {
        match self {
            Player::One => '🔴',
            Player::Two => '🔵',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// The contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Occupied(Player),
}

const EMPTY_GLYPH: char = '⚫';

/// The column for a given move (0..[Board::width]).
pub type Column = usize;

/// A `height` x `width` grid of cells.
/// Row 0 is the top of the board and row `height - 1` is the bottom, so pieces settle at the
/// highest free row index of their column. Cells are stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Board {
    pub const DEFAULT_WIDTH: usize = 7;
    pub const DEFAULT_HEIGHT: usize = 6;

    /// Creates an empty board.
    pub fn new(width: usize, height: usize) -> Board {
        Board {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Drops a piece for `player` into `col`.
    /// The piece settles in the lowest empty row, whose index is returned. A full column is
    /// reported as [BoardError::FullColumn] and leaves the board untouched.
    pub fn drop_piece(&mut self, col: Column, player: Player) -> Result<usize, BoardError> {
        if col >= self.width {
            return Err(BoardError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }

        for row in (0..self.height).rev() {
            let idx = self.idx_unchecked(row, col);
            if self.cells[idx] == CellState::Empty {
                self.cells[idx] = CellState::Occupied(player);
                return Ok(row);
            }
        }
        Err(BoardError::FullColumn { column: col })
    }

    /// Returns the cell at the given position, or None if it is off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[self.idx_unchecked(row, col)])
    }

    /// Returns the player occupying the given cell.
    pub fn occupant(&self, row: usize, col: usize) -> Option<Player> {
        match self.cell(row, col) {
            Some(CellState::Occupied(player)) => Some(player),
            _ => None,
        }
    }

    /// Whether the given cell holds a piece. Coordinates off the board are never occupied.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.occupant(row, col).is_some()
    }

    /// True once every cell holds a piece.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != CellState::Empty)
    }

    /// Number of pieces on the board.
    pub fn ply(&self) -> usize {
        self.cells.iter().filter(|c| **c != CellState::Empty).count()
    }

    /// Indicates which columns can still accept a piece.
    pub fn legal_moves(&self) -> Vec<bool> {
        (0..self.width).map(|col| !self.is_occupied(0, col)).collect()
    }

    /// Parses the text form produced by [fmt::Display]. Blank lines and surrounding whitespace
    /// are ignored. Gravity is not checked so any position can be seeded.
    pub fn parse(s: &str) -> Result<Board, ParseBoardError> {
        let rows: Vec<Vec<CellState>> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(parse_glyph).collect::<Result<Vec<_>, _>>())
            .collect::<Result<_, _>>()?;

        let width = match rows.first() {
            Some(first) => first.len(),
            None => return Err(ParseBoardError("empty board".into())),
        };
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ParseBoardError(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                width
            )));
        }

        Ok(Board {
            width,
            height: rows.len(),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    const fn idx_unchecked(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }
}

fn parse_glyph(c: char) -> Result<CellState, ParseBoardError> {
    match c {
        c if c == Player::One.glyph() => Ok(CellState::Occupied(Player::One)),
        c if c == Player::Two.glyph() => Ok(CellState::Occupied(Player::Two)),
        EMPTY_GLYPH => Ok(CellState::Empty),
        other => Err(ParseBoardError(format!("unexpected glyph {:?}", other))),
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width {
                let glyph = match self.occupant(row, col) {
                    Some(player) => player.glyph(),
                    None => EMPTY_GLYPH,
                };
                write!(f, "{}", glyph)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test helpers for Board
    impl Board {
        fn test_drop(&mut self, col: usize, player: Player) -> usize {
            self.drop_piece(col, player).unwrap()
        }

        /// Drops pieces alternating between players, starting with [Player::One].
        fn test_drops(&mut self, cols: &[usize]) {
            let mut player = Player::One;
            for col in cols {
                self.test_drop(*col, player);
                player = player.other();
            }
        }
    }

    #[test]
    fn dropping_pieces_stacks_from_the_bottom() {
        let mut board = Board::default();
        for col in 0..board.width() {
            for n in 0..board.height() {
                let row = board.test_drop(col, Player::One);
                assert_eq!(row, board.height() - 1 - n);
                assert_eq!(board.occupant(row, col), Some(Player::One));
            }

            // Playing here should overflow column
            assert!(!board.legal_moves()[col]);
            let before = board.clone();
            assert_eq!(
                board.drop_piece(col, Player::Two),
                Err(BoardError::FullColumn { column: col })
            );
            assert_eq!(board, before);
        }
        assert!(board.is_full());
    }

    #[test]
    fn drop_on_empty_board_lands_on_bottom_row() {
        let mut board = Board::default();
        assert_eq!(board.drop_piece(5, Player::One), Ok(5));
        assert_eq!(board.cell(5, 5), Some(CellState::Occupied(Player::One)));
        assert_eq!(board.cell(4, 5), Some(CellState::Empty));
    }

    #[test]
    fn invalid_column_is_rejected() {
        let mut board = Board::default();
        assert_eq!(
            board.drop_piece(7, Player::One),
            Err(BoardError::InvalidColumn {
                column: 7,
                width: 7
            })
        );
        assert_eq!(board.ply(), 0);
    }

    #[test]
    fn out_of_range_cells() {
        let board = Board::new(3, 2);
        assert_eq!(board.cell(2, 0), None);
        assert_eq!(board.cell(0, 3), None);
        assert!(!board.is_occupied(10, 10));
    }

    #[test]
    fn is_full_only_when_every_cell_is_taken() {
        let mut board = Board::new(2, 2);
        board.test_drops(&[0, 1, 0]);
        assert!(!board.is_full());
        assert_eq!(board.ply(), 3);
        board.test_drop(1, Player::Two);
        assert!(board.is_full());
    }

    #[test]
    fn to_str() {
        let mut board = Board::default();
        board.test_drops(&[
            0, 1, 2, 3, 4, 5, // Bottom row
            0, 1, 2, 3, 4, 5, // Second row
            6, 6, // Last column
        ]);

        let expected = [
            "⚫⚫⚫⚫⚫⚫⚫",
            "⚫⚫⚫⚫⚫⚫⚫",
            "⚫⚫⚫⚫⚫⚫⚫",
            "⚫⚫⚫⚫⚫⚫⚫",
            "🔴🔵🔴🔵🔴🔵🔵",
            "🔴🔵🔴🔵🔴🔵🔴",
        ]
        .join("\n");

        assert_eq!(board.to_string(), expected);
        assert_eq!(expected.parse::<Board>(), Ok(board));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(Board::parse(""), Err(ParseBoardError(_))));
        assert!(matches!(
            Board::parse("⚫⚫⚫\n⚫⚫"),
            Err(ParseBoardError(_))
        ));
        assert!(matches!(Board::parse("⚫x⚫"), Err(ParseBoardError(_))));
    }

    #[test]
    fn legal_moves() {
        let mut board = Board::new(4, 2);
        assert_legal_moves(&board, "OOOO");

        board.test_drops(&[1, 1]);
        assert_legal_moves(&board, "OXOO");
        board.test_drops(&[3, 3, 0]);
        assert_legal_moves(&board, "OXOX");
        board.test_drops(&[0, 2, 2]);
        assert_legal_moves(&board, "XXXX");
    }

    fn assert_legal_moves(board: &Board, s: &str) {
        let legal_moves = board.legal_moves();
        assert_eq!(legal_moves.len(), s.len());
        for (col, expected) in s.chars().enumerate() {
            assert_eq!(
                legal_moves[col],
                expected == 'O',
                "unexpected legality for col {} in board\n\n{}",
                col,
                board
            );
        }
    }

    #[test]
    fn player_ids() {
        assert_eq!(Player::One.id(), 1);
        assert_eq!(Player::Two.id(), 2);
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.to_string(), "Player 2");
    }
}
