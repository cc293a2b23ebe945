use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Color, Piece};

/// The number of rows, and of columns, of the board.
pub const BOARD_SIZE: i8 = 8;

const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A square on the board, identified by row and column, both in `0..8`.
///
/// Row 0 is White's home row, row 7 is Red's.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Square {
    row: i8,
    col: i8,
}

impl Square {
    /// Creates a square.
    ///
    /// Panics if the coordinates are off the board, see [`Self::try_new()`]
    /// for a non-panicking version.
    pub fn new(row: i8, col: i8) -> Self {
        Self::try_new(row, col).expect("Square coordinates must be in 0..8")
    }

    /// Creates a square, or returns `None` if the coordinates are off the board.
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        ((0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col))
            .then_some(Self { row, col })
    }

    pub fn row(self) -> i8 {
        self.row
    }

    pub fn col(self) -> i8 {
        self.col
    }

    /// The square `steps` diagonal steps away in direction `(di, dj)`, if
    /// that is still on the board.
    pub fn offset(self, (di, dj): (i8, i8), steps: i8) -> Option<Self> {
        Self::try_new(self.row + steps * di, self.col + steps * dj)
    }

    /// Pieces only ever stand on dark squares.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The square jumped over when moving two diagonal steps from `self` to `other`.
    pub fn midpoint(self, other: Square) -> Option<Self> {
        ((self.row - other.row).abs() == 2 && (self.col - other.col).abs() == 2).then(|| Self {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        })
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }

    fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + self.col as usize
    }
}

// Deserialized squares are bounds-checked like `try_new`.
impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Coords {
            row: i8,
            col: i8,
        }

        let Coords { row, col } = Coords::deserialize(deserializer)?;
        Square::try_new(row, col)
            .ok_or_else(|| D::Error::custom(format!("square ({}, {}) is off the board", row, col)))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The contents of all 64 squares.
///
/// This is a plain container: it performs no legality checks, see
/// [`GameState`](crate::GameState) for the rules.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; NUM_SQUARES],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    /// The starting position: twelve men per side on the dark squares of
    /// each side's three home rows.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for square in Square::all().filter(|sq| sq.is_dark()) {
            match square.row {
                0..=2 => board.set(square, Some(Piece::man(Color::White))),
                5..=7 => board.set(square, Some(Piece::man(Color::Red))),
                _ => {}
            }
        }
        board
    }

    /// Creates a board from the cells in row-major order.
    ///
    /// Returns `None` unless there are exactly 64 cells.
    pub fn from_cells(cells: &[Option<Piece>]) -> Option<Self> {
        Some(Self {
            cells: cells.try_into().ok()?,
        })
    }

    /// The cells in row-major order.
    pub fn cells(&self) -> &[Option<Piece>] {
        &self.cells
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.index()] = piece;
    }

    /// Removes and returns the piece on `square`.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.index()].take()
    }

    /// The number of pieces of this color, men and kings.
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|piece| piece.color == color)
            .count()
    }

    /// Occupied squares in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color == color)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// The error type for the [`FromStr`] instance of [`Board`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardFromStrErr {
    WrongNumberOfRows(usize),
    WrongNumberOfColumns { row: usize, cols: usize },
    InvalidCell { row: usize, col: usize, code: char },
}

impl std::fmt::Display for BoardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardFromStrErr::WrongNumberOfRows(n) => {
                write!(f, "Expected 8 rows, found {}", n)
            }
            BoardFromStrErr::WrongNumberOfColumns { row, cols } => {
                write!(f, "Expected 8 cells in row {}, found {}", row, cols)
            }
            BoardFromStrErr::InvalidCell { row, col, code } => {
                write!(f, "Invalid cell '{}' at ({}, {})", code, row, col)
            }
        }
    }
}

impl std::error::Error for BoardFromStrErr {}

/// Parses a diagram of eight non-blank lines, row 0 first.
///
/// Each line holds eight cells, whitespace between them is ignored. A cell
/// is a piece code (`w`, `W`, `r`, `R`) or `.`, `-` or `·` for an empty square.
impl FromStr for Board {
    type Err = BoardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(BoardFromStrErr::WrongNumberOfRows(rows.len()));
        }
        let mut board = Board::empty();
        for (row, line) in rows.into_iter().enumerate() {
            let codes: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if codes.len() != BOARD_SIZE as usize {
                return Err(BoardFromStrErr::WrongNumberOfColumns {
                    row,
                    cols: codes.len(),
                });
            }
            for (col, code) in codes.into_iter().enumerate() {
                let piece = match code {
                    '.' | '-' | '·' => None,
                    _ => Some(
                        Piece::from_char(code)
                            .ok_or(BoardFromStrErr::InvalidCell { row, col, code })?,
                    ),
                };
                board.set(Square::new(row as i8, col as i8), piece);
            }
        }
        Ok(board)
    }
}

/// Shorthand for creating a board from a diagram.
///
/// This macro is just calling the [`FromStr`] instance of [`Board`].
/// ```
/// # use draughts::{board, Color, Piece, Square};
/// let board = board!("
///     - w - - - - - -
///     - - - - - - - -
///     - - - - - - - -
///     - - - - - - - -
///     - - - - - - - -
///     - - - - - - - -
///     - - - - - - - -
///     - - - - - - R -
/// ");
/// assert_eq!(board.get(Square::new(0, 1)), Some(Piece::man(Color::White)));
/// assert_eq!(board.get(Square::new(7, 6)), Some(Piece::king(Color::Red)));
/// ```
#[macro_export]
macro_rules! board {
    ($diagram:literal) => {
        <$crate::Board as std::str::FromStr>::from_str($diagram)
            .expect("Invalid diagram given to board! macro")
    };
}
