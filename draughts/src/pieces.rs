use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Starts on rows 0 to 2 and moves towards row 7. Moves first.
    White,
    /// Starts on rows 5 to 7 and moves towards row 0.
    Red,
}

/// Whether a [piece](Piece) has been promoted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Man,
    King,
}

/// A draughts piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Red,
            Color::Red => Color::White,
        }
    }

    /// The row step of a forward move for this side.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Red => -1,
        }
    }

    /// The row on which a man of this color is promoted.
    pub fn promotion_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Red => 0,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Red => write!(f, "Red"),
        }
    }
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self {
            color,
            rank: Rank::Man,
        }
    }

    pub const fn king(color: Color) -> Self {
        Self {
            color,
            rank: Rank::King,
        }
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// The same piece after promotion. Kings stay kings.
    pub fn promoted(self) -> Self {
        Self {
            rank: Rank::King,
            ..self
        }
    }

    /// The row/column steps this piece may take, forward diagonals first.
    pub fn directions(&self) -> &'static [(i8, i8)] {
        match (self.color, self.rank) {
            (Color::White, Rank::Man) => &[(1, -1), (1, 1)],
            (Color::Red, Rank::Man) => &[(-1, -1), (-1, 1)],
            (Color::White, Rank::King) => &[(1, -1), (1, 1), (-1, -1), (-1, 1)],
            (Color::Red, Rank::King) => &[(-1, -1), (-1, 1), (1, -1), (1, 1)],
        }
    }

    /// Single-letter code: `w`/`r` for men, `W`/`R` for kings.
    pub fn to_char(&self) -> char {
        match (self.color, self.rank) {
            (Color::White, Rank::Man) => 'w',
            (Color::White, Rank::King) => 'W',
            (Color::Red, Rank::Man) => 'r',
            (Color::Red, Rank::King) => 'R',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Piece::man(Color::White)),
            'W' => Some(Piece::king(Color::White)),
            'r' => Some(Piece::man(Color::Red)),
            'R' => Some(Piece::king(Color::Red)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The error type for the [`FromStr`] instance of [`Piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceFromStrErr {
    Empty,
    MoreThanOneChar,
    InvalidCode(char),
}

impl std::fmt::Display for PieceFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceFromStrErr::Empty => write!(f, "Empty piece code"),
            PieceFromStrErr::MoreThanOneChar => write!(f, "A piece code is a single character"),
            PieceFromStrErr::InvalidCode(c) => {
                write!(f, "'{}' is not one of the piece codes w, W, r, R", c)
            }
        }
    }
}

impl std::error::Error for PieceFromStrErr {}

impl FromStr for Piece {
    type Err = PieceFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(PieceFromStrErr::Empty)?;
        if chars.next().is_some() {
            return Err(PieceFromStrErr::MoreThanOneChar);
        }
        Piece::from_char(c).ok_or(PieceFromStrErr::InvalidCode(c))
    }
}
