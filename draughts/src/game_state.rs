use crate::{Board, Color, Square};

/// The full state of a game: the board, whose turn it is, and whether a
/// piece is in the middle of a capture chain.
///
/// Moves are made through [`Self::play()`] (or the lower-level
/// [`Self::execute_move()`]), which keep the invariants below intact:
/// - `forced_continuation` is only set while the piece on it has a capture available
/// - when it is set, that piece is the only one that may move
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) forced_continuation: Option<Square>,
}

impl GameState {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// A state at the start of a turn, with an arbitrary position.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            forced_continuation: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The square of the piece that has to continue its capture chain, if any.
    pub fn forced_continuation(&self) -> Option<Square> {
        self.forced_continuation
    }

    /// Returns the winner, if one side has no pieces left.
    ///
    /// A side that still has pieces but cannot move is not considered lost.
    pub fn is_terminal(&self) -> Option<Color> {
        if self.board.count(Color::White) == 0 {
            Some(Color::Red)
        } else if self.board.count(Color::Red) == 0 {
            Some(Color::White)
        } else {
            None
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
