use crate::{Color, Square};

/// The error type for [`GameState::execute_move()`](crate::GameState::execute_move).
///
/// The state is never modified when one of these is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    EmptyOrigin {
        from: Square,
    },
    WrongSide {
        from: Square,
        side_to_move: Color,
    },
    MustContinueChain {
        from: Square,
        chain_square: Square,
    },
    CaptureRequired {
        from: Square,
    },
    UnreachableDestination {
        from: Square,
        to: Square,
    },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::EmptyOrigin { from } => {
                write!(f, "There is no piece on {}", from)
            }
            IllegalMove::WrongSide { from, side_to_move } => write!(
                f,
                "The piece on {} does not belong to the side to move, which is {}",
                from, side_to_move
            ),
            IllegalMove::MustContinueChain { from, chain_square } => write!(
                f,
                "Tried to move the piece on {}, but the piece on {} must continue capturing",
                from, chain_square
            ),
            IllegalMove::CaptureRequired { from } => write!(
                f,
                "The piece on {} cannot capture, but a capture is available and mandatory",
                from
            ),
            IllegalMove::UnreachableDestination { from, to } => {
                write!(f, "The piece on {} cannot move to {}", from, to)
            }
        }
    }
}

/// The error type for the [`RandomBot`](crate::RandomBot).
#[derive(Debug, PartialEq, Eq)]
pub enum BotError {
    /// The side to move has no legal move. Check
    /// [`GameState::is_terminal()`](crate::GameState::is_terminal) before asking the bot.
    NoLegalMoves { side: Color },
    /// The bot picked a move that the rules rejected.
    IllegalMove(IllegalMove),
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BotError::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::NoLegalMoves { side } => {
                write!(f, "The bot was asked to move for {}, who has no legal moves", side)
            }
            BotError::IllegalMove(_) => write!(f, "The bot chose an illegal move"),
        }
    }
}

impl From<IllegalMove> for BotError {
    fn from(err: IllegalMove) -> Self {
        BotError::IllegalMove(err)
    }
}

/// The error type for saving and loading [snapshots](crate::Snapshot).
#[derive(Debug)]
pub enum SnapshotError {
    /// There is no snapshot under this name.
    NotFound { name: String },
    Io(std::io::Error),
    Malformed(serde_json::Error),
    WrongCellCount(usize),
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(err) => Some(err),
            SnapshotError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::NotFound { name } => write!(f, "No saved game named '{}'", name),
            SnapshotError::Io(_) => write!(f, "Could not access the saved game"),
            SnapshotError::Malformed(_) => write!(f, "The saved game could not be parsed"),
            SnapshotError::WrongCellCount(n) => {
                write!(f, "A saved board must have 64 cells, but this one has {}", n)
            }
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        SnapshotError::Io(err)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Malformed(err)
    }
}
