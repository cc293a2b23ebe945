//! A draughts (checkers) rule engine on the 8×8 board.
//!
//! Men move one step diagonally forward, kings one step in any diagonal
//! direction. Captures are mandatory and chain: a piece that captured must
//! keep capturing while it can, before the turn passes. A man reaching the
//! last row becomes a king immediately.
//!
//! ```
//! use draughts::{GameState, Square, TurnOutcome, Color};
//!
//! let mut state = GameState::new();
//! let played = state.play(Square::new(2, 1), Square::new(3, 2)).unwrap();
//! assert_eq!(played.outcome, TurnOutcome::TurnPassed { to: Color::Red });
//! ```
pub use board::*;
pub use bot::*;
pub use errors::*;
pub use game_state::*;
pub use movegen::*;
pub use pieces::*;
pub use session::*;
pub use snapshot::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod bot;
mod errors;
mod game_state;
mod movegen;
mod pieces;
mod session;
mod snapshot;
mod turn;
mod visualization;
