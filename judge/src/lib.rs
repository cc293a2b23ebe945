mod game;
mod player;
mod recording;
pub use game::*;
pub use player::*;
pub use recording::*;

use draughts::GameState;

/// Settings shared by all games of a match.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Every game starts from this position.
    pub start: GameState,
    /// A game without a winner after this many turns is a draw.
    pub max_turns: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            start: GameState::new(),
            max_turns: 200,
        }
    }
}
