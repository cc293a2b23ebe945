use draughts::{BotError, GameState, PlayedMove, RandomBot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

/// A participant in a match. Every player is a [`RandomBot`] with its own
/// random number generator.
pub struct Player {
    pub name: String,
    bot: RandomBot<StdRng>,
}

impl Player {
    pub fn new(name: &str, seed: u64) -> Self {
        Self {
            name: String::from(name),
            bot: RandomBot::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Plays the whole turn of the side to move.
    pub fn play_turn(&mut self, state: &mut GameState) -> Result<Vec<PlayedMove>, BotError> {
        let moves = self.bot.play_turn(state)?;
        trace!(player = &self.name, num_moves = moves.len(), "Player finished turn");
        Ok(moves)
    }
}
