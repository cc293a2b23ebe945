use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::debug;

use crate::{BotError, GameState, PlayedMove, Square, TurnOutcome};

/// An opponent that plays uniformly random legal moves.
///
/// It first picks one of the pieces that may move, then one of its
/// destinations. The random number generator is injected, so that games
/// can be reproduced from a seed.
#[derive(Clone, Debug)]
pub struct RandomBot<R> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Picks a single step or jump for the side to move.
    pub fn choose_move(&mut self, state: &GameState) -> Result<(Square, Square), BotError> {
        let legal = state.all_legal_moves();
        let side = state.side_to_move();
        // During a capture chain there is exactly one origin to pick.
        let (&from, destinations) = legal
            .moves
            .iter()
            .choose(&mut self.rng)
            .ok_or(BotError::NoLegalMoves { side })?;
        let &to = destinations
            .iter()
            .choose(&mut self.rng)
            .ok_or(BotError::NoLegalMoves { side })?;
        Ok((from, to))
    }

    /// Plays a whole turn, including every jump of a capture chain.
    pub fn play_turn(&mut self, state: &mut GameState) -> Result<Vec<PlayedMove>, BotError> {
        let mut played = Vec::new();
        loop {
            let (from, to) = self.choose_move(state)?;
            let played_move = state.play(from, to)?;
            played.push(played_move);
            if let TurnOutcome::TurnPassed { .. } = played_move.outcome {
                break;
            }
        }
        debug!(num_moves = played.len(), "Bot finished its turn");
        Ok(played)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{board, Color};

    #[test]
    fn forced_move_is_always_played() {
        // Red's only move is to jump from (5, 4) over (4, 3).
        let board = board!(
            "
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - w - - - -
            - - - - r - - -
            - - - - - - - -
            - - - - - - - -
            "
        );
        for seed in 0..20 {
            let mut bot = RandomBot::new(StdRng::seed_from_u64(seed));
            let state = GameState::from_board(board.clone(), Color::Red);
            assert_eq!(
                bot.choose_move(&state),
                Ok((Square::new(5, 4), Square::new(3, 2)))
            );
        }
    }

    #[test]
    fn plays_whole_chain() {
        let board = board!(
            "
            - - - - - - - w
            - - - - - - - -
            - - - - - - - -
            - - - - w - - -
            - - - - - - - -
            - - w - - - - -
            - r - - - - - -
            - - - - - - - -
            "
        );
        for seed in 0..10 {
            let mut bot = RandomBot::new(StdRng::seed_from_u64(seed));
            let mut state = GameState::from_board(board.clone(), Color::Red);
            let played = bot.play_turn(&mut state).unwrap();
            let path: Vec<_> = played.iter().map(|m| (m.from, m.to)).collect();
            assert_eq!(
                path,
                vec![
                    (Square::new(6, 1), Square::new(4, 3)),
                    (Square::new(4, 3), Square::new(2, 5)),
                ]
            );
            assert_eq!(state.side_to_move(), Color::White);
            assert_eq!(state.forced_continuation(), None);
            assert_eq!(state.board().count(Color::White), 1);
        }
    }

    #[test]
    fn no_legal_moves() {
        let board = board!(
            "
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            w - - - - - - -
            - r - - - - - -
            - - r - - - - -
            "
        );
        let mut bot = RandomBot::new(StdRng::seed_from_u64(0));
        let mut state = GameState::from_board(board, Color::White);
        let before = state.clone();
        assert_eq!(
            bot.play_turn(&mut state),
            Err(BotError::NoLegalMoves { side: Color::White })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn same_seed_same_game() {
        let play = |seed| {
            let mut bot = RandomBot::new(StdRng::seed_from_u64(seed));
            let mut state = GameState::new();
            let mut moves = Vec::new();
            for _ in 0..30 {
                if state.is_terminal().is_some() {
                    break;
                }
                match bot.play_turn(&mut state) {
                    Ok(played) => moves.extend(played),
                    Err(_) => break,
                }
            }
            (moves, state)
        };
        assert_eq!(play(42), play(42));
    }
}
