use anyhow::Context;
use draughts::{BotError, Color};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::player::Player;
use crate::recording::Recorder;
use crate::MatchConfig;

#[derive(Debug, PartialEq, Eq)]
pub enum GameResult {
    WonByPlayer { player_idx: usize },
    /// The player to move had pieces left, but no legal move.
    Blocked { player_idx: usize },
    /// Nobody won within the configured number of turns.
    MoveLimit,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WonByPlayer { player_idx } => write!(f, "Won by player {}", player_idx + 1),
            GameResult::Blocked { player_idx } => {
                write!(f, "Player {} could not move", player_idx + 1)
            }
            GameResult::MoveLimit => write!(f, "Move limit reached"),
        }
    }
}

/// Plays one game. A turn is everything one side plays before the other
/// side is to move, including capture chains.
///
/// Fails if the game could not be recorded, or if a bot broke the rules.
pub fn play_game(
    rng: &mut StdRng,
    player_1: &mut Player,
    player_2: &mut Player,
    config: &MatchConfig,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Assign one player White and the other Red randomly
    let colors = {
        let mut arr = [Color::White, Color::Red];
        arr.shuffle(rng);
        arr
    };
    let mut players = [player_1, player_2];
    let player_idx_of = |color: Color| if colors[0] == color { 0 } else { 1 };

    let mut state = config.start.clone();
    if let Some(rec) = recorder {
        rec.start_game(
            &state,
            [
                (players[0].name.as_str(), colors[0]),
                (players[1].name.as_str(), colors[1]),
            ],
        );
    }

    let mut game_result = GameResult::MoveLimit;
    for turn in 0..=config.max_turns {
        if let Some(winner) = state.is_terminal() {
            game_result = GameResult::WonByPlayer {
                player_idx: player_idx_of(winner),
            };
            break;
        }
        if turn == config.max_turns {
            break;
        }

        let side = state.side_to_move();
        let player_idx = player_idx_of(side);
        let current_player = &mut players[player_idx];
        match current_player.play_turn(&mut state) {
            Ok(moves) => {
                trace!(turn, %side, "\n{}", state.board());
                if let Some(rec) = recorder {
                    rec.store_turn(&current_player.name, side, &moves);
                }
            }
            Err(BotError::NoLegalMoves { .. }) => {
                game_result = GameResult::Blocked { player_idx };
                break;
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("{} failed to play turn {}", current_player.name, turn)
                });
            }
        }
    }

    if let Some(rec) = recorder {
        let path = rec.write_game_recording(&game_result.to_string())?;
        debug!(path = %path.display(), "Recorded game");
    }
    Ok(game_result)
}
