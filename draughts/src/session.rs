use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, info};

use crate::{
    BotError, Color, GameState, PlayedMove, RandomBot, SnapshotError, SnapshotStore, Square,
    TurnOutcome,
};

/// What happened in response to a [click](Session::click).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The game is over, clicks have no effect anymore.
    GameOver { winner: Color },
    /// The click was not on anything that can be selected.
    Ignored,
    /// A piece was selected. Its legal destinations are included, for highlighting.
    Selected {
        from: Square,
        destinations: BTreeSet<Square>,
    },
    /// The click was not a legal destination, so the selection was dropped.
    Deselected,
    /// The selected piece was moved. If that ended the turn and the bot is
    /// enabled, the bot's reply is included.
    Moved {
        played: PlayedMove,
        bot_moves: Vec<PlayedMove>,
    },
}

/// A headless game session, driven by clicks on squares.
///
/// A move takes two clicks: one to select a piece and one on its
/// destination. During a capture chain the capturing piece stays selected.
/// Optionally, a [`RandomBot`] answers every finished turn.
#[derive(Clone, Debug)]
pub struct Session<R> {
    state: GameState,
    selection: Option<Square>,
    with_bot: bool,
    bot: RandomBot<R>,
}

impl<R: Rng> Session<R> {
    pub fn new(with_bot: bool, rng: R) -> Self {
        Self {
            state: GameState::new(),
            selection: None,
            with_bot,
            bot: RandomBot::new(rng),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    pub fn with_bot(&self) -> bool {
        self.with_bot
    }

    pub fn set_with_bot(&mut self, with_bot: bool) {
        self.with_bot = with_bot;
    }

    /// Starts over from the standard position. The bot setting is kept.
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.selection = None;
        info!("Reset the game");
    }

    pub fn click(&mut self, square: Square) -> Result<ClickOutcome, BotError> {
        if let Some(winner) = self.state.is_terminal() {
            return Ok(ClickOutcome::GameOver { winner });
        }

        let side = self.state.side_to_move();
        if self
            .state
            .board()
            .get(square)
            .is_some_and(|piece| piece.color != side)
        {
            self.selection = None;
            return Ok(ClickOutcome::Ignored);
        }

        let legal = self.state.all_legal_moves();
        let Some(from) = self.selection else {
            return Ok(match legal.destinations(square) {
                Some(destinations) => {
                    self.selection = Some(square);
                    ClickOutcome::Selected {
                        from: square,
                        destinations: destinations.clone(),
                    }
                }
                None => ClickOutcome::Ignored,
            });
        };

        if !legal.contains(from, square) {
            self.selection = None;
            return Ok(ClickOutcome::Deselected);
        }

        let played = self.state.play(from, square)?;
        let mut bot_moves = Vec::new();
        match played.outcome {
            TurnOutcome::ChainContinues { at } => {
                self.selection = Some(at);
            }
            TurnOutcome::TurnPassed { .. } => {
                self.selection = None;
                if self.with_bot && self.state.is_terminal().is_none() {
                    bot_moves = match self.bot.play_turn(&mut self.state) {
                        Ok(moves) => moves,
                        // The human move stands, it is just the bot's turn with nothing to play.
                        Err(BotError::NoLegalMoves { side }) => {
                            debug!(%side, "Bot cannot move");
                            Vec::new()
                        }
                        Err(err) => return Err(err),
                    };
                }
            }
        }
        Ok(ClickOutcome::Moved { played, bot_moves })
    }

    pub fn save(&self, store: &mut impl SnapshotStore, name: &str) -> Result<(), SnapshotError> {
        store.save(name, &self.state)
    }

    /// Replaces the game with a saved one. On error, the session is unchanged.
    pub fn load(&mut self, store: &impl SnapshotStore, name: &str) -> Result<(), SnapshotError> {
        self.state = store.load(name)?;
        self.selection = None;
        debug!(side_to_move = %self.state.side_to_move(), "Session loaded");
        Ok(())
    }
}
