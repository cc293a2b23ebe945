use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Color, GameState, IllegalMove, Piece, Rank, Square};

/// The effects of a single step or jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureInfo {
    /// The piece that was jumped over and removed, and where it stood.
    pub captured: Option<(Square, Piece)>,
    /// Whether the moving man became a king by landing on its last row.
    pub promoted: bool,
    /// Whether the moving piece captured and can capture again from where it landed.
    pub further_capture: bool,
}

/// Summarizes how a move affects the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurnOutcome {
    /// The piece on `at` has to capture again before the turn can pass.
    ChainContinues { at: Square },
    /// It is now `to`'s turn.
    TurnPassed { to: Color },
}

/// A move together with its effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub from: Square,
    pub to: Square,
    pub capture: CaptureInfo,
    pub outcome: TurnOutcome,
}

impl CaptureInfo {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl GameState {
    /// Checks that moving the piece on `from` to `to` is legal right now.
    pub fn check_move(&self, from: Square, to: Square) -> Result<(), IllegalMove> {
        let piece = self.board.get(from).ok_or(IllegalMove::EmptyOrigin { from })?;
        if piece.color != self.side_to_move {
            return Err(IllegalMove::WrongSide {
                from,
                side_to_move: self.side_to_move,
            });
        }
        if let Some(chain_square) = self.forced_continuation.filter(|&sq| sq != from) {
            return Err(IllegalMove::MustContinueChain { from, chain_square });
        }
        let legal = self.all_legal_moves();
        match legal.destinations(from) {
            Some(destinations) if destinations.contains(&to) => Ok(()),
            None if legal.any_capture => Err(IllegalMove::CaptureRequired { from }),
            _ => Err(IllegalMove::UnreachableDestination { from, to }),
        }
    }

    /// Moves a piece, removing the piece it jumps over and promoting it if
    /// it reaches its last row.
    ///
    /// This validates the move first and leaves the state untouched if it's
    /// illegal. It does not update whose turn it is, see [`Self::play()`] for that.
    pub fn execute_move(&mut self, from: Square, to: Square) -> Result<CaptureInfo, IllegalMove> {
        self.check_move(from, to)?;
        let mut piece = self.board.take(from).ok_or(IllegalMove::EmptyOrigin { from })?;

        // Promotion happens on landing, so a new king continues a chain as a king.
        let promoted = piece.rank == Rank::Man && to.row() == piece.color.promotion_row();
        if promoted {
            piece = piece.promoted();
        }
        self.board.set(to, Some(piece));

        let captured = from
            .midpoint(to)
            .and_then(|mid| self.board.take(mid).map(|victim| (mid, victim)));
        let further_capture = captured.is_some() && self.board.moves_for_piece(to).is_capture;

        trace!(%from, %to, captured = captured.is_some(), promoted, further_capture, "Executed move");
        Ok(CaptureInfo {
            captured,
            promoted,
            further_capture,
        })
    }

    /// Plays one step or jump and passes the turn, unless the moved piece
    /// has to continue its capture chain.
    pub fn play(&mut self, from: Square, to: Square) -> Result<PlayedMove, IllegalMove> {
        let capture = self.execute_move(from, to)?;
        let outcome = if capture.further_capture {
            self.forced_continuation = Some(to);
            TurnOutcome::ChainContinues { at: to }
        } else {
            self.forced_continuation = None;
            self.side_to_move = self.side_to_move.opponent();
            TurnOutcome::TurnPassed {
                to: self.side_to_move,
            }
        };
        debug!(%from, %to, ?outcome, "Played move");
        Ok(PlayedMove {
            from,
            to,
            capture,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ReachableState;
    use crate::{board, Board};

    quickcheck! {
        fn illegal_moves_leave_state_untouched(input: ReachableState, from: (u8, u8), to: (u8, u8)) -> bool {
            let from = Square::new((from.0 % 8) as i8, (from.1 % 8) as i8);
            let to = Square::new((to.0 % 8) as i8, (to.1 % 8) as i8);
            let mut state = input.0;
            let before = state.clone();
            let legal = state.all_legal_moves().contains(from, to);
            match state.play(from, to) {
                Ok(_) => legal,
                Err(_) => !legal && state == before,
            }
        }

        fn captures_remove_exactly_one_piece(input: ReachableState) -> bool {
            let state = input.0;
            state.all_legal_moves().iter().all(|(from, to)| {
                let mut next = state.clone();
                let opponent = state.side_to_move().opponent();
                let before = state.board().count(opponent);
                let Ok(played) = next.play(from, to) else { return false };
                let after = next.board().count(opponent);
                match played.capture.captured {
                    Some(_) => after + 1 == before,
                    None => after == before,
                }
            })
        }
    }

    #[test]
    fn capture_removes_jumped_piece() {
        let mut board = Board::standard();
        board.set(Square::new(3, 2), Some(Piece::man(Color::Red)));
        let mut state = GameState::from_board(board, Color::White);

        let played = state.play(Square::new(2, 1), Square::new(4, 3)).unwrap();
        assert_eq!(
            played.capture.captured,
            Some((Square::new(3, 2), Piece::man(Color::Red)))
        );
        assert_eq!(state.board().get(Square::new(3, 2)), None);
        assert_eq!(state.board().get(Square::new(2, 1)), None);
        assert_eq!(
            state.board().get(Square::new(4, 3)),
            Some(Piece::man(Color::White))
        );
        assert_eq!(state.board().count(Color::Red), 12);
    }

    #[test]
    fn simple_move_passes_turn() {
        let mut state = GameState::new();
        let played = state.play(Square::new(2, 1), Square::new(3, 2)).unwrap();
        assert!(!played.capture.is_capture());
        assert_eq!(played.outcome, TurnOutcome::TurnPassed { to: Color::Red });
        assert_eq!(state.side_to_move(), Color::Red);
        assert_eq!(state.forced_continuation(), None);
    }

    #[test]
    fn rejected_moves() {
        let mut state = GameState::new();
        assert_eq!(
            state.play(Square::new(3, 2), Square::new(4, 3)),
            Err(IllegalMove::EmptyOrigin {
                from: Square::new(3, 2)
            })
        );
        assert_eq!(
            state.play(Square::new(5, 0), Square::new(4, 1)),
            Err(IllegalMove::WrongSide {
                from: Square::new(5, 0),
                side_to_move: Color::White
            })
        );
        assert_eq!(
            state.play(Square::new(2, 1), Square::new(4, 3)),
            Err(IllegalMove::UnreachableDestination {
                from: Square::new(2, 1),
                to: Square::new(4, 3)
            })
        );
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn capture_is_mandatory() {
        let mut board = Board::standard();
        board.set(Square::new(3, 2), Some(Piece::man(Color::Red)));
        let mut state = GameState::from_board(board, Color::White);
        assert_eq!(
            state.play(Square::new(2, 5), Square::new(3, 4)),
            Err(IllegalMove::CaptureRequired {
                from: Square::new(2, 5)
            })
        );
        // (2, 1) can capture, so its plain step is not available either.
        assert_eq!(
            state.play(Square::new(2, 1), Square::new(3, 0)),
            Err(IllegalMove::UnreachableDestination {
                from: Square::new(2, 1),
                to: Square::new(3, 0)
            })
        );
    }

    #[test]
    fn double_jump_keeps_the_turn() {
        let board = board!(
            "
            - - - - - - - -
            w - - - - - - -
            - r - - - - - -
            - - - - - - - -
            - - - r - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - r -
            "
        );
        let mut state = GameState::from_board(board, Color::White);

        let first = state.play(Square::new(1, 0), Square::new(3, 2)).unwrap();
        assert!(first.capture.further_capture);
        assert_eq!(
            first.outcome,
            TurnOutcome::ChainContinues {
                at: Square::new(3, 2)
            }
        );
        assert_eq!(state.side_to_move(), Color::White);
        assert_eq!(state.forced_continuation(), Some(Square::new(3, 2)));

        // Only the chaining piece may move now.
        let legal = state.all_legal_moves();
        assert_eq!(legal.moves.keys().copied().collect::<Vec<_>>(), vec![Square::new(3, 2)]);

        let second = state.play(Square::new(3, 2), Square::new(5, 4)).unwrap();
        assert!(!second.capture.further_capture);
        assert_eq!(second.outcome, TurnOutcome::TurnPassed { to: Color::Red });
        assert_eq!(state.forced_continuation(), None);
        assert_eq!(state.board().count(Color::Red), 1);
    }

    #[test]
    fn other_pieces_cannot_interrupt_a_chain() {
        let board = board!(
            "
            - - - - - - - -
            w - - - - - w -
            - r - - - - - -
            - - - - - - - -
            - - - r - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - r -
            "
        );
        let mut state = GameState::from_board(board, Color::White);
        state.play(Square::new(1, 0), Square::new(3, 2)).unwrap();
        assert_eq!(
            state.play(Square::new(1, 6), Square::new(2, 7)),
            Err(IllegalMove::MustContinueChain {
                from: Square::new(1, 6),
                chain_square: Square::new(3, 2)
            })
        );
    }

    #[test]
    fn promotion_on_last_row() {
        let board = board!(
            "
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - w - -
            r - - - - - - -
            "
        );
        let mut state = GameState::from_board(board, Color::White);
        let played = state.play(Square::new(6, 5), Square::new(7, 6)).unwrap();
        assert!(played.capture.promoted);
        assert_eq!(
            state.board().get(Square::new(7, 6)),
            Some(Piece::king(Color::White))
        );

        // The new king moves backwards too.
        let moves = state.moves_for_piece(Square::new(7, 6));
        assert_eq!(
            moves.destinations.into_iter().collect::<Vec<_>>(),
            vec![Square::new(6, 5), Square::new(6, 7)]
        );
    }

    #[test]
    fn promoted_piece_continues_chain_as_king() {
        // After jumping to (7, 4) the new king can jump back over (6, 5).
        let board = board!(
            "
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - w - - - - -
            - - - r - r - -
            - - - - - - - -
            "
        );
        let mut state = GameState::from_board(board, Color::White);
        let played = state.play(Square::new(5, 2), Square::new(7, 4)).unwrap();
        assert!(played.capture.promoted);
        assert!(played.capture.further_capture);
        assert_eq!(state.forced_continuation(), Some(Square::new(7, 4)));

        let played = state.play(Square::new(7, 4), Square::new(5, 6)).unwrap();
        assert_eq!(played.outcome, TurnOutcome::TurnPassed { to: Color::Red });
        assert_eq!(state.is_terminal(), Some(Color::White));
    }

    #[test]
    fn kings_are_not_promoted_again() {
        let board = board!(
            "
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - W - -
            r - - - - - - -
            "
        );
        let mut state = GameState::from_board(board, Color::White);
        let played = state.play(Square::new(6, 5), Square::new(7, 4)).unwrap();
        assert!(!played.capture.promoted);
    }
}
