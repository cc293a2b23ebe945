use std::collections::{BTreeMap, BTreeSet};

use crate::{Board, GameState, Square};

/// Where a single piece can go.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceMoves {
    pub destinations: BTreeSet<Square>,
    /// If true, every destination is a jump over an opponent piece.
    pub is_capture: bool,
}

/// The legal moves of the side to move, keyed by origin square.
///
/// Pieces without any destination have no entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalMoves {
    pub moves: BTreeMap<Square, BTreeSet<Square>>,
    /// Whether a capture is available, in which case all moves are captures.
    pub any_capture: bool,
}

impl Board {
    /// Computes the destinations of the piece on `from`, ignoring whose turn it is.
    ///
    /// Men step or jump along their two forward diagonals, kings along all
    /// four, always a single step (or a single jump). If the piece can
    /// capture, only the capturing destinations are returned.
    pub fn moves_for_piece(&self, from: Square) -> PieceMoves {
        let Some(piece) = self.get(from) else {
            return PieceMoves::default();
        };

        let mut steps = BTreeSet::new();
        let mut captures = BTreeSet::new();
        for &direction in piece.directions() {
            let Some(target) = from.offset(direction, 1) else {
                continue;
            };
            match self.get(target) {
                None => {
                    steps.insert(target);
                }
                Some(other) if other.color != piece.color => {
                    if let Some(landing) = from
                        .offset(direction, 2)
                        .filter(|&sq| self.get(sq).is_none())
                    {
                        captures.insert(landing);
                    }
                }
                Some(_) => {}
            }
        }

        if captures.is_empty() {
            PieceMoves {
                destinations: steps,
                is_capture: false,
            }
        } else {
            PieceMoves {
                destinations: captures,
                is_capture: true,
            }
        }
    }
}

impl GameState {
    /// See [`Board::moves_for_piece()`].
    pub fn moves_for_piece(&self, from: Square) -> PieceMoves {
        self.board.moves_for_piece(from)
    }

    /// All legal moves of the side to move.
    ///
    /// Captures are mandatory: if any piece can capture, only capturing
    /// pieces are listed. During a capture chain, only the chaining piece is.
    pub fn all_legal_moves(&self) -> LegalMoves {
        if let Some(chain_square) = self.forced_continuation {
            let PieceMoves {
                destinations,
                is_capture,
            } = self.board.moves_for_piece(chain_square);
            let mut moves = BTreeMap::new();
            if is_capture {
                moves.insert(chain_square, destinations);
            }
            return LegalMoves {
                any_capture: !moves.is_empty(),
                moves,
            };
        }

        let mut captures = BTreeMap::new();
        let mut steps = BTreeMap::new();
        for (square, _) in self.board.pieces_of(self.side_to_move) {
            let PieceMoves {
                destinations,
                is_capture,
            } = self.board.moves_for_piece(square);
            if destinations.is_empty() {
                continue;
            }
            if is_capture {
                captures.insert(square, destinations);
            } else {
                steps.insert(square, destinations);
            }
        }

        if captures.is_empty() {
            LegalMoves {
                moves: steps,
                any_capture: false,
            }
        } else {
            LegalMoves {
                moves: captures,
                any_capture: true,
            }
        }
    }
}

impl LegalMoves {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn destinations(&self, from: Square) -> Option<&BTreeSet<Square>> {
        self.moves.get(&from)
    }

    pub fn contains(&self, from: Square, to: Square) -> bool {
        self.destinations(from)
            .map_or(false, |destinations| destinations.contains(&to))
    }

    /// All `(from, to)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Square)> + '_ {
        self.moves
            .iter()
            .flat_map(|(&from, destinations)| destinations.iter().map(move |&to| (from, to)))
    }

    /// The number of `(from, to)` pairs.
    pub fn len(&self) -> usize {
        self.moves.values().map(BTreeSet::len).sum()
    }
}
