use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Board, Color, GameState, Piece, SnapshotError};

/// A saved game, taken at the start of a turn.
///
/// Serialized as JSON, e.g.
/// `{"cells":[null,{"color":"white","rank":"man"},...],"side_to_move":"white"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All 64 squares in row-major order, row 0 first.
    pub cells: Vec<Option<Piece>>,
    pub side_to_move: Color,
}

impl Snapshot {
    /// Captures the board and whose turn it is.
    ///
    /// An ongoing capture chain is not part of the snapshot.
    pub fn save(state: &GameState) -> Self {
        Self {
            cells: state.board().cells().to_vec(),
            side_to_move: state.side_to_move(),
        }
    }

    /// Restores a game. The restored state is always at the start of a turn.
    pub fn load(&self) -> Result<GameState, SnapshotError> {
        let board =
            Board::from_cells(&self.cells).ok_or(SnapshotError::WrongCellCount(self.cells.len()))?;
        Ok(GameState::from_board(board, self.side_to_move))
    }

    pub fn to_json(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Somewhere to keep saved games, addressed by name.
pub trait SnapshotStore {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), SnapshotError>;

    /// Returns [`SnapshotError::NotFound`] if nothing was saved under this name.
    fn read(&self, name: &str) -> Result<Vec<u8>, SnapshotError>;

    fn save(&mut self, name: &str, state: &GameState) -> Result<(), SnapshotError> {
        let bytes = Snapshot::save(state).to_json()?;
        self.write(name, &bytes)?;
        debug!(name, "Saved game");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<GameState, SnapshotError> {
        let bytes = self.read(name)?;
        let state = Snapshot::from_json(&bytes)?.load()?;
        debug!(name, "Loaded game");
        Ok(state)
    }
}

/// Stores each snapshot as `<name>.json` in a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}.json", name))
    }
}

impl SnapshotStore for FileStore {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), SnapshotError> {
        let mut writer = BufWriter::new(File::create(self.path_for(name))?);
        writer.write_all(bytes)?;
        writer.flush()?;
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, SnapshotError> {
        let mut file = File::open(self.path_for(name)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => SnapshotError::NotFound {
                name: String::from(name),
            },
            _ => SnapshotError::Io(err),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Keeps snapshots in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), SnapshotError> {
        self.entries.insert(String::from(name), bytes.to_vec());
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, SnapshotError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| SnapshotError::NotFound {
                name: String::from(name),
            })
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ReachableState;
    use crate::Square;

    quickcheck! {
        fn save_then_load_restores_turn_start(input: ReachableState) -> bool {
            let state = input.0;
            let restored = Snapshot::save(&state).load().unwrap();
            restored.board() == state.board()
                && restored.side_to_move() == state.side_to_move()
                && restored.forced_continuation().is_none()
        }
    }

    #[test]
    fn json_layout() {
        let state = GameState::new();
        let json = String::from_utf8(Snapshot::save(&state).to_json().unwrap()).unwrap();
        assert!(json.starts_with(r#"{"cells":[null,{"color":"white","rank":"man"},null,"#));
        assert!(json.ends_with(r#""side_to_move":"white"}"#));
    }

    #[test]
    fn chain_is_dropped_on_save() {
        let board = crate::board!(
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
        state.play(Square::new(1, 0), Square::new(3, 2)).unwrap();
        assert_eq!(state.forced_continuation(), Some(Square::new(3, 2)));

        let restored = Snapshot::save(&state).load().unwrap();
        assert_eq!(restored.forced_continuation(), None);
        assert_eq!(restored.side_to_move(), Color::White);
    }

    #[test]
    fn wrong_cell_count() {
        let snapshot = Snapshot {
            cells: vec![None; 10],
            side_to_move: Color::Red,
        };
        assert!(matches!(
            snapshot.load(),
            Err(SnapshotError::WrongCellCount(10))
        ));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            Snapshot::from_json(b"{\"cells\": 3}"),
            Err(SnapshotError::Malformed(_))
        ));
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.load("save"),
            Err(SnapshotError::NotFound { name }) if name == "save"
        ));

        let mut state = GameState::new();
        state.play(Square::new(2, 3), Square::new(3, 4)).unwrap();
        store.save("save", &state).unwrap();
        assert_eq!(store.load("save").unwrap(), state);
    }

    #[test]
    fn file_store() {
        let directory = std::env::temp_dir().join(format!("draughts-store-{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        let mut store = FileStore::new(&directory);
        assert!(matches!(
            store.load("missing"),
            Err(SnapshotError::NotFound { .. })
        ));

        let mut state = GameState::new();
        state.play(Square::new(2, 5), Square::new(3, 6)).unwrap();
        store.save("save", &state).unwrap();
        assert!(store.path_for("save").is_file());
        assert_eq!(store.load("save").unwrap(), state);

        std::fs::remove_dir_all(&directory).unwrap();
    }
}
