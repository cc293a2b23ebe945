use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use draughts::{Color, GameState, PlayedMove, Snapshot};
use serde::{Deserialize, Serialize};

/// Writes every finished game into its own JSON file in a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    recording: Option<GameRecording>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            recording: None,
        })
    }

    pub fn start_game(&mut self, start: &GameState, players: [(&str, Color); 2]) {
        self.recording = Some(GameRecording {
            players: players.map(|(name, color)| RecordedPlayer {
                name: String::from(name),
                color,
            }),
            start: Snapshot::save(start),
            turns: Vec::new(),
            result: String::new(),
        });
    }

    pub fn store_turn(&mut self, player: &str, color: Color, moves: &[PlayedMove]) {
        if let Some(recording) = &mut self.recording {
            recording.turns.push(RecordedTurn {
                player: String::from(player),
                color,
                moves: moves.to_vec(),
            });
        }
    }

    /// Writes the current game to `game_NNNNNN.json`.
    pub fn write_game_recording(&mut self, result: &str) -> anyhow::Result<PathBuf> {
        let Some(mut recording) = self.recording.take() else {
            anyhow::bail!("No game was started");
        };
        recording.result = String::from(result);
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecording {
    pub players: [RecordedPlayer; 2],
    pub start: Snapshot,
    pub turns: Vec<RecordedTurn>,
    pub result: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedPlayer {
    pub name: String,
    pub color: Color,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedTurn {
    pub player: String,
    pub color: Color,
    pub moves: Vec<PlayedMove>,
}
