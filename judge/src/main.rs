use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use draughts::{GameState, Snapshot};
use judge::{play_game, GameResult, MatchConfig, Player, Recorder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A game without a winner after this many turns is a draw. A turn
    /// includes all jumps of a capture chain.
    #[arg(short, long, default_value_t = 200)]
    max_turns: usize,

    /// Start every game from this saved game (JSON) instead of the standard position
    #[arg(long)]
    start_from: Option<PathBuf>,

    /// Record the games as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    blocked: [usize; 2],
    draws: usize,
}

fn play_matchup(
    player_1: &mut Player,
    player_2: &mut Player,
    num_games: usize,
    rng: &mut StdRng,
    config: &MatchConfig,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<MatchScore> {
    let player_names = [player_1.name.clone(), player_2.name.clone()];
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        match play_game(rng, player_1, player_2, config, recorder)? {
            GameResult::WonByPlayer { player_idx } => {
                debug!(winner = player_names[player_idx], game_idx);
                match_score.wins[player_idx] += 1;
            }
            GameResult::Blocked { player_idx } => {
                debug!(player = player_names[player_idx], game_idx, "Blocked");
                match_score.blocked[player_idx] += 1;
            }
            GameResult::MoveLimit => {
                debug!(game_idx, "Move limit reached");
                match_score.draws += 1;
            }
        }
    }

    eprint!("{}", summary(&player_names, &match_score));
    Ok(match_score)
}

fn summary(player_names: &[String; 2], match_score: &MatchScore) -> String {
    let num_games = match_score.wins.iter().sum::<usize>()
        + match_score.blocked.iter().sum::<usize>()
        + match_score.draws;
    let mut text = format!("End result after {} games:\n", num_games);
    for (idx, name) in player_names.iter().enumerate() {
        text += &format!(
            "- {}: {} wins, {} games where it could not move\n",
            name, match_score.wins[idx], match_score.blocked[idx]
        );
    }
    text += &format!("- {} draws by move limit\n", match_score.draws);
    text
}

fn load_start_position(path: &Path) -> anyhow::Result<GameState> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Could not read '{}'", path.display()))?;
    let state = Snapshot::from_json(&bytes)?.load()?;
    info!(path = %path.display(), "Starting from saved game");
    debug!("\n{}", state);
    Ok(state)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let start = match &args.start_from {
        Some(path) => load_start_position(path)?,
        None => GameState::new(),
    };
    let config = MatchConfig {
        start,
        max_turns: args.max_turns,
    };

    let mut player_1 = Player::new("Random 1", rng.gen());
    let mut player_2 = Player::new("Random 2", rng.gen());

    play_matchup(
        &mut player_1,
        &mut player_2,
        args.num_games,
        &mut rng,
        &config,
        &mut recorder,
    )?;

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
