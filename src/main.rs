use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use grid_snake::config::{ConfigError, load_config, load_config_from_path};
use grid_snake::game::{GameState, TickOutcome};
use grid_snake::input::{GameInput, InputError, parse_moves};
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Replays a move script against a headless Snake session and prints the
/// final state as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to load instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the food placement seed.
    #[arg(long)]
    seed: Option<u64>,

    /// One command per tick: U/D/L/R (or W/A/S). Whitespace and commas are ignored.
    #[arg(long, default_value = "")]
    moves: String,

    /// Keep ticking in the last direction after the script until the game ends.
    #[arg(long = "until-over")]
    until_over: bool,

    /// Upper bound on extra ticks taken by `--until-over`.
    #[arg(long = "max-ticks", default_value_t = 10_000)]
    max_ticks: u64,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to write snapshot: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "run failed");
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path)?,
        None => load_config()?,
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let moves = parse_moves(&cli.moves)?;
    let mut state = GameState::new(config)?;
    info!(
        start = ?state.body.head_position(),
        food = ?state.food.position,
        moves = moves.len(),
        "session started"
    );

    for direction in moves {
        state.apply_input(GameInput::Direction(direction));
        let outcome = state.tick();
        debug!(?direction, ?outcome, head = ?state.body.head_position(), "tick");
        if outcome == TickOutcome::Idle || state.status.is_finished() {
            break;
        }
    }

    if cli.until_over {
        for _ in 0..cli.max_ticks {
            if state.tick() == TickOutcome::Idle || state.status.is_finished() {
                break;
            }
        }
    }

    serde_json::to_writer_pretty(io::stdout().lock(), &state.snapshot())?;
    println!();
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
