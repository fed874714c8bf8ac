//! binary entry point: wires stdin/stdout into the turn loop
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, trace};

use torus_snake_bot::board::TorusBoard;
use torus_snake_bot::strategy::{FixedOrderPolicy, MovePolicy, ShufflePolicy};
use torus_snake_bot::turn_loop::{run_turns, Outcome};
use torus_snake_bot::types::TurnInstruments;
use torus_snake_bot::wire_protocol::Setup;

#[derive(Parser, Debug)]
#[command(name = "torus-snake-bot")]
#[command(version, about = "line-protocol bot for multiplayer snake on a toroidal grid")]
struct Cli {
    /// How move prompts are answered
    #[arg(long, default_value = "shuffle")]
    policy: Policy,

    /// Fixed seed for the shuffle policy, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where the final board is written when the controller reports us dead
    #[arg(long, default_value = "final_board.txt")]
    dump_path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Shuffle the candidate directions every turn
    Shuffle,
    /// Try north, south, east, west in that order
    Fixed,
}

#[derive(Debug)]
struct TurnTimings;

impl TurnInstruments for TurnTimings {
    fn observe_turn(&self, duration: Duration) {
        trace!(?duration, "processed instruction");
    }
}

fn main() -> anyhow::Result<()> {
    // stdout belongs to the protocol, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let Setup {
        width,
        height,
        starting_positions,
        my_number,
    } = Setup::read_from(&mut input).context("reading the startup header")?;

    let mut board = TorusBoard::new(width, height, starting_positions)
        .context("building the starting board")?;
    anyhow::ensure!(
        my_number.as_usize() < board.player_count(),
        "player number {} is outside the {}-player roster",
        my_number,
        board.player_count()
    );

    let mut policy: Box<dyn MovePolicy> = match (cli.policy, cli.seed) {
        (Policy::Fixed, _) => Box::new(FixedOrderPolicy),
        (Policy::Shuffle, Some(seed)) => Box::new(ShufflePolicy::seeded(seed)),
        (Policy::Shuffle, None) => Box::new(ShufflePolicy::from_entropy()),
    };

    info!(width, height, player = %my_number, "game starting");

    let outcome = run_turns(
        &mut board,
        my_number,
        policy.as_mut(),
        &mut input,
        &mut output,
        &TurnTimings,
    )?;

    info!(?outcome, "game over");
    if outcome == Outcome::Died {
        write_post_mortem(&board, &cli.dump_path)?;
    }

    Ok(())
}

/// Writes the rendered final board to `path` and a JSON summary next to it.
fn write_post_mortem(board: &TorusBoard, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut file = BufWriter::new(file);
    writeln!(file, "{}", board)?;
    file.flush()?;

    let json_path = path.with_extension("json");
    let report = serde_json::to_string_pretty(&board.report())?;
    std::fs::write(&json_path, report + "\n")
        .with_context(|| format!("writing {}", json_path.display()))?;

    info!(path = %path.display(), "wrote post-mortem board");
    Ok(())
}
