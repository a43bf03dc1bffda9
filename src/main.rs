use std::io;
use std::time::Duration;

use clap::Parser;
use othello::ai::{DEFAULT_CORNER_MULTIPLIER, MAX_CORNER_MULTIPLIER};
use othello::config::{DEFAULT_DEPTH, GameConfig};
use othello::console::Console;
use othello::game::Game;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "othello", version, about = "Play Othello against a human or a minimax searcher")]
struct Cli {
    /// Search depth in plies for machine players
    #[arg(long, default_value_t = DEFAULT_DEPTH, allow_negative_numbers = true)]
    depth: i32,
    /// Disable alpha-beta pruning (same moves, more nodes)
    #[arg(long)]
    no_pruning: bool,
    /// Let the searcher play black
    #[arg(long)]
    black_ai: bool,
    /// Let the searcher play white
    #[arg(long)]
    white_ai: bool,
    /// Print legal moves and search statistics
    #[arg(long)]
    debug: bool,
    /// Weight multiplier applied to edge-column discs; corners benefit most
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_CORNER_MULTIPLIER,
        value_parser = clap::value_parser!(i32).range(0..=MAX_CORNER_MULTIPLIER as i64)
    )]
    corner_multiplier: i32,
    /// Deepen iteratively and stop at this budget per machine move
    #[arg(long, value_name = "MS")]
    time_limit_ms: Option<u64>,
}

impl Cli {
    fn into_config(self) -> GameConfig {
        GameConfig {
            debug: self.debug,
            black_machine: self.black_ai,
            white_machine: self.white_ai,
            pruning: !self.no_pruning,
            depth: self.depth,
            corner_multiplier: self.corner_multiplier,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Cli::parse().into_config();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(Game::new(config), stdin.lock(), stdout.lock());
    console.run()?;
    Ok(())
}
