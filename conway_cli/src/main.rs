// main.rs - Headless Game of Life runner
//
// Builds a session, optionally seeds it from a file, a fill or a coin flip,
// steps it and writes the result back out. Load reconciliation questions are
// answered up front with --clip-rows / --clip-cols / --center.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use conway::constants::{CYCLE_HISTORY_LEN, DEFAULT_COLS, DEFAULT_ROWS};
use conway::{FixedDecisions, LifeError, Session, SessionConfig};

#[derive(Debug, Parser)]
#[command(name = "conway", about = "Run Conway's Game of Life without a display")]
struct Args {
    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,
    /// Seed for --random; omitted means OS entropy
    #[arg(long)]
    seed: Option<u64>,
    /// Grid file to load before stepping
    #[arg(long, value_name = "PATH")]
    load: Option<PathBuf>,
    /// Where to write the final grid
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
    /// Generations to step
    #[arg(short = 'n', long, default_value_t = 0)]
    generations: u64,
    /// Start from a random soup
    #[arg(long, conflicts_with_all = ["fill", "load"])]
    random: bool,
    /// Start with every cell alive
    #[arg(long, conflicts_with = "load")]
    fill: bool,
    /// Stop early once a state repeats
    #[arg(long)]
    until_stable: bool,
    /// States remembered for --until-stable
    #[arg(long, default_value_t = CYCLE_HISTORY_LEN)]
    history: usize,
    /// Drop file rows that do not fit instead of refusing the load
    #[arg(long)]
    clip_rows: bool,
    /// Drop file columns that do not fit instead of refusing the load
    #[arg(long)]
    clip_cols: bool,
    /// Center a file smaller than the grid
    #[arg(long)]
    center: bool,
}

impl Args {
    fn config(&self) -> SessionConfig {
        SessionConfig {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed,
            cycle_history: self.history,
        }
    }

    fn decisions(&self) -> FixedDecisions {
        FixedDecisions {
            clip_rows: self.clip_rows,
            clip_cols: self.clip_cols,
            center: self.center,
        }
    }
}

fn run(args: &Args) -> Result<(), LifeError> {
    let mut session = Session::new(&args.config())?;

    if let Some(path) = &args.load {
        session.load(path, args.decisions())?;
    }
    if args.fill {
        session.fill();
    } else if args.random {
        session.randomize();
    }

    let taken = session.run(args.generations, args.until_stable);
    let grid = session.grid();
    log::info!("stepped {taken} of {} generations", args.generations);

    if let Some(path) = &args.save {
        session.save(path)?;
    }

    println!(
        "{}x{} grid, generation {}, {} alive",
        grid.rows(),
        grid.cols(),
        session.generation(),
        grid.population()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
