use std::{
    error::Error as StdError,
    fs::File,
    io,
    io::{BufReader, BufWriter},
    num::NonZeroUsize,
    path::PathBuf,
};

use clap::Parser as _;
use glickorank_cli::{
    driver::{run, Schedule},
    settings::{DefaultRating, Settings},
};
use tracing_subscriber::EnvFilter;

/// Rates the players of a rating file with Glicko-2 and prints the new
/// ratings. Set RUST_LOG for diagnostics on standard error.
#[derive(clap::Parser)]
#[clap(version)]
struct Opt {
    /// Rating file. Standard input if omitted.
    input: Option<PathBuf>,
    /// TOML settings file. Command line options take precedence.
    #[clap(long)]
    config: Option<PathBuf>,
    /// System constant restraining volatility changes (default 0.5).
    #[clap(long)]
    tau: Option<f64>,
    /// Split the games of each namespace into rating periods of this many
    /// games. 0 rates all games in a single period.
    #[clap(long, default_value = "0")]
    batch: usize,
    /// Repeat the whole game list this many additional times.
    #[clap(long, default_value = "0")]
    repetitions: usize,
    /// Rating of players without a rating record (default 1500).
    #[clap(long)]
    default_rating: Option<f64>,
    /// Deviation of players without a rating record, and of rating records
    /// without rd (default 350).
    #[clap(long)]
    default_deviation: Option<f64>,
    /// Volatility of players without a rating record, and of rating records
    /// without v (default 0.06).
    #[clap(long)]
    default_volatility: Option<f64>,
    /// Iteration cap of the volatility solver (default 10000).
    #[clap(long)]
    max_iterations: Option<usize>,
}

impl Opt {
    fn settings(&self) -> Settings {
        Settings {
            tau: self.tau,
            max_iterations: self.max_iterations,
            default_rating: DefaultRating {
                rating: self.default_rating,
                deviation: self.default_deviation,
                volatility: self.default_volatility,
            },
        }
    }
}

fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();

    let settings = match opt.config {
        Some(ref path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .merge(opt.settings());

    let rating_system = settings.rating_system();
    let schedule = Schedule {
        batch: NonZeroUsize::new(opt.batch),
        repetitions: opt.repetitions,
    };

    let output = BufWriter::new(io::stdout().lock());

    match opt.input {
        Some(ref path) => run(BufReader::new(File::open(path)?), output, &rating_system, &schedule)?,
        None => run(io::stdin().lock(), output, &rating_system, &schedule)?,
    }

    Ok(())
}
