//! Batch simulation CLI.
//!
//! Plays games with the accept-every-offer policy and outputs one JSON
//! record per game.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --players N     Seats per game, 2-4 (default: 4)
//!   --max-turns N   Roll attempts before a game is abandoned (default: 2000)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use landlord::simulate::{self, SimulationConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Parses the value following `flag`, or explains what was wrong with it.
fn flag_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = args
        .get(i)
        .ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: {}", flag, raw))
}

enum Cli {
    Run {
        config: SimulationConfig,
        output_path: Option<String>,
    },
    Help,
}

fn parse_args(args: &[String]) -> Result<Cli, String> {
    let mut config = SimulationConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = flag_value(args, i, "--games")?;
            }
            "--players" => {
                i += 1;
                config.players = flag_value(args, i, "--players")?;
            }
            "--max-turns" => {
                i += 1;
                config.max_turns = flag_value(args, i, "--max-turns")?;
            }
            "--threads" => {
                i += 1;
                config.threads = flag_value(args, i, "--threads")?;
            }
            "--seed" => {
                i += 1;
                config.seed = flag_value(args, i, "--seed")?;
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(args, i, "--output")?);
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => return Ok(Cli::Help),
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(Cli::Run {
        config,
        output_path,
    })
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let (config, output_path) = match parse_args(&args) {
        Ok(Cli::Run {
            config,
            output_path,
        }) => (config, output_path),
        Ok(Cli::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            error!("{}", msg);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if !config.quiet {
        info!(
            "Simulation: {} games, {} players, max {} turns, {} threads",
            config.num_games, config.players, config.max_turns, config.threads
        );
    }

    let start = Instant::now();
    let games = match simulate::run_simulation(&config) {
        Ok(games) => games,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        info!(
            "Completed {} games in {:.2}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        simulate::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| simulate::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            simulate::write_jsonl(&games, &mut BufWriter::new(stdout.lock()))
        }
    };
    if let Err(e) = written {
        error!("failed to write output: {}", e);
        return ExitCode::FAILURE;
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        info!("Wrote {} games to {}", games.len(), path);
    }
    ExitCode::SUCCESS
}

fn print_usage() {
    eprintln!("Usage: simulate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --players N      Seats per game, 2-4 (default: 4)");
    eprintln!("  --max-turns N    Roll attempts before a game is abandoned (default: 2000)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
