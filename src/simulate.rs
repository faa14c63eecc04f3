//! Batch game simulation.
//!
//! Plays full games with a fixed policy (every purchase and upgrade offer is
//! accepted) and records how each one ended. Useful for checking that games
//! terminate and for tuning prices, card amounts, and starting money.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use crate::board::{GameError, GameState, OfferKind, PlayerId};
use crate::resolve::{
    resolve_purchase, resolve_upgrade, roll_and_resolve, LandingEffect, OfferResolution,
    TurnOutcome,
};

/// Errors that stop a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Roster(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("simulation worker thread panicked")]
    WorkerPanicked,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Seats per game (2-4).
    pub players: usize,
    /// Roll attempts before a game is abandoned as unfinished.
    pub max_turns: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_games: 10,
            players: 4,
            max_turns: 2000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Final standing of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRecord {
    pub name: String,
    pub money: i64,
    pub bankrupt: bool,
    pub properties: usize,
}

/// A complete simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Whether the game reached a single solvent player.
    pub finished: bool,
    pub winner: Option<PlayerId>,
    /// Roll attempts played, forfeits included.
    pub turns: usize,
    pub purchases: usize,
    pub upgrades: usize,
    pub cards_drawn: usize,
    pub seats: Vec<SeatRecord>,
}

/// Roster names for an `n`-seat game.
fn seat_names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Player {}", i)).collect()
}

fn game_rng(config: &SimulationConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays a single game to completion or until `max_turns` is reached.
pub fn play_game(
    config: &SimulationConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, GameError> {
    let mut state = GameState::new(&seat_names(config.players))?;
    let mut turns = 0;
    let mut purchases = 0;
    let mut upgrades = 0;
    let mut cards_drawn = 0;

    while turns < config.max_turns && !state.is_game_over() {
        turns += 1;
        let resolution = match roll_and_resolve(&mut state, rng) {
            TurnOutcome::PurchaseOffer { .. } => resolve_purchase(&mut state, true),
            TurnOutcome::UpgradeOffer { .. } => resolve_upgrade(&mut state, true),
            TurnOutcome::Resolved {
                effect: LandingEffect::Card(_),
                ..
            } => {
                cards_drawn += 1;
                continue;
            }
            _ => continue,
        };
        match resolution {
            OfferResolution::Accepted {
                kind: OfferKind::Purchase,
                ..
            } => purchases += 1,
            OfferResolution::Accepted {
                kind: OfferKind::Upgrade,
                ..
            } => upgrades += 1,
            _ => {}
        }
    }

    let seats = state
        .players()
        .iter()
        .map(|p| SeatRecord {
            name: p.name().to_string(),
            money: p.money(),
            bankrupt: p.is_bankrupt(),
            properties: p.owned_properties().len(),
        })
        .collect();

    Ok(GameRecord {
        game_id,
        finished: state.is_game_over(),
        winner: state.winner(),
        turns,
        purchases,
        upgrades,
        cards_drawn,
        seats,
    })
}

fn log_game(config: &SimulationConfig, n: usize, game: &GameRecord, elapsed: f64) {
    if config.quiet {
        return;
    }
    let outcome = match (game.finished, game.winner) {
        (true, Some(w)) => format!("player {} wins", w),
        (true, None) => "no survivors".to_string(),
        (false, _) => "unfinished".to_string(),
    };
    info!(
        "Game {}/{}: {} after {} turns ({:.3}s)",
        n, config.num_games, outcome, game.turns, elapsed
    );
}

/// Runs a batch of games and returns their records in completion order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_simulation(config: &SimulationConfig) -> Result<Vec<GameRecord>, SimulationError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_simulation_with_callback(config, |game| {
        games.push(game);
    })?;
    Ok(games)
}

/// Runs a batch of games, calling `on_game` with each completed record.
pub fn run_simulation_with_callback<F>(
    config: &SimulationConfig,
    on_game: F,
) -> Result<(), SimulationError>
where
    F: FnMut(GameRecord) + Send,
{
    // Reject a bad roster before any thread is started.
    GameState::new(&seat_names(config.players))?;
    if config.threads > 1 {
        run_simulation_parallel(config, on_game)
    } else {
        run_simulation_sequential(config, on_game)
    }
}

fn run_simulation_sequential<F>(config: &SimulationConfig, mut on_game: F) -> Result<(), SimulationError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let game_start = Instant::now();
        let mut rng = game_rng(config, i);
        let game = play_game(config, i, &mut rng)?;
        log_game(config, i + 1, &game, game_start.elapsed().as_secs_f64());
        on_game(game);
    }
    Ok(())
}

/// Plays games on a rayon pool and delivers them to `on_game` on the calling thread.
fn run_simulation_parallel<F>(config: &SimulationConfig, mut on_game: F) -> Result<(), SimulationError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<GameRecord>();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let game_start = Instant::now();
                    let mut rng = game_rng(&config_clone, i);
                    // The roster was validated before the pool started.
                    let Ok(game) = play_game(&config_clone, i, &mut rng) else {
                        return;
                    };
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    log_game(&config_clone, n, &game, game_start.elapsed().as_secs_f64());
                    let _ = tx.send(game);
                });
        });
    });

    for game in rx {
        on_game(game);
    }

    handle.join().map_err(|_| SimulationError::WorkerPanicked)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Logs a summary of simulation results.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let seats = games.iter().map(|g| g.seats.len()).max().unwrap_or(0);
    let mut win_counts = vec![0usize; seats];
    let mut unfinished = 0usize;
    let mut total_turns = 0usize;
    let mut total_purchases = 0usize;
    let mut total_upgrades = 0usize;

    for game in games {
        total_turns += game.turns;
        total_purchases += game.purchases;
        total_upgrades += game.upgrades;
        match game.winner {
            Some(w) if game.finished => win_counts[w.index()] += 1,
            _ => unfinished += 1,
        }
    }

    let avg = |n: usize| n as f64 / total.max(1) as f64;
    info!("=== Simulation Summary ===");
    info!("Games: {}", total);
    info!("Avg turns/game: {:.1}", avg(total_turns));
    info!("Avg purchases/game: {:.1}", avg(total_purchases));
    info!("Avg upgrades/game: {:.1}", avg(total_upgrades));
    info!("Unfinished or no winner: {}", unfinished);
    info!("Win distribution:");
    for (seat, &wins) in win_counts.iter().enumerate() {
        info!(
            "  seat {}: {} ({:.1}%)",
            seat,
            wins,
            100.0 * wins as f64 / total.max(1) as f64
        );
    }
}
