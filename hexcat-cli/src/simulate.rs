//! Simulate command - random blocker against the cat
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_batch(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: rng and formatting utilities
//!
//! Games are independent, so the batch runs on the rayon pool. Each game
//! draws from its own rng derived from the batch seed, which keeps results
//! reproducible regardless of scheduling.

use anyhow::{Context, Result};
use clap::Args;
use indicatif::ParallelProgressIterator;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use hexcat_core::{CatStrategy, Difficulty, GameState, GameStatus, Hex};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Board size (distance from center to the border ring)
    #[arg(long, default_value = "5")]
    pub size: i32,

    /// Cat difficulty: easy (BFS) or hard (A*)
    #[arg(long, default_value = "easy")]
    pub difficulty: Difficulty,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Batch parameters
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    pub games: usize,
    pub board_size: i32,
    pub difficulty: Difficulty,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            board_size: 5,
            difficulty: Difficulty::Easy,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_board_size(mut self, board_size: i32) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct SimulatedGame {
    game_number: usize,
    status: GameStatus,
    moves: u32,
    score: i64,
    cat: Hex,
}

/// Aggregated batch results
#[derive(Clone, Debug, Serialize)]
struct SimulationResults {
    board_size: i32,
    difficulty: Difficulty,
    seed: u64,
    total_games: usize,
    player_wins: usize,
    cat_escapes: usize,
    win_rate: f64,
    avg_moves: f64,
    avg_score: f64,
    best_score: i64,
    games: Vec<SimulatedGame>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// This function reads like a table of contents:
/// 1. Build the batch configuration
/// 2. Play every game
/// 3. Report results
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let config = SimulationConfig::default()
        .with_games(args.games)
        .with_board_size(args.size)
        .with_difficulty(args.difficulty)
        .with_seed(seed.unwrap_or_else(rand::random));

    tracing::info!(
        "Simulating {} games on size {} ({} cat, seed={})",
        config.games,
        config.board_size,
        config.difficulty,
        config.seed
    );

    let results = play_batch(&config)?;

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games of the batch in parallel
fn play_batch(config: &SimulationConfig) -> Result<SimulationResults> {
    if config.games == 0 {
        anyhow::bail!("Nothing to simulate: --games must be at least 1");
    }

    let games = (0..config.games)
        .into_par_iter()
        .progress_count(config.games as u64)
        .map(|index| play_single_game(config, index))
        .collect::<Result<Vec<_>>>()?;

    Ok(compute_statistics(config, games))
}

/// Report batch results
fn report_results(results: &SimulationResults, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(results).context("Failed to encode results")?;
        println!("{}", text);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game, blocking a random legal cell each turn
fn play_single_game(config: &SimulationConfig, index: usize) -> Result<SimulatedGame> {
    let mut rng = game_rng(config.seed, index);
    let strategy = CatStrategy::for_difficulty(config.difficulty);
    let mut game = GameState::new(format!("sim-{}", index + 1), config.board_size, strategy)
        .with_context(|| format!("Failed to start game {}", index + 1))?;

    while !game.is_finished() {
        let cat = game.cat_position();
        let legal = game
            .board()
            .cells_where(|board, pos| board.is_interior_legal_for_player(pos) && pos != cat);
        let Some(&cell) = legal.choose(&mut rng) else {
            game.abort();
            break;
        };
        game.apply_player_move(cell)?;
    }

    tracing::debug!(game = index + 1, status = %game.status(), moves = game.move_count(), "simulated");

    Ok(SimulatedGame {
        game_number: index + 1,
        status: game.status(),
        moves: game.move_count(),
        score: game.score(),
        cat: game.cat_position(),
    })
}

/// Compute aggregate statistics from finished games
fn compute_statistics(config: &SimulationConfig, games: Vec<SimulatedGame>) -> SimulationResults {
    let total = games.len();
    let player_wins = games
        .iter()
        .filter(|g| g.status == GameStatus::PlayerWon)
        .count();
    let cat_escapes = games
        .iter()
        .filter(|g| g.status == GameStatus::CatEscaped)
        .count();

    let total_moves: u64 = games.iter().map(|g| g.moves as u64).sum();
    let total_score: i64 = games.iter().map(|g| g.score).sum();

    SimulationResults {
        board_size: config.board_size,
        difficulty: config.difficulty,
        seed: config.seed,
        total_games: total,
        player_wins,
        cat_escapes,
        win_rate: ratio(player_wins as f64, total),
        avg_moves: ratio(total_moves as f64, total),
        avg_score: ratio(total_score as f64, total),
        best_score: games.iter().map(|g| g.score).max().unwrap_or(0),
        games,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Per-game rng derived from the batch seed
fn game_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

fn ratio(value: f64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        value / total as f64
    }
}

/// Print results as text
fn print_text_results(results: &SimulationResults) {
    println!("\n=== Simulation Results ===");
    println!(
        "Board size:   {} ({} cat, seed {})",
        results.board_size, results.difficulty, results.seed
    );
    println!("Total games:  {}", results.total_games);
    println!(
        "Cat trapped:  {} ({:.1}%)",
        results.player_wins,
        results.win_rate * 100.0
    );
    println!(
        "Cat escaped:  {} ({:.1}%)",
        results.cat_escapes,
        ratio(results.cat_escapes as f64, results.total_games) * 100.0
    );
    println!("Avg moves:    {:.1}", results.avg_moves);
    println!("Avg score:    {:.1}", results.avg_score);
    println!("Best score:   {}", results.best_score);
}

// ============================================================================
// TESTS
// ============================================================================
