//! Duel CLI
//!
//! Runs seeded matches from the command line:
//! - `simulate`: one match, printed as text or JSON
//! - `sweep`: many seeds in parallel with a possession balance report
//! - `request`: a JSON request file through the JSON API

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use duel_core::engine::{timestep, FrameRecorder};
use duel_core::{Difficulty, MatchConfig, MatchEngine, MatchSummary, Matchup, TeamSide};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "duel")]
#[command(version, about = "Seeded two-actor soccer duel simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one match
    Simulate {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Ticks to run (60 per second of match time)
        #[arg(long, default_value_t = 3600)]
        ticks: u64,

        /// Match length in seconds; overrides --ticks
        #[arg(long)]
        seconds: Option<f64>,

        /// Controller pairing, e.g. "minimax-vs-dqn"
        #[arg(long, default_value = "minimax-vs-dqn")]
        matchup: Matchup,

        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// JSON file with match config overrides
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// With --json, include every n-th snapshot
        #[arg(long, default_value_t = 0)]
        frames: u64,
    },

    /// Run many seeds in parallel and report possession balance
    Sweep {
        #[arg(long, default_value_t = 0)]
        first_seed: u64,

        #[arg(long, default_value_t = 32)]
        count: u64,

        #[arg(long, default_value_t = 500)]
        ticks: u64,

        #[arg(long, default_value = "heuristic-vs-heuristic")]
        matchup: Matchup,

        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Accepted home possession band
        #[arg(long, default_value_t = 0.3)]
        min_ratio: f64,

        #[arg(long, default_value_t = 0.7)]
        max_ratio: f64,

        /// Exit with an error if any seed falls outside the band
        #[arg(long)]
        strict: bool,
    },

    /// Run a JSON match request file
    Request {
        /// Request file path
        path: PathBuf,

        /// Write the response here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, ticks, seconds, matchup, difficulty, config, json, frames } => {
            let ticks = seconds.map(timestep::seconds_to_ticks).unwrap_or(ticks);
            let config = load_config(config.as_deref())?;
            let mut engine = MatchEngine::new(config, matchup, difficulty, seed)
                .context("failed to set up match")?;

            if json {
                let mut recorder = FrameRecorder::new(frames);
                let summary = engine.run_with(&mut recorder, ticks);
                let output = serde_json::json!({
                    "summary": summary,
                    "frames": recorder.frames(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let summary = engine.run(ticks);
                print_summary(&summary);
            }
        }

        Commands::Sweep {
            first_seed,
            count,
            ticks,
            matchup,
            difficulty,
            config,
            min_ratio,
            max_ratio,
            strict,
        } => {
            if min_ratio > max_ratio {
                bail!("--min-ratio ({min_ratio}) is above --max-ratio ({max_ratio})");
            }
            let seeds = seed_range(first_seed, count)?;
            if !matchup.is_mirror() {
                tracing::warn!("{} is not a mirror matchup; the possession band assumes equal sides", matchup);
            }
            let config = load_config(config.as_deref())?;
            tracing::info!(
                "Sweeping {} seeds from {} ({}, {}, {} ticks)",
                count,
                first_seed,
                matchup,
                difficulty,
                ticks
            );

            let summaries = run_sweep(config, matchup, difficulty, seeds, ticks)?;
            let report = SweepReport::new(&summaries, min_ratio, max_ratio);

            for summary in &summaries {
                let ratio = summary.possession.home;
                let mark = if report.outliers.contains(&summary.seed) { "  <-- outside band" } else { "" };
                println!(
                    "seed {:>6}: {}-{}  home possession {:.3}{}",
                    summary.seed, summary.score.home, summary.score.away, ratio, mark
                );
            }
            println!(
                "\n{} seeds, aggregate home possession {:.3}, range [{:.3}, {:.3}], {} outside [{}, {}]",
                summaries.len(),
                report.aggregate,
                report.min,
                report.max,
                report.outliers.len(),
                min_ratio,
                max_ratio
            );

            if strict && !report.outliers.is_empty() {
                bail!("{} seed(s) outside the possession band: {:?}", report.outliers.len(), report.outliers);
            }
        }

        Commands::Request { path, out } => {
            let request = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read request {}", path.display()))?;
            let response = duel_core::simulate_match_json(&request)
                .with_context(|| format!("request {} failed", path.display()))?;

            match out {
                Some(out) => {
                    std::fs::write(&out, &response)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    tracing::info!("Response written to {}", out.display());
                }
                None => println!("{response}"),
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(MatchConfig::default()),
    }
}

fn seed_range(first_seed: u64, count: u64) -> Result<std::ops::Range<u64>> {
    match first_seed.checked_add(count) {
        Some(end) => Ok(first_seed..end),
        None => bail!("--first-seed {first_seed} + --count {count} overflows the seed range"),
    }
}

fn run_sweep(
    config: MatchConfig,
    matchup: Matchup,
    difficulty: Difficulty,
    seeds: std::ops::Range<u64>,
    ticks: u64,
) -> Result<Vec<MatchSummary>> {
    let summaries = seeds
        .into_par_iter()
        .map(|seed| -> duel_core::Result<MatchSummary> {
            let mut engine = MatchEngine::new(config, matchup, difficulty, seed)?;
            Ok(engine.run(ticks))
        })
        .collect::<duel_core::Result<Vec<_>>>()?;
    Ok(summaries)
}

/// Possession balance across a sweep
#[derive(Debug)]
struct SweepReport {
    /// Home share of all possession ticks in the sweep
    aggregate: f64,
    min: f64,
    max: f64,
    outliers: Vec<u64>,
}

impl SweepReport {
    fn new(summaries: &[MatchSummary], min_ratio: f64, max_ratio: f64) -> Self {
        let home: u64 = summaries.iter().map(|s| s.possession_ticks.home).sum();
        let total: u64 = summaries.iter().map(|s| s.possession_ticks.total()).sum();
        let aggregate = if total == 0 { 0.5 } else { home as f64 / total as f64 };

        let ratios = summaries.iter().map(|s| s.possession.home);
        let min = ratios.clone().fold(f64::INFINITY, f64::min);
        let max = ratios.fold(f64::NEG_INFINITY, f64::max);

        let outliers = summaries
            .iter()
            .filter(|s| !(min_ratio..=max_ratio).contains(&s.possession.home))
            .map(|s| s.seed)
            .collect();

        Self { aggregate, min, max, outliers }
    }
}

fn print_summary(summary: &MatchSummary) {
    println!("Match: {} ({}), seed {}", summary.matchup, summary.difficulty, summary.seed);
    println!(
        "Duration: {} ticks ({:.1}s)",
        summary.ticks,
        timestep::ticks_to_seconds(summary.ticks)
    );
    println!("Score: home {} - {} away", summary.score.home, summary.score.away);
    for side in TeamSide::BOTH {
        println!(
            "  {:<5} possession {:>5.1}%  shots {:>3} (on goal {})",
            format!("{side:?}"),
            summary.possession.get(side) * 100.0,
            summary.shots.get(side),
            summary.shots_on_goal.get(side)
        );
    }
    for goal in &summary.goals {
        println!("  goal: {:?} at tick {}", goal.scorer, goal.tick);
    }
    match summary.winner {
        Some(side) => println!("Winner: {side:?}"),
        None => println!("Draw"),
    }
}
