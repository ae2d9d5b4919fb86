// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rankshift match simulator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;

use rankshift_bot::sim::{self, SimConfig};
use rankshift_tracker::TrackerConfig;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of rounds in the match.
    #[clap(long, default_value_t = 1000)]
    rounds: usize,
    /// Number of sampled permutation hypotheses.
    #[clap(long, default_value_t = 1000)]
    population: usize,
    /// Minimum number of consistent hypotheses to narrow the population.
    #[clap(long, default_value_t = 10)]
    floor: usize,
    /// Success probability of the prior displacement draws.
    #[clap(long, default_value_t = 0.25)]
    geometric_p: f64,
    /// Share of rounds the opponent folds.
    #[clap(long, default_value_t = 0.4)]
    fold_rate: f64,
    /// Add the secret permutation to the initial population.
    #[clap(long)]
    plant_secret: bool,
    /// Seed for a reproducible match.
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = SimConfig {
        rounds: cli.rounds,
        tracker: TrackerConfig {
            population_size: cli.population,
            geometric_p: cli.geometric_p,
            consistency_floor: cli.floor,
        },
        fold_rate: cli.fold_rate,
        plant_secret: cli.plant_secret,
        seed: cli.seed,
    };

    let report = sim::run(&config)?;
    println!("{report}");

    Ok(())
}
