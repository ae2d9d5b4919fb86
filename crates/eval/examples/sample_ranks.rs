// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example sample_ranks -- --hands 10000000
// ...
// Total hands      10000000
// Elapsed:         1.912s
// Hands/sec:       5230125
//
// High Card:       17.41%
// One Pair:        43.82%
// ...
// ```
use clap::Parser;
use std::time::Instant;

use rankshift_eval::*;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of random 7 cards hands to evaluate.
    #[clap(long, default_value_t = 1_000_000)]
    hands: usize,
}

fn main() {
    let cli = Cli::parse();

    let mut rng = rand::rng();
    let mut counts = [0usize; 9];

    let now = Instant::now();
    for _ in 0..cli.hands {
        let cards = Deck::new_and_shuffled(&mut rng).deal_many(7);
        let rank = HandValue::eval(&cards).rank();
        counts[rank as usize] += 1;
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    let ranks = [
        HandRank::HighCard,
        HandRank::OnePair,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::StraightFlush,
    ];

    for rank in ranks {
        let share = counts[rank as usize] as f64 * 100.0 / total.max(1) as f64;
        println!("{:<17}{share:.2}%", format!("{rank}:"));
    }
}
