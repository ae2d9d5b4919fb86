// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rankshift rank permutation tracker.
//!
//! In this Poker variant the strength order of the 13 card ranks is secretly
//! permuted at the start of a match. The tracker keeps a population of
//! candidate [RankPermutation]s sampled from a prior that favours small
//! displacements and drops the candidates that contradict showdown results:
//!
//! ```
//! # use rand::{SeedableRng, rngs::StdRng};
//! # use rankshift_tracker::*;
//! # use rankshift_cards::Card;
//! let cards = |s: &str| s.split(' ').map(|c| c.parse::<Card>().unwrap()).collect::<Vec<_>>();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut tracker = Tracker::new(TrackerConfig::default(), &mut rng).unwrap();
//! assert_eq!(tracker.population().len(), 1000);
//!
//! // We won with sevens up against fours up.
//! let outcome = RoundOutcome {
//!     my_hand: cards("7C 7D"),
//!     opponent_hand: cards("2C 3D"),
//!     board: cards("9S 9H 4C 4D KC"),
//!     delta: 50,
//! };
//!
//! tracker.handle_round_over(&outcome, &StandardEvaluator).unwrap();
//! assert!(tracker.population().len() <= 1000);
//! ```
//!
//! The population never grows and never empties: a showdown that would leave
//! fewer than [TrackerConfig::consistency_floor] candidates is ignored.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod config;
mod error;
mod outcome;
mod permutation;
mod population;
mod prior;
mod tracker;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use outcome::RoundOutcome;
pub use permutation::RankPermutation;
pub use population::{HandEvaluator, HypothesisPopulation, StandardEvaluator, UpdateSummary};
pub use prior::PriorSampler;
pub use tracker::Tracker;
