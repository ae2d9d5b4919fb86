// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rankshift Poker hand evaluator.
//!
//! Poker hand evaluator for hands from 1 to 7 cards using standard hand
//! rankings. Every hand is mapped to a [HandValue] whose total order is the
//! hand strength order, equal values are split pots:
//!
//! ```
//! # use rankshift_eval::*;
//! let cards = |s: &str| s.split(' ').map(|c| c.parse::<Card>().unwrap()).collect::<Vec<_>>();
//!
//! let v1 = HandValue::eval(&cards("7C 7D 9S 9H 4C 4D KC"));
//! let v2 = HandValue::eval(&cards("2C 3D 9S 9H 4C 4D KC"));
//! assert_eq!(v1.rank(), HandRank::TwoPair);
//! assert!(v1 > v2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandRank, HandValue};

// Reexport cards types.
pub use rankshift_cards::{Card, Deck, Rank, Suit};
