// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rankshift cards types.
//!
//! This crate defines the cards types shared by the evaluator and the
//! permutation tracker:
//!
//! ```
//! # use rankshift_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert_eq!(kd, Card::new(Rank::King, Suit::Diamonds));
//!
//! // A rank can be rewritten leaving the suit untouched.
//! let dh = ah.with_rank(Rank::Deuce);
//! assert_eq!(dh.suit(), Suit::Hearts);
//! ```
//!
//! and a [Deck] type for shuffling and dealing:
//!
//! ```
//! # use rankshift_cards::Deck;
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! let hole = [deck.deal().unwrap(), deck.deal().unwrap()];
//! assert_ne!(hole[0], hole[1]);
//! assert_eq!(deck.count(), Deck::SIZE - 2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cards;
pub use cards::{Card, Deck, ParseCardError, Rank, Suit};
