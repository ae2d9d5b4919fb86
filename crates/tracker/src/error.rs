// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tracker errors.
use rankshift_cards::Card;
use thiserror::Error;

/// Tracker result type.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors for malformed inputs handed to the tracker by the host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// The rank images are not a bijection on the 13 ranks.
    #[error("not a rank permutation: {0}")]
    NotABijection(String),
    /// A hand that must hold cards is empty.
    #[error("the {0} is empty")]
    EmptyHand(&'static str),
    /// A hand or the board holds more cards than the game deals.
    #[error("the {what} has {count} cards, at most {max} allowed")]
    TooManyCards {
        /// The offending cards set.
        what: &'static str,
        /// The number of cards.
        count: usize,
        /// The maximum number of cards.
        max: usize,
    },
    /// The board size is not one a street deals.
    #[error("the board has {0} cards, a street deals 0, 3, 4 or 5")]
    InvalidBoard(usize),
    /// The same card shows up more than once in a round.
    #[error("card {0} dealt more than once")]
    DuplicateCard(Card),
    /// The opponent shows a different number of cards than the player holds.
    #[error("opponent shows {opponent} cards but player holds {mine}")]
    HandSizeMismatch {
        /// The player hand size.
        mine: usize,
        /// The opponent hand size.
        opponent: usize,
    },
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
