// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Round outcomes reported by the game engine.
use ahash::HashSet;
use serde::{Deserialize, Serialize};

use rankshift_cards::Card;

use crate::{Result, TrackerError};

/// Maximum number of hole cards.
const MAX_HOLE_CARDS: usize = 2;

/// Board sizes at preflop, flop, turn and river.
const BOARD_SIZES: [usize; 4] = [0, 3, 4, 5];

/// The result of a round as seen by this player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// This player hole cards.
    pub my_hand: Vec<Card>,
    /// The opponent hole cards, empty if they were not revealed.
    pub opponent_hand: Vec<Card>,
    /// The board cards dealt by the street the round ended on.
    pub board: Vec<Card>,
    /// This player bankroll change for the round.
    pub delta: i32,
}

impl RoundOutcome {
    /// Checks if the round ended with a showdown.
    pub fn is_showdown(&self) -> bool {
        !self.opponent_hand.is_empty()
    }

    /// Checks the outcome is something a game could deal.
    pub fn validate(&self) -> Result<()> {
        if self.my_hand.is_empty() {
            return Err(TrackerError::EmptyHand("player hand"));
        }

        check_size("player hand", &self.my_hand, MAX_HOLE_CARDS)?;
        check_size("opponent hand", &self.opponent_hand, MAX_HOLE_CARDS)?;

        if !BOARD_SIZES.contains(&self.board.len()) {
            return Err(TrackerError::InvalidBoard(self.board.len()));
        }

        if self.is_showdown() && self.opponent_hand.len() != self.my_hand.len() {
            return Err(TrackerError::HandSizeMismatch {
                mine: self.my_hand.len(),
                opponent: self.opponent_hand.len(),
            });
        }

        let mut seen = HashSet::default();
        self.my_hand
            .iter()
            .chain(&self.opponent_hand)
            .chain(&self.board)
            .try_for_each(|&card| {
                if seen.insert(card) {
                    Ok(())
                } else {
                    Err(TrackerError::DuplicateCard(card))
                }
            })
    }
}

fn check_size(what: &'static str, cards: &[Card], max: usize) -> Result<()> {
    if cards.len() > max {
        Err(TrackerError::TooManyCards {
            what,
            count: cards.len(),
            max,
        })
    } else {
        Ok(())
    }
}
