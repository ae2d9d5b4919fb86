// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator builds per rank counts and per suit rank masks from the
//! card encoding and then searches the hand categories from the strongest
//! down, straights are found with shift and mask operations on the 13 bits
//! rank masks.
//!
//! A [HandValue] packs the category in the top bits followed by up to five
//! ranks that break ties within the category, so values compare with plain
//! integer ordering.
use std::fmt;

use rankshift_cards::Card;

/// Number of bits used by the tie breaking ranks.
const KICKER_BITS: u32 = 20;

/// Ace-to-five straight rank mask.
const WHEEL: u16 = 0b1_0000_0000_1111;

/// Index of the five rank.
const FIVE: u8 = 3;

/// A hand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandRank {
    fn from_bits(bits: u32) -> HandRank {
        use HandRank::*;
        match bits {
            0 => HighCard,
            1 => OnePair,
            2 => TwoPair,
            3 => ThreeOfAKind,
            4 => Straight,
            5 => Flush,
            6 => FullHouse,
            7 => FourOfAKind,
            8 => StraightFlush,
            _ => panic!("Invalid hand rank {bits}"),
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        write!(f, "{s}")
    }
}

/// The value of a hand, higher values are stronger hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

impl HandValue {
    /// Evaluates the best five cards hand that can be made from the given cards.
    ///
    /// Hands with fewer than five cards are ranked by the categories they can
    /// make (high card, pairs, trips and quads) with the cards they have.
    ///
    /// Panics if the number of cards is not 1 <= n <= 7.
    pub fn eval(cards: &[Card]) -> HandValue {
        assert!(
            !cards.is_empty() && cards.len() <= 7,
            "1 <= cards <= 7, got {}",
            cards.len()
        );

        let mut counts = [0u8; 13];
        let mut suits = [0u16; 4];
        let mut ranks = 0u16;

        for card in cards {
            counts[card.rank_bits() as usize] += 1;
            suits[card.suit().index()] |= card.rank_mask();
            ranks |= card.rank_mask();
        }

        // Groups of same rank cards from highest to lowest rank.
        let mut quads = Vec::with_capacity(1);
        let mut trips = Vec::with_capacity(2);
        let mut pairs = Vec::with_capacity(3);
        for rank in (0..13u8).rev() {
            match counts[rank as usize] {
                4 => quads.push(rank),
                3 => trips.push(rank),
                2 => pairs.push(rank),
                _ => {}
            }
        }

        let flush = suits.iter().copied().find(|s| s.count_ones() >= 5);

        if let Some(high) = flush.and_then(straight_high) {
            return Self::new(HandRank::StraightFlush, &[high]);
        }

        if let Some(&quad) = quads.first() {
            let kickers = top_ranks(ranks & !(1 << quad), 1);
            return Self::new(HandRank::FourOfAKind, &[vec![quad], kickers].concat());
        }

        if let Some(&trip) = trips.first() {
            // A second set of trips plays as the pair.
            let pair = match (trips.get(1), pairs.first()) {
                (Some(&t), Some(&p)) => Some(t.max(p)),
                (Some(&t), None) => Some(t),
                (None, Some(&p)) => Some(p),
                (None, None) => None,
            };

            if let Some(pair) = pair {
                return Self::new(HandRank::FullHouse, &[trip, pair]);
            }
        }

        if let Some(flush) = flush {
            return Self::new(HandRank::Flush, &top_ranks(flush, 5));
        }

        if let Some(high) = straight_high(ranks) {
            return Self::new(HandRank::Straight, &[high]);
        }

        if let Some(&trip) = trips.first() {
            let kickers = top_ranks(ranks & !(1 << trip), 2);
            return Self::new(HandRank::ThreeOfAKind, &[vec![trip], kickers].concat());
        }

        match pairs.as_slice() {
            &[hi, lo, ..] => {
                let kickers = top_ranks(ranks & !(1 << hi) & !(1 << lo), 1);
                Self::new(HandRank::TwoPair, &[vec![hi, lo], kickers].concat())
            }
            &[pair] => {
                let kickers = top_ranks(ranks & !(1 << pair), 3);
                Self::new(HandRank::OnePair, &[vec![pair], kickers].concat())
            }
            &[] => Self::new(HandRank::HighCard, &top_ranks(ranks, 5)),
        }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        HandRank::from_bits(self.0 >> KICKER_BITS)
    }

    /// The packed integer value.
    pub fn value(&self) -> u32 {
        self.0
    }

    fn new(rank: HandRank, ranks: &[u8]) -> HandValue {
        debug_assert!(ranks.len() <= 5);

        // Ranks are stored as rank + 1 so that a missing kicker sorts below a deuce.
        let kickers = ranks
            .iter()
            .enumerate()
            .fold(0u32, |acc, (pos, &r)| acc | ((r as u32 + 1) << (16 - 4 * pos)));

        HandValue(((rank as u32) << KICKER_BITS) | kickers)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:06x})", self.rank(), self.0)
    }
}

/// Returns the highest rank of a straight in the rank mask.
fn straight_high(mask: u16) -> Option<u8> {
    let mut bits = mask;
    for _ in 0..4 {
        bits &= bits << 1;
    }

    if bits != 0 {
        Some((15 - bits.leading_zeros()) as u8)
    } else if mask & WHEEL == WHEEL {
        Some(FIVE)
    } else {
        None
    }
}

/// Returns the `n` highest ranks in the rank mask from highest to lowest.
fn top_ranks(mask: u16, n: usize) -> Vec<u8> {
    (0..13u8)
        .rev()
        .filter(|&r| mask & (1 << r) != 0)
        .take(n)
        .collect()
}
