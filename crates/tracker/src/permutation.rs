// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rank permutations.
use std::fmt;

use rankshift_cards::{Card, Rank};

use crate::{Result, TrackerError};

/// A bijection on the 13 card ranks.
///
/// The permutation maps the canonical rank at index `i` to `images[i]`,
/// applied to a card it rewrites the rank and leaves the suit untouched.
/// All constructors guarantee that every rank has exactly one image.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankPermutation([Rank; Rank::COUNT]);

impl RankPermutation {
    /// The identity permutation.
    pub fn identity() -> Self {
        Self(Rank::ALL)
    }

    /// A permutation that exchanges two ranks and leaves the others in place.
    pub fn swap(r1: Rank, r2: Rank) -> Self {
        let mut images = Rank::ALL;
        images.swap(r1.index(), r2.index());
        Self(images)
    }

    /// Creates a permutation from the rank images, `images[i]` is the image of
    /// the rank with canonical index `i`.
    pub fn from_images(images: [Rank; Rank::COUNT]) -> Result<Self> {
        let mut seen = 0u16;
        for rank in images {
            let bit = 1u16 << rank.index();
            if seen & bit != 0 {
                return Err(TrackerError::NotABijection(format!(
                    "rank {rank} is the image of more than one rank"
                )));
            }

            seen |= bit;
        }

        Ok(Self(images))
    }

    /// Creates a permutation from the canonical rank indices of the images.
    pub fn from_indices(indices: &[u8]) -> Result<Self> {
        if indices.len() != Rank::COUNT {
            return Err(TrackerError::NotABijection(format!(
                "expected {} images, got {}",
                Rank::COUNT,
                indices.len()
            )));
        }

        let mut images = Rank::ALL;
        for (image, &idx) in images.iter_mut().zip(indices) {
            *image = Rank::from_index(idx).ok_or_else(|| {
                TrackerError::NotABijection(format!("rank index {idx} out of range"))
            })?;
        }

        Self::from_images(images)
    }

    /// Returns the image of a rank.
    #[inline]
    pub fn image(&self, rank: Rank) -> Rank {
        self.0[rank.index()]
    }

    /// Returns the images of all ranks in canonical order.
    pub fn images(&self) -> &[Rank; Rank::COUNT] {
        &self.0
    }

    /// Rewrites the card rank through this permutation.
    #[inline]
    pub fn apply(&self, card: Card) -> Card {
        card.with_rank(self.image(card.rank()))
    }

    /// Appends the permuted cards to `out`.
    pub fn apply_into(&self, cards: &[Card], out: &mut Vec<Card>) {
        out.extend(cards.iter().map(|&c| self.apply(c)));
    }

    /// Returns the inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut inverse = Rank::ALL;
        for (rank, image) in Rank::ranks().zip(self.0) {
            inverse[image.index()] = rank;
        }

        Self(inverse)
    }

    /// Number of ranks mapped to themselves.
    pub fn fixed_points(&self) -> usize {
        Rank::ranks().zip(self.0).filter(|(r, i)| r == i).count()
    }
}

impl Default for RankPermutation {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for RankPermutation {
    /// Formats the images of 23456789TJQKA in order, the identity shows as
    /// `23456789TJQKA`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|r| write!(f, "{r}"))
    }
}

impl fmt::Debug for RankPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RankPermutation({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankshift_cards::Suit;

    #[test]
    fn identity_and_swap() {
        let id = RankPermutation::identity();
        assert_eq!(id.to_string(), "23456789TJQKA");
        assert_eq!(id.fixed_points(), 13);

        let p = RankPermutation::swap(Rank::King, Rank::Ace);
        assert_eq!(p.to_string(), "23456789TJQAK");
        assert_eq!(p.image(Rank::King), Rank::Ace);
        assert_eq!(p.image(Rank::Ace), Rank::King);
        assert_eq!(p.image(Rank::Seven), Rank::Seven);
        assert_eq!(p.fixed_points(), 11);
        assert_eq!(p.inverse(), p);
    }

    #[test]
    fn apply_keeps_suit() {
        let p = RankPermutation::swap(Rank::Deuce, Rank::Trey);
        let card = Card::new(Rank::Deuce, Suit::Clubs);
        assert_eq!(p.apply(card), Card::new(Rank::Trey, Suit::Clubs));

        let mut out = vec![];
        p.apply_into(
            &[
                Card::new(Rank::Trey, Suit::Diamonds),
                Card::new(Rank::Nine, Suit::Spades),
            ],
            &mut out,
        );
        assert_eq!(
            out,
            vec![
                Card::new(Rank::Deuce, Suit::Diamonds),
                Card::new(Rank::Nine, Suit::Spades),
            ]
        );
    }

    #[test]
    fn from_indices() {
        let reversed = (0..13u8).rev().collect::<Vec<_>>();
        let p = RankPermutation::from_indices(&reversed).unwrap();
        assert_eq!(p.to_string(), "AKQJT98765432");
        assert_eq!(p.image(Rank::Deuce), Rank::Ace);
        assert_eq!(p.inverse(), p);

        let p = RankPermutation::from_indices(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 0]).unwrap();
        assert_eq!(p.inverse().image(p.image(Rank::Ten)), Rank::Ten);
        assert_eq!(p.fixed_points(), 0);
    }

    #[test]
    fn not_a_bijection() {
        let mut dup = (0..13u8).collect::<Vec<_>>();
        dup[5] = 4;
        assert!(matches!(
            RankPermutation::from_indices(&dup),
            Err(TrackerError::NotABijection(_))
        ));

        let short = (0..12u8).collect::<Vec<_>>();
        assert!(RankPermutation::from_indices(&short).is_err());

        let mut out_of_range = (0..13u8).collect::<Vec<_>>();
        out_of_range[12] = 13;
        assert!(RankPermutation::from_indices(&out_of_range).is_err());

        let mut images = Rank::ALL;
        images[0] = Rank::Ace;
        assert!(RankPermutation::from_images(images).is_err());
    }
}
