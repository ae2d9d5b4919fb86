// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Prior distribution over rank permutations.
use log::debug;
use rand::prelude::*;

use rankshift_cards::Rank;

use crate::{HypothesisPopulation, RankPermutation, Result, config::check_geometric_p};

/// Samples rank permutations from a displacement biased prior.
///
/// A permutation is built by assigning an image to each rank from deuce to
/// ace, picking the image from a list of the ranks not yet used that starts
/// sorted from ace down to deuce. Each pick skips a geometric number of
/// entries back from the end of the list, wrapping around, so that with small
/// skips every rank keeps the lowest image still available and the result
/// stays close to the identity.
///
/// The sampler owns its random generator, pass a seeded generator (or a
/// mutable reference to one) for reproducible draws.
#[derive(Debug)]
pub struct PriorSampler<R> {
    rng: R,
    geometric_p: f64,
}

impl<R: Rng> PriorSampler<R> {
    /// Creates a sampler with the given geometric parameter.
    pub fn new(rng: R, geometric_p: f64) -> Result<Self> {
        check_geometric_p(geometric_p)?;
        Ok(Self { rng, geometric_p })
    }

    /// Samples a displacement from the geometric distribution counting the
    /// failures before the first success, that is values in {0, 1, 2, ...}
    /// with mean `(1 - p) / p`.
    pub fn sample_displacement(&mut self) -> usize {
        let mut failures = 0;
        while !self.rng.random_bool(self.geometric_p) {
            failures += 1;
        }

        failures
    }

    /// Samples a permutation.
    pub fn sample_permutation(&mut self) -> RankPermutation {
        let mut remaining = Rank::ranks().rev().collect::<Vec<_>>();
        let mut images = Rank::ALL;

        for image in images.iter_mut() {
            let g = self.sample_displacement();
            let m = remaining.len();
            let pos = (m - 1) - (g % m);
            *image = remaining.remove(pos);
        }

        // Each rank is removed from remaining exactly once.
        RankPermutation::from_images(images)
            .unwrap_or_else(|e| unreachable!("prior produced {e}"))
    }

    /// Samples `n` independent permutations, duplicates are kept.
    pub fn sample_population(&mut self, n: usize) -> Result<HypothesisPopulation> {
        let hypotheses = (0..n).map(|_| self.sample_permutation()).collect::<Vec<_>>();
        debug!("Sampled {n} hypotheses with p={}", self.geometric_p);
        HypothesisPopulation::new(hypotheses)
    }
}
