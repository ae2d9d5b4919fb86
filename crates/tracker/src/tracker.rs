// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Match scoped permutation tracker.
use log::{debug, info};
use rand::Rng;

use crate::{
    HandEvaluator, HypothesisPopulation, PriorSampler, Result, RoundOutcome, TrackerConfig,
    UpdateSummary,
};

/// Tracks the plausible rank permutations for one match.
///
/// The tracker is created once when a match starts and dropped when it ends,
/// it owns the population and nothing else reads or writes it. The config is
/// consumed at construction, the consistency floor lives in the population.
#[derive(Debug)]
pub struct Tracker {
    population: HypothesisPopulation,
    rounds: usize,
    showdowns: usize,
}

impl Tracker {
    /// Creates a tracker sampling the initial population from the prior.
    pub fn new<R: Rng>(config: TrackerConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let population = PriorSampler::new(rng, config.geometric_p)?
            .sample_population(config.population_size)?
            .with_floor(config.consistency_floor)?;

        info!(
            "Tracker started with {} hypotheses, p={} floor={}",
            population.len(),
            config.geometric_p,
            config.consistency_floor
        );

        Ok(Self::with_population(population))
    }

    /// Creates a tracker with a given population, the population floor is
    /// set from the config.
    pub fn from_population(
        config: TrackerConfig,
        population: HypothesisPopulation,
    ) -> Result<Self> {
        config.validate()?;
        let population = population.with_floor(config.consistency_floor)?;
        Ok(Self::with_population(population))
    }

    fn with_population(population: HypothesisPopulation) -> Self {
        Self {
            population,
            rounds: 0,
            showdowns: 0,
        }
    }

    /// Called when a new round starts, the tracker has nothing to do.
    pub fn handle_new_round(&mut self, round_num: usize) {
        debug!(
            "Round {round_num} started with {} hypotheses",
            self.population.len()
        );
    }

    /// Called when a round ends, updates the population if there was a showdown.
    ///
    /// A rejected outcome is not counted as a played round.
    pub fn handle_round_over<E: HandEvaluator>(
        &mut self,
        outcome: &RoundOutcome,
        evaluator: &E,
    ) -> Result<UpdateSummary> {
        let summary = self.population.update(outcome, evaluator)?;

        self.rounds += 1;
        if summary != UpdateSummary::NoShowdown {
            self.showdowns += 1;
        }

        Ok(summary)
    }

    /// The current population.
    pub fn population(&self) -> &HypothesisPopulation {
        &self.population
    }

    /// Number of rounds reported so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Number of rounds that ended with a showdown.
    pub fn showdowns(&self) -> usize {
        self.showdowns
    }
}
