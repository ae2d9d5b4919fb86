// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rankshift Bot.
//!
//! A [Bot] plugs a permutation [Tracker] and a betting [Strategy] into the
//! game engine callbacks: a round start, an action request and a round end.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use log::info;
use rand::Rng;
use std::time::{Duration, Instant};
use thiserror::Error;

use rankshift_tracker::{
    HandEvaluator, RoundOutcome, StandardEvaluator, Tracker, TrackerConfig, TrackerError,
    UpdateSummary,
};

pub mod sim;
mod strategy;
pub use strategy::{ActionRequest, PassiveStrategy, PlayerAction, Strategy};

// Reexport the tracker crate.
pub use rankshift_tracker as tracker;

/// Bot errors.
#[derive(Debug, Error)]
pub enum BotError {
    /// None of check, call or fold is a legal action.
    #[error("no passive action among legal actions {0:?}")]
    NoPassiveAction(Vec<PlayerAction>),
    /// The tracker rejected an input.
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Bot configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// The tracker configuration.
    pub tracker: TrackerConfig,
    /// Number of rounds in a match.
    pub num_rounds: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            num_rounds: 1000,
        }
    }
}

/// A Poker bot for a match with permuted ranks.
#[derive(Debug)]
pub struct Bot<S, E = StandardEvaluator> {
    tracker: Tracker,
    strategy: S,
    evaluator: E,
    num_rounds: usize,
    clock: Duration,
}

impl<S: Strategy> Bot<S> {
    /// Creates a bot for a new match, sampling the permutation hypotheses.
    pub fn new<R: Rng>(config: Config, strategy: S, rng: &mut R) -> Result<Self, BotError> {
        let tracker = Tracker::new(config.tracker, rng)?;
        Ok(Self::from_tracker(tracker, strategy, config.num_rounds))
    }

    /// Creates a bot with an existing tracker.
    pub fn from_tracker(tracker: Tracker, strategy: S, num_rounds: usize) -> Self {
        Self {
            tracker,
            strategy,
            evaluator: StandardEvaluator,
            num_rounds,
            clock: Duration::ZERO,
        }
    }
}

impl<S: Strategy, E: HandEvaluator> Bot<S, E> {
    /// Replaces the hand evaluator.
    pub fn with_evaluator<E2: HandEvaluator>(self, evaluator: E2) -> Bot<S, E2> {
        Bot {
            tracker: self.tracker,
            strategy: self.strategy,
            evaluator,
            num_rounds: self.num_rounds,
            clock: self.clock,
        }
    }

    /// Called when a new round starts.
    pub fn handle_new_round(&mut self, round_num: usize) {
        self.tracker.handle_new_round(round_num);
    }

    /// Called when a round ends.
    pub fn handle_round_over(
        &mut self,
        round_num: usize,
        outcome: &RoundOutcome,
    ) -> Result<UpdateSummary, BotError> {
        let now = Instant::now();
        let summary = self.tracker.handle_round_over(outcome, &self.evaluator);
        self.clock += now.elapsed();

        if round_num == self.num_rounds {
            info!(
                "Match over: {} rounds, {} showdowns, {} hypotheses left, bot time {:.3}s",
                self.tracker.rounds(),
                self.tracker.showdowns(),
                self.tracker.population().len(),
                self.clock.as_secs_f64()
            );
        }

        summary.map_err(BotError::from)
    }

    /// Called when the engine needs an action from this bot.
    pub fn get_action(&mut self, req: &ActionRequest) -> Result<(PlayerAction, u32), BotError> {
        let now = Instant::now();
        let action = self.strategy.execute(req, self.tracker.population());
        self.clock += now.elapsed();
        action
    }

    /// The permutation tracker.
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Time spent in the bot callbacks.
    pub fn clock(&self) -> Duration {
        self.clock
    }
}
