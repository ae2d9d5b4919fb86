// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Offline match simulator.
//!
//! The simulator plays the engine role: it draws a secret permutation, deals
//! heads-up rounds, settles them with the secretly permuted ranks, and reports
//! each round to a [Bot] like the engine would.
use log::{debug, info};
use rand::prelude::*;
use std::{cmp::Ordering, fmt};

use rankshift_cards::{Card, Deck};
use rankshift_eval::HandValue;
use rankshift_tracker::{
    HypothesisPopulation, PriorSampler, RankPermutation, RoundOutcome, Tracker, TrackerConfig,
    TrackerError, UpdateSummary,
};

use crate::{ActionRequest, Bot, BotError, PassiveStrategy, PlayerAction, Strategy};

/// The big blind.
const BIG_BLIND: i32 = 2;

/// The starting stack, caps the bet a player can lose in a round.
const STARTING_STACK: i32 = 400;

/// Number of board cards dealt on each street.
const STREETS: [usize; 4] = [0, 3, 4, 5];

/// Simulation configuration.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Number of rounds in the match.
    pub rounds: usize,
    /// The tracker configuration.
    pub tracker: TrackerConfig,
    /// Share of rounds the opponent folds when the bot stays in.
    pub fold_rate: f64,
    /// Add the secret permutation to the initial population.
    pub plant_secret: bool,
    /// Seed for reproducible matches.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rounds: 1000,
            tracker: TrackerConfig::default(),
            fold_rate: 0.4,
            plant_secret: false,
            seed: None,
        }
    }
}

/// The result of a simulated match.
#[derive(Debug, Clone)]
pub struct SimReport {
    /// Number of rounds played.
    pub rounds: usize,
    /// Number of rounds that ended with a showdown.
    pub showdowns: usize,
    /// Showdowns that shrank the population.
    pub narrowing_showdowns: usize,
    /// Showdowns ignored because of the consistency floor.
    pub retained_showdowns: usize,
    /// The initial population size.
    pub initial_size: usize,
    /// The final population size.
    pub final_size: usize,
    /// The secret permutation.
    pub secret: RankPermutation,
    /// The secret permutation is in the final population.
    pub secret_survived: bool,
    /// Number of ranks whose most likely image is the secret image.
    pub recovered_ranks: usize,
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rounds:          {}", self.rounds)?;
        writeln!(f, "Showdowns:       {}", self.showdowns)?;
        writeln!(f, "  narrowing:     {}", self.narrowing_showdowns)?;
        writeln!(f, "  below floor:   {}", self.retained_showdowns)?;
        writeln!(
            f,
            "Population:      {} -> {}",
            self.initial_size, self.final_size
        )?;
        writeln!(f, "Secret:          {}", self.secret)?;
        writeln!(f, "Secret survived: {}", self.secret_survived)?;
        write!(f, "Recovered ranks: {}/13", self.recovered_ranks)
    }
}

/// Runs a simulated match with a passive bot.
pub fn run(config: &SimConfig) -> Result<SimReport, BotError> {
    run_with(config, PassiveStrategy)
}

/// Runs a simulated match with a bot playing the given strategy.
///
/// A bot fold ends the round without a showdown and loses the blind, when the
/// bot stays in the opponent folds with the configured rate or the round
/// goes to showdown.
pub fn run_with<S: Strategy>(config: &SimConfig, strategy: S) -> Result<SimReport, BotError> {
    if !(0.0..=1.0).contains(&config.fold_rate) {
        return Err(TrackerError::InvalidConfig(format!(
            "fold rate {} must be 0 <= rate <= 1",
            config.fold_rate
        ))
        .into());
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let secret = PriorSampler::new(&mut rng, config.tracker.geometric_p)?.sample_permutation();
    debug!("Secret permutation {secret}");

    let tracker = if config.plant_secret {
        config.tracker.validate()?;

        let mut hypotheses = PriorSampler::new(&mut rng, config.tracker.geometric_p)?
            .sample_population(config.tracker.population_size)?
            .as_slice()
            .to_vec();
        hypotheses.pop();
        hypotheses.push(secret);

        Tracker::from_population(config.tracker, HypothesisPopulation::new(hypotheses)?)?
    } else {
        Tracker::new(config.tracker, &mut rng)?
    };

    let initial_size = tracker.population().len();
    let mut bot = Bot::from_tracker(tracker, strategy, config.rounds);

    let mut narrowing_showdowns = 0;
    let mut retained_showdowns = 0;

    for round_num in 1..=config.rounds {
        bot.handle_new_round(round_num);

        let mut deck = Deck::new_and_shuffled(&mut rng);
        let my_hand = deck.deal_many(2);
        let opponent_hand = deck.deal_many(2);
        let board = deck.deal_many(5);

        let req = ActionRequest {
            actions: vec![PlayerAction::Fold, PlayerAction::Call, PlayerAction::Raise],
            min_raise: 2 * BIG_BLIND as u32,
            max_raise: STARTING_STACK as u32,
        };
        let (action, _) = bot.get_action(&req)?;

        let stake = rng.random_range(1..=STARTING_STACK / BIG_BLIND) * BIG_BLIND;
        let outcome = if action == PlayerAction::Fold {
            // The bot gave up preflop, the opponent cards stay hidden.
            RoundOutcome {
                my_hand,
                opponent_hand: vec![],
                board: vec![],
                delta: -BIG_BLIND,
            }
        } else if rng.random_bool(config.fold_rate) {
            // The opponent folded on some street, its cards stay hidden.
            let street = STREETS[rng.random_range(0..STREETS.len())];
            RoundOutcome {
                my_hand,
                opponent_hand: vec![],
                board: board[..street].to_vec(),
                delta: stake,
            }
        } else {
            let delta = match showdown_order(&secret, &my_hand, &opponent_hand, &board) {
                Ordering::Greater => stake,
                Ordering::Less => -stake,
                Ordering::Equal => 0,
            };

            RoundOutcome {
                my_hand,
                opponent_hand,
                board,
                delta,
            }
        };

        match bot.handle_round_over(round_num, &outcome)? {
            UpdateSummary::Narrowed { before, after } if after < before => {
                narrowing_showdowns += 1;
            }
            UpdateSummary::Retained { .. } => retained_showdowns += 1,
            _ => {}
        }
    }

    let tracker = bot.tracker();
    let population = tracker.population();
    let images = population.most_likely_images();
    let recovered_ranks = secret
        .images()
        .iter()
        .zip(images)
        .filter(|(s, i)| **s == *i)
        .count();

    let report = SimReport {
        rounds: tracker.rounds(),
        showdowns: tracker.showdowns(),
        narrowing_showdowns,
        retained_showdowns,
        initial_size,
        final_size: population.len(),
        secret,
        secret_survived: population.contains(&secret),
        recovered_ranks,
    };

    info!(
        "Simulation done, population {} -> {}",
        report.initial_size, report.final_size
    );

    Ok(report)
}

/// Compares the players hands under the secret permutation.
fn showdown_order(
    secret: &RankPermutation,
    my_hand: &[Card],
    opponent_hand: &[Card],
    board: &[Card],
) -> Ordering {
    let value = |hand: &[Card]| {
        let mut cards = Vec::with_capacity(7);
        secret.apply_into(hand, &mut cards);
        secret.apply_into(board, &mut cards);
        HandValue::eval(&cards)
    };

    value(my_hand).cmp(&value(opponent_hand))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planted_secret_survives() {
        let config = SimConfig {
            rounds: 300,
            plant_secret: true,
            seed: Some(17),
            ..Default::default()
        };

        let report = run(&config).unwrap();
        assert_eq!(report.rounds, 300);
        assert!(report.showdowns > 100 && report.showdowns < 250);
        assert_eq!(report.initial_size, 1000);
        assert!(report.final_size < report.initial_size);
        assert!(report.final_size >= config.tracker.consistency_floor);
        assert!(report.secret_survived);
    }

    #[test]
    fn seeded_runs_agree() {
        let config = SimConfig {
            rounds: 50,
            seed: Some(5),
            ..Default::default()
        };

        let r1 = run(&config).unwrap();
        let r2 = run(&config).unwrap();
        assert_eq!(r1.secret, r2.secret);
        assert_eq!(r1.final_size, r2.final_size);
        assert_eq!(r1.showdowns, r2.showdowns);
    }

    #[test]
    fn all_folds_learn_nothing() {
        let config = SimConfig {
            rounds: 50,
            fold_rate: 1.0,
            seed: Some(1),
            ..Default::default()
        };

        let report = run(&config).unwrap();
        assert_eq!(report.showdowns, 0);
        assert_eq!(report.final_size, report.initial_size);
    }

    /// Folds whenever it is allowed to.
    struct AlwaysFold;

    impl Strategy for AlwaysFold {
        fn execute(
            &mut self,
            req: &ActionRequest,
            _population: &HypothesisPopulation,
        ) -> Result<(PlayerAction, u32), BotError> {
            assert!(req.can_fold());
            Ok((PlayerAction::Fold, 0))
        }
    }

    #[test]
    fn folding_bot_sees_no_showdowns() {
        let config = SimConfig {
            rounds: 100,
            fold_rate: 0.0,
            seed: Some(3),
            ..Default::default()
        };

        let report = run_with(&config, AlwaysFold).unwrap();
        assert_eq!(report.rounds, 100);
        assert_eq!(report.showdowns, 0);
        assert_eq!(report.final_size, report.initial_size);

        // The same match with a passive bot always goes to showdown.
        let report = run(&config).unwrap();
        assert_eq!(report.showdowns, 100);
    }

    #[test]
    fn invalid_fold_rate() {
        let config = SimConfig {
            fold_rate: 1.5,
            ..Default::default()
        };

        assert!(matches!(
            run(&config),
            Err(BotError::Tracker(TrackerError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn report_display() {
        let report = SimReport {
            rounds: 10,
            showdowns: 6,
            narrowing_showdowns: 4,
            retained_showdowns: 1,
            initial_size: 1000,
            final_size: 40,
            secret: RankPermutation::identity(),
            secret_survived: true,
            recovered_ranks: 11,
        };

        let s = report.to_string();
        assert!(s.contains("Population:      1000 -> 40"));
        assert!(s.contains("Secret:          23456789TJQKA"));
        assert!(s.ends_with("Recovered ranks: 11/13"));
    }
}
