// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hypotheses population and the showdown consistency filter.
use log::{debug, info, warn};

use rankshift_cards::{Card, Rank};
use rankshift_eval::HandValue;

use crate::{RankPermutation, Result, RoundOutcome, TrackerConfig, TrackerError};

/// A hand strength function.
///
/// Higher strengths are stronger hands, equal strengths split the pot.
pub trait HandEvaluator {
    /// The strength type.
    type Strength: Ord;

    /// Evaluates the strength of hole and board cards.
    fn evaluate(&self, cards: &[Card]) -> Self::Strength;
}

impl<F, S> HandEvaluator for F
where
    F: Fn(&[Card]) -> S,
    S: Ord,
{
    type Strength = S;

    fn evaluate(&self, cards: &[Card]) -> S {
        self(cards)
    }
}

/// Evaluates hands with the standard Poker rankings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    type Strength = HandValue;

    fn evaluate(&self, cards: &[Card]) -> HandValue {
        HandValue::eval(cards)
    }
}

/// What an update did to the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSummary {
    /// The opponent cards were not revealed, nothing to learn.
    NoShowdown,
    /// The population was replaced by the consistent hypotheses.
    Narrowed {
        /// Size before the update.
        before: usize,
        /// Size after the update.
        after: usize,
    },
    /// Too few hypotheses were consistent and the population was kept.
    Retained {
        /// The population size.
        size: usize,
        /// Number of consistent hypotheses.
        consistent: usize,
    },
}

/// The rank permutations still considered plausible in a match.
///
/// Hypotheses carry no weights, a permutation is either in the population or
/// out of it, and duplicates count once per copy.
#[derive(Debug, Clone)]
pub struct HypothesisPopulation {
    hypotheses: Vec<RankPermutation>,
    floor: usize,
}

impl HypothesisPopulation {
    /// Creates a population with the default consistency floor.
    pub fn new(hypotheses: Vec<RankPermutation>) -> Result<Self> {
        if hypotheses.is_empty() {
            return Err(TrackerError::InvalidConfig(
                "population must hold at least one hypothesis".to_string(),
            ));
        }

        Ok(Self {
            hypotheses,
            floor: TrackerConfig::CONSISTENCY_FLOOR,
        })
    }

    /// Sets the minimum number of consistent hypotheses that can replace
    /// the population.
    pub fn with_floor(mut self, floor: usize) -> Result<Self> {
        if floor == 0 {
            return Err(TrackerError::InvalidConfig(
                "consistency floor must be positive".to_string(),
            ));
        }

        self.floor = floor;
        Ok(self)
    }

    /// The consistency floor.
    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Number of hypotheses.
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    /// Always false, a population is never empty.
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    /// Iterates the hypotheses.
    pub fn iter(&self) -> impl Iterator<Item = &RankPermutation> {
        self.hypotheses.iter()
    }

    /// The hypotheses.
    pub fn as_slice(&self) -> &[RankPermutation] {
        &self.hypotheses
    }

    /// Checks if a permutation is in the population.
    pub fn contains(&self, perm: &RankPermutation) -> bool {
        self.hypotheses.contains(perm)
    }

    /// Filters the population with a showdown outcome.
    ///
    /// A hypothesis is consistent when the hands strengths under that
    /// permutation order the players the same way as the bankroll delta does.
    /// The consistent hypotheses replace the population only if there are at
    /// least [floor](Self::floor) of them, otherwise the round is ignored.
    ///
    /// Rounds without a showdown are ignored before the outcome is checked.
    pub fn update<E: HandEvaluator>(
        &mut self,
        outcome: &RoundOutcome,
        evaluator: &E,
    ) -> Result<UpdateSummary> {
        if !outcome.is_showdown() {
            return Ok(UpdateSummary::NoShowdown);
        }

        outcome.validate()?;

        let mut scratch = Scratch::default();
        let consistent = self
            .hypotheses
            .iter()
            .filter(|h| scratch.is_consistent(h, outcome, evaluator))
            .copied()
            .collect::<Vec<_>>();

        let before = self.hypotheses.len();
        debug!(
            "Showdown delta={} consistent {}/{before}",
            outcome.delta,
            consistent.len()
        );

        if consistent.len() >= self.floor {
            self.hypotheses = consistent;
            let after = self.hypotheses.len();
            if after < before {
                info!("Population narrowed {before} -> {after}");
            }

            Ok(UpdateSummary::Narrowed { before, after })
        } else {
            warn!(
                "Only {} of {before} hypotheses consistent, below floor {}, round ignored",
                consistent.len(),
                self.floor
            );

            Ok(UpdateSummary::Retained {
                size: before,
                consistent: consistent.len(),
            })
        }
    }

    /// Checks a single hypothesis against a showdown outcome.
    pub fn is_consistent<E: HandEvaluator>(
        hypothesis: &RankPermutation,
        outcome: &RoundOutcome,
        evaluator: &E,
    ) -> bool {
        Scratch::default().is_consistent(hypothesis, outcome, evaluator)
    }

    /// Counts for each canonical rank how many hypotheses map it to each image,
    /// `marginals[rank][image]`.
    pub fn rank_marginals(&self) -> [[u32; Rank::COUNT]; Rank::COUNT] {
        let mut marginals = [[0u32; Rank::COUNT]; Rank::COUNT];
        for h in &self.hypotheses {
            for (rank, image) in h.images().iter().enumerate() {
                marginals[rank][image.index()] += 1;
            }
        }

        marginals
    }

    /// The most frequent image of each rank, lowest image on ties.
    ///
    /// The result is a per rank estimate and is not guaranteed to be a
    /// permutation.
    pub fn most_likely_images(&self) -> [Rank; Rank::COUNT] {
        let marginals = self.rank_marginals();
        let mut images = Rank::ALL;
        for (image, counts) in images.iter_mut().zip(marginals) {
            let (best, _) = counts
                .iter()
                .enumerate()
                .fold((0, 0), |acc, (idx, &n)| if n > acc.1 { (idx, n) } else { acc });
            *image = Rank::ALL[best];
        }

        images
    }
}

/// Reusable buffers for the permuted hands.
#[derive(Default)]
struct Scratch {
    mine: Vec<Card>,
    theirs: Vec<Card>,
}

impl Scratch {
    fn is_consistent<E: HandEvaluator>(
        &mut self,
        h: &RankPermutation,
        outcome: &RoundOutcome,
        evaluator: &E,
    ) -> bool {
        self.mine.clear();
        h.apply_into(&outcome.my_hand, &mut self.mine);
        h.apply_into(&outcome.board, &mut self.mine);

        self.theirs.clear();
        h.apply_into(&outcome.opponent_hand, &mut self.theirs);
        h.apply_into(&outcome.board, &mut self.theirs);

        let order = evaluator
            .evaluate(&self.mine)
            .cmp(&evaluator.evaluate(&self.theirs));

        // Win, loss and split pot must match the strengths order exactly.
        order == outcome.delta.cmp(&0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::cmp::Ordering;

    use crate::PriorSampler;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn outcome(mine: &str, theirs: &str, board: &str, delta: i32) -> RoundOutcome {
        RoundOutcome {
            my_hand: cards(mine),
            opponent_hand: cards(theirs),
            board: cards(board),
            delta,
        }
    }

    fn sevens_up() -> RoundOutcome {
        outcome("7C 7D", "2C 3D", "9S 9H 4C 4D KC", 50)
    }

    fn population(hypotheses: Vec<RankPermutation>, floor: usize) -> HypothesisPopulation {
        HypothesisPopulation::new(hypotheses)
            .and_then(|p| p.with_floor(floor))
            .unwrap()
    }

    #[test]
    fn classification_positive_delta() {
        let id = RankPermutation::identity();

        // Aces beat kings under the identity.
        let win = outcome("AC AD", "KC KD", "2S 7H 9C", 10);
        assert!(HypothesisPopulation::is_consistent(&id, &win, &StandardEvaluator));

        // Swapping aces and kings makes the same win impossible.
        let swap = RankPermutation::swap(Rank::King, Rank::Ace);
        assert!(!HypothesisPopulation::is_consistent(&swap, &win, &StandardEvaluator));

        // Equal strengths are inconsistent with a win.
        let split = outcome("AC KD", "AD KC", "2S 7H 9C 3D 4S", 10);
        assert!(!HypothesisPopulation::is_consistent(&id, &split, &StandardEvaluator));
    }

    #[test]
    fn classification_negative_and_zero_delta() {
        let id = RankPermutation::identity();
        let swap = RankPermutation::swap(Rank::King, Rank::Ace);

        let loss = outcome("KC KD", "AC AD", "2S 7H 9C", -10);
        assert!(HypothesisPopulation::is_consistent(&id, &loss, &StandardEvaluator));
        assert!(!HypothesisPopulation::is_consistent(&swap, &loss, &StandardEvaluator));

        // A split pot is consistent only with equal strengths, the swap keeps
        // the hands equal.
        let split = outcome("AC KD", "AD KC", "2S 7H 9C 3D 4S", 0);
        assert!(HypothesisPopulation::is_consistent(&id, &split, &StandardEvaluator));
        assert!(HypothesisPopulation::is_consistent(&swap, &split, &StandardEvaluator));

        let not_split = outcome("AC AD", "KC KD", "2S 7H 9C", 0);
        assert!(!HypothesisPopulation::is_consistent(&id, &not_split, &StandardEvaluator));
    }

    #[test]
    fn sevens_up_scenario() {
        let id = RankPermutation::identity();
        let p2 = RankPermutation::swap(Rank::Deuce, Rank::Trey);
        let p3 = RankPermutation::swap(Rank::King, Rank::Ace);

        // Swapping deuce and trey only trades the opponent's two dead cards and
        // swapping king and ace changes the shared kicker for both players,
        // every hypothesis keeps sevens up ahead of fours up.
        let outcome = sevens_up();
        for h in [id, p2, p3] {
            assert!(HypothesisPopulation::is_consistent(&h, &outcome, &StandardEvaluator));
        }

        let mut pop = population(vec![id, p2, p3], 2);
        let summary = pop.update(&outcome, &StandardEvaluator).unwrap();
        assert_eq!(summary, UpdateSummary::Narrowed { before: 3, after: 3 });
        assert_eq!(pop.as_slice(), &[id, p2, p3]);

        // Swapping sevens and fours turns the hands into the same two pair.
        let p4 = RankPermutation::swap(Rank::Seven, Rank::Four);
        assert!(!HypothesisPopulation::is_consistent(&p4, &outcome, &StandardEvaluator));

        let mut pop = population(vec![id, p4, p2, p3], 2);
        let summary = pop.update(&outcome, &StandardEvaluator).unwrap();
        assert_eq!(summary, UpdateSummary::Narrowed { before: 4, after: 3 });
        assert_eq!(pop.as_slice(), &[id, p2, p3]);
        assert!(!pop.contains(&p4));
    }

    /// Builds 1000 hypotheses where exactly `n` are consistent with sevens up.
    fn mixed_population(n: usize) -> Vec<RankPermutation> {
        let good = RankPermutation::identity();
        let bad = RankPermutation::swap(Rank::Seven, Rank::Four);
        (0..1000).map(|i| if i < n { good } else { bad }).collect()
    }

    #[test]
    fn floor_enforcement() {
        let outcome = sevens_up();

        let mut pop = population(mixed_population(9), 10);
        let summary = pop.update(&outcome, &StandardEvaluator).unwrap();
        assert_eq!(summary, UpdateSummary::Retained { size: 1000, consistent: 9 });
        assert_eq!(pop.len(), 1000);

        let mut pop = population(mixed_population(10), 10);
        let summary = pop.update(&outcome, &StandardEvaluator).unwrap();
        assert_eq!(summary, UpdateSummary::Narrowed { before: 1000, after: 10 });
        assert_eq!(pop.len(), 10);
        assert!(pop.iter().all(|h| *h == RankPermutation::identity()));
    }

    #[test]
    fn below_floor_is_idempotent() {
        let outcome = sevens_up();
        let mut pop = population(mixed_population(9), 10);

        for _ in 0..2 {
            let summary = pop.update(&outcome, &StandardEvaluator).unwrap();
            assert_eq!(summary, UpdateSummary::Retained { size: 1000, consistent: 9 });
            assert_eq!(pop.len(), 1000);
        }
    }

    #[test]
    fn no_showdown_is_noop() {
        let mut pop = population(mixed_population(500), 10);

        for delta in [-100, 0, 100] {
            let outcome = outcome("7C 7D", "", "9S 9H 4C", delta);
            let summary = pop.update(&outcome, &StandardEvaluator).unwrap();
            assert_eq!(summary, UpdateSummary::NoShowdown);
            assert_eq!(pop.len(), 1000);
        }

        // Other fields are not looked at.
        let outcome = RoundOutcome::default();
        assert_eq!(
            pop.update(&outcome, &StandardEvaluator),
            Ok(UpdateSummary::NoShowdown)
        );
        assert_eq!(pop.len(), 1000);
    }

    #[test]
    fn malformed_outcome_fails() {
        let mut pop = population(mixed_population(500), 10);

        let mut no_hand = sevens_up();
        no_hand.my_hand.clear();
        assert!(matches!(
            pop.update(&no_hand, &StandardEvaluator),
            Err(TrackerError::EmptyHand(_))
        ));

        let duplicate = outcome("7C 7D", "7C 3D", "9S 9H 4C 4D KC", 50);
        assert!(matches!(
            pop.update(&duplicate, &StandardEvaluator),
            Err(TrackerError::DuplicateCard(_))
        ));
        assert_eq!(pop.len(), 1000);
    }

    #[test]
    fn monotonic_over_random_showdowns() {
        let mut rng = StdRng::seed_from_u64(11);
        let secret = PriorSampler::new(&mut rng, 0.25)
            .unwrap()
            .sample_permutation();

        let mut hypotheses = PriorSampler::new(&mut rng, 0.25)
            .unwrap()
            .sample_population(999)
            .unwrap()
            .as_slice()
            .to_vec();
        hypotheses.push(secret);
        let mut pop = population(hypotheses, 10);

        for _ in 0..200 {
            let mut deck = rankshift_cards::Deck::new_and_shuffled(&mut rng);
            let my_hand = deck.deal_many(2);
            let opponent_hand = deck.deal_many(2);
            let board = deck.deal_many(5);

            // Results follow the secret permutation.
            let eval = |hand: &[Card]| {
                let cards = hand
                    .iter()
                    .chain(&board)
                    .map(|&c| secret.apply(c))
                    .collect::<Vec<_>>();
                HandValue::eval(&cards)
            };
            let delta = match eval(&my_hand).cmp(&eval(&opponent_hand)) {
                Ordering::Greater => 20,
                Ordering::Less => -20,
                Ordering::Equal => 0,
            };

            let outcome = RoundOutcome {
                my_hand,
                opponent_hand,
                board,
                delta,
            };

            let before = pop.len();
            pop.update(&outcome, &StandardEvaluator).unwrap();
            assert!(pop.len() <= before);
            assert!(pop.len() >= pop.floor());

            // The true permutation is consistent with every real result,
            // split pots included.
            assert!(pop.contains(&secret));
        }

        assert!(pop.len() < 1000);
    }

    #[test]
    fn closure_evaluator() {
        // Any ordered strength works, here only the highest rank counts.
        let high_card = |cards: &[Card]| cards.iter().map(|c| c.rank()).max();

        let outcome = outcome("AC 2D", "KC QD", "3S 4H 5C", 10);
        let id = RankPermutation::identity();
        assert!(HypothesisPopulation::is_consistent(&id, &outcome, &high_card));

        let swap = RankPermutation::swap(Rank::King, Rank::Ace);
        assert!(!HypothesisPopulation::is_consistent(&swap, &outcome, &high_card));
    }

    #[test]
    fn marginals() {
        let id = RankPermutation::identity();
        let swap = RankPermutation::swap(Rank::King, Rank::Ace);
        let pop = population(vec![id, swap, swap], 1);

        let marginals = pop.rank_marginals();
        assert_eq!(marginals[Rank::King.index()][Rank::Ace.index()], 2);
        assert_eq!(marginals[Rank::King.index()][Rank::King.index()], 1);
        assert_eq!(marginals[Rank::Deuce.index()][Rank::Deuce.index()], 3);
        assert!(marginals.iter().all(|row| row.iter().sum::<u32>() == 3));

        let images = pop.most_likely_images();
        assert_eq!(images[Rank::King.index()], Rank::Ace);
        assert_eq!(images[Rank::Ace.index()], Rank::King);
        assert_eq!(images[Rank::Ten.index()], Rank::Ten);
    }

    #[test]
    fn empty_population_rejected() {
        assert!(HypothesisPopulation::new(vec![]).is_err());

        let pop = HypothesisPopulation::new(vec![RankPermutation::identity()]).unwrap();
        assert_eq!(pop.floor(), 10);
        assert!(pop.with_floor(0).is_err());
    }
}
