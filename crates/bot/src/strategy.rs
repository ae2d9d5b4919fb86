// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Betting strategies.
use std::fmt;

use rankshift_tracker::HypothesisPopulation;

use crate::BotError;

/// A player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Fold the hand.
    Fold,
    /// Check.
    Check,
    /// Call the current bet.
    Call,
    /// Raise.
    Raise,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerAction::Fold => "fold",
            PlayerAction::Check => "check",
            PlayerAction::Call => "call",
            PlayerAction::Raise => "raise",
        };

        write!(f, "{s}")
    }
}

/// An action request from the game engine.
#[derive(Debug, Clone, Default)]
pub struct ActionRequest {
    /// The legal actions.
    pub actions: Vec<PlayerAction>,
    /// The minimum raise amount.
    pub min_raise: u32,
    /// The maximum raise amount.
    pub max_raise: u32,
}

impl ActionRequest {
    /// Check if a fold action is in the request.
    pub fn can_fold(&self) -> bool {
        self.check_action(PlayerAction::Fold)
    }

    /// Check if a check action is in the request.
    pub fn can_check(&self) -> bool {
        self.check_action(PlayerAction::Check)
    }

    /// Check if a call action is in the request.
    pub fn can_call(&self) -> bool {
        self.check_action(PlayerAction::Call)
    }

    /// Check if a raise action is in the request.
    pub fn can_raise(&self) -> bool {
        self.check_action(PlayerAction::Raise)
    }

    fn check_action(&self, action: PlayerAction) -> bool {
        self.actions.iter().any(|a| a == &action)
    }
}

/// A Poker bot strategy.
///
/// Strategies see the plausible rank permutations so they can estimate hand
/// strength under the hidden ranks order.
pub trait Strategy {
    /// Execute an action given the legal actions, returns the action and its
    /// amount for raises.
    fn execute(
        &mut self,
        req: &ActionRequest,
        population: &HypothesisPopulation,
    ) -> Result<(PlayerAction, u32), BotError>;
}

/// Checks when it can, otherwise calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveStrategy;

impl Strategy for PassiveStrategy {
    fn execute(
        &mut self,
        req: &ActionRequest,
        _population: &HypothesisPopulation,
    ) -> Result<(PlayerAction, u32), BotError> {
        if req.can_check() {
            Ok((PlayerAction::Check, 0))
        } else if req.can_call() {
            Ok((PlayerAction::Call, 0))
        } else if req.can_fold() {
            Ok((PlayerAction::Fold, 0))
        } else {
            Err(BotError::NoPassiveAction(req.actions.clone()))
        }
    }
}
