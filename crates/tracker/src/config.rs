// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tracker configuration.
use serde::{Deserialize, Serialize};

use crate::{Result, TrackerError};

/// Tracker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Number of hypotheses sampled at the start of a match.
    pub population_size: usize,
    /// Success probability of the prior geometric displacement.
    pub geometric_p: f64,
    /// Minimum number of consistent hypotheses needed to shrink the population.
    pub consistency_floor: usize,
}

impl TrackerConfig {
    /// The default population size.
    pub const POPULATION_SIZE: usize = 1000;
    /// The default geometric parameter.
    pub const GEOMETRIC_P: f64 = 0.25;
    /// The default consistency floor.
    pub const CONSISTENCY_FLOOR: usize = 10;

    /// Checks the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TrackerError::InvalidConfig(
                "population size must be positive".to_string(),
            ));
        }

        check_geometric_p(self.geometric_p)?;

        if self.consistency_floor == 0 {
            return Err(TrackerError::InvalidConfig(
                "consistency floor must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            population_size: Self::POPULATION_SIZE,
            geometric_p: Self::GEOMETRIC_P,
            consistency_floor: Self::CONSISTENCY_FLOOR,
        }
    }
}

/// Checks the geometric parameter is a probability in (0, 1].
pub(crate) fn check_geometric_p(p: f64) -> Result<()> {
    if p > 0.0 && p <= 1.0 {
        Ok(())
    } else {
        Err(TrackerError::InvalidConfig(format!(
            "geometric p={p} must be 0 < p <= 1"
        )))
    }
}
