//! Probability model: per-slot selection weights

use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use bw_core::{ConfigError, RedistributionError, WEIGHT_TOLERANCE};

use crate::prize::PrizeTable;

/// Tier weight before normalisation: the lower the prize, the heavier the bulb
pub fn tier_weight(prize: u64) -> f64 {
    if prize == 20 {
        0.25
    } else if prize < 200 {
        0.15
    } else if prize < 500 {
        0.08
    } else {
        0.04
    }
}

/// Per-slot selection weights summing to 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityModel {
    weights: Vec<f64>,
}

impl ProbabilityModel {
    /// Every slot equally likely
    pub fn uniform(slots: usize) -> Self {
        Self {
            weights: vec![1.0 / slots as f64; slots],
        }
    }

    /// Weight each slot by its prize tier, then normalise
    pub fn tiered_by_prize(prizes: &PrizeTable) -> Self {
        let raw: Vec<f64> = prizes.iter().map(tier_weight).collect();
        let total: f64 = raw.iter().sum();
        Self {
            weights: raw.into_iter().map(|w| w / total).collect(),
        }
    }

    /// Wrap caller-supplied weights; rejects anything that is not already a distribution
    pub fn from_weights(weights: Vec<f64>) -> Result<Self, ConfigError> {
        let model = Self { weights };
        model.check_distribution()?;
        Ok(model)
    }

    /// Full check against a wheel of `slots` bulbs
    pub fn validate(&self, slots: usize) -> Result<(), ConfigError> {
        if self.weights.len() != slots {
            return Err(ConfigError::WeightCount {
                expected: slots,
                actual: self.weights.len(),
            });
        }
        self.check_distribution()
    }

    fn check_distribution(&self) -> Result<(), ConfigError> {
        if let Some((slot, &value)) = self
            .weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(ConfigError::InvalidWeight { slot, value });
        }
        let sum = self.total();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(())
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Probability of drawing `slot` (0 for unknown slots)
    #[inline]
    pub fn weight(&self, slot: usize) -> f64 {
        self.weights.get(slot).copied().unwrap_or(0.0)
    }

    /// Expected prize handed out per winning bet on `slot`, per spin
    pub fn expected_payout(&self, prizes: &PrizeTable, slot: usize) -> f64 {
        self.weight(slot) * prizes.get(slot).unwrap_or(0) as f64
    }

    /// Set one weight by hand and rescale the others so the total stays 1.
    ///
    /// The other weights are multiplied by `(1 - value) / S`, where `S` is
    /// their sum before the edit; rounding residue lands on the edited slot.
    /// On error the model is left untouched.
    pub fn redistribute(&mut self, slot: usize, value: f64) -> Result<(), RedistributionError> {
        let slots = self.weights.len();
        if slot >= slots {
            return Err(RedistributionError::NoSuchSlot { slot, slots });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(RedistributionError::OutOfRange { slot, value });
        }

        let others: f64 = self
            .weights
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != slot)
            .map(|(_, w)| w)
            .sum();
        if others <= 0.0 {
            log::warn!("Rejected weight edit on slot {slot}: remaining weights are all zero");
            return Err(RedistributionError::ZeroRemainder { slot });
        }

        let k = (1.0 - value) / others;
        if !k.is_finite() {
            log::warn!("Rejected weight edit on slot {slot}: rescale factor {k} is not finite");
            return Err(RedistributionError::NonFinite { slot });
        }

        let mut next: Vec<f64> = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, &w)| if i == slot { value } else { w * k })
            .collect();
        let total: f64 = next.iter().sum();
        if total != 1.0 {
            next[slot] = (next[slot] + (1.0 - total)).max(0.0);
        }

        let candidate = Self { weights: next };
        if candidate.check_distribution().is_err() {
            log::warn!("Rejected weight edit on slot {slot}: rescaled weights are not a distribution");
            return Err(RedistributionError::NonFinite { slot });
        }
        *self = candidate;
        Ok(())
    }

    /// Reset to a uniform model when the wheel changes size
    pub fn resize(&mut self, slots: usize) {
        if self.weights.len() != slots {
            log::debug!("Resetting {} weights to uniform over {slots} slots", self.weights.len());
            *self = Self::uniform(slots);
        }
    }

    /// Categorical sampler over slot indices
    pub fn sampler(&self) -> Result<WeightedIndex<f64>, ConfigError> {
        WeightedIndex::new(&self.weights).map_err(|_| ConfigError::WeightSum { sum: self.total() })
    }
}
