//! Fair vs tweaked comparison under one prize table, bet and seed

use serde::{Deserialize, Serialize};

use bw_core::{BwResult, DEFAULT_BANK};
use bw_wheel::{GameRound, PrizeTable, ProbabilityModel, WeightScheme};

use crate::config::SimulationConfig;
use crate::run;
use crate::stats::SimulationStats;

/// What to compare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSpec {
    pub prizes: PrizeTable,
    /// Weights of the tweaked wheel
    pub tweaked_weights: WeightScheme,
    pub initial_bank: i64,
    pub simulation: SimulationConfig,
}

impl Default for ComparisonSpec {
    fn default() -> Self {
        Self {
            prizes: PrizeTable::classic(),
            tweaked_weights: WeightScheme::TieredByPrize,
            initial_bank: DEFAULT_BANK,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ComparisonSpec {
    pub fn new(prizes: PrizeTable, simulation: SimulationConfig) -> Self {
        Self {
            prizes,
            simulation,
            ..Default::default()
        }
    }

    /// Builder: tweaked weight scheme
    pub fn with_tweaked_weights(mut self, weights: WeightScheme) -> Self {
        self.tweaked_weights = weights;
        self
    }

    /// Builder: initial bank of both wheels
    pub fn with_bank(mut self, bank: i64) -> Self {
        self.initial_bank = bank;
        self
    }
}

/// Both sides of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub prizes: Vec<u64>,
    pub fair_weights: Vec<f64>,
    pub tweaked_weights: Vec<f64>,
    pub simulation: SimulationConfig,
    pub fair: SimulationStats,
    pub tweaked: SimulationStats,
}

impl Comparison {
    /// Theoretical hit probability of the tracked bet on each wheel
    pub fn expected_win_rates(&self) -> (f64, f64) {
        let slot = self.simulation.bet_slot;
        (
            self.fair_weights.get(slot).copied().unwrap_or(0.0),
            self.tweaked_weights.get(slot).copied().unwrap_or(0.0),
        )
    }

    /// Tweaked house edge minus fair house edge, in percentage points
    pub fn edge_gap(&self) -> f64 {
        self.tweaked.house_edge_percent - self.fair.house_edge_percent
    }
}

/// Build both wheels, place the tracked bet on each and simulate them in parallel
pub fn compare(spec: &ComparisonSpec) -> BwResult<Comparison> {
    let tweaked_model = spec.tweaked_weights.resolve(&spec.prizes)?;
    let fair_model = ProbabilityModel::uniform(spec.prizes.len());

    let mut fair = GameRound::fair(spec.prizes.clone(), spec.initial_bank)?;
    let mut tweaked = GameRound::tweaked(spec.prizes.clone(), tweaked_model.clone(), spec.initial_bank)?;

    let bet = spec.simulation.bet();
    fair.register_bet(bet)?;
    tweaked.register_bet(bet)?;

    let config = &spec.simulation;
    let (fair_stats, tweaked_stats) =
        rayon::join(|| run(&mut fair, config), || run(&mut tweaked, config));

    Ok(Comparison {
        prizes: spec.prizes.as_slice().to_vec(),
        fair_weights: fair_model.weights().to_vec(),
        tweaked_weights: tweaked_model.weights().to_vec(),
        simulation: spec.simulation.clone(),
        fair: fair_stats,
        tweaked: tweaked_stats,
    })
}
