//! Simulation configuration

use serde::{Deserialize, Serialize};

use bw_core::{DEFAULT_STAKE, MIN_SIMULATION_RUNS, PlayerId};
use bw_wheel::Bet;

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of spins (clamped up to the minimum)
    pub runs: usize,

    /// Random seed for reproducibility
    pub seed: u64,

    /// Player whose profit is tracked
    pub player: PlayerId,

    /// Flat stake of the tracked bet
    pub stake: u64,

    /// Slot the tracked bet sits on
    pub bet_slot: usize,

    /// Record the per-round cumulative profit series
    pub keep_series: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            runs: MIN_SIMULATION_RUNS,
            seed: 42,
            player: PlayerId(1),
            stake: DEFAULT_STAKE,
            bet_slot: 0,
            keep_series: true,
        }
    }
}

impl SimulationConfig {
    /// Shortest allowed run, for CI
    pub fn quick() -> Self {
        Self {
            keep_series: false,
            ..Default::default()
        }
    }

    /// Long run for tight estimates
    pub fn exhaustive() -> Self {
        Self {
            runs: 1_000_000,
            keep_series: false,
            ..Default::default()
        }
    }

    /// Builder: set runs
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Builder: set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder: set stake
    pub fn with_stake(mut self, stake: u64) -> Self {
        self.stake = stake;
        self
    }

    /// Builder: set the backed slot
    pub fn with_bet_slot(mut self, slot: usize) -> Self {
        self.bet_slot = slot;
        self
    }

    /// Builder: set the tracked player
    pub fn with_player(mut self, player: impl Into<PlayerId>) -> Self {
        self.player = player.into();
        self
    }

    /// Builder: keep or drop the cumulative series
    pub fn with_series(mut self, keep: bool) -> Self {
        self.keep_series = keep;
        self
    }

    /// Runs after clamping to the minimum
    pub fn effective_runs(&self) -> usize {
        self.runs.max(MIN_SIMULATION_RUNS)
    }

    /// The tracked bet
    pub fn bet(&self) -> Bet {
        Bet::new(self.player, self.stake, self.bet_slot)
    }
}
