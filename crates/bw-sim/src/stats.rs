//! Statistics over a settlement stream

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use bw_core::PlayerId;
use bw_wheel::Settlement;

/// Average house take per round as a percentage of the stake
pub fn house_edge_percent(final_bank: i64, runs: u64, stake: u64) -> f64 {
    if runs == 0 || stake == 0 {
        return 0.0;
    }
    (final_bank as f64 / runs as f64) / stake as f64 * 100.0
}

/// Loss/win counts of a flat single bet, keyed by `-stake` / `+stake`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfitDistribution {
    pub stake: u64,
    pub losses: u64,
    pub wins: u64,
}

impl ProfitDistribution {
    /// `[(-stake, losses), (+stake, wins)]`
    pub fn buckets(&self) -> [(i64, u64); 2] {
        let stake = self.stake as i64;
        [(-stake, self.losses), (stake, self.wins)]
    }

    pub fn total(&self) -> u64 {
        self.losses + self.wins
    }
}

/// Reduced statistics of one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub rounds: u64,
    pub stake: u64,
    /// Rounds in which any bet hit
    pub wins: u64,
    pub win_rate: f64,
    /// Tracked player's profit after the last round
    pub total_profit: i64,
    pub average_profit: f64,
    pub house_edge_percent: f64,
    pub final_bank: i64,
    /// Largest drop of the cumulative profit from a previous peak
    pub max_drawdown: i64,
    /// Cumulative profit after each round (empty when not kept)
    pub cumulative_profit: Vec<i64>,
    pub profit_distribution: ProfitDistribution,
    /// Tracked player's payout per round, 0 for a miss
    pub payout_histogram: BTreeMap<u64, u64>,
    /// How often each slot was drawn
    pub slot_frequency: Vec<u64>,
}

/// Streaming reducer of settlements for one tracked player and flat stake
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    player: PlayerId,
    stake: u64,
    keep_series: bool,
    rounds: u64,
    wins: u64,
    profit: i64,
    peak: i64,
    max_drawdown: i64,
    cumulative: Vec<i64>,
    distribution: ProfitDistribution,
    payouts: BTreeMap<u64, u64>,
    slot_frequency: Vec<u64>,
}

impl StatsAggregator {
    pub fn new(player: PlayerId, stake: u64, slots: usize) -> Self {
        Self {
            player,
            stake,
            keep_series: true,
            rounds: 0,
            wins: 0,
            profit: 0,
            peak: 0,
            max_drawdown: 0,
            cumulative: Vec::new(),
            distribution: ProfitDistribution {
                stake,
                ..Default::default()
            },
            payouts: BTreeMap::new(),
            slot_frequency: vec![0; slots],
        }
    }

    /// Builder: record the cumulative profit series
    pub fn keep_series(mut self, keep: bool) -> Self {
        self.keep_series = keep;
        self
    }

    /// Fold one settlement in
    pub fn observe(&mut self, settlement: &Settlement) {
        self.rounds += 1;
        if settlement.is_win() {
            self.wins += 1;
        }

        let payout = settlement.payout_for(self.player);
        match payout {
            Some(amount) => {
                self.profit = self.profit.saturating_add(amount as i64);
                self.distribution.wins += 1;
            }
            None => {
                self.profit = self.profit.saturating_sub(self.stake as i64);
                self.distribution.losses += 1;
            }
        }
        *self.payouts.entry(payout.unwrap_or(0)).or_insert(0) += 1;

        self.peak = self.peak.max(self.profit);
        self.max_drawdown = self.max_drawdown.max(self.peak.saturating_sub(self.profit));

        if let Some(count) = self.slot_frequency.get_mut(settlement.selected_slot) {
            *count += 1;
        }
        if self.keep_series {
            self.cumulative.push(self.profit);
        }
    }

    /// Fold a whole stream in
    pub fn consume<I>(&mut self, settlements: I)
    where
        I: IntoIterator<Item = Settlement>,
    {
        for settlement in settlements {
            self.observe(&settlement);
        }
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Running profit of the tracked player
    pub fn profit(&self) -> i64 {
        self.profit
    }

    /// Close the reduction with the round's final bank balance
    pub fn finish(self, final_bank: i64) -> SimulationStats {
        let (win_rate, average_profit) = if self.rounds > 0 {
            (
                self.wins as f64 / self.rounds as f64,
                self.profit as f64 / self.rounds as f64,
            )
        } else {
            (0.0, 0.0)
        };

        SimulationStats {
            rounds: self.rounds,
            stake: self.stake,
            wins: self.wins,
            win_rate,
            total_profit: self.profit,
            average_profit,
            house_edge_percent: house_edge_percent(final_bank, self.rounds, self.stake),
            final_bank,
            max_drawdown: self.max_drawdown,
            cumulative_profit: self.cumulative,
            profit_distribution: self.distribution,
            payout_histogram: self.payouts,
            slot_frequency: self.slot_frequency,
        }
    }
}
