//! # bw-sim
//!
//! Monte Carlo simulation of the bulb wheel.
//!
//! ## Features
//!
//! - **Reproducible runs**: one ChaCha8 stream per simulation, seeded once
//! - **Lazy settlement stream**: `Simulator` is a single-pass iterator
//! - **Statistics**: win rate, cumulative profit, house edge, histograms
//! - **Fair vs tweaked**: side-by-side comparison with text/markdown/JSON reports
//!
//! ## Example
//!
//! ```rust,ignore
//! use bw_sim::{SimulationConfig, run};
//! use bw_wheel::{Bet, GameRound, PrizeTable};
//!
//! let config = SimulationConfig::default().with_seed(7);
//! let mut round = GameRound::fair(PrizeTable::classic(), 10_000)?;
//! round.register_bet(config.bet())?;
//! let stats = run(&mut round, &config);
//! println!("house edge {:.2}%", stats.house_edge_percent);
//! ```

pub mod compare;
pub mod config;
pub mod report;
pub mod simulator;
pub mod stats;

pub use compare::{Comparison, ComparisonSpec, compare};
pub use config::SimulationConfig;
pub use report::ComparisonReport;
pub use simulator::{Simulator, simulate};
pub use stats::{ProfitDistribution, SimulationStats, StatsAggregator, house_edge_percent};

use bw_wheel::GameRound;

/// Simulate `config.runs` spins of `round` and reduce them to statistics.
///
/// Bets must already be registered on the round; the tracked player and stake
/// come from `config`.
pub fn run(round: &mut GameRound, config: &SimulationConfig) -> SimulationStats {
    let variant = round.variant();
    let mut aggregator = StatsAggregator::new(config.player, config.stake, round.slot_count())
        .keep_series(config.keep_series);

    let runs = {
        let sim = Simulator::new(round, config.runs, config.seed);
        let runs = sim.runs();
        for settlement in sim {
            aggregator.observe(&settlement);
        }
        runs
    };

    let stats = aggregator.finish(round.bank_balance());
    log::info!(
        "{variant}: {runs} runs, seed {}, win rate {:.4}, house edge {:.2}%",
        config.seed,
        stats.win_rate,
        stats.house_edge_percent
    );
    stats
}
