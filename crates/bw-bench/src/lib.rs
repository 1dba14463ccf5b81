//! # bw-bench
//!
//! Performance benchmarks for the bulb wheel engine.
//!
//! ## Benchmark Categories
//!
//! - **Spin**: a single `play()` on fair and tweaked wheels
//! - **Simulation**: full seeded runs reduced to statistics
//! - **Weights**: model construction and single-weight redistribution
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench -p bw-bench
//! cargo bench -p bw-bench -- simulate
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bw_core::{BwResult, ConfigError, DEFAULT_BANK, GameVariant};
use bw_wheel::{Bet, GameRound, PrizeTable, ProbabilityModel};

/// Wheel sizes benchmarked
pub const SLOT_COUNTS: &[usize] = &[12, 18, 24];

/// Seeded prize table; the classic one for 12 slots
pub fn prize_table(slots: usize, seed: u64) -> Result<PrizeTable, ConfigError> {
    if slots == 12 {
        return Ok(PrizeTable::classic());
    }
    PrizeTable::random(slots, &mut ChaCha8Rng::seed_from_u64(seed))
}

/// Round with one 250 stake on slot 0
pub fn round_with_bet(variant: GameVariant, slots: usize) -> BwResult<GameRound> {
    let prizes = prize_table(slots, 42)?;
    let mut round = match variant {
        GameVariant::Fair => GameRound::fair(prizes, DEFAULT_BANK)?,
        GameVariant::Tweaked => {
            let model = ProbabilityModel::tiered_by_prize(&prizes);
            GameRound::tweaked(prizes, model, DEFAULT_BANK)?
        }
    };
    round.register_bet(Bet::new(1, 250, 0))?;
    Ok(round)
}
