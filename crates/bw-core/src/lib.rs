//! bw-core: Shared types, constants and errors for the bulb wheel engine
//!
//! Every other crate in the workspace builds on the identifiers and the
//! error taxonomy defined here.

mod error;
mod ids;

pub use error::*;
pub use ids::*;

/// Smallest wheel the engine accepts
pub const MIN_SLOTS: usize = 12;

/// Largest wheel the engine accepts
pub const MAX_SLOTS: usize = 24;

/// Prize denominations a slot may carry
pub const DENOMINATIONS: [u64; 7] = [20, 50, 100, 200, 500, 750, 1000];

/// Allowed drift of a weight vector's total from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Initial house bank when none is configured
pub const DEFAULT_BANK: i64 = 10_000;

/// Flat stake used by the standard single-bet scenario
pub const DEFAULT_STAKE: u64 = 250;

/// Starting player wallet for interactive sessions
pub const DEFAULT_WALLET: u64 = 2_000;

/// Most active bets one round will hold
pub const MAX_BETS: usize = 1024;

/// Largest single stake; a full book of these still fits the bank's `i64`
pub const MAX_STAKE: u64 = i64::MAX as u64 / MAX_BETS as u64;

/// Simulations shorter than this are clamped up
pub const MIN_SIMULATION_RUNS: usize = 10_000;

/// Check a slot count against the supported wheel sizes
pub fn check_slot_count(slots: usize) -> Result<(), ConfigError> {
    if (MIN_SLOTS..=MAX_SLOTS).contains(&slots) {
        Ok(())
    } else {
        Err(ConfigError::SlotCount {
            slots,
            min: MIN_SLOTS,
            max: MAX_SLOTS,
        })
    }
}

/// Is this prize one of the allowed denominations?
#[inline]
pub fn is_denomination(prize: u64) -> bool {
    DENOMINATIONS.contains(&prize)
}
