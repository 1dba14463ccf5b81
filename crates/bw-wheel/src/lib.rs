//! # bw-wheel - Bulb wheel game model
//!
//! A wheel of 12 to 24 bulbs, each carrying a prize. One spin draws a single
//! bulb from a categorical distribution and settles every active bet against it.
//!
//! ## Architecture
//!
//! ```text
//! WheelConfig
//!     │
//!     ├── PrizeTable (one denomination per slot)
//!     ├── ProbabilityModel (uniform / tiered by prize / custom)
//!     └── Bets (player, amount, slot)
//!           │
//!           v
//!     GameRound::play(rng) → Settlement
//! ```
//!
//! `WheelSession` layers a player wallet over a round for interactive play.
//! Randomness is always supplied by the caller, so the same seed replays the
//! same wheel.

pub mod bet;
pub mod config;
pub mod prize;
pub mod probability;
pub mod round;
pub mod session;

pub use bet::*;
pub use config::*;
pub use prize::*;
pub use probability::*;
pub use round::*;
pub use session::*;
