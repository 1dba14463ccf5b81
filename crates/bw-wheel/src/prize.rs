//! Prize table: one prize per wheel slot

use rand::Rng;
use serde::{Deserialize, Serialize};

use bw_core::{ConfigError, DENOMINATIONS, check_slot_count, is_denomination};

/// The standard 12-bulb layout, slot 0 at twelve o'clock
pub const CLASSIC_PRIZES: [u64; 12] = [1000, 100, 50, 100, 20, 500, 50, 200, 750, 200, 20, 500];

/// Ordered prize values, one per slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct PrizeTable {
    prizes: Vec<u64>,
}

impl PrizeTable {
    /// Validate and wrap a prize list
    pub fn new(prizes: Vec<u64>) -> Result<Self, ConfigError> {
        check_slot_count(prizes.len())?;
        if let Some((slot, &prize)) = prizes.iter().enumerate().find(|(_, p)| !is_denomination(**p)) {
            return Err(ConfigError::InvalidPrize { slot, prize });
        }
        Ok(Self { prizes })
    }

    /// The classic 12-slot table
    pub fn classic() -> Self {
        Self {
            prizes: CLASSIC_PRIZES.to_vec(),
        }
    }

    /// Draw a fresh table of `slots` prizes from the denomination set
    pub fn random<R: Rng + ?Sized>(slots: usize, rng: &mut R) -> Result<Self, ConfigError> {
        check_slot_count(slots)?;
        let prizes = (0..slots)
            .map(|_| DENOMINATIONS[rng.random_range(0..DENOMINATIONS.len())])
            .collect();
        Ok(Self { prizes })
    }

    /// Number of slots
    #[inline]
    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    /// Prize at `slot`, if it exists
    #[inline]
    pub fn get(&self, slot: usize) -> Option<u64> {
        self.prizes.get(slot).copied()
    }

    /// Prize at `slot`; the slot must be in range
    #[inline]
    pub fn prize(&self, slot: usize) -> u64 {
        self.prizes[slot]
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.prizes
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.prizes.iter().copied()
    }

    /// Largest prize on the wheel
    pub fn jackpot(&self) -> u64 {
        self.prizes.iter().copied().max().unwrap_or(0)
    }
}

impl Default for PrizeTable {
    fn default() -> Self {
        Self::classic()
    }
}

impl TryFrom<Vec<u64>> for PrizeTable {
    type Error = ConfigError;

    fn try_from(prizes: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(prizes)
    }
}

impl From<PrizeTable> for Vec<u64> {
    fn from(table: PrizeTable) -> Self {
        table.prizes
    }
}
