//! Seeded simulation stream

use std::iter::FusedIterator;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bw_core::MIN_SIMULATION_RUNS;
use bw_wheel::{GameRound, Settlement};

/// Single-pass stream of settlements from repeated spins of one round.
///
/// The random source is seeded once, at construction. To replay a run,
/// build a new simulator with the same seed over an identically configured
/// round.
pub struct Simulator<'a> {
    round: &'a mut GameRound,
    rng: ChaCha8Rng,
    seed: u64,
    runs: usize,
    remaining: usize,
}

impl<'a> Simulator<'a> {
    /// Create a simulator; `runs` below the minimum is clamped up
    pub fn new(round: &'a mut GameRound, runs: usize, seed: u64) -> Self {
        let clamped = runs.max(MIN_SIMULATION_RUNS);
        if clamped != runs {
            log::warn!("Requested {runs} runs, clamped to {MIN_SIMULATION_RUNS}");
        }

        Self {
            round,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            runs: clamped,
            remaining: clamped,
        }
    }

    /// Total spins this simulator will produce
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The round being driven
    pub fn round(&self) -> &GameRound {
        &*self.round
    }
}

impl Iterator for Simulator<'_> {
    type Item = Settlement;

    fn next(&mut self) -> Option<Settlement> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.round.play(&mut self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Simulator<'_> {}

impl FusedIterator for Simulator<'_> {}

/// Stream `runs` settlements of `round` under `seed`
pub fn simulate(round: &mut GameRound, runs: usize, seed: u64) -> Simulator<'_> {
    Simulator::new(round, runs, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bw_wheel::{Bet, PrizeTable};

    fn round() -> GameRound {
        let mut round = GameRound::fair(PrizeTable::classic(), 10_000).unwrap();
        round.register_bet(Bet::new(1, 250, 0)).unwrap();
        round
    }

    #[test]
    fn test_clamps_to_minimum() {
        let mut round = round();
        let sim = simulate(&mut round, 10, 42);
        assert_eq!(sim.runs(), MIN_SIMULATION_RUNS);
        assert_eq!(sim.len(), MIN_SIMULATION_RUNS);
        assert_eq!(sim.count(), MIN_SIMULATION_RUNS);
    }

    #[test]
    fn test_keeps_larger_counts() {
        let mut round = round();
        let sim = simulate(&mut round, 12_345, 42);
        assert_eq!(sim.seed(), 42);
        assert_eq!(sim.count(), 12_345);
    }

    #[test]
    fn test_single_pass() {
        let mut round = round();
        let mut sim = simulate(&mut round, 0, 3);
        for _ in 0..MIN_SIMULATION_RUNS {
            assert!(sim.next().is_some());
        }
        assert!(sim.next().is_none());
        assert!(sim.next().is_none());
    }

    #[test]
    fn test_bets_stay_fixed() {
        let mut round = round();
        let sim = simulate(&mut round, 0, 11);
        assert!(sim.round().bets().len() == 1);
        for settlement in sim {
            assert_eq!(settlement.wagered, 250);
        }
        assert_eq!(round.bets().len(), 1);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = round();
        let mut b = round();
        let first: Vec<_> = simulate(&mut a, 10_000, 42).collect();
        let second: Vec<_> = simulate(&mut b, 10_000, 42).collect();
        assert_eq!(first, second);
        assert_eq!(a.bank_balance(), b.bank_balance());

        let mut c = round();
        let other: Vec<usize> = simulate(&mut c, 10_000, 43)
            .map(|s| s.selected_slot)
            .collect();
        let slots: Vec<usize> = first.iter().map(|s| s.selected_slot).collect();
        assert_ne!(slots, other);
    }
}
