//! Determinism Checker: verifies seeded simulations replay exactly.
//!
//! Runs identical simulations several times per wheel and seed and
//! compares every settlement against the first run.
//!
//! Exit code 0 = deterministic, 1 = non-deterministic

use bw_bench::{round_with_bet, SLOT_COUNTS};
use bw_core::GameVariant;
use bw_sim::simulate;
use bw_wheel::Settlement;

const NUM_RUNS: usize = 5;
const SEEDS: [u64; 3] = [1, 42, 0xDEAD_BEEF];

fn collect(variant: GameVariant, slots: usize, seed: u64) -> (Vec<Settlement>, i64) {
    let mut round = match round_with_bet(variant, slots) {
        Ok(round) => round,
        Err(e) => {
            eprintln!("DETERMINISM_FAIL: cannot build {variant:?}/{slots}: {e}");
            std::process::exit(1);
        }
    };
    let settlements = simulate(&mut round, 10_000, seed).collect();
    (settlements, round.bank_balance())
}

fn check(variant: GameVariant, slots: usize, seed: u64) -> bool {
    let (reference, reference_bank) = collect(variant, slots, seed);

    let mut all_match = true;
    for run in 1..NUM_RUNS {
        let (result, bank) = collect(variant, slots, seed);
        if let Some(idx) = reference.iter().zip(&result).position(|(a, b)| a != b) {
            eprintln!(
                "DETERMINISM_FAIL: {variant:?}/{slots} seed {seed} run {run} differs at round {idx}"
            );
            all_match = false;
        } else if bank != reference_bank {
            eprintln!(
                "DETERMINISM_FAIL: {variant:?}/{slots} seed {seed} run {run} bank {bank} != {reference_bank}"
            );
            all_match = false;
        }
    }
    all_match
}

fn main() {
    let mut passed = 0;
    let mut failed = 0;

    for &slots in SLOT_COUNTS {
        for variant in [GameVariant::Fair, GameVariant::Tweaked] {
            for seed in SEEDS {
                if check(variant, slots, seed) {
                    passed += 1;
                } else {
                    failed += 1;
                }
            }
        }
    }

    println!("DETERMINISM: {passed} passed, {failed} failed");
    if failed > 0 {
        std::process::exit(1);
    }
}
