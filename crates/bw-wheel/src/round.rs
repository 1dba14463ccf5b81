//! Game round: one wheel, one bank, and the bets settled against each spin

use std::collections::BTreeMap;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use bw_core::{BetError, ConfigError, DEFAULT_BANK, GameVariant, MAX_BETS, MAX_STAKE, PlayerId};

use crate::bet::{Bet, BetBook};
use crate::prize::PrizeTable;
use crate::probability::ProbabilityModel;

/// Outcome of one spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Slot the wheel stopped on
    pub selected_slot: usize,
    /// Prize carried by that slot
    pub prize: u64,
    /// Winning players and what each is paid; empty when nobody hit
    pub payouts: BTreeMap<PlayerId, u64>,
    /// Stakes collected by the house this spin
    pub wagered: u64,
    /// Prizes paid by the house this spin
    pub paid_out: u64,
}

impl Settlement {
    /// Did any bet hit?
    #[inline]
    pub fn is_win(&self) -> bool {
        !self.payouts.is_empty()
    }

    /// Payout owed to `player`, if they hit
    #[inline]
    pub fn payout_for(&self, player: PlayerId) -> Option<u64> {
        self.payouts.get(&player).copied()
    }

    /// Change to the house bank caused by this spin
    #[inline]
    pub fn bank_delta(&self) -> i64 {
        self.wagered as i64 - self.paid_out as i64
    }
}

/// A configured wheel that can be spun repeatedly.
///
/// Fair and tweaked rounds differ only in the probability model they were
/// built with; settlement is identical.
#[derive(Debug, Clone)]
pub struct GameRound {
    variant: GameVariant,
    prizes: PrizeTable,
    model: ProbabilityModel,
    sampler: WeightedIndex<f64>,
    bank: i64,
    bets: BetBook,
    selected: usize,
}

impl GameRound {
    /// Build a round after validating the model against the prize table
    pub fn new(
        variant: GameVariant,
        prizes: PrizeTable,
        model: ProbabilityModel,
        initial_bank: i64,
    ) -> Result<Self, ConfigError> {
        if initial_bank < 0 {
            return Err(ConfigError::NegativeBank { bank: initial_bank });
        }
        model.validate(prizes.len())?;
        let sampler = model.sampler()?;
        log::debug!(
            "{variant} round: {} slots, bank {initial_bank}",
            prizes.len()
        );

        Ok(Self {
            variant,
            prizes,
            model,
            sampler,
            bank: initial_bank,
            bets: BetBook::new(),
            selected: 0,
        })
    }

    /// Uniform wheel
    pub fn fair(prizes: PrizeTable, initial_bank: i64) -> Result<Self, ConfigError> {
        let model = ProbabilityModel::uniform(prizes.len());
        Self::new(GameVariant::Fair, prizes, model, initial_bank)
    }

    /// Wheel with caller-shaped weights
    pub fn tweaked(
        prizes: PrizeTable,
        model: ProbabilityModel,
        initial_bank: i64,
    ) -> Result<Self, ConfigError> {
        Self::new(GameVariant::Tweaked, prizes, model, initial_bank)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // BETTING
    // ═══════════════════════════════════════════════════════════════════════

    /// Register a bet; replaces the player's earlier bet on the same slot.
    /// The bank is untouched until `play`.
    ///
    /// Stakes are capped at `MAX_STAKE` and the book at `MAX_BETS`, so the
    /// total wagered always fits the bank.
    pub fn register_bet(&mut self, bet: Bet) -> Result<(), BetError> {
        let slots = self.prizes.len();
        if bet.slot >= slots {
            return Err(BetError::SlotOutOfRange {
                slot: bet.slot,
                slots,
            });
        }
        if bet.amount == 0 {
            return Err(BetError::ZeroAmount);
        }
        if bet.amount > MAX_STAKE {
            return Err(BetError::StakeTooLarge {
                amount: bet.amount,
                max: MAX_STAKE,
            });
        }
        let replaces = self.bets.for_player(bet.player).any(|b| b.slot == bet.slot);
        if !replaces && self.bets.len() >= MAX_BETS {
            return Err(BetError::TooManyBets { max: MAX_BETS });
        }
        self.bets.place(bet);
        Ok(())
    }

    /// Drop every active bet
    pub fn clear_bets(&mut self) {
        self.bets.clear();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN
    // ═══════════════════════════════════════════════════════════════════════

    /// Spin once and settle every active bet.
    ///
    /// The house collects all stakes, then pays the selected slot's prize to
    /// each winning bet. Bets stay registered for the next spin.
    pub fn play<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Settlement {
        let selected = self.sampler.sample(rng);
        self.selected = selected;

        let prize = self.prizes.prize(selected);
        let wagered = self.bets.total_wagered();
        let payouts: BTreeMap<PlayerId, u64> =
            self.bets.on_slot(selected).map(|b| (b.player, prize)).collect();
        let paid_out = prize.saturating_mul(payouts.len() as u64);

        self.bank = self
            .bank
            .saturating_add(wagered as i64)
            .saturating_sub(paid_out as i64);

        Settlement {
            selected_slot: selected,
            prize,
            payouts,
            wagered,
            paid_out,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn slot_count(&self) -> usize {
        self.prizes.len()
    }

    pub fn prizes(&self) -> &PrizeTable {
        &self.prizes
    }

    pub fn model(&self) -> &ProbabilityModel {
        &self.model
    }

    pub fn bets(&self) -> &BetBook {
        &self.bets
    }

    /// Current house bank
    pub fn bank_balance(&self) -> i64 {
        self.bank
    }

    /// Slot drawn by the last spin (0 before the first)
    pub fn selected_slot(&self) -> usize {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn classic_fair() -> GameRound {
        GameRound::fair(PrizeTable::classic(), DEFAULT_BANK).unwrap()
    }

    fn classic_with_bet() -> GameRound {
        let mut round = GameRound::fair(PrizeTable::classic(), 10_000).unwrap();
        round.register_bet(Bet::new(1, 250, 0)).unwrap();
        round
    }

    #[test]
    fn test_fresh_round() {
        let round = classic_fair();
        assert_eq!(round.variant(), GameVariant::Fair);
        assert_eq!(round.slot_count(), 12);
        assert_eq!(round.bank_balance(), DEFAULT_BANK);
        assert_eq!(round.selected_slot(), 0);
        assert!(round.bets().is_empty());
    }

    #[test]
    fn test_rejects_mismatched_model() {
        let result = GameRound::tweaked(PrizeTable::classic(), ProbabilityModel::uniform(13), 0);
        assert!(matches!(result, Err(ConfigError::WeightCount { .. })));
    }

    #[test]
    fn test_rejects_negative_bank() {
        assert_eq!(
            GameRound::fair(PrizeTable::classic(), -5).unwrap_err(),
            ConfigError::NegativeBank { bank: -5 }
        );
        assert!(GameRound::fair(PrizeTable::classic(), 0).is_ok());
    }

    #[test]
    fn test_stake_limit() {
        let mut round = classic_fair();
        assert_eq!(
            round.register_bet(Bet::new(1, MAX_STAKE + 1, 0)),
            Err(BetError::StakeTooLarge {
                amount: MAX_STAKE + 1,
                max: MAX_STAKE
            })
        );
        assert_eq!(
            round.register_bet(Bet::new(1, u64::MAX / 2 + 10, 0)),
            Err(BetError::StakeTooLarge {
                amount: u64::MAX / 2 + 10,
                max: MAX_STAKE
            })
        );
        assert!(round.bets().is_empty());
    }

    #[test]
    fn test_largest_stake_credits_bank() {
        let mut weights = vec![0.0; 12];
        weights[4] = 1.0;
        let model = ProbabilityModel::from_weights(weights).unwrap();
        let mut round = GameRound::tweaked(PrizeTable::classic(), model, 10_000).unwrap();
        round.register_bet(Bet::new(1, MAX_STAKE, 0)).unwrap();

        let before = round.bank_balance();
        let settlement = round.play(&mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(settlement.wagered, MAX_STAKE);
        assert_eq!(settlement.bank_delta(), MAX_STAKE as i64);
        assert_eq!(round.bank_balance() - before, settlement.bank_delta());
        assert!(round.bank_balance() > before);
    }

    #[test]
    fn test_book_limit() {
        let mut round = classic_fair();
        for player in 0..MAX_BETS as u32 {
            round.register_bet(Bet::new(player, MAX_STAKE, 0)).unwrap();
        }
        assert_eq!(
            round.register_bet(Bet::new(MAX_BETS as u32, 1, 0)),
            Err(BetError::TooManyBets { max: MAX_BETS })
        );
        // Replacing an existing bet does not grow the book
        assert!(round.register_bet(Bet::new(0, 1, 0)).is_ok());
        assert_eq!(round.bets().len(), MAX_BETS);

        // A full book of the largest stakes still fits the bank
        let before = round.bank_balance();
        let settlement = round.play(&mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(round.bank_balance() - before, settlement.bank_delta());
    }

    #[test]
    fn test_bet_slot_range() {
        let mut round = classic_fair();
        assert_eq!(
            round.register_bet(Bet::new(1, 250, 12)),
            Err(BetError::SlotOutOfRange { slot: 12, slots: 12 })
        );
        assert_eq!(round.register_bet(Bet::new(1, 0, 3)), Err(BetError::ZeroAmount));
        assert!(round.register_bet(Bet::new(1, 250, 11)).is_ok());
    }

    #[test]
    fn test_register_leaves_bank() {
        let round = classic_with_bet();
        assert_eq!(round.bank_balance(), 10_000);
        assert_eq!(round.bets().len(), 1);
    }

    #[test]
    fn test_classic_settlement() {
        let mut round = classic_with_bet();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut saw_win = false;
        let mut saw_loss = false;

        for _ in 0..500 {
            let before = round.bank_balance();
            let settlement = round.play(&mut rng);
            let delta = round.bank_balance() - before;
            assert_eq!(round.selected_slot(), settlement.selected_slot);

            if settlement.selected_slot == 0 {
                saw_win = true;
                assert_eq!(settlement.payouts, BTreeMap::from([(PlayerId(1), 1000)]));
                assert_eq!(delta, -750);
            } else {
                saw_loss = true;
                assert!(settlement.payouts.is_empty());
                assert_eq!(delta, 250);
            }
        }
        assert!(saw_win && saw_loss);
    }

    #[test]
    fn test_no_bets_is_legal() {
        let mut round = classic_fair();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let settlement = round.play(&mut rng);
        assert!(!settlement.is_win());
        assert_eq!(settlement.wagered, 0);
        assert_eq!(settlement.paid_out, 0);
        assert_eq!(round.bank_balance(), DEFAULT_BANK);
    }

    #[test]
    fn test_house_collects_every_stake() {
        let mut round = classic_fair();
        for slot in 0..12 {
            round.register_bet(Bet::new(slot as u32, 100, slot)).unwrap();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let settlement = round.play(&mut rng);
        assert_eq!(settlement.wagered, 1200);
        assert_eq!(settlement.payouts.len(), 1);
        assert_eq!(settlement.paid_out, settlement.prize);
        assert_eq!(round.bank_balance(), DEFAULT_BANK + 1200 - settlement.prize as i64);
    }

    #[test]
    fn test_shared_winners_each_paid() {
        let mut model = vec![0.0; 12];
        model[5] = 1.0;
        let model = ProbabilityModel::from_weights(model).unwrap();
        let mut round = GameRound::tweaked(PrizeTable::classic(), model, 0).unwrap();
        round.register_bet(Bet::new(1, 100, 5)).unwrap();
        round.register_bet(Bet::new(2, 100, 5)).unwrap();
        round.register_bet(Bet::new(3, 100, 6)).unwrap();

        let settlement = round.play(&mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(settlement.selected_slot, 5);
        assert_eq!(settlement.payout_for(PlayerId(1)), Some(500));
        assert_eq!(settlement.payout_for(PlayerId(2)), Some(500));
        assert_eq!(settlement.payout_for(PlayerId(3)), None);
        assert_eq!(settlement.bank_delta(), 300 - 1000);
        assert_eq!(round.bank_balance(), -700);
    }

    #[test]
    fn test_bank_delta_invariant() {
        let prizes = PrizeTable::classic();
        let model = ProbabilityModel::tiered_by_prize(&prizes);
        let mut round = GameRound::tweaked(prizes, model, 10_000).unwrap();
        round.register_bet(Bet::new(1, 250, 0)).unwrap();
        round.register_bet(Bet::new(2, 40, 4)).unwrap();
        round.register_bet(Bet::new(2, 60, 10)).unwrap();
        round.register_bet(Bet::new(3, 500, 4)).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..12_000 {
            let before = round.bank_balance();
            let settlement = round.play(&mut rng);
            assert_eq!(round.bank_balance() - before, settlement.bank_delta());
            assert_eq!(settlement.wagered, 850);
        }
    }
}
