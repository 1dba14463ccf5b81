//! Interactive session: a player wallet spinning against one round

use rand::Rng;
use serde::{Deserialize, Serialize};

use bw_core::{BetError, BwResult, ConfigError, DEFAULT_STAKE, DEFAULT_WALLET, MAX_STAKE, PlayerId};

use crate::bet::Bet;
use crate::round::GameRound;

/// What one interactive spin did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Slot the player backed
    pub bet_slot: usize,
    /// Slot the wheel stopped on
    pub selected_slot: usize,
    pub stake: u64,
    /// Prize credited to the wallet, if the bet hit
    pub prize: Option<u64>,
    /// Wallet after the spin
    pub wallet: u64,
    /// House bank after the spin
    pub bank: i64,
    /// The hit landed on the wheel's largest prize
    pub jackpot: bool,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.prize.is_some()
    }
}

/// Player wallet plus the round it plays against
#[derive(Debug, Clone)]
pub struct WheelSession {
    round: GameRound,
    player: PlayerId,
    wallet: u64,
    stake: u64,
}

impl WheelSession {
    pub fn new(round: GameRound) -> Self {
        Self {
            round,
            player: PlayerId(1),
            wallet: DEFAULT_WALLET,
            stake: DEFAULT_STAKE,
        }
    }

    /// Builder: starting wallet
    pub fn with_wallet(mut self, wallet: u64) -> Self {
        self.wallet = wallet;
        self
    }

    /// Builder: player identity
    pub fn with_player(mut self, player: impl Into<PlayerId>) -> Self {
        self.player = player.into();
        self
    }

    /// Change the stake for subsequent spins
    pub fn set_stake(&mut self, stake: u64) -> Result<(), BetError> {
        if stake == 0 {
            return Err(BetError::ZeroAmount);
        }
        if stake > MAX_STAKE {
            return Err(BetError::StakeTooLarge {
                amount: stake,
                max: MAX_STAKE,
            });
        }
        self.stake = stake;
        Ok(())
    }

    /// Pay the stake, spin once on a fresh bet, and collect any prize
    pub fn spin<R: Rng + ?Sized>(&mut self, slot: usize, rng: &mut R) -> BwResult<SpinOutcome> {
        if self.wallet < self.stake {
            return Err(ConfigError::InsufficientBalance {
                balance: self.wallet,
                required: self.stake,
            }
            .into());
        }

        self.round.clear_bets();
        self.round.register_bet(Bet::new(self.player, self.stake, slot))?;
        self.wallet -= self.stake;

        let settlement = self.round.play(rng);
        let prize = settlement.payout_for(self.player);
        if let Some(amount) = prize {
            self.wallet = self.wallet.saturating_add(amount);
        }

        log::debug!(
            "{} spun slot {} (bet on {slot}), prize {:?}, wallet {}",
            self.player,
            settlement.selected_slot,
            prize,
            self.wallet
        );

        Ok(SpinOutcome {
            bet_slot: slot,
            selected_slot: settlement.selected_slot,
            stake: self.stake,
            prize,
            wallet: self.wallet,
            bank: self.round.bank_balance(),
            jackpot: prize.is_some_and(|p| p == self.round.prizes().jackpot()),
        })
    }

    pub fn wallet(&self) -> u64 {
        self.wallet
    }

    pub fn stake(&self) -> u64 {
        self.stake
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn bank(&self) -> i64 {
        self.round.bank_balance()
    }

    pub fn round(&self) -> &GameRound {
        &self.round
    }

    pub fn into_round(self) -> GameRound {
        self.round
    }
}
