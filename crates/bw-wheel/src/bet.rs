//! Bets and the active bet book

use serde::{Deserialize, Serialize};

use bw_core::PlayerId;

/// A stake placed by one player on one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub player: PlayerId,
    pub amount: u64,
    pub slot: usize,
}

impl Bet {
    pub fn new(player: impl Into<PlayerId>, amount: u64, slot: usize) -> Self {
        Self {
            player: player.into(),
            amount,
            slot,
        }
    }
}

/// Active bets, unique per (player, slot)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetBook {
    bets: Vec<Bet>,
}

impl BetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bet, replacing the same player's earlier bet on the same slot.
    /// Returns the replaced bet.
    pub fn place(&mut self, bet: Bet) -> Option<Bet> {
        let replaced = self
            .bets
            .iter()
            .position(|b| b.player == bet.player && b.slot == bet.slot)
            .map(|i| self.bets.remove(i));
        self.bets.push(bet);
        replaced
    }

    /// Sum of every active stake
    pub fn total_wagered(&self) -> u64 {
        self.bets.iter().map(|b| b.amount).sum()
    }

    /// Bets on `slot`
    pub fn on_slot(&self, slot: usize) -> impl Iterator<Item = &Bet> + '_ {
        self.bets.iter().filter(move |b| b.slot == slot)
    }

    /// Bets held by `player`
    pub fn for_player(&self, player: PlayerId) -> impl Iterator<Item = &Bet> + '_ {
        self.bets.iter().filter(move |b| b.player == player)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bet> + '_ {
        self.bets.iter()
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    pub fn clear(&mut self) {
        self.bets.clear();
    }
}
