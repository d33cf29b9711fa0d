//! Resource collaborator
//!
//! The engine never owns currency. It debits a start cost and credits
//! rewards through this trait.

use serde::{Deserialize, Serialize};

/// Bookkeeping the session needs from its host
pub trait ResourceLedger {
    /// Debit `amount` units. Returns false (and changes nothing) if short.
    fn try_spend(&mut self, amount: u32) -> bool;

    /// Credit a session payout
    fn reward_granted(&mut self, amount: u32);

    /// Units currently available for starting sessions
    fn balance(&self) -> u32;
}

/// In-memory ledger: ingredients pay for spins, magic is the reward currency
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pantry {
    pub ingredients: u32,
    pub magic: u32,
}

impl Pantry {
    pub fn new(ingredients: u32) -> Self {
        Self {
            ingredients,
            magic: 0,
        }
    }

    pub fn add_ingredients(&mut self, amount: u32) {
        self.ingredients = self.ingredients.saturating_add(amount);
    }

    pub fn add_magic(&mut self, amount: u32) {
        self.magic = self.magic.saturating_add(amount);
    }

    /// Spend magic (e.g. on upgrades). Returns false if short.
    pub fn spend_magic(&mut self, amount: u32) -> bool {
        if self.magic >= amount {
            self.magic -= amount;
            true
        } else {
            false
        }
    }
}

impl ResourceLedger for Pantry {
    fn try_spend(&mut self, amount: u32) -> bool {
        if self.ingredients >= amount {
            self.ingredients -= amount;
            log::debug!("Spent {} ingredient(s), {} left", amount, self.ingredients);
            true
        } else {
            false
        }
    }

    fn reward_granted(&mut self, amount: u32) {
        self.add_magic(amount);
    }

    fn balance(&self) -> u32 {
        self.ingredients
    }
}
