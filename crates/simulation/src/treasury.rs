use std::fmt;

use serde::{Deserialize, Serialize};

/// Returned when a debit exceeds the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientFunds {
    pub cost: u64,
    pub available: u64,
}

impl fmt::Display for InsufficientFunds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Not enough funds: cost {} but only {} available",
            self.cost, self.available
        )
    }
}

impl std::error::Error for InsufficientFunds {}

/// The city's fund balance. Never negative; only placement debits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    balance: u64,
}

impl Treasury {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    #[inline]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    #[inline]
    pub fn can_afford(&self, cost: u64) -> bool {
        self.balance >= cost
    }

    /// Remove `cost` from the balance, returning the new balance.
    /// The balance is untouched on failure.
    pub fn debit(&mut self, cost: u64) -> Result<u64, InsufficientFunds> {
        match self.balance.checked_sub(cost) {
            Some(remaining) => {
                self.balance = remaining;
                Ok(remaining)
            }
            None => Err(InsufficientFunds {
                cost,
                available: self.balance,
            }),
        }
    }
}

impl Default for Treasury {
    fn default() -> Self {
        Self::new(crate::config::STARTING_FUNDS)
    }
}
