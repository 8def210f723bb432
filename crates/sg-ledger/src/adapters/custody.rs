//! # Token Custody
//!
//! In-memory balances implementing [`TokenTransfer`], used where no real
//! token ledger is attached.

use crate::domain::value_objects::Address;
use crate::errors::TransferError;
use crate::ports::outbound::TokenTransfer;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Per-(currency, holder) balances.
#[derive(Debug, Default)]
pub struct InMemoryTokenCustody {
    balances: RwLock<HashMap<(Address, Address), u128>>,
}

impl InMemoryTokenCustody {
    /// Creates empty custody.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `currency` to `holder`.
    pub fn mint(&self, currency: Address, holder: Address, amount: u128) {
        let mut balances = self.balances.write();
        let balance = balances.entry((currency, holder)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Balance of `holder` in `currency`.
    #[must_use]
    pub fn balance_of(&self, currency: Address, holder: Address) -> u128 {
        self.balances
            .read()
            .get(&(currency, holder))
            .copied()
            .unwrap_or(0)
    }
}

impl TokenTransfer for InMemoryTokenCustody {
    fn transfer_from(
        &self,
        currency: Address,
        payer: Address,
        custody: Address,
        amount: u128,
    ) -> Result<(), TransferError> {
        let mut balances = self.balances.write();
        let available = balances.get(&(currency, payer)).copied().unwrap_or(0);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        balances.insert((currency, payer), available - amount);
        let credited = balances.entry((currency, custody)).or_insert(0);
        *credited = credited
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("custody balance overflow".into()))?;
        Ok(())
    }
}
