//! The address-to-balance map and its conservation invariant.
//!
//! The ledger is the single source of truth for claimable funds. Balances
//! are integer amounts in the smallest indivisible unit and never negative.
//!
//! # Invariants
//!
//! - The sum of all balances equals the total ever credited minus the total
//!   ever drained; no ledger operation creates or destroys value.
//! - A failed credit leaves every balance untouched.

use crate::address::Address;
use crate::error::{Result, SplitterError};
use std::collections::HashMap;

/// Per-account claimable balances.
///
/// Any address is a valid account with an implicit zero balance; an entry is
/// materialized on first credit and kept (at zero) after a drain, so reports
/// can enumerate every account the ledger has ever touched.
#[derive(Debug, Default)]
pub struct Ledger {
    balances: HashMap<Address, u128>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Returns the balance of an account. Never fails; unknown accounts
    /// hold zero.
    pub fn balance_of(&self, account: Address) -> u128 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Adds to an account's stored balance and returns the new balance.
    ///
    /// Fails only if the balance would overflow, in which case nothing is
    /// written.
    pub fn credit(&mut self, account: Address, amount: u128) -> Result<u128> {
        let new_balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(SplitterError::BalanceOverflow(account))?;
        self.balances.insert(account, new_balance);
        Ok(new_balance)
    }

    /// Credits two distinct accounts as one step: both credits are applied,
    /// or neither is.
    ///
    /// Callers guarantee `first != second`; with equal accounts the second
    /// write would clobber the first.
    pub fn credit_pair(
        &mut self,
        first: Address,
        first_amount: u128,
        second: Address,
        second_amount: u128,
    ) -> Result<()> {
        debug_assert_ne!(first, second);
        let first_new = self
            .balance_of(first)
            .checked_add(first_amount)
            .ok_or(SplitterError::BalanceOverflow(first))?;
        let second_new = self
            .balance_of(second)
            .checked_add(second_amount)
            .ok_or(SplitterError::BalanceOverflow(second))?;
        self.balances.insert(first, first_new);
        self.balances.insert(second, second_new);
        Ok(())
    }

    /// Returns the current balance and resets it to zero in the same step.
    ///
    /// There is no observable point at which the old balance has been read
    /// but not yet zeroed. Draining an account with no balance returns zero;
    /// callers decide whether that is an error.
    pub fn drain(&mut self, account: Address) -> u128 {
        match self.balances.get_mut(&account) {
            Some(balance) => std::mem::take(balance),
            None => 0,
        }
    }

    /// Returns the sum of all balances, i.e. the total value the engine
    /// currently custodies.
    pub fn total_held(&self) -> u128 {
        self.balances.values().sum()
    }

    /// Iterates over every account the ledger has materialized.
    pub fn accounts(&self) -> impl Iterator<Item = Address> + '_ {
        self.balances.keys().copied()
    }
}
