//! Outbound value-transfer seam for withdrawals.
//!
//! The engine never pushes value to an account except in response to that
//! account's own withdrawal call, and it performs the transfer through a
//! [`PayoutSink`] supplied by the host. Keeping the transfer behind a trait
//! keeps the ledger bookkeeping pure and lets tests exercise the
//! failed-transfer path.

use crate::address::Address;
use std::collections::HashMap;
use thiserror::Error;

/// A rejected outbound transfer.
///
/// Carries the reason reported by the transfer mechanism. The engine turns
/// this into a transfer-class error and rolls back the withdrawal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct PayoutError {
    reason: String,
}

impl PayoutError {
    /// Creates a payout error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        PayoutError {
            reason: reason.into(),
        }
    }
}

/// Destination for outbound value transfers.
///
/// `pay` either moves the full amount to the recipient or fails without
/// moving anything; partial transfers are not representable.
pub trait PayoutSink {
    /// Transfers `amount` to `to`.
    fn pay(&mut self, to: Address, amount: u128) -> std::result::Result<(), PayoutError>;
}

/// In-process sink that records cumulative payouts per account.
///
/// Used by the CSV runner and by tests; always accepts a transfer unless the
/// cumulative total would overflow.
#[derive(Debug, Default)]
pub struct MemoryPayouts {
    paid: HashMap<Address, u128>,
    total: u128,
}

impl MemoryPayouts {
    /// Creates an empty payout recorder.
    pub fn new() -> Self {
        MemoryPayouts::default()
    }

    /// Returns the cumulative amount paid out to an account.
    pub fn paid_to(&self, account: Address) -> u128 {
        self.paid.get(&account).copied().unwrap_or(0)
    }

    /// Returns the cumulative amount paid out across all accounts.
    pub fn total_paid(&self) -> u128 {
        self.total
    }

    /// Iterates over every account that has received a payout.
    pub fn accounts(&self) -> impl Iterator<Item = Address> + '_ {
        self.paid.keys().copied()
    }
}

impl PayoutSink for MemoryPayouts {
    fn pay(&mut self, to: Address, amount: u128) -> std::result::Result<(), PayoutError> {
        // Both counters move together or not at all.
        let account_total = self
            .paid_to(to)
            .checked_add(amount)
            .ok_or_else(|| PayoutError::new("cumulative payout overflow"))?;
        let grand_total = self
            .total
            .checked_add(amount)
            .ok_or_else(|| PayoutError::new("cumulative payout overflow"))?;
        self.paid.insert(to, account_total);
        self.total = grand_total;
        Ok(())
    }
}
