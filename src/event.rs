//! Structured records emitted by state-changing operations.
//!
//! Every successful state-changing operation pushes exactly one record; a
//! failed operation pushes none. The presentation layer consumes these for
//! user-facing notifications.

use crate::address::Address;
use serde::Serialize;

/// A record of a completed state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// Incoming value was divided between two recipients.
    Split {
        from: Address,
        first: Address,
        second: Address,
        first_amount: u128,
        second_amount: u128,
    },

    /// An account redistributed its own balance; `amount` is the
    /// per-recipient credit.
    BalanceSplit {
        from: Address,
        first: Address,
        second: Address,
        amount: u128,
    },

    /// An account drained and received its balance.
    Withdrawal { account: Address, amount: u128 },

    /// Value-moving operations were suspended.
    Paused { by: Address },

    /// Value-moving operations were resumed.
    Unpaused { by: Address },

    /// An account was granted the pauser role.
    PauserAdded { by: Address, account: Address },

    /// An account gave up the pauser role.
    PauserRemoved { by: Address, account: Address },
}
