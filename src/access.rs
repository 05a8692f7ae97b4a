//! Pauser role membership and the emergency pause flag.
//!
//! The pause gate has two states, active (initial) and paused, and may only
//! be flipped by a current member of the pauser set. The deployer is the
//! sole initial member; membership changes are themselves gated on current
//! membership.
//!
//! Redundant transitions are errors rather than no-ops: pausing while
//! already paused fails with "already paused", unpausing while active fails
//! with "not paused". Every state-changing call is either effective or an
//! explicit rejection.

use crate::address::Address;
use crate::error::{Result, SplitterError};
use std::collections::HashSet;

/// Pauser set plus paused flag.
#[derive(Debug)]
pub struct AccessControl {
    pausers: HashSet<Address>,
    paused: bool,
}

impl AccessControl {
    /// Creates the access state with `deployer` as the sole pauser and the
    /// gate active.
    pub fn new(deployer: Address) -> Self {
        let mut pausers = HashSet::new();
        pausers.insert(deployer);
        AccessControl {
            pausers,
            paused: false,
        }
    }

    /// Returns `true` if the account holds the pauser role.
    pub fn is_pauser(&self, account: Address) -> bool {
        self.pausers.contains(&account)
    }

    /// Returns `true` if value-moving operations are suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Iterates over the current pauser set.
    pub fn pausers(&self) -> impl Iterator<Item = Address> + '_ {
        self.pausers.iter().copied()
    }

    /// Suspends value-moving operations.
    pub fn pause(&mut self, caller: Address) -> Result<()> {
        if !self.is_pauser(caller) {
            return Err(SplitterError::NotPauser);
        }
        if self.paused {
            return Err(SplitterError::AlreadyPaused);
        }
        self.paused = true;
        Ok(())
    }

    /// Resumes value-moving operations.
    pub fn unpause(&mut self, caller: Address) -> Result<()> {
        if !self.is_pauser(caller) {
            return Err(SplitterError::NotPauser);
        }
        if !self.paused {
            return Err(SplitterError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }

    /// Grants the pauser role to `account`. The caller must itself be a
    /// pauser.
    pub fn add_pauser(&mut self, caller: Address, account: Address) -> Result<()> {
        if !self.is_pauser(caller) {
            return Err(SplitterError::NotPauser);
        }
        if account.is_zero() {
            return Err(SplitterError::EmptyAccount);
        }
        if !self.pausers.insert(account) {
            return Err(SplitterError::AlreadyPauser);
        }
        Ok(())
    }

    /// Removes the caller's own pauser role. The set may end up empty, in
    /// which case the pause state is frozen as-is.
    pub fn renounce_pauser(&mut self, caller: Address) -> Result<()> {
        if !self.pausers.remove(&caller) {
            return Err(SplitterError::NotPauser);
        }
        Ok(())
    }
}
