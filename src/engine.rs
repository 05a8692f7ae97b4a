//! Core fund-splitting engine.
//!
//! Orchestrates every public operation: consult the pause gate and pauser
//! roles, validate inputs, mutate the ledger, emit an event record, and (for
//! withdrawal) perform the outbound transfer. Each operation either takes
//! full effect or leaves no trace.

use crate::access::AccessControl;
use crate::address::Address;
use crate::error::{Result, SplitterError};
use crate::event::Event;
use crate::ledger::Ledger;
use crate::payout::PayoutSink;
use log::debug;

/// The fund-splitting engine.
///
/// Owns the ledger, the pauser set, the paused flag, and the buffer of
/// emitted event records. Created once with a deployer (the initial pauser)
/// and passed by reference to every operation; there is no global state.
///
/// # Remainder bias
///
/// `split` and `split_balance` divide by two with truncation and assign the
/// odd unit by fixed policy: `split` gives it to the first recipient,
/// `split_balance` leaves it on the caller's own balance. The asymmetry is
/// part of the operation contracts.
///
/// # Withdrawal ordering
///
/// `withdraw` zeroes the caller's ledger entry strictly before invoking the
/// payout sink, so any observer during the transfer (including a call made
/// from inside the sink's machinery) sees a zero balance and is rejected. A
/// rejected payout restores the balance before the error is returned.
pub struct Splitter {
    ledger: Ledger,
    access: AccessControl,
    events: Vec<Event>,
}

impl Splitter {
    /// Creates an engine with empty balances and `deployer` as the sole
    /// initial pauser.
    pub fn new(deployer: Address) -> Self {
        let mut splitter = Splitter {
            ledger: Ledger::new(),
            access: AccessControl::new(deployer),
            events: Vec::new(),
        };
        splitter.events.push(Event::PauserAdded {
            by: deployer,
            account: deployer,
        });
        splitter
    }

    /// Returns the claimable balance of an account.
    pub fn balance_of(&self, account: Address) -> u128 {
        self.ledger.balance_of(account)
    }

    /// Returns `true` if the account holds the pauser role.
    pub fn is_pauser(&self, account: Address) -> bool {
        self.access.is_pauser(account)
    }

    /// Returns `true` if value-moving operations are suspended.
    pub fn is_paused(&self) -> bool {
        self.access.is_paused()
    }

    /// Returns the total value currently custodied by the engine.
    pub fn total_held(&self) -> u128 {
        self.ledger.total_held()
    }

    /// Iterates over every account with a materialized ledger entry.
    pub fn ledger_accounts(&self) -> impl Iterator<Item = Address> + '_ {
        self.ledger.accounts()
    }

    /// Iterates over the current pauser set.
    pub fn pausers(&self) -> impl Iterator<Item = Address> + '_ {
        self.access.pausers()
    }

    /// Returns the event records emitted so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drains and returns the buffered event records.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Divides the attached `value` between `first` and `second`.
    ///
    /// `first` receives `value / 2` plus the odd unit, `second` receives
    /// `value / 2`. Returns the two credited amounts.
    ///
    /// Fails while paused, on zero value, on an empty or duplicate
    /// recipient, or when the sender names itself as a recipient.
    pub fn split(
        &mut self,
        sender: Address,
        first: Address,
        second: Address,
        value: u128,
    ) -> Result<(u128, u128)> {
        self.ensure_not_paused()?;
        if value == 0 {
            return Err(SplitterError::ZeroValue);
        }
        validate_recipients(sender, first, second)?;

        let half = value / 2;
        let remainder = value - half * 2;
        let first_amount = half + remainder;
        self.ledger.credit_pair(first, first_amount, second, half)?;

        self.events.push(Event::Split {
            from: sender,
            first,
            second,
            first_amount,
            second_amount: half,
        });
        debug!(
            "split {} from {}: {} credited {}, {} credited {}",
            value, sender, first, first_amount, second, half
        );
        Ok((first_amount, half))
    }

    /// Redistributes the sender's whole balance between `first` and
    /// `second`.
    ///
    /// Each recipient receives `balance / 2`; the odd unit stays with the
    /// sender. Returns the per-recipient amount and the remainder kept.
    ///
    /// Fails while paused, on an empty or duplicate recipient, when the
    /// sender names itself as a recipient, or when the sender's balance is
    /// zero.
    pub fn split_balance(
        &mut self,
        sender: Address,
        first: Address,
        second: Address,
    ) -> Result<(u128, u128)> {
        self.ensure_not_paused()?;
        validate_recipients(sender, first, second)?;

        let balance = self.ledger.drain(sender);
        if balance == 0 {
            return Err(SplitterError::ZeroBalance);
        }

        let half = balance / 2;
        let remainder = balance - half * 2;
        if let Err(e) = self.ledger.credit_pair(first, half, second, half) {
            // Roll the drain back; the amount was held a moment ago, so the
            // re-credit cannot overflow.
            self.ledger.credit(sender, balance)?;
            return Err(e);
        }
        if remainder > 0 {
            self.ledger.credit(sender, remainder)?;
        }

        self.events.push(Event::BalanceSplit {
            from: sender,
            first,
            second,
            amount: half,
        });
        debug!(
            "balance split {} from {}: {} and {} credited {} each, {} kept",
            balance, sender, first, second, half, remainder
        );
        Ok((half, remainder))
    }

    /// Drains the caller's balance and transfers it out through `sink`.
    ///
    /// The ledger entry is zeroed before the payout is attempted; if the
    /// payout is rejected the balance is restored and the error surfaced.
    /// Returns the amount withdrawn.
    ///
    /// Not gated by pause: funds already credited stay claimable during an
    /// emergency stop.
    pub fn withdraw<S: PayoutSink + ?Sized>(
        &mut self,
        caller: Address,
        sink: &mut S,
    ) -> Result<u128> {
        let amount = self.ledger.drain(caller);
        if amount == 0 {
            return Err(SplitterError::ZeroBalance);
        }

        if let Err(e) = sink.pay(caller, amount) {
            // The amount was held a moment ago, so the re-credit cannot
            // overflow.
            self.ledger.credit(caller, amount)?;
            return Err(SplitterError::Payout(e));
        }

        self.events.push(Event::Withdrawal {
            account: caller,
            amount,
        });
        debug!("withdrew {} for {}", amount, caller);
        Ok(amount)
    }

    /// Suspends value-moving operations. The caller must be a pauser.
    pub fn pause(&mut self, caller: Address) -> Result<()> {
        self.access.pause(caller)?;
        self.events.push(Event::Paused { by: caller });
        debug!("paused by {}", caller);
        Ok(())
    }

    /// Resumes value-moving operations. The caller must be a pauser.
    pub fn unpause(&mut self, caller: Address) -> Result<()> {
        self.access.unpause(caller)?;
        self.events.push(Event::Unpaused { by: caller });
        debug!("unpaused by {}", caller);
        Ok(())
    }

    /// Grants the pauser role to `account`. The caller must be a pauser.
    pub fn add_pauser(&mut self, caller: Address, account: Address) -> Result<()> {
        self.access.add_pauser(caller, account)?;
        self.events.push(Event::PauserAdded {
            by: caller,
            account,
        });
        debug!("pauser {} added by {}", account, caller);
        Ok(())
    }

    /// Removes the caller's own pauser role.
    pub fn renounce_pauser(&mut self, caller: Address) -> Result<()> {
        self.access.renounce_pauser(caller)?;
        self.events.push(Event::PauserRemoved {
            by: caller,
            account: caller,
        });
        debug!("pauser {} renounced", caller);
        Ok(())
    }

    fn ensure_not_paused(&self) -> Result<()> {
        if self.access.is_paused() {
            return Err(SplitterError::Paused);
        }
        Ok(())
    }
}

fn validate_recipients(sender: Address, first: Address, second: Address) -> Result<()> {
    if first.is_zero() || second.is_zero() {
        return Err(SplitterError::EmptyRecipient);
    }
    if first == second {
        return Err(SplitterError::DuplicateRecipient);
    }
    if sender == first || sender == second {
        return Err(SplitterError::SenderIsRecipient);
    }
    Ok(())
}
