//! # Splitter Engine
//!
//! The accounting and access-control core of a two-party fund-splitting
//! service: incoming value is divided between exactly two recipients,
//! balances accumulate per account, accounts can redistribute their own
//! balance or withdraw it on demand, and a role-gated emergency pause
//! suspends value-moving operations.
//!
//! ## Design Principles
//!
//! - **Conservation**: no operation creates or destroys value; the sum of
//!   balances plus withdrawn funds always equals the value accepted
//! - **Integer units**: balances are `u128` amounts in the smallest
//!   indivisible unit, split with truncating division and a deterministic
//!   remainder policy
//! - **Pull payments**: value only leaves the ledger through the owner's own
//!   withdrawal, and the ledger entry is zeroed before the transfer
//! - **All-or-nothing operations**: every failure aborts the whole call with
//!   no partial mutation
//!
//! ## Example
//!
//! ```
//! use splitter_engine::{Address, MemoryPayouts, Splitter};
//!
//! let alice: Address = "0x00000000000000000000000000000000000000a1".parse().unwrap();
//! let bob: Address = "0x00000000000000000000000000000000000000b0".parse().unwrap();
//! let carol: Address = "0x00000000000000000000000000000000000000c0".parse().unwrap();
//!
//! let mut splitter = Splitter::new(alice);
//! splitter.split(alice, bob, carol, 333).unwrap();
//! assert_eq!(splitter.balance_of(bob), 167);
//! assert_eq!(splitter.balance_of(carol), 166);
//!
//! let mut payouts = MemoryPayouts::new();
//! splitter.withdraw(bob, &mut payouts).unwrap();
//! assert_eq!(payouts.paid_to(bob), 167);
//! ```

pub mod access;
pub mod address;
pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod operation;
pub mod payout;
pub mod runner;

pub use access::AccessControl;
pub use address::{Address, AddressParseError};
pub use engine::Splitter;
pub use error::{ErrorKind, Result, SplitterError};
pub use event::Event;
pub use ledger::Ledger;
pub use operation::{OpKind, OperationRecord, ParsedOperation};
pub use payout::{MemoryPayouts, PayoutError, PayoutSink};
pub use runner::SplitterRunner;
