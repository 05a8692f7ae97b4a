//! Error types for the splitter engine.

use crate::address::{Address, AddressParseError};
use crate::payout::PayoutError;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, SplitterError>;

/// Broad failure classes, used by callers that only need to know which
/// family a rejection belongs to (e.g. to pick a user-facing message).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or contradictory inputs.
    Validation,
    /// The caller lacks the required role.
    Authorization,
    /// The operation is not allowed in the current pause state.
    State,
    /// The caller has no balance to move.
    InsufficientBalance,
    /// The outbound value transfer was rejected.
    Transfer,
    /// I/O, CSV, or CLI usage failure.
    Io,
}

/// Errors that can occur during engine operation.
///
/// Every error aborts the whole operation; no partial mutation survives a
/// failed call.
#[derive(Error, Debug)]
pub enum SplitterError {
    /// A value-moving operation was attempted while paused
    #[error("paused")]
    Paused,

    /// `pause` was called while already paused
    #[error("already paused")]
    AlreadyPaused,

    /// `unpause` was called while active
    #[error("not paused")]
    NotPaused,

    /// A pause or role operation was attempted by a non-pauser
    #[error("caller is not a pauser")]
    NotPauser,

    /// `split` was called with no attached value
    #[error("zero value")]
    ZeroValue,

    /// A recipient is the empty address
    #[error("recipient is empty")]
    EmptyRecipient,

    /// Both recipients are the same account
    #[error("duplicate recipient")]
    DuplicateRecipient,

    /// The sender named itself as a recipient
    #[error("sender cannot be recipient")]
    SenderIsRecipient,

    /// A role operation named the empty address
    #[error("account is empty")]
    EmptyAccount,

    /// The account already holds the pauser role
    #[error("account is already a pauser")]
    AlreadyPauser,

    /// Withdrawal or balance split with nothing to move
    #[error("balance is zero")]
    ZeroBalance,

    /// Crediting the account would overflow its balance
    #[error("balance overflow for {0}")]
    BalanceOverflow(Address),

    /// The outbound transfer was rejected; the ledger was rolled back
    #[error("payout failed: {0}")]
    Payout(#[from] PayoutError),

    /// An address argument could not be parsed
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressParseError),

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing CLI arguments
    #[error("missing arguments. Usage: splitter-engine <deployer-address> <operations.csv>")]
    MissingArgument,
}

impl SplitterError {
    /// Returns the broad class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SplitterError::Paused | SplitterError::AlreadyPaused | SplitterError::NotPaused => {
                ErrorKind::State
            }
            SplitterError::NotPauser => ErrorKind::Authorization,
            SplitterError::ZeroValue
            | SplitterError::EmptyRecipient
            | SplitterError::DuplicateRecipient
            | SplitterError::SenderIsRecipient
            | SplitterError::EmptyAccount
            | SplitterError::AlreadyPauser
            | SplitterError::BalanceOverflow(_)
            | SplitterError::InvalidAddress(_) => ErrorKind::Validation,
            SplitterError::ZeroBalance => ErrorKind::InsufficientBalance,
            SplitterError::Payout(_) => ErrorKind::Transfer,
            SplitterError::Io(_) | SplitterError::Csv(_) | SplitterError::MissingArgument => {
                ErrorKind::Io
            }
        }
    }
}
