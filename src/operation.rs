//! Operation models for CSV parsing and internal representation.

use crate::address::Address;
use serde::Deserialize;

/// Raw operation record as read from CSV.
///
/// Uses string-based fields for flexibility; the recipient and value columns
/// are only present for the operations that need them.
#[derive(Debug, Deserialize)]
pub struct OperationRecord {
    /// Operation name: split, split_balance, withdraw, pause, unpause,
    /// add_pauser, renounce_pauser
    pub op: String,

    /// Account performing the operation
    pub sender: String,

    /// First recipient (split, split_balance) or the account a role
    /// operation targets (add_pauser)
    pub first: Option<String>,

    /// Second recipient (split, split_balance)
    pub second: Option<String>,

    /// Attached value in smallest units (split only)
    pub value: Option<String>,
}

impl OperationRecord {
    /// Parses the raw CSV record into a typed operation.
    ///
    /// Returns `None` if the record is invalid (unknown operation, missing
    /// or unparseable field). Address-level validity (empty recipient,
    /// duplicates) is the engine's concern, not the parser's.
    pub fn parse(&self) -> Option<ParsedOperation> {
        let sender = parse_address(&self.sender)?;

        let kind = match self.op.trim().to_lowercase().as_str() {
            "split" => OpKind::Split {
                first: parse_opt_address(&self.first)?,
                second: parse_opt_address(&self.second)?,
                value: self.parse_value()?,
            },
            "split_balance" => OpKind::SplitBalance {
                first: parse_opt_address(&self.first)?,
                second: parse_opt_address(&self.second)?,
            },
            "withdraw" => OpKind::Withdraw,
            "pause" => OpKind::Pause,
            "unpause" => OpKind::Unpause,
            "add_pauser" => OpKind::AddPauser {
                account: parse_opt_address(&self.first)?,
            },
            "renounce_pauser" => OpKind::RenouncePauser,
            _ => return None,
        };

        Some(ParsedOperation { sender, kind })
    }

    /// Parses the value field into smallest units.
    fn parse_value(&self) -> Option<u128> {
        let raw = self.value.as_ref()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse().ok()
    }
}

fn parse_address(raw: &str) -> Option<Address> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn parse_opt_address(raw: &Option<String>) -> Option<Address> {
    parse_address(raw.as_ref()?)
}

/// A parsed and validated operation ready for processing.
#[derive(Debug, Clone)]
pub struct ParsedOperation {
    /// Account performing the operation
    pub sender: Address,

    /// Operation type with associated data
    pub kind: OpKind,
}

/// Operation variants with associated data.
#[derive(Debug, Clone)]
pub enum OpKind {
    /// Divide the attached value between two recipients.
    Split {
        first: Address,
        second: Address,
        value: u128,
    },

    /// Redistribute the sender's balance between two recipients.
    SplitBalance { first: Address, second: Address },

    /// Drain the sender's balance and transfer it out.
    Withdraw,

    /// Suspend value-moving operations.
    Pause,

    /// Resume value-moving operations.
    Unpause,

    /// Grant the pauser role to an account.
    AddPauser { account: Address },

    /// Give up the sender's own pauser role.
    RenouncePauser,
}
