//! Fixed-width account identifier type.
//!
//! Accounts are opaque 20-byte addresses. Any address is a valid account and
//! implicitly holds a zero balance until credited; no registration step
//! exists. The all-zero address is treated as "empty" and rejected wherever
//! an operation requires a real recipient.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An opaque, fixed-width account identifier.
///
/// Parsed from and displayed as a 40-character hex string with an optional
/// `0x` prefix. Ordering is lexicographic over the raw bytes, which keeps
/// report output deterministic.
///
/// # Examples
///
/// ```
/// use splitter_engine::Address;
///
/// let addr: Address = "0x00000000000000000000000000000000000000a1".parse().unwrap();
/// assert_eq!(addr.to_string(), "0x00000000000000000000000000000000000000a1");
/// assert!(!addr.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Width of an address in bytes.
    pub const LEN: usize = 20;

    /// The empty (all-zero) address.
    pub const ZERO: Self = Address([0u8; 20]);

    /// Creates an address from raw bytes.
    pub fn new(bytes: [u8; Self::LEN]) -> Self {
        Address(bytes)
    }

    /// Returns `true` if this is the empty address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; Self::LEN]
    }

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

/// Errors produced when parsing an address from text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressParseError {
    /// The string contains non-hex characters or has odd length.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The decoded byte string has the wrong width.
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let decoded = hex::decode(digits)?;
        if decoded.len() != Self::LEN {
            return Err(AddressParseError::Length {
                expected: Self::LEN,
                actual: decoded.len(),
            });
        }
        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Address(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(serde::de::Error::custom)
    }
}
