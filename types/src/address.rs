//! Account address type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing an account address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("account address is empty")]
    Empty,

    #[error("account address {0:?} contains whitespace")]
    Whitespace(String),
}

/// An account on the ledger.
///
/// Addresses are opaque identifiers; the ledger never interprets their content
/// beyond equality and ordering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Create an address from a raw string without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse and validate an address.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let candidate = Self(raw.to_string());
        candidate.validate()?;
        Ok(candidate)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that this address is well-formed.
    pub fn validate(&self) -> Result<(), AddressError> {
        if self.0.is_empty() {
            return Err(AddressError::Empty);
        }
        if self.0.chars().any(char::is_whitespace) {
            return Err(AddressError::Whitespace(self.0.clone()));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for AccountAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
