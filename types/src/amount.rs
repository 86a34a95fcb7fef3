//! Token amount type.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw; one whole token is `10^18` raw.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Number of decimal places carried by every amount.
pub const TOKEN_DECIMALS: u32 = 18;

/// Raw units in one whole token.
pub const TOKEN_UNIT: u128 = 10u128.pow(TOKEN_DECIMALS);

/// Errors produced when parsing a decimal token amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("amount {0:?} is not a decimal number")]
    Invalid(String),

    #[error("amount {0:?} has more than 18 decimal places")]
    TooPrecise(String),

    #[error("amount {0:?} does not fit in 128 bits")]
    Overflow(String),
}

/// A token amount in raw units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole tokens, scaled by [`TOKEN_UNIT`].
    ///
    /// # Panics
    /// Panics if the scaled value overflows `u128`.
    pub fn from_tokens(tokens: u128) -> Self {
        Self(tokens * TOKEN_UNIT)
    }

    pub fn checked_from_tokens(tokens: u128) -> Option<Self> {
        tokens.checked_mul(TOKEN_UNIT).map(Self)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Whole-token part, truncating the fraction.
    pub fn to_tokens(&self) -> u128 {
        self.0 / TOKEN_UNIT
    }

    /// Fractional part in raw units.
    pub fn fraction(&self) -> u128 {
        self.0 % TOKEN_UNIT
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TokenAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::iter::Sum for TokenAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.to_tokens();
        let frac = self.fraction();
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{:0width$}", frac, width = TOKEN_DECIMALS as usize);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for TokenAmount {
    type Err = AmountParseError;

    /// Parse a decimal token amount such as `"300"` or `"0.25"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
            return Err(AmountParseError::Invalid(s.to_string()));
        }
        if frac.len() > TOKEN_DECIMALS as usize {
            return Err(AmountParseError::TooPrecise(s.to_string()));
        }
        let overflow = || AmountParseError::Overflow(s.to_string());
        let whole: u128 = whole.parse().map_err(|_| overflow())?;
        let frac_raw: u128 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac, width = TOKEN_DECIMALS as usize);
            padded.parse().map_err(|_| overflow())?
        };
        whole
            .checked_mul(TOKEN_UNIT)
            .and_then(|raw| raw.checked_add(frac_raw))
            .map(Self)
            .ok_or_else(overflow)
    }
}
