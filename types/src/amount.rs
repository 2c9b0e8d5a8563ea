//! Token amount type.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid floating-point
//! errors. The smallest unit is 1 raw; one whole token is `TOKEN_UNIT` raw.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Raw units per whole token (18 decimal places).
pub const TOKEN_UNIT: u128 = 1_000_000_000_000_000_000;

/// A fungible token amount.
///
/// Internally stored as raw units (u128) for precision.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole tokens to raw units. Panics on overflow past u128.
    pub fn from_tokens(tokens: u128) -> Self {
        Self(tokens * TOKEN_UNIT)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Whole-token part of this amount (raw remainder truncated).
    pub fn to_tokens(&self) -> u128 {
        self.0 / TOKEN_UNIT
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

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} raw", self.0)
    }
}
