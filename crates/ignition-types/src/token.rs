//! # Token Amounts
//!
//! Fixed-precision token amounts carried through issuance and transfers.
//! Amounts are stored as integer base units; the symbol carries the
//! precision used for display (`10000` units at precision 4 renders as
//! `"1.0000 IGN"`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing token symbols.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Symbol codes are 1-7 uppercase ASCII letters.
    #[error("invalid symbol code: {0:?}")]
    InvalidSymbolCode(String),
}

/// A token symbol: display code plus decimal precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// Decimal places carried by amounts of this token.
    pub precision: u8,
    /// Display code, e.g. `"IGN"`.
    pub code: String,
}

impl Symbol {
    /// Build a symbol without validation. Use [`Symbol::try_new`] for
    /// inputs from configuration.
    pub fn new(code: impl Into<String>, precision: u8) -> Self {
        Self {
            precision,
            code: code.into(),
        }
    }

    /// Build a symbol, validating the code shape.
    pub fn try_new(code: impl Into<String>, precision: u8) -> Result<Self, TokenError> {
        let code = code.into();
        let valid = (1..=7).contains(&code.len())
            && code.bytes().all(|b| b.is_ascii_uppercase());
        if !valid {
            return Err(TokenError::InvalidSymbolCode(code));
        }
        Ok(Self { precision, code })
    }

    /// Multiplier converting whole tokens to base units.
    pub fn unit_scale(&self) -> u64 {
        10u64.pow(u32::from(self.precision))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

/// A token amount in integer base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    /// Base units (amount * 10^precision).
    pub units: u64,
    /// The token symbol.
    pub symbol: Symbol,
}

impl TokenAmount {
    /// Build an amount from base units.
    pub fn new(units: u64, symbol: Symbol) -> Self {
        Self { units, symbol }
    }

    /// Build an amount from whole tokens.
    pub fn from_whole(whole: u64, symbol: Symbol) -> Self {
        let units = whole * symbol.unit_scale();
        Self { units, symbol }
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = self.symbol.unit_scale();
        let whole = self.units / scale;
        if self.symbol.precision == 0 {
            return write!(f, "{} {}", whole, self.symbol.code);
        }
        let frac = self.units % scale;
        write!(
            f,
            "{}.{:0width$} {}",
            whole,
            frac,
            self.symbol.code,
            width = self.symbol.precision as usize
        )
    }
}
