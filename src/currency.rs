//! Currency denomination and amount handling
//!
//! A [`CurrencyAmount`] can only be obtained by multiplying a decoded
//! [`Currency`] by an integer price. There is no public constructor that
//! accepts a raw quantity, so an amount can never carry a denomination it
//! was not actually priced in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use thiserror::Error;

/// Failure to decode a stored blob into a typed value
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("malformed currency record: {0}")]
    Malformed(String),
}

/// A currency denomination as stored in ledger state
///
/// `unit` is the scaling factor between the integer price a caller supplies
/// and the on-ledger quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub ticker: String,
    pub unit: u64,
}

/// A quantity of a specific currency, scaled by its unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    currency: Currency,
    quantity: i128,
}

impl CurrencyAmount {
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn quantity(&self) -> i128 {
        self.quantity
    }
}

impl Mul<i64> for &Currency {
    type Output = CurrencyAmount;

    fn mul(self, price: i64) -> CurrencyAmount {
        CurrencyAmount {
            currency: self.clone(),
            quantity: i128::from(price) * i128::from(self.unit),
        }
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.currency.ticker)
    }
}

/// Decodes a stored state blob into a [`Currency`].
///
/// The decoding scheme belongs to the state machine; this core only needs
/// the typed result, so the decoder is a seam callers can swap.
pub trait CurrencyDecoder: Send + Sync {
    fn decode_currency(&self, bytes: &[u8]) -> Result<Currency, DecodeError>;
}

/// Default decoder for the ledger's bincode-encoded currency records
#[derive(Debug, Clone, Default)]
pub struct BincodeCurrencyDecoder;

impl CurrencyDecoder for BincodeCurrencyDecoder {
    fn decode_currency(&self, bytes: &[u8]) -> Result<Currency, DecodeError> {
        bincode::deserialize(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))
    }
}
