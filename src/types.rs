//! Common types used throughout the dispatch core

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Per-signer transaction counter, assigned by the ledger service
pub type Nonce = u64;

/// Identifier for an item, costume, recipe product, or other sub-state
/// record. The ledger encodes these as UUIDs.
pub type ItemId = Uuid;

/// Number of bytes in an [`Address`].
pub const ADDRESS_LEN: usize = 20;

/// Number of bytes in a [`TxId`].
pub const TX_ID_LEN: usize = 32;

/// Errors raised when parsing an [`Address`] or [`TxId`] from text
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("invalid hex: {0}")]
    Hex(String),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
}

/// Fixed-width opaque identifier for an account or sub-state record
/// (an agent, an avatar, a market listing, ...).
///
/// Equality is byte-exact; no ordering semantics beyond that. Rendered as
/// 0x-prefixed hex in human-readable formats and as raw bytes in binary
/// ones, so envelope serialization stays compact and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse from hex, with or without a 0x prefix
    pub fn from_hex(s: &str) -> Result<Self, ParseIdError> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| ParseIdError::Hex(e.to_string()))?;
        let arr: [u8; ADDRESS_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| ParseIdError::Length {
                    expected: ADDRESS_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

struct AddressVisitor;

impl<'de> Visitor<'de> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a 20-byte address as hex string or raw bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Address, E> {
        Address::from_hex(v).map_err(de::Error::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Address, E> {
        let arr: [u8; ADDRESS_LEN] = v.try_into().map_err(|_| {
            de::Error::custom(ParseIdError::Length {
                expected: ADDRESS_LEN,
                actual: v.len(),
            })
        })?;
        Ok(Address(arr))
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(AddressVisitor)
        } else {
            deserializer.deserialize_bytes(AddressVisitor)
        }
    }
}

/// Opaque fingerprint of a signed transaction envelope.
///
/// The sole lifecycle handle returned to callers; derived from the envelope
/// bytes, so any third party holding the envelope reproduces the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxId(pub [u8; TX_ID_LEN]);

impl TxId {
    pub const fn new(bytes: [u8; TX_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TX_ID_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, ParseIdError> {
        let bytes = hex::decode(s).map_err(|e| ParseIdError::Hex(e.to_string()))?;
        let arr: [u8; TX_ID_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseIdError::Length {
                expected: TX_ID_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
