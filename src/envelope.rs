//! Signed transaction envelope and its deterministic byte forms
//!
//! The unsigned content is the bincode encoding of (signer, nonce, ordered
//! actions). bincode with its default fixed-int configuration is
//! deterministic for a fixed value, which is what lets any third party
//! re-derive the signing bytes and verify the signature. The envelope id is
//! the SHA-256 digest of the full signed encoding.

use crate::action::Action;
use crate::types::{Address, Nonce, TxId, TX_ID_LEN};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Envelope serialization failure. Practically unreachable for well-formed
/// payloads, but never papered over with a panic.
#[derive(Debug, Clone, Error)]
#[error("envelope encoding failed: {0}")]
pub struct EncodeError(String);

/// The deterministic unsigned content a signature commits to
#[derive(Serialize)]
struct SigningPayload<'a> {
    signer: &'a Address,
    nonce: Nonce,
    actions: &'a [Action],
}

/// Produce the byte string a signer commits to.
///
/// Two calls with identical signer, nonce, and ordered actions return
/// byte-identical output.
pub fn signing_bytes(
    signer: &Address,
    nonce: Nonce,
    actions: &[Action],
) -> Result<Vec<u8>, EncodeError> {
    bincode::serialize(&SigningPayload {
        signer,
        nonce,
        actions,
    })
    .map_err(|e| EncodeError(e.to_string()))
}

/// An ordered, non-empty, signed bundle of actions from one signer
///
/// Exactly the actions passed to the assembler, in call order; no
/// reordering, no deduplication. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    signer: Address,
    nonce: Nonce,
    actions: Vec<Action>,
    signature: Vec<u8>,
}

impl Envelope {
    pub(crate) fn new(
        signer: Address,
        nonce: Nonce,
        actions: Vec<Action>,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            signer,
            nonce,
            actions,
            signature,
        }
    }

    pub fn signer(&self) -> &Address {
        &self.signer
    }

    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The unsigned content this envelope's signature commits to
    pub fn signing_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        signing_bytes(&self.signer, self.nonce, &self.actions)
    }

    /// Deterministic fingerprint of the signed envelope bytes
    pub fn id(&self) -> Result<TxId, EncodeError> {
        let bytes = bincode::serialize(self).map_err(|e| EncodeError(e.to_string()))?;
        let digest = Sha256::digest(&bytes);
        let mut id = [0u8; TX_ID_LEN];
        id.copy_from_slice(&digest);
        Ok(TxId::new(id))
    }
}
