//! Ledger service collaborator seam
//!
//! The replicated ledger is a black box to this core. It owns consensus,
//! mempool admission, nonce assignment, and state storage; we only read
//! current state by key, ask for the next nonce, and hand over signed
//! envelopes.

use crate::envelope::Envelope;
use crate::types::{Address, Nonce, TxId};
use async_trait::async_trait;
use thiserror::Error;

/// Well-known state key of the gold currency denomination record
pub const GOLD_CURRENCY_STATE_KEY: Address = Address::new([
    0x47, 0x6f, 0x6c, 0x64, 0x43, 0x75, 0x72, 0x72, 0x65, 0x6e, 0x63, 0x79, 0x53, 0x74, 0x61,
    0x74, 0x65, 0x00, 0x00, 0x00,
]);

/// Failures surfaced by the ledger service
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// The envelope was declined for inclusion (malformed, duplicate nonce,
    /// policy). Terminal for the submission; the reason is the ledger's own
    /// wording.
    #[error("rejected: {reason}")]
    Rejected { reason: String },

    /// The service could not be reached or answered out of protocol
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Read/submit surface of the replicated ledger
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Point-in-time snapshot of the stored value under `key`, if any.
    /// No isolation guarantee beyond "never observes a half-written value".
    async fn read_state(&self, key: &Address) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Next unconsumed nonce for `signer`. Assignment is serialized by the
    /// ledger, not by this core; concurrent submissions from one signer may
    /// race and lose.
    async fn next_nonce(&self, signer: &Address) -> Result<Nonce, LedgerError>;

    /// Accept a signed envelope into the pending pool. The returned
    /// identifier is derived from the accepted envelope bytes.
    async fn submit(&self, envelope: &Envelope) -> Result<TxId, LedgerError>;
}
