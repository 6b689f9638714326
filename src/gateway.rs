//! Submission gateway: the single hand-off into the ledger's pending pool
//!
//! Exactly one `submit` call per envelope, never retried here. A retry at
//! this layer could double-submit with a stale nonce; backoff policy
//! belongs to the caller or the ledger client.

use crate::envelope::Envelope;
use crate::error::DispatchError;
use crate::ledger::{LedgerError, LedgerService};
use crate::types::TxId;
use std::sync::Arc;
use tracing::info;

/// Hands assembled envelopes to the ledger service
pub struct SubmissionGateway {
    ledger: Arc<dyn LedgerService>,
}

impl SubmissionGateway {
    pub fn new(ledger: Arc<dyn LedgerService>) -> Self {
        Self { ledger }
    }

    /// Submit `envelope` and return the ledger's identifier for it.
    ///
    /// Ledger-side rejection is terminal for this call and carries the
    /// rejection reason verbatim.
    pub async fn submit(&self, envelope: &Envelope) -> Result<TxId, DispatchError> {
        let tx_id = self.ledger.submit(envelope).await.map_err(|e| match e {
            LedgerError::Rejected { reason } => DispatchError::SubmissionRejected { reason },
            other => DispatchError::Unexpected(other.to_string()),
        })?;

        info!(
            tx_id = %tx_id,
            signer = %envelope.signer(),
            nonce = envelope.nonce(),
            action_count = envelope.actions().len(),
            "envelope accepted into pending pool"
        );
        Ok(tx_id)
    }
}
