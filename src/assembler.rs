//! Transaction assembler: nonce fetch, signing bytes, signature, envelope
//!
//! The assembly sequence is fetch-nonce → derive signing bytes → sign →
//! wrap. It holds no local state between calls, so cancelling the task at
//! any point leaves nothing partially committed in this core; nonce
//! consumption only happens when the ledger later accepts the envelope.

use crate::action::Action;
use crate::envelope::{signing_bytes, Envelope};
use crate::error::DispatchError;
use crate::keystore::Signer;
use crate::ledger::LedgerService;
use std::sync::Arc;
use tracing::debug;

/// Wraps ordered actions into a signed envelope for the node's identity
pub struct TransactionAssembler {
    ledger: Arc<dyn LedgerService>,
    signer: Arc<dyn Signer>,
}

impl TransactionAssembler {
    pub fn new(ledger: Arc<dyn LedgerService>, signer: Arc<dyn Signer>) -> Self {
        Self { ledger, signer }
    }

    /// Assemble one signed envelope containing exactly `actions`, in call
    /// order.
    ///
    /// The unsigned content is deterministic for identical (signer, nonce,
    /// actions). A custody failure surfaces as `Signing`; no partial
    /// envelope is ever returned.
    pub async fn assemble(&self, actions: Vec<Action>) -> Result<Envelope, DispatchError> {
        if actions.is_empty() {
            return Err(DispatchError::Argument {
                operation: "assemble".to_string(),
                reason: "an envelope must contain at least one action".to_string(),
            });
        }

        let signer_address = self.signer.address();
        let nonce = self
            .ledger
            .next_nonce(&signer_address)
            .await
            .map_err(|e| DispatchError::Unexpected(format!("nonce fetch failed: {}", e)))?;

        let unsigned = signing_bytes(&signer_address, nonce, &actions)
            .map_err(|e| DispatchError::Unexpected(e.to_string()))?;
        let signature = self
            .signer
            .try_sign(&unsigned)
            .map_err(|e| DispatchError::Signing(e.to_string()))?;

        debug!(
            signer = %signer_address,
            nonce,
            action_count = actions.len(),
            "assembled signed envelope"
        );
        Ok(Envelope::new(signer_address, nonce, actions, signature))
    }
}
