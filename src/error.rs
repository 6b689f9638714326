//! Error taxonomy for the dispatch core
//!
//! Every stage of the pipeline fails fast and propagates unchanged; the
//! façade adds diagnostic logging but never recovers an error or downgrades
//! it to a generic success. Callers always see the taxonomy kind plus a
//! human-readable message.

use thiserror::Error;

/// Error type covering the whole dispatch lifecycle
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// A required argument was missing or malformed.
    ///
    /// Detected while shaping raw arguments, before any collaborator call
    /// is attempted.
    #[error("invalid argument for {operation}: {reason}")]
    Argument { operation: String, reason: String },

    /// The requested action kind is not in the registry's closed set
    #[error("unknown action kind: {0}")]
    UnknownKind(String),

    /// A stored record could not be read or decoded.
    ///
    /// Raised by the sell-item pricing lookup when the currency denomination
    /// record is absent or undecodable. Never silently defaulted.
    #[error("state decode failed for {key}: {reason}")]
    StateDecode { key: String, reason: String },

    /// The key custody component refused or failed to produce a signature
    #[error("signing failed: {0}")]
    Signing(String),

    /// The ledger service declined the envelope.
    ///
    /// Carries the ledger's rejection reason verbatim. Terminal for this
    /// call; the gateway never retries (a retry could double-submit with a
    /// stale nonce).
    #[error("submission rejected: {reason}")]
    SubmissionRejected { reason: String },

    /// Anything uncategorized (collaborator transport failure, codec
    /// failure, internal invariant violation)
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl DispatchError {
    /// Stable taxonomy label, for structured callers and log fields
    pub fn kind_name(&self) -> &'static str {
        match self {
            DispatchError::Argument { .. } => "argument",
            DispatchError::UnknownKind(_) => "unknown_kind",
            DispatchError::StateDecode { .. } => "state_decode",
            DispatchError::Signing(_) => "signing",
            DispatchError::SubmissionRejected { .. } => "submission_rejected",
            DispatchError::Unexpected(_) => "unexpected",
        }
    }

    /// Whether the failure originates from the caller's request rather than
    /// from this node or its collaborators
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            DispatchError::Argument { .. } | DispatchError::UnknownKind(_)
        )
    }
}
