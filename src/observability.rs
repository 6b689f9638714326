//! Request correlation and tracing setup

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Per-request correlation context.
///
/// Every façade invocation gets one so operators can tie a diagnostic line
/// back to the API call that produced it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID
    pub request_id: String,

    /// Operation name (the action kind's wire name)
    pub operation: String,

    /// Creation timestamp (Unix epoch seconds)
    pub timestamp: u64,
}

impl RequestContext {
    pub fn new(operation: &str) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            request_id: Uuid::new_v4().to_string(),
            operation: operation.to_string(),
            timestamp,
        }
    }
}

/// Install a tracing subscriber with env-filter support.
///
/// For binaries and integration harnesses; library code only emits events.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_are_unique_per_request() {
        let a = RequestContext::new("sell-item");
        let b = RequestContext::new("sell-item");
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.operation, "sell-item");
    }
}
