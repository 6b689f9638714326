//! Configuration loading for the dispatch node

use crate::ledger::GOLD_CURRENCY_STATE_KEY;
use crate::types::Address;
use serde::{Deserialize, Serialize};

/// Top-level dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Key custody configuration
    #[serde(default)]
    pub keystore: KeystoreConfig,

    /// Ledger-facing configuration
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Monitoring and tracing
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystoreConfig {
    /// Path to the node's keypair file
    #[serde(default = "default_keypair_path")]
    pub keypair_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// State key of the gold currency denomination record, as hex
    #[serde(default = "default_currency_state_key")]
    pub currency_state_key: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Enable tracing subscriber installation at startup
    #[serde(default = "default_true")]
    pub enable_tracing: bool,
}

fn default_keypair_path() -> String {
    "keystore/node.key".to_string()
}

fn default_currency_state_key() -> Address {
    GOLD_CURRENCY_STATE_KEY
}

fn default_true() -> bool {
    true
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            keypair_path: default_keypair_path(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency_state_key: default_currency_state_key(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enable_tracing: default_true(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            keystore: KeystoreConfig::default(),
            ledger: LedgerConfig::default(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl DispatchConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DispatchConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
