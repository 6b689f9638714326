//! Versioned action dispatch and transaction submission core
//!
//! Sits between an untrusted API surface and a replicated ledger: shapes
//! typed mutation arguments into immutable versioned actions, bundles them
//! into one signed envelope for the node's identity, submits the envelope
//! to the ledger's pending pool, and returns a stable transaction
//! identifier. Consensus, block production, and game rule validation live
//! behind the collaborator traits in [`ledger`] and [`keystore`].

pub mod action;
pub mod assembler;
pub mod builder;
pub mod config;
pub mod currency;
pub mod envelope;
pub mod error;
pub mod facade;
pub mod gateway;
pub mod keystore;
pub mod ledger;
pub mod observability;
pub mod registry;
pub mod types;

pub use action::Action;
pub use config::DispatchConfig;
pub use error::DispatchError;
pub use facade::ActionDispatcher;
pub use registry::ActionKind;
pub use types::{Address, ItemId, Nonce, TxId};
