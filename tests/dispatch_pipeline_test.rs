//! End-to-end pipeline tests against spy collaborators
//!
//! The spies count every `sign` and `submit` invocation so the tests can
//! assert not just outcomes but which external calls were (not) attempted.

use actiongate::builder::{ClaimDailyRewardArgs, SellItemArgs};
use actiongate::config::DispatchConfig;
use actiongate::currency::{Currency, CurrencyDecoder, DecodeError};
use actiongate::envelope::Envelope;
use actiongate::error::DispatchError;
use actiongate::keystore::{Ed25519Keystore, SignError, Signer};
use actiongate::ledger::{LedgerError, LedgerService};
use actiongate::types::{Address, ItemId, Nonce, TxId};
use actiongate::ActionDispatcher;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Ledger spy: serial nonces, counted submissions, switchable rejection
struct SpyLedger {
    next_nonce: AtomicU64,
    submit_calls: AtomicUsize,
    currency_blob: Option<Vec<u8>>,
    reject_reason: Option<String>,
}

impl SpyLedger {
    fn healthy() -> Self {
        Self {
            next_nonce: AtomicU64::new(0),
            submit_calls: AtomicUsize::new(0),
            currency_blob: Some(
                bincode::serialize(&Currency {
                    ticker: "GOLD".to_string(),
                    unit: 1,
                })
                .unwrap(),
            ),
            reject_reason: None,
        }
    }

    fn rejecting(reason: &str) -> Self {
        Self {
            reject_reason: Some(reason.to_string()),
            ..Self::healthy()
        }
    }

    fn without_currency_record(mut self) -> Self {
        self.currency_blob = None;
        self
    }
}

#[async_trait]
impl LedgerService for SpyLedger {
    async fn read_state(&self, _key: &Address) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.currency_blob.clone())
    }

    async fn next_nonce(&self, _signer: &Address) -> Result<Nonce, LedgerError> {
        Ok(self.next_nonce.fetch_add(1, Ordering::SeqCst))
    }

    async fn submit(&self, envelope: &Envelope) -> Result<TxId, LedgerError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.reject_reason {
            return Err(LedgerError::Rejected {
                reason: reason.clone(),
            });
        }
        envelope
            .id()
            .map_err(|e| LedgerError::Unavailable(e.to_string()))
    }
}

/// Signer spy with a counted, content-dependent fake signature
struct SpySigner {
    sign_calls: AtomicUsize,
}

impl SpySigner {
    fn new() -> Self {
        Self {
            sign_calls: AtomicUsize::new(0),
        }
    }
}

impl Signer for SpySigner {
    fn address(&self) -> Address {
        Address::new([0x51; 20])
    }

    fn try_sign(&self, message: &[u8]) -> Result<Vec<u8>, SignError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        Ok(message.iter().rev().copied().collect())
    }
}

struct BincodeDecoder;

impl CurrencyDecoder for BincodeDecoder {
    fn decode_currency(&self, bytes: &[u8]) -> Result<Currency, DecodeError> {
        bincode::deserialize(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))
    }
}

fn dispatcher(ledger: Arc<SpyLedger>, signer: Arc<SpySigner>) -> ActionDispatcher {
    ActionDispatcher::new(
        ledger,
        signer,
        Arc::new(BincodeDecoder),
        &DispatchConfig::default(),
    )
}

fn avatar() -> Address {
    Address::new([0xaa; 20])
}

#[tokio::test]
async fn claim_daily_reward_returns_a_non_empty_identifier() {
    actiongate::observability::init_tracing();
    let ledger = Arc::new(SpyLedger::healthy());
    let dispatcher = dispatcher(ledger.clone(), Arc::new(SpySigner::new()));

    let tx_id = dispatcher
        .handle("claim-daily-reward", json!({ "avatarAddress": avatar().to_hex() }))
        .await
        .unwrap();
    assert!(!tx_id.to_hex().is_empty());
    assert_eq!(ledger.submit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn two_nonces_give_two_distinct_identifiers() {
    let dispatcher = dispatcher(Arc::new(SpyLedger::healthy()), Arc::new(SpySigner::new()));
    let args = json!({ "avatarAddress": avatar().to_hex() });

    let first = dispatcher
        .handle("claim-daily-reward", args.clone())
        .await
        .unwrap();
    let second = dispatcher.handle("claim-daily-reward", args).await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn typed_handle_matches_the_raw_entry_point() {
    let dispatcher = dispatcher(Arc::new(SpyLedger::healthy()), Arc::new(SpySigner::new()));
    let tx_id = dispatcher
        .handle_claim_daily_reward(ClaimDailyRewardArgs {
            avatar_address: avatar(),
        })
        .await
        .unwrap();
    assert!(!tx_id.to_hex().is_empty());
}

#[tokio::test]
async fn missing_required_argument_attempts_no_external_call() {
    let ledger = Arc::new(SpyLedger::healthy());
    let signer = Arc::new(SpySigner::new());
    let dispatcher = dispatcher(ledger.clone(), signer.clone());

    let err = dispatcher
        .handle("perform-combat-stage", json!({ "worldId": 1 }))
        .await
        .unwrap_err();
    assert_eq!(err.kind_name(), "argument");
    assert_eq!(signer.sign_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ledger.submit_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_kind_is_rejected_before_any_external_call() {
    let ledger = Arc::new(SpyLedger::healthy());
    let signer = Arc::new(SpySigner::new());
    let dispatcher = dispatcher(ledger.clone(), signer.clone());

    let err = dispatcher.handle("mint-gold", json!({})).await.unwrap_err();
    assert!(matches!(err, DispatchError::UnknownKind(ref name) if name == "mint-gold"));
    assert_eq!(signer.sign_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ledger.submit_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejection_reason_is_surfaced_verbatim_with_no_retry() {
    let ledger = Arc::new(SpyLedger::rejecting("duplicate nonce for signer"));
    let dispatcher = dispatcher(ledger.clone(), Arc::new(SpySigner::new()));

    let err = dispatcher
        .handle("claim-daily-reward", json!({ "avatarAddress": avatar().to_hex() }))
        .await
        .unwrap_err();
    match err {
        DispatchError::SubmissionRejected { reason } => {
            assert_eq!(reason, "duplicate nonce for signer");
        }
        other => panic!("wrong error: {:?}", other),
    }
    assert_eq!(ledger.submit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sell_item_submits_after_pricing_lookup() {
    let ledger = Arc::new(SpyLedger::healthy());
    let signer = Arc::new(SpySigner::new());
    let dispatcher = dispatcher(ledger.clone(), signer.clone());

    let tx_id = dispatcher
        .handle_sell_item(SellItemArgs {
            seller_avatar_address: avatar(),
            item_id: ItemId::nil(),
            price: 100,
        })
        .await
        .unwrap();
    assert!(!tx_id.to_hex().is_empty());
    assert_eq!(signer.sign_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ledger.submit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dispatch_with_the_real_keystore_verifies_round_trip() {
    let keystore = Arc::new(Ed25519Keystore::from_signing_key(
        ed25519_dalek::SigningKey::from_bytes(&[42u8; 32]),
    ));
    let ledger = Arc::new(SpyLedger::healthy());
    let dispatcher = ActionDispatcher::new(
        ledger.clone(),
        keystore,
        Arc::new(BincodeDecoder),
        &DispatchConfig::default(),
    );

    let tx_id = dispatcher
        .handle("claim-daily-reward", json!({ "avatarAddress": avatar().to_hex() }))
        .await
        .unwrap();
    assert!(!tx_id.to_hex().is_empty());
    assert_eq!(ledger.submit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sell_item_decode_failure_never_reaches_the_signer() {
    let ledger = Arc::new(SpyLedger::healthy().without_currency_record());
    let signer = Arc::new(SpySigner::new());
    let dispatcher = dispatcher(ledger.clone(), signer.clone());

    let err = dispatcher
        .handle(
            "sell-item",
            json!({
                "sellerAvatarAddress": avatar().to_hex(),
                "itemId": ItemId::nil(),
                "price": 100,
            }),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind_name(), "state_decode");
    assert_eq!(signer.sign_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ledger.submit_calls.load(Ordering::SeqCst), 0);
}
