//! Key custody seam and the node's local Ed25519 keystore
//!
//! The private key never leaves the custody component; the assembler only
//! ever hands over bytes to sign. The node's address is the tail of the
//! SHA-256 digest of the verifying key.

use crate::types::{Address, ADDRESS_LEN};
use ed25519_dalek::{Signer as DalekSigner, SigningKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Ed25519 signature length in bytes
pub const SIGNATURE_LEN: usize = 64;

/// Failures from the key custody component
#[derive(Debug, Clone, Error)]
pub enum SignError {
    #[error("key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("signing failed: {0}")]
    Failed(String),
}

/// Signs bytes on behalf of the node's long-lived identity
pub trait Signer: Send + Sync {
    /// The address this signer signs for
    fn address(&self) -> Address;

    /// Sign `message` with the node's private key
    fn try_sign(&self, message: &[u8]) -> Result<Vec<u8>, SignError>;
}

/// Local file-backed Ed25519 keystore
#[derive(Debug)]
pub struct Ed25519Keystore {
    signing_key: SigningKey,
    address: Address,
}

impl Ed25519Keystore {
    /// Load a keypair file: either 64 raw bytes or a JSON array of 64 bytes
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("failed to read keypair file {}: {}", path, e))?;

        let bytes: Vec<u8> = if raw.len() == 64 {
            raw
        } else {
            serde_json::from_slice(&raw)
                .map_err(|e| anyhow::anyhow!("failed to parse keypair JSON: {}", e))?
        };

        if bytes.len() != 64 {
            anyhow::bail!("invalid keypair length: expected 64 bytes, got {}", bytes.len());
        }
        if bytes.iter().all(|&b| b == 0) {
            anyhow::bail!("invalid keypair: all-zero key rejected");
        }

        let arr: [u8; 64] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| anyhow::anyhow!("invalid keypair bytes"))?;
        let signing_key = SigningKey::from_keypair_bytes(&arr)
            .map_err(|e| anyhow::anyhow!("invalid keypair bytes: {}", e))?;
        Ok(Self::from_signing_key(signing_key))
    }

    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = derive_address(signing_key.verifying_key().as_bytes());
        Self {
            signing_key,
            address,
        }
    }
}

impl Signer for Ed25519Keystore {
    fn address(&self) -> Address {
        self.address
    }

    fn try_sign(&self, message: &[u8]) -> Result<Vec<u8>, SignError> {
        let signature = self
            .signing_key
            .try_sign(message)
            .map_err(|e| SignError::Failed(e.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }
}

/// Derive the account address from a verifying key
fn derive_address(verifying_key: &[u8]) -> Address {
    let digest = Sha256::digest(verifying_key);
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes.copy_from_slice(&digest[digest.len() - ADDRESS_LEN..]);
    Address::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    #[test]
    fn address_is_stable_for_a_key() {
        let a = Ed25519Keystore::from_signing_key(test_key());
        let b = Ed25519Keystore::from_signing_key(test_key());
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn signatures_verify_and_are_deterministic() {
        let store = Ed25519Keystore::from_signing_key(test_key());
        let msg = b"unsigned envelope content";
        let sig1 = store.try_sign(msg).unwrap();
        let sig2 = store.try_sign(msg).unwrap();
        assert_eq!(sig1, sig2);
        assert_eq!(sig1.len(), SIGNATURE_LEN);
    }

    #[test]
    fn loads_raw_keypair_file() {
        let key = test_key();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&key.to_keypair_bytes()).unwrap();

        let store = Ed25519Keystore::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            store.address(),
            Ed25519Keystore::from_signing_key(key).address()
        );
    }

    #[test]
    fn loads_json_keypair_file() {
        let key = test_key();
        let json = serde_json::to_vec(&key.to_keypair_bytes().to_vec()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&json).unwrap();

        let store = Ed25519Keystore::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            store.address(),
            Ed25519Keystore::from_signing_key(key).address()
        );
    }

    #[test]
    fn rejects_all_zero_keypair() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 64]).unwrap();

        let err = Ed25519Keystore::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("all-zero"));
    }
}
