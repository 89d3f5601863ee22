//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated encryption for vaults at rest. Each encryption
//! operation generates a unique nonce. An authentication tag that does not
//! verify surfaces as [`VaultError::InvalidKey`]: that is the designed
//! mechanism by which a wrong key or a tampered file is detected, so callers
//! match on it rather than catching a generic decoding failure.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Encrypted data with associated metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// The nonce used for this encryption (base64 encoded)
    pub nonce: String,
    /// The encrypted ciphertext with authentication tag (base64 encoded)
    pub ciphertext: String,
    /// Version for future algorithm upgrades
    #[serde(default = "default_version")]
    pub version: u8,
}

fn default_version() -> u8 {
    1
}

impl EncryptedData {
    /// Create a new EncryptedData from raw bytes
    fn new(nonce: &[u8], ciphertext: &[u8]) -> Self {
        use base64::{engine::general_purpose::STANDARD, Engine};
        Self {
            nonce: STANDARD.encode(nonce),
            ciphertext: STANDARD.encode(ciphertext),
            version: 1,
        }
    }

    /// Decode the nonce from base64
    fn decode_nonce(&self) -> VaultResult<Vec<u8>> {
        use base64::{engine::general_purpose::STANDARD, Engine};
        STANDARD
            .decode(&self.nonce)
            .map_err(|e| VaultError::Encryption(format!("Invalid nonce encoding: {}", e)))
    }

    /// Decode the ciphertext from base64
    fn decode_ciphertext(&self) -> VaultResult<Vec<u8>> {
        use base64::{engine::general_purpose::STANDARD, Engine};
        STANDARD
            .decode(&self.ciphertext)
            .map_err(|e| VaultError::Encryption(format!("Invalid ciphertext encoding: {}", e)))
    }
}

/// Encrypt plaintext data using AES-256-GCM
///
/// Generates a random nonce for each encryption operation.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> VaultResult<EncryptedData> {
    // Create cipher from key
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?;

    // Generate random nonce
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // Encrypt
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| VaultError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok(EncryptedData::new(&nonce_bytes, &ciphertext))
}

/// Decrypt ciphertext using AES-256-GCM
///
/// Fails with [`VaultError::InvalidKey`] when the authentication tag does
/// not verify (wrong key or corrupted bytes).
pub fn decrypt(encrypted: &EncryptedData, key: &DerivedKey) -> VaultResult<Vec<u8>> {
    // Verify version
    if encrypted.version != 1 {
        return Err(VaultError::Encryption(format!(
            "Unsupported encryption version: {}",
            encrypted.version
        )));
    }

    // Create cipher from key
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?;

    // Decode nonce and ciphertext
    let nonce_bytes = encrypted.decode_nonce()?;
    if nonce_bytes.len() != NONCE_SIZE {
        return Err(VaultError::Encryption(format!(
            "Invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce_bytes.len()
        )));
    }
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = encrypted.decode_ciphertext()?;

    // Decrypt; an AEAD failure means the tag did not verify
    let plaintext = cipher
        .decrypt(nonce, ciphertext.as_ref())
        .map_err(|_| VaultError::InvalidKey)?;

    Ok(plaintext)
}
