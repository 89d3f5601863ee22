//! Ledger sealing and opening
//!
//! Converts between a [`Ledger`] and its at-rest form: a [`VaultFile`]
//! holding the owner's username in clear (the store's lookup key) next to
//! the AES-256-GCM ciphertext of the JSON-serialized ledger. JSON framing
//! plus the AEAD tag make the serialized length explicit; there is no
//! ambiguous padding or truncation to go wrong silently.

use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};
use crate::models::{Ledger, Username};

use super::encryption::{decrypt, encrypt, EncryptedData};
use super::DerivedKey;

/// One user's encrypted, serialized ledger as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultFile {
    /// Owner of the sealed ledger, stored in clear as the lookup key
    pub username: Username,

    /// Encrypted ledger bytes with nonce and authentication tag
    pub data: EncryptedData,
}

/// Serialize and encrypt a ledger
pub fn seal(ledger: &Ledger, key: &DerivedKey) -> VaultResult<VaultFile> {
    let plaintext = serde_json::to_vec(ledger)
        .map_err(|e| VaultError::Json(format!("Failed to serialize ledger: {}", e)))?;

    let data = encrypt(&plaintext, key)?;

    Ok(VaultFile {
        username: ledger.username().clone(),
        data,
    })
}

/// Decrypt and parse a vault file back into a ledger
///
/// Fails with [`VaultError::InvalidKey`] when the authentication tag does
/// not verify, and [`VaultError::MalformedLedger`] when the decrypted bytes
/// do not parse to a ledger or the ledger belongs to a different user than
/// the clear-text header claims.
pub fn open(file: &VaultFile, key: &DerivedKey) -> VaultResult<Ledger> {
    let plaintext = decrypt(&file.data, key)?;

    let ledger: Ledger = serde_json::from_slice(&plaintext)
        .map_err(|e| VaultError::MalformedLedger(e.to_string()))?;

    if ledger.username() != &file.username {
        return Err(VaultError::MalformedLedger(format!(
            "vault header names '{}' but the sealed ledger belongs to '{}'",
            file.username,
            ledger.username()
        )));
    }

    Ok(ledger)
}
