//! Key derivation using Argon2id
//!
//! Derives the vault encryption key from the installation passphrase using
//! Argon2id, a memory-hard key derivation function resistant to GPU/ASIC
//! attacks. The derivation parameters (including the per-installation salt)
//! are stored in the settings file; the derived key itself never is.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, Params,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{VaultError, VaultResult};

/// Parameters for key derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// Salt for key derivation (base64 encoded)
    pub salt: String,
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub memory_cost: u32,
    /// Time cost (iterations, default: 3)
    pub time_cost: u32,
    /// Parallelism degree (default: 4)
    pub parallelism: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            salt: String::new(), // Generated on first use
            memory_cost: 65536,  // 64 MiB
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl KeyDerivationParams {
    /// Create new params with a random salt
    pub fn new() -> Self {
        let salt = SaltString::generate(&mut OsRng);
        Self {
            salt: salt.to_string(),
            ..Default::default()
        }
    }

    /// Create params with specific values
    pub fn with_values(salt: String, memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            salt,
            memory_cost,
            time_cost,
            parallelism,
        }
    }
}

/// A derived encryption key
///
/// Held only for the duration of the encrypt/decrypt calls that need it;
/// zeroed on drop and never serialized.
pub struct DerivedKey {
    /// The 32-byte key for AES-256
    key: [u8; 32],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").finish_non_exhaustive()
    }
}

/// Derive an encryption key from a passphrase
pub fn derive_key(passphrase: &str, params: &KeyDerivationParams) -> VaultResult<DerivedKey> {
    // Parse the salt
    let salt = SaltString::from_b64(&params.salt)
        .map_err(|e| VaultError::Encryption(format!("Invalid salt: {}", e)))?;

    // Configure Argon2id with custom params
    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(32), // Output length for AES-256
    )
    .map_err(|e| VaultError::Encryption(format!("Invalid Argon2 parameters: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    // Derive the key by hashing the password
    let hash = argon2
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| VaultError::Encryption(format!("Key derivation failed: {}", e)))?;

    // Extract the hash output (the actual derived key)
    let hash_output = hash
        .hash
        .ok_or_else(|| VaultError::Encryption("No hash output generated".to_string()))?;

    let hash_bytes = hash_output.as_bytes();

    if hash_bytes.len() < 32 {
        return Err(VaultError::Encryption(
            "Hash output too short for AES-256 key".to_string(),
        ));
    }

    let mut key = [0u8; 32];
    key.copy_from_slice(&hash_bytes[..32]);

    Ok(DerivedKey { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key() {
        let params = KeyDerivationParams::new();
        let key = derive_key("test_passphrase", &params).unwrap();
        assert_eq!(key.as_bytes().len(), 32);
    }

    #[test]
    fn test_same_passphrase_same_key() {
        let params = KeyDerivationParams::new();
        let key1 = derive_key("test_passphrase", &params).unwrap();
        let key2 = derive_key("test_passphrase", &params).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let params = KeyDerivationParams::new();
        let key1 = derive_key("passphrase1", &params).unwrap();
        let key2 = derive_key("passphrase2", &params).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let params1 = KeyDerivationParams::new();
        let params2 = KeyDerivationParams::new();
        let key1 = derive_key("same_passphrase", &params1).unwrap();
        let key2 = derive_key("same_passphrase", &params2).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let params = KeyDerivationParams::new();
        let key = derive_key("test_passphrase", &params).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains("key:"));
    }
}
