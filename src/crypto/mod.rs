//! Cryptographic functions for spendvault
//!
//! Provides AES-256-GCM encryption with Argon2id key derivation for the
//! at-rest encryption of per-user ledger vaults.

pub mod codec;
pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use codec::{open, seal, VaultFile};
pub use encryption::{decrypt, encrypt, EncryptedData};
pub use key_derivation::{derive_key, DerivedKey, KeyDerivationParams};
pub use secure_memory::SecureString;
