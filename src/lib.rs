//! spendvault - Terminal-based personal expense tracker with encrypted
//! per-user ledgers
//!
//! This library provides the core functionality for the spendvault
//! application. Each registered user owns one ledger of expenses plus a
//! budget book (a total cap and per-category caps that may never sum past
//! it). Ledgers are serialized to JSON, encrypted with AES-256-GCM under a
//! key derived from the installation passphrase, and stored one vault file
//! per user.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, expenses, budgets, ledgers)
//! - `crypto`: Key derivation and vault encryption
//! - `storage`: Encrypted vault file storage layer
//! - `services`: Active-session business logic
//! - `audit`: Audit logging system
//! - `display`: Terminal rendering of ledger views
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use spendvault::crypto::{derive_key, KeyDerivationParams};
//! use spendvault::models::{CategoryPolicy, Username};
//! use spendvault::services::Session;
//! use spendvault::storage::LedgerStore;
//!
//! let store = LedgerStore::new("./vaults")?;
//! let key = derive_key("passphrase", &KeyDerivationParams::new())?;
//! let alice = Username::new("alice")?;
//! let mut session = Session::sign_up(&store, &key, &alice, CategoryPolicy::AllowUnknown)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::VaultError;
