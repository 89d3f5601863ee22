//! Ledger store
//!
//! Persists one encrypted vault file per user under a single directory.
//! The file stem is the username, and the clear-text header inside the file
//! repeats it, so lookups never require decryption. Writes go through the
//! atomic temp-file-then-rename path; a crashed save never leaves a corrupt
//! vault at the canonical location.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::crypto::{codec, DerivedKey, VaultFile};
use crate::error::{VaultError, VaultResult};
use crate::models::{Ledger, Username};

use super::file_io::{read_json_required, write_json_atomic};

/// File extension for persisted vaults
const VAULT_EXTENSION: &str = "vault";

/// A vault that could not be opened during a bulk load
#[derive(Debug)]
pub struct SkippedVault {
    /// Path of the offending file
    pub path: PathBuf,
    /// Username from the clear-text header, when the file parsed that far
    pub username: Option<Username>,
    /// Why the vault was skipped
    pub error: VaultError,
}

/// Result of loading every vault in the store directory
///
/// A vault that fails to decrypt or parse is reported in `skipped` instead
/// of failing the whole load; the session simply sees fewer accounts.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully opened ledgers, keyed by owner
    pub ledgers: HashMap<Username, Ledger>,
    /// Vaults that were present but unusable
    pub skipped: Vec<SkippedVault>,
}

/// Maps usernames to encrypted vault files on disk
pub struct LedgerStore {
    dir: PathBuf,
}

impl LedgerStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> VaultResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            VaultError::Storage(format!(
                "Failed to create vault directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    /// The directory holding the vault files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Canonical path of one user's vault file
    pub fn vault_path(&self, username: &Username) -> PathBuf {
        self.dir
            .join(format!("{}.{}", username.as_str(), VAULT_EXTENSION))
    }

    /// True if a vault exists for this username
    pub fn exists(&self, username: &Username) -> bool {
        self.vault_path(username).exists()
    }

    /// Usernames of all persisted vaults, from the clear-text headers
    ///
    /// Never decrypts; unreadable files are silently left out here and show
    /// up as skipped entries in [`LedgerStore::load_all`] instead.
    pub fn usernames(&self) -> VaultResult<Vec<Username>> {
        let mut names = Vec::new();
        for path in self.vault_files()? {
            if let Ok(file) = read_json_required::<VaultFile, _>(&path) {
                names.push(file.username);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load one user's ledger
    ///
    /// Fails with [`VaultError::UserNotFound`] if no vault exists for the
    /// username; decryption failures surface as [`VaultError::InvalidKey`].
    pub fn load(&self, username: &Username, key: &DerivedKey) -> VaultResult<Ledger> {
        let path = self.vault_path(username);
        if !path.exists() {
            return Err(VaultError::user_not_found(username.as_str()));
        }

        let file: VaultFile = read_json_required(&path)?;
        codec::open(&file, key)
    }

    /// Load every vault in the store directory
    ///
    /// Each file is read and decrypted independently; a vault with a bad
    /// authentication tag, unparsable contents, or an unreadable envelope is
    /// recorded in the report's `skipped` list rather than aborting the load.
    pub fn load_all(&self, key: &DerivedKey) -> VaultResult<LoadReport> {
        let mut report = LoadReport::default();

        for path in self.vault_files()? {
            let file: VaultFile = match read_json_required(&path) {
                Ok(file) => file,
                Err(error) => {
                    report.skipped.push(SkippedVault {
                        path,
                        username: None,
                        error,
                    });
                    continue;
                }
            };

            match codec::open(&file, key) {
                Ok(ledger) => {
                    report.ledgers.insert(ledger.username().clone(), ledger);
                }
                Err(error) => {
                    report.skipped.push(SkippedVault {
                        path,
                        username: Some(file.username),
                        error,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Create and persist an empty ledger for a new user
    ///
    /// Fails with [`VaultError::UserAlreadyExists`] if the username already
    /// has a vault.
    pub fn create_if_absent(&self, username: &Username, key: &DerivedKey) -> VaultResult<Ledger> {
        if self.exists(username) {
            return Err(VaultError::user_already_exists(username.as_str()));
        }

        let ledger = Ledger::new(username.clone());
        self.save(&ledger, key)?;
        Ok(ledger)
    }

    /// Encrypt and persist a ledger, overwriting any previous vault
    pub fn save(&self, ledger: &Ledger, key: &DerivedKey) -> VaultResult<()> {
        let file = codec::seal(ledger, key)?;
        write_json_atomic(self.vault_path(ledger.username()), &file)
    }

    /// Remove a user's vault from disk
    ///
    /// Fails with [`VaultError::UserNotFound`] if no vault exists.
    pub fn delete(&self, username: &Username) -> VaultResult<()> {
        let path = self.vault_path(username);
        if !path.exists() {
            return Err(VaultError::user_not_found(username.as_str()));
        }

        fs::remove_file(&path).map_err(|e| {
            VaultError::Storage(format!("Failed to delete {}: {}", path.display(), e))
        })
    }

    fn vault_files(&self) -> VaultResult<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            VaultError::Storage(format!(
                "Failed to read vault directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| VaultError::Storage(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(VAULT_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}
