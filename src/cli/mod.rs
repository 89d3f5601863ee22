//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the session and storage layers. Handlers
//! render command results; the core only produces structured errors.

pub mod budget;
pub mod expense;
pub mod user;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use user::{handle_user_command, UserCommands};

use crate::audit::AuditLogger;
use crate::config::{Settings, VaultPaths};
use crate::crypto::{derive_key, DerivedKey, SecureString};
use crate::error::{VaultError, VaultResult};
use crate::storage::LedgerStore;

/// Environment variable consulted before prompting for the passphrase
pub const PASSPHRASE_ENV: &str = "SPENDVAULT_PASSPHRASE";

/// Shared state every command handler needs
pub struct CliContext {
    pub paths: VaultPaths,
    pub settings: Settings,
    pub store: LedgerStore,
    pub audit: AuditLogger,
}

impl CliContext {
    /// Resolve paths, load settings, and open the vault store
    pub fn init() -> VaultResult<Self> {
        let paths = VaultPaths::new()?;
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(&paths)?;
        let store = LedgerStore::new(paths.vaults_dir())?;
        let audit = AuditLogger::new(paths.audit_log());

        Ok(Self {
            paths,
            settings,
            store,
            audit,
        })
    }

    /// Derive the installation key from the passphrase
    ///
    /// The passphrase comes from `SPENDVAULT_PASSPHRASE` when set (scripted
    /// use) and an interactive prompt otherwise. Key derivation parameters
    /// are generated and persisted on first use; the key itself exists only
    /// for the duration of the command.
    pub fn obtain_key(&mut self) -> VaultResult<DerivedKey> {
        let passphrase = match std::env::var(PASSPHRASE_ENV) {
            Ok(value) => SecureString::new(value),
            Err(_) => {
                let value = rpassword::prompt_password("Vault passphrase: ")
                    .map_err(|e| VaultError::Io(format!("Failed to read passphrase: {}", e)))?;
                SecureString::new(value)
            }
        };

        if passphrase.is_empty() {
            return Err(VaultError::Validation("Passphrase cannot be empty".into()));
        }

        let first_use = self.settings.key_params.is_none();
        let params = self.settings.key_params_or_init().clone();
        if first_use {
            self.settings.save(&self.paths)?;
        }

        derive_key(passphrase.as_str(), &params)
    }
}
