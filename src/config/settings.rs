//! User settings for spendvault
//!
//! Manages installation-wide preferences: the key derivation parameters for
//! the vault encryption key, the category policy for new expenses, and
//! display preferences. The derived key itself is never stored, only the
//! parameters needed to re-derive it from the passphrase.

use serde::{Deserialize, Serialize};

use super::paths::VaultPaths;
use crate::crypto::key_derivation::KeyDerivationParams;
use crate::error::VaultError;
use crate::models::CategoryPolicy;
use crate::storage::file_io::write_json_atomic;

/// Installation settings for spendvault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Key derivation parameters (salt, memory cost, etc.)
    ///
    /// Generated on first run; without these the vaults cannot be opened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_params: Option<KeyDerivationParams>,

    /// Reject expenses whose category has no budget cap
    #[serde(default)]
    pub strict_categories: bool,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            key_params: None,
            strict_categories: false,
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// The category policy implied by these settings
    pub fn category_policy(&self) -> CategoryPolicy {
        if self.strict_categories {
            CategoryPolicy::RequireBudgeted
        } else {
            CategoryPolicy::AllowUnknown
        }
    }

    /// Key derivation parameters, generating and remembering a fresh salt on
    /// first use
    pub fn key_params_or_init(&mut self) -> &KeyDerivationParams {
        self.key_params
            .get_or_insert_with(KeyDerivationParams::new)
    }

    /// Load settings from disk, or create default settings if the file
    /// doesn't exist yet
    pub fn load_or_create(paths: &VaultPaths) -> Result<Self, VaultError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| VaultError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| VaultError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VaultPaths) -> Result<(), VaultError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert!(settings.key_params.is_none());
        assert!(!settings.strict_categories);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.category_policy(), CategoryPolicy::AllowUnknown);
    }

    #[test]
    fn test_strict_categories_policy() {
        let settings = Settings {
            strict_categories: true,
            ..Default::default()
        };
        assert_eq!(settings.category_policy(), CategoryPolicy::RequireBudgeted);
    }

    #[test]
    fn test_key_params_or_init_is_stable() {
        let mut settings = Settings::default();
        let salt = settings.key_params_or_init().salt.clone();
        assert!(!salt.is_empty());

        // A second call must return the same salt, not a fresh one
        assert_eq!(settings.key_params_or_init().salt, salt);
    }

    #[test]
    fn test_load_or_create_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        // First load creates defaults without writing
        let mut settings = Settings::load_or_create(&paths).unwrap();
        assert!(!paths.is_initialized());

        settings.key_params_or_init();
        settings.strict_categories = true;
        settings.save(&paths).unwrap();
        assert!(paths.is_initialized());

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert!(reloaded.strict_categories);
        assert_eq!(
            reloaded.key_params.unwrap().salt,
            settings.key_params.unwrap().salt
        );
    }
}
