//! Path management for spendvault
//!
//! Provides platform-appropriate path resolution for the settings file, the
//! vault directory, and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDVAULT_DATA_DIR` environment variable (if set)
//! 2. The platform config directory via `directories` (e.g.
//!    `~/.config/spendvault` on Linux, `%APPDATA%\spendvault` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::VaultError;

/// Manages all paths used by spendvault
#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// Base directory for all spendvault data
    base_dir: PathBuf,
}

impl VaultPaths {
    /// Create a new VaultPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, VaultError> {
        let base_dir = if let Ok(custom) = std::env::var("SPENDVAULT_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            let dirs = ProjectDirs::from("", "", "spendvault").ok_or_else(|| {
                VaultError::Config("Could not determine a config directory".into())
            })?;
            dirs.config_dir().to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create VaultPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the directory holding the per-user vault files
    pub fn vaults_dir(&self) -> PathBuf {
        self.base_dir.join("vaults")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), VaultError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.vaults_dir())
            .map_err(|e| VaultError::Io(format!("Failed to create vault directory: {}", e)))?;

        Ok(())
    }

    /// Check if spendvault has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.vaults_dir(), temp_dir.path().join("vaults"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.vaults_dir().exists());
        assert!(!paths.is_initialized());
    }
}
