//! Username model
//!
//! A username is the opaque, case-sensitive key for one user's ledger. It is
//! fixed at sign-up and doubles as the vault file stem, so the allowed
//! alphabet is restricted to characters that are safe in a filename.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{VaultError, VaultResult};

/// Maximum length of a username in characters
pub const MAX_USERNAME_LEN: usize = 30;

/// Immutable identity token for one user's ledger
///
/// Comparison is case-sensitive: "Alice" and "alice" are different users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a validated username
    ///
    /// Allowed: ASCII letters, digits, `_` and `-`; 1 to 30 characters.
    pub fn new(name: impl Into<String>) -> VaultResult<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(VaultError::Validation("Username cannot be empty".into()));
        }

        if name.len() > MAX_USERNAME_LEN {
            return Err(VaultError::Validation(format!(
                "Username too long ({} chars, max {})",
                name.len(),
                MAX_USERNAME_LEN
            )));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(VaultError::Validation(format!(
                "Username '{}' may only contain letters, digits, '_' and '-'",
                name
            )));
        }

        Ok(Self(name))
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Username {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Username {
    type Error = VaultError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
