//! Custom error types for spendvault
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every failure is recoverable at the
//! command layer: a failed operation leaves the ledger unchanged.

use thiserror::Error;

/// The main error type for spendvault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// An expense with the same identity (name, amount, date) already exists
    #[error("An expense with the same name, amount and date already exists")]
    DuplicateExpense,

    /// The targeted expense is not in the ledger
    #[error("Expense not found in the ledger")]
    ExpenseNotFound,

    /// A budget cap for this category already exists
    #[error("Category '{0}' already has a budget cap")]
    DuplicateCategory(String),

    /// No budget cap exists for this category
    #[error("Category '{0}' has no budget cap")]
    CategoryNotFound(String),

    /// The new total budget is smaller than the caps already handed out
    #[error("Total budget {total} is below the sum of category caps {category_sum}")]
    TotalBelowCategorySum { total: i64, category_sum: i64 },

    /// Adding or raising this category cap would push the sum past the total
    #[error("Category caps would sum to {category_sum}, exceeding the total budget {total}")]
    CategoryBudgetExceedsTotal { total: i64, category_sum: i64 },

    /// Authentication tag did not verify: wrong key or corrupted vault
    #[error("Vault could not be decrypted: wrong key or corrupted data")]
    InvalidKey,

    /// Decrypted bytes do not parse to a valid ledger
    #[error("Decrypted vault does not contain a valid ledger: {0}")]
    MalformedLedger(String),

    /// A vault already exists for this username
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    /// No vault exists for this username
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Encryption errors other than tag verification failures
    #[error("Encryption error: {0}")]
    Encryption(String),
}

impl VaultError {
    /// Create a "duplicate category" error
    pub fn duplicate_category(category: impl Into<String>) -> Self {
        Self::DuplicateCategory(category.into())
    }

    /// Create a "category not found" error
    pub fn category_not_found(category: impl Into<String>) -> Self {
        Self::CategoryNotFound(category.into())
    }

    /// Create a "user already exists" error
    pub fn user_already_exists(username: impl Into<String>) -> Self {
        Self::UserAlreadyExists(username.into())
    }

    /// Create a "user not found" error
    pub fn user_not_found(username: impl Into<String>) -> Self {
        Self::UserNotFound(username.into())
    }

    /// Check if this is one of the "not found" errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ExpenseNotFound | Self::CategoryNotFound(_) | Self::UserNotFound(_)
        )
    }

    /// Check if this is one of the duplicate errors
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::DuplicateExpense | Self::DuplicateCategory(_) | Self::UserAlreadyExists(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for spendvault operations
pub type VaultResult<T> = Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_category_errors() {
        let err = VaultError::duplicate_category("Food");
        assert_eq!(err.to_string(), "Category 'Food' already has a budget cap");
        assert!(err.is_duplicate());

        let err = VaultError::category_not_found("Fun");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_budget_sum_error() {
        let err = VaultError::CategoryBudgetExceedsTotal {
            total: 10000,
            category_sum: 11000,
        };
        assert_eq!(
            err.to_string(),
            "Category caps would sum to 11000, exceeding the total budget 10000"
        );
    }

    #[test]
    fn test_user_errors() {
        let err = VaultError::user_already_exists("alice");
        assert_eq!(err.to_string(), "User already exists: alice");

        let err = VaultError::user_not_found("bob");
        assert_eq!(err.to_string(), "User not found: bob");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let vault_err: VaultError = io_err.into();
        assert!(matches!(vault_err, VaultError::Io(_)));
    }
}
