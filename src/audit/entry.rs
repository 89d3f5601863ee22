//! Audit entry data structures
//!
//! Defines the structure of audit log entries. The audit log is stored in
//! clear text next to the encrypted vaults, so entries name the operation
//! and the entity but never carry amounts, remarks, or ledger snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
    /// Entity was present but skipped during a load
    Skip,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Skip => write!(f, "SKIP"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    User,
    Expense,
    TotalBudget,
    CategoryBudget,
    Vault,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::User => write!(f, "User"),
            EntityType::Expense => write!(f, "Expense"),
            EntityType::TotalBudget => write!(f, "TotalBudget"),
            EntityType::CategoryBudget => write!(f, "CategoryBudget"),
            EntityType::Vault => write!(f, "Vault"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// User whose ledger was affected
    pub username: String,

    /// Short human-readable context (e.g. a category name or a skip reason)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry
    pub fn new(
        operation: Operation,
        entity_type: EntityType,
        username: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            username: username.into(),
            detail,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.username
        );

        if let Some(detail) = &self.detail {
            output.push_str(&format!(" ({})", detail));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
        assert_eq!(Operation::Skip.to_string(), "SKIP");
    }

    #[test]
    fn test_entity_type_display() {
        assert_eq!(EntityType::User.to_string(), "User");
        assert_eq!(EntityType::CategoryBudget.to_string(), "CategoryBudget");
    }

    #[test]
    fn test_new_entry() {
        let entry = AuditEntry::new(
            Operation::Create,
            EntityType::Expense,
            "alice",
            Some("Food".to_string()),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Expense);
        assert_eq!(entry.username, "alice");
        assert_eq!(entry.detail, Some("Food".to_string()));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::new(Operation::Skip, EntityType::Vault, "carol", None);

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Skip);
        assert_eq!(deserialized.entity_type, EntityType::Vault);
        assert_eq!(deserialized.username, "carol");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::new(
            Operation::Update,
            EntityType::CategoryBudget,
            "alice",
            Some("Food".to_string()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE"));
        assert!(formatted.contains("CategoryBudget"));
        assert!(formatted.contains("alice"));
        assert!(formatted.contains("Food"));
    }
}
