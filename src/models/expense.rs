//! Expense model
//!
//! A single spending record. Two expenses are considered "the same expense"
//! when their identity fields (name, amount, date) match; category and remark
//! are descriptive and excluded from identity. The projection lives in
//! [`Expense::identity`] so call sites cannot accidentally use full equality
//! where identity equality is required.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Maximum length of an expense name in characters
pub const MAX_NAME_LEN: usize = 60;

/// A single spending record in a user's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// What the money was spent on
    pub name: String,

    /// Amount spent (never negative)
    pub amount: Money,

    /// Date of the expense
    pub date: NaiveDate,

    /// Category tag (free text, may or may not have a budget cap)
    pub category: String,

    /// Free-text remark
    #[serde(default)]
    pub remark: String,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

/// The identity subset of an expense's fields
///
/// Equality of two keys means the expenses represent the same purchase for
/// duplicate-detection and replace purposes, regardless of how they are
/// categorized or annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpenseKey<'a> {
    pub name: &'a str,
    pub amount: Money,
    pub date: NaiveDate,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            amount,
            date,
            category: category.into(),
            remark: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new expense with a remark
    pub fn with_remark(
        name: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: impl Into<String>,
        remark: impl Into<String>,
    ) -> Self {
        let mut expense = Self::new(name, amount, date, category);
        expense.remark = remark.into();
        expense
    }

    /// The identity projection of this expense
    pub fn identity(&self) -> ExpenseKey<'_> {
        ExpenseKey {
            name: &self.name,
            amount: self.amount,
            date: self.date,
        }
    }

    /// Check whether two expenses represent the same purchase
    ///
    /// Weaker than full equality: category, remark and timestamps may differ.
    pub fn is_same_expense(&self, other: &Expense) -> bool {
        self.identity() == other.identity()
    }

    /// Update the mutable fields, stamping `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }

        if self.name.len() > MAX_NAME_LEN {
            return Err(ExpenseValidationError::NameTooLong(self.name.len()));
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Expense name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative: {}", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new("Lunch", Money::from_cents(1250), test_date(), "Food");
        assert_eq!(expense.name, "Lunch");
        assert_eq!(expense.amount.cents(), 1250);
        assert_eq!(expense.category, "Food");
        assert!(expense.remark.is_empty());
    }

    #[test]
    fn test_identity_excludes_category_and_remark() {
        let a = Expense::new("Lunch", Money::from_cents(1250), test_date(), "Food");
        let b = Expense::with_remark(
            "Lunch",
            Money::from_cents(1250),
            test_date(),
            "Work",
            "client meeting",
        );

        assert!(a.is_same_expense(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_identity_includes_amount_and_date() {
        let a = Expense::new("Lunch", Money::from_cents(1250), test_date(), "Food");

        let cheaper = Expense::new("Lunch", Money::from_cents(1000), test_date(), "Food");
        assert!(!a.is_same_expense(&cheaper));

        let other_day = Expense::new(
            "Lunch",
            Money::from_cents(1250),
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            "Food",
        );
        assert!(!a.is_same_expense(&other_day));
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new("Lunch", Money::from_cents(1250), test_date(), "Food");
        assert!(expense.validate().is_ok());

        expense.name = String::new();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyName));

        expense.name = "a".repeat(61);
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NameTooLong(_))
        ));

        expense.name = "Lunch".to_string();
        expense.amount = Money::from_cents(-1);
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_display() {
        let expense = Expense::new("Lunch", Money::from_cents(1250), test_date(), "Food");
        assert_eq!(format!("{}", expense), "2025-03-14 Lunch $12.50");
    }

    #[test]
    fn test_serialization() {
        let expense = Expense::with_remark(
            "Lunch",
            Money::from_cents(1250),
            test_date(),
            "Food",
            "with colleagues",
        );
        let json = serde_json::to_string(&expense).unwrap();
        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense, deserialized);
    }
}
