//! Budget book model
//!
//! One total spending cap plus per-category sub-caps. The caps obey a single
//! invariant: the category caps never sum past the total. Every mutation
//! checks the would-be state before applying anything, so a rejected change
//! leaves the book exactly as it was.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{VaultError, VaultResult};

use super::money::Money;

/// A spending cap for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    /// Category name, unique within a budget book
    pub category: String,

    /// Maximum to spend in this category (never negative)
    pub cap: Money,
}

impl CategoryBudget {
    /// Create a new category budget
    pub fn new(category: impl Into<String>, cap: Money) -> Self {
        Self {
            category: category.into(),
            cap,
        }
    }
}

impl fmt::Display for CategoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.cap)
    }
}

/// Total budget plus category sub-caps, kept consistent on every mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BudgetBookData", into = "BudgetBookData")]
pub struct BudgetBook {
    total: Money,
    categories: Vec<CategoryBudget>,
}

/// Raw serialized shape, validated back into a BudgetBook on load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BudgetBookData {
    total: Money,
    categories: Vec<CategoryBudget>,
}

impl BudgetBook {
    /// Create a budget book with a zero total and no category caps
    pub fn new() -> Self {
        Self::default()
    }

    /// The total spending cap
    pub fn total(&self) -> Money {
        self.total
    }

    /// Category caps in insertion order
    pub fn category_budgets(&self) -> &[CategoryBudget] {
        &self.categories
    }

    /// Sum of all category caps
    pub fn category_sum(&self) -> Money {
        self.categories.iter().map(|c| c.cap).sum()
    }

    /// Portion of the total not yet handed out to categories
    pub fn unallocated(&self) -> Money {
        self.total - self.category_sum()
    }

    /// The cap for one category, if it has one
    pub fn cap_for(&self, category: &str) -> Option<Money> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.cap)
    }

    /// True if the category has a cap
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.category == category)
    }

    /// Set the total spending cap
    ///
    /// Fails with [`VaultError::TotalBelowCategorySum`] if `cap` is smaller
    /// than the caps already handed out to categories.
    pub fn set_total(&mut self, cap: Money) -> VaultResult<()> {
        if cap.is_negative() {
            return Err(VaultError::Validation(
                "Total budget cannot be negative".into(),
            ));
        }

        let category_sum = self.category_sum();
        if cap < category_sum {
            return Err(VaultError::TotalBelowCategorySum {
                total: cap.cents(),
                category_sum: category_sum.cents(),
            });
        }

        self.total = cap;
        Ok(())
    }

    /// Add a cap for a category that does not yet have one
    ///
    /// Fails with [`VaultError::DuplicateCategory`] if the category already
    /// has a cap, or [`VaultError::CategoryBudgetExceedsTotal`] if the new
    /// sum of caps would exceed the total.
    pub fn add_category_budget(&mut self, budget: CategoryBudget) -> VaultResult<()> {
        if budget.cap.is_negative() {
            return Err(VaultError::Validation(
                "Category budget cannot be negative".into(),
            ));
        }

        if self.has_category(&budget.category) {
            return Err(VaultError::duplicate_category(&budget.category));
        }

        let new_sum = self.category_sum() + budget.cap;
        if new_sum > self.total {
            return Err(VaultError::CategoryBudgetExceedsTotal {
                total: self.total.cents(),
                category_sum: new_sum.cents(),
            });
        }

        self.categories.push(budget);
        Ok(())
    }

    /// Replace the cap of an existing category
    ///
    /// Fails with [`VaultError::CategoryNotFound`] if the category has no
    /// cap, or [`VaultError::CategoryBudgetExceedsTotal`] if the adjusted sum
    /// of caps would exceed the total.
    pub fn update_category_budget(&mut self, category: &str, new_cap: Money) -> VaultResult<()> {
        if new_cap.is_negative() {
            return Err(VaultError::Validation(
                "Category budget cannot be negative".into(),
            ));
        }

        let index = self
            .categories
            .iter()
            .position(|c| c.category == category)
            .ok_or_else(|| VaultError::category_not_found(category))?;

        let old_cap = self.categories[index].cap;
        let new_sum = self.category_sum() - old_cap + new_cap;
        if new_sum > self.total {
            return Err(VaultError::CategoryBudgetExceedsTotal {
                total: self.total.cents(),
                category_sum: new_sum.cents(),
            });
        }

        self.categories[index].cap = new_cap;
        Ok(())
    }

    /// Remove the cap of an existing category
    ///
    /// Removal can only shrink the sum, so once the category is found this
    /// always succeeds.
    pub fn remove_category_budget(&mut self, category: &str) -> VaultResult<CategoryBudget> {
        let index = self
            .categories
            .iter()
            .position(|c| c.category == category)
            .ok_or_else(|| VaultError::category_not_found(category))?;

        Ok(self.categories.remove(index))
    }
}

impl TryFrom<BudgetBookData> for BudgetBook {
    type Error = VaultError;

    fn try_from(data: BudgetBookData) -> Result<Self, Self::Error> {
        let mut book = BudgetBook::new();
        book.set_total(data.total)?;
        for budget in data.categories {
            book.add_category_budget(budget)?;
        }
        Ok(book)
    }
}

impl From<BudgetBook> for BudgetBookData {
    fn from(book: BudgetBook) -> Self {
        Self {
            total: book.total,
            categories: book.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_total(cents: i64) -> BudgetBook {
        let mut book = BudgetBook::new();
        book.set_total(Money::from_cents(cents)).unwrap();
        book
    }

    /// Invariant check used after every mutation in these tests
    fn assert_invariant(book: &BudgetBook) {
        assert!(
            book.category_sum() <= book.total(),
            "category caps exceed total"
        );
    }

    #[test]
    fn test_new_book_is_empty() {
        let book = BudgetBook::new();
        assert_eq!(book.total(), Money::zero());
        assert!(book.category_budgets().is_empty());
        assert_eq!(book.category_sum(), Money::zero());
    }

    #[test]
    fn test_set_total() {
        let mut book = BudgetBook::new();
        book.set_total(Money::from_cents(10000)).unwrap();
        assert_eq!(book.total(), Money::from_cents(10000));
        assert_invariant(&book);
    }

    #[test]
    fn test_set_total_below_category_sum_rejected() {
        let mut book = book_with_total(10000);
        book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(6000)))
            .unwrap();

        let result = book.set_total(Money::from_cents(5000));
        assert!(matches!(
            result,
            Err(VaultError::TotalBelowCategorySum {
                total: 5000,
                category_sum: 6000
            })
        ));

        // Prior state untouched
        assert_eq!(book.total(), Money::from_cents(10000));
        assert_invariant(&book);
    }

    #[test]
    fn test_set_total_negative_rejected() {
        let mut book = BudgetBook::new();
        assert!(book.set_total(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_add_category_budget() {
        let mut book = book_with_total(10000);
        book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(6000)))
            .unwrap();

        assert_eq!(book.cap_for("Food"), Some(Money::from_cents(6000)));
        assert_eq!(book.unallocated(), Money::from_cents(4000));
        assert_invariant(&book);
    }

    #[test]
    fn test_add_duplicate_category_rejected() {
        let mut book = book_with_total(10000);
        book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(3000)))
            .unwrap();

        let result = book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(1000)));
        assert!(matches!(result, Err(VaultError::DuplicateCategory(_))));
        assert_eq!(book.cap_for("Food"), Some(Money::from_cents(3000)));
    }

    #[test]
    fn test_scenario_from_budget_invariant() {
        // total 100.00; Food 60.00 ok; Fun 50.00 rejected; Food down to
        // 30.00; Fun 50.00 now fits.
        let mut book = book_with_total(10000);

        book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(6000)))
            .unwrap();
        assert_invariant(&book);

        let result = book.add_category_budget(CategoryBudget::new("Fun", Money::from_cents(5000)));
        assert!(matches!(
            result,
            Err(VaultError::CategoryBudgetExceedsTotal {
                total: 10000,
                category_sum: 11000
            })
        ));
        assert!(!book.has_category("Fun"));
        assert_invariant(&book);

        book.update_category_budget("Food", Money::from_cents(3000))
            .unwrap();
        assert_invariant(&book);

        book.add_category_budget(CategoryBudget::new("Fun", Money::from_cents(5000)))
            .unwrap();
        assert_eq!(book.category_sum(), Money::from_cents(8000));
        assert_invariant(&book);
    }

    #[test]
    fn test_update_category_budget_absent_rejected() {
        let mut book = book_with_total(10000);
        let result = book.update_category_budget("Ghost", Money::from_cents(1000));
        assert!(matches!(result, Err(VaultError::CategoryNotFound(_))));
    }

    #[test]
    fn test_update_category_budget_exceeding_total_rejected() {
        let mut book = book_with_total(10000);
        book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(4000)))
            .unwrap();
        book.add_category_budget(CategoryBudget::new("Fun", Money::from_cents(4000)))
            .unwrap();

        let result = book.update_category_budget("Fun", Money::from_cents(7000));
        assert!(matches!(
            result,
            Err(VaultError::CategoryBudgetExceedsTotal { .. })
        ));
        assert_eq!(book.cap_for("Fun"), Some(Money::from_cents(4000)));
        assert_invariant(&book);
    }

    #[test]
    fn test_update_can_reuse_own_headroom() {
        let mut book = book_with_total(10000);
        book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(9000)))
            .unwrap();

        // 9000 -> 10000 is fine: the old cap is released before the check
        book.update_category_budget("Food", Money::from_cents(10000))
            .unwrap();
        assert_eq!(book.cap_for("Food"), Some(Money::from_cents(10000)));
        assert_invariant(&book);
    }

    #[test]
    fn test_remove_category_budget() {
        let mut book = book_with_total(10000);
        book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(6000)))
            .unwrap();

        let removed = book.remove_category_budget("Food").unwrap();
        assert_eq!(removed.cap, Money::from_cents(6000));
        assert!(!book.has_category("Food"));
        assert_invariant(&book);

        let result = book.remove_category_budget("Food");
        assert!(matches!(result, Err(VaultError::CategoryNotFound(_))));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut book = book_with_total(10000);
        book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(2000)))
            .unwrap();
        book.add_category_budget(CategoryBudget::new("Transport", Money::from_cents(2000)))
            .unwrap();
        book.add_category_budget(CategoryBudget::new("Fun", Money::from_cents(2000)))
            .unwrap();

        let names: Vec<_> = book
            .category_budgets()
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, vec!["Food", "Transport", "Fun"]);
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut book = book_with_total(10000);
        book.add_category_budget(CategoryBudget::new("Food", Money::from_cents(6000)))
            .unwrap();

        let json = serde_json::to_string(&book).unwrap();
        let deserialized: BudgetBook = serde_json::from_str(&json).unwrap();
        assert_eq!(book, deserialized);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_payload() {
        // category caps sum past the total
        let json = r#"{"total":1000,"categories":[{"category":"Food","cap":2000}]}"#;
        let result: Result<BudgetBook, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
