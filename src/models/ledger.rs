//! Per-user ledger
//!
//! A ledger aggregates one user's expense list and budget book under their
//! username. It is the unit that gets encrypted and persisted as a whole,
//! and the unit command handlers mutate. All mutations are fail-atomic: a
//! rejected operation leaves the ledger unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

use super::budget::{BudgetBook, CategoryBudget};
use super::expense::Expense;
use super::expense_list::ExpenseList;
use super::money::Money;
use super::username::Username;

/// Policy for expense categories that have no budget cap
///
/// Whether an expense may name a category the budget book does not know is a
/// configuration choice, not hard-coded behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPolicy {
    /// Accept expenses in any category (default)
    #[default]
    AllowUnknown,
    /// Reject expenses whose category has no budget cap
    RequireBudgeted,
}

/// One user's complete business state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Owner of this ledger
    username: Username,

    /// All recorded expenses
    expenses: ExpenseList,

    /// Total and per-category spending caps
    budgets: BudgetBook,
}

impl Ledger {
    /// Create an empty ledger for a user (no expenses, zero total budget)
    pub fn new(username: Username) -> Self {
        Self {
            username,
            expenses: ExpenseList::new(),
            budgets: BudgetBook::new(),
        }
    }

    /// The owning username
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Read access to the expense list
    pub fn expenses(&self) -> &ExpenseList {
        &self.expenses
    }

    /// Read access to the budget book
    pub fn budgets(&self) -> &BudgetBook {
        &self.budgets
    }

    /// Record a new expense
    ///
    /// Validates the expense, applies the category policy, then appends.
    pub fn record_expense(&mut self, expense: Expense, policy: CategoryPolicy) -> VaultResult<()> {
        expense
            .validate()
            .map_err(|e| VaultError::Validation(e.to_string()))?;
        self.check_category(&expense, policy)?;
        self.expenses.add(expense)
    }

    /// Edit an existing expense in place
    ///
    /// `target` is matched by identity; `replacement` may keep or change the
    /// identity as long as it does not collide with another entry.
    pub fn edit_expense(
        &mut self,
        target: &Expense,
        mut replacement: Expense,
        policy: CategoryPolicy,
    ) -> VaultResult<()> {
        replacement
            .validate()
            .map_err(|e| VaultError::Validation(e.to_string()))?;
        self.check_category(&replacement, policy)?;
        replacement.touch();
        self.expenses.replace(target, replacement)
    }

    /// Delete an expense, matched by identity
    pub fn delete_expense(&mut self, target: &Expense) -> VaultResult<()> {
        self.expenses.remove(target)
    }

    /// Set the total spending cap
    pub fn set_total_budget(&mut self, cap: Money) -> VaultResult<()> {
        self.budgets.set_total(cap)
    }

    /// Add a category spending cap
    pub fn add_category_budget(&mut self, budget: CategoryBudget) -> VaultResult<()> {
        self.budgets.add_category_budget(budget)
    }

    /// Replace a category's spending cap
    pub fn update_category_budget(&mut self, category: &str, new_cap: Money) -> VaultResult<()> {
        self.budgets.update_category_budget(category, new_cap)
    }

    /// Remove a category's spending cap
    pub fn remove_category_budget(&mut self, category: &str) -> VaultResult<CategoryBudget> {
        self.budgets.remove_category_budget(category)
    }

    fn check_category(&self, expense: &Expense, policy: CategoryPolicy) -> VaultResult<()> {
        match policy {
            CategoryPolicy::AllowUnknown => Ok(()),
            CategoryPolicy::RequireBudgeted => {
                if self.budgets.has_category(&expense.category) {
                    Ok(())
                } else {
                    Err(VaultError::category_not_found(&expense.category))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn username() -> Username {
        Username::new("alice").unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn lunch() -> Expense {
        Expense::new("Lunch", Money::from_cents(1250), date(), "Food")
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new(username());
        assert_eq!(ledger.username().as_str(), "alice");
        assert!(ledger.expenses().is_empty());
        assert_eq!(ledger.budgets().total(), Money::zero());
    }

    #[test]
    fn test_record_expense_allow_unknown() {
        let mut ledger = Ledger::new(username());
        ledger
            .record_expense(lunch(), CategoryPolicy::AllowUnknown)
            .unwrap();
        assert_eq!(ledger.expenses().len(), 1);
    }

    #[test]
    fn test_record_expense_require_budgeted() {
        let mut ledger = Ledger::new(username());

        let result = ledger.record_expense(lunch(), CategoryPolicy::RequireBudgeted);
        assert!(matches!(result, Err(VaultError::CategoryNotFound(_))));
        assert!(ledger.expenses().is_empty());

        ledger.set_total_budget(Money::from_cents(10000)).unwrap();
        ledger
            .add_category_budget(CategoryBudget::new("Food", Money::from_cents(5000)))
            .unwrap();
        ledger
            .record_expense(lunch(), CategoryPolicy::RequireBudgeted)
            .unwrap();
        assert_eq!(ledger.expenses().len(), 1);
    }

    #[test]
    fn test_record_invalid_expense_rejected() {
        let mut ledger = Ledger::new(username());
        let bad = Expense::new("", Money::from_cents(100), date(), "Food");

        let result = ledger.record_expense(bad, CategoryPolicy::AllowUnknown);
        assert!(matches!(result, Err(VaultError::Validation(_))));
    }

    #[test]
    fn test_edit_expense_same_identity() {
        let mut ledger = Ledger::new(username());
        ledger
            .record_expense(lunch(), CategoryPolicy::AllowUnknown)
            .unwrap();

        let edited = Expense::with_remark(
            "Lunch",
            Money::from_cents(1250),
            date(),
            "Work",
            "client visit",
        );
        ledger
            .edit_expense(&lunch(), edited, CategoryPolicy::AllowUnknown)
            .unwrap();

        assert_eq!(ledger.expenses().len(), 1);
        assert_eq!(ledger.expenses().as_slice()[0].category, "Work");
    }

    #[test]
    fn test_delete_expense() {
        let mut ledger = Ledger::new(username());
        ledger
            .record_expense(lunch(), CategoryPolicy::AllowUnknown)
            .unwrap();
        ledger.delete_expense(&lunch()).unwrap();
        assert!(ledger.expenses().is_empty());

        let result = ledger.delete_expense(&lunch());
        assert!(matches!(result, Err(VaultError::ExpenseNotFound)));
    }

    #[test]
    fn test_budget_pass_throughs_fail_atomic() {
        let mut ledger = Ledger::new(username());
        ledger.set_total_budget(Money::from_cents(10000)).unwrap();
        ledger
            .add_category_budget(CategoryBudget::new("Food", Money::from_cents(6000)))
            .unwrap();

        let result = ledger.add_category_budget(CategoryBudget::new("Fun", Money::from_cents(5000)));
        assert!(matches!(
            result,
            Err(VaultError::CategoryBudgetExceedsTotal { .. })
        ));
        assert_eq!(ledger.budgets().category_sum(), Money::from_cents(6000));
    }

    #[test]
    fn test_ledger_equality() {
        let a = Ledger::new(username());
        let b = Ledger::new(username());
        assert_eq!(a, b);

        let other = Ledger::new(Username::new("bob").unwrap());
        assert_ne!(a, other);

        let mut with_expense = Ledger::new(username());
        with_expense
            .record_expense(lunch(), CategoryPolicy::AllowUnknown)
            .unwrap();
        assert_ne!(a, with_expense);
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut ledger = Ledger::new(username());
        ledger.set_total_budget(Money::from_cents(10000)).unwrap();
        ledger
            .add_category_budget(CategoryBudget::new("Food", Money::from_cents(5000)))
            .unwrap();
        ledger
            .record_expense(lunch(), CategoryPolicy::AllowUnknown)
            .unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let deserialized: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(ledger, deserialized);
    }
}
