//! Identity-unique expense list
//!
//! An ordered list of expenses that rejects two entries with the same
//! identity (name, amount, date). Insertion order is preserved for
//! iteration and display. Every mutating operation checks first and applies
//! second, so a rejected operation leaves the list untouched.

use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

use super::expense::Expense;

/// Ordered collection of expenses with no identity duplicates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Expense>", into = "Vec<Expense>")]
pub struct ExpenseList {
    entries: Vec<Expense>,
}

impl ExpenseList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any entry has the same identity as `expense`
    pub fn contains(&self, expense: &Expense) -> bool {
        self.entries.iter().any(|e| e.is_same_expense(expense))
    }

    /// Append an expense, preserving insertion order
    ///
    /// Fails with [`VaultError::DuplicateExpense`] if an entry with the same
    /// identity is already present.
    pub fn add(&mut self, expense: Expense) -> VaultResult<()> {
        if self.contains(&expense) {
            return Err(VaultError::DuplicateExpense);
        }
        self.entries.push(expense);
        Ok(())
    }

    /// Swap the entry matching `target`'s identity for `replacement` in place
    ///
    /// The replacement may keep the target's identity (an in-place edit) or
    /// take a new one, as long as the new identity does not collide with any
    /// *other* entry. Position in the list is preserved.
    pub fn replace(&mut self, target: &Expense, replacement: Expense) -> VaultResult<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.is_same_expense(target))
            .ok_or(VaultError::ExpenseNotFound)?;

        let collides = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, e)| i != index && e.is_same_expense(&replacement));
        if collides {
            return Err(VaultError::DuplicateExpense);
        }

        self.entries[index] = replacement;
        Ok(())
    }

    /// Remove the entry matching `expense`'s identity
    ///
    /// Fails with [`VaultError::ExpenseNotFound`] if no entry matches.
    pub fn remove(&mut self, expense: &Expense) -> VaultResult<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.is_same_expense(expense))
            .ok_or(VaultError::ExpenseNotFound)?;
        self.entries.remove(index);
        Ok(())
    }

    /// Replace the entire contents with `expenses`
    ///
    /// Fails with [`VaultError::DuplicateExpense`] if the input itself
    /// contains two entries with the same identity; the current contents are
    /// kept unchanged in that case.
    pub fn set_expenses(&mut self, expenses: Vec<Expense>) -> VaultResult<()> {
        for (i, expense) in expenses.iter().enumerate() {
            if expenses[..i].iter().any(|e| e.is_same_expense(expense)) {
                return Err(VaultError::DuplicateExpense);
            }
        }
        self.entries = expenses;
        Ok(())
    }

    /// Read-only view of the entries in insertion order
    ///
    /// The view borrows the list, so it always reflects the current contents
    /// and cannot be held across a mutation. External collaborators (CLI
    /// rendering) only ever read through this.
    pub fn as_slice(&self) -> &[Expense] {
        &self.entries
    }

    /// Iterate over the entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the list has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by position
    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.entries.get(index)
    }

    /// Sum of all entry amounts
    pub fn total_spent(&self) -> super::money::Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Sum of entry amounts in one category
    pub fn spent_in_category(&self, category: &str) -> super::money::Money {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.amount)
            .sum()
    }
}

impl<'a> IntoIterator for &'a ExpenseList {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl TryFrom<Vec<Expense>> for ExpenseList {
    type Error = VaultError;

    fn try_from(expenses: Vec<Expense>) -> Result<Self, Self::Error> {
        let mut list = Self::new();
        list.set_expenses(expenses)?;
        Ok(list)
    }
}

impl From<ExpenseList> for Vec<Expense> {
    fn from(list: ExpenseList) -> Self {
        list.entries
    }
}
