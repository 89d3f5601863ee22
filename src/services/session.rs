//! Active-user session
//!
//! A session is the explicitly passed handle for "the user currently signed
//! in": it owns the decrypted ledger and tracks whether it has uncommitted
//! changes. Command handlers mutate through the session and call
//! [`Session::commit`] to re-encrypt and persist; until a commit succeeds,
//! the previous persisted state remains authoritative. One session is active
//! at a time; there is no ambient global user.

use crate::crypto::DerivedKey;
use crate::error::VaultResult;
use crate::models::{CategoryBudget, CategoryPolicy, Expense, Ledger, Money, Username};
use crate::storage::LedgerStore;

/// The active user's decrypted ledger plus its persistence handle
pub struct Session<'a> {
    store: &'a LedgerStore,
    ledger: Ledger,
    policy: CategoryPolicy,
    dirty: bool,
}

impl<'a> Session<'a> {
    /// Sign an existing user in by decrypting their vault
    pub fn sign_in(
        store: &'a LedgerStore,
        key: &DerivedKey,
        username: &Username,
        policy: CategoryPolicy,
    ) -> VaultResult<Self> {
        let ledger = store.load(username, key)?;
        Ok(Self {
            store,
            ledger,
            policy,
            dirty: false,
        })
    }

    /// Create a new user with an empty ledger and sign them in
    pub fn sign_up(
        store: &'a LedgerStore,
        key: &DerivedKey,
        username: &Username,
        policy: CategoryPolicy,
    ) -> VaultResult<Self> {
        let ledger = store.create_if_absent(username, key)?;
        Ok(Self {
            store,
            ledger,
            policy,
            dirty: false,
        })
    }

    /// The signed-in user
    pub fn username(&self) -> &Username {
        self.ledger.username()
    }

    /// Read access to the active ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// True if there are mutations not yet committed to disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record a new expense in the active ledger
    pub fn record_expense(&mut self, expense: Expense) -> VaultResult<()> {
        self.ledger.record_expense(expense, self.policy)?;
        self.dirty = true;
        Ok(())
    }

    /// Edit an expense, matched by identity
    pub fn edit_expense(&mut self, target: &Expense, replacement: Expense) -> VaultResult<()> {
        self.ledger.edit_expense(target, replacement, self.policy)?;
        self.dirty = true;
        Ok(())
    }

    /// Delete an expense, matched by identity
    pub fn delete_expense(&mut self, target: &Expense) -> VaultResult<()> {
        self.ledger.delete_expense(target)?;
        self.dirty = true;
        Ok(())
    }

    /// Set the total spending cap
    pub fn set_total_budget(&mut self, cap: Money) -> VaultResult<()> {
        self.ledger.set_total_budget(cap)?;
        self.dirty = true;
        Ok(())
    }

    /// Add a category spending cap
    pub fn add_category_budget(&mut self, budget: CategoryBudget) -> VaultResult<()> {
        self.ledger.add_category_budget(budget)?;
        self.dirty = true;
        Ok(())
    }

    /// Replace a category's spending cap
    pub fn update_category_budget(&mut self, category: &str, new_cap: Money) -> VaultResult<()> {
        self.ledger.update_category_budget(category, new_cap)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove a category's spending cap
    pub fn remove_category_budget(&mut self, category: &str) -> VaultResult<CategoryBudget> {
        let removed = self.ledger.remove_category_budget(category)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Encrypt and persist the active ledger
    ///
    /// The key is borrowed only for the duration of this call.
    pub fn commit(&mut self, key: &DerivedKey) -> VaultResult<()> {
        self.store.save(&self.ledger, key)?;
        self.dirty = false;
        Ok(())
    }
}
