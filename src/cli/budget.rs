//! Budget CLI commands
//!
//! Implements the total and per-category budget caps for the signed-in
//! user's ledger. Every mutation goes through the budget book's
//! check-then-apply path, so a rejected command leaves the caps untouched.

use clap::Subcommand;

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::display::render_budgets;
use crate::error::{VaultError, VaultResult};
use crate::models::{CategoryBudget, Money, Username};
use crate::services::Session;

use super::CliContext;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the total budget and all category caps
    Show {
        /// Username of the ledger to operate on
        #[arg(short, long, env = "SPENDVAULT_USER")]
        user: String,
    },

    /// Set the total budget cap
    #[command(name = "set-total")]
    SetTotal {
        /// New total cap (e.g., "100.00")
        amount: String,
        /// Username of the ledger to operate on
        #[arg(short, long, env = "SPENDVAULT_USER")]
        user: String,
    },

    /// Add a spending cap for a category
    #[command(name = "add-category")]
    AddCategory {
        /// Category name
        category: String,
        /// Cap for the category (e.g., "60.00")
        amount: String,
        /// Username of the ledger to operate on
        #[arg(short, long, env = "SPENDVAULT_USER")]
        user: String,
    },

    /// Change the spending cap of a category
    #[command(name = "update-category")]
    UpdateCategory {
        /// Category name
        category: String,
        /// New cap for the category
        amount: String,
        /// Username of the ledger to operate on
        #[arg(short, long, env = "SPENDVAULT_USER")]
        user: String,
    },

    /// Remove the spending cap of a category
    #[command(name = "remove-category")]
    RemoveCategory {
        /// Category name
        category: String,
        /// Username of the ledger to operate on
        #[arg(short, long, env = "SPENDVAULT_USER")]
        user: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &mut CliContext, cmd: BudgetCommands) -> VaultResult<()> {
    match cmd {
        BudgetCommands::Show { user } => {
            let username = Username::new(user)?;
            let key = ctx.obtain_key()?;
            let policy = ctx.settings.category_policy();
            let session = Session::sign_in(&ctx.store, &key, &username, policy)?;

            println!("{}", render_budgets(session.ledger().budgets()));
        }

        BudgetCommands::SetTotal { amount, user } => {
            let username = Username::new(user)?;
            let key = ctx.obtain_key()?;
            let policy = ctx.settings.category_policy();
            let mut session = Session::sign_in(&ctx.store, &key, &username, policy)?;

            let cap = parse_amount(&amount)?;
            session.set_total_budget(cap)?;
            session.commit(&key)?;

            ctx.audit.log(&AuditEntry::new(
                Operation::Update,
                EntityType::TotalBudget,
                username.as_str(),
                None,
            ))?;

            println!("Total budget set to {}.", cap);
        }

        BudgetCommands::AddCategory {
            category,
            amount,
            user,
        } => {
            let username = Username::new(user)?;
            let key = ctx.obtain_key()?;
            let policy = ctx.settings.category_policy();
            let mut session = Session::sign_in(&ctx.store, &key, &username, policy)?;

            let cap = parse_amount(&amount)?;
            session.add_category_budget(CategoryBudget::new(&category, cap))?;
            session.commit(&key)?;

            ctx.audit.log(&AuditEntry::new(
                Operation::Create,
                EntityType::CategoryBudget,
                username.as_str(),
                Some(category.clone()),
            ))?;

            println!("Category \"{}\" capped at {}.", category, cap);
        }

        BudgetCommands::UpdateCategory {
            category,
            amount,
            user,
        } => {
            let username = Username::new(user)?;
            let key = ctx.obtain_key()?;
            let policy = ctx.settings.category_policy();
            let mut session = Session::sign_in(&ctx.store, &key, &username, policy)?;

            let cap = parse_amount(&amount)?;
            session.update_category_budget(&category, cap)?;
            session.commit(&key)?;

            ctx.audit.log(&AuditEntry::new(
                Operation::Update,
                EntityType::CategoryBudget,
                username.as_str(),
                Some(category.clone()),
            ))?;

            println!("Category \"{}\" cap changed to {}.", category, cap);
        }

        BudgetCommands::RemoveCategory { category, user } => {
            let username = Username::new(user)?;
            let key = ctx.obtain_key()?;
            let policy = ctx.settings.category_policy();
            let mut session = Session::sign_in(&ctx.store, &key, &username, policy)?;

            let removed = session.remove_category_budget(&category)?;
            session.commit(&key)?;

            ctx.audit.log(&AuditEntry::new(
                Operation::Delete,
                EntityType::CategoryBudget,
                username.as_str(),
                Some(category.clone()),
            ))?;

            println!("Removed cap {} from \"{}\".", removed.cap, category);
        }
    }

    Ok(())
}

fn parse_amount(s: &str) -> VaultResult<Money> {
    Money::parse(s).map_err(|e| VaultError::Validation(format!("Invalid amount: {}", e)))
}
