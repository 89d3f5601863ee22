//! Expense CLI commands
//!
//! Implements recording, listing, editing, and deleting expenses in the
//! signed-in user's ledger. Edit and delete address an expense by its
//! position in the listing (1-based).

use chrono::NaiveDate;
use clap::Subcommand;

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::display::render_expenses;
use crate::error::{VaultError, VaultResult};
use crate::models::{Expense, Money, Username};
use crate::services::Session;

use super::CliContext;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        name: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category tag
        #[arg(short, long, default_value = "Uncategorized")]
        category: String,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text remark
        #[arg(short, long)]
        remark: Option<String>,
        /// Username of the ledger to operate on
        #[arg(short, long, env = "SPENDVAULT_USER")]
        user: String,
    },

    /// List all expenses
    List {
        /// Username of the ledger to operate on
        #[arg(short, long, env = "SPENDVAULT_USER")]
        user: String,
    },

    /// Edit an expense by its listed position
    Edit {
        /// Position in the expense listing (1-based)
        index: usize,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New remark
        #[arg(long)]
        remark: Option<String>,
        /// Username of the ledger to operate on
        #[arg(short, long, env = "SPENDVAULT_USER")]
        user: String,
    },

    /// Delete an expense by its listed position
    Delete {
        /// Position in the expense listing (1-based)
        index: usize,
        /// Username of the ledger to operate on
        #[arg(short, long, env = "SPENDVAULT_USER")]
        user: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(ctx: &mut CliContext, cmd: ExpenseCommands) -> VaultResult<()> {
    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            category,
            date,
            remark,
            user,
        } => {
            let username = Username::new(user)?;
            let key = ctx.obtain_key()?;
            let policy = ctx.settings.category_policy();
            let mut session = Session::sign_in(&ctx.store, &key, &username, policy)?;

            let amount = parse_amount(&amount)?;
            let date = parse_date(date.as_deref())?;
            let expense = match remark {
                Some(remark) => Expense::with_remark(&name, amount, date, &category, remark),
                None => Expense::new(&name, amount, date, &category),
            };

            session.record_expense(expense)?;
            session.commit(&key)?;

            ctx.audit.log(&AuditEntry::new(
                Operation::Create,
                EntityType::Expense,
                username.as_str(),
                Some(category.clone()),
            ))?;

            println!("Recorded \"{}\" ({}) in {}.", name, amount, category);
        }

        ExpenseCommands::List { user } => {
            let username = Username::new(user)?;
            let key = ctx.obtain_key()?;
            let policy = ctx.settings.category_policy();
            let session = Session::sign_in(&ctx.store, &key, &username, policy)?;

            println!("{}", render_expenses(session.ledger().expenses().as_slice()));
        }

        ExpenseCommands::Edit {
            index,
            name,
            amount,
            date,
            category,
            remark,
            user,
        } => {
            let username = Username::new(user)?;
            let key = ctx.obtain_key()?;
            let policy = ctx.settings.category_policy();
            let mut session = Session::sign_in(&ctx.store, &key, &username, policy)?;

            let target = expense_at(&session, index)?;

            let mut replacement = target.clone();
            if let Some(name) = name {
                replacement.name = name;
            }
            if let Some(amount) = amount {
                replacement.amount = parse_amount(&amount)?;
            }
            if let Some(date) = date {
                replacement.date = parse_date(Some(&date))?;
            }
            if let Some(category) = category {
                replacement.category = category;
            }
            if let Some(remark) = remark {
                replacement.remark = remark;
            }

            let detail = replacement.category.clone();
            session.edit_expense(&target, replacement)?;
            session.commit(&key)?;

            ctx.audit.log(&AuditEntry::new(
                Operation::Update,
                EntityType::Expense,
                username.as_str(),
                Some(detail),
            ))?;

            println!("Updated expense #{}.", index);
        }

        ExpenseCommands::Delete { index, user } => {
            let username = Username::new(user)?;
            let key = ctx.obtain_key()?;
            let policy = ctx.settings.category_policy();
            let mut session = Session::sign_in(&ctx.store, &key, &username, policy)?;

            let target = expense_at(&session, index)?;
            session.delete_expense(&target)?;
            session.commit(&key)?;

            ctx.audit.log(&AuditEntry::new(
                Operation::Delete,
                EntityType::Expense,
                username.as_str(),
                None,
            ))?;

            println!("Deleted expense #{} (\"{}\").", index, target.name);
        }
    }

    Ok(())
}

/// Resolve a 1-based listing position to the expense at that position
fn expense_at(session: &Session<'_>, index: usize) -> VaultResult<Expense> {
    index
        .checked_sub(1)
        .and_then(|i| session.ledger().expenses().get(i))
        .cloned()
        .ok_or(VaultError::ExpenseNotFound)
}

fn parse_amount(s: &str) -> VaultResult<Money> {
    Money::parse(s).map_err(|e| VaultError::Validation(format!("Invalid amount: {}", e)))
}

fn parse_date(s: Option<&str>) -> VaultResult<NaiveDate> {
    match s {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| VaultError::Validation(format!("Invalid date '{}': {}", s, e))),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("12.505").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date(Some("2025-03-14")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert!(parse_date(Some("14/03/2025")).is_err());
        assert!(parse_date(None).is_ok());
    }
}
