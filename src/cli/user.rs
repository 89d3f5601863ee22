//! User CLI commands
//!
//! Implements sign-up, listing, integrity checking, and deletion of the
//! per-user vaults.

use clap::Subcommand;

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::error::{VaultError, VaultResult};
use crate::models::Username;
use crate::services::Session;

use super::CliContext;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a new user with an empty ledger
    Signup {
        /// Username (letters, digits, '_' and '-')
        username: String,
    },

    /// List all registered users
    List,

    /// Decrypt every vault and report any that cannot be opened
    Check,

    /// Delete a user's vault permanently
    Delete {
        /// Username
        username: String,
        /// Required; deletion cannot be undone
        #[arg(long)]
        force: bool,
    },
}

/// Handle a user command
pub fn handle_user_command(ctx: &mut CliContext, cmd: UserCommands) -> VaultResult<()> {
    match cmd {
        UserCommands::Signup { username } => {
            let username = Username::new(username)?;
            let key = ctx.obtain_key()?;

            let policy = ctx.settings.category_policy();
            Session::sign_up(&ctx.store, &key, &username, policy)?;

            ctx.audit.log(&AuditEntry::new(
                Operation::Create,
                EntityType::User,
                username.as_str(),
                None,
            ))?;

            println!("User \"{}\" has successfully been created.", username);
        }

        UserCommands::List => {
            let usernames = ctx.store.usernames()?;
            if usernames.is_empty() {
                println!("No users registered.");
            } else {
                for username in usernames {
                    println!("{}", username);
                }
            }
        }

        UserCommands::Check => {
            let key = ctx.obtain_key()?;
            let report = ctx.store.load_all(&key)?;

            let mut names: Vec<_> = report.ledgers.keys().collect();
            names.sort();
            for username in names {
                let ledger = &report.ledgers[username];
                println!(
                    "ok      {} ({} expenses, {} category budgets)",
                    username,
                    ledger.expenses().len(),
                    ledger.budgets().category_budgets().len()
                );
            }

            for skipped in &report.skipped {
                let who = skipped
                    .username
                    .as_ref()
                    .map(|u| u.as_str().to_string())
                    .unwrap_or_else(|| skipped.path.display().to_string());
                println!("skipped {} ({})", who, skipped.error);

                ctx.audit.log(&AuditEntry::new(
                    Operation::Skip,
                    EntityType::Vault,
                    who,
                    Some(skipped.error.to_string()),
                ))?;
            }

            println!(
                "{} vault(s) opened, {} skipped.",
                report.ledgers.len(),
                report.skipped.len()
            );
        }

        UserCommands::Delete { username, force } => {
            let username = Username::new(username)?;

            if !force {
                return Err(VaultError::Validation(
                    "Deleting a user destroys their ledger; pass --force to confirm".into(),
                ));
            }

            ctx.store.delete(&username)?;

            ctx.audit.log(&AuditEntry::new(
                Operation::Delete,
                EntityType::User,
                username.as_str(),
                None,
            ))?;

            println!("Deleted user \"{}\".", username);
        }
    }

    Ok(())
}
