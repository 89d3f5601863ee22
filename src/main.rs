use anyhow::Result;
use clap::{Parser, Subcommand};

use spendvault::cli::{
    handle_budget_command, handle_expense_command, handle_user_command, CliContext,
};

#[derive(Parser)]
#[command(
    name = "spendvault",
    version,
    about = "Terminal-based personal expense tracker with encrypted per-user ledgers",
    long_about = "spendvault keeps one ledger of expenses per registered user, \
                  encrypted at rest under an installation passphrase, with a \
                  total budget cap and per-category caps that can never sum \
                  past it."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    #[command(subcommand)]
    User(spendvault::cli::UserCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(spendvault::cli::ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(spendvault::cli::BudgetCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = CliContext::init()?;

    match cli.command {
        Commands::User(cmd) => {
            handle_user_command(&mut ctx, cmd)?;
        }
        Commands::Expense(cmd) => {
            handle_expense_command(&mut ctx, cmd)?;
        }
        Commands::Budget(cmd) => {
            handle_budget_command(&mut ctx, cmd)?;
        }
        Commands::Audit { limit } => {
            let entries = ctx.audit.read_recent(limit)?;
            if entries.is_empty() {
                println!("Audit log is empty.");
            } else {
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
        }
        Commands::Config => {
            println!("Base directory: {}", ctx.paths.base_dir().display());
            println!("Vaults:         {}", ctx.paths.vaults_dir().display());
            println!("Settings:       {}", ctx.paths.settings_file().display());
            println!("Audit log:      {}", ctx.paths.audit_log().display());
            println!(
                "Category policy: {}",
                if ctx.settings.strict_categories {
                    "reject unknown categories"
                } else {
                    "allow unknown categories"
                }
            );
            println!("Currency:       {}", ctx.settings.currency_symbol);
            println!("Date format:    {}", ctx.settings.date_format);
            println!(
                "Encryption:     {}",
                if ctx.settings.key_params.is_some() {
                    "initialized"
                } else {
                    "not yet initialized (first command will generate a salt)"
                }
            );
        }
    }

    Ok(())
}
