//! Expense CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_money, format_timestamp};
use crate::error::ExpensioResult;
use crate::models::{Identity, DEFAULT_CATEGORY};
use crate::services::ExpenseService;
use crate::storage::RecordStore;
use crate::validation::ExpenseForm;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        title: String,
        /// Amount (e.g., "12.50" or "£12.50")
        amount: String,
        /// Category label
        #[arg(short, long, default_value = DEFAULT_CATEGORY)]
        category: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command<S: RecordStore + ?Sized>(
    store: &S,
    identity: Option<&Identity>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpensioResult<()> {
    let service = ExpenseService::new(store);

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
        } => {
            let expense = service.add(identity, &ExpenseForm::new(title, category, amount))?;
            println!(
                "Added {} ({}) for {} on {}",
                expense.title,
                expense.category,
                format_money(expense.amount, settings),
                format_timestamp(&expense.created_at, settings)
            );
            println!("  ID: {}", expense.id);
        }
    }

    Ok(())
}
