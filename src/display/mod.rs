//! Terminal rendering for spendvault
//!
//! Formats expenses and budgets for display. The core never formats prose;
//! these helpers render the read-only views the CLI hands to the terminal.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BudgetBook, Expense};

/// Maximum rendered width for free-text columns
const TEXT_COL_WIDTH: usize = 24;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Remark")]
    remark: String,
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Cap")]
    cap: String,
}

/// Render a list of expenses as a table, numbered from 1
pub fn render_expenses(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .enumerate()
        .map(|(i, e)| ExpenseRow {
            index: i + 1,
            date: e.date.format("%Y-%m-%d").to_string(),
            name: truncate(&e.name, TEXT_COL_WIDTH),
            amount: e.amount.to_string(),
            category: truncate(&e.category, TEXT_COL_WIDTH),
            remark: truncate(&e.remark, TEXT_COL_WIDTH),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Render a budget book: category caps plus the total summary line
pub fn render_budgets(budgets: &BudgetBook) -> String {
    let mut output = String::new();

    if budgets.category_budgets().is_empty() {
        output.push_str("No category budgets set.\n");
    } else {
        let rows: Vec<BudgetRow> = budgets
            .category_budgets()
            .iter()
            .map(|b| BudgetRow {
                category: truncate(&b.category, TEXT_COL_WIDTH),
                cap: b.cap.to_string(),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::sharp());
        output.push_str(&table.to_string());
        output.push('\n');
    }

    output.push_str(&format!(
        "Total budget: {}   Allocated: {}   Unallocated: {}",
        budgets.total(),
        budgets.category_sum(),
        budgets.unallocated()
    ));

    output
}

/// Truncate a string for column display, adding an ellipsis when cut
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryBudget, Money};
    use chrono::NaiveDate;

    fn lunch() -> Expense {
        Expense::new(
            "Lunch",
            Money::from_cents(1250),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            "Food",
        )
    }

    #[test]
    fn test_render_empty_expenses() {
        assert_eq!(render_expenses(&[]), "No expenses recorded.");
    }

    #[test]
    fn test_render_expenses_contains_fields() {
        let rendered = render_expenses(&[lunch()]);
        assert!(rendered.contains("Lunch"));
        assert!(rendered.contains("$12.50"));
        assert!(rendered.contains("Food"));
        assert!(rendered.contains("2025-03-14"));
    }

    #[test]
    fn test_render_budgets() {
        let mut budgets = BudgetBook::new();
        budgets.set_total(Money::from_cents(10000)).unwrap();
        budgets
            .add_category_budget(CategoryBudget::new("Food", Money::from_cents(6000)))
            .unwrap();

        let rendered = render_budgets(&budgets);
        assert!(rendered.contains("Food"));
        assert!(rendered.contains("$60.00"));
        assert!(rendered.contains("Total budget: $100.00"));
        assert!(rendered.contains("Unallocated: $40.00"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
        let cut = truncate("a much longer string", 10);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().count(), 10);
    }
}
