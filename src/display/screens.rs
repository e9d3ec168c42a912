//! Screen rendering for terminal output
//!
//! Turns view states into text. Loading, empty and failed screens always
//! render differently from each other.

use crate::config::Settings;
use crate::models::{Expense, Identity};
use crate::views::{AnalyticsData, HomeData, ViewState};

use super::format::{
    format_bar, format_money, format_percentage, format_timestamp, separator, truncate,
};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const HOME_EMPTY_MESSAGE: &str = "No expenses yet. Add one with `expensio add`.";
pub const HISTORY_EMPTY_MESSAGE: &str = "No expenses match your search.";
pub const HISTORY_NO_RECORDS_MESSAGE: &str = "No expenses yet.";
pub const ANALYTICS_EMPTY_MESSAGE: &str = "No expenses in this period.";

const WIDTH: usize = 60;

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense, settings: &Settings) -> String {
    format!(
        "{:18} {:22} {:14} {:>12}",
        format_timestamp(&expense.created_at, settings),
        truncate(&expense.title, 22),
        truncate(&expense.category, 14),
        format_money(expense.amount, settings)
    )
}

/// Format a list of expenses with a header
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:18} {:22} {:14} {:>12}\n",
        "Date", "Title", "Category", "Amount"
    ));
    output.push_str(&separator(69));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, settings));
        output.push('\n');
    }

    output
}

/// Shared handling of the non-ready states
///
/// Returns the text for loading, empty and failed screens, and the data to
/// render underneath (ready data, or stale data after a failure).
fn frame<'a, T>(state: &'a ViewState<T>, empty_message: &str, output: &mut String) -> Option<&'a T> {
    match state {
        ViewState::Loading => {
            output.push_str(LOADING_MESSAGE);
            output.push('\n');
            None
        }
        ViewState::Empty => {
            output.push_str(empty_message);
            output.push('\n');
            None
        }
        ViewState::Failed { message, stale } => {
            output.push_str(&format!("Error: {}\n", message));
            if stale.is_some() {
                output.push_str("(showing last known data)\n\n");
            }
            stale.as_ref()
        }
        ViewState::Ready(data) => Some(data),
    }
}

pub fn format_home(state: &ViewState<HomeData>, identity: &Identity, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Hello, {}\n\n", identity.label()));

    if let Some(data) = frame(state, HOME_EMPTY_MESSAGE, &mut output) {
        output.push_str(&format!(
            "Today:        {:>12}\n",
            format_money(data.totals.today, settings)
        ));
        output.push_str(&format!(
            "Last 7 days:  {:>12}\n",
            format_money(data.totals.week, settings)
        ));
        output.push_str(&format!(
            "This month:   {:>12}\n\n",
            format_money(data.totals.month, settings)
        ));

        output.push_str(&format!(
            "Recent expenses ({} of {})\n",
            data.recent.len(),
            data.record_count
        ));
        output.push_str(&format_expense_list(&data.recent, settings));
    }

    output
}

pub fn format_history(state: &ViewState<Vec<Expense>>, query: &str, settings: &Settings) -> String {
    let query = query.trim();
    let mut output = String::new();
    output.push_str("History\n");
    if !query.is_empty() {
        output.push_str(&format!("Search: \"{}\"\n", query));
    }
    output.push('\n');

    // Without a query an empty list means there is nothing stored at all
    let empty_message = if query.is_empty() {
        HISTORY_NO_RECORDS_MESSAGE
    } else {
        HISTORY_EMPTY_MESSAGE
    };

    if let Some(expenses) = frame(state, empty_message, &mut output) {
        output.push_str(&format_expense_list(expenses, settings));
        output.push_str(&format!("\n{} expense(s)\n", expenses.len()));
    }

    output
}

pub fn format_analytics(state: &ViewState<AnalyticsData>, settings: &Settings) -> String {
    let mut output = String::new();

    if let Some(data) = frame(state, ANALYTICS_EMPTY_MESSAGE, &mut output) {
        output.push_str(&format!("Analytics: {}\n", data.range));
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Total spent:  {:>12}\n",
            format_money(data.total, settings)
        ));
        output.push_str(&format!(
            "This month:   {:>12}\n\n",
            format_money(data.month_total, settings)
        ));

        output.push_str(&format!(
            "{:16} {:>12} {:>6} {:>7}  {}\n",
            "Category", "Amount", "Count", "Share", ""
        ));
        for share in &data.categories {
            output.push_str(&format!(
                "{:16} {:>12} {:>6} {:>7}  {}\n",
                truncate(&share.summary.category, 16),
                format_money(share.summary.total_amount, settings),
                share.summary.transaction_count,
                format_percentage(share.percentage),
                format_bar(share.percentage, 20)
            ));
        }
    }

    output
}
