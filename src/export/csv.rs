//! CSV export
//!
//! Writes the history list and the category breakdown in a
//! spreadsheet-friendly layout. Amounts are plain decimals without a
//! currency symbol; dates are RFC 3339 in UTC.

use std::io::Write;

use serde::Serialize;

use crate::error::{ExpensioError, ExpensioResult};
use crate::models::Expense;
use crate::views::CategoryShare;

#[derive(Serialize)]
struct ExpenseRow<'a> {
    id: String,
    date: String,
    title: &'a str,
    category: &'a str,
    amount: String,
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    category: &'a str,
    amount: String,
    count: usize,
    percentage: String,
}

/// Export expenses in the given order; returns the number of rows written
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpensioResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // serialize() only emits headers with the first row
    if expenses.is_empty() {
        csv_writer.write_record(["id", "date", "title", "category", "amount"])?;
    }

    for expense in expenses {
        csv_writer.serialize(ExpenseRow {
            id: expense.id.as_uuid().to_string(),
            date: expense.created_at.to_rfc3339(),
            title: &expense.title,
            category: &expense.category,
            amount: expense.amount.to_string(),
        })?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpensioError::Export(e.to_string()))?;
    Ok(expenses.len())
}

/// Export a category breakdown; returns the number of rows written
pub fn export_categories_csv<W: Write>(
    categories: &[CategoryShare],
    writer: W,
) -> ExpensioResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if categories.is_empty() {
        csv_writer.write_record(["category", "amount", "count", "percentage"])?;
    }

    for share in categories {
        csv_writer.serialize(CategoryRow {
            category: &share.summary.category,
            amount: share.summary.total_amount.to_string(),
            count: share.summary.transaction_count,
            percentage: format!("{:.1}", share.percentage),
        })?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpensioError::Export(e.to_string()))?;
    Ok(categories.len())
}
