use rust_decimal::Decimal;
use serde::Serialize;

/// A category and its summed expense amount within a report period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Decimal,
}

/// The computed result of a monthly report. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportResult {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub net: Decimal,
    /// Top expense categories by summed amount, at most three.
    pub top_categories: Vec<CategoryAmount>,
    /// Count of every transaction in the period, income and expense alike.
    pub transaction_count: usize,
}
