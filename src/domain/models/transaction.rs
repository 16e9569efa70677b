use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a transaction description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Maximum length of a category name, in characters.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Integer code used by the relational store (0 = income, 1 = expense).
    pub fn code(self) -> i64 {
        match self {
            TransactionType::Income => 0,
            TransactionType::Expense => 1,
        }
    }

    /// Decode a stored integer code; `None` for anything but 0 or 1.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TransactionType::Income),
            1 => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

/// A single recorded income or expense event.
///
/// `amount` is always strictly positive; the sign is implied by
/// `transaction_type`. Identity is `id`, assigned at creation and never
/// reassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}
