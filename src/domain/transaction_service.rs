use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::models::transaction::{Transaction, MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN};
use crate::storage::{StoreError, TransactionStorage};

/// Application-facing CRUD over the storage trait.
///
/// Validates transactions before they reach the store; the backends assume
/// validation has already happened.
pub struct TransactionService {
    storage: Arc<dyn TransactionStorage>,
}

impl TransactionService {
    pub fn new(storage: Arc<dyn TransactionStorage>) -> Self {
        Self { storage }
    }

    pub async fn add_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        validate(transaction)?;
        self.storage.store_transaction(transaction).await
    }

    pub async fn get_all_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        self.storage.list_transactions().await
    }

    pub async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        self.storage.get_transaction(id).await
    }

    pub async fn update_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        validate(transaction)?;
        self.storage.update_transaction(transaction).await
    }

    pub async fn delete_transaction(&self, id: Uuid) -> Result<(), StoreError> {
        self.storage.delete_transaction(id).await
    }
}

fn validate(transaction: &Transaction) -> Result<(), StoreError> {
    if transaction.amount <= Decimal::ZERO {
        return Err(StoreError::Validation(
            "amount must be greater than zero".into(),
        ));
    }
    if transaction.description.trim().is_empty() {
        return Err(StoreError::Validation("description cannot be empty".into()));
    }
    if transaction.description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(StoreError::Validation(format!(
            "description exceeds {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    if transaction.category.trim().is_empty() {
        return Err(StoreError::Validation("category cannot be empty".into()));
    }
    if transaction.category.chars().count() > MAX_CATEGORY_LEN {
        return Err(StoreError::Validation(format!(
            "category exceeds {MAX_CATEGORY_LEN} characters"
        )));
    }
    Ok(())
}
