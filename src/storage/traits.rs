use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::transaction::Transaction;
use crate::storage::error::StoreError;

/// Trait defining the interface for transaction storage operations.
///
/// This abstracts away the specific storage implementation details, allowing
/// the domain layer to work with either the JSON file backend or the SQLite
/// backend without modification. Every mutation is durably persisted before
/// the call returns.
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// Store a new transaction.
    ///
    /// Ids are generated by the caller and assumed unique; behavior on a
    /// duplicate id is backend-defined.
    async fn store_transaction(&self, transaction: &Transaction) -> Result<(), StoreError>;

    /// List every stored transaction, ordered by date descending.
    ///
    /// Transactions sharing a date come back in a stable order consistent
    /// with insertion; the two backends need not agree on tie order.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Retrieve a transaction by id, `None` if absent.
    async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, StoreError>;

    /// Replace the stored transaction carrying the same id.
    ///
    /// Fails with [`StoreError::NotFound`] when no such transaction exists.
    async fn update_transaction(&self, transaction: &Transaction) -> Result<(), StoreError>;

    /// Delete a transaction by id. Deleting an absent id is a no-op.
    async fn delete_transaction(&self, id: Uuid) -> Result<(), StoreError>;
}
