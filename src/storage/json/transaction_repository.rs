use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::domain::models::transaction::Transaction;
use crate::storage::{StoreError, TransactionStorage};

/// Name of the data document under the configured data directory.
pub const DATA_FILE: &str = "transactions.json";

/// File-backed transaction repository.
///
/// Holds every transaction in memory and mirrors the full set to a single
/// JSON document after each mutation. The document is rewritten whole; a
/// crash mid-write can leave it corrupt, which the next startup recovers
/// from by starting empty.
pub struct JsonTransactionRepository {
    file_path: PathBuf,
    transactions: Mutex<Vec<Transaction>>,
}

impl JsonTransactionRepository {
    /// Open the repository, loading the data document if one exists.
    ///
    /// An unreadable or malformed document logs a warning and yields an
    /// empty collection. The document itself is left on disk for manual
    /// recovery.
    pub fn new(config: &StorageConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.data_dir)?;
        let file_path = config.data_dir.join(DATA_FILE);
        let transactions = match Self::load(&file_path) {
            Ok(transactions) => transactions,
            Err(err) => {
                warn!(
                    "data file {} unreadable ({err}), starting empty",
                    file_path.display()
                );
                Vec::new()
            }
        };
        Ok(Self {
            file_path,
            transactions: Mutex::new(transactions),
        })
    }

    fn load(path: &Path) -> Result<Vec<Transaction>, StoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Serialize the whole collection and overwrite the data document.
    fn save(&self, transactions: &[Transaction]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(transactions)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionStorage for JsonTransactionRepository {
    async fn store_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let mut transactions = self.transactions.lock().unwrap();
        transactions.push(transaction.clone());
        self.save(&transactions)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let transactions = self.transactions.lock().unwrap();
        let mut sorted = transactions.clone();
        // Stable sort: equal dates keep insertion order.
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sorted)
    }

    async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        let transactions = self.transactions.lock().unwrap();
        Ok(transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let mut transactions = self.transactions.lock().unwrap();
        let index = transactions
            .iter()
            .position(|t| t.id == transaction.id)
            .ok_or(StoreError::NotFound(transaction.id))?;
        transactions[index] = transaction.clone();
        self.save(&transactions)
    }

    async fn delete_transaction(&self, id: Uuid) -> Result<(), StoreError> {
        let mut transactions = self.transactions.lock().unwrap();
        if let Some(index) = transactions.iter().position(|t| t.id == id) {
            transactions.remove(index);
        }
        self.save(&transactions)
    }
}
