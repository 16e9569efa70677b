use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{info, warn};
use uuid::Uuid;

use super::connection::DbConnection;
use crate::config::StorageConfig;
use crate::domain::models::transaction::{Transaction, TransactionType};
use crate::storage::json::DATA_FILE;
use crate::storage::{StoreError, TransactionStorage};

// Lexicographic order of this format matches chronological order, so the
// date column can be sorted directly in SQL.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// SQLite-backed transaction repository, one row per transaction.
///
/// Amounts are stored as exact decimal strings and the transaction type as
/// an integer code, per the schema in [`DbConnection`].
pub struct SqliteTransactionRepository {
    db: DbConnection,
}

impl SqliteTransactionRepository {
    /// Open the repository, creating the database as needed.
    ///
    /// Runs the one-time import of a leftover JSON data file before the
    /// repository is handed to any caller. A failed import logs a warning
    /// and leaves the store usable.
    pub async fn new(config: &StorageConfig) -> Result<Self, StoreError> {
        let db = DbConnection::new(&config.data_dir).await?;
        let repo = Self { db };
        if let Err(err) = repo
            .migrate_from_json(config.data_dir.join(DATA_FILE))
            .await
        {
            warn!("migration from JSON data file failed: {err}");
        }
        Ok(repo)
    }

    /// Import every transaction from the file-backed store's document.
    ///
    /// Skipped when no document exists or the table already holds rows, so
    /// a second run never re-imports. All rows are inserted in a single
    /// database transaction and the source file is deleted only after the
    /// commit succeeds.
    async fn migrate_from_json(&self, json_path: PathBuf) -> Result<(), StoreError> {
        if !json_path.exists() {
            return Ok(());
        }
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(self.db.pool())
            .await?;
        if count > 0 {
            return Ok(());
        }

        let json = fs::read_to_string(&json_path)?;
        let transactions: Vec<Transaction> = serde_json::from_str(&json)?;
        if transactions.is_empty() {
            return Ok(());
        }

        let mut tx = self.db.pool().begin().await?;
        for transaction in &transactions {
            sqlx::query(
                r#"
                INSERT INTO transactions (id, date, description, category, amount, type)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(transaction.id.to_string())
            .bind(transaction.date.format(DATE_FORMAT).to_string())
            .bind(&transaction.description)
            .bind(&transaction.category)
            .bind(transaction.amount.to_string())
            .bind(transaction.transaction_type.code())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        fs::remove_file(&json_path)?;
        info!(
            "migrated {} transactions from {}",
            transactions.len(),
            json_path.display()
        );
        Ok(())
    }

    fn map_row(row: &SqliteRow) -> Result<Transaction, StoreError> {
        let id: String = row.get("id");
        let date: String = row.get("date");
        let amount: String = row.get("amount");
        let code: i64 = row.get("type");
        Ok(Transaction {
            id: Uuid::from_str(&id)
                .map_err(|e| StoreError::Validation(format!("bad id {id:?}: {e}")))?,
            date: NaiveDateTime::parse_from_str(&date, DATE_FORMAT)
                .map_err(|e| StoreError::Validation(format!("bad date {date:?}: {e}")))?,
            description: row.get("description"),
            category: row.get("category"),
            amount: Decimal::from_str(&amount)
                .map_err(|e| StoreError::Validation(format!("bad amount {amount:?}: {e}")))?,
            transaction_type: TransactionType::from_code(code).ok_or_else(|| {
                StoreError::Validation(format!("unknown transaction type code {code}"))
            })?,
        })
    }
}

#[async_trait]
impl TransactionStorage for SqliteTransactionRepository {
    async fn store_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, date, description, category, amount, type)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction.id.to_string())
        .bind(transaction.date.format(DATE_FORMAT).to_string())
        .bind(&transaction.description)
        .bind(&transaction.category)
        .bind(transaction.amount.to_string())
        .bind(transaction.transaction_type.code())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, description, category, amount, type
            FROM transactions
            ORDER BY date DESC, rowid ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, date, description, category, amount, type
            FROM transactions
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET date = ?, description = ?, category = ?, amount = ?, type = ?
            WHERE id = ?
            "#,
        )
        .bind(transaction.date.format(DATE_FORMAT).to_string())
        .bind(&transaction.description)
        .bind(&transaction.category)
        .bind(transaction.amount.to_string())
        .bind(transaction.transaction_type.code())
        .bind(transaction.id.to_string())
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(transaction.id));
        }
        Ok(())
    }

    async fn delete_transaction(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}
