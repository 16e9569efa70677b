use std::fs;
use std::path::Path;

use sqlx::migrate::MigrateDatabase;
use sqlx::{Sqlite, SqlitePool};
use tracing::warn;

use crate::storage::StoreError;

/// Name of the database file under the configured data directory.
pub const DB_FILE: &str = "ledgerlite.db";

/// DbConnection manages the SQLite database file and its schema.
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
}

impl DbConnection {
    /// Open (or create) the database under `data_dir` and ensure the schema.
    ///
    /// A file that cannot be opened as a database is deleted and recreated
    /// from scratch. The data loss is logged as a warning rather than
    /// failing startup.
    pub async fn new(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;
        let db_path = data_dir.join(DB_FILE);
        let pool = match Self::open(&db_path).await {
            Ok(pool) => pool,
            Err(err) => {
                warn!(
                    "recreating unreadable database file {}: {err}",
                    db_path.display()
                );
                if db_path.exists() {
                    fs::remove_file(&db_path)?;
                }
                Self::open(&db_path).await?
            }
        };
        Ok(Self { pool })
    }

    async fn open(db_path: &Path) -> Result<SqlitePool, StoreError> {
        let url = format!("sqlite:{}", db_path.display());
        if !Sqlite::database_exists(&url).await.unwrap_or(false) {
            Sqlite::create_database(&url).await?;
        }
        let pool = SqlitePool::connect(&url).await?;
        if let Err(err) = Self::setup_schema(&pool).await {
            pool.close().await;
            return Err(err);
        }
        Ok(pool)
    }

    /// Set up the required database schema.
    async fn setup_schema(pool: &SqlitePool) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                description TEXT NOT NULL CHECK (length(description) <= 500),
                category TEXT NOT NULL CHECK (length(category) <= 100),
                amount TEXT NOT NULL,
                type INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_date
            ON transactions(date DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
