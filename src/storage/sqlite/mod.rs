mod connection;
mod transaction_repository;

pub use connection::{DbConnection, DB_FILE};
pub use transaction_repository::SqliteTransactionRepository;
