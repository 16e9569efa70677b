mod transaction_repository;

pub use transaction_repository::{JsonTransactionRepository, DATA_FILE};
