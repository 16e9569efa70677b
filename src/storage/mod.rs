//! Storage backends for transactions.
//!
//! The domain layer depends only on the [`TransactionStorage`] trait; the
//! JSON file backend and the SQLite backend are selected at construction
//! time by the caller.

pub mod error;
pub mod json;
pub mod sqlite;
pub mod traits;

pub use error::StoreError;
pub use traits::TransactionStorage;
