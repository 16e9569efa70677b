//! LedgerLite: a personal finance tracker.
//!
//! The domain layer works against the [`storage::TransactionStorage`] trait,
//! which has two interchangeable backends: a JSON file store and a SQLite
//! store. The SQLite store imports any leftover JSON data file exactly once
//! at startup.

pub mod config;
pub mod domain;
pub mod storage;
