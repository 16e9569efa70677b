pub mod report;
pub mod transaction;
