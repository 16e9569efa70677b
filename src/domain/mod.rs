pub mod export_service;
pub mod models;
pub mod report_service;
pub mod transaction_service;
