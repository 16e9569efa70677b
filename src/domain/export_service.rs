use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::config::StorageConfig;
use crate::domain::models::report::ReportResult;

/// Writes a finished monthly report to a CSV file under the export
/// directory. Read-only consumer of [`ReportResult`]; never touches store
/// state.
pub struct ExportService {
    export_dir: PathBuf,
}

impl ExportService {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            export_dir: config.export_dir.clone(),
        }
    }

    /// Export the report as `Report_<year>_<month>.csv`, returning the path
    /// of the written file.
    pub fn export_report(&self, report: &ReportResult, year: i32, month: u32) -> Result<PathBuf> {
        fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(format!("Report_{year}_{month:02}.csv"));

        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
        writer.write_record([format!("Monthly Financial Report - {year}-{month:02}")])?;
        writer.write_record(["Total Income", &report.total_income.to_string()])?;
        writer.write_record(["Total Expense", &report.total_expense.to_string()])?;
        writer.write_record(["Net Balance", &report.net.to_string()])?;
        writer.write_record(["Total Transactions", &report.transaction_count.to_string()])?;
        writer.write_record(["Top Expense Categories"])?;
        writer.write_record(["Category", "Amount"])?;
        for category in &report.top_categories {
            writer.write_record([category.category.as_str(), &category.amount.to_string()])?;
        }
        writer.flush()?;
        Ok(path)
    }
}
