use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tracing::Level;
use uuid::Uuid;

use ledgerlite::config::{StorageBackend, StorageConfig};
use ledgerlite::domain::export_service::ExportService;
use ledgerlite::domain::models::transaction::{Transaction, TransactionType};
use ledgerlite::domain::report_service::ReportService;
use ledgerlite::domain::transaction_service::TransactionService;
use ledgerlite::storage::json::JsonTransactionRepository;
use ledgerlite::storage::sqlite::SqliteTransactionRepository;
use ledgerlite::storage::TransactionStorage;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = StorageConfig::default();
    let backend = match std::env::var("LEDGERLITE_STORAGE")
        .map(|v| v.to_lowercase())
        .as_deref()
    {
        Ok("json") => StorageBackend::Json,
        _ => StorageBackend::Sqlite,
    };
    let storage: Arc<dyn TransactionStorage> = match backend {
        StorageBackend::Json => Arc::new(JsonTransactionRepository::new(&config)?),
        StorageBackend::Sqlite => Arc::new(SqliteTransactionRepository::new(&config).await?),
    };

    let transaction_service = TransactionService::new(storage.clone());
    let report_service = ReportService::new(storage);
    let export_service = ExportService::new(&config);

    println!("Welcome to LedgerLite - Personal Finance Tracker");
    run_menu(&transaction_service, &report_service, &export_service).await
}

async fn run_menu(
    transactions: &TransactionService,
    reports: &ReportService,
    exports: &ExportService,
) -> Result<()> {
    loop {
        println!("\n--- Menu ---");
        println!("1. Add Transaction");
        println!("2. Edit Transaction");
        println!("3. Delete Transaction");
        println!("4. List Recent Transactions");
        println!("5. Generate Report");
        println!("6. Export Report (run report first)");
        println!("7. Quit");

        let choice = read_int("Enter your choice (1-7): ", 1, 7, None);
        let outcome = match choice {
            1 => add_transaction(transactions).await,
            2 => edit_transaction(transactions).await,
            3 => delete_transaction(transactions).await,
            4 => list_transactions(transactions).await,
            5 => generate_report(reports, exports).await,
            6 => {
                println!("Please run option 5 (Report) first, then choose to export.");
                Ok(())
            }
            _ => {
                println!("Goodbye!");
                return Ok(());
            }
        };
        if let Err(err) = outcome {
            println!("Error: {err}. Please try again.");
        }
    }
}

async fn add_transaction(service: &TransactionService) -> Result<()> {
    let transaction_type = read_type("Transaction Type (1=Income, 2=Expense): ", None);
    let date = read_date("Date (YYYY-MM-DD) [today]: ", Local::now().date_naive());
    let description = read_string("Description: ", None);
    let category = read_string("Category: ", None);
    let amount = read_decimal("Amount (>0): ", None);

    let transaction = Transaction {
        id: Uuid::new_v4(),
        date: date.and_time(NaiveTime::MIN),
        description,
        category,
        amount,
        transaction_type,
    };
    service.add_transaction(&transaction).await?;
    println!("Transaction added successfully!");
    Ok(())
}

async fn edit_transaction(service: &TransactionService) -> Result<()> {
    list_transactions(service).await?;

    let Some(existing) = find_by_short_id(service, "Enter ID to edit (or 'q' to cancel): ").await?
    else {
        return Ok(());
    };

    let transaction_type = read_type(
        &format!("Type (1=Income, 2=Expense) [{:?}]: ", existing.transaction_type),
        Some(existing.transaction_type),
    );
    let date = read_date(
        &format!("Date (YYYY-MM-DD) [{}]: ", existing.date.format("%Y-%m-%d")),
        existing.date.date(),
    );
    let description = read_string(
        &format!("Description [{}]: ", existing.description),
        Some(existing.description.clone()),
    );
    let category = read_string(
        &format!("Category [{}]: ", existing.category),
        Some(existing.category.clone()),
    );
    let amount = read_decimal(
        &format!("Amount (>0) [{}]: ", existing.amount),
        Some(existing.amount),
    );

    let updated = Transaction {
        id: existing.id,
        date: date.and_time(NaiveTime::MIN),
        description,
        category,
        amount,
        transaction_type,
    };
    service.update_transaction(&updated).await?;
    println!("Transaction updated successfully!");
    Ok(())
}

async fn delete_transaction(service: &TransactionService) -> Result<()> {
    list_transactions(service).await?;

    let Some(existing) =
        find_by_short_id(service, "Enter ID to delete (or 'q' to cancel): ").await?
    else {
        return Ok(());
    };

    if read_line("Delete this transaction? (y/n): ").to_lowercase() == "y" {
        service.delete_transaction(existing.id).await?;
        println!("Transaction deleted successfully!");
    } else {
        println!("Delete canceled.");
    }
    Ok(())
}

async fn list_transactions(service: &TransactionService) -> Result<()> {
    let transactions = service.get_all_transactions().await?;
    let recent: Vec<_> = transactions.iter().take(20).collect();

    if recent.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    println!("\nRecent Transactions:");
    println!("| ID (short) | Date       | Type    | Category     | Amount     | Description");
    println!("{}", "-".repeat(80));
    for t in recent {
        let short_id = &t.id.to_string()[..8];
        let type_label = match t.transaction_type {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        println!(
            "| {:<10} | {} | {:<7} | {:<12} | {:>10} | {}",
            short_id,
            t.date.format("%Y-%m-%d"),
            type_label,
            t.category,
            t.amount,
            t.description,
        );
    }
    Ok(())
}

async fn generate_report(reports: &ReportService, exports: &ExportService) -> Result<()> {
    let now = Local::now();
    let year = read_int("Year (e.g. 2024) [current]: ", 1900, 2100, Some(now.year()));
    let month = read_int("Month (1-12) [current]: ", 1, 12, Some(now.month() as i32)) as u32;

    let report = reports.generate_monthly_report(year, month).await?;

    println!("\nReport for {year}-{month:02}:");
    println!("Total Income: {}", report.total_income);
    println!("Total Expense: {}", report.total_expense);
    println!("Net Balance: {}", report.net);
    println!("Total Transactions: {}", report.transaction_count);

    if report.top_categories.is_empty() {
        println!("\nNo expense categories.");
    } else {
        println!("\nTop Expense Categories:");
        for category in &report.top_categories {
            println!("  {}: {}", category.category, category.amount);
        }
    }

    if read_line("Export to CSV? (y/n): ").to_lowercase() == "y" {
        let path = exports.export_report(&report, year, month)?;
        println!("Report exported to {}", path.display());
    }
    Ok(())
}

/// Resolve user input to a transaction by full or short (prefix) id.
async fn find_by_short_id(
    service: &TransactionService,
    prompt: &str,
) -> Result<Option<Transaction>> {
    let input = read_line(prompt);
    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        println!("Canceled.");
        return Ok(None);
    }

    if let Ok(id) = Uuid::parse_str(&input) {
        if let Some(found) = service.get_transaction(id).await? {
            return Ok(Some(found));
        }
    } else if input.len() >= 8 {
        let all = service.get_all_transactions().await?;
        if let Some(found) = all
            .into_iter()
            .find(|t| t.id.to_string().starts_with(&input.to_lowercase()))
        {
            return Ok(Some(found));
        }
    }

    println!("Transaction not found. Please try again.");
    Ok(None)
}

fn read_line(prompt: &str) -> String {
    print!("{prompt}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input).ok();
    input.trim().to_string()
}

fn read_string(prompt: &str, default: Option<String>) -> String {
    loop {
        let input = read_line(prompt);
        if input.is_empty() {
            if let Some(default) = &default {
                return default.clone();
            }
            println!("Cannot be empty.");
            continue;
        }
        return input;
    }
}

fn read_type(prompt: &str, default: Option<TransactionType>) -> TransactionType {
    loop {
        match read_line(prompt).as_str() {
            "" => {
                if let Some(default) = default {
                    return default;
                }
            }
            "1" => return TransactionType::Income,
            "2" => return TransactionType::Expense,
            _ => {}
        }
        println!("Invalid type. Enter 1 or 2.");
    }
}

fn read_date(prompt: &str, default: NaiveDate) -> NaiveDate {
    loop {
        let input = read_line(prompt);
        if input.is_empty() {
            return default;
        }
        if let Ok(date) = NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            return date;
        }
        println!("Invalid date. Use YYYY-MM-DD, or press Enter for the default.");
    }
}

fn read_decimal(prompt: &str, default: Option<Decimal>) -> Decimal {
    loop {
        let input = read_line(prompt);
        if input.is_empty() {
            if let Some(default) = default {
                return default;
            }
        } else if let Ok(amount) = input.parse::<Decimal>() {
            if amount > Decimal::ZERO {
                return amount;
            }
        }
        println!("Invalid amount. Enter a positive number.");
    }
}

fn read_int(prompt: &str, min: i32, max: i32, default: Option<i32>) -> i32 {
    loop {
        let input = read_line(prompt);
        if input.is_empty() {
            if let Some(default) = default {
                return default;
            }
        } else if let Ok(value) = input.parse::<i32>() {
            if value >= min && value <= max {
                return value;
            }
        }
        println!("Invalid value. Enter a number between {min} and {max}.");
    }
}
