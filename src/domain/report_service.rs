use std::sync::Arc;

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::domain::models::report::{CategoryAmount, ReportResult};
use crate::domain::models::transaction::{Transaction, TransactionType};
use crate::storage::{StoreError, TransactionStorage};

const TOP_CATEGORY_LIMIT: usize = 3;

/// Generates monthly aggregate reports from stored transactions.
pub struct ReportService {
    storage: Arc<dyn TransactionStorage>,
}

impl ReportService {
    pub fn new(storage: Arc<dyn TransactionStorage>) -> Self {
        Self { storage }
    }

    /// Build the aggregate for the given calendar year and month (1-12).
    ///
    /// Totals use exact decimal sums. Top categories cover expenses only,
    /// ordered by summed amount descending and capped at three. A month
    /// with no transactions yields zero totals and an empty category list.
    pub async fn generate_monthly_report(
        &self,
        year: i32,
        month: u32,
    ) -> Result<ReportResult, StoreError> {
        let all = self.storage.list_transactions().await?;
        let filtered: Vec<Transaction> = all
            .into_iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .collect();

        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        for transaction in &filtered {
            match transaction.transaction_type {
                TransactionType::Income => total_income += transaction.amount,
                TransactionType::Expense => total_expense += transaction.amount,
            }
        }

        // Group expenses by exact category string, keeping the order in
        // which each category first appears in the date-descending list.
        let mut groups: Vec<CategoryAmount> = Vec::new();
        for transaction in filtered
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Expense)
        {
            match groups.iter_mut().find(|g| g.category == transaction.category) {
                Some(group) => group.amount += transaction.amount,
                None => groups.push(CategoryAmount {
                    category: transaction.category.clone(),
                    amount: transaction.amount,
                }),
            }
        }
        // Stable sort: equal sums keep first-occurrence order.
        groups.sort_by(|a, b| b.amount.cmp(&a.amount));
        groups.truncate(TOP_CATEGORY_LIMIT);

        Ok(ReportResult {
            total_income,
            total_expense,
            net: total_income - total_expense,
            top_categories: groups,
            transaction_count: filtered.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    /// In-memory stand-in for a real storage backend.
    #[derive(Default)]
    struct FakeTransactionStorage {
        transactions: Mutex<Vec<Transaction>>,
    }

    #[async_trait]
    impl TransactionStorage for FakeTransactionStorage {
        async fn store_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
            self.transactions.lock().unwrap().push(transaction.clone());
            Ok(())
        }

        async fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
            let mut all = self.transactions.lock().unwrap().clone();
            all.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(all)
        }

        async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
            Ok(self
                .transactions
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == id)
                .cloned())
        }

        async fn update_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
            let mut all = self.transactions.lock().unwrap();
            let index = all
                .iter()
                .position(|t| t.id == transaction.id)
                .ok_or(StoreError::NotFound(transaction.id))?;
            all[index] = transaction.clone();
            Ok(())
        }

        async fn delete_transaction(&self, id: Uuid) -> Result<(), StoreError> {
            self.transactions.lock().unwrap().retain(|t| t.id != id);
            Ok(())
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    async fn store(
        storage: &FakeTransactionStorage,
        date: NaiveDateTime,
        category: &str,
        amount: Decimal,
        transaction_type: TransactionType,
    ) {
        storage
            .store_transaction(&Transaction {
                id: Uuid::new_v4(),
                date,
                description: format!("{category} entry"),
                category: category.to_string(),
                amount,
                transaction_type,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn monthly_totals_net_count_and_top_categories() {
        let storage = Arc::new(FakeTransactionStorage::default());
        store(&storage, date(2024, 5, 1), "Salary", dec!(3000), TransactionType::Income).await;
        store(&storage, date(2024, 5, 15), "Bonus", dec!(500), TransactionType::Income).await;
        store(&storage, date(2024, 5, 8), "Food", dec!(200), TransactionType::Expense).await;
        store(&storage, date(2024, 5, 3), "Housing", dec!(1200), TransactionType::Expense).await;
        store(&storage, date(2024, 5, 20), "Housing", dec!(150), TransactionType::Expense).await;

        let report = ReportService::new(storage)
            .generate_monthly_report(2024, 5)
            .await
            .unwrap();

        assert_eq!(report.total_income, dec!(3500));
        assert_eq!(report.total_expense, dec!(1550));
        assert_eq!(report.net, dec!(1950));
        assert_eq!(report.transaction_count, 5);
        assert_eq!(
            report.top_categories,
            vec![
                CategoryAmount {
                    category: "Housing".to_string(),
                    amount: dec!(1350),
                },
                CategoryAmount {
                    category: "Food".to_string(),
                    amount: dec!(200),
                },
            ]
        );
    }

    #[tokio::test]
    async fn empty_month_yields_zeros() {
        let storage = Arc::new(FakeTransactionStorage::default());
        let report = ReportService::new(storage)
            .generate_monthly_report(2024, 5)
            .await
            .unwrap();

        assert_eq!(report.total_income, Decimal::ZERO);
        assert_eq!(report.total_expense, Decimal::ZERO);
        assert_eq!(report.net, Decimal::ZERO);
        assert_eq!(report.transaction_count, 0);
        assert!(report.top_categories.is_empty());
    }

    #[tokio::test]
    async fn adjacent_months_are_excluded() {
        let storage = Arc::new(FakeTransactionStorage::default());
        store(&storage, date(2024, 4, 30), "Food", dec!(80), TransactionType::Expense).await;
        store(&storage, date(2024, 5, 1), "Food", dec!(25), TransactionType::Expense).await;
        store(&storage, date(2024, 6, 1), "Food", dec!(60), TransactionType::Expense).await;
        store(&storage, date(2023, 5, 10), "Food", dec!(40), TransactionType::Expense).await;

        let report = ReportService::new(storage)
            .generate_monthly_report(2024, 5)
            .await
            .unwrap();

        assert_eq!(report.total_expense, dec!(25));
        assert_eq!(report.transaction_count, 1);
    }

    #[tokio::test]
    async fn top_categories_are_capped_at_three() {
        let storage = Arc::new(FakeTransactionStorage::default());
        store(&storage, date(2024, 5, 1), "Housing", dec!(900), TransactionType::Expense).await;
        store(&storage, date(2024, 5, 2), "Food", dec!(400), TransactionType::Expense).await;
        store(&storage, date(2024, 5, 3), "Transport", dec!(120), TransactionType::Expense).await;
        store(&storage, date(2024, 5, 4), "Leisure", dec!(60), TransactionType::Expense).await;

        let report = ReportService::new(storage)
            .generate_monthly_report(2024, 5)
            .await
            .unwrap();

        let categories: Vec<&str> = report
            .top_categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Housing", "Food", "Transport"]);
    }

    #[tokio::test]
    async fn equal_sums_keep_first_occurrence_order() {
        let storage = Arc::new(FakeTransactionStorage::default());
        // Scanning date-descending, "Books" appears before "Games".
        store(&storage, date(2024, 5, 20), "Books", dec!(100), TransactionType::Expense).await;
        store(&storage, date(2024, 5, 10), "Games", dec!(100), TransactionType::Expense).await;

        let report = ReportService::new(storage)
            .generate_monthly_report(2024, 5)
            .await
            .unwrap();

        let categories: Vec<&str> = report
            .top_categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Books", "Games"]);
    }

    #[tokio::test]
    async fn decimal_sums_have_no_float_drift() {
        let storage = Arc::new(FakeTransactionStorage::default());
        for _ in 0..10 {
            store(&storage, date(2024, 5, 5), "Food", dec!(0.10), TransactionType::Expense).await;
        }

        let report = ReportService::new(storage)
            .generate_monthly_report(2024, 5)
            .await
            .unwrap();
        assert_eq!(report.total_expense, dec!(1.00));
    }
}
