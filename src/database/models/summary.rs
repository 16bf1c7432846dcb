use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::category::CategoryKind;
use super::transaction::TransactionRecord;

/// Aggregated view of a set of transactions. Breakdowns are keyed by the
/// current name of the referenced category; transactions whose category
/// was deleted still count toward `transaction_count` but toward no total.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub income_by_type: BTreeMap<String, Decimal>,
    pub expense_by_type: BTreeMap<String, Decimal>,
    pub transaction_count: usize,
}

impl Summary {
    /// Folds the records in a single pass.
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let mut summary = Summary::default();
        for record in records {
            summary.transaction_count += 1;
            let Some(category) = &record.category else {
                continue;
            };
            let amount = record.transaction.amount;
            match category.kind {
                CategoryKind::Income => {
                    summary.total_income += amount;
                    *summary
                        .income_by_type
                        .entry(category.name.clone())
                        .or_default() += amount;
                }
                CategoryKind::Expense => {
                    summary.total_expense += amount;
                    *summary
                        .expense_by_type
                        .entry(category.name.clone())
                        .or_default() += amount;
                }
                // The category slot of a transaction only ever references
                // income or expense kinds.
                CategoryKind::PaymentMethod | CategoryKind::Place => {}
            }
        }
        summary.balance = summary.total_income - summary.total_expense;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::category::CategoryRef;
    use crate::database::models::transaction::Transaction;
    use chrono::{NaiveDate, Utc};

    fn record(amount: &str, category: Option<(CategoryKind, &str)>) -> TransactionRecord {
        TransactionRecord {
            transaction: Transaction {
                transaction_id: 1,
                user_id: 1,
                description: "coffee".into(),
                amount: amount.parse().unwrap(),
                transacted_on: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                notes: None,
                receipt_url: None,
                category_id: category.as_ref().map(|_| 1),
                payment_method_id: None,
                place_id: None,
                installments: None,
                created_at: Utc::now(),
            },
            category: category.map(|(kind, name)| CategoryRef {
                category_id: 1,
                kind,
                name: name.into(),
                emoji: None,
            }),
            payment_method: None,
            place: None,
        }
    }

    #[test]
    fn empty_input_folds_to_zeroes() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::ZERO);
        assert_eq!(summary.transaction_count, 0);
        assert!(summary.income_by_type.is_empty());
    }

    #[test]
    fn totals_and_breakdowns_group_by_name() {
        let records = vec![
            record("1200.00", Some((CategoryKind::Income, "Salary"))),
            record("75.50", Some((CategoryKind::Income, "Freelance"))),
            record("300.00", Some((CategoryKind::Income, "Salary"))),
            record("42.10", Some((CategoryKind::Expense, "Groceries"))),
            record("9.90", Some((CategoryKind::Expense, "Groceries"))),
        ];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.total_income, "1575.50".parse().unwrap());
        assert_eq!(summary.total_expense, "52.00".parse().unwrap());
        assert_eq!(summary.balance, "1523.50".parse().unwrap());
        assert_eq!(summary.transaction_count, 5);
        assert_eq!(
            summary.income_by_type["Salary"],
            "1500.00".parse().unwrap()
        );
        assert_eq!(
            summary.income_by_type["Freelance"],
            "75.50".parse().unwrap()
        );
        assert_eq!(summary.expense_by_type["Groceries"], "52.00".parse().unwrap());
    }

    #[test]
    fn orphaned_transactions_only_raise_the_count() {
        let records = vec![
            record("10.00", Some((CategoryKind::Income, "Salary"))),
            record("99.99", None),
        ];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.total_income, "10.00".parse().unwrap());
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.balance, "10.00".parse().unwrap());
    }
}
