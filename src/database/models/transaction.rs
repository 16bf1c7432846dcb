use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::CategoryRef;

/// Position of a transaction inside an installment plan, e.g. 2 of 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installments {
    pub number: i64,
    pub count: i64,
}

impl Installments {
    pub fn validate(&self) -> Result<(), String> {
        if self.number < 1 {
            return Err("installment number must be at least 1".into());
        }
        if self.count < 2 {
            return Err("installment count must be at least 2".into());
        }
        if self.number > self.count {
            return Err("installment number cannot exceed the count".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub transaction_id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub transacted_on: NaiveDate,
    pub notes: Option<String>,
    pub receipt_url: Option<String>,
    pub category_id: Option<i64>,
    pub payment_method_id: Option<i64>,
    pub place_id: Option<i64>,
    pub installments: Option<Installments>,
    pub created_at: DateTime<Utc>,
}

/// A transaction together with the categories it references. Each slot is
/// `None` when the transaction never had that reference or the category
/// was deleted afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: Option<CategoryRef>,
    pub payment_method: Option<CategoryRef>,
    pub place: Option<CategoryRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installments_accept_a_plain_plan() {
        assert!(Installments { number: 2, count: 10 }.validate().is_ok());
        assert!(Installments { number: 1, count: 2 }.validate().is_ok());
        assert!(Installments { number: 10, count: 10 }.validate().is_ok());
    }

    #[test]
    fn installments_reject_out_of_range_values() {
        assert!(Installments { number: 0, count: 4 }.validate().is_err());
        assert!(Installments { number: 1, count: 1 }.validate().is_err());
        assert!(Installments { number: 5, count: 4 }.validate().is_err());
    }
}
