use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// The four groups a user can file categories under. Income and expense
/// kinds drive the money direction of a transaction; payment methods and
/// places are descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum CategoryKind {
    Income,
    Expense,
    PaymentMethod,
    Place,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
            CategoryKind::PaymentMethod => "payment_method",
            CategoryKind::Place => "place",
        }
    }

    /// Human label used in error messages ("income type not found").
    pub fn label(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income type",
            CategoryKind::Expense => "expense type",
            CategoryKind::PaymentMethod => "payment method",
            CategoryKind::Place => "place",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            "payment_method" => Ok(CategoryKind::PaymentMethod),
            "place" => Ok(CategoryKind::Place),
            other => Err(format!("unknown category kind: {other}")),
        }
    }
}

#[derive(FromRow, Debug, Clone, Serialize)]
pub struct Category {
    pub category_id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub kind: CategoryKind,
    pub name: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Slim view of a category embedded in transaction listings.
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub category_id: i64,
    pub kind: CategoryKind,
    pub name: String,
    pub emoji: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            CategoryKind::Income,
            CategoryKind::Expense,
            CategoryKind::PaymentMethod,
            CategoryKind::Place,
        ] {
            assert_eq!(kind.as_str().parse::<CategoryKind>(), Ok(kind));
        }
    }

    #[test]
    fn kind_rejects_unknown_names() {
        assert!("groceries".parse::<CategoryKind>().is_err());
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&CategoryKind::PaymentMethod).unwrap();
        assert_eq!(json, "\"payment_method\"");
    }
}
