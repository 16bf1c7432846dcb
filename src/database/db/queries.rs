use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

use crate::database::models::{
    Category, CategoryKind, CategoryRef, Installments, Session, Transaction, TransactionRecord,
    User,
};

/*
This file contains the SQL and row-mapping logic; every query is scoped to
the owning user so one account can never read or touch another's rows.
 */

fn parse_amount(text: &str) -> Result<Decimal, sqlx::Error> {
    Decimal::from_str(text)
        .map_err(|e| sqlx::Error::Decode(format!("invalid decimal amount: {}", e).into()))
}

/*==========User Queries===========*/

pub async fn create_user(
    pool: &Pool<Sqlite>,
    email: &str,
    password_hash: &str,
    display_name: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, display_name, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING user_id, email, display_name, created_at
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(display_name)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn get_user(pool: &Pool<Sqlite>, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, email, display_name, created_at
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

// Login-time lookup; the only place the stored hash leaves the database.
pub async fn get_user_credentials(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<(User, String)>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT user_id, email, display_name, created_at, password_hash
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(|row| {
        let user = User {
            user_id: row.try_get("user_id")?,
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            created_at: row.try_get("created_at")?,
        };
        let password_hash: String = row.try_get("password_hash")?;
        Ok((user, password_hash))
    })
    .transpose()
}

/*==========Session Queries===========*/

pub async fn create_session(
    pool: &Pool<Sqlite>,
    user_id: i64,
    token: &str,
    now: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Result<Session, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (token, user_id, created_at, expires_at)
        VALUES (?, ?, ?, ?)
        RETURNING session_id, user_id, token, created_at, expires_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(now)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

// Expiry is checked by the caller against the clock, not here.
pub async fn find_session(
    pool: &Pool<Sqlite>,
    token: &str,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        r#"
        SELECT session_id, user_id, token, created_at, expires_at
        FROM sessions
        WHERE token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

pub async fn delete_session(pool: &Pool<Sqlite>, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_expired_sessions(
    pool: &Pool<Sqlite>,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/*==========Category Queries===========*/

pub async fn create_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    kind: CategoryKind,
    name: &str,
    emoji: Option<&str>,
    description: Option<&str>,
) -> Result<Category, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (user_id, kind, name, emoji, description, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING category_id, user_id, kind, name, emoji, description, created_at
        "#,
    )
    .bind(user_id)
    .bind(kind)
    .bind(name)
    .bind(emoji)
    .bind(description)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn get_all_categories(
    pool: &Pool<Sqlite>,
    user_id: i64,
    kind: CategoryKind,
) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT category_id, user_id, kind, name, emoji, description, created_at
        FROM categories
        WHERE user_id = ? AND kind = ?
        ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .bind(kind)
    .fetch_all(pool)
    .await
}

pub async fn get_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    kind: CategoryKind,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT category_id, user_id, kind, name, emoji, description, created_at
        FROM categories
        WHERE category_id = ? AND user_id = ? AND kind = ?
        "#,
    )
    .bind(category_id)
    .bind(user_id)
    .bind(kind)
    .fetch_optional(pool)
    .await
}

// Kind-agnostic lookup, used when checking the references on an incoming
// transaction where the kind decides between missing and wrong-kind.
pub async fn get_category_by_id(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT category_id, user_id, kind, name, emoji, description, created_at
        FROM categories
        WHERE category_id = ? AND user_id = ?
        "#,
    )
    .bind(category_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

// None means the row does not exist, belongs to someone else, or is of
// another kind; callers report all three as not-found.
pub async fn update_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    kind: CategoryKind,
    category_id: i64,
    name: &str,
    emoji: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
        SET name = ?, emoji = ?, description = ?
        WHERE category_id = ? AND user_id = ? AND kind = ?
        RETURNING category_id, user_id, kind, name, emoji, description, created_at
        "#,
    )
    .bind(name)
    .bind(emoji)
    .bind(description)
    .bind(category_id)
    .bind(user_id)
    .bind(kind)
    .fetch_optional(pool)
    .await
}

pub async fn delete_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    kind: CategoryKind,
    category_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM categories
        WHERE category_id = ? AND user_id = ? AND kind = ?
        "#,
    )
    .bind(category_id)
    .bind(user_id)
    .bind(kind)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Transaction Queries===========*/

pub struct NewTransaction<'a> {
    pub description: &'a str,
    pub amount: Decimal,
    pub transacted_on: NaiveDate,
    pub notes: Option<&'a str>,
    pub receipt_url: Option<&'a str>,
    pub category_id: Option<i64>,
    pub payment_method_id: Option<i64>,
    pub place_id: Option<i64>,
    pub installments: Option<Installments>,
}

/// Listing filter. A negative `limit` disables the cap (SQLite treats a
/// negative LIMIT as unbounded), which is what the summary query wants.
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cursor: Option<(NaiveDate, i64)>,
    pub limit: i64,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            cursor: None,
            limit: -1,
        }
    }
}

pub async fn create_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    new: NewTransaction<'_>,
) -> Result<Transaction, sqlx::Error> {
    let amount_str = new.amount.to_string();

    let row = sqlx::query(
        r#"
        INSERT INTO transactions (
            user_id, description, amount, transacted_on, notes, receipt_url,
            category_id, payment_method_id, place_id,
            installment_number, installment_count, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(new.description)
    .bind(amount_str)
    .bind(new.transacted_on)
    .bind(new.notes)
    .bind(new.receipt_url)
    .bind(new.category_id)
    .bind(new.payment_method_id)
    .bind(new.place_id)
    .bind(new.installments.map(|i| i.number))
    .bind(new.installments.map(|i| i.count))
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    map_transaction_row(&row)
}

pub async fn get_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    transaction_id: i64,
) -> Result<Option<Transaction>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT *
        FROM transactions
        WHERE transaction_id = ? AND user_id = ?
        "#,
    )
    .bind(transaction_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(map_transaction_row).transpose()
}

// Newest first, transaction_id as the tiebreaker so the order is total.
// The cursor row itself is included; callers fetch one row past the page
// size to learn whether another page exists.
pub async fn get_transactions(
    pool: &Pool<Sqlite>,
    user_id: i64,
    filter: &TransactionFilter,
) -> Result<Vec<TransactionRecord>, sqlx::Error> {
    let (cursor_date, cursor_id) = match filter.cursor {
        Some((date, id)) => (Some(date), Some(id)),
        None => (None, None),
    };

    sqlx::query(
        r#"
        SELECT
            t.transaction_id, t.user_id, t.description, t.amount, t.transacted_on,
            t.notes, t.receipt_url, t.category_id, t.payment_method_id, t.place_id,
            t.installment_number, t.installment_count, t.created_at,
            c.category_id  AS cat_ref_id, c.kind  AS cat_ref_kind,
            c.name         AS cat_ref_name, c.emoji AS cat_ref_emoji,
            pm.category_id AS pm_ref_id,  pm.kind  AS pm_ref_kind,
            pm.name        AS pm_ref_name, pm.emoji AS pm_ref_emoji,
            pl.category_id AS pl_ref_id,  pl.kind  AS pl_ref_kind,
            pl.name        AS pl_ref_name, pl.emoji AS pl_ref_emoji
        FROM transactions t
        LEFT JOIN categories c  ON c.category_id  = t.category_id
        LEFT JOIN categories pm ON pm.category_id = t.payment_method_id
        LEFT JOIN categories pl ON pl.category_id = t.place_id
        WHERE t.user_id = ?
          AND (? IS NULL OR t.transacted_on >= ?)
          AND (? IS NULL OR t.transacted_on <= ?)
          AND (? IS NULL
               OR t.transacted_on < ?
               OR (t.transacted_on = ? AND t.transaction_id <= ?))
        ORDER BY t.transacted_on DESC, t.transaction_id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(filter.start_date)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .bind(filter.end_date)
    .bind(cursor_date)
    .bind(cursor_date)
    .bind(cursor_date)
    .bind(cursor_id)
    .bind(filter.limit)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|row| {
        Ok(TransactionRecord {
            transaction: map_transaction_row(row)?,
            category: map_category_ref(row, "cat_ref")?,
            payment_method: map_category_ref(row, "pm_ref")?,
            place: map_category_ref(row, "pl_ref")?,
        })
    })
    .collect::<Result<Vec<TransactionRecord>, sqlx::Error>>()
}

pub async fn delete_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    transaction_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM transactions
        WHERE transaction_id = ? AND user_id = ?
        "#,
    )
    .bind(transaction_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn map_transaction_row(row: &SqliteRow) -> Result<Transaction, sqlx::Error> {
    let amount_text: String = row.try_get("amount")?;
    let amount = parse_amount(&amount_text)?;

    let installment_number: Option<i64> = row.try_get("installment_number")?;
    let installment_count: Option<i64> = row.try_get("installment_count")?;
    let installments = match (installment_number, installment_count) {
        (Some(number), Some(count)) => Some(Installments { number, count }),
        _ => None,
    };

    Ok(Transaction {
        transaction_id: row.try_get("transaction_id")?,
        user_id: row.try_get("user_id")?,
        description: row.try_get("description")?,
        amount,
        transacted_on: row.try_get("transacted_on")?,
        notes: row.try_get("notes")?,
        receipt_url: row.try_get("receipt_url")?,
        category_id: row.try_get("category_id")?,
        payment_method_id: row.try_get("payment_method_id")?,
        place_id: row.try_get("place_id")?,
        installments,
        created_at: row.try_get("created_at")?,
    })
}

fn map_category_ref(row: &SqliteRow, prefix: &str) -> Result<Option<CategoryRef>, sqlx::Error> {
    let id: Option<i64> = row.try_get(format!("{}_id", prefix).as_str())?;
    let Some(category_id) = id else {
        return Ok(None);
    };

    Ok(Some(CategoryRef {
        category_id,
        kind: row.try_get(format!("{}_kind", prefix).as_str())?,
        name: row.try_get(format!("{}_name", prefix).as_str())?,
        emoji: row.try_get(format!("{}_emoji", prefix).as_str())?,
    }))
}
