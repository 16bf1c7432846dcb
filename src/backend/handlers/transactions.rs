use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::backend::error::{ApiError, ApiResult};
use crate::backend::extract::CurrentUser;
use crate::backend::AppState;
use crate::database::db::queries::{self, NewTransaction, TransactionFilter};
use crate::database::models::{CategoryKind, Installments, Transaction, TransactionRecord};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub description: String,
    pub amount: Decimal,
    pub transacted_on: NaiveDate,
    pub notes: Option<String>,
    pub receipt_url: Option<String>,
    pub category_id: Option<i64>,
    pub payment_method_id: Option<i64>,
    pub place_id: Option<i64>,
    pub installments: Option<Installments>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub cursor: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct TransactionPage {
    pub items: Vec<TransactionRecord>,
    pub next_cursor: Option<i64>,
}

pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let user_id = current.user.user_id;

    let description = payload.description.trim();
    if description.is_empty() {
        return Err(ApiError::Validation("description is required".into()));
    }
    if payload.amount <= Decimal::ZERO {
        return Err(ApiError::Validation("amount must be positive".into()));
    }
    if let Some(installments) = payload.installments {
        installments.validate().map_err(ApiError::Validation)?;
    }

    let Some(category_id) = payload.category_id else {
        return Err(ApiError::Validation(
            "an income or expense type reference is required".into(),
        ));
    };
    let category = queries::get_category_by_id(&state.db, user_id, category_id)
        .await?
        .ok_or_else(|| ApiError::not_found("category"))?;
    if !matches!(category.kind, CategoryKind::Income | CategoryKind::Expense) {
        return Err(ApiError::Validation(
            "category_id must reference an income or expense type".into(),
        ));
    }

    if let Some(id) = payload.payment_method_id {
        let reference = queries::get_category_by_id(&state.db, user_id, id)
            .await?
            .ok_or_else(|| ApiError::not_found("payment method"))?;
        if reference.kind != CategoryKind::PaymentMethod {
            return Err(ApiError::Validation(
                "payment_method_id must reference a payment method".into(),
            ));
        }
    }
    if let Some(id) = payload.place_id {
        let reference = queries::get_category_by_id(&state.db, user_id, id)
            .await?
            .ok_or_else(|| ApiError::not_found("place"))?;
        if reference.kind != CategoryKind::Place {
            return Err(ApiError::Validation(
                "place_id must reference a place".into(),
            ));
        }
    }

    let created = queries::create_transaction(
        &state.db,
        user_id,
        NewTransaction {
            description,
            amount: payload.amount,
            transacted_on: payload.transacted_on,
            notes: payload.notes.as_deref(),
            receipt_url: payload.receipt_url.as_deref(),
            category_id: Some(category_id),
            payment_method_id: payload.payment_method_id,
            place_id: payload.place_id,
            installments: payload.installments,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

// Keyset pagination: the cursor is the id of the first row of the next
// page, exactly the id handed back as `next_cursor` by the previous call.
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<TransactionPage>> {
    let user_id = current.user.user_id;
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(ApiError::Validation(format!(
            "limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    let cursor = match params.cursor {
        Some(id) => {
            let row = queries::get_transaction(&state.db, user_id, id)
                .await?
                .ok_or_else(|| ApiError::Validation("invalid cursor".into()))?;
            Some((row.transacted_on, row.transaction_id))
        }
        None => None,
    };

    let filter = TransactionFilter {
        start_date: params.start_date,
        end_date: params.end_date,
        cursor,
        // One row past the page tells us whether another page exists.
        limit: limit + 1,
    };
    let mut items = queries::get_transactions(&state.db, user_id, &filter).await?;

    let next_cursor = if items.len() as i64 > limit {
        items.pop().map(|record| record.transaction.transaction_id)
    } else {
        None
    };

    Ok(Json(TransactionPage { items, next_cursor }))
}

pub async fn remove(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = queries::delete_transaction(&state.db, current.user.user_id, id).await?;
    if !deleted {
        return Err(ApiError::not_found("transaction"));
    }
    Ok(StatusCode::NO_CONTENT)
}
