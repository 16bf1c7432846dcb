use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::backend::error::ApiResult;
use crate::backend::extract::CurrentUser;
use crate::backend::AppState;
use crate::database::db::queries::{self, TransactionFilter};
use crate::database::models::Summary;

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Materializes the date-filtered rows and folds them in memory; the
/// aggregation itself lives on [`Summary`].
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(params): Query<SummaryParams>,
) -> ApiResult<Json<Summary>> {
    let filter = TransactionFilter {
        start_date: params.start_date,
        end_date: params.end_date,
        ..Default::default()
    };
    let records = queries::get_transactions(&state.db, current.user.user_id, &filter).await?;
    Ok(Json(Summary::from_records(&records)))
}
