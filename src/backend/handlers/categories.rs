//! One handler family per category kind. The four groups behave
//! identically apart from the kind they are pinned to, so the sixteen
//! route functions are thin wrappers over a shared core.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer};

use crate::backend::error::{ApiError, ApiResult};
use crate::backend::extract::CurrentUser;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::{Category, CategoryKind};

pub const MAX_NAME_CHARS: usize = 80;

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
}

/// Places carry no emoji; an emoji key in the request body is ignored.
#[derive(Debug, Deserialize)]
pub struct PlacePayload {
    pub name: String,
    pub description: Option<String>,
}

impl From<PlacePayload> for CategoryPayload {
    fn from(payload: PlacePayload) -> Self {
        CategoryPayload {
            name: payload.name,
            emoji: None,
            description: payload.description,
        }
    }
}

/// Update body. The outer `Option` distinguishes an absent key (keep the
/// stored value) from a present one; `null` is not accepted for either
/// field.
#[derive(Debug, Deserialize)]
pub struct CategoryUpdate {
    pub name: String,
    #[serde(default, deserialize_with = "present")]
    pub emoji: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceUpdate {
    pub name: String,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

// Serde folds `null` and an absent key into the same `None`; wrapping the
// value on sight keeps the two apart.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<PlaceUpdate> for CategoryUpdate {
    fn from(payload: PlaceUpdate) -> Self {
        CategoryUpdate {
            name: payload.name,
            emoji: None,
            description: payload.description,
        }
    }
}

fn merge_field(
    field: &str,
    incoming: Option<Option<String>>,
    stored: Option<String>,
) -> ApiResult<Option<String>> {
    match incoming {
        None => Ok(stored),
        Some(None) => Err(ApiError::Validation(format!("{} must be a string", field))),
        Some(value) => Ok(value),
    }
}

fn validated_name(raw: &str) -> ApiResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name is required".into()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ApiError::Validation(format!(
            "name must be at most {} characters",
            MAX_NAME_CHARS
        )));
    }
    Ok(name.to_string())
}

async fn create(
    state: &AppState,
    user_id: i64,
    kind: CategoryKind,
    payload: CategoryPayload,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let name = validated_name(&payload.name)?;
    let category = queries::create_category(
        &state.db,
        user_id,
        kind,
        &name,
        payload.emoji.as_deref(),
        payload.description.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn list(
    state: &AppState,
    user_id: i64,
    kind: CategoryKind,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = queries::get_all_categories(&state.db, user_id, kind).await?;
    Ok(Json(categories))
}

// Loads the row first so fields absent from the body keep their stored
// values; only what the body names gets overwritten.
async fn update(
    state: &AppState,
    user_id: i64,
    kind: CategoryKind,
    category_id: i64,
    payload: CategoryUpdate,
) -> ApiResult<Json<Category>> {
    let name = validated_name(&payload.name)?;
    let current = queries::get_category(&state.db, user_id, kind, category_id)
        .await?
        .ok_or_else(|| ApiError::not_found(kind.label()))?;
    let emoji = merge_field("emoji", payload.emoji, current.emoji)?;
    let description = merge_field("description", payload.description, current.description)?;

    let updated = queries::update_category(
        &state.db,
        user_id,
        kind,
        category_id,
        &name,
        emoji.as_deref(),
        description.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::not_found(kind.label()))?;
    Ok(Json(updated))
}

async fn remove(
    state: &AppState,
    user_id: i64,
    kind: CategoryKind,
    category_id: i64,
) -> ApiResult<StatusCode> {
    let deleted = queries::delete_category(&state.db, user_id, kind, category_id).await?;
    if !deleted {
        return Err(ApiError::not_found(kind.label()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/*==========Income types===========*/

pub async fn create_income_type(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    create(&state, current.user.user_id, CategoryKind::Income, payload).await
}

pub async fn list_income_types(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<Category>>> {
    list(&state, current.user.user_id, CategoryKind::Income).await
}

pub async fn update_income_type(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    update(&state, current.user.user_id, CategoryKind::Income, id, payload).await
}

pub async fn delete_income_type(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    remove(&state, current.user.user_id, CategoryKind::Income, id).await
}

/*==========Expense types===========*/

pub async fn create_expense_type(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    create(&state, current.user.user_id, CategoryKind::Expense, payload).await
}

pub async fn list_expense_types(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<Category>>> {
    list(&state, current.user.user_id, CategoryKind::Expense).await
}

pub async fn update_expense_type(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    update(&state, current.user.user_id, CategoryKind::Expense, id, payload).await
}

pub async fn delete_expense_type(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    remove(&state, current.user.user_id, CategoryKind::Expense, id).await
}

/*==========Payment methods===========*/

pub async fn create_payment_method(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    create(&state, current.user.user_id, CategoryKind::PaymentMethod, payload).await
}

pub async fn list_payment_methods(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<Category>>> {
    list(&state, current.user.user_id, CategoryKind::PaymentMethod).await
}

pub async fn update_payment_method(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    update(&state, current.user.user_id, CategoryKind::PaymentMethod, id, payload).await
}

pub async fn delete_payment_method(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    remove(&state, current.user.user_id, CategoryKind::PaymentMethod, id).await
}

/*==========Places===========*/

pub async fn create_place(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<PlacePayload>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    create(&state, current.user.user_id, CategoryKind::Place, payload.into()).await
}

pub async fn list_places(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<Category>>> {
    list(&state, current.user.user_id, CategoryKind::Place).await
}

pub async fn update_place(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PlaceUpdate>,
) -> ApiResult<Json<Category>> {
    update(&state, current.user.user_id, CategoryKind::Place, id, payload.into()).await
}

pub async fn delete_place(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    remove(&state, current.user.user_id, CategoryKind::Place, id).await
}
