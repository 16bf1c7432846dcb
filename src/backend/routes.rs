use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::backend::handlers::{auth, categories, summary, transactions};
use crate::backend::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/income-types",
            post(categories::create_income_type).get(categories::list_income_types),
        )
        .route(
            "/api/income-types/:id",
            put(categories::update_income_type).delete(categories::delete_income_type),
        )
        .route(
            "/api/expense-types",
            post(categories::create_expense_type).get(categories::list_expense_types),
        )
        .route(
            "/api/expense-types/:id",
            put(categories::update_expense_type).delete(categories::delete_expense_type),
        )
        .route(
            "/api/payment-methods",
            post(categories::create_payment_method).get(categories::list_payment_methods),
        )
        .route(
            "/api/payment-methods/:id",
            put(categories::update_payment_method).delete(categories::delete_payment_method),
        )
        .route(
            "/api/places",
            post(categories::create_place).get(categories::list_places),
        )
        .route(
            "/api/places/:id",
            put(categories::update_place).delete(categories::delete_place),
        )
        .route(
            "/api/transactions",
            post(transactions::create).get(transactions::list),
        )
        .route("/api/transactions/:id", delete(transactions::remove))
        .route("/api/summary", get(summary::get))
}
