//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::Response,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    error::ErrorMessage,
    transaction::{
        TransactionStore, create_transaction_endpoint, export_csv_endpoint, export_json_endpoint,
        get_balance_endpoint, get_expenses_endpoint, get_incomes_endpoint,
        get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint::<S>).get(get_transactions_endpoint::<S>),
        )
        .route(endpoints::INCOMES, get(get_incomes_endpoint::<S>))
        .route(endpoints::EXPENSES, get(get_expenses_endpoint::<S>))
        .route(endpoints::BALANCE, get(get_balance_endpoint::<S>))
        .route(endpoints::EXPORT_JSON, get(export_json_endpoint::<S>))
        .route(endpoints::EXPORT_CSV, get(export_csv_endpoint::<S>))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    ErrorMessage::response(
        StatusCode::NOT_FOUND,
        "The requested resource could not be found.",
    )
}
