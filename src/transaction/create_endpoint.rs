//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error,
    transaction::{
        TransactionService, TransactionStore,
        mapper::{TransactionPostRequest, TransactionPostResponse},
    },
};

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created` and the stored transaction, including the ID and
/// date assigned by the store. A body that is not a JSON transaction is rejected
/// with a JSON error message.
pub async fn create_transaction_endpoint<S>(
    State(service): State<TransactionService<S>>,
    request: Result<Json<TransactionPostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionPostResponse>), Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let Json(request) = request?;
    let transaction = service.create(request)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
