//! Defines the read-only endpoints for listing transactions and getting the balance.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::{
    Error,
    date_time::parse_optional_query_date_time,
    transaction::{
        TransactionService, TransactionStore,
        mapper::{BalanceResponse, TransactionGetResponse},
    },
};

/// The query parameters for listing transactions.
///
/// Both bounds are inclusive. An absent or empty parameter leaves that side of
/// the range open. The dates are parsed by the handler so that a malformed
/// date is reported as [Error::InvalidDateTime].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    /// The earliest date to include, e.g. `2025-01-28T14:20:30`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// The latest date to include, e.g. `2025-01-29T15:43:30`.
    #[serde(default)]
    pub end_date: Option<String>,
}

/// A route handler for listing transactions in a date range, newest first.
pub async fn get_transactions_endpoint<S>(
    State(service): State<TransactionService<S>>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<Vec<TransactionGetResponse>>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let Query(query) = query?;
    let start = parse_optional_query_date_time(query.start_date.as_deref())?;
    let end = parse_optional_query_date_time(query.end_date.as_deref())?;

    service.list(start, end).map(Json)
}

/// A route handler for listing transactions with a positive value.
pub async fn get_incomes_endpoint<S>(
    State(service): State<TransactionService<S>>,
) -> Result<Json<Vec<TransactionGetResponse>>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    service.incomes().map(Json)
}

/// A route handler for listing transactions with a negative value.
pub async fn get_expenses_endpoint<S>(
    State(service): State<TransactionService<S>>,
) -> Result<Json<Vec<TransactionGetResponse>>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    service.expenses().map(Json)
}

/// A route handler for the sum of all transaction values.
///
/// The balance is `null` rather than zero when there are no transactions.
pub async fn get_balance_endpoint<S>(
    State(service): State<TransactionService<S>>,
) -> Result<Json<BalanceResponse>, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let balance = service.balance()?;

    Ok(Json(BalanceResponse { balance }))
}
