//! Request and response bodies for the transaction API and the conversions
//! between them and [Transaction].
//!
//! The conversions copy fields verbatim and never fail. Anything invalid in a
//! request is left for the store to reject.

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction},
};

/// The JSON body for creating a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPostRequest {
    /// The amount of money earned (positive) or spent (negative).
    #[serde(default)]
    pub value: Option<f64>,
    /// What the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
}

/// The JSON body sent back after creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPostResponse {
    /// The ID assigned by the store.
    pub id: TransactionId,
    /// The amount of money earned (positive) or spent (negative).
    pub value: f64,
    /// What the transaction was for.
    pub description: Option<String>,
    /// When the transaction was recorded.
    #[serde(with = "crate::date_time::iso_local")]
    pub date: PrimitiveDateTime,
}

/// A transaction as it appears in lists and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionGetResponse {
    /// The ID assigned by the store.
    pub id: TransactionId,
    /// The amount of money earned (positive) or spent (negative).
    pub value: f64,
    /// What the transaction was for.
    pub description: Option<String>,
    /// When the transaction was recorded.
    #[serde(with = "crate::date_time::iso_local")]
    pub date: PrimitiveDateTime,
}

/// The JSON body for the balance of all transactions.
///
/// `balance` is `null` when there are no transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// The sum of all transaction values.
    pub balance: Option<f64>,
}

impl From<TransactionPostRequest> for NewTransaction {
    fn from(request: TransactionPostRequest) -> Self {
        Self {
            value: request.value,
            description: request.description,
        }
    }
}

impl From<Transaction> for TransactionPostResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            value: transaction.value,
            description: transaction.description,
            date: transaction.date,
        }
    }
}

impl From<Transaction> for TransactionGetResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            value: transaction.value,
            description: transaction.description,
            date: transaction.date,
        }
    }
}

/// Convert stored transactions into list responses, keeping their order.
pub fn to_get_responses(transactions: Vec<Transaction>) -> Vec<TransactionGetResponse> {
    transactions
        .into_iter()
        .map(TransactionGetResponse::from)
        .collect()
}
