//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the database schema
//! - The `TransactionStore` trait and its SQLite implementation
//! - The request/response bodies and the service that ties them to a store
//! - The route handlers for the transaction API

mod core;
mod create_endpoint;
mod export_endpoint;
pub mod mapper;
mod query_endpoints;
mod service;
mod sqlite_store;
mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use self::core::{NewTransaction, Transaction, create_transaction_table};
pub use create_endpoint::create_transaction_endpoint;
pub use export_endpoint::{export_csv_endpoint, export_json_endpoint};
pub use query_endpoints::{
    get_balance_endpoint, get_expenses_endpoint, get_incomes_endpoint, get_transactions_endpoint,
};
pub use service::TransactionService;
pub use sqlite_store::SQLiteTransactionStore;
pub use store::TransactionStore;
