//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    transaction::{SQLiteTransactionStore, TransactionService, TransactionStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: TransactionStore + Clone + Send + Sync,
{
    /// The service for creating and querying [transactions](crate::transaction::Transaction).
    pub transaction_service: TransactionService<S>,
}

impl<S> AppState<S>
where
    S: TransactionStore + Clone + Send + Sync,
{
    /// Create a new [AppState] that serves transactions from `transaction_store`.
    pub fn new(transaction_store: S) -> Self {
        Self {
            transaction_service: TransactionService::new(transaction_store),
        }
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(db_connection: Connection) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(SQLiteTransactionStore::new(connection)))
}

impl<S> FromRef<AppState<S>> for TransactionService<S>
where
    S: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<S>) -> Self {
        state.transaction_service.clone()
    }
}
