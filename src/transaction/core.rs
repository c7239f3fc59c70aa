//! Defines the core data models and database schema for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{database_id::TransactionId, date_time::StoredDateTime};

/// The maximum number of characters in a transaction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 50;

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are created through a [TransactionStore](super::TransactionStore)
/// from a [NewTransaction], which assigns the `id` and `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent (negative) or earned (positive).
    pub value: f64,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// When the transaction was recorded, in local time.
    #[serde(with = "crate::date_time::iso_local")]
    pub date: PrimitiveDateTime,
}

impl Transaction {
    /// Whether the transaction is money earned.
    pub fn is_income(&self) -> bool {
        self.value > 0.0
    }

    /// Whether the transaction is money spent.
    pub fn is_expense(&self) -> bool {
        self.value < 0.0
    }
}

/// The caller-supplied fields of a transaction that has not been stored yet.
///
/// `value` is optional so that a request without a value reaches the store and
/// is rejected by the `NOT NULL` constraint, rather than by the JSON parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTransaction {
    /// The monetary amount of the transaction.
    ///
    /// Positive values represent income, negative values represent expenses.
    ///
    /// # Examples
    /// - `5000.0` - Salary deposit
    /// - `-1000.0` - Rent payment
    /// - `-50.0` - Ride share
    pub value: Option<f64>,

    /// A human-readable description of the transaction, at most
    /// [MAX_DESCRIPTION_LENGTH] characters.
    pub description: Option<String>,
}

impl NewTransaction {
    /// Create a new transaction with `value` and no description.
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            description: None,
        }
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// The database assigns `date` on insert and refuses to change it afterwards.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                value REAL NOT NULL,
                description TEXT CHECK (description IS NULL OR length(description) <= {MAX_DESCRIPTION_LENGTH}),
                date TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
                )"
        ),
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    connection.execute(
        "CREATE TRIGGER IF NOT EXISTS transaction_date_immutable
            BEFORE UPDATE OF date ON \"transaction\"
            WHEN NEW.date IS NOT OLD.date
            BEGIN
                SELECT RAISE(ABORT, 'transaction date cannot be changed');
            END;",
        (),
    )?;

    Ok(())
}

/// The columns selected by [map_transaction_row], in order.
pub const TRANSACTION_COLUMNS: &str = "id, value, description, date";

/// Map a database row to a Transaction.
///
/// The row must contain the columns in [TRANSACTION_COLUMNS].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let value = row.get(1)?;
    let description = row.get(2)?;
    let StoredDateTime(date) = row.get(3)?;

    Ok(Transaction {
        id,
        value,
        description,
        date,
    })
}
