use rusqlite::Connection;
use time::{PrimitiveDateTime, macros::datetime};

use crate::{
    date_time::StoredDateTime,
    transaction::{
        Transaction,
        core::{TRANSACTION_COLUMNS, map_transaction_row},
    },
};

/// Insert a transaction with a fixed `date`, bypassing the database default.
#[track_caller]
pub fn insert_transaction(
    connection: &Connection,
    value: f64,
    description: Option<&str>,
    date: PrimitiveDateTime,
) -> Transaction {
    connection
        .query_row(
            &format!(
                "INSERT INTO \"transaction\" (value, description, date) VALUES (?1, ?2, ?3) \
                RETURNING {TRANSACTION_COLUMNS}"
            ),
            (value, description, StoredDateTime(date)),
            map_transaction_row,
        )
        .expect("Could not insert transaction")
}

/// Insert a salary and two expenses over two days, in insertion order.
#[track_caller]
pub fn insert_scenario(connection: &Connection) -> Vec<Transaction> {
    vec![
        insert_transaction(
            connection,
            5000.0,
            Some("Salário"),
            datetime!(2025-01-29 15:43:30),
        ),
        insert_transaction(
            connection,
            -1000.0,
            Some("Aluguel"),
            datetime!(2025-01-28 15:43:30),
        ),
        insert_transaction(connection, -50.0, Some("Uber"), datetime!(2025-01-28 14:20:30)),
    ]
}
