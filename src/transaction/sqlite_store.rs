//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Params};

use crate::{
    Error,
    database_id::TransactionId,
    date_time::StoredDateTime,
    transaction::{
        NewTransaction, Transaction,
        core::{TRANSACTION_COLUMNS, map_transaction_row},
        store::{DateFilter, TransactionStore},
    },
};

/// Newest first, and then by ID so rows recorded in the same second keep a stable order.
const NEWEST_FIRST: &str = "ORDER BY date DESC, id DESC";

/// Stores transactions in a SQLite database.
///
/// The transaction table must exist, see [crate::db::initialize].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire the database lock: {error}");
            Error::DatabaseLockError
        })
    }

    /// Run `SELECT`, with the optional `where_clause`, and collect the transactions newest first.
    fn select<P: Params>(
        &self,
        where_clause: Option<&str>,
        params: P,
    ) -> Result<Vec<Transaction>, Error> {
        let where_clause = where_clause
            .map(|clause| format!("WHERE {clause} "))
            .unwrap_or_default();
        let query = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause}{NEWEST_FIRST}"
        );

        self.lock()?
            .prepare(&query)?
            .query_map(params, map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::SqlError))
            .collect()
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::SqlError] if `value` is missing, the description is too long,
    ///   or there is some other SQL error,
    /// - or [Error::DatabaseLockError] if the connection lock is poisoned.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let transaction = connection
            .prepare(&format!(
                "INSERT INTO \"transaction\" (value, description)
                 VALUES (?1, ?2)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (transaction.value, transaction.description),
                map_transaction_row,
            )?;

        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Sum the values of all transactions.
    ///
    /// SQL's `SUM` over zero rows is `NULL`, which is returned as `None`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn sum_values(&self) -> Result<Option<f64>, Error> {
        self.lock()?
            .query_row("SELECT SUM(value) FROM \"transaction\";", [], |row| {
                row.get(0)
            })
            .map_err(|error| error.into())
    }

    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.select(None, ())
    }

    fn get_value_greater_than(&self, threshold: f64) -> Result<Vec<Transaction>, Error> {
        self.select(Some("value > ?1"), [threshold])
    }

    fn get_value_less_than(&self, threshold: f64) -> Result<Vec<Transaction>, Error> {
        self.select(Some("value < ?1"), [threshold])
    }

    /// Query for transactions within the bounds of `filter`.
    ///
    /// A missing bound is bound as `NULL`, which turns its half of the predicate off.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_by_date_filter(&self, filter: &DateFilter) -> Result<Vec<Transaction>, Error> {
        self.select(
            Some("(?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)"),
            (
                filter.start.map(StoredDateTime),
                filter.end.map(StoredDateTime),
            ),
        )
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::{Duration, PrimitiveDateTime, macros::datetime};

    use crate::{
        Error,
        db::initialize,
        transaction::{
            NewTransaction, Transaction,
            store::{DateFilter, TransactionStore},
            test_utils::{insert_scenario, insert_transaction},
        },
    };

    use super::SQLiteTransactionStore;

    fn get_store() -> (SQLiteTransactionStore, Arc<Mutex<Connection>>) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));

        (SQLiteTransactionStore::new(conn.clone()), conn)
    }

    #[test]
    fn create_succeeds() {
        let (store, _) = get_store();

        let result = store.create(NewTransaction::new(-2700.4).description("Fatura do Cartão"));

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.id, 1);
                assert_eq!(transaction.value, -2700.4);
                assert_eq!(transaction.description.as_deref(), Some("Fatura do Cartão"));
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_without_description_succeeds() {
        let (store, _) = get_store();

        let transaction = store
            .create(NewTransaction::new(12.3))
            .expect("Could not create transaction");

        assert_eq!(transaction.description, None);
    }

    #[test]
    fn create_assigns_unique_ids() {
        let (store, _) = get_store();

        let ids: Vec<_> = (1..=5)
            .map(|i| store.create(NewTransaction::new(i as f64)).unwrap().id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn create_fails_without_value() {
        let (store, _) = get_store();

        let result = store.create(NewTransaction {
            value: None,
            description: Some("no value".to_owned()),
        });

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SQL error, got {result:?}"
        );
    }

    #[test]
    fn create_fails_on_long_description() {
        let (store, _) = get_store();

        let result = store.create(NewTransaction::new(1.0).description(&"a".repeat(51)));

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SQL error, got {result:?}"
        );
    }

    #[test]
    fn create_accepts_fifty_multibyte_characters() {
        let (store, _) = get_store();
        let description = "á".repeat(50);

        let result = store.create(NewTransaction::new(1.0).description(&description));

        assert_eq!(result.map(|t| t.description), Ok(Some(description)));
    }

    #[test]
    fn create_fails_on_poisoned_lock() {
        let (store, conn) = get_store();
        let poisoner = conn.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let result = store.create(NewTransaction::new(1.0));

        assert_eq!(result, Err(Error::DatabaseLockError));
    }

    #[test]
    fn get_transaction_by_id_succeeds() {
        let (store, _) = get_store();
        let transaction = store.create(NewTransaction::new(12.3)).unwrap();

        let selected_transaction = store.get(transaction.id);

        assert_eq!(Ok(transaction), selected_transaction);
    }

    #[test]
    fn get_transaction_fails_on_invalid_id() {
        let (store, _) = get_store();
        let transaction = store.create(NewTransaction::new(123.0)).unwrap();

        let maybe_transaction = store.get(transaction.id + 654);

        assert_eq!(maybe_transaction, Err(Error::NotFound));
    }

    #[test]
    fn sum_of_empty_store_is_none() {
        let (store, _) = get_store();

        assert_eq!(store.sum_values(), Ok(None));
    }

    #[test]
    fn sum_matches_arithmetic_sum() {
        let (store, _) = get_store();
        let values = [5000.0, -1000.0, -50.0, 0.0, 12.5];
        for value in values {
            store.create(NewTransaction::new(value)).unwrap();
        }

        let got = store.sum_values().expect("Could not sum values");

        assert_eq!(got, Some(values.iter().sum()));
    }

    #[test]
    fn sum_of_zero_values_is_zero_not_none() {
        let (store, _) = get_store();
        store.create(NewTransaction::new(0.0)).unwrap();

        assert_eq!(store.sum_values(), Ok(Some(0.0)));
    }

    #[test]
    fn get_all_newest_first() {
        let (store, conn) = get_store();
        let mut want = insert_scenario(&conn.lock().unwrap());
        want.sort_by(|a, b| b.date.cmp(&a.date));

        let got = store.get_all().expect("Could not query transactions");

        assert_eq!(got, want);
    }

    #[test]
    fn get_all_breaks_date_ties_by_newest_id() {
        let (store, conn) = get_store();
        let date = datetime!(2025-01-28 15:43:30);
        let want = {
            let conn = conn.lock().unwrap();
            let first = insert_transaction(&conn, 1.0, None, date);
            let second = insert_transaction(&conn, 2.0, None, date);
            vec![second, first]
        };

        let got = store.get_all().unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn incomes_and_expenses_partition_transactions() {
        let (store, conn) = get_store();
        {
            let conn = conn.lock().unwrap();
            insert_scenario(&conn);
            insert_transaction(&conn, 0.0, Some("Zero"), datetime!(2025-01-27 10:00:00));
        }

        let incomes = store.get_value_greater_than(0.0).unwrap();
        let expenses = store.get_value_less_than(0.0).unwrap();
        let all = store.get_all().unwrap();
        let zeroes: Vec<&Transaction> = all.iter().filter(|t| t.value == 0.0).collect();

        assert!(incomes.iter().all(Transaction::is_income));
        assert!(expenses.iter().all(Transaction::is_expense));
        assert_eq!(incomes.len() + expenses.len() + zeroes.len(), all.len());
        for transaction in &all {
            let memberships = [
                incomes.contains(transaction),
                expenses.contains(transaction),
                zeroes.contains(&transaction),
            ];
            assert_eq!(
                memberships.iter().filter(|&&member| member).count(),
                1,
                "{transaction:?} should be in exactly one partition"
            );
        }
    }

    #[test]
    fn expenses_are_newest_first() {
        let (store, conn) = get_store();
        insert_scenario(&conn.lock().unwrap());

        let got: Vec<f64> = store
            .get_value_less_than(0.0)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.value)
            .collect();

        assert_eq!(got, vec![-1000.0, -50.0]);
    }

    #[test]
    fn value_thresholds_are_strict() {
        let (store, _) = get_store();
        store.create(NewTransaction::new(10.0)).unwrap();

        assert!(store.get_value_greater_than(10.0).unwrap().is_empty());
        assert!(store.get_value_less_than(10.0).unwrap().is_empty());
        assert_eq!(store.get_value_greater_than(9.99).unwrap().len(), 1);
    }

    #[test]
    fn date_filter_without_bounds_returns_everything() {
        let (store, conn) = get_store();
        insert_scenario(&conn.lock().unwrap());

        let got = store.get_by_date_filter(&DateFilter::default()).unwrap();

        assert_eq!(got, store.get_all().unwrap());
    }

    #[test]
    fn date_filter_bounds_are_inclusive() {
        let (store, conn) = get_store();
        insert_scenario(&conn.lock().unwrap());

        let got: Vec<f64> = store
            .get_by_date_filter(&DateFilter::new(
                Some(datetime!(2025-01-28 14:20:30)),
                Some(datetime!(2025-01-28 15:43:30)),
            ))
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.value)
            .collect();

        assert_eq!(got, vec![-1000.0, -50.0]);
    }

    #[test]
    fn date_filter_with_reversed_bounds_is_empty() {
        let (store, conn) = get_store();
        insert_scenario(&conn.lock().unwrap());

        let got = store
            .get_by_date_filter(&DateFilter::new(
                Some(datetime!(2025-01-29 15:43:30)),
                Some(datetime!(2025-01-28 14:20:30)),
            ))
            .unwrap();

        assert!(got.is_empty(), "want no transactions, got {got:?}");
    }

    #[test]
    fn date_filter_in_future_is_empty() {
        let (store, conn) = get_store();
        insert_scenario(&conn.lock().unwrap());

        let got = store
            .get_by_date_filter(&DateFilter::new(
                Some(datetime!(2030-12-01 23:59:59)),
                Some(datetime!(2030-12-31 23:59:59)),
            ))
            .unwrap();

        assert!(got.is_empty(), "want no transactions, got {got:?}");
    }

    #[test]
    fn date_filter_agrees_with_filtering_all_transactions() {
        let (store, conn) = get_store();
        let scenario = insert_scenario(&conn.lock().unwrap());

        let mut bounds: Vec<Option<PrimitiveDateTime>> = vec![None];
        for transaction in &scenario {
            for offset in [-1, 0, 1] {
                bounds.push(Some(transaction.date + Duration::seconds(offset)));
            }
        }

        let all = store.get_all().unwrap();
        for &start in &bounds {
            for &end in &bounds {
                let filter = DateFilter::new(start, end);
                let want: Vec<Transaction> = all
                    .iter()
                    .filter(|transaction| filter.contains(transaction.date))
                    .cloned()
                    .collect();

                let got = store.get_by_date_filter(&filter).unwrap();

                assert_eq!(got, want, "filter {filter:?} disagrees with manual filtering");
            }
        }
    }
}
