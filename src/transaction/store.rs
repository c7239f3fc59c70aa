//! Defines the transaction store trait.

use time::PrimitiveDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction},
};

/// Handles the creation and retrieval of transactions.
///
/// Every method that returns many transactions returns them newest first.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// The store assigns the ID and the date.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// The sum of the values of all transactions.
    ///
    /// Returns `None` if there are no transactions.
    fn sum_values(&self) -> Result<Option<f64>, Error>;

    /// Retrieve every transaction in the store.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions with a value strictly greater than `threshold`.
    fn get_value_greater_than(&self, threshold: f64) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions with a value strictly less than `threshold`.
    fn get_value_less_than(&self, threshold: f64) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions with a date that passes `filter`.
    fn get_by_date_filter(&self, filter: &DateFilter) -> Result<Vec<Transaction>, Error>;
}

/// Inclusive bounds on the date of a transaction, where a missing bound does not
/// restrict the date.
///
/// A filter whose `start` is after its `end` matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    /// The earliest date to include.
    pub start: Option<PrimitiveDateTime>,
    /// The latest date to include.
    pub end: Option<PrimitiveDateTime>,
}

impl DateFilter {
    /// Create a filter from optional bounds.
    pub fn new(start: Option<PrimitiveDateTime>, end: Option<PrimitiveDateTime>) -> Self {
        Self { start, end }
    }

    /// Whether `date` lies within the bounds of the filter.
    pub fn contains(&self, date: PrimitiveDateTime) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}
