//! The operations behind the transaction endpoints.

use time::PrimitiveDateTime;

use crate::{
    Error,
    transaction::{
        NewTransaction,
        mapper::{
            TransactionGetResponse, TransactionPostRequest, TransactionPostResponse,
            to_get_responses,
        },
        store::{DateFilter, TransactionStore},
    },
};

/// Creates transactions and answers queries about them using a [TransactionStore].
///
/// The service keeps no state of its own, every call goes to the store.
#[derive(Debug, Clone)]
pub struct TransactionService<S>
where
    S: TransactionStore,
{
    store: S,
}

impl<S> TransactionService<S>
where
    S: TransactionStore,
{
    /// Create a service that reads and writes transactions through `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store a new transaction built from `request`.
    ///
    /// # Errors
    /// Returns an error if the store rejects the transaction, e.g. because it has no value.
    pub fn create(
        &self,
        request: TransactionPostRequest,
    ) -> Result<TransactionPostResponse, Error> {
        let transaction = self.store.create(NewTransaction::from(request))?;

        tracing::debug!(
            "Stored transaction {} with value {}",
            transaction.id,
            transaction.value
        );

        Ok(transaction.into())
    }

    /// The sum of all transaction values, or `None` if there are no transactions.
    ///
    /// # Errors
    /// Returns an error if the store could not be queried.
    pub fn balance(&self) -> Result<Option<f64>, Error> {
        self.store.sum_values()
    }

    /// The transactions dated between `start` and `end` (inclusive), newest first.
    ///
    /// A missing bound leaves that side of the range open.
    ///
    /// # Errors
    /// Returns an error if the store could not be queried.
    pub fn list(
        &self,
        start: Option<PrimitiveDateTime>,
        end: Option<PrimitiveDateTime>,
    ) -> Result<Vec<TransactionGetResponse>, Error> {
        let filter = DateFilter::new(start, end);
        tracing::debug!("Listing transactions with {filter:?}");

        self.store.get_by_date_filter(&filter).map(to_get_responses)
    }

    /// The transactions with a positive value, newest first.
    ///
    /// # Errors
    /// Returns an error if the store could not be queried.
    pub fn incomes(&self) -> Result<Vec<TransactionGetResponse>, Error> {
        self.store.get_value_greater_than(0.0).map(to_get_responses)
    }

    /// The transactions with a negative value, newest first.
    ///
    /// # Errors
    /// Returns an error if the store could not be queried.
    pub fn expenses(&self) -> Result<Vec<TransactionGetResponse>, Error> {
        self.store.get_value_less_than(0.0).map(to_get_responses)
    }
}
