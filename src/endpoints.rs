//! The API endpoints URIs.

/// The route to create and list transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to list transactions with a positive value.
pub const INCOMES: &str = "/transactions/incomes";
/// The route to list transactions with a negative value.
pub const EXPENSES: &str = "/transactions/expenses";
/// The route to get the sum of all transaction values.
pub const BALANCE: &str = "/transactions/balance";
/// The route to download all transactions as a JSON file.
pub const EXPORT_JSON: &str = "/transactions/export/json";
/// The route to download all transactions as a CSV file.
pub const EXPORT_CSV: &str = "/transactions/export/csv";
