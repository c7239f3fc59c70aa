//! Defines the endpoints for downloading every transaction as a JSON or CSV file.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    transaction::{TransactionService, TransactionStore, mapper::TransactionGetResponse},
};

/// The header row of the CSV export.
const CSV_HEADER: [&str; 4] = ["id", "value", "description", "date"];

/// A route handler that sends all transactions, newest first, as the attachment
/// `transactions.json`.
pub async fn export_json_endpoint<S>(
    State(service): State<TransactionService<S>>,
) -> Result<Response, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let transactions = service.list(None, None)?;
    let body = transactions_to_json(&transactions)?;

    Ok(attachment(body, "application/json", "transactions.json"))
}

/// A route handler that sends all transactions, newest first, as the attachment `transactions.csv`.
pub async fn export_csv_endpoint<S>(
    State(service): State<TransactionService<S>>,
) -> Result<Response, Error>
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let transactions = service.list(None, None)?;
    let body = transactions_to_csv(&transactions)?;

    Ok(attachment(body, "text/csv", "transactions.csv"))
}

fn attachment(body: Vec<u8>, content_type: &str, file_name: &str) -> Response {
    tracing::debug!("Exporting {} bytes as {file_name}", body.len());

    (
        [
            (CONTENT_TYPE, content_type.to_owned()),
            (CONTENT_LENGTH, body.len().to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={file_name}"),
            ),
        ],
        body,
    )
        .into_response()
}

/// Serialize `transactions` as a JSON array.
///
/// # Errors
/// Returns an [Error::ExportError] if serialization fails.
pub fn transactions_to_json(transactions: &[TransactionGetResponse]) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(transactions).map_err(|error| Error::ExportError(error.to_string()))
}

/// Serialize `transactions` as CSV with the columns `id,value,description,date`.
///
/// The header is written even when there are no transactions. A missing
/// description is written as an empty field.
///
/// # Errors
/// Returns an [Error::ExportError] if serialization fails.
pub fn transactions_to_csv(transactions: &[TransactionGetResponse]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(export_error)?;

    for transaction in transactions {
        writer.serialize(transaction).map_err(export_error)?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::ExportError(error.to_string()))
}

fn export_error(error: csv::Error) -> Error {
    Error::ExportError(error.to_string())
}
