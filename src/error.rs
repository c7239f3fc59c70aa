//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The message sent to the client when exporting transactions fails.
pub const EXPORT_FAILED_MESSAGE: &str = "Unable to export transactions";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A date-time could not be parsed.
    ///
    /// Callers should include the offending text in the message.
    #[error("invalid date-time {0}")]
    InvalidDateTime(String),

    /// Transactions could not be serialized for export.
    ///
    /// The string holds the underlying serialization error for the server logs,
    /// the client only ever sees [EXPORT_FAILED_MESSAGE].
    #[error("could not export transactions: {0}")]
    ExportError(String),

    /// An unhandled/unexpected SQL error.
    ///
    /// This includes constraint violations such as a missing transaction value.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// axum could not extract the request body or query string.
    ///
    /// `status` is the status code axum chose for the rejection, e.g. 415 for a
    /// missing JSON content type or 422 for a field of the wrong type.
    #[error("invalid request ({status}): {message}")]
    InvalidRequest {
        /// The status code to respond with.
        status: StatusCode,
        /// axum's description of what was wrong with the request.
        message: String,
    },
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent with an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// The HTTP status code of the response.
    pub status: u16,
    /// A human readable description of what went wrong.
    pub message: String,
}

impl ErrorMessage {
    /// Create the response for `status_code` with `message` as the JSON body.
    pub fn response(status_code: StatusCode, message: &str) -> Response {
        let body = Self {
            status: status_code.as_u16(),
            message: message.to_owned(),
        };

        (status_code, Json(body)).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => ErrorMessage::response(
                StatusCode::NOT_FOUND,
                "The requested resource could not be found.",
            ),
            Error::InvalidDateTime(ref details) => ErrorMessage::response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid date-time {details}. Use the format 2025-01-29T15:43:30."),
            ),
            Error::InvalidRequest {
                status,
                ref message,
            } => ErrorMessage::response(status, message),
            Error::ExportError(ref details) => {
                tracing::error!("Could not export transactions: {details}");
                ErrorMessage::response(StatusCode::INTERNAL_SERVER_ERROR, EXPORT_FAILED_MESSAGE)
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorMessage::response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details.",
                )
            }
        }
    }
}
