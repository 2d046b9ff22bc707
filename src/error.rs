//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    alert::Alert, amount::Amount, endpoints, internal_server_error::ServerFault,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested account was not found.
    ///
    /// For HTTP request handlers, the client should check that the account ID
    /// is correct and that the account has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested account could not be found")]
    NotFound,

    /// A withdrawal asked for more money than the account holds.
    ///
    /// Nothing is written to the database when this error is returned.
    #[error("insufficient funds: balance is {balance}, tried to withdraw {amount}")]
    InsufficientFunds {
        /// The balance at the time of the withdrawal.
        balance: Amount,
        /// The amount that was requested.
        amount: Amount,
    },

    /// The user provided malformed input, e.g. an amount that is not a
    /// number or a non-positive deposit.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 787 => {
                Error::NotFound
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// A form that cannot be extracted, e.g. one with a missing field, is reported
/// to the user like any other malformed input.
impl From<FormRejection> for Error {
    fn from(rejection: FormRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::DatabaseLockError => ServerFault::DatabaseUnavailable.into_response(),
            Error::SqlError(error) => {
                tracing::error!("A query failed while rendering a page: {error}");
                ServerFault::StorageFailure.into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ServerFault::Unexpected.into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// A poisoned database lock cannot be recovered from by the user, so htmx
    /// is told to redirect to the internal server error page instead.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::DatabaseLockError => {
                return (
                    HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
                    .into_response();
            }
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Account not found.".to_owned(),
                    details: "Check the account ID and try again.".to_owned(),
                },
            ),
            Error::InsufficientFunds { balance, amount } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Insufficient balance.".to_owned(),
                    details: format!(
                        "The account holds {balance}, which is less than the requested {amount}."
                    ),
                },
            ),
            Error::InvalidInput(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid input".to_owned(),
                    details: reason,
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
