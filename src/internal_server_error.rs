//! The 500 page shown when the ledger cannot complete a request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Why a request could not be completed.
///
/// Each fault carries its own advice, none of them reveal database details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerFault {
    /// The shared database connection is unusable, e.g. its lock was poisoned.
    DatabaseUnavailable,
    /// A query failed for a reason other than bad input.
    StorageFailure,
    /// Anything else.
    Unexpected,
}

impl ServerFault {
    fn description(self) -> &'static str {
        match self {
            ServerFault::DatabaseUnavailable => "The ledger database is unavailable.",
            ServerFault::StorageFailure => "The ledger could not save or read your request.",
            ServerFault::Unexpected => "Sorry, something went wrong.",
        }
    }

    fn fix(self) -> &'static str {
        match self {
            ServerFault::DatabaseUnavailable => {
                "Restart the server. No balances were changed by the failed request."
            }
            ServerFault::StorageFailure => {
                "No balances were changed. Try again, or check the server logs if it keeps happening."
            }
            ServerFault::Unexpected => "Try again later or check the server logs.",
        }
    }
}

impl IntoResponse for ServerFault {
    fn into_response(self) -> Response {
        let page = error_view(
            "Internal Server Error",
            "500",
            self.description(),
            self.fix(),
        );

        (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
    }
}

/// The page htmx is redirected to when the database connection cannot be used.
pub async fn get_internal_server_error_page() -> Response {
    ServerFault::DatabaseUnavailable.into_response()
}
