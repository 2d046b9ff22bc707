//! The page and endpoint for withdrawing money from an account.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    transaction::{
        form::{MovementForm, movement_page},
        withdraw,
    },
};

/// The state needed to make a withdrawal.
#[derive(Debug, Clone)]
pub struct WithdrawState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for WithdrawState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for withdrawing money.
pub async fn get_withdraw_page() -> Response {
    movement_page("Withdraw", endpoints::WITHDRAW_VIEW, endpoints::WITHDRAW_API).into_response()
}

/// A route handler for withdrawing money, responds with an alert.
pub async fn withdraw_endpoint(
    State(state): State<WithdrawState>,
    form: Result<Form<MovementForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return Error::from(rejection).into_alert_response(),
    };

    let (account_id, amount) = match form.parse() {
        Ok(parsed) => parsed,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match withdraw(account_id, amount, &connection) {
        Ok(transaction) => Alert::SuccessSimple {
            message: format!("{} withdrawn successfully.", transaction.amount),
        }
        .into_response(),
        Err(
            error @ (Error::NotFound | Error::InvalidInput(_) | Error::InsufficientFunds { .. }),
        ) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not withdraw {amount} from account {account_id}: {error}");
            error.into_alert_response()
        }
    }
}
