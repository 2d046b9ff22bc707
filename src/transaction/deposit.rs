//! The page and endpoint for depositing money into an account.

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
        deposit,
        form::{MovementForm, movement_page},
    },
};

/// The state needed to make a deposit.
#[derive(Debug, Clone)]
pub struct DepositState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DepositState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for depositing money.
pub async fn get_deposit_page() -> Response {
    movement_page("Deposit", endpoints::DEPOSIT_VIEW, endpoints::DEPOSIT_API).into_response()
}

/// A route handler for depositing money, responds with an alert.
pub async fn deposit_endpoint(
    State(state): State<DepositState>,
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

    match deposit(account_id, amount, &connection) {
        Ok(transaction) => Alert::SuccessSimple {
            message: format!("{} deposited successfully.", transaction.amount),
        }
        .into_response(),
        Err(error @ (Error::NotFound | Error::InvalidInput(_))) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not deposit {amount} into account {account_id}: {error}");
            error.into_alert_response()
        }
    }
}
