//! The page and endpoint for looking up an account's balance.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    account::{get_account, parse_account_id},
    alert::Alert,
    endpoints,
    html::{base, form_page, labelled_input},
    navigation::NavBar,
};

/// The state needed to look up a balance.
#[derive(Debug, Clone)]
pub struct BalanceState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BalanceState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BalanceForm {
    pub account_id: String,
}

/// Renders the page for checking an account's balance.
pub async fn get_balance_page() -> Response {
    balance_view().into_response()
}

fn balance_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::BALANCE_VIEW).into_html();
    let fields = labelled_input("account_id", "Account ID", "number", "1", true);

    let content = html! {
        (nav_bar)
        (form_page("Check Balance", endpoints::BALANCE_API, &fields, "Check"))
    };

    base("Check Balance", &content)
}

/// A route handler that responds with an alert showing the account's name and balance.
pub async fn check_balance_endpoint(
    State(state): State<BalanceState>,
    form: Result<Form<BalanceForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return Error::from(rejection).into_alert_response(),
    };

    let account_id = match parse_account_id(&form.account_id) {
        Ok(account_id) => account_id,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match get_account(account_id, &connection) {
        Ok(account) => Alert::SuccessSimple {
            message: format!("Account: {} | Balance: {}", account.name, account.balance),
        }
        .into_response(),
        Err(Error::NotFound) => Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not get account {account_id}: {error}");
            error.into_alert_response()
        }
    }
}
