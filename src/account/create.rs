//! The page and endpoint for opening a new account.

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
    account::create_account,
    alert::Alert,
    amount::Amount,
    endpoints,
    html::{base, form_page, labelled_input},
    navigation::NavBar,
};

/// The state needed to create an account.
#[derive(Debug, Clone)]
pub struct CreateAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating an account.
///
/// The balance is kept as text so that malformed numbers can be reported
/// back to the user instead of being rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct CreateAccountForm {
    /// The name of the account holder.
    pub name: String,
    /// The opening balance, e.g. "100.00".
    pub balance: String,
}

/// Renders the page for creating an account.
pub async fn get_create_account_page() -> Response {
    create_account_view().into_response()
}

fn create_account_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_ACCOUNT_VIEW).into_html();
    let fields = html! {
        (labelled_input("name", "Name", "text", "Account holder", true))
        (labelled_input("balance", "Initial Balance", "text", "0.00", false))
    };

    let content = html! {
        (nav_bar)
        (form_page("Create Account", endpoints::ACCOUNTS_API, &fields, "Create"))
    };

    base("Create Account", &content)
}

/// A route handler for creating a new account, responds with an alert.
pub async fn create_account_endpoint(
    State(state): State<CreateAccountState>,
    form: Result<Form<CreateAccountForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return Error::from(rejection).into_alert_response(),
    };

    let name = form.name.trim();
    if name.is_empty() {
        return Error::InvalidInput("The account name cannot be empty.".to_owned())
            .into_alert_response();
    }

    let initial_balance: Amount = match form.balance.parse() {
        Ok(balance) => balance,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_account(name, initial_balance, &connection) {
        Ok(account) => Alert::Success {
            message: format!(
                "Account for {} created successfully with {} (ID: {})",
                account.name, account.balance, account.id
            ),
            details: "Use the account ID to make deposits and withdrawals.".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("Could not create account with {form:?}: {error}");
            error.into_alert_response()
        }
    }
}
