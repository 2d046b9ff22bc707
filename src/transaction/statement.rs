//! The page and endpoint for viewing an account's statement.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{PrimitiveDateTime, macros::format_description};

use crate::{
    AppState, Error,
    account::parse_account_id,
    endpoints,
    html::{
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, form_page, labelled_input,
    },
    navigation::NavBar,
    transaction::{Statement, TransactionKind, get_statement},
};

/// The state needed to build a statement.
#[derive(Debug, Clone)]
pub struct StatementState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for StatementState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatementForm {
    pub account_id: String,
}

/// Renders the page for requesting an account statement.
pub async fn get_statement_page() -> Response {
    let nav_bar = NavBar::new(endpoints::STATEMENT_VIEW).into_html();
    let fields = labelled_input("account_id", "Account ID", "number", "1", true);

    let content = html! {
        (nav_bar)
        (form_page("Account Statement", endpoints::STATEMENT_API, &fields, "View Statement"))
    };

    base("Statement", &content).into_response()
}

/// A route handler that responds with the account's transactions as a table.
pub async fn statement_endpoint(
    State(state): State<StatementState>,
    form: Result<Form<StatementForm>, FormRejection>,
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

    match get_statement(account_id, &connection) {
        Ok(statement) => (StatusCode::OK, statement_view(&statement)).into_response(),
        Err(Error::NotFound) => Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not get statement for account {account_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn format_timestamp(timestamp: PrimitiveDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    timestamp
        .format(format)
        .unwrap_or_else(|_| timestamp.to_string())
}

fn statement_view(statement: &Statement) -> Markup {
    html! {
        div data-statement-account=(statement.account_id) class="w-full space-y-4"
        {
            h2 class="text-lg font-semibold"
            {
                "Statement for " (statement.account_name) " (ID: " (statement.account_id) ")"
            }

            @if statement.transactions.is_empty() {
                p class="text-gray-600 dark:text-gray-400" { "No transactions yet." }
            } @else {
                div class="relative overflow-x-auto shadow-md rounded-lg"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Timestamp" }
                            }
                        }

                        tbody
                        {
                            @for transaction in &statement.transactions {
                                @let amount_style = match transaction.kind {
                                    TransactionKind::Deposit => "text-green-600",
                                    TransactionKind::Withdraw => "text-red-600",
                                };

                                tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
                                {
                                    td class=(TABLE_CELL_STYLE) { (transaction.kind) }
                                    td class={ (TABLE_CELL_STYLE) " " (amount_style) }
                                    {
                                        (transaction.amount)
                                    }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        time datetime=(transaction.timestamp)
                                        {
                                            (format_timestamp(transaction.timestamp))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
