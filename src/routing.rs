//! Application router configuration and the welcome page.

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use maud::html;

use crate::{
    AppState,
    account::{
        check_balance_endpoint, create_account_endpoint, get_balance_page,
        get_create_account_page,
    },
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
    internal_server_error::get_internal_server_error_page,
    navigation::NavBar,
    not_found::get_404_not_found,
    transaction::{
        deposit_endpoint, get_deposit_page, get_statement_page, get_withdraw_page,
        statement_endpoint, withdraw_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::NEW_ACCOUNT_VIEW, get(get_create_account_page))
        .route(endpoints::BALANCE_VIEW, get(get_balance_page))
        .route(endpoints::DEPOSIT_VIEW, get(get_deposit_page))
        .route(endpoints::WITHDRAW_VIEW, get(get_withdraw_page))
        .route(endpoints::STATEMENT_VIEW, get(get_statement_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::ACCOUNTS_API, post(create_account_endpoint))
        .route(endpoints::BALANCE_API, post(check_balance_endpoint))
        .route(endpoints::DEPOSIT_API, post(deposit_endpoint))
        .route(endpoints::WITHDRAW_API, post(withdraw_endpoint))
        .route(endpoints::STATEMENT_API, post(statement_endpoint));

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' shows a welcome page that links to every feature.
async fn get_index_page() -> Response {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let features = [
        (endpoints::NEW_ACCOUNT_VIEW, "Create an account"),
        (endpoints::BALANCE_VIEW, "Check a balance"),
        (endpoints::DEPOSIT_VIEW, "Deposit money"),
        (endpoints::WITHDRAW_VIEW, "Withdraw money"),
        (endpoints::STATEMENT_VIEW, "View a statement"),
    ];

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Welcome to Bank Ledger" }

            p class="mb-4" { "Choose what you would like to do:" }

            ul class="space-y-2 list-disc list-inside"
            {
                @for (url, text) in features {
                    li { (link(url, text)) }
                }
            }
        }
    };

    base("Home", &content).into_response()
}
