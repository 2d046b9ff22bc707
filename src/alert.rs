//! Alert system for displaying success and error messages to users.
//!
//! Alerts are HTML fragments that htmx swaps into the page after a form is
//! submitted.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A success or error message, optionally with more details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::Success { message, details } => (false, message, details),
            Alert::SuccessSimple { message } => (false, message, String::new()),
            Alert::Error { message, details } => (true, message, details),
        };

        let container_style = if is_error {
            "p-4 mb-4 text-sm rounded-lg border text-red-800 bg-red-50 \
            border-red-300 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "p-4 mb-4 text-sm rounded-lg border text-green-800 bg-green-50 \
            border-green-300 dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };
        let role = if is_error { "alert" } else { "status" };

        html! {
            div class=(container_style) role=(role) data-alert-type=(if is_error { "error" } else { "success" })
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    p class="mt-1" { (details) }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.into_html()).into_response()
    }
}
