use axum::{body::Body, http::StatusCode, response::Response};

/// Check that a page rendered successfully as HTML.
#[track_caller]
pub(crate) fn assert_html_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("text/html; charset=utf-8")
    );
}
