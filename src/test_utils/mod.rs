#![allow(missing_docs)]

pub(crate) mod alert;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use alert::{must_get_alert, must_get_alert_message};
pub(crate) use form::{
    assert_posts_to_result, assert_required_input, assert_submit_button, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::assert_html_ok;
