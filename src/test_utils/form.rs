use scraper::{ElementRef, Html, Selector};

use crate::html::RESULT_CONTAINER_ID;

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

/// Check that `form` posts to `endpoint` with htmx and swaps the reply into
/// the result container.
#[track_caller]
pub(crate) fn assert_posts_to_result(form: &ElementRef<'_>, endpoint: &str) {
    let attributes = form.value();
    let want_target = format!("#{RESULT_CONTAINER_ID}");

    assert_eq!(attributes.attr("hx-post"), Some(endpoint), "wrong hx-post");
    assert_eq!(
        attributes.attr("hx-target"),
        Some(want_target.as_str()),
        "wrong hx-target"
    );
}

#[track_caller]
pub(crate) fn assert_required_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input named {name:?}"));

    assert_eq!(
        input.value().attr("type"),
        Some(type_),
        "input {name:?} has the wrong type"
    );
    assert!(
        input.value().attr("required").is_some(),
        "input {name:?} should be required"
    );
}

#[track_caller]
pub(crate) fn assert_submit_button(form: &ElementRef<'_>) {
    let button_count = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .count();

    assert_eq!(button_count, 1, "want exactly one submit button");
}
