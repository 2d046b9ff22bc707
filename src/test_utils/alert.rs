use scraper::{ElementRef, Html, Selector};

/// Get the alert in `html` and whether it is an error alert.
#[track_caller]
pub(crate) fn must_get_alert(html: &Html) -> (ElementRef<'_>, bool) {
    let alert = html
        .select(&Selector::parse("[data-alert-type]").unwrap())
        .next()
        .expect("No alert found");
    let is_error = alert.value().attr("data-alert-type") == Some("error");

    (alert, is_error)
}

/// Get the headline message of the alert in `html`.
#[track_caller]
pub(crate) fn must_get_alert_message(html: &Html) -> String {
    let (alert, _) = must_get_alert(html);

    alert
        .select(&Selector::parse("p").unwrap())
        .next()
        .expect("Alert has no message")
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}
