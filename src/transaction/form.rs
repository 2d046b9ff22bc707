//! The form shared by the deposit and withdraw pages.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    account::{AccountId, parse_account_id},
    amount::Amount,
    html::{base, form_page, labelled_input},
    navigation::NavBar,
};

/// The form data for moving money in or out of an account.
///
/// Both fields are kept as text so that malformed input can be reported back
/// to the user as an alert.
#[derive(Debug, Deserialize)]
pub struct MovementForm {
    pub account_id: String,
    pub amount: String,
}

impl MovementForm {
    /// Parse the account ID and amount.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] if either field is malformed.
    pub fn parse(&self) -> Result<(AccountId, Amount), Error> {
        let account_id = parse_account_id(&self.account_id)?;
        let amount = self.amount.parse()?;

        Ok((account_id, amount))
    }
}

/// Renders a full page with a form asking for an account ID and an amount.
pub fn movement_page(title: &str, active_endpoint: &str, post_endpoint: &str) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();
    let fields = html! {
        (labelled_input("account_id", "Account ID", "number", "1", true))
        (labelled_input("amount", "Amount", "text", "0.00", false))
    };

    let content = html! {
        (nav_bar)
        (form_page(&format!("{title} Amount"), post_endpoint, &fields, title))
    };

    base(title, &content)
}
