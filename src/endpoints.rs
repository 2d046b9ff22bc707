//! The API endpoints URIs.

/// The root route which shows the welcome page.
pub const ROOT: &str = "/";
/// The page for creating a new account.
pub const NEW_ACCOUNT_VIEW: &str = "/accounts/new";
/// The page for checking an account's balance.
pub const BALANCE_VIEW: &str = "/balance";
/// The page for depositing money into an account.
pub const DEPOSIT_VIEW: &str = "/deposit";
/// The page for withdrawing money from an account.
pub const WITHDRAW_VIEW: &str = "/withdraw";
/// The page for viewing an account's statement.
pub const STATEMENT_VIEW: &str = "/statement";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create an account.
pub const ACCOUNTS_API: &str = "/api/accounts";
/// The route to look up an account's balance.
pub const BALANCE_API: &str = "/api/balance";
/// The route to deposit money.
pub const DEPOSIT_API: &str = "/api/deposit";
/// The route to withdraw money.
pub const WITHDRAW_API: &str = "/api/withdraw";
/// The route to get an account's statement.
pub const STATEMENT_API: &str = "/api/statement";
