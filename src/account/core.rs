//! Defines the account model and the database queries for creating and reading accounts.

use rusqlite::{Connection, Row, params};

use crate::{Error, amount::Amount};

/// Alias for the integer type used for account IDs.
pub type AccountId = i64;

/// A named balance holding entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account, assigned by the database.
    pub id: AccountId,
    /// The display name of the account holder. Names do not need to be unique.
    pub name: String,
    /// The current balance.
    pub balance: Amount,
}

pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            balance INTEGER NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let balance = row.get(2)?;

    Ok(Account { id, name, balance })
}

/// Create a new account with `initial_balance`.
///
/// The initial balance is stored as given, negative balances included.
///
/// # Errors
/// Returns [Error::SqlError] if the insert fails.
pub fn create_account(
    name: &str,
    initial_balance: Amount,
    connection: &Connection,
) -> Result<Account, Error> {
    let account = connection
        .prepare(
            "INSERT INTO accounts (name, balance) VALUES (?1, ?2)
             RETURNING id, name, balance",
        )?
        .query_row(params![name, initial_balance], map_row_to_account)?;

    tracing::debug!("created account {} for {:?}", account.id, account.name);

    Ok(account)
}

/// Parse an account ID typed into a form.
///
/// # Errors
/// Returns [Error::InvalidInput] if `text` is not an integer.
pub fn parse_account_id(text: &str) -> Result<AccountId, Error> {
    text.trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("\"{text}\" is not a valid account ID")))
}

/// Get the account with the given `id`.
///
/// # Errors
/// Returns [Error::NotFound] if no account has the ID `id`, or
/// [Error::SqlError] if there is some other SQL error.
pub fn get_account(id: AccountId, connection: &Connection) -> Result<Account, Error> {
    connection
        .query_one(
            "SELECT id, name, balance FROM accounts WHERE id = ?1",
            params![id],
            map_row_to_account,
        )
        .map_err(Error::from)
}
