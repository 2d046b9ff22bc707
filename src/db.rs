//! Schema setup and connection helpers for the ledger database.

use std::{path::Path, time::Duration};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{account::create_account_table, transaction::create_transaction_table};

/// How long a connection waits for another connection's write lock before
/// giving up with `SQLITE_BUSY`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the SQLite database at `path`, creating the file if needed.
///
/// Foreign key enforcement is turned on and a busy timeout is set so that
/// several connections to the same file queue behind the writer.
///
/// # Errors
/// Returns an error if the file cannot be opened or the pragmas cannot be set.
pub fn open(path: impl AsRef<Path>) -> Result<Connection, rusqlite::Error> {
    let connection = Connection::open(path)?;
    configure(&connection)?;

    Ok(connection)
}

fn configure(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", true)?;
    connection.busy_timeout(BUSY_TIMEOUT)?;

    Ok(())
}

/// Create the tables for the domain models if they do not exist.
///
/// # Errors
/// Returns an error if a table could not be created or there is some other SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    configure(connection)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_account_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
