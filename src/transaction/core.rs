//! Defines the transaction model and the ledger operations that move money.
//!
//! Every operation that changes a balance runs inside a single SQLite
//! transaction started with `BEGIN IMMEDIATE`, so the balance update and the
//! transaction record are committed together or not at all, and no other
//! connection can write to the database in between.

use std::fmt::Display;

use rusqlite::{
    Connection, Row, ToSql, Transaction as SqlTransaction, TransactionBehavior, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use time::PrimitiveDateTime;

use crate::{
    Error,
    account::{AccountId, get_account},
    amount::Amount,
};

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// The direction of a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Money was added to the account.
    Deposit,
    /// Money was taken out of the account.
    Withdraw,
}

impl TransactionKind {
    /// The name stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
        };

        f.write_str(label)
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdraw" => Ok(TransactionKind::Withdraw),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type {other:?}").into(),
            )),
        }
    }
}

/// An immutable record of one balance changing event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The account whose balance was changed.
    pub account_id: AccountId,
    /// Whether money went in or out.
    pub kind: TransactionKind,
    /// The size of the movement, always positive.
    pub amount: Amount,
    /// When the transaction was recorded (UTC), set by the database.
    pub timestamp: PrimitiveDateTime,
}

/// The ordered list of an account's transactions, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The ID of the account the statement is for.
    pub account_id: AccountId,
    /// The name of the account holder.
    pub account_name: String,
    /// The account's transactions, newest first.
    pub transactions: Vec<Transaction>,
}

pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('deposit', 'withdraw')),
            amount INTEGER NOT NULL CHECK (amount > 0),
            timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
            FOREIGN KEY(account_id) REFERENCES accounts(id)
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_account_id
         ON transactions(account_id, timestamp)",
        (),
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        account_id: row.get(1)?,
        kind: row.get(2)?,
        amount: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

fn insert_transaction(
    account_id: AccountId,
    kind: TransactionKind,
    amount: Amount,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "INSERT INTO transactions (account_id, type, amount) VALUES (?1, ?2, ?3)
             RETURNING id, account_id, type, amount, timestamp",
        )?
        .query_row(params![account_id, kind, amount], map_transaction_row)
        .map_err(Error::from)
}

fn ensure_positive(amount: Amount) -> Result<(), Error> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "the amount must be greater than zero, got {amount}"
        )))
    }
}

/// Add `amount` to the balance of account `account_id` and record a deposit.
///
/// # Errors
/// Returns:
/// - [Error::InvalidInput] if `amount` is zero or negative, or the new balance
///   would be larger than the largest amount that can be stored,
/// - [Error::NotFound] if the account does not exist,
/// - [Error::SqlError] if there is some other SQL error.
///
/// Nothing is written if an error is returned.
pub fn deposit(
    account_id: AccountId,
    amount: Amount,
    connection: &Connection,
) -> Result<Transaction, Error> {
    ensure_positive(amount)?;

    let sql_transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    // SQLite turns an overflowing integer sum into a REAL, so the sum is checked here.
    let balance: Amount = sql_transaction.query_one(
        "SELECT balance FROM accounts WHERE id = ?1",
        params![account_id],
        |row| row.get(0),
    )?;
    let new_balance = balance.checked_add(amount).ok_or_else(|| {
        Error::InvalidInput(format!(
            "depositing {amount} would take the balance past the largest supported amount"
        ))
    })?;

    // Dropping the SQL transaction on an early return rolls it back.
    sql_transaction.execute(
        "UPDATE accounts SET balance = ?1 WHERE id = ?2",
        params![new_balance, account_id],
    )?;

    let transaction =
        insert_transaction(account_id, TransactionKind::Deposit, amount, &sql_transaction)?;
    sql_transaction.commit()?;

    tracing::debug!("deposited {amount} into account {account_id}");

    Ok(transaction)
}

/// Take `amount` from the balance of account `account_id` and record a withdrawal.
///
/// The balance check and the update are one conditional `UPDATE`, so a
/// balance can never be taken below zero by a withdrawal even when several
/// connections withdraw from the same account at once.
///
/// # Errors
/// Returns:
/// - [Error::InvalidInput] if `amount` is zero or negative,
/// - [Error::NotFound] if the account does not exist,
/// - [Error::InsufficientFunds] if the balance is less than `amount`,
/// - [Error::SqlError] if there is some other SQL error.
///
/// Nothing is written if an error is returned.
pub fn withdraw(
    account_id: AccountId,
    amount: Amount,
    connection: &Connection,
) -> Result<Transaction, Error> {
    ensure_positive(amount)?;

    let sql_transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let rows_affected = sql_transaction.execute(
        "UPDATE accounts SET balance = balance - ?1 WHERE id = ?2 AND balance >= ?1",
        params![amount, account_id],
    )?;

    if rows_affected == 0 {
        let balance: Amount = sql_transaction.query_one(
            "SELECT balance FROM accounts WHERE id = ?1",
            params![account_id],
            |row| row.get(0),
        )?;

        tracing::debug!(
            "rejected withdrawal of {amount} from account {account_id} with balance {balance}"
        );

        return Err(Error::InsufficientFunds { balance, amount });
    }

    let transaction =
        insert_transaction(account_id, TransactionKind::Withdraw, amount, &sql_transaction)?;
    sql_transaction.commit()?;

    tracing::debug!("withdrew {amount} from account {account_id}");

    Ok(transaction)
}

/// Get the statement for account `account_id`, most recent transaction first.
///
/// Transactions recorded within the same millisecond are ordered by
/// descending ID.
///
/// # Errors
/// Returns [Error::NotFound] if the account does not exist, or
/// [Error::SqlError] if there is some other SQL error.
pub fn get_statement(account_id: AccountId, connection: &Connection) -> Result<Statement, Error> {
    // Read the account and its transactions from the same snapshot.
    let sql_transaction = connection.unchecked_transaction()?;

    let account = get_account(account_id, &sql_transaction)?;

    let transactions = sql_transaction
        .prepare(
            "SELECT id, account_id, type, amount, timestamp
             FROM transactions
             WHERE account_id = ?1
             ORDER BY timestamp DESC, id DESC",
        )?
        .query_map(params![account_id], map_transaction_row)?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    sql_transaction.commit()?;

    Ok(Statement {
        account_id: account.id,
        account_name: account.name,
        transactions,
    })
}


#[cfg(test)]
mod ledger_tests {
    use rusqlite::{Connection, params};

    use crate::{
        Error,
        account::{AccountId, create_account, get_account},
        amount::Amount,
        db::initialize,
        transaction::{TransactionKind, deposit, get_statement, withdraw},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn cents(value: i64) -> Amount {
        Amount::from_cents(value)
    }

    #[track_caller]
    fn count_transactions(account_id: AccountId, connection: &Connection) -> i64 {
        connection
            .query_row(
                "SELECT COUNT(*) FROM transactions WHERE account_id = ?1",
                params![account_id],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn deposit_increases_balance_and_records_transaction() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(10_000), &conn).unwrap();

        let transaction = deposit(account.id, cents(5000), &conn).unwrap();

        assert_eq!(get_account(account.id, &conn).unwrap().balance, cents(15_000));
        assert_eq!(transaction.account_id, account.id);
        assert_eq!(transaction.kind, TransactionKind::Deposit);
        assert_eq!(transaction.amount, cents(5000));
        assert_eq!(count_transactions(account.id, &conn), 1);
    }

    #[test]
    fn deposit_into_missing_account_returns_not_found() {
        let conn = get_test_connection();

        assert_eq!(deposit(999, cents(5000), &conn), Err(Error::NotFound));
        assert_eq!(count_transactions(999, &conn), 0);
    }

    #[test]
    fn deposit_rejects_non_positive_amounts() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(10_000), &conn).unwrap();

        for amount in [cents(0), cents(-100)] {
            let result = deposit(account.id, amount, &conn);

            assert!(
                matches!(result, Err(Error::InvalidInput(_))),
                "want InvalidInput for {amount}, got {result:?}"
            );
        }

        assert_eq!(get_account(account.id, &conn).unwrap().balance, cents(10_000));
        assert_eq!(count_transactions(account.id, &conn), 0);
    }

    #[test]
    fn withdraw_decreases_balance_and_records_transaction() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(15_000), &conn).unwrap();

        let transaction = withdraw(account.id, cents(15_000), &conn).unwrap();

        assert_eq!(get_account(account.id, &conn).unwrap().balance, Amount::ZERO);
        assert_eq!(transaction.kind, TransactionKind::Withdraw);
        assert_eq!(transaction.amount, cents(15_000));
        assert_eq!(count_transactions(account.id, &conn), 1);
    }

    #[test]
    fn withdraw_more_than_balance_changes_nothing() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(15_000), &conn).unwrap();

        let result = withdraw(account.id, cents(20_000), &conn);

        assert_eq!(
            result,
            Err(Error::InsufficientFunds {
                balance: cents(15_000),
                amount: cents(20_000),
            })
        );
        assert_eq!(get_account(account.id, &conn).unwrap().balance, cents(15_000));
        assert_eq!(count_transactions(account.id, &conn), 0);
    }

    #[test]
    fn withdraw_from_negative_balance_is_rejected() {
        let conn = get_test_connection();
        let account = create_account("Overdrawn", cents(-100), &conn).unwrap();

        let result = withdraw(account.id, cents(1), &conn);

        assert!(matches!(result, Err(Error::InsufficientFunds { .. })));
        assert_eq!(get_account(account.id, &conn).unwrap().balance, cents(-100));
    }

    #[test]
    fn withdraw_from_missing_account_returns_not_found() {
        let conn = get_test_connection();

        assert_eq!(withdraw(999, cents(100), &conn), Err(Error::NotFound));
    }

    #[test]
    fn withdraw_rejects_non_positive_amounts() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(100), &conn).unwrap();

        let result = withdraw(account.id, cents(0), &conn);

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(count_transactions(account.id, &conn), 0);
    }

    #[test]
    fn deposit_past_largest_balance_changes_nothing() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(100), &conn).unwrap();

        let result = deposit(account.id, cents(i64::MAX), &conn);

        assert!(
            matches!(result, Err(Error::InvalidInput(_))),
            "want InvalidInput, got {result:?}"
        );
        assert_eq!(get_account(account.id, &conn).unwrap().balance, cents(100));
        assert_eq!(count_transactions(account.id, &conn), 0);
    }

    #[test]
    fn deposit_up_to_largest_balance_succeeds() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(100), &conn).unwrap();

        deposit(account.id, cents(i64::MAX - 100), &conn).unwrap();

        assert_eq!(
            get_account(account.id, &conn).unwrap().balance,
            cents(i64::MAX)
        );
    }

    fn reject_transaction_inserts(conn: &Connection) {
        conn.execute(
            "CREATE TRIGGER reject_transactions BEFORE INSERT ON transactions
             BEGIN
                SELECT RAISE(ABORT, 'transactions are read only');
             END",
            (),
        )
        .unwrap();
    }

    #[test]
    fn failed_deposit_insert_rolls_back_balance() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(10_000), &conn).unwrap();
        reject_transaction_inserts(&conn);

        let result = deposit(account.id, cents(5000), &conn);

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SqlError, got {result:?}"
        );
        assert_eq!(get_account(account.id, &conn).unwrap().balance, cents(10_000));
        assert_eq!(count_transactions(account.id, &conn), 0);
        assert!(conn.is_autocommit(), "the SQL transaction was left open");
    }

    #[test]
    fn failed_withdraw_insert_rolls_back_balance() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(10_000), &conn).unwrap();
        reject_transaction_inserts(&conn);

        let result = withdraw(account.id, cents(5000), &conn);

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SqlError, got {result:?}"
        );
        assert_eq!(get_account(account.id, &conn).unwrap().balance, cents(10_000));
        assert_eq!(count_transactions(account.id, &conn), 0);
        assert!(conn.is_autocommit(), "the SQL transaction was left open");
    }

    #[test]
    fn statement_for_missing_account_returns_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_statement(999, &conn), Err(Error::NotFound));
    }

    #[test]
    fn statement_for_new_account_is_empty() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(100), &conn).unwrap();

        let statement = get_statement(account.id, &conn).unwrap();

        assert_eq!(statement.account_name, "Asha");
        assert!(statement.transactions.is_empty());
    }

    #[test]
    fn statement_is_ordered_most_recent_first() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(0), &conn).unwrap();
        conn.execute(
            "INSERT INTO transactions (account_id, type, amount, timestamp) VALUES
                (?1, 'deposit', 100, '2025-01-01 09:00:00.000'),
                (?1, 'deposit', 300, '2025-03-01 09:00:00.000'),
                (?1, 'withdraw', 200, '2025-02-01 09:00:00.000')",
            params![account.id],
        )
        .unwrap();

        let statement = get_statement(account.id, &conn).unwrap();

        let got: Vec<_> = statement
            .transactions
            .iter()
            .map(|transaction| transaction.amount)
            .collect();
        assert_eq!(got, vec![cents(300), cents(200), cents(100)]);
        assert!(
            statement
                .transactions
                .windows(2)
                .all(|pair| pair[0].timestamp >= pair[1].timestamp)
        );
    }

    #[test]
    fn statement_only_includes_the_requested_account() {
        let conn = get_test_connection();
        let asha = create_account("Asha", cents(0), &conn).unwrap();
        let ben = create_account("Ben", cents(0), &conn).unwrap();
        deposit(asha.id, cents(100), &conn).unwrap();
        deposit(ben.id, cents(200), &conn).unwrap();

        let statement = get_statement(asha.id, &conn).unwrap();

        assert_eq!(statement.transactions.len(), 1);
        assert_eq!(statement.transactions[0].amount, cents(100));
    }

    #[test]
    fn end_to_end_scenario() {
        let conn = get_test_connection();

        let account = create_account("Asha", cents(10_000), &conn).unwrap();
        assert_eq!(account.id, 1);
        assert_eq!(get_account(1, &conn).unwrap().balance, cents(10_000));

        deposit(1, cents(5000), &conn).unwrap();
        assert_eq!(get_account(1, &conn).unwrap().balance, cents(15_000));
        let statement = get_statement(1, &conn).unwrap();
        assert_eq!(statement.transactions.len(), 1);
        assert_eq!(statement.transactions[0].kind, TransactionKind::Deposit);

        assert!(matches!(
            withdraw(1, cents(20_000), &conn),
            Err(Error::InsufficientFunds { .. })
        ));
        assert_eq!(get_account(1, &conn).unwrap().balance, cents(15_000));

        withdraw(1, cents(15_000), &conn).unwrap();
        assert_eq!(get_account(1, &conn).unwrap().balance, Amount::ZERO);
        let kinds: Vec<_> = get_statement(1, &conn)
            .unwrap()
            .transactions
            .iter()
            .map(|transaction| (transaction.kind, transaction.amount))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (TransactionKind::Withdraw, cents(15_000)),
                (TransactionKind::Deposit, cents(5000)),
            ]
        );

        assert_eq!(get_account(999, &conn), Err(Error::NotFound));
    }

    #[test]
    fn balance_equals_initial_plus_deposits_minus_withdrawals() {
        let conn = get_test_connection();
        let account = create_account("Asha", cents(1000), &conn).unwrap();

        for (index, amount) in [250, 125, 75, 600, 1].into_iter().enumerate() {
            if index % 2 == 0 {
                deposit(account.id, cents(amount), &conn).unwrap();
            } else {
                withdraw(account.id, cents(amount), &conn).unwrap();
            }
        }
        let _ = withdraw(account.id, cents(1_000_000), &conn);

        let deposits: i64 = conn
            .query_row(
                "SELECT COALESCE(SUM(amount), 0) FROM transactions
                 WHERE account_id = ?1 AND type = 'deposit'",
                params![account.id],
                |row| row.get(0),
            )
            .unwrap();
        let withdrawals: i64 = conn
            .query_row(
                "SELECT COALESCE(SUM(amount), 0) FROM transactions
                 WHERE account_id = ?1 AND type = 'withdraw'",
                params![account.id],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(
            get_account(account.id, &conn).unwrap().balance,
            cents(1000 + deposits - withdrawals)
        );
    }
}
