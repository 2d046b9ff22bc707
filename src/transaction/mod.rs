//! Deposits, withdrawals and account statements.
//!
//! This module contains:
//! - The `Transaction` record and the ledger operations that change balances
//! - The pages and endpoints for moving money and viewing statements

mod core;
mod deposit;
mod form;
mod statement;
mod withdraw;

pub use core::{
    Statement, Transaction, TransactionId, TransactionKind, create_transaction_table, deposit,
    get_statement, withdraw,
};
pub use deposit::{deposit_endpoint, get_deposit_page};
pub use statement::{get_statement_page, statement_endpoint};
pub use withdraw::{get_withdraw_page, withdraw_endpoint};
