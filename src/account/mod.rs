//! Opening accounts and looking up their balances.

mod balance;
mod core;
mod create;

pub use balance::{check_balance_endpoint, get_balance_page};
pub use core::{
    Account, AccountId, create_account, create_account_table, get_account, parse_account_id,
};
pub use create::{create_account_endpoint, get_create_account_page};
