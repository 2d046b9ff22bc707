//! Money amounts stored as whole cents.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};

use crate::Error;

/// An exact decimal amount of money with two fractional digits.
///
/// Amounts are kept as an integer number of cents so that sums in the
/// database never drift, e.g. `"12.30"` is stored as `1230`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The number of cents in the amount.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is greater than zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Add two amounts, returning `None` if the sum does not fit in an `i64` of cents.
    pub const fn checked_add(self, other: Amount) -> Option<Amount> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Amount(cents)),
            None => None,
        }
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parse text such as `"100"`, `"-3.5"` or `".25"`.
    ///
    /// More than two fractional digits is an error rather than being rounded.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidInput(format!("\"{text}\" is not a valid amount"));

        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (units, fraction) = match unsigned.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (unsigned, ""),
        };

        if units.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        if !units.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        if fraction.len() > 2 {
            return Err(Error::InvalidInput(format!(
                "\"{text}\" has more than two decimal places"
            )));
        }

        let units: i64 = if units.is_empty() {
            0
        } else {
            units.parse().map_err(|_| invalid())?
        };
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .ok_or_else(invalid)?;

        Ok(Amount(if negative { -cents } else { cents }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();

        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Amount)
    }
}
