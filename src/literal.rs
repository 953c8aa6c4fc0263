//! SQL Server literal rendering for parameter values.
//!
//! [`literalize`] turns one [`Param`] into the text SQL Server parses back to
//! the same value. Temporal values use the ODBC escape clauses (`{ts ...}`,
//! `{d ...}`) so the result does not depend on the session's `DATEFORMAT`.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! | Value | Literal |
//! |---|---|
//! | null / not-given | `NULL` |
//! | bool | `1` / `0` |
//! | finite float | shortest text that parses back to the same `f64` |
//! | int / decimal | base-10 text |
//! | uuid | `N'<hyphenated>'` |
//! | text | `N'...'`, quotes doubled |
//! | bytearray | `0x<hex>` |
//! | bytes, ASCII without NUL | `'...'`, quotes doubled |
//! | other bytes | `0x<hex>` |
//! | datetime | `{ts 'YYYY-MM-DD HH:MM:SS.mmm'}` |
//! | date | `{d 'YYYY-MM-DD'}` |
//! | one-element tuple | literal of the element |
//!
//! Dates and timestamps outside years 1 to 9999, and anything else, are
//! [`Literal::Unrepresentable`].

use crate::value::Param;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;


/// Result of literalizing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// SQL source text for the value.
    Sql(String),
    /// No literal rule matches this kind of value.
    Unrepresentable { kind: &'static str },
}

impl Literal {
    /// Returns the SQL text, or `None` for an unrepresentable value.
    #[must_use]
    pub fn as_sql(&self) -> Option<&str> {
        match self {
            Self::Sql(sql) => Some(sql),
            Self::Unrepresentable { .. } => None,
        }
    }

    #[must_use]
    pub fn into_sql(self) -> Option<String> {
        match self {
            Self::Sql(sql) => Some(sql),
            Self::Unrepresentable { .. } => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sql(sql) => f.write_str(sql),
            Self::Unrepresentable { kind } => write!(f, "<unrepresentable {kind}>"),
        }
    }
}

/// Renders `value` as a SQL Server literal.
pub fn literalize(value: &Param) -> Literal {
    match value {
        Param::Null | Param::NotGiven => sql("NULL"),
        Param::Bool(b) => sql(if *b { "1" } else { "0" }),
        Param::Float(f) if f.is_finite() => Literal::Sql(format!("{f:?}")),
        Param::Int(i) => Literal::Sql(i.to_string()),
        Param::Decimal(d) => Literal::Sql(d.as_str().to_string()),
        Param::Uuid(u) => literalize(&Param::Text(u.hyphenated().to_string())),
        Param::Text(s) => Literal::Sql(format!("N'{}'", s.replace('\'', "''"))),
        Param::ByteArray(bytes) => Literal::Sql(hex_literal(bytes)),
        Param::Bytes(bytes) => Literal::Sql(bytes_literal(bytes)),
        Param::DateTime(dt) if in_year_range(dt.year()) => Literal::Sql(timestamp_literal(dt)),
        Param::Date(d) if in_year_range(d.year()) => Literal::Sql(date_literal(d)),
        Param::Tuple(items) if items.len() == 1 => literalize(&items[0]),
        other => Literal::Unrepresentable { kind: other.kind() },
    }
}

/// Years SQL Server's date types and the four-digit escape format can hold.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

fn in_year_range(year: i32) -> bool {
    YEAR_RANGE.contains(&year)
}

fn sql(text: &str) -> Literal {
    Literal::Sql(text.to_string())
}

fn hex_literal(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ASCII without NUL goes out as a plain string literal; anything else as hex.
fn bytes_literal(bytes: &[u8]) -> String {
    if !bytes.contains(&0)
        && bytes.is_ascii()
        && let Ok(text) = std::str::from_utf8(bytes)
    {
        return format!("'{}'", text.replace('\'', "''"));
    }
    hex_literal(bytes)
}

fn timestamp_literal(dt: &NaiveDateTime) -> String {
    // Leap seconds carry nanoseconds past 1e9; keep milliseconds to three digits.
    let millis = (dt.nanosecond() % 1_000_000_000) / 1_000_000;
    format!(
        "{{ts '{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}'}}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        millis
    )
}

fn date_literal(d: &NaiveDate) -> String {
    format!("{{d '{:04}-{:02}-{:02}'}}", d.year(), d.month(), d.day())
}
