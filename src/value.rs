//! Parameter values handed to the dialect by the statement compiler.
//!
//! [`Param`] is a tagged union covering every shape the compiler layer
//! produces. The same type flows to the cursor after translation, at which
//! point it never holds a [`Param::Tuple`] or [`Param::NotGiven`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single bound parameter value.
///
/// Serializes as `{"type": "...", "value": ...}` so parameter lists can be
/// written as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value")]
pub enum Param {
    /// SQL NULL
    Null,
    /// "No value given" marker from form handling; always means NULL.
    NotGiven,
    Bool(bool),
    /// 64-bit integer. Integers outside the `i64` range are sent as
    /// [`Param::Decimal`], which keeps any number of digits.
    Int(i64),
    /// Exact decimal number.
    Decimal(Decimal),
    Float(f64),
    Uuid(uuid::Uuid),
    Text(String),
    /// Immutable byte string. Quoted as text when it is plain ASCII.
    Bytes(Vec<u8>),
    /// Mutable byte buffer. Always quoted as a binary literal.
    ByteArray(Vec<u8>),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    /// Time of day. The driver binds it, but it has no literal form.
    Time(NaiveTime),
    /// Ordered tuple. Only the single-element form can be bound or inlined.
    Tuple(Vec<Param>),
}

impl Param {
    /// Short name of the value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::NotGiven => "not-given",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Decimal(_) => "decimal",
            Self::Float(_) => "float",
            Self::Uuid(_) => "uuid",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::ByteArray(_) => "bytearray",
            Self::DateTime(_) => "datetime",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::Tuple(_) => "tuple",
        }
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<uuid::Uuid> for Param {
    fn from(value: uuid::Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<Decimal> for Param {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDateTime> for Param {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDate> for Param {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for Param {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Exact decimal number kept in its textual form.
///
/// Accepts an optional sign, digits with an optional fractional part, and an
/// optional exponent (`-12.50`, `.5`, `1E+2`). The text is stored as given
/// and rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Decimal(String);

/// Error returned when text is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid decimal literal: {0:?}")]
pub struct ParseDecimalError(String);

impl Decimal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_decimal(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseDecimalError(s.to_string()))
        }
    }
}

impl TryFrom<String> for Decimal {
    type Error = ParseDecimalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_decimal(&value) {
            Ok(Self(value))
        } else {
            Err(ParseDecimalError(value))
        }
    }
}

impl From<Decimal> for String {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_decimal(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_accepts_plain_forms() {
        for text in ["0", "0.5", "-12.50", "+3", ".5", "7.", "1E+2", "2.5e-3"] {
            assert!(text.parse::<Decimal>().is_ok(), "{text} should parse");
        }
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        for text in ["", "-", ".", "1,000", "1e", "abc", "1.2.3", "NaN", "1e+"] {
            assert!(text.parse::<Decimal>().is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn test_decimal_keeps_text() {
        let d: Decimal = "-12.50".parse().unwrap();
        assert_eq!(d.as_str(), "-12.50");
        assert_eq!(d.to_string(), "-12.50");
    }

    #[test]
    fn test_param_json_shape() {
        let json = serde_json::to_value(Param::Int(9)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "Int", "value": 9}));

        let null: Param = serde_json::from_str(r#"{"type": "Null"}"#).unwrap();
        assert_eq!(null, Param::Null);

        let dec: Param = serde_json::from_str(r#"{"type": "Decimal", "value": "0.5"}"#).unwrap();
        assert_eq!(dec, Param::Decimal("0.5".parse().unwrap()));

        assert!(serde_json::from_str::<Param>(r#"{"type": "Decimal", "value": "x"}"#).is_err());
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(Param::from(None::<i64>), Param::Null);
        assert_eq!(Param::from(Some(4i64)), Param::Int(4));
    }
}
