//! Native values as formula literals.
//!
//! Strings are single-quoted with backslash escapes (`\\` and `\'`), booleans
//! and blanks are zero-argument calls, and dates go through
//! `DATETIME_PARSE('<ISO-8601>')`.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{FormulaError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(FiniteFloat),
    Text(String),
    Date(NaiveDate),
    /// Wall-clock datetime without an offset.
    DateTime(NaiveDateTime),
    /// Datetime with a known offset.
    Timestamp(DateTime<FixedOffset>),
}

/// An `f64` that is neither NaN nor infinite. The formula language has no
/// literal for either.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteFloat(f64);

impl FiniteFloat {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(FormulaError::UnsupportedLiteralType(format!(
                "non-finite float ({value})"
            )))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for FiniteFloat {
    // f64's Display is the shortest exact decimal and never switches to
    // exponent notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("BLANK()"),
            Literal::Bool(true) => f.write_str("TRUE()"),
            Literal::Bool(false) => f.write_str("FALSE()"),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{}", n),
            Literal::Text(s) => f.write_str(&quoted(s)),
            Literal::Date(d) => write!(f, "DATETIME_PARSE('{}')", d.format("%Y-%m-%d")),
            Literal::DateTime(dt) => write!(
                f,
                "DATETIME_PARSE('{}')",
                dt.format("%Y-%m-%dT%H:%M:%S%.3f")
            ),
            Literal::Timestamp(ts) => write!(
                f,
                "DATETIME_PARSE('{}')",
                ts.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
        }
    }
}

/// Wraps a string in single quotes, escaping backslashes and quotes.
pub fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Inverse of [`quoted`].
pub fn unquote(literal: &str) -> Result<String> {
    let body = literal
        .strip_prefix('\'')
        .ok_or(FormulaError::InvalidStringLiteral {
            pos: 0,
            message: "expected opening quote",
        })?;

    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        let pos = i + 1;
        match c {
            '\\' => match chars.next() {
                Some((_, e @ ('\\' | '\''))) => out.push(e),
                Some(_) => {
                    return Err(FormulaError::InvalidStringLiteral {
                        pos,
                        message: "unknown escape sequence",
                    })
                }
                None => {
                    return Err(FormulaError::InvalidStringLiteral {
                        pos,
                        message: "unterminated escape",
                    })
                }
            },
            '\'' => {
                if pos + 1 != literal.len() {
                    return Err(FormulaError::InvalidStringLiteral {
                        pos,
                        message: "unexpected input after closing quote",
                    });
                }
                return Ok(out);
            }
            _ => out.push(c),
        }
    }

    Err(FormulaError::InvalidStringLiteral {
        pos: literal.len(),
        message: "unterminated string",
    })
}

/// Renders a field reference, escaping closing braces.
pub fn field_name(name: &str) -> String {
    format!("{{{}}}", name.replace('}', "\\}"))
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

macro_rules! literal_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::Int(i64::from(value))
                }
            }
        )*
    };
}

literal_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<f64> for Literal {
    type Error = FormulaError;

    fn try_from(value: f64) -> Result<Self> {
        FiniteFloat::new(value).map(Literal::Float)
    }
}

impl TryFrom<f32> for Literal {
    type Error = FormulaError;

    // Goes through the shortest f32 text so 0.1f32 stays 0.1 instead of
    // widening to 0.10000000149011612.
    fn try_from(value: f32) -> Result<Self> {
        let widened = value
            .to_string()
            .parse::<f64>()
            .unwrap_or_else(|_| f64::from(value));
        Literal::try_from(widened)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl From<&String> for Literal {
    fn from(value: &String) -> Self {
        Literal::Text(value.clone())
    }
}

impl From<NaiveDate> for Literal {
    fn from(value: NaiveDate) -> Self {
        Literal::Date(value)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(value: NaiveDateTime) -> Self {
        Literal::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for Literal {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Literal::Timestamp(value)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Literal::Timestamp(value.fixed_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_bool() {
        assert_eq!(Literal::Null.to_string(), "BLANK()");
        assert_eq!(Literal::from(true).to_string(), "TRUE()");
        assert_eq!(Literal::from(false).to_string(), "FALSE()");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(Literal::from(21).to_string(), "21");
        assert_eq!(Literal::from(-7i64).to_string(), "-7");
        assert_eq!(Literal::try_from(21.5).unwrap().to_string(), "21.5");
        assert_eq!(
            Literal::try_from(0.1 + 0.2).unwrap().to_string(),
            "0.30000000000000004"
        );
        assert_eq!(
            Literal::try_from(1e21).unwrap().to_string(),
            "1000000000000000000000"
        );
    }

    #[test]
    fn test_non_finite_float_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Literal::try_from(value),
                Err(FormulaError::UnsupportedLiteralType(_))
            ));
        }
        assert!(FiniteFloat::new(f64::NAN).is_err());
        assert!(Literal::try_from(f32::NAN).is_err());
    }

    #[test]
    fn test_f32_keeps_its_precision() {
        assert_eq!(Literal::try_from(0.1f32).unwrap().to_string(), "0.1");
        assert_eq!(Literal::try_from(21.5f32).unwrap().to_string(), "21.5");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(quoted("John"), "'John'");
        assert_eq!(quoted("Jane's"), "'Jane\\'s'");
        assert_eq!(quoted("C:\\temp"), "'C:\\\\temp'");
        assert_eq!(quoted("\\'"), "'\\\\\\''");
    }

    #[test]
    fn test_unquote_round_trip() {
        let samples = [
            "",
            "plain",
            "Guest's Name",
            "back\\slash",
            "\\'",
            "''",
            "trailing\\",
            "naïve café ☕ 日本語",
            "line\nbreak\ttab",
            "{braces}",
        ];
        for s in samples {
            assert_eq!(unquote(&quoted(s)).unwrap(), s, "round trip of {:?}", s);
        }
    }

    #[test]
    fn test_unquote_rejects_malformed() {
        assert!(unquote("plain").is_err());
        assert!(unquote("'open").is_err());
        assert!(unquote("'a'b'").is_err());
        assert!(unquote("'\\n'").is_err());
        assert!(unquote("'a\\").is_err());
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("First Name"), "{First Name}");
        assert_eq!(field_name("Guest's Name"), "{Guest's Name}");
        assert_eq!(field_name("A}B"), "{A\\}B}");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        assert_eq!(
            Literal::from(date).to_string(),
            "DATETIME_PARSE('2023-12-01')"
        );

        let naive = date.and_hms_opt(12, 34, 56).unwrap();
        assert_eq!(
            Literal::from(naive).to_string(),
            "DATETIME_PARSE('2023-12-01T12:34:56.000')"
        );

        let utc = naive.and_utc();
        assert_eq!(
            Literal::from(utc).to_string(),
            "DATETIME_PARSE('2023-12-01T12:34:56.000Z')"
        );

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = naive.and_local_timezone(offset).unwrap();
        assert_eq!(
            Literal::from(local).to_string(),
            "DATETIME_PARSE('2023-12-01T12:34:56.000+02:00')"
        );
    }
}
