//! Formula values from untyped YAML/JSON input.
//!
//! Scalars become literals, and every string is a string literal whatever it
//! looks like. Tags select the other kinds of value:
//!
//! - `!field Name` refers to another column
//! - `!formula "..."` passes formula text through unchanged
//! - `!date 2024-01-01` is a date, RFC 3339 timestamp or naive datetime
//! - `!text 21` forces a string literal
//!
//! In a match mapping, a two-item sequence `[">=", 21]` compares with that
//! operator instead of `=`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value as YamlValue};

use crate::error::{FormulaError, Result};
use crate::formula::{CompareOp, Expr, Field, Literal, Match};

pub fn to_expr(value: &YamlValue) -> Result<Expr> {
    match value {
        YamlValue::Null => Ok(Expr::Literal(Literal::Null)),
        YamlValue::Bool(b) => Ok(Expr::from(*b)),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Expr::Literal(Literal::Int(i)))
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                Literal::try_from(f).map(Expr::Literal)
            }
        }
        YamlValue::String(s) => Ok(Expr::Literal(Literal::Text(s.clone()))),
        YamlValue::Tagged(tagged) => tagged_to_expr(tagged),
        YamlValue::Sequence(_) => Err(unsupported("sequence")),
        YamlValue::Mapping(_) => Err(unsupported("mapping")),
    }
}

fn tagged_to_expr(tagged: &TaggedValue) -> Result<Expr> {
    if tagged.tag == "field" {
        let name = scalar_to_string(&tagged.value).ok_or_else(|| unsupported("non-scalar !field"))?;
        return Field::new(name).map(Expr::Field);
    }
    if tagged.tag == "formula" {
        let text = scalar_to_string(&tagged.value).ok_or_else(|| unsupported("non-scalar !formula"))?;
        return Ok(Expr::Raw(text));
    }
    if tagged.tag == "date" {
        let text = scalar_to_string(&tagged.value).ok_or_else(|| unsupported("non-scalar !date"))?;
        return parse_temporal(&text)
            .map(Expr::Literal)
            .ok_or_else(|| unsupported(&format!("!date {:?} is not an ISO-8601 date", text)));
    }
    if tagged.tag == "text" {
        let text = scalar_to_string(&tagged.value).ok_or_else(|| unsupported("non-scalar !text"))?;
        return Ok(Expr::Literal(Literal::Text(text)));
    }
    Err(unsupported(&format!("tag {}", tagged.tag)))
}

/// A match value: either a plain value or an `[operator, value]` pair.
pub fn to_condition(value: &YamlValue) -> Result<(CompareOp, Expr)> {
    if let YamlValue::Sequence(items) = value {
        if let [YamlValue::String(op), operand] = items.as_slice() {
            let op: CompareOp = op.parse()?;
            return Ok((op, to_expr(operand)?));
        }
    }
    Ok((CompareOp::Eq, to_expr(value)?))
}

/// Builds a match formula from a mapping of field names to values, keeping
/// the mapping's order.
pub fn match_mapping(mapping: &Mapping, match_any: bool) -> Result<Expr> {
    tracing::debug!(entries = mapping.len(), match_any, "building match from mapping");

    let mut builder = Match::new();
    for (key, value) in mapping {
        let name = scalar_to_string(key).ok_or_else(|| FormulaError::InvalidFieldName {
            name: format!("{:?}", key),
            reason: "field names must be scalars",
        })?;
        let (op, operand) = to_condition(value)?;
        builder = builder.compare(name, op, operand);
    }
    builder.build(match_any)
}

fn scalar_to_string(v: &YamlValue) -> Option<String> {
    match v {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_temporal(s: &str) -> Option<Literal> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Literal::Date(date));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(Literal::Timestamp(ts));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(Literal::DateTime)
}

fn unsupported(kind: &str) -> FormulaError {
    FormulaError::UnsupportedLiteralType(kind.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::from_str;

    fn expr(yaml: &str) -> Result<Expr> {
        let value: YamlValue = from_str(yaml).unwrap();
        to_expr(&value)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(expr("~").unwrap().render(), "BLANK()");
        assert_eq!(expr("true").unwrap().render(), "TRUE()");
        assert_eq!(expr("21").unwrap().render(), "21");
        assert_eq!(expr("21.5").unwrap().render(), "21.5");
        assert_eq!(expr("John").unwrap().render(), "'John'");
    }

    #[test]
    fn test_date_looking_strings_stay_text() {
        assert_eq!(expr("2024-01-01").unwrap().render(), "'2024-01-01'");
        assert_eq!(
            expr(r#""2024-01-01T08:30:00Z""#).unwrap().render(),
            "'2024-01-01T08:30:00Z'"
        );

        let mapping: Mapping = from_str(r#"{"Code": "2024-01-01"}"#).unwrap();
        let formula = match_mapping(&mapping, false).unwrap();
        assert_eq!(formula.render(), "{Code}='2024-01-01'");
    }

    #[test]
    fn test_date_tag() {
        assert_eq!(
            expr("!date 2024-01-01").unwrap().render(),
            "DATETIME_PARSE('2024-01-01')"
        );
        assert_eq!(
            expr("!date 2024-01-01T08:30:00Z").unwrap().render(),
            "DATETIME_PARSE('2024-01-01T08:30:00.000Z')"
        );
        assert_eq!(
            expr("!date 2024-01-01T08:30:00").unwrap().render(),
            "DATETIME_PARSE('2024-01-01T08:30:00.000')"
        );
        assert!(matches!(
            expr("!date 2024-13-01"),
            Err(FormulaError::UnsupportedLiteralType(_))
        ));
        assert!(expr("!date [2024]").is_err());
    }

    #[test]
    fn test_tags() {
        assert_eq!(expr("!field Owner").unwrap().render(), "{Owner}");
        assert_eq!(expr("!formula 'TODAY()'").unwrap().render(), "TODAY()");
        assert_eq!(expr("!text 21").unwrap().render(), "'21'");
        assert!(matches!(
            expr("!other x"),
            Err(FormulaError::UnsupportedLiteralType(_))
        ));
    }

    #[test]
    fn test_unsupported_kinds() {
        assert_eq!(
            expr("[1, 2]"),
            Err(FormulaError::UnsupportedLiteralType("sequence".to_string()))
        );
        assert_eq!(
            expr("{a: 1}"),
            Err(FormulaError::UnsupportedLiteralType("mapping".to_string()))
        );
        assert!(matches!(
            expr(".nan"),
            Err(FormulaError::UnsupportedLiteralType(_))
        ));
    }

    #[test]
    fn test_match_mapping_keeps_order() {
        let mapping: Mapping = from_str("{Name: John, Age: 21}").unwrap();
        let formula = match_mapping(&mapping, false).unwrap();
        assert_eq!(formula.render(), "AND({Name}='John', {Age}=21)");

        let mapping: Mapping = from_str("{Age: 21, Name: John}").unwrap();
        let formula = match_mapping(&mapping, true).unwrap();
        assert_eq!(formula.render(), "OR({Age}=21, {Name}='John')");
    }

    #[test]
    fn test_match_mapping_operator_pairs() {
        let mapping: Mapping = from_str(r#"{Age: [">=", 21], Due: ["<", !field Deadline]}"#).unwrap();
        let formula = match_mapping(&mapping, false).unwrap();
        assert_eq!(formula.render(), "AND({Age}>=21, {Due}<{Deadline})");
    }

    #[test]
    fn test_match_mapping_errors() {
        let empty = Mapping::new();
        assert_eq!(match_mapping(&empty, false), Err(FormulaError::EmptyMatch));

        let mapping: Mapping = from_str(r#"{Age: ["~", 21]}"#).unwrap();
        assert_eq!(
            match_mapping(&mapping, false),
            Err(FormulaError::UnknownOperator("~".to_string()))
        );

        let mapping: Mapping = from_str("{~: 1}").unwrap();
        assert!(matches!(
            match_mapping(&mapping, false),
            Err(FormulaError::InvalidFieldName { .. })
        ));
    }
}
