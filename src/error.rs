//! Formula error types

use thiserror::Error;

use crate::formula::ast::BoolOp;

pub type Result<T> = std::result::Result<T, FormulaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Unsupported literal type: {0}")]
    UnsupportedLiteralType(String),

    #[error("Invalid field name {name:?}: {reason}")]
    InvalidFieldName { name: String, reason: &'static str },

    #[error("match() requires at least one field-value pair")]
    EmptyMatch,

    #[error("{0}() requires at least one operand")]
    EmptyCombinator(BoolOp),

    #[error("Unknown comparison operator: {0:?}")]
    UnknownOperator(String),

    #[error("Invalid string literal at position {pos}: {message}")]
    InvalidStringLiteral { pos: usize, message: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_literal_display() {
        let err = FormulaError::UnsupportedLiteralType("sequence".to_string());
        assert_eq!(err.to_string(), "Unsupported literal type: sequence");
    }

    #[test]
    fn test_invalid_field_name_display() {
        let err = FormulaError::InvalidFieldName {
            name: String::new(),
            reason: "name is empty",
        };
        assert_eq!(err.to_string(), "Invalid field name \"\": name is empty");
    }

    #[test]
    fn test_empty_combinator_names_operator() {
        let err = FormulaError::EmptyCombinator(BoolOp::Or);
        assert_eq!(err.to_string(), "OR() requires at least one operand");
    }
}
