use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::literal::Literal;
use crate::error::{FormulaError, Result};

/// A node in a formula tree.
///
/// Nodes are immutable once built. Invariants that the remote parser relies
/// on (non-empty field names, non-empty combinators) are checked by the
/// constructors, so rendering never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Field(Field),
    Literal(Literal),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical(Logical),
    Not(Box<Expr>),
    Call {
        name: String,
        args: Vec<Expr>,
    },
    /// Pre-built formula text, emitted verbatim.
    Raw(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl CompareOp {
    pub fn token(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for CompareOp {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "=" | "==" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::Ne),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Gte),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Lte),
            other => Err(FormulaError::UnknownOperator(other.to_string())),
        }
    }
}

/// Variadic boolean function. `NOT` is unary and lives in [`Expr::Not`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    And,
    Or,
    Xor,
}

impl BoolOp {
    pub fn name(self) -> &'static str {
        match self {
            BoolOp::And => "AND",
            BoolOp::Or => "OR",
            BoolOp::Xor => "XOR",
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference to a table column, rendered as `{Name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
}

impl Field {
    /// Validates `name` so that it renders as exactly one field token.
    ///
    /// Any character is allowed except a backslash directly before a closing
    /// brace or at the end of the name: once `}` is escaped as `\}`, such a
    /// backslash would make the escape ambiguous.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(FormulaError::InvalidFieldName {
                name,
                reason: "name is empty",
            });
        }
        if name.ends_with('\\') || name.contains("\\}") {
            return Err(FormulaError::InvalidFieldName {
                name,
                reason: "backslash before a closing brace cannot be escaped",
            });
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// `AND(...)`, `OR(...)` or `XOR(...)` over one or more operands, in caller order.
#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    pub(crate) op: BoolOp,
    pub(crate) operands: Vec<Expr>,
}

impl Logical {
    pub fn new<I, E>(op: BoolOp, operands: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let operands: Vec<Expr> = operands.into_iter().map(Into::into).collect();
        if operands.is_empty() {
            return Err(FormulaError::EmptyCombinator(op));
        }
        Ok(Self { op, operands })
    }

    pub fn op(&self) -> BoolOp {
        self.op
    }

    pub fn operands(&self) -> &[Expr] {
        &self.operands
    }
}

impl Expr {
    pub fn field(name: impl Into<String>) -> Result<Self> {
        Field::new(name).map(Expr::Field)
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn raw(formula: impl Into<String>) -> Self {
        Expr::Raw(formula.into())
    }

    pub fn compare(op: CompareOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn logical<I, E>(op: BoolOp, operands: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Logical::new(op, operands).map(Expr::Logical)
    }

    pub fn negate(operand: impl Into<Expr>) -> Self {
        Expr::Not(Box::new(operand.into()))
    }

    /// A call to any function of the query language. Arity and argument
    /// types are not checked.
    pub fn call<I, E>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Expr::Call {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Collapses nested `AND`/`OR`/`XOR` calls of the same operator, all
    /// the way down the tree. `NOT` is left alone.
    pub fn flatten(&self) -> Expr {
        match self {
            Expr::Logical(logical) => {
                let mut operands = Vec::with_capacity(logical.operands.len());
                for operand in &logical.operands {
                    match operand.flatten() {
                        Expr::Logical(inner) if inner.op == logical.op => {
                            operands.extend(inner.operands)
                        }
                        other => operands.push(other),
                    }
                }
                Expr::Logical(Logical {
                    op: logical.op,
                    operands,
                })
            }
            Expr::Compare { op, left, right } => Expr::Compare {
                op: *op,
                left: Box::new(left.flatten()),
                right: Box::new(right.flatten()),
            },
            Expr::Not(inner) => Expr::Not(Box::new(inner.flatten())),
            Expr::Call { name, args } => Expr::Call {
                name: name.clone(),
                args: args.iter().map(Expr::flatten).collect(),
            },
            Expr::Field(_) | Expr::Literal(_) | Expr::Raw(_) => self.clone(),
        }
    }
}

impl From<Field> for Expr {
    fn from(field: Field) -> Self {
        Expr::Field(field)
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Expr::Literal(literal)
    }
}

impl From<Logical> for Expr {
    fn from(logical: Logical) -> Self {
        Expr::Logical(logical)
    }
}

impl TryFrom<f64> for Expr {
    type Error = FormulaError;

    fn try_from(value: f64) -> Result<Self> {
        Literal::try_from(value).map(Expr::Literal)
    }
}

impl TryFrom<f32> for Expr {
    type Error = FormulaError;

    fn try_from(value: f32) -> Result<Self> {
        Literal::try_from(value).map(Expr::Literal)
    }
}

impl<T: Into<Expr>> From<Option<T>> for Expr {
    fn from(value: Option<T>) -> Self {
        value.map_or(Expr::Literal(Literal::Null), Into::into)
    }
}

macro_rules! expr_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Expr::Literal(Literal::from(value))
                }
            }
        )*
    };
}

expr_from_literal!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    &str,
    String,
    &String,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::DateTime<chrono::Utc>,
);
