//! Combinators and comparison sugar.
//!
//! The named functions ([`and`], [`or`], [`xor`], [`not`]) are the primary
//! API. The `&`, `|`, `^` and `!` operators on [`Expr`] call into them.

use std::ops::{BitAnd, BitOr, BitXor, Not};

use super::ast::{BoolOp, CompareOp, Expr, Field, Logical};
use crate::error::{FormulaError, Result};

pub fn field(name: impl Into<String>) -> Result<Expr> {
    Expr::field(name)
}

/// `AND(left, right)`, absorbing either side that is already an `AND`.
/// [`or`] and [`xor`] absorb the same way.
pub fn and(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    combine(BoolOp::And, left.into(), right.into())
}

pub fn or(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    combine(BoolOp::Or, left.into(), right.into())
}

pub fn xor(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    combine(BoolOp::Xor, left.into(), right.into())
}

pub fn not(operand: impl Into<Expr>) -> Expr {
    Expr::negate(operand)
}

pub fn all_of<I, E>(operands: I) -> Result<Expr>
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::logical(BoolOp::And, operands)
}

pub fn any_of<I, E>(operands: I) -> Result<Expr>
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::logical(BoolOp::Or, operands)
}

pub fn xor_of<I, E>(operands: I) -> Result<Expr>
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::logical(BoolOp::Xor, operands)
}

fn combine(op: BoolOp, left: Expr, right: Expr) -> Expr {
    let mut operands = Vec::with_capacity(2);
    for side in [left, right] {
        match side {
            Expr::Logical(inner) if inner.op == op => operands.extend(inner.operands),
            other => operands.push(other),
        }
    }
    Expr::Logical(Logical { op, operands })
}

impl Expr {
    pub fn eq(self, other: impl Into<Expr>) -> Expr {
        Expr::compare(CompareOp::Eq, self, other)
    }

    pub fn ne(self, other: impl Into<Expr>) -> Expr {
        Expr::compare(CompareOp::Ne, self, other)
    }

    pub fn gt(self, other: impl Into<Expr>) -> Expr {
        Expr::compare(CompareOp::Gt, self, other)
    }

    pub fn gte(self, other: impl Into<Expr>) -> Expr {
        Expr::compare(CompareOp::Gte, self, other)
    }

    pub fn lt(self, other: impl Into<Expr>) -> Expr {
        Expr::compare(CompareOp::Lt, self, other)
    }

    pub fn lte(self, other: impl Into<Expr>) -> Expr {
        Expr::compare(CompareOp::Lte, self, other)
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Self) -> Self::Output {
        and(self, rhs)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Self) -> Self::Output {
        or(self, rhs)
    }
}

impl BitXor for Expr {
    type Output = Expr;

    fn bitxor(self, rhs: Self) -> Self::Output {
        xor(self, rhs)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        Expr::negate(self)
    }
}

/// Field-by-field conditions joined with `AND` or `OR`.
///
/// A single condition is returned as a bare comparison, not wrapped in a
/// one-operand `AND(...)`.
///
/// ```
/// use tabq::formula::Match;
///
/// let formula = Match::new().eq("Name", "John").eq("Age", 21).all().unwrap();
/// assert_eq!(formula.to_string(), "AND({Name}='John', {Age}=21)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Match {
    conditions: Vec<(String, CompareOp, Expr)>,
}

impl Match {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(self, name: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.compare(name, CompareOp::Eq, value)
    }

    pub fn compare(mut self, name: impl Into<String>, op: CompareOp, value: impl Into<Expr>) -> Self {
        self.conditions.push((name.into(), op, value.into()));
        self
    }

    pub fn all(self) -> Result<Expr> {
        self.build(false)
    }

    pub fn any(self) -> Result<Expr> {
        self.build(true)
    }

    pub fn build(self, match_any: bool) -> Result<Expr> {
        if self.conditions.is_empty() {
            return Err(FormulaError::EmptyMatch);
        }

        let mut comparisons = Vec::with_capacity(self.conditions.len());
        for (name, op, value) in self.conditions {
            let field = Field::new(name)?;
            comparisons.push(Expr::compare(op, field, value));
        }

        tracing::trace!(conditions = comparisons.len(), match_any, "built match formula");

        if comparisons.len() == 1 {
            return Ok(comparisons.remove(0));
        }
        let op = if match_any { BoolOp::Or } else { BoolOp::And };
        Ok(Expr::Logical(Logical {
            op,
            operands: comparisons,
        }))
    }
}

/// Equality match over `(field name, value)` pairs, in iteration order.
pub fn match_fields<I, K, V>(fields: I, match_any: bool) -> Result<Expr>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Expr>,
{
    fields
        .into_iter()
        .fold(Match::new(), |m, (name, value)| m.eq(name, value))
        .build(match_any)
}
