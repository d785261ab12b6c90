use std::fmt;

use serde::{Serialize, Serializer};

use super::ast::Expr;
use super::literal::field_name;

impl Expr {
    /// Renders the formula text sent as `filterByFormula`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Field(field) => f.write_str(&field_name(field.name())),
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Compare { op, left, right } => {
                write_operand(f, left)?;
                f.write_str(op.token())?;
                write_operand(f, right)
            }
            Expr::Logical(logical) => write_call(f, logical.op().name(), logical.operands()),
            Expr::Not(operand) => write!(f, "NOT({})", operand),
            Expr::Call { name, args } => write_call(f, name, args),
            Expr::Raw(text) => f.write_str(text),
        }
    }
}

// Comparisons don't chain in the formula grammar, so a comparison used as
// an operand is parenthesized.
fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr) -> fmt::Result {
    match operand {
        Expr::Compare { .. } => write!(f, "({})", operand),
        _ => write!(f, "{}", operand),
    }
}

fn write_call(f: &mut fmt::Formatter<'_>, name: &str, args: &[Expr]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", arg)?;
    }
    f.write_str(")")
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
