pub mod ast;
pub mod builder;
pub mod functions;
pub mod literal;
mod render;

pub use ast::{BoolOp, CompareOp, Expr, Field, Logical};
pub use builder::{all_of, and, any_of, field, match_fields, not, or, xor, xor_of, Match};
pub use literal::{field_name, quoted, unquote, FiniteFloat, Literal};
