//! Filter formulas for Airtable-style tabular data APIs.
//!
//! Build a predicate out of fields, literals and combinators, then render it
//! to the text the service expects in `filterByFormula`:
//!
//! ```
//! use tabq::formula::field;
//!
//! let formula = field("Age").unwrap().gte(18) & field("Status").unwrap().eq("Active");
//! assert_eq!(formula.to_string(), "AND({Age}>=18, {Status}='Active')");
//! ```
//!
//! The rendered string is raw formula text; URL-encoding it is left to the
//! HTTP layer.

pub mod error;
pub mod formula;
pub mod values;

pub use error::{FormulaError, Result};
pub use formula::{match_fields, Expr, Field, Literal, Match};
