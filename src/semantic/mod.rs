//! Semantic analysis.
//!
//! Verifies a parsed program in independent passes that each rebuild
//! scoping from the tree, and collects every finding instead of stopping at
//! the first:
//!
//! - usage: undeclared names and functions, call arity, stray `break`/`continue`
//! - types: operand classes, conditions, assignments, returns
//! - division by a literal zero
//! - an audit of the parser's symbol table for unused or uninitialized
//!   variables, reported as advisories
//!
//! Nothing here aborts the pipeline; callers decide what to do with
//! error-severity diagnostics.

pub mod analyzer;
pub mod diagnostics;
pub mod division;
pub mod type_check;
pub mod usage;
pub mod walker;
