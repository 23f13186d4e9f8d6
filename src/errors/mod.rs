//! Error types and error handling for the front end.
//!
//! This module defines the lexical and syntactic error types. It includes:
//!
//! - Error structures with line/column and source line information
//! - Specific error variants for tokenizing and parsing
//! - Error formatting (caret rendering) and display functionality
//! - Helpful error messages and suggestions
//!
//! Semantic findings are not errors in this sense: they are accumulated as
//! diagnostics, see `crate::semantic::diagnostics`.

pub mod errors;
