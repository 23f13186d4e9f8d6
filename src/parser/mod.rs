//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Statement parsing (declarations, assignments, functions, control flow)
//! - Expression parsing (binary ops, function calls, literals)
//! - Scope tracking for declarations, with shadowing across nested scopes
//!
//! Parsing stops at the first syntax error; there is no recovery.
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

#![allow(clippy::module_inception)]

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
