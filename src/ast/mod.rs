//! AST (Abstract Syntax Tree) module
//!
//! Contains the node sum type built by the parser and consumed by the
//! semantic analyzer and the TAC generator.
//!
//! Submodules:
//! - ast: `Node`/`NodeKind` and tree printing
//! - types: value types and binary operators

#![allow(clippy::module_inception)]

pub mod ast;
pub mod types;

#[cfg(test)]
mod tests;
