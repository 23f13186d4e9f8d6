//! TAC (three-address code) generation module
//!
//! Lowers a semantically accepted AST into a flat list of instructions with
//! temporaries and labeled jumps. Structured control flow becomes
//! conditional and unconditional jumps; `break` and `continue` resolve
//! against an explicit stack of enclosing loops.
//!
//! Submodules:
//! - generator: `TacGenerator`, counters and listing
//! - instruction: the `Instruction` enum and its textual form
//! - stmt: statement lowering
//! - expr: expression lowering

#![allow(clippy::module_inception)]

pub mod expr;
pub mod generator;
pub mod instruction;
pub mod stmt;

#[cfg(test)]
mod tests;
