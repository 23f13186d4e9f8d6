//! Scoped symbol table.
//!
//! A tree of lexical scopes holding variable and function records. The
//! parser keeps one table per compilation; the semantic passes build their
//! own lighter scope stacks and never share this one, except for the final
//! unused/uninitialized audit which reads it.

pub mod scope;
