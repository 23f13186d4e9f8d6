//! Lexical analysis module for the front end.
//!
//! This module contains the tokenizer that converts source text into a
//! located stream of tokens for parsing. It handles:
//!
//! - Line-by-line tokenization using priority-ordered regex patterns
//! - Recognition of headers, keywords, type names, literals and operators
//! - 1-based line/column tracking plus the source line of every token
//! - Per-kind token counts
//! - Collection (not propagation) of unrecognised character runs

pub mod lexer;
pub mod tokens;
