#![allow(clippy::module_inception)]

use std::{fmt::Display, path::Path};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod semantic;
pub mod tac;

extern crate regex;

/// A 1-based `(line, column)` location inside the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(pub u32, pub u32);

impl Position {
    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.0, self.1)
    }
}

/// Builds the marker line placed under a source line, with `^` at `column`.
pub fn caret_line(column: u32) -> String {
    format!("{}^", " ".repeat(column.saturating_sub(1) as usize))
}

/// Renders the four-line diagnostic block shared by syntax errors and
/// located semantic diagnostics.
pub fn render_located(header: &str, position: Position, message: &str, source_line: &str) -> String {
    format!(
        "{} at {}:\n  {}\n  {}\n  {}",
        header,
        position,
        message,
        source_line,
        caret_line(position.column())
    )
}

pub fn display_error(error: &Error, file: &Path) {
    /*
        error: message
        -> main.c
           |
        20 | int a = ;
           |         ^
    */

    let position = error.get_position();

    let line_string = position.line().to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file.as_os_str().to_string_lossy());
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(error.get_source_line());
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = (position.column() as usize).saturating_sub(removed_whitespace).max(1);

    println!("{:>padding$} {:>arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}
