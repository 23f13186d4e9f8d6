//! Utility macros for the compiler.
//!
//! This module defines helper macros used throughout the compiler:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for simple tokens
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's lexeme
/// * `$position` - The 1-based line/column of the first character
/// * `$line` - The shared source line the token was read from
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), Position(1, 9), line);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr, $line:expr) => {
        Token {
            kind: $kind,
            value: $value,
            position: $position,
            line: $line,
        }
    };
}

/// Creates a default lexer handler for patterns that always yield one kind.
///
/// Generates a handler function that pushes a token of the given kind with
/// the matched text and advances the lexer past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer, matched: &str| {
            let token = MK_TOKEN!(
                $kind,
                String::from(matched),
                lexer.position(),
                Rc::clone(&lexer.line)
            );
            lexer.push(token);
            lexer.advance_n(matched.len());
        }
    };
}
