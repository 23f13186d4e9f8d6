//! Type parsing implementation.
//!
//! The language only has the six built-in type names, so a type annotation
//! is always a single `TypeName` token.

use crate::{
    ast::types::TypeTag,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::parser::Parser;

/// Consumes a type name and returns it with the token it was read from.
pub fn parse_type(parser: &mut Parser) -> Result<(TypeTag, Token), Error> {
    let token = parser.expect(TokenKind::TypeName)?;

    match TypeTag::from_keyword(&token.value) {
        Some(ty) => Ok((ty, token)),
        None => Err(parser.error_at(
            ErrorImpl::UnexpectedToken {
                expected: TokenKind::TypeName.describe().to_string(),
                found: token.value.clone(),
            },
            &token,
        )),
    }
}
