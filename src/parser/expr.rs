use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::{BinaryOperator, TypeTag},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => {
            return Err(parser.error_here(ErrorImpl::InvalidFactor {
                token: parser.found_text(),
            }))
        }
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than the current one, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let binding_power = match parser.get_bp_lookup().get(&token_kind) {
            Some(binding_power) if *binding_power > bp => *binding_power,
            _ => break,
        };
        let led_fn = match parser.get_led_lookup().get(&token_kind) {
            Some(led_fn) => *led_fn,
            None => break,
        };

        left = led_fn(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance();

    match token.kind {
        TokenKind::Number => {
            let ty = if token.value.contains('.') {
                TypeTag::Float
            } else {
                TypeTag::Int
            };
            Ok(Node::typed(NodeKind::Number(token.value), ty, token.position))
        }
        TokenKind::True | TokenKind::False => Ok(Node::typed(
            NodeKind::Boolean(token.kind == TokenKind::True),
            TypeTag::Bool,
            token.position,
        )),
        TokenKind::String => Ok(Node::typed(
            NodeKind::StringLiteral(token.value),
            TypeTag::String,
            token.position,
        )),
        TokenKind::Char => Ok(Node::typed(
            NodeKind::CharLiteral(token.value),
            TypeTag::Char,
            token.position,
        )),
        _ => Err(parser.error_at(
            ErrorImpl::InvalidFactor {
                token: token.value.clone(),
            },
            &token,
        )),
    }
}

/// A variable reference, or a call when the name is followed by `(`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    if parser.current_token_kind() == TokenKind::OpenParen {
        return parse_call_expr(parser, token);
    }

    parser.symbols_mut().mark_used(&token.value);
    let ty = parser
        .symbols()
        .lookup_variable(&token.value)
        .map(|entry| entry.ty);

    Ok(Node {
        kind: NodeKind::Variable(token.value),
        ty,
        position: Some(token.position),
    })
}

pub fn parse_call_expr(parser: &mut Parser, name: Token) -> Result<Node, Error> {
    let open = parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            args.push(parse_expr(parser, BindingPower::Default)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let ty = parser
        .symbols()
        .lookup_function(&name.value)
        .map(|function| function.return_type);

    Ok(Node {
        kind: NodeKind::FunctionCall {
            name: name.value,
            arguments: Box::new(Node::new(NodeKind::Arguments(args), open.position)),
        },
        ty,
        position: Some(name.position),
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, bp: BindingPower) -> Result<Node, Error> {
    let operator_token = parser.advance();
    let operator = match BinaryOperator::from_token(operator_token.kind) {
        Some(operator) => operator,
        None => {
            return Err(parser.error_at(
                ErrorImpl::InvalidFactor {
                    token: operator_token.value.clone(),
                },
                &operator_token,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;
    let ty = operator.inferred_type(left.ty, right.ty);

    Ok(Node::typed(
        NodeKind::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        ty,
        operator_token.position,
    ))
}
