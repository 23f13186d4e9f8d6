use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::TypeTag,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::{expr::parse_expr, lookups::BindingPower},
    Position,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(stmt_fn) => stmt_fn(parser),
        None => Err(parser.error_here(ErrorImpl::UnexpectedStatement {
            token: parser.found_text(),
        })),
    }
}

/// `{ stmt* }` in a fresh child scope.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<Node, Error> {
    parser.with_scope("block", parse_block_body)
}

/// `{ stmt* }` in whatever scope is current. Function and `for` bodies
/// share the scope their header opened.
pub fn parse_block_body(parser: &mut Parser) -> Result<Node, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Node::new(NodeKind::Block(statements), open.position))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::If)?;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let then_block = parse_block_stmt(parser)?;

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(Box::new(parse_if_stmt(parser)?))
        } else {
            Some(Box::new(parse_block_stmt(parser)?))
        }
    } else {
        None
    };

    Ok(Node::new(
        NodeKind::If {
            condition: Box::new(condition),
            then_block: Box::new(then_block),
            else_branch,
        },
        start.position,
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::While)?;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block_stmt(parser)?;

    Ok(Node::new(
        NodeKind::While {
            condition: Box::new(condition),
            body: Box::new(body),
        },
        start.position,
    ))
}

/// `for (init; condition; increment) { body }`
///
/// The header and the body share one scope. The initializer may redeclare a
/// name without error, so sibling loops can each declare their own index.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::For)?;
    parser.expect(TokenKind::OpenParen)?;

    parser.with_scope("for", |parser| {
        let init = match parser.current_token_kind() {
            TokenKind::Semicolon => None,
            TokenKind::TypeName => {
                let (ty, type_token) = parse_type(parser)?;
                Some(Box::new(parse_assignment(
                    parser,
                    Some((ty, type_token.position)),
                    false,
                )?))
            }
            _ => Some(Box::new(parse_assignment(parser, None, false)?)),
        };
        parser.expect(TokenKind::Semicolon)?;

        let condition = match parser.current_token_kind() {
            TokenKind::Semicolon => None,
            _ => Some(Box::new(parse_expr(parser, BindingPower::Default)?)),
        };
        parser.expect(TokenKind::Semicolon)?;

        let increment = if parser.current_token_kind() == TokenKind::CloseParen {
            None
        } else if parser.current_token_kind() == TokenKind::Identifier
            && parser.peek_kind(1) == TokenKind::Assignment
        {
            Some(Box::new(parse_assignment(parser, None, false)?))
        } else {
            Some(Box::new(parse_expr(parser, BindingPower::Default)?))
        };
        parser.expect(TokenKind::CloseParen)?;

        let body = parse_block_body(parser)?;

        Ok(Node::new(
            NodeKind::For {
                init,
                condition,
                increment,
                body: Box::new(body),
            },
            start.position,
        ))
    })
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::Break)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Node::new(NodeKind::Break, start.position))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::Continue)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Node::new(NodeKind::Continue, start.position))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::Return)?;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Node::new(NodeKind::Return(value), start.position))
}

/// A statement starting with a type name: a function declaration
/// (`type name (`), a bare declaration (`type name ;`) or a declaration
/// with initializer (`type name = expr ;`).
pub fn parse_typed_stmt(parser: &mut Parser) -> Result<Node, Error> {
    if parser.peek_kind(1) == TokenKind::Identifier && parser.peek_kind(2) == TokenKind::OpenParen {
        return parse_fn_decl_stmt(parser);
    }

    let (ty, type_token) = parse_type(parser)?;

    if parser.current_token_kind() == TokenKind::Identifier && parser.peek_kind(1) == TokenKind::Semicolon {
        let name = parser.advance();
        parser.expect(TokenKind::Semicolon)?;

        let label = parser.symbols().current_label().to_string();
        if !parser.symbols_mut().insert_variable(&name.value, ty, &label, false) {
            return Err(parser.error_at(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: name.value.clone(),
                },
                &name,
            ));
        }

        return Ok(Node::typed(
            NodeKind::Declaration {
                name: name.value,
                declared_type: ty,
            },
            ty,
            type_token.position,
        ));
    }

    let assignment = parse_assignment(parser, Some((ty, type_token.position)), true)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(assignment)
}

/// A statement starting with an identifier: a call statement or a plain
/// assignment.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let stmt = if parser.peek_kind(1) == TokenKind::OpenParen {
        parse_expr(parser, BindingPower::Default)?
    } else {
        parse_assignment(parser, None, true)?
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(stmt)
}

/// Parses `name = expr` (without the semicolon) and records it in the
/// current scope.
///
/// With a declared type the name is inserted into the current scope, already
/// initialized; `check_duplicate` decides whether a same-scope duplicate is
/// an error. Without one the name must already be visible and becomes
/// initialized. Either way it is marked used.
fn parse_assignment(
    parser: &mut Parser,
    declared: Option<(TypeTag, Position)>,
    check_duplicate: bool,
) -> Result<Node, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    let (declared_type, target_type, position) = match declared {
        Some((ty, position)) => {
            let label = parser.symbols().current_label().to_string();
            let inserted = parser.symbols_mut().insert_variable(&name.value, ty, &label, true);
            if !inserted && check_duplicate {
                return Err(variable_error(parser, &name, true));
            }
            (Some(ty), Some(ty), position)
        }
        None => {
            let ty = match parser.symbols().lookup_variable(&name.value) {
                Some(entry) => entry.ty,
                None => return Err(variable_error(parser, &name, false)),
            };
            parser.symbols_mut().mark_initialized(&name.value);
            (None, Some(ty), name.position)
        }
    };

    parser.symbols_mut().mark_used(&name.value);

    let target = Node {
        kind: NodeKind::Variable(name.value.clone()),
        ty: target_type,
        position: Some(name.position),
    };

    Ok(Node {
        kind: NodeKind::Assignment {
            declared_type,
            target: Box::new(target),
            value: Box::new(value),
        },
        ty: target_type,
        position: Some(position),
    })
}

fn variable_error(parser: &Parser, name: &Token, already_declared: bool) -> Error {
    let variable = name.value.clone();
    let error = if already_declared {
        ErrorImpl::VariableAlreadyDeclared { variable }
    } else {
        ErrorImpl::VariableNotDeclared { variable }
    };

    parser.error_at(error, name)
}

/// `type name ( params ) { body }`
///
/// Parameters and body live in one scope named after the function. The
/// signature is registered before the body so the function can call itself.
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let (return_type, type_token) = parse_type(parser)?;
    let name = parser.expect(TokenKind::Identifier)?;
    let open = parser.expect(TokenKind::OpenParen)?;

    parser.with_scope(&name.value, |parser| {
        let parameters = parse_parameters(parser, open.position)?;
        parser.expect(TokenKind::CloseParen)?;

        let mut signature = vec![];
        if let NodeKind::Parameters(list) = &parameters.kind {
            for parameter in list {
                if let (NodeKind::Parameter(param_name), Some(ty)) = (&parameter.kind, parameter.ty) {
                    signature.push((ty, param_name.clone()));
                }
            }
        }

        if !parser
            .symbols_mut()
            .insert_function(&name.value, return_type, signature.clone())
        {
            return Err(parser.error_at(
                ErrorImpl::FunctionAlreadyDeclared {
                    function: name.value.clone(),
                },
                &name,
            ));
        }

        for (ty, param_name) in &signature {
            if !parser
                .symbols_mut()
                .insert_variable(param_name, *ty, &name.value, true)
            {
                return Err(parser.error_at(
                    ErrorImpl::VariableAlreadyDeclared {
                        variable: param_name.clone(),
                    },
                    &name,
                ));
            }
        }

        let body = parse_block_body(parser)?;

        Ok(Node::typed(
            NodeKind::Function {
                name: name.value.clone(),
                return_type: Box::new(Node::typed(
                    NodeKind::ReturnTypeMarker(return_type),
                    return_type,
                    type_token.position,
                )),
                parameters: Box::new(parameters),
                body: Box::new(body),
            },
            return_type,
            type_token.position,
        ))
    })
}

fn parse_parameters(parser: &mut Parser, position: Position) -> Result<Node, Error> {
    let mut parameters = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let (ty, _) = parse_type(parser)?;
            let name = parser.expect(TokenKind::Identifier)?;
            parameters.push(Node::typed(NodeKind::Parameter(name.value), ty, name.position));

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    Ok(Node::new(NodeKind::Parameters(parameters), position))
}
