//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Declarations and assignments
//! - Function declarations
//! - Expressions and precedence
//! - Control flow statements
//! - Scope handling and syntax errors

use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::{BinaryOperator, TypeTag},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    scope::scope::GLOBAL_SCOPE,
};

use super::parser::{parse, Parser};

fn parse_source(source: &str) -> (Parser, Result<Node, Error>) {
    parse(tokenize(source).tokens)
}

fn parse_ok(source: &str) -> (Parser, Vec<Node>) {
    let (parser, result) = parse_source(source);
    match result {
        Ok(Node {
            kind: NodeKind::Program(statements),
            ..
        }) => (parser, statements),
        other => panic!("expected a program, got {:?}", other),
    }
}

fn parse_err(source: &str) -> Error {
    match parse_source(source).1 {
        Ok(node) => panic!("expected a syntax error, got\n{}", node),
        Err(error) => error,
    }
}

fn assignment_value(node: &Node) -> &Node {
    match &node.kind {
        NodeKind::Assignment { value, .. } => value,
        other => panic!("expected an assignment, got {:?}", other),
    }
}

fn assignment_target(node: &Node) -> &Node {
    match &node.kind {
        NodeKind::Assignment { target, .. } => target,
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let (parser, statements) = parse_ok("int x = 42;");

    assert_eq!(statements.len(), 1);
    match &statements[0].kind {
        NodeKind::Assignment {
            declared_type,
            target,
            value,
        } => {
            assert_eq!(*declared_type, Some(TypeTag::Int));
            assert_eq!(target.kind, NodeKind::Variable("x".to_string()));
            assert_eq!(target.ty, Some(TypeTag::Int));
            assert_eq!(value.kind, NodeKind::Number("42".to_string()));
        }
        other => panic!("unexpected node {:?}", other),
    }

    let entry = parser.symbols().lookup_variable("x").unwrap();
    assert!(entry.initialized);
    assert!(entry.used);
    assert_eq!(entry.scope_label, "global");
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let (_, statements) = parse_ok("int a = 1; int b = 2; int c = 3; int x = a + b * c;");

    match &assignment_value(&statements[3]).kind {
        NodeKind::BinaryOp { operator, right, .. } => {
            assert_eq!(*operator, BinaryOperator::Add);
            assert!(matches!(
                right.kind,
                NodeKind::BinaryOp {
                    operator: BinaryOperator::Multiply,
                    ..
                }
            ));
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_binary_operators_are_left_associative() {
    let (_, statements) = parse_ok("int x = 10 - 4 - 3;");

    match &assignment_value(&statements[0]).kind {
        NodeKind::BinaryOp { left, right, .. } => {
            assert!(matches!(
                left.kind,
                NodeKind::BinaryOp {
                    operator: BinaryOperator::Subtract,
                    ..
                }
            ));
            assert_eq!(right.kind, NodeKind::Number("3".to_string()));
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_and_binds_tighter_than_or() {
    let (_, statements) = parse_ok("bool b = true || false && true;");

    match &assignment_value(&statements[0]).kind {
        NodeKind::BinaryOp { operator, right, .. } => {
            assert_eq!(*operator, BinaryOperator::Or);
            assert!(matches!(
                right.kind,
                NodeKind::BinaryOp {
                    operator: BinaryOperator::And,
                    ..
                }
            ));
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_grouping_overrides_precedence() {
    let (_, statements) = parse_ok("int x = (1 + 2) * 3;");

    assert!(matches!(
        assignment_value(&statements[0]).kind,
        NodeKind::BinaryOp {
            operator: BinaryOperator::Multiply,
            ..
        }
    ));
}

#[test]
fn test_inline_type_inference() {
    let (_, statements) = parse_ok("float f = 1 + 2.5; int i = 2 * 3; bool c = 1 < 2; bool d = c && c;");

    assert_eq!(assignment_value(&statements[0]).ty, Some(TypeTag::Float));
    assert_eq!(assignment_value(&statements[1]).ty, Some(TypeTag::Int));
    assert_eq!(assignment_value(&statements[2]).ty, Some(TypeTag::Bool));
    assert_eq!(assignment_value(&statements[3]).ty, Some(TypeTag::Bool));
}

#[test]
fn test_string_and_char_literals() {
    let (_, statements) = parse_ok("string s = \"hi\"; char c = 'x';");

    let string = assignment_value(&statements[0]);
    assert_eq!(string.kind, NodeKind::StringLiteral("\"hi\"".to_string()));
    assert_eq!(string.ty, Some(TypeTag::String));
    assert_eq!(assignment_value(&statements[1]).ty, Some(TypeTag::Char));
}

#[test]
fn test_parse_function_declaration() {
    let (parser, statements) = parse_ok("int add(int a, float b) { return a + b; }");

    match &statements[0].kind {
        NodeKind::Function {
            name,
            return_type,
            parameters,
            body,
        } => {
            assert_eq!(name, "add");
            assert_eq!(return_type.kind, NodeKind::ReturnTypeMarker(TypeTag::Int));
            assert_eq!(parameters.children().len(), 2);
            assert_eq!(parameters.children()[1].ty, Some(TypeTag::Float));
            assert!(matches!(&body.kind, NodeKind::Block(stmts) if stmts.len() == 1));
        }
        other => panic!("unexpected node {:?}", other),
    }

    let function = parser.symbols().lookup_function("add").unwrap();
    assert_eq!(function.return_type, TypeTag::Int);
    assert_eq!(
        function.parameters,
        vec![(TypeTag::Int, "a".to_string()), (TypeTag::Float, "b".to_string())]
    );

    // Parameters live in the function scope, which is shared with the body
    let params: Vec<&str> = parser
        .symbols()
        .variables()
        .iter()
        .filter(|(label, _, _)| *label == "add")
        .map(|(_, name, _)| *name)
        .collect();
    assert_eq!(params, vec!["a", "b"]);
}

#[test]
fn test_function_can_call_itself() {
    let (_, statements) = parse_ok("int f(int n) { return f(n - 1); }");

    let mut calls = vec![];
    statements[0].find_all(&|node| matches!(node.kind, NodeKind::FunctionCall { .. }), &mut calls);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].ty, Some(TypeTag::Int));
}

#[test]
fn test_duplicate_function_is_error() {
    let error = parse_err("void f() { }\nvoid f() { }");

    assert!(matches!(error.get_impl(), ErrorImpl::FunctionAlreadyDeclared { function } if function == "f"));
    assert_eq!(error.get_position().line(), 2);
}

#[test]
fn test_duplicate_declaration_in_same_scope_is_error() {
    let error = parse_err("int x = 1; int x = 2;");

    assert!(matches!(error.get_impl(), ErrorImpl::VariableAlreadyDeclared { variable } if variable == "x"));
    assert_eq!(error.get_position().column(), 16);
}

#[test]
fn test_shadowing_resolves_to_innermost() {
    let (parser, statements) = parse_ok("int x = 1;\n{ float x = 2.5; x = 3.5; }\nx = 4;");

    match &statements[1].kind {
        NodeKind::Block(inner) => assert_eq!(assignment_target(&inner[1]).ty, Some(TypeTag::Float)),
        other => panic!("unexpected node {:?}", other),
    }
    assert_eq!(assignment_target(&statements[2]).ty, Some(TypeTag::Int));

    let labels: Vec<(&str, &str)> = parser
        .symbols()
        .variables()
        .iter()
        .map(|(label, name, _)| (*label, *name))
        .collect();
    assert_eq!(labels, vec![("global", "x"), ("block", "x")]);
}

#[test]
fn test_assignment_to_undeclared_variable_is_error() {
    let error = parse_err("y = 5;");

    assert!(matches!(error.get_impl(), ErrorImpl::VariableNotDeclared { variable } if variable == "y"));
    assert_eq!(error.to_string().lines().next(), Some("syntax error at line 1, column 1:"));
}

#[test]
fn test_variable_from_closed_scope_is_not_visible() {
    let error = parse_err("{ int inner = 1; }\ninner = 2;");

    assert!(matches!(error.get_impl(), ErrorImpl::VariableNotDeclared { .. }));
}

#[test]
fn test_sibling_for_loops_redeclare_index() {
    let (parser, statements) = parse_ok(
        "for (int i = 0; i < 10; i = i + 1) { }\nfor (int i = 0; i < 5; i = i + 1) { int j = i; }",
    );

    assert_eq!(statements.len(), 2);
    assert!(statements.iter().all(|stmt| matches!(stmt.kind, NodeKind::For { .. })));

    // The body shares the header scope
    let j = parser
        .symbols()
        .variables()
        .into_iter()
        .find(|(_, name, _)| *name == "j")
        .unwrap();
    assert_eq!(j.0, "for");
    assert_eq!(parser.symbols().current_id(), GLOBAL_SCOPE);
}

#[test]
fn test_for_with_empty_clauses() {
    let (_, statements) = parse_ok("for (;;) { break; }");

    match &statements[0].kind {
        NodeKind::For {
            init,
            condition,
            increment,
            body,
        } => {
            assert!(init.is_none() && condition.is_none() && increment.is_none());
            assert!(matches!(&body.kind, NodeKind::Block(stmts) if stmts[0].kind == NodeKind::Break));
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_if_else_if_chain() {
    let (_, statements) = parse_ok("bool c = true;\nif (c) { } else if (c) { } else { }");

    match &statements[1].kind {
        NodeKind::If { else_branch, .. } => {
            let else_branch = else_branch.as_ref().unwrap();
            match &else_branch.kind {
                NodeKind::If { else_branch, .. } => {
                    assert!(matches!(else_branch.as_ref().unwrap().kind, NodeKind::Block(_)))
                }
                other => panic!("unexpected node {:?}", other),
            }
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_while_and_return_forms() {
    let (_, statements) = parse_ok("void f() { int i = 0; while (i < 3) { i = i + 1; continue; } return; }");

    let mut found = vec![];
    statements[0].find_all(
        &|node| matches!(node.kind, NodeKind::While { .. } | NodeKind::Continue | NodeKind::Return(None)),
        &mut found,
    );
    assert_eq!(found.len(), 3);
}

#[test]
fn test_declaration_without_initializer() {
    let (parser, statements) = parse_ok("int x;");

    assert_eq!(
        statements[0].kind,
        NodeKind::Declaration {
            name: "x".to_string(),
            declared_type: TypeTag::Int
        }
    );
    let entry = parser.symbols().lookup_variable("x").unwrap();
    assert!(!entry.initialized);
    assert!(!entry.used);

    let (parser, _) = parse_ok("int x;\nx = 2;");
    let entry = parser.symbols().lookup_variable("x").unwrap();
    assert!(entry.initialized);
    assert!(entry.used);
}

#[test]
fn test_call_statement() {
    let (_, statements) = parse_ok("int f() { return 1; }\nf();\nint y = f();");

    assert!(matches!(&statements[1].kind, NodeKind::FunctionCall { name, .. } if name == "f"));
    assert_eq!(assignment_value(&statements[2]).ty, Some(TypeTag::Int));
}

#[test]
fn test_headers_are_skipped() {
    let (_, statements) = parse_ok("#include <stdio.h>\n#include <iostream>\nint x = 1;");

    assert_eq!(statements.len(), 1);
}

#[test]
fn test_missing_semicolon() {
    let error = parse_err("int x = 1");

    assert!(matches!(
        error.get_impl(),
        ErrorImpl::UnexpectedToken { expected, found } if expected == ";" && found == "end of input"
    ));
}

#[test]
fn test_invalid_factor_renders_caret() {
    let error = parse_err("int x = ;");
    let rendered = error.to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert!(matches!(error.get_impl(), ErrorImpl::InvalidFactor { token } if token == ";"));
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "syntax error at line 1, column 9:");
    assert_eq!(lines[2], "  int x = ;");
    assert_eq!(lines[3], format!("  {}^", " ".repeat(8)));
}

#[test]
fn test_unexpected_statement() {
    let error = parse_err("else { }");

    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedStatement { token } if token == "else"));
}

#[test]
fn test_scope_is_left_when_body_fails() {
    let (parser, result) = parse_source("int f(int a) { { a = ; } }");

    assert!(result.is_err());
    assert_eq!(parser.symbols().current_id(), GLOBAL_SCOPE);
}

#[test]
fn test_expression_reads_mark_used() {
    let (parser, _) = parse_ok("int a;\nint b;\nb = a + 1;");

    assert!(parser.symbols().lookup_variable("a").unwrap().used);
    assert!(!parser.symbols().lookup_variable("a").unwrap().initialized);
    assert!(parser.symbols().lookup_variable("b").unwrap().initialized);
}
