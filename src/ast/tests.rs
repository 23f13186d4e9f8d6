//! Unit tests for the AST module.
//!
//! Covers type widening, operator classes and tree printing.

use crate::{lexer::tokens::TokenKind, Position};

use super::{
    ast::{Node, NodeKind},
    types::{BinaryOperator, OperatorClass, TypeTag},
};

fn number(text: &str) -> Node {
    Node::typed(NodeKind::Number(text.to_string()), TypeTag::Int, Position(1, 1))
}

#[test]
fn test_type_tag_keywords() {
    assert_eq!(TypeTag::from_keyword("float"), Some(TypeTag::Float));
    assert_eq!(TypeTag::from_keyword("string"), Some(TypeTag::String));
    assert_eq!(TypeTag::from_keyword("double"), None);
    assert_eq!(TypeTag::Bool.to_string(), "bool");
}

#[test]
fn test_widening_is_one_way() {
    assert!(TypeTag::Float.accepts(TypeTag::Int));
    assert!(!TypeTag::Int.accepts(TypeTag::Float));
    assert!(TypeTag::Char.accepts(TypeTag::Char));
    assert!(!TypeTag::String.accepts(TypeTag::Char));

    assert_eq!(TypeTag::widen(TypeTag::Int, TypeTag::Int), TypeTag::Int);
    assert_eq!(TypeTag::widen(TypeTag::Int, TypeTag::Float), TypeTag::Float);
}

#[test]
fn test_operator_classes() {
    assert_eq!(BinaryOperator::Modulo.class(), OperatorClass::Arithmetic);
    assert_eq!(BinaryOperator::LessEqual.class(), OperatorClass::Relational);
    assert_eq!(BinaryOperator::NotEqual.class(), OperatorClass::Equality);
    assert_eq!(BinaryOperator::Or.class(), OperatorClass::Logical);
    assert_eq!(BinaryOperator::from_token(TokenKind::Percent), Some(BinaryOperator::Modulo));
    assert_eq!(BinaryOperator::from_token(TokenKind::Assignment), None);
}

#[test]
fn test_inferred_operator_types() {
    let add = BinaryOperator::Add;
    assert_eq!(add.inferred_type(Some(TypeTag::Int), Some(TypeTag::Int)), TypeTag::Int);
    assert_eq!(add.inferred_type(Some(TypeTag::Int), Some(TypeTag::Float)), TypeTag::Float);
    assert_eq!(BinaryOperator::Less.inferred_type(Some(TypeTag::Float), None), TypeTag::Bool);
}

#[test]
fn test_children_order() {
    let node = Node::new(
        NodeKind::For {
            init: None,
            condition: Some(Box::new(number("1"))),
            increment: Some(Box::new(number("2"))),
            body: Box::new(Node::synthetic(NodeKind::Block(vec![]))),
        },
        Position(1, 1),
    );
    let names: Vec<&str> = node.children().iter().map(|child| child.name()).collect();

    assert_eq!(names, vec!["Number", "Number", "Block"]);
}

#[test]
fn test_find_all_is_preorder() {
    let tree = Node::synthetic(NodeKind::Program(vec![
        number("1"),
        Node::synthetic(NodeKind::Block(vec![number("2"), number("3")])),
    ]));
    let mut found = vec![];
    tree.find_all(&|node| matches!(node.kind, NodeKind::Number(_)), &mut found);
    let values: Vec<String> = found.iter().filter_map(|node| node.value()).collect();

    assert_eq!(values, vec!["1", "2", "3"]);
}

#[test]
fn test_display_tree() {
    let tree = Node::synthetic(NodeKind::Program(vec![Node::new(
        NodeKind::Assignment {
            declared_type: Some(TypeTag::Int),
            target: Box::new(Node::typed(NodeKind::Variable("x".to_string()), TypeTag::Int, Position(1, 5))),
            value: Box::new(number("4")),
        },
        Position(1, 1),
    )]));

    assert_eq!(
        tree.to_string(),
        "Program\n  Assignment [value: int]\n    Variable [value: x] [type: int]\n    Number [value: 4] [type: int]\n"
    );
}
