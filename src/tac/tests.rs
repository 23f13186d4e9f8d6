//! Unit tests for the TAC module.
//!
//! This module contains tests for three-address code generation including:
//! - Expression temporaries and evaluation order
//! - Label layout of if, while and for
//! - Loop label resolution for break and continue
//! - Counters and numbered listings

use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::BinaryOperator,
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::{generator::TacGenerator, instruction::Instruction};

fn generate_source(source: &str) -> Vec<String> {
    let (_, result) = parse(tokenize(source).tokens);
    let program = result.expect("program should parse");

    TacGenerator::new()
        .generate(&program)
        .iter()
        .map(|instruction| instruction.to_string())
        .collect()
}

#[test]
fn test_binary_expression_order() {
    let tac = generate_source("int a = 1;\nint b = 2;\nint c = 3;\nint x = a + b * c;");

    assert_eq!(
        tac,
        vec![
            "a = 1",
            "b = 2",
            "c = 3",
            "t0 = b * c",
            "t1 = a + t0",
            "x = t1",
        ]
    );
}

#[test]
fn test_break_targets_innermost_loop() {
    let tac = generate_source("while (true) { while (true) { break; } }");

    assert_eq!(
        tac,
        vec![
            "while0:",
            "if 1 == 0 goto endwhile1",
            "while2:",
            "if 1 == 0 goto endwhile3",
            "goto endwhile3",
            "goto while2",
            "endwhile3:",
            "goto while0",
            "endwhile1:",
        ]
    );
}

#[test]
fn test_outer_loop_restored_after_inner_loop() {
    let tac = generate_source("while (true) { while (false) { } continue; }");

    assert_eq!(tac[6], "goto while0");
    assert_eq!(tac[7], "goto while0");
    assert_eq!(tac[8], "endwhile1:");
}

#[test]
fn test_if_else_layout() {
    let tac = generate_source("bool c = true;\nint x = 0;\nif (c) { x = 1; } else { x = 2; }");

    assert_eq!(
        tac,
        vec![
            "c = 1",
            "x = 0",
            "if c == 0 goto else0",
            "x = 1",
            "goto endif1",
            "else0:",
            "x = 2",
            "endif1:",
        ]
    );
}

#[test]
fn test_if_without_else_keeps_both_labels() {
    let tac = generate_source("int x = 0;\nif (x < 1) { x = 1; }");

    assert_eq!(
        tac,
        vec![
            "x = 0",
            "t0 = x < 1",
            "if t0 == 0 goto else0",
            "x = 1",
            "goto endif1",
            "else0:",
            "endif1:",
        ]
    );
}

#[test]
fn test_for_generation_order() {
    let tac = generate_source("for (int i = 0; i < 3; i = i + 1) { continue; }");

    assert_eq!(
        tac,
        vec![
            "i = 0",
            "for0:",
            "t0 = i < 3",
            "if t0 == 0 goto endfor1",
            "goto for0",
            "t1 = i + 1",
            "i = t1",
            "goto for0",
            "endfor1:",
        ]
    );
}

#[test]
fn test_for_without_condition() {
    let tac = generate_source("for (;;) { break; }");

    assert_eq!(tac, vec!["for0:", "goto endfor1", "goto for0", "endfor1:"]);
}

#[test]
fn test_function_body_and_calls() {
    let tac = generate_source(
        "int add(int a, int b) { return a + b; }\nint f() { return 1; }\nint r = add(2, f());\nf();",
    );

    assert_eq!(
        tac,
        vec![
            "t0 = a + b",
            "return t0",
            "return 1",
            "t1 = call f, ",
            "t2 = call add, 2, t1",
            "r = t2",
            "t3 = call f, ",
        ]
    );
}

#[test]
fn test_declaration_emits_nothing() {
    let tac = generate_source("int x;\nx = 4;\nstring s = \"hi\";\nchar k = 'k';");

    assert_eq!(tac, vec!["x = 4", "s = \"hi\"", "k = 'k'"]);
}

#[test]
fn test_void_return() {
    let tac = generate_source("void f() { return; }");

    assert_eq!(tac, vec!["return"]);
}

#[test]
fn test_jump_outside_loop_uses_sentinel() {
    let program = Node::synthetic(NodeKind::Program(vec![
        Node::synthetic(NodeKind::Break),
        Node::synthetic(NodeKind::Continue),
    ]));

    let instructions = TacGenerator::new().generate(&program);
    assert_eq!(
        instructions,
        vec![
            Instruction::Goto("#ERROR_BREAK_OUTSIDE_LOOP".to_string()),
            Instruction::Goto("#ERROR_CONTINUE_OUTSIDE_LOOP".to_string()),
        ]
    );
}

#[test]
fn test_counters_reset_between_runs() {
    let (_, result) = parse(tokenize("int a = 1;\nwhile (a < 2) { a = a + 1; }").tokens);
    let program = result.unwrap();
    let mut generator = TacGenerator::new();

    let first = generator.generate(&program);
    assert_eq!(generator.temporaries_allocated(), 2);
    assert_eq!(generator.labels_allocated(), 2);

    let second = generator.generate(&program);
    assert_eq!(first, second);
    assert_eq!(generator.instructions().len(), first.len());
    assert_eq!(generator.temporaries_allocated(), 2);
    assert_eq!(generator.labels_allocated(), 2);
}

#[test]
fn test_listing_is_numbered() {
    let (_, result) = parse(tokenize("int b = 2;\nint c = b * b;").tokens);
    let mut generator = TacGenerator::new();
    generator.generate(&result.unwrap());

    assert_eq!(generator.listing(), vec!["  0: b = 2", "  1: t0 = b * b", "  2: c = t0"]);
    assert_eq!(
        generator.instructions()[1],
        Instruction::Binary {
            target: "t0".to_string(),
            left: "b".to_string(),
            operator: BinaryOperator::Multiply,
            right: "b".to_string(),
        }
    );
}
