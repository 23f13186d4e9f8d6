use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::BinaryOperator,
    },
    lexer::tokens::Token,
};

use super::diagnostics::{Diagnostic, DiagnosticKind};

/// Divisions whose right operand is the literal `0` or `0.0`. Divisors that
/// only evaluate to zero at run time are not detected.
pub fn check_division_by_zero(program: &Node, tokens: &[Token]) -> Vec<Diagnostic> {
    let mut divisions = vec![];
    program.find_all(&is_division_by_literal_zero, &mut divisions);

    divisions
        .into_iter()
        .map(|node| Diagnostic::new(DiagnosticKind::DivisionByZero, node.position, tokens))
        .collect()
}

fn is_division_by_literal_zero(node: &Node) -> bool {
    match &node.kind {
        NodeKind::BinaryOp {
            operator: BinaryOperator::Divide,
            right,
            ..
        } => matches!(&right.kind, NodeKind::Number(text) if text == "0" || text == "0.0"),
        _ => false,
    }
}
