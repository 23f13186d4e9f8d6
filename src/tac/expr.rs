use crate::ast::ast::{Node, NodeKind};

use super::{generator::TacGenerator, instruction::Instruction};

/// Generates the instructions computing `expression` and returns the
/// operand holding its value. Literals and variables emit nothing.
pub fn gen_expression(generator: &mut TacGenerator, expression: &Node) -> String {
    match &expression.kind {
        NodeKind::Number(text)
        | NodeKind::Variable(text)
        | NodeKind::StringLiteral(text)
        | NodeKind::CharLiteral(text) => text.clone(),
        NodeKind::Boolean(value) => String::from(if *value { "1" } else { "0" }),
        NodeKind::BinaryOp {
            operator,
            left,
            right,
        } => {
            let left = gen_expression(generator, left);
            let right = gen_expression(generator, right);
            let target = generator.new_temp();

            generator.emit(Instruction::Binary {
                target: target.clone(),
                left,
                operator: *operator,
                right,
            });
            target
        }
        NodeKind::FunctionCall { name, arguments } => {
            let arguments = arguments
                .children()
                .into_iter()
                .map(|argument| gen_expression(generator, argument))
                .collect();
            let target = generator.new_temp();

            generator.emit(Instruction::Call {
                target: target.clone(),
                function: name.clone(),
                arguments,
            });
            target
        }
        // Not expressions; the statement generator never passes these here
        NodeKind::Program(_)
        | NodeKind::Block(_)
        | NodeKind::Function { .. }
        | NodeKind::Parameters(_)
        | NodeKind::Parameter(_)
        | NodeKind::ReturnTypeMarker(_)
        | NodeKind::Assignment { .. }
        | NodeKind::Declaration { .. }
        | NodeKind::Arguments(_)
        | NodeKind::If { .. }
        | NodeKind::While { .. }
        | NodeKind::For { .. }
        | NodeKind::Break
        | NodeKind::Continue
        | NodeKind::Return(_) => String::new(),
    }
}
