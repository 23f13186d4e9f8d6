use crate::ast::ast::{Node, NodeKind};

use super::{
    expr::gen_expression,
    generator::{LoopLabels, LoopStack, TacGenerator},
    instruction::Instruction,
};

pub const BREAK_OUTSIDE_LOOP: &str = "#ERROR_BREAK_OUTSIDE_LOOP";
pub const CONTINUE_OUTSIDE_LOOP: &str = "#ERROR_CONTINUE_OUTSIDE_LOOP";

pub fn gen_statement(generator: &mut TacGenerator, statement: &Node, loops: &mut LoopStack) {
    match &statement.kind {
        NodeKind::Program(statements) | NodeKind::Block(statements) => {
            for statement in statements {
                gen_statement(generator, statement, loops);
            }
        }
        // Signature nodes produce no code
        NodeKind::Function { body, .. } => gen_statement(generator, body, loops),
        NodeKind::Assignment { target, value, .. } => {
            let source = gen_expression(generator, value);
            let target = gen_expression(generator, target);

            generator.emit(Instruction::Copy { target, source });
        }
        NodeKind::Declaration { .. } => {}
        NodeKind::If {
            condition,
            then_block,
            else_branch,
        } => {
            let condition = gen_expression(generator, condition);
            let else_label = generator.new_label("else");
            let end_label = generator.new_label("endif");

            generator.emit(Instruction::IfFalse {
                condition,
                label: else_label.clone(),
            });
            gen_statement(generator, then_block, loops);
            generator.emit(Instruction::Goto(end_label.clone()));
            generator.emit(Instruction::Label(else_label));
            if let Some(else_branch) = else_branch {
                gen_statement(generator, else_branch, loops);
            }
            generator.emit(Instruction::Label(end_label));
        }
        NodeKind::While { condition, body } => {
            let labels = LoopLabels {
                start: generator.new_label("while"),
                end: generator.new_label("endwhile"),
            };

            generator.emit(Instruction::Label(labels.start.clone()));
            let condition = gen_expression(generator, condition);
            generator.emit(Instruction::IfFalse {
                condition,
                label: labels.end.clone(),
            });

            gen_loop_body(generator, body, labels.clone(), loops);

            generator.emit(Instruction::Goto(labels.start));
            generator.emit(Instruction::Label(labels.end));
        }
        NodeKind::For {
            init,
            condition,
            increment,
            body,
        } => {
            let labels = LoopLabels {
                start: generator.new_label("for"),
                end: generator.new_label("endfor"),
            };

            if let Some(init) = init {
                gen_statement(generator, init, loops);
            }
            generator.emit(Instruction::Label(labels.start.clone()));
            if let Some(condition) = condition {
                let condition = gen_expression(generator, condition);
                generator.emit(Instruction::IfFalse {
                    condition,
                    label: labels.end.clone(),
                });
            }

            gen_loop_body(generator, body, labels.clone(), loops);

            if let Some(increment) = increment {
                gen_statement(generator, increment, loops);
            }
            generator.emit(Instruction::Goto(labels.start));
            generator.emit(Instruction::Label(labels.end));
        }
        NodeKind::Break => {
            let target = match loops.last() {
                Some(labels) => labels.end.clone(),
                None => BREAK_OUTSIDE_LOOP.to_string(),
            };
            generator.emit(Instruction::Goto(target));
        }
        NodeKind::Continue => {
            let target = match loops.last() {
                Some(labels) => labels.start.clone(),
                None => CONTINUE_OUTSIDE_LOOP.to_string(),
            };
            generator.emit(Instruction::Goto(target));
        }
        NodeKind::Return(value) => {
            let value = value
                .as_ref()
                .map(|value| gen_expression(generator, value));
            generator.emit(Instruction::Return(value));
        }
        // Expression statement, the result is discarded
        NodeKind::FunctionCall { .. }
        | NodeKind::BinaryOp { .. }
        | NodeKind::Variable(_)
        | NodeKind::Number(_)
        | NodeKind::Boolean(_)
        | NodeKind::StringLiteral(_)
        | NodeKind::CharLiteral(_) => {
            gen_expression(generator, statement);
        }
        NodeKind::Parameters(_)
        | NodeKind::Parameter(_)
        | NodeKind::ReturnTypeMarker(_)
        | NodeKind::Arguments(_) => {}
    }
}

/// Generates `body` with `labels` as the innermost loop.
fn gen_loop_body(
    generator: &mut TacGenerator,
    body: &Node,
    labels: LoopLabels,
    loops: &mut LoopStack,
) {
    loops.push(labels);
    gen_statement(generator, body, loops);
    loops.pop();
}
