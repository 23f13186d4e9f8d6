use std::fmt::Display;

use crate::ast::types::BinaryOperator;

/// One three-address instruction. Operands are plain text: a variable
/// name, a literal, or a temporary such as `t3`.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `target = source`
    Copy { target: String, source: String },
    /// `target = left OP right`
    Binary {
        target: String,
        left: String,
        operator: BinaryOperator,
        right: String,
    },
    /// `label:`
    Label(String),
    /// `goto label`
    Goto(String),
    /// `if condition == 0 goto label`
    IfFalse { condition: String, label: String },
    /// `target = call function, arg, ...`
    Call {
        target: String,
        function: String,
        arguments: Vec<String>,
    },
    /// `return [value]`
    Return(Option<String>),
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Copy { target, source } => write!(f, "{} = {}", target, source),
            Instruction::Binary {
                target,
                left,
                operator,
                right,
            } => write!(f, "{} = {} {} {}", target, left, operator.symbol(), right),
            Instruction::Label(label) => write!(f, "{}:", label),
            Instruction::Goto(label) => write!(f, "goto {}", label),
            Instruction::IfFalse { condition, label } => {
                write!(f, "if {} == 0 goto {}", condition, label)
            }
            // An empty argument list still keeps the separator
            Instruction::Call {
                target,
                function,
                arguments,
            } => write!(f, "{} = call {}, {}", target, function, arguments.join(", ")),
            Instruction::Return(Some(value)) => write!(f, "return {}", value),
            Instruction::Return(None) => write!(f, "return"),
        }
    }
}
