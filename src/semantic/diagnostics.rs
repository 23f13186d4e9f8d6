use std::{fmt::Display, rc::Rc};

use thiserror::Error;

use crate::{ast::types::TypeTag, lexer::tokens::Token, render_located, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Advisory,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("variable '{variable}' not declared")]
    VariableNotDeclared { variable: String },
    #[error("function '{function}' not declared")]
    FunctionNotDeclared { function: String },
    #[error("function '{function}' expects {expected} argument(s), received {received}")]
    ArgumentCount {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {index} of '{function}' expects {expected}, received {received}")]
    ArgumentType {
        function: String,
        index: usize,
        expected: TypeTag,
        received: TypeTag,
    },
    #[error("'{statement}' used outside of a loop")]
    JumpOutsideLoop { statement: String },
    #[error("condition of '{construct}' must be bool, found {found}")]
    NonBooleanCondition { construct: String, found: TypeTag },
    #[error("invalid operation between {left} and {right}")]
    InvalidOperation { left: TypeTag, right: TypeTag },
    #[error("cannot assign {value} to variable '{variable}' of type {target}")]
    AssignmentMismatch {
        variable: String,
        target: TypeTag,
        value: TypeTag,
    },
    #[error("function '{function}' must return a value")]
    MissingReturn { function: String },
    #[error("void function cannot return a value")]
    VoidReturnsValue,
    #[error("expected a return value of type {expected}")]
    MissingReturnValue { expected: TypeTag },
    #[error("return type {found} does not match {expected}")]
    ReturnTypeMismatch { found: TypeTag, expected: TypeTag },
    #[error("division by zero")]
    DivisionByZero,
    #[error("variable '{variable}' declared but never used")]
    UnusedVariable { variable: String },
    #[error("variable '{variable}' is never initialized")]
    UninitializedVariable { variable: String },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnusedVariable { .. } | DiagnosticKind::UninitializedVariable { .. } => {
                Severity::Advisory
            }
            _ => Severity::Error,
        }
    }

    /// Header word used when rendering.
    pub fn category(&self) -> &'static str {
        match self {
            DiagnosticKind::VariableNotDeclared { .. }
            | DiagnosticKind::FunctionNotDeclared { .. }
            | DiagnosticKind::ArgumentCount { .. }
            | DiagnosticKind::JumpOutsideLoop { .. } => "semantic error",
            DiagnosticKind::ArgumentType { .. }
            | DiagnosticKind::NonBooleanCondition { .. }
            | DiagnosticKind::InvalidOperation { .. }
            | DiagnosticKind::AssignmentMismatch { .. }
            | DiagnosticKind::MissingReturn { .. }
            | DiagnosticKind::VoidReturnsValue
            | DiagnosticKind::MissingReturnValue { .. }
            | DiagnosticKind::ReturnTypeMismatch { .. } => "type error",
            DiagnosticKind::DivisionByZero => "arithmetic error",
            DiagnosticKind::UnusedVariable { .. } | DiagnosticKind::UninitializedVariable { .. } => "warning",
        }
    }
}

/// One semantic finding. When the location is known it also carries the
/// source line, looked up from the token stream, for caret rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Option<Position>,
    pub source_line: Option<Rc<String>>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, position: Option<Position>, tokens: &[Token]) -> Self {
        let source_line = position.and_then(|position| {
            tokens
                .iter()
                .find(|token| token.position.line() == position.line())
                .map(|token| Rc::clone(&token.line))
        });

        Diagnostic {
            kind,
            position,
            source_line,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.position, &self.source_line) {
            (Some(position), Some(line)) => write!(
                f,
                "{}",
                render_located(self.kind.category(), position, &self.kind.to_string(), line)
            ),
            _ => write!(f, "{}: {}", self.kind.category(), self.kind),
        }
    }
}
