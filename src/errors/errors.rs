use std::{fmt::Display, rc::Rc};

use thiserror::Error;

use crate::{render_located, Position};

/// A lexical or syntactic failure, located at a line/column of the source.
///
/// Lexical errors are collected by the tokenizer and never stop it. A syntax
/// error aborts parsing at the first offending token.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    source_line: Rc<String>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, source_line: Rc<String>) -> Self {
        Error {
            internal_error: error_impl,
            position,
            source_line,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_source_line(&self) -> &str {
        &self.source_line
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::UnrecognisedCharacters { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacters { .. } => "UnrecognisedCharacters",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedStatement { .. } => "UnexpectedStatement",
            ErrorImpl::InvalidFactor { .. } => "InvalidFactor",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacters { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, found } => {
                if expected == ";" {
                    ErrorTip::Suggestion(format!(
                        "Unexpected token: `{}`, did you miss a semicolon?",
                        found
                    ))
                } else {
                    ErrorTip::Suggestion(format!("Expected `{}`, found `{}`", expected, found))
                }
            }
            ErrorImpl::UnexpectedStatement { token } => ErrorTip::Suggestion(format!(
                "`{}` cannot start a statement",
                token
            )),
            ErrorImpl::InvalidFactor { token } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression",
                token
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` already declared in this scope",
                variable
            )),
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` must be declared with a type before assignment",
                variable
            )),
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_lexical() {
            write!(f, "{}", self.internal_error)
        } else {
            write!(
                f,
                "{}",
                render_located(
                    "syntax error",
                    self.position,
                    &self.internal_error.to_string(),
                    &self.source_line
                )
            )
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognized characters at line {line}, column {column}: '{text}'")]
    UnrecognisedCharacters { text: String, line: u32, column: u32 },
    #[error("expected '{expected}', found '{found}'")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected statement starting with '{token}'")]
    UnexpectedStatement { token: String },
    #[error("invalid expression factor '{token}'")]
    InvalidFactor { token: String },
    #[error("variable '{variable}' already declared in this scope")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable '{variable}' not declared")]
    VariableNotDeclared { variable: String },
    #[error("function '{function}' already declared")]
    FunctionAlreadyDeclared { function: String },
}
