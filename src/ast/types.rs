//! Type and operator definitions for the AST.
//!
//! This module defines the closed set of value types of the language and
//! the binary operators, including:
//!
//! - `TypeTag`, with the int-to-float widening rule
//! - `BinaryOperator`, its TAC symbol and its operand class
//!
//! Types are filled in eagerly by the parser and re-derived by the
//! semantic analyzer, which is authoritative.

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Int,
    Float,
    Bool,
    Char,
    String,
    Void,
}

impl TypeTag {
    pub fn from_keyword(keyword: &str) -> Option<TypeTag> {
        match keyword {
            "int" => Some(TypeTag::Int),
            "float" => Some(TypeTag::Float),
            "bool" => Some(TypeTag::Bool),
            "char" => Some(TypeTag::Char),
            "string" => Some(TypeTag::String),
            "void" => Some(TypeTag::Void),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Bool => "bool",
            TypeTag::Char => "char",
            TypeTag::String => "string",
            TypeTag::Void => "void",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Float)
    }

    /// Whether a value of type `value` may be stored where `self` is expected.
    /// Only exact matches and int-into-float widening are accepted.
    pub fn accepts(&self, value: TypeTag) -> bool {
        *self == value || (*self == TypeTag::Float && value == TypeTag::Int)
    }

    /// Result type of an arithmetic operation.
    pub fn widen(left: TypeTag, right: TypeTag) -> TypeTag {
        if left == TypeTag::Float || right == TypeTag::Float {
            TypeTag::Float
        } else {
            TypeTag::Int
        }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which operand types an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    Arithmetic,
    Relational,
    Equality,
    Logical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::Percent => Some(BinaryOperator::Modulo),
            TokenKind::Equals => Some(BinaryOperator::Equal),
            TokenKind::NotEquals => Some(BinaryOperator::NotEqual),
            TokenKind::Less => Some(BinaryOperator::Less),
            TokenKind::Greater => Some(BinaryOperator::Greater),
            TokenKind::LessEquals => Some(BinaryOperator::LessEqual),
            TokenKind::GreaterEquals => Some(BinaryOperator::GreaterEqual),
            TokenKind::And => Some(BinaryOperator::And),
            TokenKind::Or => Some(BinaryOperator::Or),
            _ => None,
        }
    }

    /// The operator as written in TAC.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }

    pub fn class(&self) -> OperatorClass {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Modulo => OperatorClass::Arithmetic,
            BinaryOperator::Less
            | BinaryOperator::Greater
            | BinaryOperator::LessEqual
            | BinaryOperator::GreaterEqual => OperatorClass::Relational,
            BinaryOperator::Equal | BinaryOperator::NotEqual => OperatorClass::Equality,
            BinaryOperator::And | BinaryOperator::Or => OperatorClass::Logical,
        }
    }

    /// The type the parser annotates eagerly, before any checking.
    pub fn inferred_type(&self, left: Option<TypeTag>, right: Option<TypeTag>) -> TypeTag {
        match self.class() {
            OperatorClass::Arithmetic => {
                if left == Some(TypeTag::Float) || right == Some(TypeTag::Float) {
                    TypeTag::Float
                } else {
                    TypeTag::Int
                }
            }
            _ => TypeTag::Bool,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
