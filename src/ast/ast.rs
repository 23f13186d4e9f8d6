use std::fmt::Display;

use crate::Position;

use super::types::{BinaryOperator, TypeTag};

/// Node kinds
///
/// The closed set of constructs the parser can produce. Every stage matches
/// on this exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program(Vec<Node>),
    Block(Vec<Node>),
    /// Children are always, in order, a `ReturnTypeMarker`, a `Parameters`
    /// node and a `Block`.
    Function {
        name: String,
        return_type: Box<Node>,
        parameters: Box<Node>,
        body: Box<Node>,
    },
    Parameters(Vec<Node>),
    Parameter(String),
    ReturnTypeMarker(TypeTag),
    /// `declared_type` is present for `type x = expr;` and absent for a
    /// plain `x = expr;`. The target is always a `Variable`.
    Assignment {
        declared_type: Option<TypeTag>,
        target: Box<Node>,
        value: Box<Node>,
    },
    /// `type x;` without an initializer.
    Declaration {
        name: String,
        declared_type: TypeTag,
    },
    Variable(String),
    Number(String),
    Boolean(bool),
    StringLiteral(String),
    CharLiteral(String),
    BinaryOp {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    FunctionCall {
        name: String,
        arguments: Box<Node>,
    },
    Arguments(Vec<Node>),
    If {
        condition: Box<Node>,
        then_block: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        condition: Box<Node>,
        body: Box<Node>,
    },
    For {
        init: Option<Box<Node>>,
        condition: Option<Box<Node>>,
        increment: Option<Box<Node>>,
        body: Box<Node>,
    },
    Break,
    Continue,
    Return(Option<Box<Node>>),
}

/// AST node
///
/// `ty` is filled in by the parser where it can infer it; the semantic
/// analyzer re-derives types on its own. `position` points at the token the
/// node was built from, when there is one.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub ty: Option<TypeTag>,
    pub position: Option<Position>,
}

impl Node {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Node {
            kind,
            ty: None,
            position: Some(position),
        }
    }

    pub fn typed(kind: NodeKind, ty: TypeTag, position: Position) -> Self {
        Node {
            kind,
            ty: Some(ty),
            position: Some(position),
        }
    }

    /// A node that does not correspond to a single token, e.g. `Program`.
    pub fn synthetic(kind: NodeKind) -> Self {
        Node {
            kind,
            ty: None,
            position: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Program(_) => "Program",
            NodeKind::Block(_) => "Block",
            NodeKind::Function { .. } => "Function",
            NodeKind::Parameters(_) => "Parameters",
            NodeKind::Parameter(_) => "Parameter",
            NodeKind::ReturnTypeMarker(_) => "ReturnType",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::Declaration { .. } => "Declaration",
            NodeKind::Variable(_) => "Variable",
            NodeKind::Number(_) => "Number",
            NodeKind::Boolean(_) => "Boolean",
            NodeKind::StringLiteral(_) => "String",
            NodeKind::CharLiteral(_) => "Char",
            NodeKind::BinaryOp { .. } => "BinaryOp",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::Arguments(_) => "Arguments",
            NodeKind::If { .. } => "If",
            NodeKind::While { .. } => "While",
            NodeKind::For { .. } => "For",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
            NodeKind::Return(_) => "Return",
        }
    }

    /// The literal or name carried by the node, if any.
    pub fn value(&self) -> Option<String> {
        match &self.kind {
            NodeKind::Function { name, .. }
            | NodeKind::Parameter(name)
            | NodeKind::Declaration { name, .. }
            | NodeKind::Variable(name)
            | NodeKind::FunctionCall { name, .. } => Some(name.clone()),
            NodeKind::Number(text) | NodeKind::StringLiteral(text) | NodeKind::CharLiteral(text) => {
                Some(text.clone())
            }
            NodeKind::Boolean(value) => Some(value.to_string()),
            NodeKind::BinaryOp { operator, .. } => Some(operator.symbol().to_string()),
            NodeKind::ReturnTypeMarker(ty) => Some(ty.to_string()),
            NodeKind::Assignment {
                declared_type: Some(ty),
                ..
            } => Some(ty.to_string()),
            _ => None,
        }
    }

    /// Ordered children, for generic traversal and printing.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Program(nodes)
            | NodeKind::Block(nodes)
            | NodeKind::Parameters(nodes)
            | NodeKind::Arguments(nodes) => nodes.iter().collect(),
            NodeKind::Function {
                return_type,
                parameters,
                body,
                ..
            } => vec![return_type.as_ref(), parameters.as_ref(), body.as_ref()],
            NodeKind::Assignment { target, value, .. } => vec![target.as_ref(), value.as_ref()],
            NodeKind::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            NodeKind::FunctionCall { arguments, .. } => vec![arguments.as_ref()],
            NodeKind::If {
                condition,
                then_block,
                else_branch,
            } => {
                let mut children = vec![condition.as_ref(), then_block.as_ref()];
                if let Some(else_branch) = else_branch {
                    children.push(else_branch.as_ref());
                }
                children
            }
            NodeKind::While { condition, body } => vec![condition.as_ref(), body.as_ref()],
            NodeKind::For {
                init,
                condition,
                increment,
                body,
            } => init
                .iter()
                .chain(condition.iter())
                .chain(increment.iter())
                .map(|node| node.as_ref())
                .chain(std::iter::once(body.as_ref()))
                .collect(),
            NodeKind::Return(value) => value.iter().map(|node| node.as_ref()).collect(),
            NodeKind::Parameter(_)
            | NodeKind::ReturnTypeMarker(_)
            | NodeKind::Declaration { .. }
            | NodeKind::Variable(_)
            | NodeKind::Number(_)
            | NodeKind::Boolean(_)
            | NodeKind::StringLiteral(_)
            | NodeKind::CharLiteral(_)
            | NodeKind::Break
            | NodeKind::Continue => vec![],
        }
    }

    /// Pre-order search used by tests and the driver.
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&Node) -> bool, found: &mut Vec<&'a Node>) {
        if predicate(self) {
            found.push(self);
        }
        for child in self.children() {
            child.find_all(predicate, found);
        }
    }

    fn write_tree(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        write!(f, "{}{}", "  ".repeat(depth), self.name())?;
        if let Some(value) = self.value() {
            write!(f, " [value: {}]", value)?;
        }
        if let Some(ty) = self.ty {
            write!(f, " [type: {}]", ty)?;
        }
        writeln!(f)?;

        for child in self.children() {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_tree(f, 0)
    }
}
