use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::{OperatorClass, TypeTag},
    },
    lexer::tokens::Token,
};

use super::{
    diagnostics::{Diagnostic, DiagnosticKind},
    walker::{FunctionTable, ScopeStack, ScopedVisitor},
};

/// Type checking and return completeness.
///
/// Expression types are recomputed bottom-up; a sub-expression whose type
/// cannot be determined (undeclared name, earlier error) silences checks
/// that depend on it, so one mistake is reported once.
pub struct TypePass<'a> {
    functions: &'a FunctionTable,
    tokens: &'a [Token],
    /// Name and return type of each function being walked, innermost last
    functions_entered: Vec<(String, TypeTag)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> TypePass<'a> {
    pub fn new(functions: &'a FunctionTable, tokens: &'a [Token]) -> Self {
        TypePass {
            functions,
            tokens,
            functions_entered: vec![],
            diagnostics: vec![],
        }
    }

    fn report(&mut self, kind: DiagnosticKind, node: &Node) {
        self.diagnostics
            .push(Diagnostic::new(kind, node.position, self.tokens));
    }

    pub fn type_of(&mut self, node: &Node, scopes: &ScopeStack) -> Option<TypeTag> {
        match &node.kind {
            NodeKind::Number(text) => Some(if text.contains('.') {
                TypeTag::Float
            } else {
                TypeTag::Int
            }),
            NodeKind::Boolean(_) => Some(TypeTag::Bool),
            NodeKind::StringLiteral(_) => Some(TypeTag::String),
            NodeKind::CharLiteral(_) => Some(TypeTag::Char),
            NodeKind::Variable(name) => scopes.lookup(name),
            NodeKind::BinaryOp {
                operator,
                left,
                right,
            } => {
                let left = self.type_of(left, scopes);
                let right = self.type_of(right, scopes);
                let (left, right) = (left?, right?);

                let result = match operator.class() {
                    OperatorClass::Arithmetic if left.is_numeric() && right.is_numeric() => {
                        Some(TypeTag::widen(left, right))
                    }
                    OperatorClass::Relational if left.is_numeric() && right.is_numeric() => {
                        Some(TypeTag::Bool)
                    }
                    OperatorClass::Equality
                        if left == right || (left.is_numeric() && right.is_numeric()) =>
                    {
                        Some(TypeTag::Bool)
                    }
                    OperatorClass::Logical if left == TypeTag::Bool && right == TypeTag::Bool => {
                        Some(TypeTag::Bool)
                    }
                    _ => None,
                };

                if result.is_none() {
                    self.report(DiagnosticKind::InvalidOperation { left, right }, node);
                }
                result
            }
            NodeKind::FunctionCall { name, arguments } => {
                let functions = self.functions;
                let signature = functions.get(name);

                for (index, argument) in arguments.children().into_iter().enumerate() {
                    let received = self.type_of(argument, scopes);
                    let expected = signature.and_then(|signature| signature.parameters.get(index));

                    if let (Some(received), Some(expected)) = (received, expected) {
                        if !expected.accepts(received) {
                            self.report(
                                DiagnosticKind::ArgumentType {
                                    function: name.clone(),
                                    index: index + 1,
                                    expected: *expected,
                                    received,
                                },
                                argument,
                            );
                        }
                    }
                }

                signature.map(|signature| signature.return_type)
            }
            _ => None,
        }
    }
}

/// Whether every path through `node` reaches a `return`.
///
/// A block counts as returning when any of its direct statements does, even
/// if more statements follow it.
pub fn guarantees_return(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Return(_) => true,
        NodeKind::If {
            then_block,
            else_branch: Some(else_branch),
            ..
        } => guarantees_return(then_block) && guarantees_return(else_branch),
        NodeKind::Block(statements) => statements.iter().any(guarantees_return),
        _ => false,
    }
}

impl ScopedVisitor for TypePass<'_> {
    fn expression(&mut self, node: &Node, scopes: &ScopeStack) {
        self.type_of(node, scopes);
    }

    fn condition(&mut self, construct: &str, node: &Node, scopes: &ScopeStack) {
        if let Some(found) = self.type_of(node, scopes) {
            if found != TypeTag::Bool {
                self.report(
                    DiagnosticKind::NonBooleanCondition {
                        construct: construct.to_string(),
                        found,
                    },
                    node,
                );
            }
        }
    }

    fn assignment(&mut self, node: &Node, scopes: &ScopeStack) {
        if let NodeKind::Assignment {
            declared_type,
            target,
            value,
        } = &node.kind
        {
            let value_type = self.type_of(value, scopes);
            let name = match &target.kind {
                NodeKind::Variable(name) => name,
                _ => return,
            };
            let target_type = declared_type.or_else(|| scopes.lookup(name));

            if let (Some(target_type), Some(value_type)) = (target_type, value_type) {
                if !target_type.accepts(value_type) {
                    self.report(
                        DiagnosticKind::AssignmentMismatch {
                            variable: name.clone(),
                            target: target_type,
                            value: value_type,
                        },
                        node,
                    );
                }
            }
        }
    }

    fn enter_function(&mut self, function: &Node, _scopes: &ScopeStack) {
        if let NodeKind::Function {
            name, return_type, ..
        } = &function.kind
        {
            let return_type = return_type.ty.unwrap_or(TypeTag::Void);
            self.functions_entered.push((name.clone(), return_type));
        }
    }

    fn exit_function(&mut self, function: &Node, _scopes: &ScopeStack) {
        let (name, return_type) = match self.functions_entered.pop() {
            Some(entered) => entered,
            None => return,
        };

        if let NodeKind::Function { body, .. } = &function.kind {
            if return_type != TypeTag::Void && !guarantees_return(body) {
                self.report(DiagnosticKind::MissingReturn { function: name }, function);
            }
        }
    }

    fn return_stmt(&mut self, node: &Node, value: Option<&Node>, scopes: &ScopeStack) {
        let expected = match self.functions_entered.last() {
            Some((_, expected)) => *expected,
            None => {
                if let Some(value) = value {
                    self.type_of(value, scopes);
                }
                return;
            }
        };

        match value {
            Some(value) if expected == TypeTag::Void => {
                self.type_of(value, scopes);
                self.report(DiagnosticKind::VoidReturnsValue, node)
            }
            None if expected != TypeTag::Void => {
                self.report(DiagnosticKind::MissingReturnValue { expected }, node)
            }
            Some(value) => {
                if let Some(found) = self.type_of(value, scopes) {
                    if !expected.accepts(found) {
                        self.report(DiagnosticKind::ReturnTypeMismatch { found, expected }, node);
                    }
                }
            }
            None => {}
        }
    }
}
