use crate::{
    ast::ast::{Node, NodeKind},
    lexer::tokens::Token,
};

use super::{
    diagnostics::{Diagnostic, DiagnosticKind},
    walker::{FunctionTable, ScopeStack, ScopedVisitor},
};

/// Declaration and usage checks: every name read or assigned must be
/// visible, every call must target a declared function with the right
/// number of arguments, and `break`/`continue` must sit inside a loop.
pub struct UsagePass<'a> {
    functions: &'a FunctionTable,
    tokens: &'a [Token],
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> UsagePass<'a> {
    pub fn new(functions: &'a FunctionTable, tokens: &'a [Token]) -> Self {
        UsagePass {
            functions,
            tokens,
            diagnostics: vec![],
        }
    }

    fn report(&mut self, kind: DiagnosticKind, node: &Node) {
        self.diagnostics
            .push(Diagnostic::new(kind, node.position, self.tokens));
    }

    fn check_visible(&mut self, name: &str, node: &Node, scopes: &ScopeStack) {
        if scopes.lookup(name).is_none() {
            self.report(
                DiagnosticKind::VariableNotDeclared {
                    variable: name.to_string(),
                },
                node,
            );
        }
    }
}

impl ScopedVisitor for UsagePass<'_> {
    fn expression(&mut self, node: &Node, scopes: &ScopeStack) {
        match &node.kind {
            NodeKind::Variable(name) => self.check_visible(name, node, scopes),
            NodeKind::BinaryOp { left, right, .. } => {
                self.expression(left, scopes);
                self.expression(right, scopes);
            }
            NodeKind::FunctionCall { name, arguments } => {
                let functions = self.functions;
                let arguments = arguments.children();

                match functions.get(name) {
                    None => self.report(
                        DiagnosticKind::FunctionNotDeclared {
                            function: name.clone(),
                        },
                        node,
                    ),
                    Some(signature) if signature.parameters.len() != arguments.len() => {
                        let expected = signature.parameters.len();
                        self.report(
                            DiagnosticKind::ArgumentCount {
                                function: name.clone(),
                                expected,
                                received: arguments.len(),
                            },
                            node,
                        )
                    }
                    Some(_) => {}
                }

                for argument in arguments {
                    self.expression(argument, scopes);
                }
            }
            _ => {}
        }
    }

    fn assignment(&mut self, node: &Node, scopes: &ScopeStack) {
        if let NodeKind::Assignment {
            declared_type,
            target,
            value,
        } = &node.kind
        {
            self.expression(value, scopes);

            if let (None, NodeKind::Variable(name)) = (declared_type, &target.kind) {
                self.check_visible(name, target, scopes);
            }
        }
    }

    fn jump(&mut self, node: &Node, scopes: &ScopeStack) {
        if scopes.in_loop() {
            return;
        }

        let statement = match node.kind {
            NodeKind::Continue => "continue",
            _ => "break",
        };
        self.report(
            DiagnosticKind::JumpOutsideLoop {
                statement: statement.to_string(),
            },
            node,
        );
    }
}
