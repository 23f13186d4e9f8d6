//! Scope-aware traversal shared by the semantic passes.
//!
//! Each pass rebuilds scoping from the tree itself instead of trusting the
//! parser's table. The traversal below owns the scoping rules once; passes
//! only implement the [`ScopedVisitor`] hooks they care about.

use std::collections::HashMap;

use crate::ast::{
    ast::{Node, NodeKind},
    types::TypeTag,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub return_type: TypeTag,
    pub parameters: Vec<TypeTag>,
}

pub type FunctionTable = HashMap<String, FunctionSignature>;

/// Signatures of every `Function` node in the tree. A later duplicate
/// cannot occur because the parser rejects it.
pub fn collect_functions(program: &Node) -> FunctionTable {
    let mut functions = vec![];
    program.find_all(&|node| matches!(node.kind, NodeKind::Function { .. }), &mut functions);

    functions
        .into_iter()
        .filter_map(|node| match &node.kind {
            NodeKind::Function {
                name,
                return_type,
                parameters,
                ..
            } => Some((
                name.clone(),
                FunctionSignature {
                    return_type: return_type.ty.unwrap_or(TypeTag::Void),
                    parameters: parameters.children().iter().filter_map(|param| param.ty).collect(),
                },
            )),
            _ => None,
        })
        .collect()
}

/// A stack of name-to-type frames, innermost last, plus the number of
/// loops enclosing the current point.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<HashMap<String, TypeTag>>,
    loop_depth: usize,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![HashMap::new()],
            loop_depth: 0,
        }
    }

    pub fn declare(&mut self, name: &str, ty: TypeTag) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), ty);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<TypeTag> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }

    /// Runs `f` with one extra frame that is dropped afterwards.
    pub fn scoped<T>(&mut self, f: impl FnOnce(&mut ScopeStack) -> T) -> T {
        self.frames.push(HashMap::new());
        let result = f(self);
        self.frames.pop();
        result
    }

    fn looped<T>(&mut self, f: impl FnOnce(&mut ScopeStack) -> T) -> T {
        self.loop_depth += 1;
        let result = f(self);
        self.loop_depth -= 1;
        result
    }

    /// Function bodies never see the loops around the declaration.
    fn outside_loops<T>(&mut self, f: impl FnOnce(&mut ScopeStack) -> T) -> T {
        let saved = std::mem::replace(&mut self.loop_depth, 0);
        let result = f(self);
        self.loop_depth = saved;
        result
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        ScopeStack::new()
    }
}

/// Per-node hooks called by [`walk`]. Every hook sees the scopes as they
/// are at that point of the program.
pub trait ScopedVisitor {
    /// An expression in statement position or inside another construct.
    fn expression(&mut self, _node: &Node, _scopes: &ScopeStack) {}

    /// The condition of an `if`, `while` or `for`.
    fn condition(&mut self, _construct: &str, node: &Node, scopes: &ScopeStack) {
        self.expression(node, scopes);
    }

    /// An `Assignment` node, before its target is declared.
    fn assignment(&mut self, node: &Node, scopes: &ScopeStack) {
        if let NodeKind::Assignment { value, .. } = &node.kind {
            self.expression(value, scopes);
        }
    }

    /// Parameters are already declared when this runs.
    fn enter_function(&mut self, _function: &Node, _scopes: &ScopeStack) {}

    fn exit_function(&mut self, _function: &Node, _scopes: &ScopeStack) {}

    fn return_stmt(&mut self, _node: &Node, value: Option<&Node>, scopes: &ScopeStack) {
        if let Some(value) = value {
            self.expression(value, scopes);
        }
    }

    /// A `break` or `continue`.
    fn jump(&mut self, _node: &Node, _scopes: &ScopeStack) {}
}

/// Walks `node` with the scoping rules of the language:
///
/// - `Block`, and the branches of `If` and the body of `While`, get fresh
///   frames; conditions are checked in the enclosing frame
/// - a `Function` gets one frame with its parameters, shared with its body
/// - a `For` gets one frame shared by its header and its body
pub fn walk<V: ScopedVisitor>(node: &Node, visitor: &mut V, scopes: &mut ScopeStack) {
    match &node.kind {
        NodeKind::Program(statements) => walk_statements(statements, visitor, scopes),
        NodeKind::Block(statements) => {
            scopes.scoped(|scopes| walk_statements(statements, visitor, scopes))
        }
        NodeKind::Function { parameters, body, .. } => scopes.scoped(|scopes| {
            for parameter in parameters.children() {
                if let (NodeKind::Parameter(name), Some(ty)) = (&parameter.kind, parameter.ty) {
                    scopes.declare(name, ty);
                }
            }

            visitor.enter_function(node, scopes);
            scopes.outside_loops(|scopes| walk_body(body, visitor, scopes));
            visitor.exit_function(node, scopes);
        }),
        NodeKind::Assignment {
            declared_type,
            target,
            ..
        } => {
            visitor.assignment(node, scopes);
            if let (Some(ty), NodeKind::Variable(name)) = (declared_type, &target.kind) {
                scopes.declare(name, *ty);
            }
        }
        NodeKind::Declaration {
            name,
            declared_type,
        } => scopes.declare(name, *declared_type),
        NodeKind::If {
            condition,
            then_block,
            else_branch,
        } => {
            visitor.condition("if", condition, scopes);
            scopes.scoped(|scopes| walk(then_block, visitor, scopes));
            if let Some(else_branch) = else_branch {
                scopes.scoped(|scopes| walk(else_branch, visitor, scopes));
            }
        }
        NodeKind::While { condition, body } => {
            visitor.condition("while", condition, scopes);
            scopes.looped(|scopes| scopes.scoped(|scopes| walk(body, visitor, scopes)));
        }
        NodeKind::For {
            init,
            condition,
            increment,
            body,
        } => scopes.scoped(|scopes| {
            if let Some(init) = init {
                walk(init, visitor, scopes);
            }
            if let Some(condition) = condition {
                visitor.condition("for", condition, scopes);
            }
            if let Some(increment) = increment {
                walk(increment, visitor, scopes);
            }
            scopes.looped(|scopes| walk_body(body, visitor, scopes));
        }),
        NodeKind::Break | NodeKind::Continue => visitor.jump(node, scopes),
        NodeKind::Return(value) => visitor.return_stmt(node, value.as_deref(), scopes),
        NodeKind::Variable(_)
        | NodeKind::Number(_)
        | NodeKind::Boolean(_)
        | NodeKind::StringLiteral(_)
        | NodeKind::CharLiteral(_)
        | NodeKind::BinaryOp { .. }
        | NodeKind::FunctionCall { .. } => visitor.expression(node, scopes),
        // Only reachable through their owning Function or FunctionCall
        NodeKind::Parameters(_)
        | NodeKind::Parameter(_)
        | NodeKind::ReturnTypeMarker(_)
        | NodeKind::Arguments(_) => {}
    }
}

fn walk_statements<V: ScopedVisitor>(statements: &[Node], visitor: &mut V, scopes: &mut ScopeStack) {
    for statement in statements {
        walk(statement, visitor, scopes);
    }
}

/// Walks the statements of a body block in the current frame.
fn walk_body<V: ScopedVisitor>(body: &Node, visitor: &mut V, scopes: &mut ScopeStack) {
    match &body.kind {
        NodeKind::Block(statements) => walk_statements(statements, visitor, scopes),
        _ => walk(body, visitor, scopes),
    }
}
