use std::collections::HashMap;

use crate::ast::types::TypeTag;

/// Index of a scope inside its `ScopeTable`.
pub type ScopeId = usize;

pub const GLOBAL_SCOPE: ScopeId = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct VariableEntry {
    pub ty: TypeTag,
    pub scope_label: String,
    pub initialized: bool,
    pub used: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntry {
    pub return_type: TypeTag,
    pub parameters: Vec<(TypeTag, String)>,
}

/// One lexical scope. Entries keep their declaration order for reporting.
#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub label: String,
    variables: HashMap<String, VariableEntry>,
    variable_order: Vec<String>,
    functions: HashMap<String, FunctionEntry>,
    function_order: Vec<String>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, label: &str) -> Self {
        Scope {
            parent,
            label: label.to_string(),
            variables: HashMap::new(),
            variable_order: vec![],
            functions: HashMap::new(),
            function_order: vec![],
        }
    }

    pub fn get_variable(&self, name: &str) -> Option<&VariableEntry> {
        self.variables.get(name)
    }

    pub fn get_function(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &VariableEntry)> + '_ {
        self.variable_order
            .iter()
            .map(move |name| (name.as_str(), &self.variables[name]))
    }

    pub fn functions(&self) -> impl Iterator<Item = (&str, &FunctionEntry)> + '_ {
        self.function_order
            .iter()
            .map(move |name| (name.as_str(), &self.functions[name]))
    }

    /// Names declared in this scope itself that were never read or written.
    pub fn unused_variables(&self) -> Vec<String> {
        self.variables()
            .filter(|(_, entry)| !entry.used)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Names declared in this scope itself that never received a value.
    pub fn uninitialized_variables(&self) -> Vec<String> {
        self.variables()
            .filter(|(_, entry)| !entry.initialized)
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// A tree of scopes stored as an arena.
///
/// Entering a scope creates a child of the current one and makes it current;
/// leaving moves back to the parent. Left scopes stay in the arena, so
/// entries that were mutated through the parent chain remain inspectable.
#[derive(Debug, Clone)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl ScopeTable {
    pub fn new() -> Self {
        ScopeTable {
            scopes: vec![Scope::new(None, "global")],
            current: GLOBAL_SCOPE,
        }
    }

    pub fn global(&self) -> &Scope {
        &self.scopes[GLOBAL_SCOPE]
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.current]
    }

    pub fn current_id(&self) -> ScopeId {
        self.current
    }

    pub fn current_label(&self) -> &str {
        &self.scopes[self.current].label
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.scopes[self.current].parent;
        while let Some(id) = cursor {
            depth += 1;
            cursor = self.scopes[id].parent;
        }
        depth
    }

    pub fn enter_scope(&mut self, label: &str) -> ScopeId {
        self.scopes.push(Scope::new(Some(self.current), label));
        self.current = self.scopes.len() - 1;
        self.current
    }

    /// Returns to the parent scope. Leaving the global scope is a no-op.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    /// Declares `name` in the current scope. Fails only when the current
    /// scope already holds that name; shadowing an outer one is fine.
    pub fn insert_variable(&mut self, name: &str, ty: TypeTag, scope_label: &str, initialized: bool) -> bool {
        let scope = &mut self.scopes[self.current];
        if scope.variables.contains_key(name) {
            return false;
        }

        scope.variables.insert(
            name.to_string(),
            VariableEntry {
                ty,
                scope_label: scope_label.to_string(),
                initialized,
                used: false,
            },
        );
        scope.variable_order.push(name.to_string());
        true
    }

    /// Registers a function in the global scope.
    pub fn insert_function(&mut self, name: &str, return_type: TypeTag, parameters: Vec<(TypeTag, String)>) -> bool {
        let global = &mut self.scopes[GLOBAL_SCOPE];
        if global.functions.contains_key(name) {
            return false;
        }

        global.functions.insert(
            name.to_string(),
            FunctionEntry {
                return_type,
                parameters,
            },
        );
        global.function_order.push(name.to_string());
        true
    }

    fn resolve_variable(&self, name: &str) -> Option<ScopeId> {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            if self.scopes[id].variables.contains_key(name) {
                return Some(id);
            }
            cursor = self.scopes[id].parent;
        }
        None
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&VariableEntry> {
        self.resolve_variable(name)
            .and_then(|id| self.scopes[id].variables.get(name))
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionEntry> {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            if let Some(function) = self.scopes[id].functions.get(name) {
                return Some(function);
            }
            cursor = self.scopes[id].parent;
        }
        None
    }

    fn lookup_variable_mut(&mut self, name: &str) -> Option<&mut VariableEntry> {
        let id = self.resolve_variable(name)?;
        self.scopes[id].variables.get_mut(name)
    }

    /// Marks the innermost visible `name` as used. Returns false when
    /// nothing by that name is visible.
    pub fn mark_used(&mut self, name: &str) -> bool {
        match self.lookup_variable_mut(name) {
            Some(entry) => {
                entry.used = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_initialized(&mut self, name: &str) -> bool {
        match self.lookup_variable_mut(name) {
            Some(entry) => {
                entry.initialized = true;
                true
            }
            None => false,
        }
    }

    /// Every variable of every scope, in scope creation then declaration order.
    pub fn variables(&self) -> Vec<(&str, &str, &VariableEntry)> {
        self.scopes
            .iter()
            .flat_map(|scope| {
                scope
                    .variables()
                    .map(move |(name, entry)| (scope.label.as_str(), name, entry))
            })
            .collect()
    }

    pub fn functions(&self) -> Vec<(&str, &FunctionEntry)> {
        self.global().functions().collect()
    }
}

impl Default for ScopeTable {
    fn default() -> Self {
        ScopeTable::new()
    }
}
