use crate::{ast::ast::Node, lexer::tokens::Token, scope::scope::ScopeTable};

use super::{
    diagnostics::{Diagnostic, DiagnosticKind},
    division::check_division_by_zero,
    type_check::TypePass,
    usage::UsagePass,
    walker::{collect_functions, walk, ScopeStack},
};

/// Runs every semantic pass over `program` and returns all findings.
///
/// Passes run in a fixed order and each one covers the whole tree:
///
/// 1. declaration and usage
/// 2. types and return completeness
/// 3. division by a literal zero
/// 4. unused and uninitialized variables of the parser's global scope,
///    when `symbols` is given
///
/// `tokens` is only used to attach source lines to located diagnostics.
/// The scope table is handed back unchanged for reporting.
pub fn analyze<'a>(
    program: &Node,
    tokens: &[Token],
    symbols: Option<&'a ScopeTable>,
) -> (Option<&'a ScopeTable>, Vec<Diagnostic>) {
    let functions = collect_functions(program);
    let mut diagnostics = vec![];

    let mut usage = UsagePass::new(&functions, tokens);
    walk(program, &mut usage, &mut ScopeStack::new());
    diagnostics.append(&mut usage.diagnostics);

    let mut types = TypePass::new(&functions, tokens);
    walk(program, &mut types, &mut ScopeStack::new());
    diagnostics.append(&mut types.diagnostics);

    diagnostics.extend(check_division_by_zero(program, tokens));

    if let Some(symbols) = symbols {
        diagnostics.extend(audit_symbols(symbols));
    }

    (symbols, diagnostics)
}

/// Advisories for the global scope of the parser's table.
pub fn audit_symbols(symbols: &ScopeTable) -> Vec<Diagnostic> {
    let global = symbols.global();

    let unused = global
        .unused_variables()
        .into_iter()
        .map(|variable| DiagnosticKind::UnusedVariable { variable });
    let uninitialized = global
        .uninitialized_variables()
        .into_iter()
        .map(|variable| DiagnosticKind::UninitializedVariable { variable });

    unused
        .chain(uninitialized)
        .map(|kind| Diagnostic::new(kind, None, &[]))
        .collect()
}
