//! Link pass: wire file scopes together through their imports.
//!
//! Phases run in order and each one only accumulates diagnostics, so a
//! single run reports every namespace problem it can find:
//! 1. BuildScopes (see [`ScopeTree::build`])
//! 2. ResolveImports
//! 3. VerifyCircularDependencies
//! 4. VerifyObjects

mod cycles;
mod imports;
mod objects;

#[cfg(test)]
mod link_tests;

use nexema_core::Ast;
use tracing::debug_span;

use crate::PassResult;
use crate::diagnostics::Diagnostics;
use crate::scope::ScopeTree;

/// Build scopes from `asts` and link them.
///
/// Hard errors (no input, a file supplied twice) abort; everything else is
/// returned as diagnostics next to the linked tree.
pub fn link(asts: Vec<Ast>) -> PassResult<ScopeTree> {
    let mut diagnostics = Diagnostics::new();
    let mut tree = {
        let _span = debug_span!("build_scopes").entered();
        ScopeTree::build(asts, &mut diagnostics)?
    };

    let mut linker = Linker {
        tree: &mut tree,
        diagnostics: &mut diagnostics,
    };
    {
        let _span = debug_span!("resolve_imports").entered();
        linker.resolve_imports();
    }
    {
        let _span = debug_span!("verify_circular_dependencies").entered();
        linker.verify_circular_dependencies();
    }
    {
        let _span = debug_span!("verify_objects").entered();
        linker.verify_objects();
    }

    tracing::debug!(diagnostics = diagnostics.len(), "link finished");
    Ok((tree, diagnostics))
}

struct Linker<'a> {
    tree: &'a mut ScopeTree,
    diagnostics: &'a mut Diagnostics,
}
