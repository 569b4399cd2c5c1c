//! VerifyObjects: names reachable without an alias must be unambiguous.

use std::collections::HashSet;

use indexmap::IndexMap;
use nexema_core::ast::DEFAULT_ALIAS;

use super::Linker;
use crate::diagnostics::DiagnosticKind;
use crate::scope::{Import, LocalId};

impl Linker<'_> {
    pub(super) fn verify_objects(&mut self) {
        for index in 0..self.tree.locals().len() {
            self.verify_local_objects(self.tree.locals()[index].id);
        }
    }

    fn verify_local_objects(&mut self, local: LocalId) {
        let tree = &*self.tree;
        let scope = tree.local(local);
        let file = &scope.file;

        // name -> first unaliased import that brings it in
        let mut merged: IndexMap<&str, &Import> = IndexMap::new();
        let mut reported: HashSet<&str> = HashSet::new();

        for import in scope.imports_with_alias(DEFAULT_ALIAS) {
            for object in tree.package_objects(import.target) {
                let name = object.name.as_str();
                if reported.contains(name) {
                    continue;
                }

                if let Some(own) = scope.object(name) {
                    let own = tree.object(own);
                    self.diagnostics
                        .report(file, DiagnosticKind::AlreadyDefined, own.decl.name.span)
                        .message(name)
                        .related_to(
                            file,
                            import.span,
                            format!("also imported from `{}`", import.path),
                        )
                        .emit();
                    reported.insert(name);
                    continue;
                }

                match merged.get(name) {
                    Some(first) if first.target != import.target => {
                        self.diagnostics
                            .report(file, DiagnosticKind::AlreadyDefined, import.span)
                            .message(name)
                            .related_to(
                                file,
                                first.span,
                                format!("already imported from `{}`", first.path),
                            )
                            .emit();
                        reported.insert(name);
                    }
                    Some(_) => {}
                    None => {
                        merged.insert(name, import);
                    }
                }
            }
        }
    }
}
