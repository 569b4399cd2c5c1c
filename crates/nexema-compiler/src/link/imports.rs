//! ResolveImports: attach each use declaration to its target package.

use nexema_core::utils::normalize_package_path;

use super::Linker;
use crate::diagnostics::DiagnosticKind;
use crate::scope::{Import, LocalId};
use crate::utils::did_you_mean;

impl Linker<'_> {
    pub(super) fn resolve_imports(&mut self) {
        for index in 0..self.tree.locals().len() {
            self.resolve_local_imports(self.tree.locals()[index].id);
        }
    }

    fn resolve_local_imports(&mut self, local: LocalId) {
        let scope = self.tree.local(local);
        let file = scope.file.clone();
        let uses = scope.uses.clone();
        let own_path = self.tree.package_of(local).path.clone();

        for stmt in uses {
            let path = normalize_package_path(&stmt.path);
            let scope = self.tree.local(local);

            if let Some(alias) = &stmt.alias
                && let Some(previous) = scope.imports_with_alias(alias.as_str()).next()
            {
                let previous_span = previous.alias.as_ref().map_or(previous.span, |a| a.span);
                self.diagnostics
                    .report(&file, DiagnosticKind::AliasAlreadyDefined, alias.span)
                    .message(alias.as_str())
                    .related_to(&file, previous_span, "first used here")
                    .emit();
                continue;
            }

            if path == own_path {
                self.diagnostics
                    .report(&file, DiagnosticKind::SelfImport, stmt.span)
                    .message(&path)
                    .emit();
                continue;
            }

            let Some(target) = self.tree.package_by_path(&path) else {
                let candidates: Vec<&str> = self
                    .tree
                    .package_paths()
                    .filter(|p| !p.is_empty() && *p != own_path)
                    .collect();
                let mut builder = self
                    .diagnostics
                    .report(&file, DiagnosticKind::PackageNotFound, stmt.span)
                    .message(&path);
                if let Some(hint) = did_you_mean(&path, &candidates) {
                    builder = builder.hint(hint);
                }
                builder.emit();
                continue;
            };

            if let Some(previous) = scope.import_of(target) {
                self.diagnostics
                    .report(&file, DiagnosticKind::DuplicateImport, stmt.span)
                    .message(&path)
                    .related_to(&file, previous.span, "first imported here")
                    .emit();
                continue;
            }

            tracing::trace!(
                file = %file,
                target = %path,
                alias = stmt.alias_key(),
                "import resolved"
            );
            self.tree.local_mut(local).register_import(Import {
                path,
                alias: stmt.alias.clone(),
                span: stmt.span,
                target,
            });
        }
    }
}
