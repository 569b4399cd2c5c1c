//! BuildScopes: turn a forest of Asts into a [`ScopeTree`].

use indexmap::IndexMap;
use nexema_core::utils::{normalize_package_path, parent_package_path};
use nexema_core::{Ast, FileRef};

use super::{LocalId, LocalScope, Object, ObjectId, PackageId, PackageScope, ScopeTree};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::{Error, hash};

impl ScopeTree {
    /// Build the package/file scope tree and evaluate every type declaration.
    ///
    /// Files are ordered by normalized path so the tree does not depend on
    /// discovery order. A type name declared twice in one package is
    /// reported as `AlreadyDefined` and only the first declaration is kept.
    pub fn build(asts: Vec<Ast>, diagnostics: &mut Diagnostics) -> Result<ScopeTree, Error> {
        if asts.is_empty() {
            return Err(Error::NoSources);
        }

        let mut asts: Vec<Ast> = asts
            .into_iter()
            .map(|mut ast| {
                ast.file.path = normalize_package_path(&ast.file.path);
                ast
            })
            .collect();
        asts.sort_by(|a, b| a.file.cmp(&b.file));
        if let Some(pair) = asts.windows(2).find(|w| w[0].file == w[1].file) {
            return Err(Error::DuplicateFile(pair[0].file.full_path()));
        }

        let mut tree = ScopeTree {
            packages: Vec::new(),
            locals: Vec::new(),
            objects: Vec::new(),
            by_path: IndexMap::new(),
        };
        tree.ensure_package("");

        for ast in asts {
            tree.add_file(ast, diagnostics);
        }

        tracing::debug!(
            packages = tree.packages.len(),
            files = tree.locals.len(),
            objects = tree.objects.len(),
            "scopes built"
        );
        Ok(tree)
    }

    fn ensure_package(&mut self, path: &str) -> PackageId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }
        let parent = parent_package_path(path).map(|parent| self.ensure_package(parent));
        let id = PackageId(self.packages.len() as u32);
        self.packages.push(PackageScope {
            id,
            path: path.to_string(),
            parent,
            children: Vec::new(),
            locals: Vec::new(),
        });
        if let Some(parent) = parent {
            self.packages[parent.index()].children.push(id);
        }
        self.by_path.insert(path.to_string(), id);
        id
    }

    fn add_file(&mut self, ast: Ast, diagnostics: &mut Diagnostics) {
        let Ast { file, uses, types } = ast;
        let package = self.ensure_package(&file.path);
        let local = LocalId(self.locals.len() as u32);
        self.locals
            .push(LocalScope::new(local, file.clone(), package, uses));
        self.packages[package.index()].locals.push(local);

        for decl in types {
            let name = decl.name.name.clone();
            if let Some(existing) = self.package_object(package, &name) {
                let existing = self.object(existing);
                let existing_file = self.local(existing.local).file.clone();
                let message = if existing_file == file {
                    "first declared here"
                } else {
                    "also declared in this package"
                };
                diagnostics
                    .report(&file, DiagnosticKind::AlreadyDefined, decl.name.span)
                    .message(&name)
                    .related_to(&existing_file, existing.decl.name.span, message)
                    .emit();
                continue;
            }

            let id = ObjectId(self.objects.len() as u32);
            let canonical_id = hash::type_id(&file.path, &decl);
            tracing::trace!(file = %file, object = %name, id = %canonical_id, "object evaluated");
            self.objects.push(Object {
                id,
                name: name.clone(),
                canonical_id,
                decl,
                local,
            });
            self.locals[local.index()].insert_object(name, id);
        }
    }

    /// File of the given local scope.
    pub fn file(&self, local: LocalId) -> &FileRef {
        &self.local(local).file
    }
}
