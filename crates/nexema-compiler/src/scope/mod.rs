//! Scope model: packages, files and the objects they declare.
//!
//! Scopes live in arenas owned by [`ScopeTree`] and refer to each other by
//! id. A package scope holds one local scope per file directly inside it
//! plus its child packages. A local scope owns the objects its file declares
//! and, once linked, the imports that resolved to other packages.

mod build;

#[cfg(test)]
mod scope_tests;

use indexmap::IndexMap;
use nexema_core::ast::DEFAULT_ALIAS;
use nexema_core::{FileRef, Ident, Span, TypeRef, TypeStmt, UseStmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u32);

impl PackageId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl LocalId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The evaluated form of a type declaration.
#[derive(Debug, Clone)]
pub struct Object {
    pub id: ObjectId,
    pub name: String,
    /// Structural hash of the declaration and its package path.
    pub canonical_id: String,
    pub decl: TypeStmt,
    /// File that declares this object.
    pub local: LocalId,
}

/// A use declaration that resolved to a package scope.
#[derive(Debug, Clone)]
pub struct Import {
    /// Normalized target package path.
    pub path: String,
    pub alias: Option<Ident>,
    pub span: Span,
    pub target: PackageId,
}

impl Import {
    pub fn alias_key(&self) -> &str {
        self.alias
            .as_ref()
            .map(Ident::as_str)
            .unwrap_or(DEFAULT_ALIAS)
    }
}

/// Scope of a single source file.
#[derive(Debug, Clone)]
pub struct LocalScope {
    pub id: LocalId,
    pub file: FileRef,
    pub package: PackageId,
    /// Use declarations as written, resolved by the linker.
    pub uses: Vec<UseStmt>,
    objects: IndexMap<String, ObjectId>,
    imports: Vec<Import>,
    /// Alias key → indexes into `imports`. Unaliased imports live under `"."`.
    aliases: IndexMap<String, Vec<usize>>,
    /// Target package → index into `imports`.
    resolved: IndexMap<PackageId, usize>,
}

impl LocalScope {
    fn new(id: LocalId, file: FileRef, package: PackageId, uses: Vec<UseStmt>) -> Self {
        Self {
            id,
            file,
            package,
            uses,
            objects: IndexMap::new(),
            imports: Vec::new(),
            aliases: IndexMap::new(),
            resolved: IndexMap::new(),
        }
    }

    pub fn object(&self, name: &str) -> Option<ObjectId> {
        self.objects.get(name).copied()
    }

    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.values().copied()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Imports registered under `alias` (`"."` for unaliased ones).
    pub fn imports_with_alias<'s>(&'s self, alias: &str) -> impl Iterator<Item = &'s Import> + 's {
        self.aliases
            .get(alias)
            .into_iter()
            .flatten()
            .map(|&i| &self.imports[i])
    }

    /// The import that resolved to `package`, if any.
    pub fn import_of(&self, package: PackageId) -> Option<&Import> {
        self.resolved.get(&package).map(|&i| &self.imports[i])
    }

    pub fn resolved_packages(&self) -> impl Iterator<Item = PackageId> + '_ {
        self.resolved.keys().copied()
    }

    pub(crate) fn insert_object(&mut self, name: String, id: ObjectId) {
        self.objects.insert(name, id);
    }

    pub(crate) fn register_import(&mut self, import: Import) {
        let index = self.imports.len();
        self.aliases
            .entry(import.alias_key().to_string())
            .or_default()
            .push(index);
        self.resolved.insert(import.target, index);
        self.imports.push(import);
    }
}

/// Scope of a package directory.
#[derive(Debug, Clone)]
pub struct PackageScope {
    pub id: PackageId,
    /// Normalized package path, `""` for the root.
    pub path: String,
    pub parent: Option<PackageId>,
    pub children: Vec<PackageId>,
    pub locals: Vec<LocalId>,
}

impl PackageScope {
    /// Last path segment.
    pub fn name(&self) -> &str {
        nexema_core::utils::package_name(&self.path)
    }
}

/// Arena of every scope and object in a compile run.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    packages: Vec<PackageScope>,
    locals: Vec<LocalScope>,
    objects: Vec<Object>,
    by_path: IndexMap<String, PackageId>,
}

impl ScopeTree {
    pub fn root(&self) -> PackageId {
        PackageId(0)
    }

    pub fn package(&self, id: PackageId) -> &PackageScope {
        &self.packages[id.index()]
    }

    pub fn local(&self, id: LocalId) -> &LocalScope {
        &self.locals[id.index()]
    }

    pub(crate) fn local_mut(&mut self, id: LocalId) -> &mut LocalScope {
        &mut self.locals[id.index()]
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    pub fn packages(&self) -> &[PackageScope] {
        &self.packages
    }

    pub fn locals(&self) -> &[LocalScope] {
        &self.locals
    }

    pub fn all_objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn package_by_path(&self, path: &str) -> Option<PackageId> {
        self.by_path.get(path).copied()
    }

    pub fn package_paths(&self) -> impl Iterator<Item = &str> {
        self.by_path.keys().map(String::as_str)
    }

    /// Package that owns the file of `local`.
    pub fn package_of(&self, local: LocalId) -> &PackageScope {
        self.package(self.local(local).package)
    }

    /// Object named `name` declared by any file directly in `package`.
    pub fn package_object(&self, package: PackageId, name: &str) -> Option<ObjectId> {
        self.package(package)
            .locals
            .iter()
            .find_map(|&local| self.local(local).object(name))
    }

    /// Objects declared directly in `package`, in file order.
    pub fn package_objects(&self, package: PackageId) -> impl Iterator<Item = &Object> {
        self.package(package)
            .locals
            .iter()
            .flat_map(move |&local| self.local(local).objects())
            .map(move |id| self.object(id))
    }

    /// Objects at or below `package`.
    ///
    /// `depth` limits how many package levels below `package` are visited:
    /// `Some(0)` is the package itself, `None` is unbounded.
    pub fn objects(&self, package: PackageId, depth: Option<usize>) -> Vec<&Object> {
        let mut out = Vec::new();
        self.collect_objects(package, depth, &mut out);
        out
    }

    fn collect_objects<'t>(
        &'t self,
        package: PackageId,
        depth: Option<usize>,
        out: &mut Vec<&'t Object>,
    ) {
        out.extend(self.package_objects(package));
        let next = match depth {
            Some(0) => return,
            Some(d) => Some(d - 1),
            None => None,
        };
        for &child in &self.package(package).children {
            self.collect_objects(child, next, out);
        }
    }

    /// Look up `name` from the point of view of the file `local`.
    ///
    /// Without an alias, a local declaration shadows everything; otherwise
    /// every unaliased import is searched and all matches are returned. With
    /// an alias only the imports registered under it are searched. An empty
    /// result means "not found", more than one means "ambiguous".
    ///
    /// Only the file's own declarations and its imports are searched. Other
    /// files of the same package are never visible, and a package cannot
    /// import itself, so files of one package cannot reference each other's
    /// types.
    pub fn find_object(&self, local: LocalId, name: &str, alias: Option<&str>) -> Vec<ObjectId> {
        let scope = self.local(local);
        let alias = match alias {
            None | Some("") => {
                if let Some(id) = scope.object(name) {
                    return vec![id];
                }
                DEFAULT_ALIAS
            }
            Some(alias) => alias,
        };
        scope
            .imports_with_alias(alias)
            .filter_map(|import| self.package_object(import.target, name))
            .collect()
    }

    /// Lookup for a written type reference.
    pub fn find_ref(&self, local: LocalId, type_ref: &TypeRef) -> Vec<ObjectId> {
        self.find_object(local, &type_ref.name, type_ref.alias())
    }

    /// Names visible from `local` through `alias` (or locally and through
    /// unaliased imports when `alias` is `None`). Used for suggestions.
    pub fn visible_names(&self, local: LocalId, alias: Option<&str>) -> Vec<&str> {
        let scope = self.local(local);
        let mut names: Vec<&str> = Vec::new();
        let alias = match alias {
            None | Some("") => {
                names.extend(scope.objects().map(|id| self.object(id).name.as_str()));
                DEFAULT_ALIAS
            }
            Some(alias) => alias,
        };
        for import in scope.imports_with_alias(alias) {
            names.extend(self.package_objects(import.target).map(|o| o.name.as_str()));
        }
        names
    }
}
