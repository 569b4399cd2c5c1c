//! Snapshot builder: turn a linked, error-free scope tree into a [`Snapshot`].
//!
//! References resolve to canonical ids here. The analyzer has already
//! rejected every unresolvable or ambiguous reference, so a failed lookup is
//! an internal error rather than a diagnostic.


use indexmap::IndexMap;
use nexema_core::{
    Assignment, FieldDefinition, Modifier, Snapshot, SnapshotFile, TypeDefinition, TypeRef, Value,
    ValueType, ValueTypeStmt,
};
use tracing::debug_span;

use crate::analyze::RuleKind;
use crate::scope::{LocalId, Object, PackageId, ScopeTree};
use crate::{Error, Result, hash};

/// Build the snapshot for `tree`.
///
/// Files are ordered by path and the hashcode is computed over sorted file
/// ids, so neither depends on the order sources were discovered in.
pub fn build_snapshot(tree: &ScopeTree, version: u32) -> Result<Snapshot> {
    let _span = debug_span!("build_snapshot").entered();

    let mut files = Vec::new();
    collect_files(tree, tree.root(), &mut files)?;
    files.sort_by(|a: &SnapshotFile, b: &SnapshotFile| a.path.cmp(&b.path));

    let hashcode = hash::snapshot_hashcode(files.iter().map(|f| f.id.as_str()));
    tracing::debug!(files = files.len(), hashcode = %hashcode, "snapshot built");

    Ok(Snapshot {
        version,
        hashcode,
        files,
    })
}

fn collect_files(tree: &ScopeTree, package: PackageId, out: &mut Vec<SnapshotFile>) -> Result<()> {
    let scope = tree.package(package);
    for &local in &scope.locals {
        out.push(FileBuilder { tree, local }.build()?);
    }
    for &child in &scope.children {
        collect_files(tree, child, out)?;
    }
    Ok(())
}

struct FileBuilder<'a> {
    tree: &'a ScopeTree,
    local: LocalId,
}

impl FileBuilder<'_> {
    fn build(&self) -> Result<SnapshotFile> {
        let scope = self.tree.local(self.local);
        let types = scope
            .objects()
            .map(|id| self.type_definition(self.tree.object(id)))
            .collect::<Result<Vec<_>>>()?;

        let mut file = SnapshotFile {
            id: String::new(),
            package_name: self.tree.package_of(self.local).name().to_string(),
            path: scope.file.full_path(),
            types,
        };
        file.id = hash::file_id(&file);
        tracing::trace!(path = %file.path, id = %file.id, types = file.types.len(), "file built");
        Ok(file)
    }

    fn type_definition(&self, object: &Object) -> Result<TypeDefinition> {
        let decl = &object.decl;
        let base_type = decl
            .base_type
            .as_ref()
            .map(|base| self.resolve(base).map(|o| o.canonical_id.clone()))
            .transpose()?;

        let defaults = assignment_map(&decl.defaults);
        let mut fields = Vec::with_capacity(decl.fields.len());
        for (field, index) in decl.fields.iter().zip(decl.field_indexes()) {
            let Some(index) = index else {
                return Err(self.internal(format!(
                    "field `{}.{}` has no index (rule `{}` did not run)",
                    object.name,
                    field.name.as_str(),
                    RuleKind::FieldIndex
                )));
            };

            let value_type = match (&field.value_type, decl.modifier) {
                (_, Modifier::Enum) => None,
                (Some(vt), _) => Some(self.value_type(vt)?),
                (None, _) => {
                    return Err(self.internal(format!(
                        "field `{}.{}` has no value type (rule `{}` did not run)",
                        object.name,
                        field.name.as_str(),
                        RuleKind::FieldShape
                    )));
                }
            };

            fields.push(FieldDefinition {
                index,
                name: field.name.name.clone(),
                documentation: field.documentation.clone(),
                annotations: assignment_map(&field.annotations),
                default_value: defaults.get(field.name.as_str()).cloned(),
                value_type,
            });
        }

        Ok(TypeDefinition {
            id: object.canonical_id.clone(),
            name: object.name.clone(),
            modifier: decl.modifier,
            documentation: decl.documentation.clone(),
            annotations: assignment_map(&decl.annotations),
            defaults,
            base_type,
            fields,
        })
    }

    fn value_type(&self, vt: &ValueTypeStmt) -> Result<ValueType> {
        if vt.ident.alias.is_none()
            && let Some(primitive) = nexema_core::Primitive::parse(&vt.ident.name)
        {
            let arguments = vt
                .args
                .iter()
                .map(|arg| self.value_type(arg))
                .collect::<Result<Vec<_>>>()?;
            return Ok(ValueType::Primitive {
                primitive,
                nullable: vt.nullable,
                arguments,
            });
        }

        let object = self.resolve(&vt.ident)?;
        Ok(ValueType::Custom {
            object_id: object.canonical_id.clone(),
            nullable: vt.nullable,
            import_alias: vt.ident.alias.clone(),
        })
    }

    fn resolve(&self, type_ref: &TypeRef) -> Result<&Object> {
        match self.tree.find_ref(self.local, type_ref).as_slice() {
            [id] => Ok(self.tree.object(*id)),
            [] => Err(self.internal(format!("unresolved reference `{}`", type_ref))),
            _ => Err(self.internal(format!("ambiguous reference `{}`", type_ref))),
        }
    }

    fn internal(&self, message: String) -> Error {
        Error::Internal(format!("{}: {}", self.tree.file(self.local), message))
    }
}

/// First assignment of each key wins; duplicates are reported by the analyzer.
fn assignment_map(items: &[Assignment]) -> IndexMap<String, Value> {
    let mut map = IndexMap::with_capacity(items.len());
    for item in items {
        map.entry(item.key.name.clone())
            .or_insert_with(|| item.value.clone());
    }
    map
}
