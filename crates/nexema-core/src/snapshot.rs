//! Snapshot: the compiler's terminal artifact.
//!
//! This is the exact structure serialized to JSON and handed to generator
//! plugins. Cross-references between types use canonical ids, never names.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ast::Modifier;
use crate::primitive::Primitive;
use crate::value::Value;

/// A compiled, content-addressed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    /// Fingerprint over all file ids. Equal hashcodes mean equal schemas.
    pub hashcode: String,
    pub files: Vec<SnapshotFile>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Find a file by its project-relative path.
    pub fn file(&self, path: &str) -> Option<&SnapshotFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Iterate over every type definition in every file.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.files.iter().flat_map(|f| f.types.iter())
    }

    /// Find a type by canonical id.
    pub fn type_by_id(&self, id: &str) -> Option<&TypeDefinition> {
        self.types().find(|t| t.id == id)
    }
}

/// One compiled source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFile {
    pub id: String,
    pub package_name: String,
    /// Project-relative file path (`common/entity.nex`).
    pub path: String,
    pub types: Vec<TypeDefinition>,
}

impl SnapshotFile {
    pub fn type_named(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// A fully resolved type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    pub id: String,
    pub name: String,
    pub modifier: Modifier,
    pub documentation: Vec<String>,
    pub annotations: IndexMap<String, Value>,
    pub defaults: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A fully resolved field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub index: i64,
    pub name: String,
    pub documentation: Vec<String>,
    pub annotations: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Absent for enum members.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
}

/// A resolved value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValueType {
    #[serde(rename_all = "camelCase")]
    Primitive {
        primitive: Primitive,
        nullable: bool,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<ValueType>,
    },
    #[serde(rename_all = "camelCase")]
    Custom {
        object_id: String,
        nullable: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        import_alias: Option<String>,
    },
}

impl ValueType {
    pub fn is_nullable(&self) -> bool {
        match self {
            ValueType::Primitive { nullable, .. } | ValueType::Custom { nullable, .. } => {
                *nullable
            }
        }
    }

    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            ValueType::Primitive { primitive, .. } => Some(*primitive),
            ValueType::Custom { .. } => None,
        }
    }
}
