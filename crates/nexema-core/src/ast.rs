//! Declaration tree for a single source file.
//!
//! This is the contract with the parser: the compiler consumes one [`Ast`] per
//! file and never looks at source text. Every node carries a [`Span`] so
//! diagnostics can point back at the declaration that caused them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Alias key used for imports declared without an alias.
pub const DEFAULT_ALIAS: &str = ".";

/// A 1-based line/column position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Start (inclusive) and end (exclusive) of a node in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    /// Span covering `len` columns of a single line.
    pub fn on_line(line: u32, column: u32, len: u32) -> Self {
        Self {
            start: Pos::new(line, column),
            end: Pos::new(line, column + len),
        }
    }
}

/// Where a declaration originated: package-relative directory plus file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileRef {
    /// Package path (directory relative to the project root, `""` for the root).
    pub path: String,
    /// File name within the package directory.
    pub name: String,
}

impl FileRef {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Path of the file relative to the project root (`common/entity.nex`).
    pub fn full_path(&self) -> String {
        if self.path.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.path, self.name)
        }
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// Parsed source file: its identity, imports and type declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ast {
    pub file: FileRef,
    #[serde(default)]
    pub uses: Vec<UseStmt>,
    #[serde(default)]
    pub types: Vec<TypeStmt>,
}

impl Ast {
    pub fn new(file: FileRef) -> Self {
        Self {
            file,
            uses: Vec::new(),
            types: Vec::new(),
        }
    }
}

/// An identifier together with its location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

/// `use "path"` or `use "path" as alias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseStmt {
    pub path: String,
    pub alias: Option<Ident>,
    pub span: Span,
}

impl UseStmt {
    /// Alias key the import is registered under (`"."` when unaliased).
    pub fn alias_key(&self) -> &str {
        self.alias
            .as_ref()
            .map(Ident::as_str)
            .unwrap_or(DEFAULT_ALIAS)
    }

    pub fn has_alias(&self) -> bool {
        self.alias.is_some()
    }
}

/// The closed set of type modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Struct,
    Enum,
    Union,
    Base,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Struct => "struct",
            Modifier::Enum => "enum",
            Modifier::Union => "union",
            Modifier::Base => "base",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A possibly alias-qualified reference to a type name (`Entity`, `common.Entity`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    pub alias: Option<String>,
    pub span: Span,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, alias: Option<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            alias,
            span,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{}.{}", alias, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A named schema type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeStmt {
    pub name: Ident,
    pub modifier: Modifier,
    /// `extends` clause. Only meaningful for `struct`.
    pub base_type: Option<TypeRef>,
    #[serde(default)]
    pub fields: Vec<FieldStmt>,
    /// The `defaults { ... }` block.
    #[serde(default)]
    pub defaults: Vec<Assignment>,
    #[serde(default)]
    pub documentation: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Assignment>,
    pub span: Span,
}

impl TypeStmt {
    pub fn field(&self, name: &str) -> Option<&FieldStmt> {
        self.fields.iter().find(|f| f.name.name == name)
    }

    /// Effective index of every field, in declaration order.
    ///
    /// Omitted indexes continue from the previous field, starting at 0. An
    /// inferred index that would not fit in `i64` is `None`, and so is every
    /// omitted index after it.
    pub fn field_indexes(&self) -> Vec<Option<i64>> {
        let mut prev = Some(-1i64);
        self.fields
            .iter()
            .map(|field| {
                let index = match field.index {
                    Some(index) => Some(index),
                    None => prev.and_then(|p| p.checked_add(1)),
                };
                prev = index;
                index
            })
            .collect()
    }
}

/// A field inside a type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStmt {
    pub name: Ident,
    /// Explicit index. Inferred as previous + 1 when omitted.
    pub index: Option<i64>,
    /// Absent for enum members.
    pub value_type: Option<ValueTypeStmt>,
    #[serde(default)]
    pub documentation: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Assignment>,
    pub span: Span,
}

/// A value type as written: identifier, nullability and type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueTypeStmt {
    pub ident: TypeRef,
    pub nullable: bool,
    #[serde(default)]
    pub args: Vec<ValueTypeStmt>,
    pub span: Span,
}

impl fmt::Display for ValueTypeStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ident)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// `key = value`, used by default blocks and annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub key: Ident,
    pub value: Value,
    pub value_span: Span,
}
