#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the Nexema schema compiler.
//!
//! Three layers:
//! - **Input layer** (`ast`): one declaration tree per source file, as produced
//!   by the parser. The compiler never sees source text, only these trees.
//! - **Value layer** (`primitive`, `value`): the closed primitive type set and
//!   the literal values used by defaults and annotations.
//! - **Output layer** (`snapshot`): the canonical, content-addressed schema handed
//!   to generator plugins.

pub mod ast;
pub mod primitive;
pub mod snapshot;
pub mod utils;
pub mod value;

#[cfg(test)]
mod snapshot_tests;
#[cfg(test)]
mod utils_tests;

pub use ast::{
    Assignment, Ast, FieldStmt, FileRef, Ident, Modifier, Pos, Span, TypeRef, TypeStmt, UseStmt,
    ValueTypeStmt,
};
pub use primitive::Primitive;
pub use snapshot::{FieldDefinition, Snapshot, SnapshotFile, TypeDefinition, ValueType};
pub use value::Value;
