//! Nexema compiler core: link parsed schema files, check them and build the
//! content-addressed snapshot handed to code generators.
//!
//! # Example
//!
//! ```
//! use nexema_compiler::{Compiler, CompilerConfig};
//! use nexema_core::{Ast, FileRef};
//!
//! let ast = Ast::new(FileRef::new("common", "entity.nex"));
//! let analyzed = Compiler::new(CompilerConfig::default())
//!     .expect("valid config")
//!     .with_asts([ast])
//!     .link()
//!     .expect("has sources")
//!     .analyze();
//! assert!(analyzed.is_valid());
//! let snapshot = analyzed.build_snapshot().expect("valid schema");
//! assert_eq!(snapshot.files.len(), 1);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod hash;
pub mod link;
pub mod schema;
pub mod scope;
pub mod snapshot_file;
pub mod source_map;
pub mod utils;

#[cfg(test)]
pub mod test_utils;
#[cfg(test)]
mod utils_tests;

/// Result type for passes that produce both output and diagnostics.
///
/// Diagnostics describe problems in the schema; the outer `Result` carries
/// the failures that stop a pass outright.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use analyze::RuleKind;
pub use compiler::{Analyzed, Compiler, Linked, compile};
pub use config::CompilerConfig;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use source_map::SourceMap;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no source files to compile")]
    NoSources,

    #[error("file `{0}` was supplied more than once")]
    DuplicateFile(String),

    #[error("compilation failed with {} errors", .0.error_count())]
    CompileFailed(Diagnostics),

    /// An invariant the analyzer should have guaranteed does not hold.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("rule `{0}` is required and cannot be disabled or downgraded")]
    RequiredRule(String),

    #[error("invalid snapshot file: {0}")]
    InvalidSnapshotFile(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
