//! Staged compiler: `Compiler` → `Linked` → `Analyzed` → [`Snapshot`].
//!
//! Each stage owns the output of the previous one, so a snapshot can only be
//! requested from a run that went through linking and analysis.

use nexema_core::{Ast, Snapshot};
use tracing::debug_span;

use crate::config::CompilerConfig;
use crate::diagnostics::Diagnostics;
use crate::scope::ScopeTree;
use crate::{Error, Result, analyze, link, schema};

pub struct Compiler {
    config: CompilerConfig,
    asts: Vec<Ast>,
}

impl Compiler {
    /// Fails with [`Error::UnknownRule`] if the config names a rule that does
    /// not exist, and [`Error::RequiredRule`] if it disables or downgrades a
    /// required one.
    pub fn new(config: CompilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            asts: Vec::new(),
        })
    }

    pub fn add_ast(&mut self, ast: Ast) -> &mut Self {
        self.asts.push(ast);
        self
    }

    pub fn with_asts(mut self, asts: impl IntoIterator<Item = Ast>) -> Self {
        self.asts.extend(asts);
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn link(self) -> Result<Linked> {
        let (scopes, diagnostics) = link::link(self.asts)?;
        Ok(Linked {
            config: self.config,
            scopes,
            diagnostics,
        })
    }
}

#[derive(Debug)]
pub struct Linked {
    config: CompilerConfig,
    scopes: ScopeTree,
    diagnostics: Diagnostics,
}

impl Linked {
    pub fn analyze(mut self) -> Analyzed {
        self.diagnostics
            .extend(analyze::analyze(&self.scopes, &self.config));
        self.diagnostics.sort();
        Analyzed {
            config: self.config,
            scopes: self.scopes,
            diagnostics: self.diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }
}

#[derive(Debug)]
pub struct Analyzed {
    config: CompilerConfig,
    scopes: ScopeTree,
    diagnostics: Diagnostics,
}

impl Analyzed {
    /// No errors, and no warnings either when `deny_warnings` is set.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
            && !(self.config.deny_warnings && self.diagnostics.has_warnings())
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn build_snapshot(&self) -> Result<Snapshot> {
        if !self.is_valid() {
            return Err(Error::CompileFailed(self.diagnostics.clone()));
        }
        schema::build_snapshot(&self.scopes, self.config.snapshot_version)
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Compile `asts` with the default configuration.
pub fn compile(asts: impl IntoIterator<Item = Ast>) -> Result<Snapshot> {
    let _span = debug_span!("compile").entered();
    Compiler::new(CompilerConfig::default())?
        .with_asts(asts)
        .link()?
        .analyze()
        .build_snapshot()
}
