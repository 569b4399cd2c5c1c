//! Analyzer: run the structural rule set over every linked declaration.
//!
//! Rules are independent. Each one is run once per file with a
//! [`RuleContext`] scoped to that file and appends to a shared diagnostic
//! sink; no rule stops another from running.

mod rules;
mod visitor;


use nexema_core::{FileRef, Span, TypeRef};
use tracing::debug_span;

pub use rules::RuleKind;
pub use visitor::{Visitor, walk_field, walk_type, walk_value_type};

use crate::config::CompilerConfig;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics, Severity};
use crate::scope::{LocalId, Object, ScopeTree};
use crate::utils::did_you_mean;

/// Run every enabled rule over every file of `tree`.
pub fn analyze(tree: &ScopeTree, config: &CompilerConfig) -> Diagnostics {
    let _span = debug_span!("analyze").entered();
    let rules: Vec<RuleKind> = RuleKind::ALL
        .into_iter()
        .filter(|&rule| config.is_enabled(rule))
        .collect();

    let mut diagnostics = Diagnostics::new();
    for local in tree.locals() {
        for &rule in &rules {
            let severity = config.severity_of(rule);
            let mut ctx = RuleContext::new(tree, local.id, severity, &rules, &mut diagnostics);
            rule.check(&mut ctx);
        }
    }

    tracing::debug!(
        rules = rules.len(),
        files = tree.locals().len(),
        diagnostics = diagnostics.len(),
        "analysis finished"
    );
    diagnostics
}

/// What a rule sees: one file's objects, a resolver and the diagnostic sink.
pub struct RuleContext<'a> {
    tree: &'a ScopeTree,
    local: LocalId,
    severity: Severity,
    enabled: &'a [RuleKind],
    diagnostics: &'a mut Diagnostics,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        tree: &'a ScopeTree,
        local: LocalId,
        severity: Severity,
        enabled: &'a [RuleKind],
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            tree,
            local,
            severity,
            enabled,
            diagnostics,
        }
    }

    pub fn tree(&self) -> &'a ScopeTree {
        self.tree
    }

    pub fn local(&self) -> LocalId {
        self.local
    }

    /// Whether `rule` runs in this analysis.
    pub fn is_enabled(&self, rule: RuleKind) -> bool {
        self.enabled.contains(&rule)
    }

    pub fn file(&self) -> &'a FileRef {
        &self.tree.local(self.local).file
    }

    /// Objects declared in the current file, in declaration order.
    pub fn objects(&self) -> Vec<&'a Object> {
        let tree = self.tree;
        tree.local(self.local)
            .objects()
            .map(|id| tree.object(id))
            .collect()
    }

    /// Start a diagnostic in the current file with the rule's severity.
    pub fn report(&mut self, kind: DiagnosticKind, span: Span) -> DiagnosticBuilder<'_> {
        let file = self.file();
        self.diagnostics
            .report(file, kind, span)
            .severity(self.severity)
    }

    /// Resolve a reference to exactly one object.
    ///
    /// Reports `TypeNotFound` when nothing matches and `NeedAlias` when
    /// several unaliased imports declare the name. Both are always errors,
    /// whatever the severity of the calling rule.
    pub fn get_object(&mut self, type_ref: &TypeRef) -> Option<&'a Object> {
        let tree = self.tree;
        let found = tree.find_ref(self.local, type_ref);
        match found.as_slice() {
            [id] => Some(tree.object(*id)),
            [] => {
                let candidates = tree.visible_names(self.local, type_ref.alias());
                let hint = did_you_mean(&type_ref.name, &candidates);
                let mut builder = self
                    .report(DiagnosticKind::TypeNotFound, type_ref.span)
                    .severity(Severity::Error)
                    .message(type_ref.to_string());
                if let Some(hint) = hint {
                    builder = builder.hint(hint);
                }
                builder.emit();
                None
            }
            [..] => {
                let mut builder = self
                    .report(DiagnosticKind::NeedAlias, type_ref.span)
                    .severity(Severity::Error)
                    .message(&type_ref.name);
                for &id in &found {
                    let object = tree.object(id);
                    builder = builder.related_to(
                        tree.file(object.local),
                        object.decl.name.span,
                        format!("declared in `{}`", tree.package_of(object.local).path),
                    );
                }
                builder.emit();
                None
            }
        }
    }

    /// Resolve without reporting. `None` unless exactly one object matches.
    pub fn lookup(&self, type_ref: &TypeRef) -> Option<&'a Object> {
        match self.tree.find_ref(self.local, type_ref).as_slice() {
            [id] => Some(self.tree.object(*id)),
            _ => None,
        }
    }
}
