mod message;
mod printer;


use nexema_core::{FileRef, Span};

pub use message::{DiagnosticKind, DiagnosticMessage, RelatedInfo, Severity};
pub use printer::DiagnosticsPrinter;

use crate::source_map::SourceMap;

/// Append-only collection of diagnostics produced by one compile run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind and span.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(
        &mut self,
        file: &FileRef,
        kind: DiagnosticKind,
        span: Span,
    ) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(file.clone(), kind, span),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    /// Whether any diagnostic of `kind` was reported.
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.messages.iter().any(|d| d.kind == kind)
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.messages.iter().filter(|d| d.kind == kind).count()
    }

    /// Order by file path, then position, then kind. Stable for equal keys.
    pub fn sort(&mut self) {
        self.messages.sort_by(|a, b| {
            a.file
                .full_path()
                .cmp(&b.file.full_path())
                .then(a.span.start.cmp(&b.span.start))
                .then(a.kind.cmp(&b.kind))
        });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub fn as_slice(&self) -> &[DiagnosticMessage] {
        &self.messages
    }

    pub fn into_vec(self) -> Vec<DiagnosticMessage> {
        self.messages
    }

    /// Printer without source text: one plain line per diagnostic.
    pub fn printer(&self) -> DiagnosticsPrinter<'_> {
        DiagnosticsPrinter::new(self)
    }

    /// Render with annotated source snippets where the source text is known.
    pub fn render(&self, sources: &SourceMap) -> String {
        self.printer().sources(sources).render()
    }

    pub fn render_colored(&self, sources: &SourceMap, colored: bool) -> String {
        self.printer().sources(sources).colored(colored).render()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.message.severity = severity;
        self
    }

    pub fn related_to(mut self, file: &FileRef, span: Span, msg: impl Into<String>) -> Self {
        self.message
            .related
            .push(RelatedInfo::new(file.clone(), span, msg));
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
