//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};
use crate::source_map::SourceMap;

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    sources: Option<&'d SourceMap>,
    colored: bool,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            sources: None,
            colored: false,
        }
    }

    pub fn sources(mut self, sources: &'d SourceMap) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.render_snippet(&renderer, diag) {
                Some(rendered) => write!(w, "{}", rendered)?,
                None => write!(w, "{}", diag)?,
            }
        }
        Ok(())
    }

    fn render_snippet(&self, renderer: &Renderer, diag: &DiagnosticMessage) -> Option<String> {
        let sources = self.sources?;
        let path = diag.file.full_path();
        let source = sources.get(&path)?;
        let range = sources.range(&path, diag.span)?;

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .path(path.as_str())
            .annotation(AnnotationKind::Primary.span(range).label(diag.message.as_str()));

        let mut foreign = Vec::new();
        for related in &diag.related {
            let related_path = related.file.full_path();
            if related_path == path {
                if let Some(range) = sources.range(&path, related.span) {
                    snippet = snippet.annotation(
                        AnnotationKind::Context
                            .span(range)
                            .label(related.message.as_str()),
                    );
                }
            } else if let (Some(source), Some(range)) = (
                sources.get(&related_path),
                sources.range(&related_path, related.span),
            ) {
                foreign.push((related_path, source, range, related.message.as_str()));
            }
        }

        let level = severity_to_level(diag.severity);
        let mut group = level.primary_title(diag.message.as_str()).element(snippet);

        for (related_path, source, range, label) in &foreign {
            group = group.element(
                Snippet::source(*source)
                    .line_start(1)
                    .path(related_path.as_str())
                    .annotation(AnnotationKind::Context.span(range.clone()).label(*label)),
            );
        }

        for hint in &diag.hints {
            group = group.element(Level::HELP.message(hint.as_str()));
        }

        let report: Vec<Group> = vec![group];
        Some(renderer.render(&report).to_string())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}
