//! Source text registry used only for rendering diagnostics.
//!
//! The compiler works on parsed trees and never needs source text. Callers
//! that still have it can register it here, keyed by project-relative file
//! path, to get annotated snippets instead of plain lines.

use std::ops::Range;

use indexmap::IndexMap;
use nexema_core::{Pos, Span};

#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: IndexMap<String, String>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the content of the file at `path` (`common/entity.nex`).
    pub fn add(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(path.into(), content.into());
    }

    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.add(path, content);
        self
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Byte offset of a 1-based line/column position, clamped to the content.
    pub fn offset(&self, path: &str, pos: Pos) -> Option<usize> {
        self.get(path).map(|content| offset_in(content, pos))
    }

    /// Byte range covered by `span`. Empty spans widen to one byte when possible.
    pub fn range(&self, path: &str, span: Span) -> Option<Range<usize>> {
        let content = self.get(path)?;
        let start = offset_in(content, span.start);
        let end = offset_in(content, span.end).max(start);
        if start == end {
            return Some(start..(start + 1).min(content.len()));
        }
        Some(start..end)
    }
}

fn offset_in(content: &str, pos: Pos) -> usize {
    let line = pos.line.max(1) as usize;
    let mut line_start = 0;
    for _ in 1..line {
        match content[line_start..].find('\n') {
            Some(nl) => line_start += nl + 1,
            None => return content.len(),
        }
    }
    let line_text = &content[line_start..];
    let line_text = line_text.split('\n').next().unwrap_or(line_text);
    let column = pos.column.max(1) as usize - 1;
    let within = line_text
        .char_indices()
        .nth(column)
        .map_or(line_text.len(), |(i, _)| i);
    line_start + within
}
