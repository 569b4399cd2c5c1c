//! Ast builders and assertions shared by unit tests.
//!
//! Spans are synthetic: every use declaration, type and field added to a
//! file gets the next line, so diagnostics point at distinct positions in
//! declaration order.

use nexema_core::{
    Assignment, Ast, FieldStmt, FileRef, Ident, Modifier, Span, TypeRef, TypeStmt, UseStmt, Value,
    ValueTypeStmt,
};

use crate::config::CompilerConfig;
use crate::diagnostics::Diagnostics;
use crate::scope::ScopeTree;

pub struct AstBuilder {
    ast: Ast,
    line: u32,
}

impl AstBuilder {
    /// `path` is the full file path (`common/entity.nex`).
    pub fn new(path: &str) -> Self {
        let (package, name) = path.rsplit_once('/').unwrap_or(("", path));
        Self {
            ast: Ast::new(FileRef::new(package, name)),
            line: 0,
        }
    }

    fn next_line(&mut self) -> u32 {
        self.line += 1;
        self.line
    }

    pub fn uses(mut self, path: &str) -> Self {
        let line = self.next_line();
        self.ast.uses.push(UseStmt {
            path: path.to_string(),
            alias: None,
            span: Span::on_line(line, 1, 6 + path.len() as u32),
        });
        self
    }

    pub fn uses_as(mut self, path: &str, alias: &str) -> Self {
        let line = self.next_line();
        let alias_column = 11 + path.len() as u32;
        self.ast.uses.push(UseStmt {
            path: path.to_string(),
            alias: Some(Ident::new(alias, Span::on_line(line, alias_column, alias.len() as u32))),
            span: Span::on_line(line, 1, alias_column + alias.len() as u32 - 1),
        });
        self
    }

    pub fn ty(mut self, ty: TypeBuilder) -> Self {
        let mut decl = ty.decl;
        let line = self.next_line();
        let keyword = decl.modifier.as_str().len() as u32;
        decl.span = Span::on_line(line, 1, keyword + 1 + decl.name.name.len() as u32);
        decl.name.span = Span::on_line(line, keyword + 2, decl.name.name.len() as u32);
        if let Some(base) = &mut decl.base_type {
            let column = decl.name.span.end.column + 9;
            base.span = Span::on_line(line, column, base.to_string().len() as u32);
        }
        for field in &mut decl.fields {
            let line = self.next_line();
            field.span = Span::on_line(line, 3, 40);
            field.name.span = Span::on_line(line, 3, field.name.name.len() as u32);
            if let Some(vt) = &mut field.value_type {
                place_value_type(vt, line, field.name.span.end.column + 1);
            }
            for annotation in &mut field.annotations {
                place_assignment(annotation, line, 30);
            }
        }
        for assignment in decl.defaults.iter_mut().chain(decl.annotations.iter_mut()) {
            let line = self.next_line();
            place_assignment(assignment, line, 3);
        }
        self.ast.types.push(decl);
        self
    }

    pub fn build(self) -> Ast {
        self.ast
    }
}

fn place_value_type(vt: &mut ValueTypeStmt, line: u32, column: u32) {
    let len = vt.to_string().len() as u32;
    vt.span = Span::on_line(line, column, len);
    vt.ident.span = Span::on_line(line, column, vt.ident.to_string().len() as u32);
    let mut column = column + vt.ident.to_string().len() as u32 + 1;
    for arg in &mut vt.args {
        place_value_type(arg, line, column);
        column += arg.to_string().len() as u32 + 2;
    }
}

fn place_assignment(assignment: &mut Assignment, line: u32, column: u32) {
    let key_len = assignment.key.name.len() as u32;
    assignment.key.span = Span::on_line(line, column, key_len);
    let value_len = assignment.value.to_string().len() as u32;
    assignment.value_span = Span::on_line(line, column + key_len + 3, value_len);
}

pub struct TypeBuilder {
    decl: TypeStmt,
}

pub fn struct_type(name: &str) -> TypeBuilder {
    TypeBuilder::new(Modifier::Struct, name)
}

pub fn enum_type(name: &str) -> TypeBuilder {
    TypeBuilder::new(Modifier::Enum, name)
}

pub fn union_type(name: &str) -> TypeBuilder {
    TypeBuilder::new(Modifier::Union, name)
}

pub fn base_type(name: &str) -> TypeBuilder {
    TypeBuilder::new(Modifier::Base, name)
}

impl TypeBuilder {
    pub fn new(modifier: Modifier, name: &str) -> Self {
        Self {
            decl: TypeStmt {
                name: Ident::new(name, Span::default()),
                modifier,
                base_type: None,
                fields: Vec::new(),
                defaults: Vec::new(),
                documentation: Vec::new(),
                annotations: Vec::new(),
                span: Span::default(),
            },
        }
    }

    /// `extends Entity` or `extends c.Entity`.
    pub fn extends(mut self, reference: &str) -> Self {
        self.decl.base_type = Some(parse_type_ref(reference));
        self
    }

    pub fn doc(mut self, line: &str) -> Self {
        self.decl.documentation.push(line.to_string());
        self
    }

    /// Field with an inferred index and the given type expression.
    pub fn field(self, name: &str, ty: &str) -> Self {
        self.push_field(name, None, Some(parse_type(ty)))
    }

    pub fn field_at(self, name: &str, index: i64, ty: &str) -> Self {
        self.push_field(name, Some(index), Some(parse_type(ty)))
    }

    /// Enum member with an inferred index.
    pub fn member(self, name: &str) -> Self {
        self.push_field(name, None, None)
    }

    pub fn member_at(self, name: &str, index: i64) -> Self {
        self.push_field(name, Some(index), None)
    }

    fn push_field(
        mut self,
        name: &str,
        index: Option<i64>,
        value_type: Option<ValueTypeStmt>,
    ) -> Self {
        self.decl.fields.push(FieldStmt {
            name: Ident::new(name, Span::default()),
            index,
            value_type,
            documentation: Vec::new(),
            annotations: Vec::new(),
            span: Span::default(),
        });
        self
    }

    /// Documentation line on the last field.
    pub fn field_doc(mut self, line: &str) -> Self {
        if let Some(field) = self.decl.fields.last_mut() {
            field.documentation.push(line.to_string());
        }
        self
    }

    /// Annotation on the last field.
    pub fn field_annotation(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Some(field) = self.decl.fields.last_mut() {
            field.annotations.push(assignment(key, value.into()));
        }
        self
    }

    pub fn default(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.decl.defaults.push(assignment(key, value.into()));
        self
    }

    pub fn annotation(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.decl.annotations.push(assignment(key, value.into()));
        self
    }
}

fn assignment(key: &str, value: Value) -> Assignment {
    Assignment {
        key: Ident::new(key, Span::default()),
        value,
        value_span: Span::default(),
    }
}

fn parse_type_ref(text: &str) -> TypeRef {
    match text.split_once('.') {
        Some((alias, name)) => TypeRef::new(name, Some(alias.to_string()), Span::default()),
        None => TypeRef::new(text, None, Span::default()),
    }
}

/// Parse a type expression such as `map(string, list(a.T))?`.
pub fn parse_type(text: &str) -> ValueTypeStmt {
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let (vt, rest) = parse_type_at(&text);
    assert!(rest.is_empty(), "trailing input in type expression `{text}`: `{rest}`");
    vt
}

fn parse_type_at(text: &str) -> (ValueTypeStmt, &str) {
    let end = text
        .find(|c: char| matches!(c, '(' | ')' | ',' | '?'))
        .unwrap_or(text.len());
    let ident = parse_type_ref(&text[..end]);
    let mut rest = &text[end..];

    let mut args = Vec::new();
    if let Some(inner) = rest.strip_prefix('(') {
        rest = inner;
        loop {
            let (arg, after) = parse_type_at(rest);
            args.push(arg);
            if let Some(after) = after.strip_prefix(',') {
                rest = after;
                continue;
            }
            rest = after
                .strip_prefix(')')
                .unwrap_or_else(|| panic!("unclosed type arguments in `{text}`"));
            break;
        }
    }

    let nullable = rest.starts_with('?');
    if nullable {
        rest = &rest[1..];
    }

    let vt = ValueTypeStmt {
        ident,
        nullable,
        args,
        span: Span::default(),
    };
    (vt, rest)
}

/// Build scopes and link, returning the tree and sorted diagnostics.
pub fn link_asts(asts: Vec<Ast>) -> (ScopeTree, Diagnostics) {
    let (tree, mut diagnostics) = crate::link::link(asts).expect("link failed");
    diagnostics.sort();
    (tree, diagnostics)
}

/// Link and analyze with the default configuration.
pub fn analyze_asts(asts: Vec<Ast>) -> Diagnostics {
    let (tree, mut diagnostics) = crate::link::link(asts).expect("link failed");
    let config = CompilerConfig::default();
    diagnostics.extend(crate::analyze::analyze(&tree, &config));
    diagnostics.sort();
    diagnostics
}

/// One `Kind: message` line per diagnostic, without positions.
pub fn summary(diagnostics: &Diagnostics) -> String {
    diagnostics
        .iter()
        .map(|d| format!("{:?}: {}", d.kind(), d.message()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Same as [`summary`] with `file:line` prefixed.
pub fn summary_with_positions(diagnostics: &Diagnostics) -> String {
    diagnostics
        .iter()
        .map(|d| {
            format!(
                "{}:{} {:?}: {}",
                d.file(),
                d.span().start.line,
                d.kind(),
                d.message()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
