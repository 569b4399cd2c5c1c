//! Value-type rules: reference resolution and `list`/`map` argument shapes.

use nexema_core::{Primitive, ValueTypeStmt};

use super::primitive_of;
use crate::analyze::{RuleContext, Visitor, walk_value_type};
use crate::diagnostics::DiagnosticKind;
use crate::scope::Object;

/// Every value type names a primitive or resolves to exactly one object,
/// and never to the type that declares the field.
pub(super) fn valid_field_type(ctx: &mut RuleContext<'_>) {
    for object in ctx.objects() {
        let mut checker = FieldTypes {
            ctx: &mut *ctx,
            current: object,
        };
        checker.visit_type(&object.decl);
    }
}

struct FieldTypes<'c, 'a> {
    ctx: &'c mut RuleContext<'a>,
    current: &'a Object,
}

impl<'a> Visitor<'a> for FieldTypes<'_, 'a> {
    fn visit_value_type(&mut self, vt: &'a ValueTypeStmt) {
        match primitive_of(vt) {
            Some(primitive) => {
                if !primitive.is_collection() && !vt.args.is_empty() {
                    self.ctx
                        .report(DiagnosticKind::WrongArgumentsLen, vt.span)
                        .message(format!("`{}` takes none, found {}", primitive, vt.args.len()))
                        .emit();
                }
            }
            None => {
                if !vt.args.is_empty() {
                    self.ctx
                        .report(DiagnosticKind::WrongArgumentsLen, vt.span)
                        .message(format!("`{}` takes none, found {}", vt.ident, vt.args.len()))
                        .emit();
                }
                if let Some(resolved) = self.ctx.get_object(&vt.ident)
                    && resolved.id == self.current.id
                {
                    self.ctx
                        .report(DiagnosticKind::IllegalUseCycle, vt.ident.span)
                        .message(self.current.name.as_str())
                        .emit();
                }
            }
        }
        walk_value_type(self, vt);
    }
}

pub(super) fn valid_list_arguments(ctx: &mut RuleContext<'_>) {
    for object in ctx.objects() {
        let mut checker = Collections {
            ctx: &mut *ctx,
            primitive: Primitive::List,
        };
        checker.visit_type(&object.decl);
    }
}

pub(super) fn valid_map_arguments(ctx: &mut RuleContext<'_>) {
    for object in ctx.objects() {
        let mut checker = Collections {
            ctx: &mut *ctx,
            primitive: Primitive::Map,
        };
        checker.visit_type(&object.decl);
    }
}

/// Checks the arguments of every occurrence of one collection primitive.
struct Collections<'c, 'a> {
    ctx: &'c mut RuleContext<'a>,
    primitive: Primitive,
}

impl Collections<'_, '_> {
    fn check_list(&mut self, vt: &ValueTypeStmt) {
        let [element] = vt.args.as_slice() else {
            self.wrong_len(vt);
            return;
        };
        if let Some(inner) = primitive_of(element).filter(|p| p.is_collection()) {
            self.ctx
                .report(DiagnosticKind::WrongArguments, element.span)
                .message(format!("`list` elements cannot be `{}`", inner))
                .emit();
        }
    }

    fn check_map(&mut self, vt: &ValueTypeStmt) {
        let [key, value] = vt.args.as_slice() else {
            self.wrong_len(vt);
            return;
        };

        let valid_key = primitive_of(key).is_some_and(|p| p.is_valid_map_key()) && !key.nullable;
        if !valid_key {
            self.ctx
                .report(DiagnosticKind::WrongArguments, key.span)
                .message(format!(
                    "map key must be a non-nullable string, bool or integer, found `{}`",
                    key
                ))
                .emit();
        }

        if let Some(inner) = primitive_of(value).filter(|p| p.is_collection()) {
            self.ctx
                .report(DiagnosticKind::WrongArguments, value.span)
                .message(format!("map values cannot be `{}`", inner))
                .emit();
        }
    }

    fn wrong_len(&mut self, vt: &ValueTypeStmt) {
        self.ctx
            .report(DiagnosticKind::WrongArgumentsLen, vt.span)
            .message(format!(
                "`{}` expects {}, found {}",
                self.primitive,
                self.primitive.arity(),
                vt.args.len()
            ))
            .emit();
    }
}

impl<'a> Visitor<'a> for Collections<'_, 'a> {
    fn visit_value_type(&mut self, vt: &'a ValueTypeStmt) {
        if primitive_of(vt) == Some(self.primitive) {
            match self.primitive {
                Primitive::List => self.check_list(vt),
                Primitive::Map => self.check_map(vt),
                _ => {}
            }
        }
        walk_value_type(self, vt);
    }
}
