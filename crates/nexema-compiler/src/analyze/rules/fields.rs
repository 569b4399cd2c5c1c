use std::collections::HashMap;

use nexema_core::Modifier;

use crate::analyze::RuleContext;
use crate::diagnostics::DiagnosticKind;

pub(super) fn unique_field_name(ctx: &mut RuleContext<'_>) {
    let file = ctx.file();
    for object in ctx.objects() {
        let mut seen = HashMap::new();
        for field in &object.decl.fields {
            let name = field.name.as_str();
            if let Some(first) = seen.get(name) {
                ctx.report(DiagnosticKind::DuplicatedFieldName, field.name.span)
                    .message(name)
                    .related_to(file, *first, "first declared here")
                    .emit();
                continue;
            }
            seen.insert(name, field.name.span);
        }
    }
}

/// Enum members carry no value type; every other field must.
pub(super) fn field_shape(ctx: &mut RuleContext<'_>) {
    for object in ctx.objects() {
        let is_enum = object.decl.modifier == Modifier::Enum;
        for field in &object.decl.fields {
            match (&field.value_type, is_enum) {
                (Some(vt), true) => {
                    ctx.report(DiagnosticKind::UnexpectedFieldType, vt.span)
                        .message(field.name.as_str())
                        .emit();
                }
                (None, false) => {
                    ctx.report(DiagnosticKind::MissingFieldType, field.name.span)
                        .message(field.name.as_str())
                        .emit();
                }
                _ => {}
            }
        }
    }
}

pub(super) fn non_nullable_union_field(ctx: &mut RuleContext<'_>) {
    for object in ctx.objects() {
        if object.decl.modifier != Modifier::Union {
            continue;
        }
        for field in &object.decl.fields {
            let Some(vt) = &field.value_type else {
                continue;
            };
            if vt.nullable {
                ctx.report(DiagnosticKind::NonNullableUnionFields, vt.span)
                    .message(field.name.as_str())
                    .emit();
            }
        }
    }
}
