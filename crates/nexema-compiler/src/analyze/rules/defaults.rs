//! Rules for the `defaults` block of a type.

use std::collections::HashMap;

use nexema_core::{Modifier, Primitive, Value, ValueTypeStmt};

use super::primitive_of;
use crate::analyze::RuleContext;
use crate::diagnostics::DiagnosticKind;
use crate::utils::did_you_mean;

/// Every default names a field of the type.
pub(super) fn default_value_valid_field(ctx: &mut RuleContext<'_>) {
    for object in ctx.objects() {
        let field_names: Vec<&str> = object.decl.fields.iter().map(|f| f.name.as_str()).collect();
        for default in &object.decl.defaults {
            let key = default.key.as_str();
            if object.decl.field(key).is_some() {
                continue;
            }
            let mut builder = ctx
                .report(DiagnosticKind::DefaultValueValidField, default.key.span)
                .message(key);
            if let Some(hint) = did_you_mean(key, &field_names) {
                builder = builder.hint(hint);
            }
            builder.emit();
        }
    }
}

/// A field gets at most one default.
pub(super) fn unique_default_value(ctx: &mut RuleContext<'_>) {
    let file = ctx.file();
    for object in ctx.objects() {
        let mut seen = HashMap::new();
        for default in &object.decl.defaults {
            let key = default.key.as_str();
            if let Some(first) = seen.get(key) {
                ctx.report(DiagnosticKind::DuplicatedDefaultValue, default.key.span)
                    .message(key)
                    .related_to(file, *first, "first assigned here")
                    .emit();
                continue;
            }
            seen.insert(key, default.key.span);
        }
    }
}

/// Default values must fit the declared type of their field.
pub(super) fn valid_default_value_type(ctx: &mut RuleContext<'_>) {
    for object in ctx.objects() {
        for default in &object.decl.defaults {
            let Some(vt) = object
                .decl
                .field(default.key.as_str())
                .and_then(|f| f.value_type.as_ref())
            else {
                continue;
            };
            if !value_matches(ctx, &default.value, vt) {
                ctx.report(DiagnosticKind::WrongDefaultValue, default.value_span)
                    .message(format!("`{}` is not a valid `{}`", default.value, vt))
                    .emit();
            }
        }
    }
}

fn value_matches(ctx: &RuleContext<'_>, value: &Value, vt: &ValueTypeStmt) -> bool {
    let Some(primitive) = primitive_of(vt) else {
        return custom_matches(ctx, value, vt);
    };

    match (primitive, value) {
        (Primitive::String | Primitive::Timestamp, Value::String(_)) => true,
        (Primitive::Bool, Value::Bool(_)) => true,
        (Primitive::Duration, Value::Int(_)) => true,
        (p, Value::Float(_)) if p.is_float() => true,
        (p, Value::Int(_)) if p.is_float() => true,
        (p, Value::Int(i)) if p.is_integer() => p
            .integer_range()
            .is_some_and(|(min, max)| (min..=max).contains(i)),
        (Primitive::List, Value::List(items)) => match vt.args.as_slice() {
            [element] => items.iter().all(|item| value_matches(ctx, item, element)),
            // argument shape is reported by the list rule
            _ => true,
        },
        (Primitive::Map, Value::Map(entries)) => match vt.args.as_slice() {
            [key_type, value_type] => entries
                .iter()
                .all(|(k, v)| value_matches(ctx, k, key_type) && value_matches(ctx, v, value_type)),
            _ => true,
        },
        _ => false,
    }
}

/// Enums take the name of one of their members; other custom types take no
/// defaults. Unresolved references are left to the field type rule.
fn custom_matches(ctx: &RuleContext<'_>, value: &Value, vt: &ValueTypeStmt) -> bool {
    let Some(object) = ctx.lookup(&vt.ident) else {
        return true;
    };
    match (object.decl.modifier, value) {
        (Modifier::Enum, Value::String(member)) => object.decl.field(member).is_some(),
        _ => false,
    }
}
