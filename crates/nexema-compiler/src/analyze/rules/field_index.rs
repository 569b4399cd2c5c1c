use std::collections::HashMap;

use nexema_core::Modifier;

use crate::analyze::RuleContext;
use crate::diagnostics::DiagnosticKind;

/// Field index contract.
///
/// Omitted indexes are inferred as previous + 1, starting from 0. Effective
/// indexes must be unique and non-negative. Enum indexes must additionally
/// start at 0 and increase by exactly one.
pub(super) fn field_index(ctx: &mut RuleContext<'_>) {
    let file = ctx.file();
    for object in ctx.objects() {
        let is_enum = object.decl.modifier == Modifier::Enum;
        let mut seen = HashMap::new();
        let mut prev = Some(-1i64);

        let indexes = object.decl.field_indexes();
        for (position, (field, effective)) in object.decl.fields.iter().zip(indexes).enumerate() {
            let Some(effective) = effective else {
                if prev.is_some() {
                    ctx.report(DiagnosticKind::InvalidFieldIndex, field.name.span)
                        .message(format!(
                            "field `{}` would follow index {}",
                            field.name.as_str(),
                            i64::MAX
                        ))
                        .emit();
                }
                prev = None;
                continue;
            };
            let expected = prev.and_then(|p| p.checked_add(1));
            prev = Some(effective);

            if field.index.is_some() {
                if effective < 0 {
                    ctx.report(DiagnosticKind::InvalidFieldIndex, field.name.span)
                        .message(format!(
                            "field `{}` has negative index {}",
                            field.name.as_str(),
                            effective
                        ))
                        .emit();
                    continue;
                }

                if is_enum && position == 0 && effective != 0 {
                    ctx.report(DiagnosticKind::EnumShouldBeZeroBased, field.name.span)
                        .message(format!("found {}", effective))
                        .emit();
                    continue;
                }

                if is_enum
                    && position > 0
                    && let Some(expected) = expected
                    && effective != expected
                {
                    ctx.report(DiagnosticKind::EnumShouldBeSubsequent, field.name.span)
                        .message(format!("expected {}, found {}", expected, effective))
                        .emit();
                    continue;
                }
            }

            if let Some(first) = seen.get(&effective) {
                ctx.report(DiagnosticKind::DuplicatedFieldIndex, field.name.span)
                    .message(effective.to_string())
                    .related_to(file, *first, "first used here")
                    .emit();
            } else {
                seen.insert(effective, field.name.span);
            }
        }
    }
}
