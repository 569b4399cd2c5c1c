use std::collections::HashMap;

use nexema_core::Assignment;

use crate::analyze::{RuleContext, RuleKind};
use crate::diagnostics::DiagnosticKind;

/// Annotation values are scalars: string, int, float or bool.
pub(super) fn valid_annotation_value(ctx: &mut RuleContext<'_>) {
    for object in ctx.objects() {
        let blocks = std::iter::once(&object.decl.annotations)
            .chain(object.decl.fields.iter().map(|f| &f.annotations));
        for annotation in blocks.flatten() {
            if !annotation.value.is_scalar() {
                ctx.report(DiagnosticKind::WrongAnnotationValue, annotation.value_span)
                    .message(annotation.key.as_str())
                    .emit();
            }
        }
    }
}

/// Within one annotation or default-value block a key appears once.
///
/// Defaults are only checked here while `unique-default-value` is disabled,
/// so a duplicate default is reported once.
pub(super) fn assignment_key_unique(ctx: &mut RuleContext<'_>) {
    let check_defaults = !ctx.is_enabled(RuleKind::UniqueDefaultValue);
    for object in ctx.objects() {
        if check_defaults {
            check_block(ctx, &object.decl.defaults);
        }
        check_block(ctx, &object.decl.annotations);
        for field in &object.decl.fields {
            check_block(ctx, &field.annotations);
        }
    }
}

fn check_block(ctx: &mut RuleContext<'_>, block: &[Assignment]) {
    let file = ctx.file();
    let mut seen = HashMap::new();
    for assignment in block {
        let key = assignment.key.as_str();
        if let Some(first) = seen.get(key) {
            ctx.report(DiagnosticKind::AssignmentKeyAlreadyInUse, assignment.key.span)
                .message(key)
                .related_to(file, *first, "first assigned here")
                .emit();
            continue;
        }
        seen.insert(key, assignment.key.span);
    }
}
