use nexema_core::Modifier;

use crate::analyze::RuleContext;
use crate::diagnostics::DiagnosticKind;

/// Only structs extend, and only types declared `base` can be extended.
pub(super) fn valid_base_type(ctx: &mut RuleContext<'_>) {
    let tree = ctx.tree();
    for object in ctx.objects() {
        let Some(base) = &object.decl.base_type else {
            continue;
        };

        if object.decl.modifier != Modifier::Struct {
            ctx.report(DiagnosticKind::WrongBaseType, base.span)
                .hint(format!(
                    "only `struct` types can extend another type, `{}` is declared `{}`",
                    object.name, object.decl.modifier
                ))
                .emit();
            continue;
        }

        let Some(resolved) = ctx.get_object(base) else {
            continue;
        };
        if resolved.decl.modifier != Modifier::Base {
            ctx.report(DiagnosticKind::WrongBaseType, base.span)
                .message(base.to_string())
                .related_to(
                    tree.file(resolved.local),
                    resolved.decl.name.span,
                    format!("declared as {} here", resolved.decl.modifier),
                )
                .emit();
        }
    }
}
