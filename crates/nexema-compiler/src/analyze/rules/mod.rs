//! The rule table.
//!
//! Every rule has a stable key used by [`CompilerConfig`](crate::config::CompilerConfig)
//! to disable it or downgrade it to a warning. Required rules accept neither.

mod annotations;
mod base_type;
mod defaults;
mod field_index;
mod fields;
mod value_types;

use nexema_core::{Primitive, ValueTypeStmt};

use super::RuleContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKind {
    ValidBaseType,
    UniqueFieldName,
    FieldIndex,
    FieldShape,
    NonNullableUnionField,
    ValidFieldType,
    ValidListArguments,
    ValidMapArguments,
    DefaultValueValidField,
    UniqueDefaultValue,
    ValidDefaultValueType,
    ValidAnnotationValue,
    AssignmentKeyUnique,
}

impl RuleKind {
    pub const ALL: [RuleKind; 13] = [
        RuleKind::ValidBaseType,
        RuleKind::UniqueFieldName,
        RuleKind::FieldIndex,
        RuleKind::FieldShape,
        RuleKind::NonNullableUnionField,
        RuleKind::ValidFieldType,
        RuleKind::ValidListArguments,
        RuleKind::ValidMapArguments,
        RuleKind::DefaultValueValidField,
        RuleKind::UniqueDefaultValue,
        RuleKind::ValidDefaultValueType,
        RuleKind::ValidAnnotationValue,
        RuleKind::AssignmentKeyUnique,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RuleKind::ValidBaseType => "valid-base-type",
            RuleKind::UniqueFieldName => "unique-field-name",
            RuleKind::FieldIndex => "field-index",
            RuleKind::FieldShape => "field-shape",
            RuleKind::NonNullableUnionField => "non-nullable-union-field",
            RuleKind::ValidFieldType => "valid-field-type",
            RuleKind::ValidListArguments => "valid-list-arguments",
            RuleKind::ValidMapArguments => "valid-map-arguments",
            RuleKind::DefaultValueValidField => "default-value-valid-field",
            RuleKind::UniqueDefaultValue => "unique-default-value",
            RuleKind::ValidDefaultValueType => "valid-default-value-type",
            RuleKind::ValidAnnotationValue => "valid-annotation-value",
            RuleKind::AssignmentKeyUnique => "assignment-key-unique",
        }
    }

    /// Rules the snapshot builder relies on. These always run as errors.
    pub fn is_required(self) -> bool {
        matches!(
            self,
            RuleKind::ValidBaseType
                | RuleKind::FieldIndex
                | RuleKind::FieldShape
                | RuleKind::ValidFieldType
                | RuleKind::ValidListArguments
                | RuleKind::ValidMapArguments
        )
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.key() == key)
    }

    /// Run the rule over the file the context is scoped to.
    pub fn check(self, ctx: &mut RuleContext<'_>) {
        match self {
            RuleKind::ValidBaseType => base_type::valid_base_type(ctx),
            RuleKind::UniqueFieldName => fields::unique_field_name(ctx),
            RuleKind::FieldIndex => field_index::field_index(ctx),
            RuleKind::FieldShape => fields::field_shape(ctx),
            RuleKind::NonNullableUnionField => fields::non_nullable_union_field(ctx),
            RuleKind::ValidFieldType => value_types::valid_field_type(ctx),
            RuleKind::ValidListArguments => value_types::valid_list_arguments(ctx),
            RuleKind::ValidMapArguments => value_types::valid_map_arguments(ctx),
            RuleKind::DefaultValueValidField => defaults::default_value_valid_field(ctx),
            RuleKind::UniqueDefaultValue => defaults::unique_default_value(ctx),
            RuleKind::ValidDefaultValueType => defaults::valid_default_value_type(ctx),
            RuleKind::ValidAnnotationValue => annotations::valid_annotation_value(ctx),
            RuleKind::AssignmentKeyUnique => annotations::assignment_key_unique(ctx),
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The primitive a value type names, if it is an unqualified primitive keyword.
pub(crate) fn primitive_of(vt: &ValueTypeStmt) -> Option<Primitive> {
    if vt.ident.alias.is_some() {
        return None;
    }
    Primitive::parse(&vt.ident.name)
}
