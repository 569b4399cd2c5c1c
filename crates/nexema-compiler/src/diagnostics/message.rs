use nexema_core::{FileRef, Span};

/// Diagnostic kinds, linker kinds first, then analyzer rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Namespace is not well-formed
    AlreadyDefined,
    SelfImport,
    PackageNotFound,
    CircularDependency,
    AliasAlreadyDefined,
    DuplicateImport,
    NeedAlias,
    TypeNotFound,

    // Type declaration shape
    WrongBaseType,
    DuplicatedFieldName,
    DuplicatedFieldIndex,
    InvalidFieldIndex,
    EnumShouldBeZeroBased,
    EnumShouldBeSubsequent,
    NonNullableUnionFields,
    MissingFieldType,
    UnexpectedFieldType,

    // Value types
    IllegalUseCycle,
    WrongArgumentsLen,
    WrongArguments,

    // Defaults and annotations
    DefaultValueValidField,
    DuplicatedDefaultValue,
    WrongDefaultValue,
    WrongAnnotationValue,
    AssignmentKeyAlreadyInUse,
}

impl DiagnosticKind {
    /// Default severity for this kind. Rule policy may downgrade it.
    pub fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether the linker, rather than an analyzer rule, reports this kind.
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyDefined
                | Self::SelfImport
                | Self::PackageNotFound
                | Self::CircularDependency
                | Self::AliasAlreadyDefined
                | Self::DuplicateImport
                | Self::NeedAlias
                | Self::TypeNotFound
        )
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::NeedAlias => Some("import the packages under an alias, e.g. `use \"pkg\" as p`"),
            Self::CircularDependency => Some("packages cannot import each other"),
            Self::NonNullableUnionFields => Some("a union has exactly one field set at a time"),
            _ => None,
        }
    }

    /// Base message for this kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::AlreadyDefined => "name is already defined",
            Self::SelfImport => "package cannot import itself",
            Self::PackageNotFound => "package not found",
            Self::CircularDependency => "circular dependency",
            Self::AliasAlreadyDefined => "alias is already in use",
            Self::DuplicateImport => "package is imported more than once",
            Self::NeedAlias => "ambiguous type reference",
            Self::TypeNotFound => "type not found",

            Self::WrongBaseType => "invalid base type",
            Self::DuplicatedFieldName => "duplicated field name",
            Self::DuplicatedFieldIndex => "duplicated field index",
            Self::InvalidFieldIndex => "invalid field index",
            Self::EnumShouldBeZeroBased => "enum indexes must start at 0",
            Self::EnumShouldBeSubsequent => "enum indexes must be subsequent",
            Self::NonNullableUnionFields => "union fields cannot be nullable",
            Self::MissingFieldType => "field requires a value type",
            Self::UnexpectedFieldType => "enum members cannot have a value type",

            Self::IllegalUseCycle => "type cannot reference itself",
            Self::WrongArgumentsLen => "wrong number of type arguments",
            Self::WrongArguments => "invalid type argument",

            Self::DefaultValueValidField => "default value for an unknown field",
            Self::DuplicatedDefaultValue => "duplicated default value",
            Self::WrongDefaultValue => "default value does not match the field type",
            Self::WrongAnnotationValue => "annotation value must be a scalar",
            Self::AssignmentKeyAlreadyInUse => "key is already in use",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::AlreadyDefined => "`{}` is already defined".to_string(),
            Self::SelfImport => "package `{}` cannot import itself".to_string(),
            Self::PackageNotFound => "package `{}` not found".to_string(),
            Self::CircularDependency => "circular dependency between {}".to_string(),
            Self::AliasAlreadyDefined => "alias `{}` is already in use".to_string(),
            Self::DuplicateImport => "package `{}` is imported more than once".to_string(),
            Self::NeedAlias => "`{}` is declared in more than one imported package".to_string(),
            Self::TypeNotFound => "type `{}` not found".to_string(),

            Self::WrongBaseType => "`{}` is not a base type".to_string(),
            Self::DuplicatedFieldName => "field `{}` is already declared".to_string(),
            Self::DuplicatedFieldIndex => "field index {} is already in use".to_string(),
            Self::NonNullableUnionFields => "union field `{}` cannot be nullable".to_string(),
            Self::MissingFieldType => "field `{}` requires a value type".to_string(),
            Self::UnexpectedFieldType => "enum member `{}` cannot have a value type".to_string(),

            Self::IllegalUseCycle => "`{}` cannot reference itself".to_string(),

            Self::DefaultValueValidField => "`{}` is not a field of this type".to_string(),
            Self::DuplicatedDefaultValue => "field `{}` already has a default value".to_string(),
            Self::WrongAnnotationValue => {
                "annotation `{}` must be a string, int, float or bool".to_string()
            }
            Self::AssignmentKeyAlreadyInUse => "key `{}` is already in use".to_string(),

            // Standard pattern: fallback + context
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A secondary location attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) file: FileRef,
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(file: FileRef, span: Span, message: impl Into<String>) -> Self {
        Self {
            file,
            span,
            message: message.into(),
        }
    }

    pub fn file(&self) -> &FileRef {
        &self.file
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    /// Which source file this diagnostic belongs to.
    pub(crate) file: FileRef,
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        file: FileRef,
        kind: DiagnosticKind,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            file,
            span,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(file: FileRef, kind: DiagnosticKind, span: Span) -> Self {
        Self::new(file, kind, span, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn file(&self) -> &FileRef {
        &self.file
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} at {}:{}:{}",
            self.severity, self.message, self.file, self.span.start.line, self.span.start.column
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}:{}:{})",
                related.message, related.file, related.span.start.line, related.span.start.column
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
