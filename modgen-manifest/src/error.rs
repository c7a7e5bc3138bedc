use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename so error factories only need
/// the details specific to the failure.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    pub fn duplicate_name_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateName {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    pub fn invalid_field_type_error(
        &self,
        model: impl Into<String>,
        field: impl Into<String>,
        ty: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidFieldType {
            src: self.named_source(),
            span,
            model: model.into(),
            field: field.into(),
            ty: ty.into(),
        })
    }

    pub fn invalid_relation_type_error(
        &self,
        model: impl Into<String>,
        field: impl Into<String>,
        kind: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidRelationType {
            src: self.named_source(),
            span,
            model: model.into(),
            field: field.into(),
            kind: kind.into(),
        })
    }

    pub fn unknown_relation_target_error(
        &self,
        model: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownRelationTarget {
            src: self.named_source(),
            span,
            model: model.into(),
            field: field.into(),
            target: target.into(),
        })
    }

    pub fn invalid_parent_error(
        &self,
        model: impl Into<String>,
        parent: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidParent {
            src: self.named_source(),
            span,
            model: model.into(),
            parent: parent.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a modgen.toml or pass --config <path>"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse modgen.toml")]
    #[diagnostic(code(modgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(modgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(modgen::invalid_identifier),
        help(
            "{reason}. Use lowercase letters, digits, '-' and '_', starting with a letter."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("duplicate {context} '{name}'")]
    #[diagnostic(
        code(modgen::duplicate_name),
        help("names must be unique; rename or remove one of the definitions")
    )]
    DuplicateName {
        #[source_code]
        src: NamedSource<String>,
        #[label("defined again here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid type '{ty}' for field '{field}' of model '{model}'")]
    #[diagnostic(
        code(modgen::invalid_type),
        help("valid types are: string, number, boolean, date")
    )]
    InvalidFieldType {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown type")]
        span: Option<SourceSpan>,
        model: String,
        field: String,
        ty: String,
    },

    #[error("invalid relation type '{kind}' for field '{field}' of model '{model}'")]
    #[diagnostic(
        code(modgen::invalid_relation),
        help("valid relation types are: belongsTo, hasMany, manyToMany")
    )]
    InvalidRelationType {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown relation type")]
        span: Option<SourceSpan>,
        model: String,
        field: String,
        kind: String,
    },

    #[error("field '{field}' of model '{model}' relates to unknown model '{target}'")]
    #[diagnostic(
        code(modgen::unknown_relation_target),
        help(
            "declare '{target}' in a module, or list it under [[generator.external_models]]"
        )
    )]
    UnknownRelationTarget {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown model")]
        span: Option<SourceSpan>,
        model: String,
        field: String,
        target: String,
    },

    #[error("invalid parent '{parent}' for model '{model}'")]
    #[diagnostic(code(modgen::invalid_parent), help("{reason}"))]
    InvalidParent {
        #[source_code]
        src: NamedSource<String>,
        #[label("parent declared here")]
        span: Option<SourceSpan>,
        model: String,
        parent: String,
        reason: String,
    },
}
