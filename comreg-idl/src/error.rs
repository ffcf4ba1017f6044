use std::{ops::Range, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for IDL operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the scanned text and its filename so error factories only need
/// the span and the message.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>, span: Range<usize>) -> Box<Error> {
        Box::new(Error::MalformedAttributes {
            src: self.named_source(),
            span: span.into(),
            reason: reason.into(),
        })
    }

    pub(crate) fn missing_name(&self, keyword: &'static str, span: Range<usize>) -> Box<Error> {
        Box::new(Error::MissingName {
            src: self.named_source(),
            span: span.into(),
            keyword,
        })
    }

    pub(crate) fn missing_library(&self) -> Box<Error> {
        Box::new(Error::MissingLibrary {
            src: self.named_source(),
        })
    }

    pub(crate) fn duplicate_library(
        &self,
        name: impl Into<String>,
        first: Range<usize>,
        second: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateLibrary {
            src: self.named_source(),
            first: first.into(),
            second: second.into(),
            name: name.into(),
        })
    }

    pub(crate) fn missing_uuid(
        &self,
        kind: &'static str,
        name: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::MissingUuid {
            src: self.named_source(),
            span: span.into(),
            kind,
            name: name.into(),
        })
    }

    pub(crate) fn invalid_uuid(
        &self,
        value: impl Into<String>,
        reason: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::InvalidUuid {
            src: self.named_source(),
            span: span.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub(crate) fn invalid_version(
        &self,
        value: impl Into<String>,
        class: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::InvalidVersion {
            src: self.named_source(),
            span: span.into(),
            value: value.into(),
            class: class.into(),
        })
    }

    pub(crate) fn version_key_not_found(&self, key: impl Into<String>) -> Box<Error> {
        Box::new(Error::VersionKeyNotFound {
            src: self.named_source(),
            key: key.into(),
        })
    }

    pub(crate) fn invalid_version_value(
        &self,
        key: impl Into<String>,
        span: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::InvalidVersionValue {
            src: self.named_source(),
            span: span.into(),
            key: key.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no `library` declaration found")]
    #[diagnostic(
        code(comreg::missing_library),
        help("declare the type library with a uuid attribute, e.g. `[uuid(...)] library MyLib`")
    )]
    MissingLibrary {
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("duplicate `library` declaration '{name}'")]
    #[diagnostic(
        code(comreg::duplicate_library),
        help("registration scripts are generated for a single type library per IDL file")
    )]
    DuplicateLibrary {
        #[source_code]
        src: NamedSource<String>,
        #[label("first library declared here")]
        first: SourceSpan,
        #[label("second library declared here")]
        second: SourceSpan,
        name: String,
    },

    #[error("{kind} '{name}' has no uuid attribute")]
    #[diagnostic(code(comreg::missing_uuid), help("add `uuid(<guid>)` to the attribute block"))]
    MissingUuid {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: SourceSpan,
        kind: &'static str,
        name: String,
    },

    #[error("invalid uuid '{value}'")]
    #[diagnostic(code(comreg::invalid_uuid), help("{reason}"))]
    InvalidUuid {
        #[source_code]
        src: NamedSource<String>,
        #[label("not a uuid")]
        span: SourceSpan,
        value: String,
        reason: String,
    },

    #[error("invalid version '{value}' for coclass '{class}'")]
    #[diagnostic(
        code(comreg::invalid_version),
        help("versions are dotted numbers, e.g. `version(1.0)`")
    )]
    InvalidVersion {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a dotted numeric version")]
        span: SourceSpan,
        value: String,
        class: String,
    },

    #[error("malformed attribute block: {reason}")]
    #[diagnostic(code(comreg::malformed_attributes))]
    MalformedAttributes {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },

    #[error("expected a name after `{keyword}`")]
    #[diagnostic(code(comreg::missing_name))]
    MissingName {
        #[source_code]
        src: NamedSource<String>,
        #[label("declaration without a name")]
        span: SourceSpan,
        keyword: &'static str,
    },

    #[error("'{key}' not found in version source")]
    #[diagnostic(
        code(comreg::version_key_not_found),
        help("the version source must assign both components, e.g. `MYLIB_VERSION_MAJOR = 1,`")
    )]
    VersionKeyNotFound {
        #[source_code]
        src: NamedSource<String>,
        key: String,
    },

    #[error("invalid value for '{key}'")]
    #[diagnostic(code(comreg::invalid_version_value))]
    InvalidVersionValue {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a non-negative integer")]
        span: SourceSpan,
        key: String,
    },
}
