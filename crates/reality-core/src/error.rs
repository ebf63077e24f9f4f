use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, RealityError>;

/// Errors that abort a provisioning run.
///
/// Every variant is fatal: either both documents and the URI are produced
/// consistently, or nothing is persisted.
#[derive(Error, Debug)]
pub enum RealityError {
    /// A user-supplied override is unusable (half of a pair, bad format)
    #[error("invalid override for {field}: {reason}")]
    InvalidOverride {
        /// Name of the offending input field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// An identity generator returned empty or malformed material
    #[error("failed to generate {what}: {reason}")]
    GenerationFailed {
        /// Which piece of identity material was being generated
        what: &'static str,
        /// Generator-specific failure description
        reason: String,
    },

    /// Template file does not exist
    #[error("template not found: {}", path.display())]
    TemplateNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Template file is not a well-formed JSON document
    #[error("template {} is malformed: {reason}", path.display())]
    TemplateMalformed {
        /// Path of the template (or `<builtin:...>` for embedded templates)
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A synthesis mutation target is missing from the template
    #[error("template path not found: {path}")]
    TemplatePathNotFound {
        /// Human-readable address of the missing node
        path: String,
    },

    /// Destination could not be written
    #[error("failed to write {}: {source}", path.display())]
    OutputWriteFailed {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A connection URI could not be parsed back into its parts
    #[error("invalid share link: {0}")]
    InvalidShareLink(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid runtime configuration (bad candidate list, bad layout)
    #[error("configuration error: {0}")]
    Config(String),
}

impl RealityError {
    /// Shorthand for an [`RealityError::InvalidOverride`]
    pub fn invalid_override(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOverride {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`RealityError::GenerationFailed`]
    pub fn generation_failed(what: &'static str, reason: impl Into<String>) -> Self {
        Self::GenerationFailed {
            what,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`RealityError::TemplatePathNotFound`]
    pub fn path_not_found(path: impl Into<String>) -> Self {
        Self::TemplatePathNotFound { path: path.into() }
    }

    /// Returns true if the error came from loading or walking a template
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(
            self,
            Self::TemplateNotFound { .. }
                | Self::TemplateMalformed { .. }
                | Self::TemplatePathNotFound { .. }
        )
    }

    /// Returns true if the error is caused by user input rather than the environment
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidOverride { .. } | Self::InvalidShareLink(_) | Self::Config(_)
        )
    }

    /// Stable machine-readable name of the error kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOverride { .. } => "invalid_override",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::TemplateNotFound { .. } => "template_not_found",
            Self::TemplateMalformed { .. } => "template_malformed",
            Self::TemplatePathNotFound { .. } => "template_path_not_found",
            Self::OutputWriteFailed { .. } => "output_write_failed",
            Self::InvalidShareLink(_) => "invalid_share_link",
            Self::Json(_) => "json",
            Self::Config(_) => "config",
        }
    }
}
