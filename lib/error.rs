//! Error types for mcpb-build.

use std::path::PathBuf;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for mcpb-build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Error type for mcpb-build operations.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Zip error.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Walkdir error.
    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path strip error.
    #[error("Path error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Endpoint URL is malformed.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Version string is not valid semver.
    #[error("Invalid version: {0}")]
    InvalidVersion(#[from] semver::Error),

    /// A capability name appears more than once in its catalog.
    #[error("Duplicate {kind} name: {name}")]
    DuplicateCapability {
        /// Catalog kind ("tool" or "resource").
        kind: &'static str,
        /// The offending name.
        name: String,
    },

    /// A template placeholder has no binding.
    #[error("Undefined placeholder: {0}")]
    UndefinedPlaceholder(String),

    /// A required artifact could not be read during packaging.
    #[error("Cannot read artifact {path}: {source}")]
    ArtifactRead {
        /// Path relative to the staging root.
        path: PathBuf,
        /// Underlying read error.
        source: std::io::Error,
    },

    /// Workspace reset failed.
    #[error("Workspace error at {path}: {source}")]
    Workspace {
        /// The staging path being reset.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },

    /// Dependency installation failed once attempted.
    #[error("Install failed: `{command}`: {reason}")]
    InstallFailed {
        /// The command line that was run.
        command: String,
        /// Spawn error or non-zero exit description.
        reason: String,
    },

    /// Bundle validation failed.
    #[error("Validation failed")]
    ValidationFailed(crate::validate::ValidationResult),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<anyhow::Error> for BuildError {
    fn from(err: anyhow::Error) -> Self {
        BuildError::Generic(err.to_string())
    }
}
