//! Validation error and warning codes.

use serde::Serialize;
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Validation error codes.
///
/// These represent errors that always cause validation to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// E000: Staging directory not found.
    #[serde(rename = "E000")]
    StagingNotFound,

    /// E001: A required artifact is missing from the staging tree.
    #[serde(rename = "E001")]
    ArtifactMissing,

    /// E002: Invalid JSON syntax or unreadable file.
    #[serde(rename = "E002")]
    InvalidJson,
}

/// Validation warning codes.
///
/// These indicate suspicious but non-fatal conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningCode {
    /// W001: The server stub exists but is empty.
    #[serde(rename = "W001")]
    EmptyServerStub,
}

/// A validation code that can be either an error or warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationCode {
    /// An error code.
    Error(ErrorCode),
    /// A warning code.
    Warning(WarningCode),
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::StagingNotFound => "E000",
            ErrorCode::ArtifactMissing => "E001",
            ErrorCode::InvalidJson => "E002",
        };
        write!(f, "{}", code)
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            WarningCode::EmptyServerStub => "W001",
        };
        write!(f, "{}", code)
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCode::Error(e) => write!(f, "{}", e),
            ValidationCode::Warning(w) => write!(f, "{}", w),
        }
    }
}

impl From<ErrorCode> for ValidationCode {
    fn from(code: ErrorCode) -> Self {
        ValidationCode::Error(code)
    }
}

impl From<WarningCode> for ValidationCode {
    fn from(code: WarningCode) -> Self {
        ValidationCode::Warning(code)
    }
}
