//! Staged-bundle validation.

mod codes;
mod result;
mod validators;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use codes::{ErrorCode, ValidationCode, WarningCode};
pub use result::{ValidationIssue, ValidationResult};
pub use validators::validate_bundle;
