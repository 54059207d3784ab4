//! Command handlers.

mod build_cmd;
mod clean_cmd;
mod validate_cmd;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use build_cmd::build_bundle;
pub use clean_cmd::clean_workspace;
pub use validate_cmd::validate_staging;
