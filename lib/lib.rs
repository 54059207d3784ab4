//! `mcpb-build` library.

pub mod commands;
pub mod config;
pub mod constants;
pub mod detect;
pub mod error;
pub mod handlers;
pub mod manifest;
pub mod pack;
pub mod package;
pub mod pipeline;
pub mod stub;
pub mod template;
pub mod validate;
pub mod workspace;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use commands::*;
pub use config::*;
pub use constants::*;
pub use detect::*;
pub use error::*;
pub use handlers::*;
pub use manifest::*;
pub use pack::*;
pub use package::*;
pub use pipeline::*;
pub use validate::*;
