//! Clean command handler.

use crate::constants::DEFAULT_STAGING_DIR;
use crate::error::BuildResult;
use crate::workspace;
use colored::Colorize;
use std::path::PathBuf;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Remove the staging directory.
pub async fn clean_workspace(path: Option<String>) -> BuildResult<()> {
    let dir = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STAGING_DIR));

    workspace::clean(&dir)?;
    println!(
        "  {} Removed {}",
        "✓".bright_green(),
        dir.display().to_string().bold()
    );
    Ok(())
}
