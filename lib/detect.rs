//! Optional helper tool detection.
//!
//! The pipeline can run without Node tooling on the machine; absence or an
//! unparseable version string only downgrades the build with warnings.

use semver::Version;
use std::path::PathBuf;
use std::process::Command;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A discovered helper tool.
#[derive(Debug, Clone)]
pub struct HelperTool {
    /// Executable name ("node", "npm").
    pub name: &'static str,

    /// Resolved executable path.
    pub path: PathBuf,

    /// Parsed version, when `--version` output was well-formed semver.
    pub version: Option<Version>,

    /// Raw `--version` output, kept for diagnostics.
    pub raw_version: String,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Locate the Node.js runtime.
pub fn detect_node() -> Option<HelperTool> {
    detect_helper("node")
}

/// Locate the npm package manager.
pub fn detect_npm() -> Option<HelperTool> {
    detect_helper("npm")
}

/// Locate a helper on PATH and probe its version.
fn detect_helper(name: &'static str) -> Option<HelperTool> {
    let path = which::which(name).ok()?;

    let raw_version = Command::new(&path)
        .arg("--version")
        .output()
        .ok()
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_default();

    let version = parse_version(&raw_version);
    if version.is_none() {
        tracing::warn!(tool = name, output = %raw_version, "unparseable helper version");
    }

    Some(HelperTool {
        name,
        path,
        version,
        raw_version,
    })
}

/// Parse `--version` output, tolerating a leading `v` prefix.
fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches('v');
    Version::parse(trimmed).ok()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_with_v_prefix() {
        assert_eq!(parse_version("v20.11.1"), Some(Version::new(20, 11, 1)));
    }

    #[test]
    fn test_parse_version_plain() {
        assert_eq!(parse_version("10.2.4\n"), Some(Version::new(10, 2, 4)));
    }

    #[test]
    fn test_parse_version_malformed() {
        assert_eq!(parse_version("not-a-version"), None);
        assert_eq!(parse_version(""), None);
    }
}
