//! Package descriptor generation.
//!
//! `package.json` declares the stub's entry point, its single external
//! dependency (the remote proxy CLI), and the minimum Node version.

use crate::config::BuildConfig;
use crate::constants::{PACKAGE_FILE, PROXY_PACKAGE, PROXY_VERSION_RANGE, SERVER_ENTRY};
use crate::error::BuildResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The package descriptor written to `package.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Package name.
    pub name: String,

    /// Package version.
    pub version: String,

    /// Entry point path.
    pub main: String,

    /// External dependencies (name to version range).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,

    /// Runtime version requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engines: Option<Engines>,
}

/// Runtime engine requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engines {
    /// Node.js version requirement.
    pub node: String,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Build the package descriptor and write it to `package.json` under the
/// staging root.
pub fn generate_package(config: &BuildConfig, staging: &Path) -> BuildResult<PackageDescriptor> {
    let mut dependencies = BTreeMap::new();
    dependencies.insert(PROXY_PACKAGE.to_string(), PROXY_VERSION_RANGE.to_string());

    let descriptor = PackageDescriptor {
        name: config.name.clone(),
        version: config.version.clone(),
        main: SERVER_ENTRY.to_string(),
        dependencies,
        engines: Some(Engines {
            node: config.min_node_version.clone(),
        }),
    };

    let json = serde_json::to_string_pretty(&descriptor)?;
    std::fs::write(staging.join(PACKAGE_FILE), json + "\n")?;

    Ok(descriptor)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_package_file() {
        let tmp = TempDir::new().unwrap();
        let config = BuildConfig::resolve().unwrap();

        let descriptor = generate_package(&config, tmp.path()).unwrap();

        assert!(tmp.path().join(PACKAGE_FILE).exists());
        assert_eq!(descriptor.main, SERVER_ENTRY);
        assert_eq!(
            descriptor.dependencies.get(PROXY_PACKAGE),
            Some(&PROXY_VERSION_RANGE.to_string())
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let config = BuildConfig::resolve().unwrap();

        generate_package(&config, tmp.path()).unwrap();
        let first = std::fs::read(tmp.path().join(PACKAGE_FILE)).unwrap();

        generate_package(&config, tmp.path()).unwrap();
        let second = std::fs::read(tmp.path().join(PACKAGE_FILE)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trips_as_json() {
        let tmp = TempDir::new().unwrap();
        let config = BuildConfig::resolve().unwrap();

        generate_package(&config, tmp.path()).unwrap();

        let content = std::fs::read_to_string(tmp.path().join(PACKAGE_FILE)).unwrap();
        let parsed: PackageDescriptor = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.name, config.name);
        assert_eq!(parsed.engines.unwrap().node, config.min_node_version);
    }
}
