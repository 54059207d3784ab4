//! Manifest descriptor generation.

mod types;

pub use types::{
    Author, Compatibility, ManifestDescriptor, McpConfig, ResourceDecl, Runtimes, ServerConfig,
    ServerType, ToolDecl, Transport, UserConfigField, UserConfigType,
};

use crate::config::{BuildConfig, Capability};
use crate::constants::{MANIFEST_FILE, SERVER_ENTRY};
use crate::error::{BuildError, BuildResult};
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Manifest schema version this generator produces.
pub const MANIFEST_VERSION: &str = "0.3";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Build the manifest descriptor for a configuration and write it to
/// `manifest.json` under the staging root.
///
/// The single user-config property is named after the credential key and is
/// referenced from the launch env template, so the "every declared property
/// is referenced" invariant holds by construction.
pub fn generate_manifest(config: &BuildConfig, staging: &Path) -> BuildResult<ManifestDescriptor> {
    check_unique_names("tool", &config.tools)?;
    check_unique_names("resource", &config.resources)?;

    let mut user_config = BTreeMap::new();
    user_config.insert(
        config.credential_key.clone(),
        UserConfigField {
            field_type: UserConfigType::String,
            title: "Authorization header".to_string(),
            description: Some(format!(
                "Bearer header sent to {} on every request",
                config.endpoint
            )),
            required: true,
            sensitive: true,
        },
    );

    let mut env = BTreeMap::new();
    env.insert(
        config.credential_key.clone(),
        user_config_reference(&config.credential_key),
    );

    let descriptor = ManifestDescriptor {
        manifest_version: MANIFEST_VERSION.to_string(),
        name: config.name.clone(),
        display_name: Some(config.display_name.clone()),
        version: config.version.clone(),
        description: Some(format!("Remote MCP tools served from {}", config.endpoint)),
        author: None,
        server: ServerConfig {
            server_type: ServerType::Node,
            transport: config.transport,
            entry_point: SERVER_ENTRY.to_string(),
            mcp_config: McpConfig {
                command: "node".to_string(),
                args: vec![format!("${{__dirname}}/{}", SERVER_ENTRY)],
                env,
            },
        },
        tools: config
            .tools
            .iter()
            .map(|c| ToolDecl {
                name: c.name.clone(),
                description: c.description.clone(),
            })
            .collect(),
        resources: config
            .resources
            .iter()
            .map(|c| ResourceDecl {
                name: c.name.clone(),
                description: c.description.clone(),
            })
            .collect(),
        user_config,
        allowed_hosts: config.allowed_hosts.clone(),
        compatibility: Some(Compatibility {
            host: Some(config.min_host_version.clone()),
            runtimes: Some(Runtimes {
                node: Some(config.min_node_version.clone()),
            }),
        }),
    };

    let json = serde_json::to_string_pretty(&descriptor)?;
    std::fs::write(staging.join(MANIFEST_FILE), json + "\n")?;

    Ok(descriptor)
}

/// The `${user_config.<key>}` reference used in launch env templates.
pub fn user_config_reference(key: &str) -> String {
    format!("${{user_config.{}}}", key)
}

/// Fail on the first duplicate name within a capability catalog.
fn check_unique_names(kind: &'static str, catalog: &[Capability]) -> BuildResult<()> {
    let mut seen = BTreeSet::new();
    for capability in catalog {
        if !seen.insert(capability.name.as_str()) {
            return Err(BuildError::DuplicateCapability {
                kind,
                name: capability.name.clone(),
            });
        }
    }
    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use url::Url;

    fn test_config(staging: &Path) -> BuildConfig {
        BuildConfig::resolve()
            .unwrap()
            .with_endpoint(Url::parse("https://example.test/mcp").unwrap())
            .with_credential_key("AUTH_HEADER_DEV")
            .with_staging_dir(staging)
    }

    #[test]
    fn test_generate_writes_manifest_file() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());

        let descriptor = generate_manifest(&config, tmp.path()).unwrap();

        assert!(tmp.path().join(MANIFEST_FILE).exists());
        assert_eq!(descriptor.manifest_version, MANIFEST_VERSION);
        assert_eq!(descriptor.server.entry_point, SERVER_ENTRY);
    }

    #[test]
    fn test_tool_order_is_preserved() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());

        let descriptor = generate_manifest(&config, tmp.path()).unwrap();

        let names: Vec<_> = descriptor.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["list_nodes", "search_nodes"]);
    }

    #[test]
    fn test_credential_property_is_required_and_sensitive() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());

        let descriptor = generate_manifest(&config, tmp.path()).unwrap();

        let field = descriptor.user_config.get("AUTH_HEADER_DEV").unwrap();
        assert!(field.required);
        assert!(field.sensitive);

        // The env template must reference the declared property.
        let env_value = descriptor
            .server
            .mcp_config
            .env
            .get("AUTH_HEADER_DEV")
            .unwrap();
        assert_eq!(env_value, "${user_config.AUTH_HEADER_DEV}");
    }

    #[test]
    fn test_duplicate_tool_name_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path()).with_tools(vec![
            Capability::new("list_nodes", "first"),
            Capability::new("list_nodes", "second"),
        ]);

        let result = generate_manifest(&config, tmp.path());
        assert!(matches!(
            result,
            Err(BuildError::DuplicateCapability { kind: "tool", .. })
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());

        generate_manifest(&config, tmp.path()).unwrap();
        let first = std::fs::read(tmp.path().join(MANIFEST_FILE)).unwrap();

        generate_manifest(&config, tmp.path()).unwrap();
        let second = std::fs::read(tmp.path().join(MANIFEST_FILE)).unwrap();

        assert_eq!(first, second);
    }
}
