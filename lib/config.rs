//! Build configuration resolution.
//!
//! A [`BuildConfig`] is assembled once at the start of a build from literal
//! defaults plus the release-tag environment variable, and never mutated
//! afterwards. Resolution performs no I/O beyond environment reads.

use crate::constants::{
    DEFAULT_CREDENTIAL_KEY, DEFAULT_DISPLAY_NAME, DEFAULT_DIST_DIR, DEFAULT_ENDPOINT, DEFAULT_NAME,
    DEFAULT_STAGING_DIR, DEV_VERSION, MIN_HOST_VERSION, MIN_NODE_VERSION, RELEASE_TAG_ENV,
};
use crate::error::BuildResult;
use crate::manifest::Transport;
use std::path::PathBuf;
use url::Url;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A declared capability: a named tool or resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// Capability name, unique within its catalog.
    pub name: String,

    /// Human-readable description.
    pub description: String,
}

/// Immutable configuration for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Bundle name (identity, package name, credential target).
    pub name: String,

    /// Display name shown by host applications.
    pub display_name: String,

    /// Resolved version: release tag or the dev fallback.
    pub version: String,

    /// Remote MCP endpoint the stub connects to.
    pub endpoint: Url,

    /// Transport the generated server declares.
    pub transport: Transport,

    /// Environment variable the stub reads its secret from. Also the name
    /// of the single user-config property the manifest declares.
    pub credential_key: String,

    /// Declared tools, in catalog order.
    pub tools: Vec<Capability>,

    /// Declared resources, in catalog order.
    pub resources: Vec<Capability>,

    /// Hostname allow-list (wildcard patterns permitted).
    pub allowed_hosts: Vec<String>,

    /// Minimum host application version.
    pub min_host_version: String,

    /// Minimum Node.js version.
    pub min_node_version: String,

    /// Staging directory the artifacts are written into.
    pub staging_dir: PathBuf,

    /// File name of the final bundle within staging.
    pub output_name: String,

    /// Publish directory the bundle is copied to.
    pub dist_dir: PathBuf,

    /// Skip dependency installation (no network access).
    pub offline: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Capability {
    /// Create a capability from a name/description pair.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl BuildConfig {
    /// Resolve the configuration from literal defaults and the environment.
    ///
    /// The version comes from `RELEASE_TAG` when set and non-empty, falling
    /// back to the dev tag. Everything else is a fixed constant for a given
    /// build.
    pub fn resolve() -> BuildResult<Self> {
        let version = std::env::var(RELEASE_TAG_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEV_VERSION.to_string());

        let endpoint = Url::parse(DEFAULT_ENDPOINT)?;
        let allowed_hosts = endpoint
            .host_str()
            .map(|h| vec![h.to_string()])
            .unwrap_or_default();

        Ok(Self {
            name: DEFAULT_NAME.to_string(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            output_name: format!("{}-{}.mcpb", DEFAULT_NAME, version),
            version,
            endpoint,
            transport: Transport::Stdio,
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            tools: vec![
                Capability::new("list_nodes", "List available workflow nodes"),
                Capability::new("search_nodes", "Search workflow nodes by keyword"),
            ],
            resources: Vec::new(),
            allowed_hosts,
            min_host_version: MIN_HOST_VERSION.to_string(),
            min_node_version: MIN_NODE_VERSION.to_string(),
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
            offline: false,
        })
    }

    /// Set the bundle name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the remote endpoint.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.allowed_hosts = endpoint
            .host_str()
            .map(|h| vec![h.to_string()])
            .unwrap_or_default();
        self.endpoint = endpoint;
        self
    }

    /// Set the credential key.
    pub fn with_credential_key(mut self, key: impl Into<String>) -> Self {
        self.credential_key = key.into();
        self
    }

    /// Replace the tool catalog.
    pub fn with_tools(mut self, tools: Vec<Capability>) -> Self {
        self.tools = tools;
        self
    }

    /// Set the staging directory.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Set the publish directory.
    pub fn with_dist_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dist_dir = dir.into();
        self
    }

    /// Set the output file name.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Set the offline flag.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        // RELEASE_TAG is not set in the test environment by default.
        let config = BuildConfig::resolve().unwrap();
        assert_eq!(config.name, DEFAULT_NAME);
        assert_eq!(config.transport, Transport::Stdio);
        assert_eq!(config.credential_key, DEFAULT_CREDENTIAL_KEY);
        assert_eq!(config.tools.len(), 2);
        assert!(!config.offline);
        assert!(config.output_name.ends_with(".mcpb"));
    }

    #[test]
    fn test_with_endpoint_updates_allowed_hosts() {
        let config = BuildConfig::resolve()
            .unwrap()
            .with_endpoint(Url::parse("https://example.test/mcp").unwrap());
        assert_eq!(config.endpoint.as_str(), "https://example.test/mcp");
        assert_eq!(config.allowed_hosts, vec!["example.test".to_string()]);
    }

    #[test]
    fn test_builder_chain() {
        let config = BuildConfig::resolve()
            .unwrap()
            .with_name("demo")
            .with_credential_key("AUTH_HEADER_DEV")
            .with_offline(true);
        assert_eq!(config.name, "demo");
        assert_eq!(config.credential_key, "AUTH_HEADER_DEV");
        assert!(config.offline);
    }
}
