//! Constants for mcpb-build.
//!
//! Artifact names, environment variables, and the literal defaults the
//! configuration resolver falls back to.

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The manifest file name inside the staging tree.
pub const MANIFEST_FILE: &str = "manifest.json";

/// The package descriptor file name inside the staging tree.
pub const PACKAGE_FILE: &str = "package.json";

/// Subdirectory for the generated server stub.
pub const SERVER_DIR: &str = "server";

/// The server stub path relative to the staging root.
pub const SERVER_ENTRY: &str = "server/index.js";

/// Provenance record written into the bundle during packaging.
pub const BUILD_INFO_FILE: &str = "build-info.json";

/// Artifacts that must exist before packaging, in report order.
pub const REQUIRED_ARTIFACTS: &[&str] = &[MANIFEST_FILE, PACKAGE_FILE, SERVER_ENTRY];

/// Environment variable holding the release version tag.
pub const RELEASE_TAG_ENV: &str = "RELEASE_TAG";

/// Version used when no release tag is supplied.
pub const DEV_VERSION: &str = "0.0.0-dev";

/// Default bundle name.
pub const DEFAULT_NAME: &str = "remote-mcp";

/// Default display name shown by host applications.
pub const DEFAULT_DISPLAY_NAME: &str = "Remote MCP";

/// Default remote MCP endpoint baked into the stub.
pub const DEFAULT_ENDPOINT: &str = "https://mcp.example.com/mcp";

/// Default environment variable the stub reads its bearer header from.
pub const DEFAULT_CREDENTIAL_KEY: &str = "MCP_AUTH_HEADER";

/// Default staging directory, relative to the working directory.
pub const DEFAULT_STAGING_DIR: &str = "staging";

/// Default publish directory for the final bundle.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// npm package the stub spawns to bridge stdio to the remote endpoint.
pub const PROXY_PACKAGE: &str = "mcp-remote";

/// Version range declared for the proxy dependency.
pub const PROXY_VERSION_RANGE: &str = "^0.1.0";

/// Minimum host application version the bundle declares.
pub const MIN_HOST_VERSION: &str = ">=0.10.0";

/// Minimum Node.js version for the stub and the package descriptor.
pub const MIN_NODE_VERSION: &str = ">=18.0.0";

/// Namespace prefix for credential-store target names.
pub const CREDENTIAL_NAMESPACE: &str = "mcpb";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Build the credential-store target name for an app/key pair.
///
/// The companion setup utility stores the secret under this name; the stub's
/// failure diagnostic points the user at it.
pub fn credential_target(app_name: &str, credential_key: &str) -> String {
    format!("{}/{}/{}", CREDENTIAL_NAMESPACE, app_name, credential_key)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_target_format() {
        assert_eq!(
            credential_target("remote-mcp", "MCP_AUTH_HEADER"),
            "mcpb/remote-mcp/MCP_AUTH_HEADER"
        );
    }
}
