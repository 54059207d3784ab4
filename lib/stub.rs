//! Server stub generation.
//!
//! The stub is a pass-through Node process: it reads the configured secret
//! from its environment, spawns the remote proxy CLI with the endpoint and
//! auth header baked in, and bridges the standard streams until the child
//! exits or a termination signal arrives.

use crate::config::BuildConfig;
use crate::constants::{PROXY_PACKAGE, SERVER_ENTRY, credential_target};
use crate::error::BuildResult;
use crate::template::{Fill, Template};
use std::collections::BTreeMap;
use std::path::Path;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Structured template for `server/index.js`. Values are injected through
/// typed fills, never raw interpolation.
const SERVER_STUB_TEMPLATE: Template = Template::new(
    r#"#!/usr/bin/env node
// Generated pass-through server: bridges stdio to a remote MCP endpoint.

const { spawn } = require("node:child_process");

const ENDPOINT = ${ENDPOINT};
const CREDENTIAL_ENV = ${CREDENTIAL_ENV};
const CREDENTIAL_TARGET = ${CREDENTIAL_TARGET};
const PROXY = ${PROXY};

const secret = process.env[CREDENTIAL_ENV];
if (!secret) {
  process.stderr.write(
    "Missing environment variable " + CREDENTIAL_ENV +
      ": the host populates it from credential store entry " +
      CREDENTIAL_TARGET + "\n"
  );
  process.exit(1);
}

const child = spawn(
  "npx",
  ["-y", PROXY, ENDPOINT, "--header", "Authorization:" + secret],
  { stdio: "inherit" }
);

child.on("error", (err) => {
  process.stderr.write("Failed to start " + PROXY + ": " + err.message + "\n");
  process.exit(1);
});

for (const signal of ["SIGINT", "SIGTERM"]) {
  process.on(signal, () => child.kill(signal));
}

child.on("exit", (code, signal) => {
  process.exit(code === null ? (signal ? 1 : 0) : code);
});
"#,
);

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Render the server stub for a configuration and write it to
/// `server/index.js` under the staging root.
pub fn generate_server_stub(config: &BuildConfig, staging: &Path) -> BuildResult<String> {
    let bindings: BTreeMap<&str, Fill> = [
        ("ENDPOINT", Fill::JsString(config.endpoint.to_string())),
        (
            "CREDENTIAL_ENV",
            Fill::JsString(config.credential_key.clone()),
        ),
        (
            "CREDENTIAL_TARGET",
            Fill::JsString(credential_target(&config.name, &config.credential_key)),
        ),
        ("PROXY", Fill::JsString(PROXY_PACKAGE.to_string())),
    ]
    .into_iter()
    .collect();

    let source = SERVER_STUB_TEMPLATE.fill(&bindings)?;

    let path = staging.join(SERVER_ENTRY);
    std::fs::write(&path, &source)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(source)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SERVER_DIR;
    use tempfile::TempDir;
    use url::Url;

    fn test_config() -> BuildConfig {
        BuildConfig::resolve()
            .unwrap()
            .with_endpoint(Url::parse("https://example.test/mcp").unwrap())
            .with_credential_key("AUTH_HEADER_DEV")
    }

    fn staged() -> TempDir {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join(SERVER_DIR)).unwrap();
        tmp
    }

    #[test]
    fn test_stub_bakes_in_endpoint_and_env_var() {
        let tmp = staged();
        let source = generate_server_stub(&test_config(), tmp.path()).unwrap();

        assert!(source.contains("\"https://example.test/mcp\""));
        assert!(source.contains("\"AUTH_HEADER_DEV\""));
        assert!(source.contains("process.env[CREDENTIAL_ENV]"));
        assert!(source.contains("process.exit(1)"));
        assert!(tmp.path().join(SERVER_ENTRY).exists());
    }

    #[test]
    fn test_stub_names_credential_store_target() {
        let tmp = staged();
        let source = generate_server_stub(&test_config(), tmp.path()).unwrap();

        assert!(source.contains("\"mcpb/remote-mcp/AUTH_HEADER_DEV\""));
    }

    #[test]
    fn test_stub_forwards_termination_signals() {
        let tmp = staged();
        let source = generate_server_stub(&test_config(), tmp.path()).unwrap();

        assert!(source.contains("SIGINT"));
        assert!(source.contains("SIGTERM"));
        assert!(source.contains("child.kill(signal)"));
    }

    #[test]
    fn test_hostile_credential_key_is_escaped() {
        let tmp = staged();
        let config = test_config().with_credential_key("EVIL\"];process.exit(0);//");
        let source = generate_server_stub(&config, tmp.path()).unwrap();

        // The quote must be escaped, not terminate the literal.
        assert!(source.contains(r#""EVIL\"];process.exit(0);//""#));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let tmp = staged();
        let first = generate_server_stub(&test_config(), tmp.path()).unwrap();
        let second = generate_server_stub(&test_config(), tmp.path()).unwrap();
        assert_eq!(first, second);
    }
}
