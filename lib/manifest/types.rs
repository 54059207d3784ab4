//! Manifest descriptor type definitions.
//!
//! These types are the compatibility surface consumed by host applications;
//! key order is stable (struct field order plus `BTreeMap`) so repeated
//! builds serialize byte-identically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The manifest descriptor written to `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestDescriptor {
    /// Manifest schema version.
    pub manifest_version: String,

    /// Bundle name.
    pub name: String,

    /// Display name shown by host applications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Bundle version.
    pub version: String,

    /// Bundle description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Author information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    /// Server launch configuration.
    pub server: ServerConfig,

    /// Declared tools, in catalog order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDecl>,

    /// Declared resources, in catalog order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceDecl>,

    /// User-configurable properties, keyed by property name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_config: BTreeMap<String, UserConfigField>,

    /// Hostname allow-list (wildcard patterns permitted).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_hosts: Vec<String>,

    /// Compatibility floors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<Compatibility>,
}

/// Author information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Author name.
    pub name: String,

    /// Author email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Server launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server runtime type.
    #[serde(rename = "type")]
    pub server_type: ServerType,

    /// Transport between host and server.
    #[serde(default, skip_serializing_if = "Transport::is_stdio")]
    pub transport: Transport,

    /// Path to the entry point file within the bundle.
    pub entry_point: String,

    /// Launch command, args, and env template.
    pub mcp_config: McpConfig,
}

/// Launch command configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    /// Command to execute.
    pub command: String,

    /// Command arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Environment template. Values may reference user-config properties
    /// as `${user_config.<key>}`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// Server runtime type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    /// Node.js runtime.
    #[default]
    Node,
}

/// Transport between host and server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Standard input/output transport.
    #[default]
    Stdio,
    /// HTTP transport.
    Http,
}

/// Declared tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDecl {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
}

/// Declared resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDecl {
    /// Resource name.
    pub name: String,
    /// Resource description.
    pub description: String,
}

/// User-configurable property definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfigField {
    /// Property type.
    #[serde(rename = "type")]
    pub field_type: UserConfigType,

    /// Display title.
    pub title: String,

    /// Property description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the host must collect a value before launch.
    pub required: bool,

    /// Whether the value is a secret.
    pub sensitive: bool,
}

/// User config property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserConfigType {
    /// String value.
    String,
    /// Numeric value.
    Number,
    /// Boolean value.
    Boolean,
}

/// Compatibility floors for host application and runtimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compatibility {
    /// Minimum host application version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Runtime version requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtimes: Option<Runtimes>,
}

/// Runtime version requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runtimes {
    /// Node.js version requirement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Transport {
    /// Check if this is stdio transport (for skip_serializing_if).
    pub fn is_stdio(&self) -> bool {
        matches!(self, Transport::Stdio)
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Stdio => write!(f, "stdio"),
            Transport::Http => write!(f, "http"),
        }
    }
}
