//! Config struct definitions and defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration for the codeprompt host.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which nodes the registry loads.
    pub nodes: NodeToggles,

    /// Directory under which ephemeral clones are created.
    ///
    /// `None` uses the system temporary directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_root: Option<PathBuf>,

    /// External prompt service used by the scaffold node.
    pub service: ServiceConfig,
}

/// Per-node load switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeToggles {
    /// Load the repository-to-prompt renderer.
    #[serde(default = "default_true")]
    pub code_to_prompt: bool,

    /// Load the scaffold prompt assembler.
    #[serde(default = "default_true")]
    pub scaffold: bool,
}

impl Default for NodeToggles {
    fn default() -> Self {
        Self {
            code_to_prompt: default_true(),
            scaffold: default_true(),
        }
    }
}

/// How the scaffold node reaches the external prompt service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Command template run once per prompt.
    ///
    /// `{prompt_file}` expands to a file holding the prompt; the prompt is
    /// also written to the command's stdin. `None` echoes the prompt back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Kill the command after this many seconds. `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Extra environment variables for the command.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
}

fn default_true() -> bool {
    true
}
