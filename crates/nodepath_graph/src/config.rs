// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tool configuration, stored as RON.
//!
//! ```ron
//! (
//!     group_kinds: ["ShaderNodeGroup", "GeometryNodeGroup"],
//!     preserve_existing: true,
//! )
//! ```
//!
//! Missing fields take their defaults.

use crate::host::{GroupKinds, DEFAULT_GROUP_KINDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for [`crate::NodeTools`] and the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Node kinds that own a nested graph
    pub group_kinds: Vec<String>,
    /// Default for `preserve_existing` when linking
    pub preserve_existing: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            group_kinds: DEFAULT_GROUP_KINDS.iter().map(ToString::to_string).collect(),
            preserve_existing: false,
        }
    }
}

impl ToolsConfig {
    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    /// Parse from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Group capability described by this configuration
    pub fn group_kinds(&self) -> GroupKinds {
        GroupKinds::from_kinds(self.group_kinds.iter().cloned())
    }
}

/// Error loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for this configuration
    #[error("Invalid configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The configuration could not be written
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] ron::Error),
}
