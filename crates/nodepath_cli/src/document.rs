// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph documents on disk.

use anyhow::{bail, Context, Result};
use nodepath_graph::Graph;
use std::path::Path;

/// Serialization format of a graph document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Rusty Object Notation (`.ron`)
    Ron,
    /// JSON (`.json`)
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("ron") => Ok(Self::Ron),
            Some("json") => Ok(Self::Json),
            _ => bail!(
                "Unsupported graph document `{}`: expected a .ron or .json file",
                path.display()
            ),
        }
    }

    /// Parse a graph from text
    pub fn parse(self, text: &str) -> Result<Graph> {
        let graph = match self {
            Self::Ron => ron::from_str(text)?,
            Self::Json => serde_json::from_str(text)?,
        };
        Ok(graph)
    }

    /// Render a graph as text
    pub fn render(self, graph: &Graph) -> Result<String> {
        let text = match self {
            Self::Ron => ron::ser::to_string_pretty(graph, ron::ser::PrettyConfig::default())?,
            Self::Json => serde_json::to_string_pretty(graph)?,
        };
        Ok(text)
    }
}

/// Load a graph document
pub fn load_graph(path: &Path) -> Result<Graph> {
    let format = DocumentFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph document `{}`", path.display()))?;
    let graph = format
        .parse(&text)
        .with_context(|| format!("Failed to parse graph document `{}`", path.display()))?;

    tracing::debug!(path = %path.display(), nodes = graph.node_count(), "loaded graph");
    Ok(graph)
}

/// Save a graph document, in the format its extension names
pub fn save_graph(path: &Path, graph: &Graph) -> Result<()> {
    let format = DocumentFormat::from_path(path)?;
    let text = format.render(graph)?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write graph document `{}`", path.display()))?;

    tracing::info!(path = %path.display(), "saved graph");
    Ok(())
}
