// SPDX-License-Identifier: MIT OR Apache-2.0
//! Batches of link edits stored as RON.
//!
//! ```ron
//! [
//!     Link(from: "-RGB", to: "+Mix:A"),
//!     Link(from: "Value", to: "Math", preserve_existing: Some(true)),
//!     Unlink(node: "Mix", to: Some("Principled BSDF")),
//! ]
//! ```

use anyhow::{Context, Result};
use nodepath_graph::{GroupKinds, Graph, NodeTools};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One edit in a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Auto-link outputs of `from` to inputs of `to`
    Link {
        /// Source address
        from: String,
        /// Destination address
        to: String,
        /// Overrides the configured policy when set
        #[serde(default)]
        preserve_existing: Option<bool>,
    },
    /// Remove links touching `node`, optionally only those ending at `to`
    Unlink {
        /// Address of the sockets to clear
        node: String,
        /// Only remove links into this node
        #[serde(default)]
        to: Option<String>,
    },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link { from, to, .. } => write!(f, "link `{from}` -> `{to}`"),
            Self::Unlink { node, to: Some(to) } => write!(f, "unlink `{node}` from `{to}`"),
            Self::Unlink { node, to: None } => write!(f, "unlink `{node}`"),
        }
    }
}

/// Parse a script from RON text
pub fn parse_script(text: &str) -> Result<Vec<Operation>> {
    Ok(ron::from_str(text)?)
}

/// Load a script file
pub fn load_script(path: &Path) -> Result<Vec<Operation>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script `{}`", path.display()))?;
    parse_script(&text).with_context(|| format!("Failed to parse script `{}`", path.display()))
}

/// Run `operations` in order against `graph`.
///
/// Returns the number of links created or removed by each operation.
/// Stops at the first failing operation.
pub fn apply(
    tools: &NodeTools<GroupKinds>,
    graph: &mut Graph,
    operations: &[Operation],
    preserve_existing: bool,
) -> Result<Vec<usize>> {
    let mut counts = Vec::with_capacity(operations.len());

    for (index, operation) in operations.iter().enumerate() {
        let count = match operation {
            Operation::Link {
                from,
                to,
                preserve_existing: preserve,
            } => tools.link(
                graph,
                from.as_str().into(),
                to.as_str().into(),
                preserve.unwrap_or(preserve_existing),
            ),
            Operation::Unlink { node, to } => {
                tools.remove_links(graph, node.as_str().into(), to.as_deref().map(Into::into))
            }
        }
        .with_context(|| format!("Operation {} ({operation}) failed", index + 1))?;

        tracing::debug!(%operation, count, "applied operation");
        counts.push(count);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodepath_graph::graphs::shader::create_shader_registry;

    fn material() -> Graph {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Material");
        for kind in [
            "ShaderNodeRGB",
            "ShaderNodeValue",
            "ShaderNodeMix",
            "ShaderNodeBsdfPrincipled",
        ] {
            graph.add_node(registry.create_node(kind).unwrap());
        }
        graph
    }

    const SCRIPT: &str = r#"[
        Link(from: "-RGB", to: "+Mix:A"),
        Link(from: "Value", to: "+Mix:Factor"),
        Link(from: "Mix", to: "Principled BSDF"),
        Unlink(node: "Mix", to: Some("Principled BSDF")),
    ]"#;

    #[test]
    fn test_parse_script() {
        let operations = parse_script(SCRIPT).unwrap();
        assert_eq!(operations.len(), 4);
        assert_eq!(
            operations[0],
            Operation::Link {
                from: "-RGB".to_string(),
                to: "+Mix:A".to_string(),
                preserve_existing: None,
            }
        );
        assert_eq!(operations[3].to_string(), "unlink `Mix` from `Principled BSDF`");
    }

    #[test]
    fn test_apply_reports_counts() {
        let mut graph = material();
        let operations = parse_script(SCRIPT).unwrap();

        let counts = apply(&NodeTools::default(), &mut graph, &operations, false).unwrap();
        assert_eq!(counts, vec![1, 1, 1, 1]);
        assert_eq!(graph.link_count(), 2);
    }

    #[test]
    fn test_apply_preserve_override() {
        let mut graph = material();
        let operations = parse_script(
            r#"[
                Link(from: "-RGB", to: "+Mix:A"),
                Link(from: "-Value", to: "+Mix:A"),
                Link(from: "-Value", to: "+Mix:A", preserve_existing: Some(false)),
            ]"#,
        )
        .unwrap();

        let counts = apply(&NodeTools::default(), &mut graph, &operations, true).unwrap();
        assert_eq!(counts, vec![1, 0, 1]);
    }

    #[test]
    fn test_apply_stops_at_failure() {
        let mut graph = material();
        let operations = parse_script(
            r#"[
                Link(from: "-RGB", to: "+Mix:A"),
                Unlink(node: "Missing"),
                Link(from: "Value", to: "+Mix:Factor"),
            ]"#,
        )
        .unwrap();

        let err = apply(&NodeTools::default(), &mut graph, &operations, false).unwrap_err();
        assert!(err.to_string().contains("Operation 2"));
        assert_eq!(graph.link_count(), 1);
    }
}
