// SPDX-License-Identifier: MIT OR Apache-2.0
//! Subcommand implementations. Each returns the report to print.

use crate::document::{load_graph, save_graph};
use crate::script::{apply, load_script};
use anyhow::Result;
use nodepath_graph::{Graph, GroupKinds, NodeId, NodeTools, Scope, SocketId, ToolsConfig};
use std::fmt::Write as _;
use std::path::Path;

/// Shared state for running subcommands
pub struct Runner {
    tools: NodeTools<GroupKinds>,
    config: ToolsConfig,
}

impl Runner {
    /// Create a runner from configuration
    pub fn new(config: ToolsConfig) -> Self {
        Self {
            tools: NodeTools::from_config(&config),
            config,
        }
    }

    /// Describe what an address resolves to
    pub fn resolve(&self, graph_path: &Path, address: &str) -> Result<String> {
        let graph = load_graph(graph_path)?;
        let resolved = self.tools.resolve(&graph, address)?;
        let scope_graph = self.tools.containing_graph(&graph, address)?;

        let mut report = String::new();
        writeln!(report, "scope: {}", scope_names(&graph, &resolved.scope).join("/"))?;
        writeln!(report, "node: {}", node_name(scope_graph, resolved.node))?;
        writeln!(report, "inputs:")?;
        for &socket in &resolved.inputs {
            writeln!(report, "  {}", describe_socket(scope_graph, socket))?;
        }
        writeln!(report, "outputs:")?;
        for &socket in &resolved.outputs {
            writeln!(report, "  {}", describe_socket(scope_graph, socket))?;
        }
        Ok(report)
    }

    /// List links touching an address
    pub fn links(&self, graph_path: &Path, address: &str) -> Result<String> {
        let graph = load_graph(graph_path)?;
        let links = self.tools.get_links(&graph, address.into())?;
        let scope_graph = self.tools.containing_graph(&graph, address)?;

        let mut report = String::new();
        for link in links.iter().filter_map(|&id| scope_graph.link(id)) {
            writeln!(
                report,
                "{} -> {}",
                describe_socket(scope_graph, link.from_socket),
                describe_socket(scope_graph, link.to_socket)
            )?;
        }
        writeln!(report, "{} link(s)", links.len())?;
        Ok(report)
    }

    /// Auto-link two addresses and save the document.
    ///
    /// `preserve_existing` overrides the configured default when set.
    pub fn link(
        &self,
        graph_path: &Path,
        from: &str,
        to: &str,
        preserve_existing: Option<bool>,
        output: Option<&Path>,
    ) -> Result<String> {
        let mut graph = load_graph(graph_path)?;
        let preserve_existing = preserve_existing.unwrap_or(self.config.preserve_existing);
        let created = self
            .tools
            .link(&mut graph, from.into(), to.into(), preserve_existing)?;

        save_graph(output.unwrap_or(graph_path), &graph)?;
        Ok(format!("Created {created} link(s)\n"))
    }

    /// Remove links touching an address and save the document
    pub fn unlink(
        &self,
        graph_path: &Path,
        address: &str,
        to: Option<&str>,
        output: Option<&Path>,
    ) -> Result<String> {
        let mut graph = load_graph(graph_path)?;
        let removed = self
            .tools
            .remove_links(&mut graph, address.into(), to.map(Into::into))?;

        save_graph(output.unwrap_or(graph_path), &graph)?;
        Ok(format!("Removed {removed} link(s)\n"))
    }

    /// Run a script and save the document
    pub fn apply(&self, graph_path: &Path, script_path: &Path, output: Option<&Path>) -> Result<String> {
        let mut graph = load_graph(graph_path)?;
        let operations = load_script(script_path)?;
        let counts = apply(&self.tools, &mut graph, &operations, self.config.preserve_existing)?;

        let mut report = String::new();
        for (operation, count) in operations.iter().zip(&counts) {
            writeln!(report, "{operation}: {count}")?;
        }

        save_graph(output.unwrap_or(graph_path), &graph)?;
        Ok(report)
    }
}

/// Names of the group nodes a scope descends through
fn scope_names(root: &Graph, scope: &Scope<NodeId>) -> Vec<String> {
    let mut names = vec![root.name.clone()];
    let mut current = root;
    for &group in scope.groups() {
        let Some(node) = current.node(group) else {
            break;
        };
        names.push(node.name.clone());
        match node.subgraph.as_deref() {
            Some(subgraph) => current = subgraph,
            None => break,
        }
    }
    names
}

fn node_name(graph: &Graph, node: NodeId) -> &str {
    graph.node(node).map_or("?", |node| node.name.as_str())
}

/// `Node:Socket (TYPE)`
fn describe_socket(graph: &Graph, socket: SocketId) -> String {
    match graph.find_socket(socket) {
        Some((node, socket)) => format!("{}:{} ({})", node.name, socket.name, socket.socket_type),
        None => format!("{socket:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodepath_graph::graphs::shader::create_shader_registry;
    use nodepath_graph::Node;
    use std::path::PathBuf;

    fn write_material(dir: &Path) -> PathBuf {
        let registry = create_shader_registry();

        let mut group_tree = Graph::new("Group Tree");
        group_tree.add_node(registry.create_node("ShaderNodeMath").unwrap());

        let mut graph = Graph::new("Material");
        for kind in ["ShaderNodeRGB", "ShaderNodeValue", "ShaderNodeMix"] {
            graph.add_node(registry.create_node(kind).unwrap());
        }
        graph.add_node(Node::group("ShaderNodeGroup", "Group", group_tree));

        let path = dir.join("material.ron");
        save_graph(&path, &graph).unwrap();
        path
    }

    #[test]
    fn test_resolve_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_material(dir.path());
        let runner = Runner::new(ToolsConfig::default());

        let report = runner.resolve(&path, "+Mix:A").unwrap();
        assert!(report.contains("scope: Material\n"));
        assert!(report.contains("node: Mix\n"));
        assert!(report.contains("  Mix:A (RGBA)\n"));

        let report = runner.resolve(&path, "Group/Math:Value[1]").unwrap();
        assert!(report.contains("scope: Material/Group\n"));
        assert!(report.contains("  Math:Value (VALUE)\n"));
    }

    #[test]
    fn test_link_then_unlink() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_material(dir.path());
        let runner = Runner::new(ToolsConfig::default());

        let report = runner.link(&path, "-RGB", "+Mix:A", None, None).unwrap();
        assert_eq!(report, "Created 1 link(s)\n");
        assert_eq!(load_graph(&path).unwrap().link_count(), 1);

        let report = runner.links(&path, "Mix").unwrap();
        assert!(report.contains("RGB:Color (RGBA) -> Mix:A (RGBA)"));

        let report = runner.unlink(&path, "RGB", None, None).unwrap();
        assert_eq!(report, "Removed 1 link(s)\n");
        assert_eq!(load_graph(&path).unwrap().link_count(), 0);
    }

    #[test]
    fn test_output_leaves_input_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_material(dir.path());
        let output = dir.path().join("linked.json");
        let runner = Runner::new(ToolsConfig::default());

        runner.link(&path, "Value", "+Mix:Factor", None, Some(&output)).unwrap();
        assert_eq!(load_graph(&path).unwrap().link_count(), 0);
        assert_eq!(load_graph(&output).unwrap().link_count(), 1);
    }

    #[test]
    fn test_configured_preserve_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_material(dir.path());
        let runner = Runner::new(ToolsConfig {
            preserve_existing: true,
            ..ToolsConfig::default()
        });

        runner.link(&path, "-RGB", "+Mix:A", None, None).unwrap();
        let report = runner.link(&path, "-Value", "+Mix:A", None, None).unwrap();
        assert_eq!(report, "Created 0 link(s)\n");

        // An explicit `false` wins over the configured default
        let report = runner.link(&path, "-Value", "+Mix:A", Some(false), None).unwrap();
        assert_eq!(report, "Created 1 link(s)\n");
    }

    #[test]
    fn test_apply_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_material(dir.path());
        let script = dir.path().join("edits.ron");
        std::fs::write(
            &script,
            r#"[Link(from: "-RGB", to: "+Mix:A"), Link(from: "Value", to: "+Mix:Factor")]"#,
        )
        .unwrap();

        let report = Runner::new(ToolsConfig::default())
            .apply(&path, &script, None)
            .unwrap();
        assert!(report.contains("link `-RGB` -> `+Mix:A`: 1"));
        assert_eq!(load_graph(&path).unwrap().link_count(), 2);
    }

    #[test]
    fn test_restricted_group_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_material(dir.path());
        let runner = Runner::new(ToolsConfig {
            group_kinds: vec!["GeometryNodeGroup".to_string()],
            ..ToolsConfig::default()
        });

        let err = runner.resolve(&path, "Group/Math").unwrap_err();
        assert!(err.to_string().contains("is not a group"));
    }
}
