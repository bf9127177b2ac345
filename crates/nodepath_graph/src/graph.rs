// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory graph containing nodes and links.

use crate::host::{HostError, HostGraph, LinkEnds, SocketDirection, SocketMeta};
use crate::link::{Link, LinkId};
use crate::node::{Node, NodeId};
use crate::socket::{Socket, SocketId, SocketType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Links between sockets
    links: IndexMap<LinkId, Link>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// Add a node to the graph.
    ///
    /// A name already taken in this graph gets a numeric suffix
    /// (`Mix`, `Mix.001`, `Mix.002`, ...).
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        node.name = self.unique_name(&node.name);
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and its links
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.links.retain(|_, l| !l.touches_node(node_id));
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a node by name
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Find a socket and the node it belongs to
    pub fn find_socket(&self, socket_id: SocketId) -> Option<(&Node, &Socket)> {
        self.nodes
            .values()
            .find_map(|node| node.socket(socket_id).map(|socket| (node, socket)))
    }

    /// Link an output socket to an input socket.
    ///
    /// An input that does not accept multiple links drops its previous
    /// link first.
    pub fn connect(&mut self, from_socket: SocketId, to_socket: SocketId) -> Result<LinkId, GraphError> {
        let (from_node, source_is_output) = self
            .find_socket(from_socket)
            .map(|(node, socket)| (node.id, socket.is_output()))
            .ok_or(GraphError::SocketNotFound(from_socket))?;
        if !source_is_output {
            return Err(GraphError::NotAnOutput(from_socket));
        }

        let (to_node, target_is_output, multi_input) = self
            .find_socket(to_socket)
            .map(|(node, socket)| (node.id, socket.is_output(), socket.multi_input))
            .ok_or(GraphError::SocketNotFound(to_socket))?;
        if target_is_output {
            return Err(GraphError::NotAnInput(to_socket));
        }

        if !multi_input {
            self.links.retain(|_, l| !l.feeds(to_socket));
        }

        let link = Link::new(LinkEnds {
            from_node,
            from_socket,
            to_node,
            to_socket,
        });
        let id = link.id;
        self.links.insert(id, link);
        Ok(id)
    }

    /// Remove a link
    pub fn disconnect(&mut self, link_id: LinkId) -> Option<Link> {
        self.links.shift_remove(&link_id)
    }

    /// Get a link by ID
    pub fn link(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(&link_id)
    }

    /// Get all links
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Get links touching a specific socket
    pub fn links_for_socket(&self, socket_id: SocketId) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.touches_socket(socket_id))
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    fn unique_name(&self, name: &str) -> String {
        if self.node_by_name(name).is_none() {
            return name.to_string();
        }

        let stem = match name.rsplit_once('.') {
            Some((stem, suffix)) if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) => stem,
            _ => name,
        };
        let mut n = 1;
        loop {
            let candidate = format!("{stem}.{n:03}");
            if self.node_by_name(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("NodeTree")
    }
}

impl HostGraph for Graph {
    type NodeId = NodeId;
    type SocketId = SocketId;
    type LinkId = LinkId;
    type SocketType = SocketType;

    fn find_node(&self, name: &str) -> Option<NodeId> {
        self.node_by_name(name).map(|n| n.id)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.name.as_str())
    }

    fn node_kind(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.kind.as_str())
    }

    fn sockets(&self, node: NodeId, direction: SocketDirection) -> Vec<SocketId> {
        let Some(node) = self.nodes.get(&node) else {
            return Vec::new();
        };
        let sockets = match direction {
            SocketDirection::Input => &node.inputs,
            SocketDirection::Output => &node.outputs,
        };
        sockets.iter().map(|s| s.id).collect()
    }

    fn socket(&self, socket: SocketId) -> Option<SocketMeta<'_, NodeId, SocketType>> {
        self.find_socket(socket).map(|(node, socket)| SocketMeta {
            node: node.id,
            name: socket.name.as_str(),
            direction: socket.direction,
            socket_type: &socket.socket_type,
        })
    }

    fn subgraph(&self, node: NodeId) -> Option<&Self> {
        self.nodes.get(&node)?.subgraph.as_deref()
    }

    fn subgraph_mut(&mut self, node: NodeId) -> Option<&mut Self> {
        self.nodes.get_mut(&node)?.subgraph.as_deref_mut()
    }

    fn socket_links(&self, socket: SocketId) -> Vec<LinkId> {
        self.links_for_socket(socket).map(|l| l.id).collect()
    }

    fn link_ends(&self, link: LinkId) -> Option<LinkEnds<NodeId, SocketId>> {
        self.links.get(&link).map(Link::ends)
    }

    fn add_link(&mut self, from: SocketId, to: SocketId) -> Result<LinkId, HostError> {
        Ok(self.connect(from, to)?)
    }

    fn remove_link(&mut self, link: LinkId) -> bool {
        self.disconnect(link).is_some()
    }
}

/// Error when creating a link
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Socket not found
    #[error("Socket not found: {0:?}")]
    SocketNotFound(SocketId),

    /// Link source is not an output
    #[error("Socket is not an output: {0:?}")]
    NotAnOutput(SocketId),

    /// Link target is not an input
    #[error("Socket is not an input: {0:?}")]
    NotAnInput(SocketId),
}

impl From<GraphError> for HostError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::SocketNotFound(id) => HostError::UnknownSocket(format!("{id:?}")),
            other => HostError::Rejected {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_node(name: &str) -> Node {
        Node::bare("ShaderNodeValue", name).with_output(Socket::output("Value", SocketType::Float))
    }

    fn math_node(name: &str) -> Node {
        Node::bare("ShaderNodeMath", name)
            .with_input(Socket::input("Value", SocketType::Float))
            .with_output(Socket::output("Value", SocketType::Float))
    }

    #[test]
    fn test_unique_names() {
        let mut graph = Graph::default();
        let a = graph.add_node(value_node("Value"));
        let b = graph.add_node(value_node("Value"));
        let c = graph.add_node(value_node("Value.001"));

        assert_eq!(graph.node(a).unwrap().name, "Value");
        assert_eq!(graph.node(b).unwrap().name, "Value.001");
        assert_eq!(graph.node(c).unwrap().name, "Value.002");
        assert_eq!(graph.find_node("Value.001"), Some(b));
    }

    #[test]
    fn test_connect_validates_direction() {
        let mut graph = Graph::default();
        let value = graph.add_node(value_node("Value"));
        let math = graph.add_node(math_node("Math"));
        let out = graph.node(value).unwrap().outputs[0].id;
        let input = graph.node(math).unwrap().inputs[0].id;

        assert!(matches!(graph.connect(input, out), Err(GraphError::NotAnOutput(_))));
        assert!(matches!(graph.connect(out, out), Err(GraphError::NotAnInput(_))));
        assert!(matches!(
            graph.connect(out, SocketId::new()),
            Err(GraphError::SocketNotFound(_))
        ));

        let link = graph.connect(out, input).unwrap();
        let ends = graph.link_ends(link).unwrap();
        assert_eq!(ends.from_node, value);
        assert_eq!(ends.to_node, math);
    }

    #[test]
    fn test_single_input_replaces_link() {
        let mut graph = Graph::default();
        let a = graph.add_node(value_node("A"));
        let b = graph.add_node(value_node("B"));
        let math = graph.add_node(math_node("Math"));
        let input = graph.node(math).unwrap().inputs[0].id;
        let a_out = graph.node(a).unwrap().outputs[0].id;
        let b_out = graph.node(b).unwrap().outputs[0].id;

        graph.connect(a_out, input).unwrap();
        let second = graph.connect(b_out, input).unwrap();

        assert_eq!(graph.link_count(), 1);
        assert_eq!(graph.socket_links(input), vec![second]);
    }

    #[test]
    fn test_multi_input_keeps_links() {
        let mut graph = Graph::default();
        let a = graph.add_node(value_node("A"));
        let b = graph.add_node(value_node("B"));
        let join = graph.add_node(
            Node::bare("GeometryNodeJoinGeometry", "Join")
                .with_input(Socket::input("Geometry", SocketType::Float).multi_input()),
        );
        let input = graph.node(join).unwrap().inputs[0].id;
        let a_out = graph.node(a).unwrap().outputs[0].id;
        let b_out = graph.node(b).unwrap().outputs[0].id;

        graph.connect(a_out, input).unwrap();
        graph.connect(b_out, input).unwrap();
        assert_eq!(graph.socket_links(input).len(), 2);
    }

    #[test]
    fn test_remove_node_drops_links() {
        let mut graph = Graph::default();
        let value = graph.add_node(value_node("Value"));
        let math = graph.add_node(math_node("Math"));
        let out = graph.node(value).unwrap().outputs[0].id;
        let input = graph.node(math).unwrap().inputs[0].id;
        graph.connect(out, input).unwrap();

        assert!(graph.remove_node(value).is_some());
        assert_eq!(graph.link_count(), 0);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_subgraph_access() {
        let mut inner = Graph::new("Inner");
        inner.add_node(math_node("Math"));
        let mut graph = Graph::default();
        let group = graph.add_node(Node::group("ShaderNodeGroup", "Group", inner));
        let plain = graph.add_node(value_node("Value"));

        assert!(graph.subgraph(plain).is_none());
        let sub = graph.subgraph_mut(group).unwrap();
        sub.add_node(value_node("Value"));
        assert_eq!(graph.subgraph(group).unwrap().node_count(), 2);
    }

    #[test]
    fn test_serialization() {
        let mut inner = Graph::new("Inner");
        inner.add_node(math_node("Math"));
        let mut graph = Graph::new("Material");
        graph.add_node(Node::group("ShaderNodeGroup", "Group", inner));
        let value = graph.add_node(value_node("Value"));

        let ron_str = ron::ser::to_string_pretty(&graph, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: Graph = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.name, "Material");
        assert_eq!(loaded.node_count(), 2);
        assert!(loaded.node(value).is_some());
        let group = loaded.find_node("Group").unwrap();
        assert!(loaded.subgraph(group).unwrap().find_node("Math").is_some());
    }
}
