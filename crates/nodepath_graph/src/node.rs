// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the in-memory graph.

use crate::graph::Graph;
use crate::socket::{Socket, SocketId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Input nodes (constants, attributes)
    Input,
    /// Output nodes
    Output,
    /// Shader closures
    Shader,
    /// Textures
    Texture,
    /// Color operations
    Color,
    /// Conversion and math
    Converter,
    /// Geometry operations
    Geometry,
    /// Group nodes and group interface nodes
    Group,
}

/// Template a node instance is created from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTemplate {
    /// Host kind name, e.g. `ShaderNodeMix`
    pub kind: String,
    /// Default node name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Default input sockets
    pub inputs: Vec<Socket>,
    /// Default output sockets
    pub outputs: Vec<Socket>,
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Host kind name
    pub kind: String,
    /// Name, unique within the containing graph
    pub name: String,
    /// Input sockets
    pub inputs: Vec<Socket>,
    /// Output sockets
    pub outputs: Vec<Socket>,
    /// Nested graph of a group node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgraph: Option<Box<Graph>>,
}

impl Node {
    /// Create a new node from a template
    pub fn new(template: &NodeTemplate) -> Self {
        Self {
            id: NodeId::new(),
            kind: template.kind.clone(),
            name: template.name.clone(),
            inputs: template.inputs.iter().map(Socket::instantiate).collect(),
            outputs: template.outputs.iter().map(Socket::instantiate).collect(),
            subgraph: None,
        }
    }

    /// Create a node with no sockets
    pub fn bare(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            kind: kind.into(),
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            subgraph: None,
        }
    }

    /// Create a group node owning `subgraph`
    pub fn group(kind: impl Into<String>, name: impl Into<String>, subgraph: Graph) -> Self {
        Self::bare(kind, name).with_subgraph(subgraph)
    }

    /// Append an input socket
    pub fn with_input(mut self, socket: Socket) -> Self {
        self.inputs.push(socket);
        self
    }

    /// Append an output socket
    pub fn with_output(mut self, socket: Socket) -> Self {
        self.outputs.push(socket);
        self
    }

    /// Attach a nested graph
    pub fn with_subgraph(mut self, subgraph: Graph) -> Self {
        self.subgraph = Some(Box::new(subgraph));
        self
    }

    /// Get a socket by ID
    pub fn socket(&self, socket_id: SocketId) -> Option<&Socket> {
        self.sockets().find(|s| s.id == socket_id)
    }

    /// Get all sockets, inputs first
    pub fn sockets(&self) -> impl Iterator<Item = &Socket> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}

/// Registry of available node templates
pub struct NodeRegistry {
    /// Registered templates by kind
    templates: indexmap::IndexMap<String, NodeTemplate>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            templates: indexmap::IndexMap::new(),
        }
    }

    /// Register a template
    pub fn register(&mut self, template: NodeTemplate) {
        self.templates.insert(template.kind.clone(), template);
    }

    /// Get a template by kind
    pub fn get(&self, kind: &str) -> Option<&NodeTemplate> {
        self.templates.get(kind)
    }

    /// Get all registered templates
    pub fn templates(&self) -> impl Iterator<Item = &NodeTemplate> {
        self.templates.values()
    }

    /// Get templates by category
    pub fn templates_in_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeTemplate> {
        self.templates.values().filter(move |t| t.category == category)
    }

    /// Create a node from a kind
    pub fn create_node(&self, kind: &str) -> Option<Node> {
        self.get(kind).map(Node::new)
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
