// SPDX-License-Identifier: MIT OR Apache-2.0
//! The narrow interface the resolver and linker need from a host graph.
//!
//! Nodes, sockets and links are owned by the host. This crate only looks
//! them up through handles and creates or removes links. [`crate::Graph`]
//! is the in-memory implementation; other node systems implement
//! [`HostGraph`] over their own object model.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket
    Input,
    /// Output socket
    Output,
}

/// What a host reports about a socket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SocketMeta<'a, N, T> {
    /// Node the socket belongs to
    pub node: N,
    /// Socket name, not necessarily unique on its node
    pub name: &'a str,
    /// Socket direction
    pub direction: SocketDirection,
    /// Type tag, compared for equality when matching
    pub socket_type: &'a T,
}

/// Both ends of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkEnds<N, S> {
    /// Source node
    pub from_node: N,
    /// Source (output) socket
    pub from_socket: S,
    /// Destination node
    pub to_node: N,
    /// Destination (input) socket
    pub to_socket: S,
}

/// A node graph owned by a host application
pub trait HostGraph {
    /// Node handle
    type NodeId: Copy + Eq + Hash + Debug;
    /// Socket handle
    type SocketId: Copy + Eq + Hash + Debug;
    /// Link handle
    type LinkId: Copy + Eq + Hash + Debug;
    /// Socket type tag
    type SocketType: PartialEq + Debug;

    /// Look up a node by its unique name
    fn find_node(&self, name: &str) -> Option<Self::NodeId>;

    /// All nodes, in graph order
    fn node_ids(&self) -> Vec<Self::NodeId>;

    /// Name of a node
    fn node_name(&self, node: Self::NodeId) -> Option<&str>;

    /// Host kind name of a node (e.g. `ShaderNodeGroup`)
    fn node_kind(&self, node: Self::NodeId) -> Option<&str>;

    /// Sockets of a node in one direction, in native order
    fn sockets(&self, node: Self::NodeId, direction: SocketDirection) -> Vec<Self::SocketId>;

    /// Describe a socket
    fn socket(&self, socket: Self::SocketId) -> Option<SocketMeta<'_, Self::NodeId, Self::SocketType>>;

    /// Nested graph owned by a group node
    fn subgraph(&self, node: Self::NodeId) -> Option<&Self>;

    /// Mutable nested graph owned by a group node
    fn subgraph_mut(&mut self, node: Self::NodeId) -> Option<&mut Self>;

    /// Links touching a socket
    fn socket_links(&self, socket: Self::SocketId) -> Vec<Self::LinkId>;

    /// Endpoints of a link
    fn link_ends(&self, link: Self::LinkId) -> Option<LinkEnds<Self::NodeId, Self::SocketId>>;

    /// Create a link from an output socket to an input socket
    fn add_link(&mut self, from: Self::SocketId, to: Self::SocketId) -> Result<Self::LinkId, HostError>;

    /// Remove a link. Returns `false` if it did not exist.
    fn remove_link(&mut self, link: Self::LinkId) -> bool;
}

/// Error reported by a host graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Socket handle does not belong to this graph
    #[error("Socket not found: {0}")]
    UnknownSocket(String),

    /// The host refused the operation
    #[error("Host rejected operation: {reason}")]
    Rejected {
        /// Why the host refused
        reason: String,
    },
}

/// Decides which nodes own a nested graph that addresses can descend into
pub trait GroupCapability<G: HostGraph + ?Sized> {
    /// Whether `node` is group-like
    fn is_group(&self, graph: &G, node: G::NodeId) -> bool;
}

impl<G, F> GroupCapability<G> for F
where
    G: HostGraph + ?Sized,
    F: Fn(&G, G::NodeId) -> bool,
{
    fn is_group(&self, graph: &G, node: G::NodeId) -> bool {
        self(graph, node)
    }
}

/// Node kinds that own a nested graph in the default host taxonomy
pub const DEFAULT_GROUP_KINDS: &[&str] = &[
    "CompositorNodeGroup",
    "CompositorNodeCustomGroup",
    "GeometryNodeGroup",
    "NodeCustomGroup",
    "NodeGroup",
    "ShaderNodeGroup",
    "ShaderNodeCustomGroup",
    "TextureNodeGroup",
];

/// Group capability keyed on node kind names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKinds {
    kinds: IndexSet<String>,
}

impl GroupKinds {
    /// An empty set; no node is group-like
    pub fn empty() -> Self {
        Self {
            kinds: IndexSet::new(),
        }
    }

    /// Build from an explicit list of kind names
    pub fn from_kinds<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kinds: kinds.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a kind
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kinds.insert(kind.into());
        self
    }

    /// Add a kind in place. Returns `false` if it was already present.
    pub fn insert(&mut self, kind: impl Into<String>) -> bool {
        self.kinds.insert(kind.into())
    }

    /// Remove a kind. Returns `false` if it was not present.
    pub fn remove(&mut self, kind: &str) -> bool {
        self.kinds.shift_remove(kind)
    }

    /// Whether a kind is group-like
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    /// All kinds, in insertion order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }
}

impl Default for GroupKinds {
    fn default() -> Self {
        Self::from_kinds(DEFAULT_GROUP_KINDS.iter().copied())
    }
}

impl<G: HostGraph + ?Sized> GroupCapability<G> for GroupKinds {
    fn is_group(&self, graph: &G, node: G::NodeId) -> bool {
        graph.node_kind(node).is_some_and(|kind| self.contains(kind))
    }
}
