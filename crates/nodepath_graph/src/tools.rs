// SPDX-License-Identifier: MIT OR Apache-2.0
//! Entry point tying addresses, resolution and linking together.

use crate::config::ToolsConfig;
use crate::host::{GroupKinds, HostGraph, SocketDirection};

/// Address-based access to a host graph.
///
/// Holds the group capability used to decide which nodes an address may
/// descend into. Operations are split across [`crate::resolve`],
/// [`crate::autolink`] and [`crate::query`].
#[derive(Debug, Clone, Default)]
pub struct NodeTools<C = GroupKinds> {
    groups: C,
}

impl<C> NodeTools<C> {
    /// Create tools with a custom group capability
    pub fn new(groups: C) -> Self {
        Self { groups }
    }

    /// The group capability in use
    pub fn groups(&self) -> &C {
        &self.groups
    }
}

impl NodeTools<GroupKinds> {
    /// Create tools from configuration
    pub fn from_config(config: &ToolsConfig) -> Self {
        Self::new(config.group_kinds())
    }
}

/// A link endpoint or query subject: a node handle, a socket handle, or
/// an address string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a, N, S> {
    /// Every socket of a node
    Node(N),
    /// One socket
    Socket(S),
    /// Sockets selected by an address
    Path(&'a str),
}

impl<'a, N, S> From<&'a str> for NodeRef<'a, N, S> {
    fn from(path: &'a str) -> Self {
        Self::Path(path)
    }
}

impl<'a, N, S> From<&'a String> for NodeRef<'a, N, S> {
    fn from(path: &'a String) -> Self {
        Self::Path(path.as_str())
    }
}

/// [`NodeRef`] with the handle types of a host graph
pub type NodeRefOf<'a, G> = NodeRef<'a, <G as HostGraph>::NodeId, <G as HostGraph>::SocketId>;

impl<'a, N, S> NodeRef<'a, N, S> {
    /// The address string, if this is a path
    pub fn path(&self) -> Option<&'a str> {
        match *self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }
}

/// Sockets of a node or socket handle in `direction`. A socket handle
/// facing the other way selects nothing. Paths select nothing here; they
/// go through the resolver.
pub(crate) fn handle_sockets<G: HostGraph>(
    graph: &G,
    subject: NodeRefOf<'_, G>,
    direction: SocketDirection,
) -> Vec<G::SocketId> {
    match subject {
        NodeRef::Node(node) => graph.sockets(node, direction),
        NodeRef::Socket(socket) => match graph.socket(socket) {
            Some(meta) if meta.direction == direction => vec![socket],
            _ => Vec::new(),
        },
        NodeRef::Path(_) => Vec::new(),
    }
}
