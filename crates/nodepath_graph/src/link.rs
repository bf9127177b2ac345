// SPDX-License-Identifier: MIT OR Apache-2.0
//! Links stored by the in-memory graph.

use crate::host::LinkEnds;
use crate::node::NodeId;
use crate::socket::SocketId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(pub Uuid);

impl LinkId {
    /// Create a new random link ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

/// A link from an output socket into an input socket.
///
/// Owning nodes are stored next to the sockets, so node-level queries do
/// not need a socket lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Unique link ID
    pub id: LinkId,
    /// Node owning the output socket
    pub from_node: NodeId,
    /// Output socket
    pub from_socket: SocketId,
    /// Node owning the input socket
    pub to_node: NodeId,
    /// Input socket
    pub to_socket: SocketId,
}

impl Link {
    /// A link with a fresh id between `ends`
    pub fn new(ends: LinkEnds<NodeId, SocketId>) -> Self {
        let LinkEnds {
            from_node,
            from_socket,
            to_node,
            to_socket,
        } = ends;
        Self {
            id: LinkId::new(),
            from_node,
            from_socket,
            to_node,
            to_socket,
        }
    }

    /// Both endpoints, as the host-graph view reports them
    pub fn ends(&self) -> LinkEnds<NodeId, SocketId> {
        LinkEnds {
            from_node: self.from_node,
            from_socket: self.from_socket,
            to_node: self.to_node,
            to_socket: self.to_socket,
        }
    }

    /// Whether either end sits on `node`
    pub fn touches_node(&self, node: NodeId) -> bool {
        self.from_node == node || self.to_node == node
    }

    /// Whether either end is `socket`
    pub fn touches_socket(&self, socket: SocketId) -> bool {
        self.from_socket == socket || self.to_socket == socket
    }

    /// Whether this link drives the input `socket`
    pub fn feeds(&self, socket: SocketId) -> bool {
        self.to_socket == socket
    }
}
