// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lookups and link removal by address or handle.

use crate::address::Address;
use crate::autolink::LinkError;
use crate::host::{GroupCapability, HostGraph, SocketDirection};
use crate::resolve::ResolveError;
use crate::tools::{NodeRef, NodeRefOf, NodeTools};
use indexmap::IndexSet;

impl<C> NodeTools<C> {
    /// The node an address names
    pub fn get_node<G>(&self, root: &G, address: &str) -> Result<G::NodeId, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        Ok(self.resolve(root, address)?.node)
    }

    /// Sockets an address selects, inputs first
    pub fn get_sockets<G>(&self, root: &G, address: &str) -> Result<Vec<G::SocketId>, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        let resolved = self.resolve(root, address)?;
        Ok(resolved.sockets().collect())
    }

    /// First socket an address selects
    pub fn get_socket<G>(&self, root: &G, address: &str) -> Result<G::SocketId, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        self.get_sockets(root, address)?
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::NoMatchingSocket {
                address: address.to_string(),
            })
    }

    /// The graph containing the node an address names
    pub fn containing_graph<'g, G>(&self, root: &'g G, address: &str) -> Result<&'g G, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        let address = Address::parse(address)?;
        Ok(self.locate(root, &address)?.0)
    }

    /// The nested graph of the group node an address names
    pub fn group_subgraph<'g, G>(&self, root: &'g G, address: &str) -> Result<&'g G, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        let address = Address::parse(address)?;
        let (graph, resolved) = self.locate(root, &address)?;

        if !self.groups().is_group(graph, resolved.node) {
            return Err(ResolveError::NotAGroup {
                address: address.to_string(),
                name: address.leaf().to_string(),
            });
        }
        graph.subgraph(resolved.node).ok_or_else(|| ResolveError::EmptyGroup {
            address: address.to_string(),
            name: address.leaf().to_string(),
        })
    }

    /// Links touching any selected socket, each listed once.
    ///
    /// Links are read in the graph a path resolves into, or the graph
    /// owning a node or socket handle.
    pub fn get_links<G>(&self, root: &G, subject: NodeRefOf<'_, G>) -> Result<Vec<G::LinkId>, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        let (graph, sockets) = match subject {
            NodeRef::Path(path) => {
                let address = Address::parse(path)?;
                let (graph, resolved) = self.locate(root, &address)?;
                (graph, resolved.sockets().collect())
            }
            _ => {
                let graph = self
                    .handle_scope(root, subject)
                    .and_then(|scope| scope.graph(root))
                    .unwrap_or(root);
                (graph, subject_sockets(graph, subject))
            }
        };

        let links: IndexSet<_> = sockets
            .into_iter()
            .flat_map(|socket| graph.socket_links(socket))
            .collect();
        Ok(links.into_iter().collect())
    }

    /// First link touching any selected socket
    pub fn get_link<G>(&self, root: &G, subject: NodeRefOf<'_, G>) -> Result<Option<G::LinkId>, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        Ok(self.get_links(root, subject)?.into_iter().next())
    }

    /// Remove every link touching the selected sockets.
    ///
    /// With `to`, only links whose destination is `to`'s node are removed.
    /// Returns the number of links removed.
    pub fn remove_links<G>(
        &self,
        root: &mut G,
        subject: NodeRefOf<'_, G>,
        to: Option<NodeRefOf<'_, G>>,
    ) -> Result<usize, LinkError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        let resolved = self.resolve_ref(&*root, subject)?;
        let to_resolved = match to {
            Some(to) => self.resolve_ref(&*root, to)?,
            None => None,
        };

        let scope = match &resolved {
            Some(resolved) => resolved.scope.clone(),
            None => self.handle_scope(&*root, subject).unwrap_or_default(),
        };
        let graph = scope.graph_mut(root).ok_or(LinkError::StaleScope)?;

        let sockets: Vec<_> = match resolved {
            Some(resolved) => resolved.sockets().collect(),
            None => subject_sockets(&*graph, subject),
        };
        let to_node = match (to, to_resolved) {
            (_, Some(resolved)) => Some(resolved.node),
            (Some(NodeRef::Node(node)), None) => Some(node),
            (Some(NodeRef::Socket(socket)), None) => graph.socket(socket).map(|meta| meta.node),
            _ => None,
        };

        let mut doomed = IndexSet::new();
        for socket in sockets {
            for link in graph.socket_links(socket) {
                if to.is_some() {
                    let destination = graph.link_ends(link).map(|ends| ends.to_node);
                    if destination.is_none() || destination != to_node {
                        continue;
                    }
                }
                doomed.insert(link);
            }
        }

        let mut removed = 0;
        for link in doomed {
            if graph.remove_link(link) {
                removed += 1;
            }
        }
        tracing::debug!(removed, "removed links");
        Ok(removed)
    }
}

/// Sockets of a handle in both directions, inputs first
fn subject_sockets<G: HostGraph>(graph: &G, subject: NodeRefOf<'_, G>) -> Vec<G::SocketId> {
    match subject {
        NodeRef::Node(node) => {
            let mut sockets = graph.sockets(node, SocketDirection::Input);
            sockets.extend(graph.sockets(node, SocketDirection::Output));
            sockets
        }
        NodeRef::Socket(socket) if graph.socket(socket).is_some() => vec![socket],
        _ => Vec::new(),
    }
}
