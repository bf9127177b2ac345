// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolve addresses to concrete nodes and sockets.

use crate::address::{Address, AddressError};
use crate::host::{GroupCapability, HostGraph, SocketDirection};
use crate::tools::{NodeRef, NodeRefOf, NodeTools};

/// Group nodes descended through to reach a graph, outermost first.
///
/// An empty scope is the root graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope<N> {
    groups: Vec<N>,
}

impl<N: Copy> Scope<N> {
    /// The root graph
    pub fn root() -> Self {
        Self { groups: Vec::new() }
    }

    /// Whether this is the root graph
    pub fn is_root(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group nodes on the way down, outermost first
    pub fn groups(&self) -> &[N] {
        &self.groups
    }

    /// The graph this scope names, entered from `root`
    pub fn graph<'g, G>(&self, root: &'g G) -> Option<&'g G>
    where
        G: HostGraph<NodeId = N>,
    {
        let mut current = root;
        for &group in &self.groups {
            current = current.subgraph(group)?;
        }
        Some(current)
    }

    /// The graph this scope names, entered mutably from `root`
    pub fn graph_mut<'g, G>(&self, root: &'g mut G) -> Option<&'g mut G>
    where
        G: HostGraph<NodeId = N>,
    {
        let mut current = root;
        for &group in &self.groups {
            current = current.subgraph_mut(group)?;
        }
        Some(current)
    }

    fn push(&mut self, group: N) {
        self.groups.push(group);
    }

    fn pop(&mut self) {
        self.groups.pop();
    }
}

impl<N: Copy> Default for Scope<N> {
    fn default() -> Self {
        Self::root()
    }
}

/// A resolved address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<N, S> {
    /// Graph containing the node
    pub scope: Scope<N>,
    /// The addressed node
    pub node: N,
    /// Matching input sockets, in native order
    pub inputs: Vec<S>,
    /// Matching output sockets, in native order
    pub outputs: Vec<S>,
}

impl<N, S: Copy> Resolution<N, S> {
    /// Matching sockets in one direction
    pub fn sockets_in(&self, direction: SocketDirection) -> &[S] {
        match direction {
            SocketDirection::Input => &self.inputs,
            SocketDirection::Output => &self.outputs,
        }
    }

    /// All matching sockets, inputs first
    pub fn sockets(&self) -> impl Iterator<Item = S> + '_ {
        self.inputs.iter().chain(self.outputs.iter()).copied()
    }
}

/// [`Resolution`] with the handle types of a host graph
pub type ResolutionOf<G> = Resolution<<G as HostGraph>::NodeId, <G as HostGraph>::SocketId>;

impl<C> NodeTools<C> {
    /// Parse and resolve an address against `root`
    pub fn resolve<G>(&self, root: &G, address: &str) -> Result<ResolutionOf<G>, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        let address = Address::parse(address)?;
        self.resolve_address(root, &address)
    }

    /// Resolve a parsed address against `root`.
    ///
    /// Every ancestor in the path must name a group node in the graph
    /// reached so far; the leaf is looked up in the innermost graph.
    pub fn resolve_address<G>(&self, root: &G, address: &Address) -> Result<ResolutionOf<G>, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        self.locate(root, address).map(|(_, resolved)| resolved)
    }

    /// Resolve an address, also returning the graph containing the node
    pub(crate) fn locate<'g, G>(
        &self,
        root: &'g G,
        address: &Address,
    ) -> Result<(&'g G, ResolutionOf<G>), ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        let mut current = root;
        let mut scope = Scope::root();

        for name in address.ancestors() {
            let node = current
                .find_node(name)
                .ok_or_else(|| ResolveError::NodeNotFound {
                    address: address.to_string(),
                    name: name.clone(),
                })?;

            if !self.groups().is_group(current, node) {
                return Err(ResolveError::NotAGroup {
                    address: address.to_string(),
                    name: name.clone(),
                });
            }

            current = current.subgraph(node).ok_or_else(|| ResolveError::EmptyGroup {
                address: address.to_string(),
                name: name.clone(),
            })?;
            tracing::debug!(group = %name, "descended into group");
            scope.push(node);
        }

        let node = current
            .find_node(address.leaf())
            .ok_or_else(|| ResolveError::NodeNotFound {
                address: address.to_string(),
                name: address.leaf().to_string(),
            })?;

        let inputs = if address.includes_inputs() {
            select_sockets(current, node, SocketDirection::Input, address)
        } else {
            Vec::new()
        };
        let outputs = if address.includes_outputs() {
            select_sockets(current, node, SocketDirection::Output, address)
        } else {
            Vec::new()
        };

        let resolved = Resolution {
            scope,
            node,
            inputs,
            outputs,
        };
        Ok((current, resolved))
    }

    /// Scope of the graph owning a node or socket handle.
    ///
    /// The root is searched first, then group graphs depth first, entering
    /// only nodes the group capability accepts. Paths and unknown handles
    /// give `None`.
    pub fn handle_scope<G>(&self, root: &G, subject: NodeRefOf<'_, G>) -> Option<Scope<G::NodeId>>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        let owns = |graph: &G| match subject {
            NodeRef::Node(node) => graph.node_name(node).is_some(),
            NodeRef::Socket(socket) => graph.socket(socket).is_some(),
            NodeRef::Path(_) => false,
        };
        if subject.path().is_some() {
            return None;
        }

        let mut scope = Scope::root();
        self.search_groups(root, &owns, &mut scope).then_some(scope)
    }

    fn search_groups<G>(&self, graph: &G, owns: &dyn Fn(&G) -> bool, scope: &mut Scope<G::NodeId>) -> bool
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        if owns(graph) {
            return true;
        }
        for node in graph.node_ids() {
            if !self.groups().is_group(graph, node) {
                continue;
            }
            let Some(subgraph) = graph.subgraph(node) else {
                continue;
            };
            scope.push(node);
            if self.search_groups(subgraph, owns, scope) {
                return true;
            }
            scope.pop();
        }
        false
    }
}

/// Sockets of `node` in `direction` passing the address's name and index
/// filters. The occurrence counter only advances on name matches.
fn select_sockets<G: HostGraph>(
    graph: &G,
    node: G::NodeId,
    direction: SocketDirection,
    address: &Address,
) -> Vec<G::SocketId> {
    let mut occurrence = 0;
    graph
        .sockets(node, direction)
        .into_iter()
        .filter(|&socket| {
            let Some(meta) = graph.socket(socket) else {
                return false;
            };
            if address.socket_name().is_some_and(|name| name != meta.name) {
                return false;
            }
            let selected = address.socket_index().map_or(true, |index| index == occurrence);
            occurrence += 1;
            selected
        })
        .collect()
}

/// Error resolving an address
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The address string is malformed
    #[error(transparent)]
    Address(#[from] AddressError),

    /// A path segment names no node in its graph
    #[error("Invalid address `{address}`: node `{name}` not found")]
    NodeNotFound {
        /// The address being resolved
        address: String,
        /// The missing node
        name: String,
    },

    /// A path segment other than the last names a node that is not a group
    #[error("Invalid address `{address}`: parent node `{name}` is not a group")]
    NotAGroup {
        /// The address being resolved
        address: String,
        /// The non-group node
        name: String,
    },

    /// A group node has no nested graph to descend into
    #[error("Invalid address `{address}`: group `{name}` has no node tree")]
    EmptyGroup {
        /// The address being resolved
        address: String,
        /// The group node
        name: String,
    },

    /// The address selects no socket
    #[error("Invalid address `{address}`: no matching socket")]
    NoMatchingSocket {
        /// The address being resolved
        address: String,
    },
}
