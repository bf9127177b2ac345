// SPDX-License-Identifier: MIT OR Apache-2.0
//! Automatic linking between two socket selections.
//!
//! Outputs are visited in order. Each one takes the first still-open input
//! of the same type. When exactly one output and one input are selected
//! they are linked whatever their types, so a single explicit pair can
//! request a converting link.

use crate::host::{GroupCapability, HostError, HostGraph, SocketDirection};
use crate::resolve::{ResolveError, ResolutionOf};
use crate::tools::{handle_sockets, NodeRefOf, NodeTools};

/// Matching state of a candidate socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    /// May still take part in a new link
    Open,
    /// Already linked, before or during this call
    Satisfied,
}

#[derive(Debug, Clone, Copy)]
struct Slot<S> {
    socket: S,
    state: SlotState,
}

impl<S: Copy> Slot<S> {
    fn new<G>(graph: &G, socket: S, preserve_existing: bool) -> Self
    where
        G: HostGraph<SocketId = S>,
    {
        let state = if preserve_existing && !graph.socket_links(socket).is_empty() {
            SlotState::Satisfied
        } else {
            SlotState::Open
        };
        Self { socket, state }
    }

    fn is_open(&self) -> bool {
        self.state == SlotState::Open
    }

    fn satisfy(&mut self) {
        self.state = SlotState::Satisfied;
    }
}

/// Decide which output/input pairs to link, without touching the graph.
///
/// With `preserve_existing`, sockets that already have a link are left
/// alone on both sides. An input is used at most once per call.
pub fn plan_links<G: HostGraph>(
    graph: &G,
    outputs: &[G::SocketId],
    inputs: &[G::SocketId],
    preserve_existing: bool,
) -> Vec<(G::SocketId, G::SocketId)> {
    let outputs: Vec<_> = outputs
        .iter()
        .map(|&socket| Slot::new(graph, socket, preserve_existing))
        .collect();
    let mut inputs: Vec<_> = inputs
        .iter()
        .map(|&socket| Slot::new(graph, socket, preserve_existing))
        .collect();

    let singleton = outputs.len() == 1 && inputs.len() == 1;
    let socket_type = |socket| graph.socket(socket).map(|meta| meta.socket_type);

    let mut plan = Vec::new();
    for output in outputs.iter().filter(|slot| slot.is_open()) {
        let output_type = socket_type(output.socket);
        let candidate = inputs.iter_mut().filter(|slot| slot.is_open()).find(|input| {
            singleton || (output_type.is_some() && socket_type(input.socket) == output_type)
        });

        match candidate {
            Some(input) => {
                input.satisfy();
                plan.push((output.socket, input.socket));
            }
            None => tracing::trace!(output = ?output.socket, "no open input of matching type"),
        }
    }
    plan
}

impl<C> NodeTools<C> {
    /// Link outputs selected by `from` to inputs selected by `to`.
    ///
    /// Returns the number of links created; an empty selection on either
    /// side creates none. Links are created in the graph a `to` path
    /// resolves into, else the graph a `from` path resolves into. With two
    /// handles, the graph owning the `to` handle is used, else the one
    /// owning `from`, else `root`. Handles are read in the chosen graph.
    ///
    /// Links created before a host error stay in place.
    pub fn link<'a, G>(
        &self,
        root: &mut G,
        from: NodeRefOf<'a, G>,
        to: NodeRefOf<'a, G>,
        preserve_existing: bool,
    ) -> Result<usize, LinkError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        let from_resolved = self.resolve_ref(&*root, from)?;
        let to_resolved = self.resolve_ref(&*root, to)?;

        let scope = match (&from_resolved, &to_resolved) {
            (Some(f), Some(t)) if f.scope != t.scope => {
                return Err(LinkError::CrossScope {
                    from: from.path().unwrap_or_default().to_string(),
                    to: to.path().unwrap_or_default().to_string(),
                });
            }
            (_, Some(t)) => t.scope.clone(),
            (Some(f), None) => f.scope.clone(),
            (None, None) => self
                .handle_scope(&*root, to)
                .or_else(|| self.handle_scope(&*root, from))
                .unwrap_or_default(),
        };
        let graph = scope.graph_mut(root).ok_or(LinkError::StaleScope)?;

        let outputs = match from_resolved {
            Some(resolved) => resolved.outputs,
            None => handle_sockets(&*graph, from, SocketDirection::Output),
        };
        let inputs = match to_resolved {
            Some(resolved) => resolved.inputs,
            None => handle_sockets(&*graph, to, SocketDirection::Input),
        };

        let plan = plan_links(&*graph, &outputs, &inputs, preserve_existing);

        let mut created = 0;
        for (output, input) in plan {
            if let Err(source) = graph.add_link(output, input) {
                tracing::warn!(?output, ?input, "host rejected link: {}", source);
                return Err(LinkError::Host { created, source });
            }
            created += 1;
        }

        tracing::debug!(
            outputs = outputs.len(),
            inputs = inputs.len(),
            created,
            "linked sockets"
        );
        Ok(created)
    }

    /// Resolve a path reference; handles resolve to `None`
    pub(crate) fn resolve_ref<G>(
        &self,
        root: &G,
        subject: NodeRefOf<'_, G>,
    ) -> Result<Option<ResolutionOf<G>>, ResolveError>
    where
        G: HostGraph,
        C: GroupCapability<G>,
    {
        subject.path().map(|path| self.resolve(root, path)).transpose()
    }
}

/// Error while linking
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// An endpoint address could not be resolved
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The endpoints live in different node trees
    #[error("Cannot link `{from}` to `{to}`: endpoints are in different node trees")]
    CrossScope {
        /// Source address
        from: String,
        /// Destination address
        to: String,
    },

    /// The resolved node tree could not be entered again
    #[error("Resolved node tree is no longer reachable")]
    StaleScope,

    /// The host refused a link
    #[error("Host rejected a link after {created} link(s) were created: {source}")]
    Host {
        /// Links created before the failure
        created: usize,
        /// Host error
        #[source]
        source: HostError,
    },
}
