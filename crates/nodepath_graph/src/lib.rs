// SPDX-License-Identifier: MIT OR Apache-2.0
//! Address-based access to node graphs.
//!
//! This crate lets tooling name nodes and sockets with short text
//! addresses and act on them:
//! - Parse addresses such as `+Group/Mix:Color[1]`
//! - Resolve them through nested group graphs
//! - Auto-link two socket selections by type
//! - Query and remove links
//!
//! ## Architecture
//!
//! The tools work against any graph implementing [`HostGraph`]. Which
//! nodes count as groups is decided by a [`GroupCapability`], by default
//! a [`GroupKinds`] set of node kinds. [`Graph`] is an in-memory host with
//! RON serialization support, and [`graphs`] provides node registries for
//! shader and geometry trees.

pub mod address;
pub mod host;
pub mod socket;
pub mod node;
pub mod link;
pub mod graph;
pub mod graphs;
pub mod config;
pub mod tools;
pub mod resolve;
pub mod autolink;
pub mod query;

#[cfg(test)]
mod testing;

pub use address::{format_address, Address, AddressError, SocketRequest};
pub use host::{GroupCapability, GroupKinds, HostError, HostGraph, LinkEnds, SocketDirection, SocketMeta};
pub use socket::{Socket, SocketId, SocketType};
pub use node::{Node, NodeCategory, NodeId, NodeRegistry, NodeTemplate};
pub use link::{Link, LinkId};
pub use graph::{Graph, GraphError};
pub use config::{ConfigError, ToolsConfig};
pub use tools::{NodeRef, NodeRefOf, NodeTools};
pub use resolve::{Resolution, ResolutionOf, ResolveError, Scope};
pub use autolink::{plan_links, LinkError};
