// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compact string addresses for nodes and sockets.
//!
//! An address names a node, optionally nested inside group nodes, and can
//! narrow the selection down to a socket:
//!
//! ```text
//! [+|-]Group/Inner/Node[:Socket[index]]
//! ```
//!
//! - `+` keeps only input sockets, `-` keeps only output sockets. Without a
//!   marker both directions are eligible.
//! - Only the last `:` separates the socket, so node names may contain `:`.
//! - `Socket[1]` picks the second socket named `Socket` in each direction.
//!   A bracket suffix that is not a plain number is read as part of the
//!   socket name.

use std::fmt;
use std::str::FromStr;

/// Marker restricting an address to input sockets
pub const INPUT_SYMBOL: char = '+';
/// Marker restricting an address to output sockets
pub const OUTPUT_SYMBOL: char = '-';
/// Separates the node path from the socket specifier
pub const SOCKET_DELIMITER: char = ':';
/// Separates group nodes in a node path
pub const PATH_DELIMITER: char = '/';

/// A parsed socket address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    /// Group nodes to descend through, then the leaf node. Never empty.
    path: Vec<String>,
    socket_name: Option<String>,
    socket_index: Option<usize>,
    includes_inputs: bool,
    includes_outputs: bool,
}

impl Address {
    /// Parse an address string
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        if address.is_empty() {
            return Err(AddressError::syntax(address, "address is empty"));
        }

        // Only the first character can be a direction marker.
        let (includes_inputs, includes_outputs, rest) =
            if let Some(rest) = address.strip_prefix(INPUT_SYMBOL) {
                (true, false, rest)
            } else if let Some(rest) = address.strip_prefix(OUTPUT_SYMBOL) {
                (false, true, rest)
            } else {
                (true, true, address)
            };

        let (node_part, socket_spec) = match rest.rsplit_once(SOCKET_DELIMITER) {
            Some((node_part, socket_spec)) => (node_part, Some(socket_spec)),
            None => (rest, None),
        };

        if node_part.is_empty() {
            return Err(AddressError::syntax(address, "missing node name"));
        }

        let path = node_part.split(PATH_DELIMITER).map(str::to_owned).collect();

        let (socket_name, socket_index) = match socket_spec {
            Some(spec) => {
                let (name, index) = split_socket_index(spec);
                (Some(name.to_owned()), index)
            }
            None => (None, None),
        };

        Ok(Self {
            path,
            socket_name,
            socket_index,
            includes_inputs,
            includes_outputs,
        })
    }

    /// Node names from the outermost group down to the addressed node
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Name of the addressed node
    pub fn leaf(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }

    /// Group nodes that must be descended through to reach the leaf
    pub fn ancestors(&self) -> &[String] {
        self.path.split_last().map_or(&[], |(_, ancestors)| ancestors)
    }

    /// Socket name filter, if any
    pub fn socket_name(&self) -> Option<&str> {
        self.socket_name.as_deref()
    }

    /// Zero-based occurrence among sockets passing the name filter
    pub fn socket_index(&self) -> Option<usize> {
        self.socket_index
    }

    /// Whether input sockets are selected
    pub fn includes_inputs(&self) -> bool {
        self.includes_inputs
    }

    /// Whether output sockets are selected
    pub fn includes_outputs(&self) -> bool {
        self.includes_outputs
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.includes_inputs, self.includes_outputs) {
            (true, false) => write!(f, "{INPUT_SYMBOL}")?,
            (false, true) => write!(f, "{OUTPUT_SYMBOL}")?,
            _ => {}
        }
        write_path(f, &self.path)?;
        if let Some(name) = &self.socket_name {
            write!(f, "{SOCKET_DELIMITER}{name}")?;
            if let Some(index) = self.socket_index {
                write!(f, "[{index}]")?;
            }
        }
        Ok(())
    }
}

/// Socket part of an address built with [`format_address`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketRequest<'a> {
    /// Every socket in the requested direction
    Any,
    /// Sockets with this name in the requested direction
    Named(&'a str),
}

/// Build an address string from a node path and an optional socket request.
///
/// This is the inverse of [`Address::parse`]: an `input` request produces
/// an input-only address, an `output` request an output-only one, and
/// neither produces a plain node address. Requesting both is an error.
pub fn format_address<S: AsRef<str>>(
    path: &[S],
    input: Option<SocketRequest<'_>>,
    output: Option<SocketRequest<'_>>,
) -> Result<String, AddressError> {
    let (symbol, request) = match (input, output) {
        (Some(_), Some(_)) => {
            return Err(AddressError::Usage(
                "an address cannot be both input-only and output-only".to_string(),
            ));
        }
        (Some(request), None) => (Some(INPUT_SYMBOL), Some(request)),
        (None, Some(request)) => (Some(OUTPUT_SYMBOL), Some(request)),
        (None, None) => (None, None),
    };

    let mut address = String::new();
    if let Some(symbol) = symbol {
        address.push(symbol);
    }
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            address.push(PATH_DELIMITER);
        }
        address.push_str(segment.as_ref());
    }
    if let Some(SocketRequest::Named(name)) = request {
        address.push(SOCKET_DELIMITER);
        address.push_str(name);
    }
    Ok(address)
}

fn write_path(f: &mut fmt::Formatter<'_>, path: &[String]) -> fmt::Result {
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            write!(f, "{PATH_DELIMITER}")?;
        }
        f.write_str(segment)?;
    }
    Ok(())
}

/// Split `name[3]` into `("name", Some(3))`. Anything that is not a
/// trailing bracketed number stays part of the name.
fn split_socket_index(spec: &str) -> (&str, Option<usize>) {
    let Some(body) = spec.strip_suffix(']') else {
        return (spec, None);
    };
    let Some((name, index)) = body.rsplit_once('[') else {
        return (spec, None);
    };
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return (spec, None);
    }
    match index.parse() {
        Ok(index) => (name, Some(index)),
        Err(_) => (spec, None),
    }
}

/// Error in an address string or address request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The address string cannot be parsed
    #[error("Invalid address `{address}`: {reason}")]
    Syntax {
        /// The offending address
        address: String,
        /// What is wrong with it
        reason: String,
    },

    /// The request is contradictory
    #[error("Invalid address request: {0}")]
    Usage(String),
}

impl AddressError {
    fn syntax(address: &str, reason: &str) -> Self {
        Self::Syntax {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}
