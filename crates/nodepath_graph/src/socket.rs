// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs/outputs.

use crate::host::SocketDirection;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketId(pub Uuid);

impl SocketId {
    /// Create a new random socket ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SocketId {
    fn default() -> Self {
        Self::new()
    }
}

/// Data type carried by a socket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketType {
    /// Scalar value
    Float,
    /// Integer value
    Int,
    /// Boolean value
    Bool,
    /// 3D vector
    Vector,
    /// RGBA color
    Color,
    /// Shader closure
    Shader,
    /// Geometry set
    Geometry,
    /// String value
    String,
    /// Object reference
    Object,
    /// Image reference
    Image,
    /// Host-specific type
    Custom(String),
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Float => "VALUE",
            Self::Int => "INT",
            Self::Bool => "BOOLEAN",
            Self::Vector => "VECTOR",
            Self::Color => "RGBA",
            Self::Shader => "SHADER",
            Self::Geometry => "GEOMETRY",
            Self::String => "STRING",
            Self::Object => "OBJECT",
            Self::Image => "IMAGE",
            Self::Custom(name) => name,
        };
        f.write_str(name)
    }
}

/// A socket on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socket {
    /// Unique socket ID
    pub id: SocketId,
    /// Socket name
    pub name: String,
    /// Socket direction
    pub direction: SocketDirection,
    /// Data type
    pub socket_type: SocketType,
    /// Whether an input accepts more than one incoming link
    #[serde(default)]
    pub multi_input: bool,
}

impl Socket {
    /// Create a new input socket
    pub fn input(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self {
            id: SocketId::new(),
            name: name.into(),
            direction: SocketDirection::Input,
            socket_type,
            multi_input: false,
        }
    }

    /// Create a new output socket
    pub fn output(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self {
            id: SocketId::new(),
            name: name.into(),
            direction: SocketDirection::Output,
            socket_type,
            multi_input: false,
        }
    }

    /// Allow several incoming links on this input
    pub fn multi_input(mut self) -> Self {
        self.multi_input = true;
        self
    }

    /// Copy of this socket with a fresh ID, for a new node instance
    pub fn instantiate(&self) -> Self {
        Self {
            id: SocketId::new(),
            ..self.clone()
        }
    }

    /// Whether this is an output socket
    pub fn is_output(&self) -> bool {
        self.direction == SocketDirection::Output
    }
}
