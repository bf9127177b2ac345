// SPDX-License-Identifier: MIT OR Apache-2.0
//! Geometry node tree templates.

use crate::node::{NodeCategory, NodeRegistry, NodeTemplate};
use crate::socket::{Socket, SocketType};

/// Create the geometry node registry
pub fn create_geometry_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    registry.register(NodeTemplate {
        kind: "GeometryNodeMeshCube".to_string(),
        name: "Cube".to_string(),
        category: NodeCategory::Geometry,
        description: "Generate a cuboid mesh".to_string(),
        inputs: vec![
            Socket::input("Size", SocketType::Vector),
            Socket::input("Vertices X", SocketType::Int),
            Socket::input("Vertices Y", SocketType::Int),
            Socket::input("Vertices Z", SocketType::Int),
        ],
        outputs: vec![Socket::output("Mesh", SocketType::Geometry)],
    });

    registry.register(NodeTemplate {
        kind: "GeometryNodeInputPosition".to_string(),
        name: "Position".to_string(),
        category: NodeCategory::Input,
        description: "Point positions".to_string(),
        inputs: vec![],
        outputs: vec![Socket::output("Position", SocketType::Vector)],
    });

    registry.register(NodeTemplate {
        kind: "GeometryNodeTransform".to_string(),
        name: "Transform Geometry".to_string(),
        category: NodeCategory::Geometry,
        description: "Translate, rotate and scale geometry".to_string(),
        inputs: vec![
            Socket::input("Geometry", SocketType::Geometry),
            Socket::input("Translation", SocketType::Vector),
            Socket::input("Rotation", SocketType::Vector),
            Socket::input("Scale", SocketType::Vector),
        ],
        outputs: vec![Socket::output("Geometry", SocketType::Geometry)],
    });

    registry.register(NodeTemplate {
        kind: "GeometryNodeSetPosition".to_string(),
        name: "Set Position".to_string(),
        category: NodeCategory::Geometry,
        description: "Move points".to_string(),
        inputs: vec![
            Socket::input("Geometry", SocketType::Geometry),
            Socket::input("Selection", SocketType::Bool),
            Socket::input("Position", SocketType::Vector),
            Socket::input("Offset", SocketType::Vector),
        ],
        outputs: vec![Socket::output("Geometry", SocketType::Geometry)],
    });

    registry.register(NodeTemplate {
        kind: "GeometryNodeJoinGeometry".to_string(),
        name: "Join Geometry".to_string(),
        category: NodeCategory::Geometry,
        description: "Merge geometry sets".to_string(),
        inputs: vec![Socket::input("Geometry", SocketType::Geometry).multi_input()],
        outputs: vec![Socket::output("Geometry", SocketType::Geometry)],
    });

    for (kind, name) in [
        ("GeometryNodeGroup", "Group"),
        ("NodeGroupInput", "Group Input"),
        ("NodeGroupOutput", "Group Output"),
    ] {
        registry.register(NodeTemplate {
            kind: kind.to_string(),
            name: name.to_string(),
            category: NodeCategory::Group,
            description: String::new(),
            inputs: vec![],
            outputs: vec![],
        });
    }

    registry
}
