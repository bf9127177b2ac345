// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader node tree templates.
//!
//! Socket names, order and types follow the host's shader nodes so that
//! addresses written against a real node tree resolve the same way here.

use crate::node::{NodeCategory, NodeRegistry, NodeTemplate};
use crate::socket::{Socket, SocketType};

/// Create the shader node registry
pub fn create_shader_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Input Nodes
    // ========================================================================

    registry.register(NodeTemplate {
        kind: "ShaderNodeValue".to_string(),
        name: "Value".to_string(),
        category: NodeCategory::Input,
        description: "Constant scalar value".to_string(),
        inputs: vec![],
        outputs: vec![Socket::output("Value", SocketType::Float)],
    });

    registry.register(NodeTemplate {
        kind: "ShaderNodeRGB".to_string(),
        name: "RGB".to_string(),
        category: NodeCategory::Input,
        description: "Constant color".to_string(),
        inputs: vec![],
        outputs: vec![Socket::output("Color", SocketType::Color)],
    });

    registry.register(NodeTemplate {
        kind: "ShaderNodeTexCoord".to_string(),
        name: "Texture Coordinate".to_string(),
        category: NodeCategory::Input,
        description: "Texture coordinate spaces".to_string(),
        inputs: vec![],
        outputs: vec![
            Socket::output("Generated", SocketType::Vector),
            Socket::output("Normal", SocketType::Vector),
            Socket::output("UV", SocketType::Vector),
            Socket::output("Object", SocketType::Vector),
        ],
    });

    // ========================================================================
    // Textures
    // ========================================================================

    registry.register(NodeTemplate {
        kind: "ShaderNodeTexImage".to_string(),
        name: "Image Texture".to_string(),
        category: NodeCategory::Texture,
        description: "Sample an image".to_string(),
        inputs: vec![Socket::input("Vector", SocketType::Vector)],
        outputs: vec![
            Socket::output("Color", SocketType::Color),
            Socket::output("Alpha", SocketType::Float),
        ],
    });

    // ========================================================================
    // Color & Converter
    // ========================================================================

    registry.register(NodeTemplate {
        kind: "ShaderNodeMix".to_string(),
        name: "Mix".to_string(),
        category: NodeCategory::Color,
        description: "Blend two colors".to_string(),
        inputs: vec![
            Socket::input("Factor", SocketType::Float),
            Socket::input("A", SocketType::Color),
            Socket::input("B", SocketType::Color),
        ],
        outputs: vec![Socket::output("Result", SocketType::Color)],
    });

    registry.register(NodeTemplate {
        kind: "ShaderNodeMath".to_string(),
        name: "Math".to_string(),
        category: NodeCategory::Converter,
        description: "Scalar math operation".to_string(),
        inputs: vec![
            Socket::input("Value", SocketType::Float),
            Socket::input("Value", SocketType::Float),
            Socket::input("Value", SocketType::Float),
        ],
        outputs: vec![Socket::output("Value", SocketType::Float)],
    });

    registry.register(NodeTemplate {
        kind: "ShaderNodeSeparateColor".to_string(),
        name: "Separate Color".to_string(),
        category: NodeCategory::Converter,
        description: "Split a color into channels".to_string(),
        inputs: vec![Socket::input("Color", SocketType::Color)],
        outputs: vec![
            Socket::output("Red", SocketType::Float),
            Socket::output("Green", SocketType::Float),
            Socket::output("Blue", SocketType::Float),
        ],
    });

    registry.register(NodeTemplate {
        kind: "ShaderNodeCombineColor".to_string(),
        name: "Combine Color".to_string(),
        category: NodeCategory::Converter,
        description: "Build a color from channels".to_string(),
        inputs: vec![
            Socket::input("Red", SocketType::Float),
            Socket::input("Green", SocketType::Float),
            Socket::input("Blue", SocketType::Float),
        ],
        outputs: vec![Socket::output("Color", SocketType::Color)],
    });

    // ========================================================================
    // Shaders & Output
    // ========================================================================

    registry.register(NodeTemplate {
        kind: "ShaderNodeBsdfPrincipled".to_string(),
        name: "Principled BSDF".to_string(),
        category: NodeCategory::Shader,
        description: "Physically based surface shader".to_string(),
        inputs: vec![
            Socket::input("Base Color", SocketType::Color),
            Socket::input("Metallic", SocketType::Float),
            Socket::input("Roughness", SocketType::Float),
            Socket::input("Normal", SocketType::Vector),
        ],
        outputs: vec![Socket::output("BSDF", SocketType::Shader)],
    });

    registry.register(NodeTemplate {
        kind: "ShaderNodeMixShader".to_string(),
        name: "Mix Shader".to_string(),
        category: NodeCategory::Shader,
        description: "Blend two shaders".to_string(),
        inputs: vec![
            Socket::input("Fac", SocketType::Float),
            Socket::input("Shader", SocketType::Shader),
            Socket::input("Shader", SocketType::Shader),
        ],
        outputs: vec![Socket::output("Shader", SocketType::Shader)],
    });

    registry.register(NodeTemplate {
        kind: "ShaderNodeOutputMaterial".to_string(),
        name: "Material Output".to_string(),
        category: NodeCategory::Output,
        description: "Final material output".to_string(),
        inputs: vec![
            Socket::input("Surface", SocketType::Shader),
            Socket::input("Volume", SocketType::Shader),
            Socket::input("Displacement", SocketType::Vector),
        ],
        outputs: vec![],
    });

    // ========================================================================
    // Groups
    // ========================================================================

    // Group sockets come from the group's interface, not the template.
    for (kind, name) in [
        ("ShaderNodeGroup", "Group"),
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
