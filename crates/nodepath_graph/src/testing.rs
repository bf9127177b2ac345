// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared fixtures for unit tests.

use crate::graph::Graph;
use crate::graphs::shader::create_shader_registry;
use crate::node::{Node, NodeId};
use crate::socket::{Socket, SocketId, SocketType};

/// A material tree with a nested group:
///
/// ```text
/// Material
/// ├── RGB, Value, Mix, Math, Principled BSDF, Material Output
/// ├── Script        inputs a, b, b, c / outputs a, b
/// ├── Broken        group kind without a node tree
/// └── Group         -> Group Input, Math, Group Output, Inner -> Value
/// ```
pub(crate) fn material_graph() -> Graph {
    let registry = create_shader_registry();
    let create = |kind: &str| registry.create_node(kind).unwrap();

    let mut inner = Graph::new("Inner Tree");
    inner.add_node(create("ShaderNodeValue"));

    let mut group_tree = Graph::new("Group Tree");
    group_tree.add_node(
        create("NodeGroupInput")
            .with_output(Socket::output("Color", SocketType::Color))
            .with_output(Socket::output("Strength", SocketType::Float)),
    );
    group_tree.add_node(create("ShaderNodeMath"));
    group_tree.add_node(create("NodeGroupOutput").with_input(Socket::input("Result", SocketType::Float)));
    group_tree.add_node(Node::group("ShaderNodeGroup", "Inner", inner));

    let mut graph = Graph::new("Material");
    graph.add_node(create("ShaderNodeRGB"));
    graph.add_node(create("ShaderNodeValue"));
    graph.add_node(create("ShaderNodeMix"));
    graph.add_node(create("ShaderNodeMath"));
    graph.add_node(create("ShaderNodeBsdfPrincipled"));
    graph.add_node(create("ShaderNodeOutputMaterial"));
    graph.add_node(
        Node::bare("ShaderNodeScript", "Script")
            .with_input(Socket::input("a", SocketType::Float))
            .with_input(Socket::input("b", SocketType::Float))
            .with_input(Socket::input("b", SocketType::Vector))
            .with_input(Socket::input("c", SocketType::Float))
            .with_output(Socket::output("a", SocketType::Float))
            .with_output(Socket::output("b", SocketType::Float)),
    );
    graph.add_node(Node::bare("ShaderNodeGroup", "Broken"));
    graph.add_node(
        Node::group("ShaderNodeGroup", "Group", group_tree)
            .with_input(Socket::input("Color", SocketType::Color))
            .with_input(Socket::input("Strength", SocketType::Float))
            .with_output(Socket::output("Result", SocketType::Float)),
    );
    graph
}

/// ID of a node by name
pub(crate) fn node_id(graph: &Graph, name: &str) -> NodeId {
    graph.node_by_name(name).unwrap().id
}

/// ID of the `index`th input of a node
pub(crate) fn input_id(graph: &Graph, node: &str, index: usize) -> SocketId {
    graph.node_by_name(node).unwrap().inputs[index].id
}

/// ID of the `index`th output of a node
pub(crate) fn output_id(graph: &Graph, node: &str, index: usize) -> SocketId {
    graph.node_by_name(node).unwrap().outputs[index].id
}
