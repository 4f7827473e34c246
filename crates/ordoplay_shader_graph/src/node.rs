// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the shader graph.

use crate::kind::NodeKind;
use crate::params::{NodeParams, ParamShape};
use crate::port::{Port, PortId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Built-in fragment inputs and constants
    Input,
    /// Material output
    Output,
    /// Math operations
    Math,
    /// Vector construction and decomposition
    Vector,
    /// Color operations
    Color,
    /// Procedural patterns
    Procedural,
    /// Texture operations
    Texture,
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Unique kind identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Input ports, in declaration order
    pub inputs: Vec<Port>,
    /// Output ports, in declaration order
    pub outputs: Vec<Port>,
}

impl NodeType {
    /// Get an input port by ID
    pub fn input(&self, port_id: &PortId) -> Option<&Port> {
        self.inputs.iter().find(|p| p.id == *port_id)
    }

    /// Get an output port by ID
    pub fn output(&self, port_id: &PortId) -> Option<&Port> {
        self.outputs.iter().find(|p| p.id == *port_id)
    }

    /// Get a port by ID
    pub fn port(&self, port_id: &PortId) -> Option<&Port> {
        self.input(port_id).or_else(|| self.output(port_id))
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Node kind, looked up in the [`NodeRegistry`]
    pub kind: String,
    /// Position in the editor canvas; never read by the compiler
    #[serde(default)]
    pub position: [f32; 2],
    /// Per-kind parameters
    #[serde(default)]
    pub params: NodeParams,
}

impl Node {
    /// Create a new node of the given kind with that kind's default parameters
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        let shape = NodeKind::parse(&kind).map_or(ParamShape::None, NodeKind::expected_params);
        Self {
            id: NodeId::new(),
            kind,
            position: [0.0, 0.0],
            params: NodeParams::default_for(shape),
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Set the parameters
    pub fn with_params(mut self, params: NodeParams) -> Self {
        self.params = params;
        self
    }

    /// The closed kind of this node, if the kind string is known to the compiler
    pub fn node_kind(&self) -> Option<NodeKind> {
        NodeKind::parse(&self.kind)
    }
}

/// Registry of available node types
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    /// Registered node types by ID
    types: indexmap::IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: indexmap::IndexMap::new(),
        }
    }

    /// Register a node type
    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.id.clone(), node_type);
    }

    /// Get a node type by ID
    pub fn get(&self, id: &str) -> Option<&NodeType> {
        self.types.get(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Get types by category
    pub fn types_in_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeType> {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Create a node from a type ID
    pub fn create_node(&self, type_id: &str) -> Option<Node> {
        self.get(type_id).map(|t| Node::new(t.id.clone()))
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortType;

    #[test]
    fn test_new_node_gets_kind_defaults() {
        let node = Node::new("color_constant");
        assert_eq!(node.params.shape(), ParamShape::Color);
        assert_eq!(node.node_kind(), Some(NodeKind::ColorConstant));

        let custom = Node::new("my_custom_kind");
        assert_eq!(custom.params, NodeParams::None);
        assert_eq!(custom.node_kind(), None);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = NodeRegistry::new();
        registry.register(NodeType {
            id: "custom".to_string(),
            name: "Custom".to_string(),
            category: NodeCategory::Math,
            description: String::new(),
            inputs: vec![Port::input("a", "A", PortType::Float)],
            outputs: vec![Port::output("result", "Result", PortType::Float)],
        });

        let node_type = registry.get("custom").unwrap();
        assert!(node_type.input(&PortId::from("a")).is_some());
        assert!(node_type.output(&PortId::from("a")).is_none());
        assert!(node_type.port(&PortId::from("result")).is_some());
        assert_eq!(registry.types_in_category(NodeCategory::Math).count(), 1);
        assert!(registry.create_node("missing").is_none());
    }
}
