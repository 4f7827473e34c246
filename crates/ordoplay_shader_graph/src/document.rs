// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph documents: the serialized form editors hand over.
//!
//! A [`GraphDocument`] is plain data. Turning it into a [`Graph`] runs the
//! load-time checks: node parameters must match their kind, literals must be
//! finite, node IDs must be unique, and under a strict [`ValidationPolicy`]
//! duplicate output nodes and duplicate input edges are rejected.
//! Unknown kinds and dangling edges are accepted; the compiler resolves them
//! to defaults.

use crate::connection::Connection;
use crate::graph::{Graph, GraphId};
use crate::kind::NodeKind;
use crate::node::{Node, NodeId, NodeRegistry};
use crate::params::ParamShape;
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// How load-time validation treats "first match wins" situations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Reject graphs with more than one output node
    pub reject_duplicate_outputs: bool,
    /// Reject graphs with more than one edge into the same input port
    pub reject_duplicate_input_edges: bool,
}

impl ValidationPolicy {
    /// Accept duplicates; the compiler uses the first match
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Reject both kinds of duplicates
    pub fn strict() -> Self {
        Self {
            reject_duplicate_outputs: true,
            reject_duplicate_input_edges: true,
        }
    }
}

/// Error when loading or validating a graph document
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// File could not be read
    #[error("Failed to read graph document: {0}")]
    Io(#[from] std::io::Error),

    /// RON syntax or shape error
    #[error("Invalid RON graph document: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("Failed to serialize graph document: {0}")]
    RonWrite(#[from] ron::Error),

    /// JSON syntax or shape error
    #[error("Invalid JSON graph document: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither `.ron` nor `.json`
    #[error("Unsupported graph document format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// Two nodes share an ID
    #[error("Duplicate node ID: {0}")]
    DuplicateNodeId(NodeId),

    /// Node parameters do not match the node kind
    #[error("Node {node} ({kind}) has {found} parameters, expected {expected}")]
    ParamsMismatch {
        /// Offending node
        node: NodeId,
        /// Its kind
        kind: String,
        /// Shape the kind requires
        expected: ParamShape,
        /// Shape the node carries
        found: ParamShape,
    },

    /// Node parameters contain NaN or infinity
    #[error("Node {0} has non-finite parameter values")]
    NonFiniteParams(NodeId),

    /// More than one output node (strict policy)
    #[error("Graph has more than one output node: {first} and {duplicate}")]
    DuplicateOutputNode {
        /// Output node the compiler would use
        first: NodeId,
        /// Ignored output node
        duplicate: NodeId,
    },

    /// More than one edge into one input port (strict policy)
    #[error("Input port '{port}' of node {node} has more than one incoming edge")]
    DuplicateInputEdge {
        /// Target node
        node: NodeId,
        /// Target port
        port: PortId,
    },
}

/// Serialized graph snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Graph ID
    #[serde(default)]
    pub id: GraphId,
    /// Graph name
    pub name: String,
    /// Nodes, in editor order
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges, in editor order
    #[serde(default)]
    pub edges: Vec<Connection>,
}

impl GraphDocument {
    /// Parse a RON document
    pub fn from_ron(source: &str) -> Result<Self, ValidationError> {
        Ok(ron::from_str(source)?)
    }

    /// Parse a JSON document
    pub fn from_json(source: &str) -> Result<Self, ValidationError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ValidationError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ValidationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the document and build the graph
    pub fn into_graph(
        self,
        registry: &NodeRegistry,
        policy: &ValidationPolicy,
    ) -> Result<Graph, ValidationError> {
        let mut seen = HashSet::new();
        let mut first_output: Option<NodeId> = None;

        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(ValidationError::DuplicateNodeId(node.id));
            }

            if registry.get(&node.kind).is_none() {
                tracing::debug!("Node {} has unknown kind '{}', it will emit no code", node.id, node.kind);
            }

            let Some(kind) = node.node_kind() else {
                continue;
            };
            let expected = kind.expected_params();
            let found = node.params.shape();
            if found != expected {
                return Err(ValidationError::ParamsMismatch {
                    node: node.id,
                    kind: node.kind.clone(),
                    expected,
                    found,
                });
            }
            if !node.params.is_finite() {
                return Err(ValidationError::NonFiniteParams(node.id));
            }

            if kind == NodeKind::PbrOutput {
                match first_output {
                    None => first_output = Some(node.id),
                    Some(first) if policy.reject_duplicate_outputs => {
                        return Err(ValidationError::DuplicateOutputNode {
                            first,
                            duplicate: node.id,
                        });
                    }
                    Some(first) => {
                        tracing::warn!("Ignoring output node {}, using first output node {first}", node.id);
                    }
                }
            }
        }

        let mut targets = HashSet::new();
        for edge in &self.edges {
            if targets.insert((edge.to_node, edge.to_port.clone())) {
                continue;
            }
            if policy.reject_duplicate_input_edges {
                return Err(ValidationError::DuplicateInputEdge {
                    node: edge.to_node,
                    port: edge.to_port.clone(),
                });
            }
            tracing::warn!(
                "Ignoring extra edge into port '{}' of node {}, first edge wins",
                edge.to_port,
                edge.to_node
            );
        }

        let mut graph = Graph::with_id(self.id, self.name);
        for node in self.nodes {
            graph.add_node(node);
        }
        for edge in self.edges {
            graph.push_connection(edge);
        }

        tracing::debug!(
            "Loaded graph '{}' with {} nodes and {} edges",
            graph.name,
            graph.node_count(),
            graph.connection_count()
        );
        Ok(graph)
    }
}

impl Graph {
    /// Snapshot the graph as a document
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            id: self.id,
            name: self.name.clone(),
            nodes: self.nodes().cloned().collect(),
            edges: self.connections().cloned().collect(),
        }
    }
}

/// Load and validate a `.ron` or `.json` graph document
pub fn load_graph(
    path: &Path,
    registry: &NodeRegistry,
    policy: &ValidationPolicy,
) -> Result<Graph, ValidationError> {
    let source = std::fs::read_to_string(path)?;
    let document = match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => GraphDocument::from_ron(&source)?,
        Some("json") => GraphDocument::from_json(&source)?,
        _ => return Err(ValidationError::UnsupportedFormat(path.to_path_buf())),
    };
    document.into_graph(registry, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::create_shader_registry;
    use crate::params::NodeParams;

    fn document(nodes: Vec<Node>, edges: Vec<Connection>) -> GraphDocument {
        GraphDocument {
            id: GraphId::new(),
            name: "Doc".to_string(),
            nodes,
            edges,
        }
    }

    #[test]
    fn test_ron_round_trip() {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Round Trip");
        let color = graph.add_node(
            Node::new("color_constant").with_params(NodeParams::Color { value: [1.0, 0.5, 0.25, 1.0] }),
        );
        let output = graph.add_node(Node::new("pbr_output"));
        graph.connect(color, "color", output, "base_color", &registry).unwrap();

        let ron = graph.to_document().to_ron().unwrap();
        let loaded = GraphDocument::from_ron(&ron)
            .unwrap()
            .into_graph(&registry, &ValidationPolicy::default())
            .unwrap();
        assert_eq!(loaded.id, graph.id);
        assert_eq!(loaded.node_count(), 2);
        assert_eq!(loaded.connection_count(), 1);
        assert_eq!(
            loaded.node(color).unwrap().params,
            NodeParams::Color { value: [1.0, 0.5, 0.25, 1.0] }
        );
    }

    #[test]
    fn test_json_document() {
        let json = r#"{
            "name": "From Editor",
            "nodes": [
                { "id": "00000000-0000-0000-0000-000000000001", "kind": "pbr_output" },
                { "id": "00000000-0000-0000-0000-000000000002", "kind": "float_constant",
                  "params": { "Float": { "value": 0.25 } } }
            ],
            "edges": [
                { "id": "00000000-0000-0000-0000-0000000000e1",
                  "from_node": "00000000-0000-0000-0000-000000000002", "from_port": "value",
                  "to_node": "00000000-0000-0000-0000-000000000001", "to_port": "roughness" }
            ]
        }"#;
        let graph = GraphDocument::from_json(json)
            .unwrap()
            .into_graph(&create_shader_registry(), &ValidationPolicy::default())
            .unwrap();
        assert_eq!(graph.name, "From Editor");
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn test_params_mismatch_rejected() {
        let doc = document(vec![Node::new("color_constant").with_params(NodeParams::Float { value: 1.0 })], vec![]);
        let err = doc.into_graph(&create_shader_registry(), &ValidationPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ParamsMismatch { expected: ParamShape::Color, found: ParamShape::Float, .. }
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let doc = document(
            vec![Node::new("vec2_constant").with_params(NodeParams::Vec2 { value: [f32::INFINITY, 0.0] })],
            vec![],
        );
        let err = doc.into_graph(&create_shader_registry(), &ValidationPolicy::default()).unwrap_err();
        assert!(matches!(err, ValidationError::NonFiniteParams(_)));
    }

    #[test]
    fn test_duplicate_node_id_rejected() {
        let node = Node::new("uv");
        let doc = document(vec![node.clone(), node], vec![]);
        let err = doc.into_graph(&create_shader_registry(), &ValidationPolicy::default()).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateNodeId(_)));
    }

    #[test]
    fn test_unknown_kind_and_dangling_edge_accepted() {
        let custom = Node::new("custom_blur");
        let edge = Connection::new(NodeId::new(), "result", custom.id, "input");
        let graph = document(vec![custom], vec![edge])
            .into_graph(&create_shader_registry(), &ValidationPolicy::strict())
            .unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn test_duplicate_policy() {
        let first = Node::new("pbr_output");
        let second = Node::new("pbr_output");
        let time = Node::new("time");
        let edges = vec![
            Connection::new(time.id, "time", first.id, "metallic"),
            Connection::new(time.id, "time", first.id, "metallic"),
        ];
        let doc = document(vec![first.clone(), second.clone(), time], edges);
        let registry = create_shader_registry();

        assert!(doc.clone().into_graph(&registry, &ValidationPolicy::permissive()).is_ok());

        let outputs_only = ValidationPolicy { reject_duplicate_outputs: true, reject_duplicate_input_edges: false };
        match doc.clone().into_graph(&registry, &outputs_only) {
            Err(ValidationError::DuplicateOutputNode { first: a, duplicate: b }) => {
                assert_eq!((a, b), (first.id, second.id));
            }
            other => panic!("expected duplicate output error, got {other:?}"),
        }

        let edges_only = ValidationPolicy { reject_duplicate_outputs: false, reject_duplicate_input_edges: true };
        assert!(matches!(
            doc.into_graph(&registry, &edges_only),
            Err(ValidationError::DuplicateInputEdge { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let registry = create_shader_registry();
        let dir = std::env::temp_dir().join(format!("ordoplay_doc_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("graph.txt");
        std::fs::write(&path, "").unwrap();
        let err = load_graph(&path, &registry, &ValidationPolicy::default()).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFormat(_)));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
