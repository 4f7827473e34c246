// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.
//!
//! Node and connection order is insertion order. Both orders are observable:
//! the topological sort seeds its queue in node order, and every "which one
//! wins" lookup ([`Graph::output_node`], [`Graph::connection_to`]) takes the
//! first match of a linear scan.

use crate::connection::{Connection, ConnectionId};
use crate::kind::NodeKind;
use crate::node::{Node, NodeId, NodeRegistry};
use crate::port::{PortDirection, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

/// Unique identifier for a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(pub Uuid);

impl GraphId {
    /// Create a new random graph ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::new()
    }
}

/// A shader node graph snapshot
#[derive(Debug, Clone)]
pub struct Graph {
    /// Graph ID
    pub id: GraphId,
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(GraphId::new(), name)
    }

    /// Create a new empty graph with a known ID
    pub fn with_id(id: GraphId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections.retain(|_, c| !c.involves_node(node_id));
        // shift_remove keeps the remaining node order stable
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The first node of the output kind, in node order
    pub fn output_node(&self) -> Option<&Node> {
        self.nodes
            .values()
            .find(|n| n.node_kind() == Some(NodeKind::PbrOutput))
    }

    /// Add a connection after validating it against the node catalog
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: impl Into<PortId>,
        to_node: NodeId,
        to_port: impl Into<PortId>,
        registry: &NodeRegistry,
    ) -> Result<ConnectionId, ConnectionError> {
        let from_port = from_port.into();
        let to_port = to_port.into();

        // Validate nodes exist
        let source_node = self.nodes.get(&from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?;
        let target_node = self.nodes.get(&to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?;

        let source_type = registry.get(&source_node.kind)
            .ok_or_else(|| ConnectionError::UnknownNodeType(source_node.kind.clone()))?;
        let target_type = registry.get(&target_node.kind)
            .ok_or_else(|| ConnectionError::UnknownNodeType(target_node.kind.clone()))?;

        // Validate ports exist on the right side of each node
        let source_port = source_type.port(&from_port)
            .ok_or_else(|| ConnectionError::PortNotFound(from_port.clone()))?;
        let target_port = target_type.port(&to_port)
            .ok_or_else(|| ConnectionError::PortNotFound(to_port.clone()))?;

        if source_port.direction != PortDirection::Output
            || target_port.direction != PortDirection::Input
            || !source_port.can_connect(target_port)
        {
            return Err(ConnectionError::IncompatiblePorts);
        }

        // Inputs accept a single connection
        if self.connection_to(to_node, &to_port).is_some() {
            return Err(ConnectionError::PortAlreadyConnected(to_port));
        }

        // Prevent self-loops
        if from_node == to_node {
            return Err(ConnectionError::SelfLoop);
        }

        Ok(self.push_connection(Connection::new(from_node, from_port, to_node, to_port)))
    }

    /// Append a connection without validation.
    ///
    /// Loaders use this to reproduce an editor snapshot verbatim, including
    /// dangling or duplicate edges.
    pub fn push_connection(&mut self, connection: Connection) -> ConnectionId {
        let id = connection.id;
        self.connections.insert(id, connection);
        id
    }

    /// Remove a connection
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        self.connections.shift_remove(&connection_id)
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// The first connection feeding an input port, in connection order
    pub fn connection_to(&self, node_id: NodeId, port_id: &PortId) -> Option<&Connection> {
        self.connections.values().find(|c| c.targets(node_id, port_id))
    }

    /// Get connections involving a node
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.involves_node(node_id))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get nodes in dependency order (Kahn's algorithm).
    ///
    /// The queue is seeded with zero in-degree nodes in node order, so the
    /// result is deterministic for a given graph. Connections with an endpoint
    /// outside the graph are ignored.
    pub fn topological_order(&self) -> Result<Vec<NodeId>, CycleError> {
        let mut in_degree: IndexMap<NodeId, usize> =
            self.nodes.keys().map(|id| (*id, 0)).collect();
        let mut outgoing: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

        for connection in self.connections.values() {
            if !self.nodes.contains_key(&connection.from_node) {
                continue;
            }
            let Some(degree) = in_degree.get_mut(&connection.to_node) else {
                continue;
            };
            *degree += 1;
            outgoing.entry(connection.from_node).or_default().push(connection.to_node);
        }

        let mut queue: VecDeque<NodeId> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(node_id) = queue.pop_front() {
            order.push(node_id);
            let Some(targets) = outgoing.get(&node_id) else {
                continue;
            };
            for target in targets {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(*target);
                    }
                }
            }
        }

        if order.len() < self.nodes.len() {
            return Err(CycleError);
        }
        Ok(order)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Node kind missing from the catalog
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Port not found
    #[error("Port not found: {0}")]
    PortNotFound(PortId),

    /// Incompatible port types or directions
    #[error("Incompatible port types")]
    IncompatiblePorts,

    /// Port is already connected
    #[error("Port already connected: {0}")]
    PortAlreadyConnected(PortId),

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}

/// Error when graph contains a cycle
#[derive(Debug, thiserror::Error)]
#[error("Graph contains a cycle")]
pub struct CycleError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::create_shader_registry;

    fn position(order: &[NodeId], id: NodeId) -> usize {
        order.iter().position(|n| *n == id).unwrap()
    }

    #[test]
    fn test_topological_order_puts_producers_first() {
        let mut graph = Graph::new("Order");
        let output = graph.add_node(Node::new("pbr_output"));
        let add = graph.add_node(Node::new("add"));
        let time = graph.add_node(Node::new("time"));
        graph.push_connection(Connection::new(time, "time", add, "a"));
        graph.push_connection(Connection::new(add, "result", output, "roughness"));

        let order = graph.topological_order().unwrap();
        assert_eq!(order.len(), 3);
        assert!(position(&order, time) < position(&order, add));
        assert!(position(&order, add) < position(&order, output));
    }

    #[test]
    fn test_independent_nodes_keep_node_order() {
        let mut graph = Graph::new("Independent");
        let a = graph.add_node(Node::new("uv"));
        let b = graph.add_node(Node::new("time"));
        let c = graph.add_node(Node::new("pbr_output"));
        assert_eq!(graph.topological_order().unwrap(), vec![a, b, c]);
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = Graph::new("Cycle");
        graph.add_node(Node::new("pbr_output"));
        let a = graph.add_node(Node::new("add"));
        let b = graph.add_node(Node::new("add"));
        graph.push_connection(Connection::new(a, "result", b, "a"));
        graph.push_connection(Connection::new(b, "result", a, "a"));
        assert!(graph.topological_order().is_err());
    }

    #[test]
    fn test_dangling_connection_is_not_a_cycle() {
        let mut graph = Graph::new("Dangling");
        let add = graph.add_node(Node::new("add"));
        graph.push_connection(Connection::new(NodeId::new(), "result", add, "a"));
        assert_eq!(graph.topological_order().unwrap(), vec![add]);
    }

    #[test]
    fn test_connect_validation() {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Connect");
        let color = graph.add_node(Node::new("color_constant"));
        let output = graph.add_node(Node::new("pbr_output"));
        let texture = graph.add_node(Node::new("texture_sample"));

        assert!(graph.connect(color, "color", output, "base_color", &registry).is_ok());
        assert!(matches!(
            graph.connect(color, "color", output, "base_color", &registry),
            Err(ConnectionError::PortAlreadyConnected(_))
        ));
        assert!(matches!(
            graph.connect(color, "color", output, "missing", &registry),
            Err(ConnectionError::PortNotFound(_))
        ));
        assert!(matches!(
            graph.connect(color, "color", texture, "texture", &registry),
            Err(ConnectionError::IncompatiblePorts)
        ));
        assert!(matches!(
            graph.connect(output, "base_color", color, "color", &registry),
            Err(ConnectionError::IncompatiblePorts)
        ));
    }

    #[test]
    fn test_connect_rejects_self_loop() {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Loop");
        let add = graph.add_node(Node::new("add"));
        assert!(matches!(
            graph.connect(add, "result", add, "a", &registry),
            Err(ConnectionError::SelfLoop)
        ));
    }

    #[test]
    fn test_remove_node_drops_connections_and_keeps_order() {
        let mut graph = Graph::new("Remove");
        let a = graph.add_node(Node::new("uv"));
        let b = graph.add_node(Node::new("split_vec2"));
        let c = graph.add_node(Node::new("time"));
        graph.push_connection(Connection::new(a, "uv", b, "vector"));

        assert!(graph.remove_node(a).is_some());
        assert_eq!(graph.connection_count(), 0);
        let ids: Vec<NodeId> = graph.nodes().map(|n| n.id).collect();
        assert_eq!(ids, vec![b, c]);
    }

    #[test]
    fn test_first_connection_wins() {
        let mut graph = Graph::new("Duplicate");
        let add = graph.add_node(Node::new("add"));
        let first = graph.push_connection(Connection::new(NodeId::new(), "result", add, "a"));
        graph.push_connection(Connection::new(NodeId::new(), "result", add, "a"));
        assert_eq!(graph.connection_to(add, &PortId::from("a")).unwrap().id, first);
    }
}
