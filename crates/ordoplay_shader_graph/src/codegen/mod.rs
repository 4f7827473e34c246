// SPDX-License-Identifier: MIT OR Apache-2.0
//! WGSL code generation context.
//!
//! One [`CodegenContext`] lives for exactly one compile call. It owns the
//! variable counter, the ordered statement list and the reference map from
//! `(node, output port)` to the WGSL expression standing for that value.

mod domain;
mod emit;

use crate::compiler::CompileError;
use crate::graph::Graph;
use crate::node::{Node, NodeId, NodeRegistry};
use crate::port::{Port, PortId};
use std::collections::HashMap;

/// An input port resolved to a WGSL expression
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resolved {
    pub expr: String,
    /// An edge targets the port, whether or not its source resolved
    pub connected: bool,
}

pub(crate) struct CodegenContext<'a> {
    graph: &'a Graph,
    registry: &'a NodeRegistry,
    counter: usize,
    statements: Vec<String>,
    references: HashMap<(NodeId, PortId), String>,
}

impl<'a> CodegenContext<'a> {
    pub fn new(graph: &'a Graph, registry: &'a NodeRegistry) -> Self {
        Self {
            graph,
            registry,
            counter: 0,
            statements: Vec::new(),
            references: HashMap::new(),
        }
    }

    /// Resolve an input through its first incoming connection, falling back to
    /// the port default when unconnected or when the source has no reference.
    pub fn resolve_input(&self, node_id: NodeId, port: &Port) -> Resolved {
        match self.graph.connection_to(node_id, &port.id) {
            Some(connection) => Resolved {
                expr: self
                    .reference(connection.from_node, &connection.from_port)
                    .map_or_else(|| port.default_literal(), str::to_string),
                connected: true,
            },
            None => Resolved {
                expr: port.default_literal(),
                connected: false,
            },
        }
    }

    /// Emit code for one node
    pub fn emit_node(&mut self, node: &Node) -> Result<(), CompileError> {
        let node_type = self.registry.get(&node.kind);
        emit::emit_node(self, node, node_type)
    }

    /// Append `let varN[: ty] = expr;` and return `varN`
    pub fn declare(&mut self, ty: Option<&str>, expr: impl std::fmt::Display) -> String {
        self.declare_with("let", ty, expr)
    }

    /// Append `var varN[: ty] = expr;` and return `varN`
    pub fn declare_mut(&mut self, ty: Option<&str>, expr: impl std::fmt::Display) -> String {
        self.declare_with("var", ty, expr)
    }

    fn declare_with(&mut self, keyword: &str, ty: Option<&str>, expr: impl std::fmt::Display) -> String {
        let name = format!("var{}", self.counter);
        self.counter += 1;
        let statement = match ty {
            Some(ty) => format!("{keyword} {name}: {ty} = {expr};"),
            None => format!("{keyword} {name} = {expr};"),
        };
        self.statements.push(statement);
        name
    }

    /// Append a raw line that declares no new variable
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.statements.push(line.into());
    }

    pub fn bind(&mut self, node_id: NodeId, port_id: &PortId, expr: impl Into<String>) {
        self.references.insert((node_id, port_id.clone()), expr.into());
    }

    pub fn reference(&self, node_id: NodeId, port_id: &PortId) -> Option<&str> {
        self.references
            .get(&(node_id, port_id.clone()))
            .map(String::as_str)
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }
}
