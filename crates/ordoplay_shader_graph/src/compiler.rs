// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph to WGSL compilation entry points.
//!
//! [`compile`] never fails from the caller's point of view: every failure is
//! folded into a [`CompileResult`] with an empty `code` and an `error`
//! message. [`compile_graph`] exposes the same pipeline as a `Result`.

use crate::catalog::create_shader_registry;
use crate::codegen::CodegenContext;
use crate::graph::Graph;
use crate::node::{NodeId, NodeRegistry};
use crate::output::assemble_outputs;
use crate::params::ParamShape;
use crate::template::assemble_shader;
use serde::{Deserialize, Serialize};

/// Error raised while compiling a graph
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// The graph has no `pbr_output` node
    #[error("No PBR Output node found in graph. Add a 'pbr_output' node to compile.")]
    NoOutputNode,

    /// The graph contains a cycle
    #[error("Cyclic dependency detected in graph. Remove the loop between nodes to compile.")]
    CyclicDependency,

    /// A node carries parameters of the wrong shape for its kind
    #[error("Node {node} ({kind}) has {found} parameters, expected {expected}")]
    InvalidParameters {
        /// Offending node
        node: NodeId,
        /// Its kind
        kind: &'static str,
        /// Shape the kind requires
        expected: ParamShape,
        /// Shape the node carries
        found: ParamShape,
    },

    /// A constant node carries NaN or infinity
    #[error("Node {node} ({kind}) has a non-finite literal value")]
    NonFiniteLiteral {
        /// Offending node
        node: NodeId,
        /// Its kind
        kind: &'static str,
    },

    /// The catalog entry of a kind lacks a port its emission rule reads
    #[error("Node type '{kind}' does not declare port '{port}'")]
    MissingPort {
        /// Kind ID
        kind: String,
        /// Missing port ID
        port: String,
    },
}

/// Outcome of a compile call; `error` present implies `code` is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResult {
    /// Complete shader source, or empty on failure
    pub code: String,
    /// Human-readable failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompileResult {
    /// A successful result
    pub fn success(code: String) -> Self {
        Self { code, error: None }
    }

    /// A failed result
    pub fn failure(error: &CompileError) -> Self {
        Self {
            code: String::new(),
            error: Some(error.to_string()),
        }
    }

    /// Whether compilation succeeded
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<Result<String, CompileError>> for CompileResult {
    fn from(result: Result<String, CompileError>) -> Self {
        match result {
            Ok(code) => Self::success(code),
            Err(error) => Self::failure(&error),
        }
    }
}

/// Compile a graph snapshot into WGSL
pub fn compile_graph(graph: &Graph, registry: &NodeRegistry) -> Result<String, CompileError> {
    let output_node = graph.output_node().ok_or(CompileError::NoOutputNode)?;
    let order = graph
        .topological_order()
        .map_err(|_| CompileError::CyclicDependency)?;

    let mut ctx = CodegenContext::new(graph, registry);
    for node_id in order {
        if node_id == output_node.id {
            continue;
        }
        if let Some(node) = graph.node(node_id) {
            ctx.emit_node(node)?;
        }
    }

    let assignments = assemble_outputs(&ctx, output_node, registry.get(&output_node.kind));
    Ok(assemble_shader(ctx.statements(), &assignments))
}

/// Compile a graph snapshot, folding any failure into the result
pub fn compile(graph: &Graph, registry: &NodeRegistry) -> CompileResult {
    compile_graph(graph, registry).into()
}

/// Compiler bundled with a node catalog
#[derive(Debug, Clone)]
pub struct ShaderCompiler {
    registry: NodeRegistry,
}

impl ShaderCompiler {
    /// Compiler using the built-in catalog
    pub fn new() -> Self {
        Self::with_registry(create_shader_registry())
    }

    /// Compiler using a custom catalog
    pub fn with_registry(registry: NodeRegistry) -> Self {
        Self { registry }
    }

    /// The node catalog
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// See [`compile`]
    pub fn compile(&self, graph: &Graph) -> CompileResult {
        compile(graph, &self.registry)
    }

    /// See [`compile_graph`]
    pub fn try_compile(&self, graph: &Graph) -> Result<String, CompileError> {
        compile_graph(graph, &self.registry)
    }
}

impl Default for ShaderCompiler {
    fn default() -> Self {
        Self::new()
    }
}
