// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader node graphs for `OrdoPlay` materials.
//!
//! This crate turns a material graph built in the editor into a WGSL fragment
//! shader for Bevy's PBR pipeline:
//! - Typed ports, nodes and connections
//! - A built-in catalog of shader node types
//! - Dependency ordering with cycle detection
//! - Per-node code emission and output assembly
//! - RON/JSON graph documents with load-time validation
//!
//! ## Architecture
//!
//! [`compile`] takes an immutable [`Graph`] and a [`NodeRegistry`] and either
//! returns the complete shader or an error message. Compilation is a pure
//! function of its inputs: the same graph always yields the same text.

pub mod catalog;
mod codegen;
pub mod compiler;
pub mod connection;
pub mod document;
pub mod graph;
pub mod kind;
pub mod node;
pub mod output;
pub mod params;
pub mod port;
pub mod template;

pub use catalog::create_shader_registry;
pub use compiler::{compile, compile_graph, CompileError, CompileResult, ShaderCompiler};
pub use connection::{Connection, ConnectionId};
pub use document::{load_graph, GraphDocument, ValidationError, ValidationPolicy};
pub use graph::{ConnectionError, CycleError, Graph, GraphId};
pub use kind::NodeKind;
pub use node::{Node, NodeCategory, NodeId, NodeRegistry, NodeType};
pub use params::{NodeParams, ParamShape, RampInterpolation};
pub use port::{Port, PortDirection, PortId, PortType, PortValue};
