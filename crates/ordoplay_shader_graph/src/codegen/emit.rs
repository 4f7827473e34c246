// SPDX-License-Identifier: MIT OR Apache-2.0
//! Emission rules per node family.

use super::{domain, CodegenContext, Resolved};
use crate::compiler::CompileError;
use crate::kind::{Emission, NodeKind};
use crate::node::{Node, NodeType};
use crate::port::{Port, PortId, PortType};

/// Resolved inputs of one node, in declaration order
pub(super) struct Inputs {
    kind: NodeKind,
    ports: Vec<(PortId, Resolved)>,
}

impl Inputs {
    fn resolve(ctx: &CodegenContext<'_>, node: &Node, kind: NodeKind, node_type: &NodeType) -> Self {
        let ports = node_type
            .inputs
            .iter()
            .map(|port| (port.id.clone(), ctx.resolve_input(node.id, port)))
            .collect();
        Self { kind, ports }
    }

    pub fn get(&self, id: &str) -> Result<&Resolved, CompileError> {
        self.ports
            .iter()
            .find(|(port_id, _)| port_id.as_str() == id)
            .map(|(_, resolved)| resolved)
            .ok_or_else(|| CompileError::MissingPort {
                kind: self.kind.id().to_string(),
                port: id.to_string(),
            })
    }

    pub fn expr(&self, id: &str) -> Result<&str, CompileError> {
        self.get(id).map(|r| r.expr.as_str())
    }

    /// The input's expression when connected, `fallback` otherwise
    pub fn expr_or(&self, id: &str, fallback: &str) -> Result<String, CompileError> {
        let resolved = self.get(id)?;
        Ok(if resolved.connected { resolved.expr.clone() } else { fallback.to_string() })
    }

    fn args(&self) -> String {
        let exprs: Vec<&str> = self.ports.iter().map(|(_, r)| r.expr.as_str()).collect();
        exprs.join(", ")
    }
}

/// The output port a single-valued node binds to
pub(super) fn primary_output(kind: NodeKind, node_type: &NodeType) -> Result<&Port, CompileError> {
    node_type.outputs.first().ok_or_else(|| CompileError::MissingPort {
        kind: kind.id().to_string(),
        port: "<output>".to_string(),
    })
}

/// Stub value bound to outputs of kinds that are not implemented yet
pub(super) fn placeholder_literal(port_type: PortType) -> &'static str {
    match port_type {
        PortType::Vec4 | PortType::Color => "vec4<f32>(1.0, 0.0, 1.0, 1.0)",
        PortType::Vec3 => "vec3<f32>(0.0, 0.0, 1.0)",
        PortType::Vec2 => "vec2<f32>(0.0, 0.0)",
        PortType::Float | PortType::Texture2d | PortType::Exec => "1.0",
    }
}

pub(super) fn emit_node(
    ctx: &mut CodegenContext<'_>,
    node: &Node,
    node_type: Option<&NodeType>,
) -> Result<(), CompileError> {
    // Unknown kinds and kinds missing from the catalog emit nothing
    let (Some(kind), Some(node_type)) = (node.node_kind(), node_type) else {
        return Ok(());
    };
    let inputs = Inputs::resolve(ctx, node, kind, node_type);

    match kind.emission() {
        Emission::Output => Ok(()),
        Emission::Source(builtin) => {
            let output = primary_output(kind, node_type)?;
            ctx.bind(node.id, &output.id, builtin);
            Ok(())
        }
        Emission::Constant => emit_constant(ctx, node, kind, node_type),
        Emission::Binary(op) => {
            let output = primary_output(kind, node_type)?;
            let expr = format!("{} {} {}", inputs.expr("a")?, op.symbol(), inputs.expr("b")?);
            let name = ctx.declare(None, expr);
            ctx.bind(node.id, &output.id, name);
            Ok(())
        }
        Emission::Call(function) => {
            let output = primary_output(kind, node_type)?;
            let name = ctx.declare(
                Some(output.port_type.wgsl_type()),
                format!("{function}({})", inputs.args()),
            );
            ctx.bind(node.id, &output.id, name);
            Ok(())
        }
        Emission::Decompose => {
            let vector = inputs.expr("vector")?;
            for output in &node_type.outputs {
                let name = ctx.declare(
                    Some(output.port_type.wgsl_type()),
                    format!("{vector}.{}", output.id),
                );
                ctx.bind(node.id, &output.id, name);
            }
            Ok(())
        }
        Emission::Compose => {
            let output = primary_output(kind, node_type)?;
            let name = ctx.declare(
                None,
                format!("{}({})", output.port_type.wgsl_type(), inputs.args()),
            );
            ctx.bind(node.id, &output.id, name);
            Ok(())
        }
        Emission::Domain(rule) => domain::emit(ctx, node, rule, node_type, &inputs),
        Emission::Placeholder => {
            for output in &node_type.outputs {
                ctx.bind(node.id, &output.id, placeholder_literal(output.port_type));
            }
            Ok(())
        }
    }
}

fn emit_constant(
    ctx: &mut CodegenContext<'_>,
    node: &Node,
    kind: NodeKind,
    node_type: &NodeType,
) -> Result<(), CompileError> {
    let expected = kind.expected_params();
    let found = node.params.shape();
    let literal = match node.params.literal() {
        Some(literal) if found == expected => literal,
        _ => {
            return Err(CompileError::InvalidParameters {
                node: node.id,
                kind: kind.id(),
                expected,
                found,
            })
        }
    };
    if !literal.is_finite() {
        return Err(CompileError::NonFiniteLiteral { node: node.id, kind: kind.id() });
    }

    let output = primary_output(kind, node_type)?;
    ctx.bind(node.id, &output.id, literal.to_wgsl());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::create_shader_registry;
    use crate::connection::Connection;
    use crate::graph::Graph;
    use crate::params::{NodeParams, ParamShape};

    fn emit_all(graph: &Graph) -> (Vec<String>, Vec<Option<String>>) {
        let registry = create_shader_registry();
        let mut ctx = CodegenContext::new(graph, &registry);
        let order = graph.topological_order().unwrap();
        for id in &order {
            ctx.emit_node(graph.node(*id).unwrap()).unwrap();
        }
        let refs = graph
            .nodes()
            .map(|n| {
                let node_type = registry.get(&n.kind)?;
                let output = node_type.outputs.first()?;
                ctx.reference(n.id, &output.id).map(str::to_string)
            })
            .collect();
        (ctx.statements().to_vec(), refs)
    }

    #[test]
    fn test_binary_defaults() {
        let mut graph = Graph::new("Binary");
        graph.add_node(Node::new("multiply"));
        let (statements, refs) = emit_all(&graph);
        assert_eq!(statements, ["let var0 = 0.0 * 0.0;"]);
        assert_eq!(refs, [Some("var0".to_string())]);
    }

    #[test]
    fn test_call_uses_declared_argument_order() {
        let mut graph = Graph::new("Call");
        let time = graph.add_node(Node::new("time"));
        let smooth = graph.add_node(Node::new("smoothstep"));
        graph.push_connection(Connection::new(time, "time", smooth, "x"));
        let (statements, _) = emit_all(&graph);
        assert_eq!(
            statements,
            ["let var0: f32 = smoothstep(0.0000, 1.0000, globals.time);"]
        );
    }

    #[test]
    fn test_decompose_and_compose() {
        let mut graph = Graph::new("Vectors");
        let position = graph.add_node(Node::new("vertex_position"));
        let split = graph.add_node(Node::new("split_vec3"));
        let combine = graph.add_node(Node::new("combine_vec2"));
        graph.push_connection(Connection::new(position, "position", split, "vector"));
        graph.push_connection(Connection::new(split, "z", combine, "x"));
        graph.push_connection(Connection::new(split, "x", combine, "y"));
        let (statements, _) = emit_all(&graph);
        assert_eq!(
            statements,
            [
                "let var0: f32 = in.world_position.xyz.x;",
                "let var1: f32 = in.world_position.xyz.y;",
                "let var2: f32 = in.world_position.xyz.z;",
                "let var3 = vec2<f32>(var2, var0);",
            ]
        );
    }

    #[test]
    fn test_constant_is_embedded_without_statement() {
        let mut graph = Graph::new("Constant");
        graph.add_node(
            Node::new("vec3_constant").with_params(NodeParams::Vec3 { value: [0.1, 0.2, 0.3] }),
        );
        let (statements, refs) = emit_all(&graph);
        assert!(statements.is_empty());
        assert_eq!(refs, [Some("vec3<f32>(0.1000, 0.2000, 0.3000)".to_string())]);
    }

    #[test]
    fn test_constant_with_wrong_params_fails() {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Bad");
        let id = graph.add_node(Node::new("color_constant").with_params(NodeParams::None));
        let mut ctx = CodegenContext::new(&graph, &registry);
        let err = ctx.emit_node(graph.node(id).unwrap()).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidParameters {
                node: id,
                kind: "color_constant",
                expected: ParamShape::Color,
                found: ParamShape::None,
            }
        );
    }

    #[test]
    fn test_placeholder_binds_stub() {
        let mut graph = Graph::new("Texture");
        graph.add_node(Node::new("texture_sample"));
        graph.add_node(Node::new("normal_map"));
        let (statements, refs) = emit_all(&graph);
        assert!(statements.is_empty());
        assert_eq!(
            refs,
            [
                Some("vec4<f32>(1.0, 0.0, 1.0, 1.0)".to_string()),
                Some("vec3<f32>(0.0, 0.0, 1.0)".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_kind_emits_nothing() {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Unknown");
        let id = graph.add_node(Node::new("custom_blur"));
        let mut ctx = CodegenContext::new(&graph, &registry);
        ctx.emit_node(graph.node(id).unwrap()).unwrap();
        assert!(ctx.statements().is_empty());
        assert!(ctx.reference(id, &PortId::from("result")).is_none());
    }

    #[test]
    fn test_catalog_missing_port_is_an_error() {
        let mut registry = create_shader_registry();
        registry.register(NodeType {
            id: "add".to_string(),
            name: "Broken Add".to_string(),
            category: crate::node::NodeCategory::Math,
            description: String::new(),
            inputs: vec![],
            outputs: vec![],
        });
        let mut graph = Graph::new("Broken");
        let id = graph.add_node(Node::new("add"));
        let mut ctx = CodegenContext::new(&graph, &registry);
        let err = ctx.emit_node(graph.node(id).unwrap()).unwrap_err();
        assert!(matches!(err, CompileError::MissingPort { .. }));
    }
}
