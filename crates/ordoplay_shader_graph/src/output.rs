// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output assembly: binds the output node's inputs to PBR material fields.

use crate::codegen::CodegenContext;
use crate::node::{Node, NodeType};

/// Name of the material input variable in the shader template
pub const MATERIAL_INPUT: &str = "pbr_input";

/// Material fields the output node can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialField {
    /// Albedo
    BaseColor,
    /// Metalness
    Metallic,
    /// Perceptual roughness
    Roughness,
    /// Shading normal; assigned only when connected
    Normal,
    /// Emissive color
    Emissive,
    /// Alpha channel of the base color
    Alpha,
}

impl MaterialField {
    /// Map an output-node port ID to its field
    pub fn from_port_id(id: &str) -> Option<Self> {
        match id {
            "base_color" => Some(Self::BaseColor),
            "metallic" => Some(Self::Metallic),
            "roughness" => Some(Self::Roughness),
            "normal" => Some(Self::Normal),
            "emissive" => Some(Self::Emissive),
            "alpha" => Some(Self::Alpha),
            _ => None,
        }
    }

    /// Assignment target in the shader
    pub fn target(self) -> &'static str {
        match self {
            Self::BaseColor => "pbr_input.material.base_color",
            Self::Metallic => "pbr_input.material.metallic",
            Self::Roughness => "pbr_input.material.perceptual_roughness",
            Self::Normal => "pbr_input.N",
            Self::Emissive => "pbr_input.material.emissive",
            Self::Alpha => "pbr_input.material.base_color.a",
        }
    }

    /// Whether the field keeps its upstream value unless an edge drives it
    pub fn requires_connection(self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Assignment statement for an expression
    pub fn assignment(self, expr: &str) -> String {
        format!("{} = {expr};", self.target())
    }
}

/// Assignment statements for the output node, in port declaration order
pub(crate) fn assemble_outputs(
    ctx: &CodegenContext<'_>,
    output_node: &Node,
    node_type: Option<&NodeType>,
) -> Vec<String> {
    let Some(node_type) = node_type else {
        return Vec::new();
    };

    node_type
        .inputs
        .iter()
        .filter_map(|port| {
            let field = MaterialField::from_port_id(port.id.as_str())?;
            let resolved = ctx.resolve_input(output_node.id, port);
            if field.requires_connection() && !resolved.connected {
                return None;
            }
            Some(field.assignment(&resolved.expr))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::create_shader_registry;
    use crate::connection::Connection;
    use crate::graph::Graph;

    #[test]
    fn test_unconnected_output_uses_defaults_and_skips_normal() {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Defaults");
        let output = graph.add_node(Node::new("pbr_output"));
        let ctx = CodegenContext::new(&graph, &registry);

        let lines = assemble_outputs(&ctx, graph.node(output).unwrap(), registry.get("pbr_output"));
        assert_eq!(
            lines,
            [
                "pbr_input.material.base_color = vec4<f32>(0.8000, 0.8000, 0.8000, 1.0000);",
                "pbr_input.material.metallic = 0.0000;",
                "pbr_input.material.perceptual_roughness = 0.5000;",
                "pbr_input.material.emissive = vec4<f32>(0.0000, 0.0000, 0.0000, 1.0000);",
                "pbr_input.material.base_color.a = 1.0000;",
            ]
        );
    }

    #[test]
    fn test_connected_normal_is_assigned() {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Normal");
        let normal = graph.add_node(Node::new("vertex_normal"));
        let output = graph.add_node(Node::new("pbr_output"));
        graph.push_connection(Connection::new(normal, "normal", output, "normal"));

        let mut ctx = CodegenContext::new(&graph, &registry);
        ctx.emit_node(graph.node(normal).unwrap()).unwrap();
        let lines = assemble_outputs(&ctx, graph.node(output).unwrap(), registry.get("pbr_output"));
        assert!(lines.contains(&"pbr_input.N = in.world_normal;".to_string()));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_missing_output_type_assigns_nothing() {
        let registry = create_shader_registry();
        let mut graph = Graph::new("Missing");
        let output = graph.add_node(Node::new("pbr_output"));
        let ctx = CodegenContext::new(&graph, &registry);
        assert!(assemble_outputs(&ctx, graph.node(output).unwrap(), None).is_empty());
    }

    #[test]
    fn test_field_table() {
        assert_eq!(MaterialField::from_port_id("roughness"), Some(MaterialField::Roughness));
        assert_eq!(MaterialField::from_port_id("occlusion"), None);
        assert!(MaterialField::Roughness.target().starts_with(MATERIAL_INPUT));
        assert_eq!(MaterialField::Metallic.assignment("var3"), "pbr_input.material.metallic = var3;");
    }
}
