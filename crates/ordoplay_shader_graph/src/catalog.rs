// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node catalog for PBR shader graphs.
//!
//! Declares the ports of every kind the code generator understands. Port
//! order matters: function-call nodes pass their inputs as arguments in
//! declaration order, and the output assembler walks the output node's inputs
//! in declaration order.

use crate::kind::NodeKind;
use crate::node::{NodeCategory, NodeRegistry, NodeType};
use crate::port::{Port, PortType, PortValue};

fn node_type(
    kind: NodeKind,
    name: &str,
    category: NodeCategory,
    description: &str,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
) -> NodeType {
    NodeType {
        id: kind.id().to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        inputs,
        outputs,
    }
}

fn float_in(id: &str, label: &str) -> Port {
    Port::input(id, label, PortType::Float)
}

fn float_out(id: &str, label: &str) -> Port {
    Port::output(id, label, PortType::Float)
}

fn result(port_type: PortType) -> Port {
    Port::output("result", "Result", port_type)
}

/// Create the shader graph node registry with all built-in node types
pub fn create_shader_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Output
    // ========================================================================

    registry.register(node_type(
        NodeKind::PbrOutput,
        "PBR Output",
        NodeCategory::Output,
        "Final PBR material output",
        vec![
            Port::input("base_color", "Base Color", PortType::Color)
                .with_default(PortValue::Color([0.8, 0.8, 0.8, 1.0])),
            float_in("metallic", "Metallic").with_default(PortValue::Float(0.0)),
            float_in("roughness", "Roughness").with_default(PortValue::Float(0.5)),
            Port::input("normal", "Normal", PortType::Vec3),
            Port::input("emissive", "Emissive", PortType::Color)
                .with_default(PortValue::Color([0.0, 0.0, 0.0, 1.0])),
            float_in("alpha", "Alpha").with_default(PortValue::Float(1.0)),
        ],
        vec![],
    ));

    // ========================================================================
    // Input Nodes - Built-ins
    // ========================================================================

    let sources = [
        (NodeKind::VertexPosition, "Vertex Position", "Fragment world position", "position", PortType::Vec3),
        (NodeKind::VertexNormal, "Vertex Normal", "Fragment world normal", "normal", PortType::Vec3),
        (NodeKind::Uv, "UV", "Mesh UV coordinates", "uv", PortType::Vec2),
        (NodeKind::Time, "Time", "Elapsed time in seconds", "time", PortType::Float),
        (NodeKind::CameraPosition, "Camera Position", "Camera world position", "position", PortType::Vec3),
        (NodeKind::ViewDirection, "View Direction", "Direction from fragment to camera", "direction", PortType::Vec3),
    ];
    for (kind, name, description, port, port_type) in sources {
        registry.register(node_type(
            kind,
            name,
            NodeCategory::Input,
            description,
            vec![],
            vec![Port::output(port, name, port_type)],
        ));
    }

    // ========================================================================
    // Input Nodes - Constants
    // ========================================================================

    let constants = [
        (NodeKind::FloatConstant, "Float", "value", PortType::Float),
        (NodeKind::Vec2Constant, "Vector2", "vector", PortType::Vec2),
        (NodeKind::Vec3Constant, "Vector3", "vector", PortType::Vec3),
        (NodeKind::Vec4Constant, "Vector4", "vector", PortType::Vec4),
        (NodeKind::ColorConstant, "Color", "color", PortType::Color),
    ];
    for (kind, name, port, port_type) in constants {
        registry.register(node_type(
            kind,
            name,
            NodeCategory::Input,
            &format!("Constant {} value", name.to_lowercase()),
            vec![],
            vec![Port::output(port, name, port_type)],
        ));
    }

    // ========================================================================
    // Math Nodes - Basic Operations
    // ========================================================================

    let binary = [
        (NodeKind::Add, "Add", "Add two values"),
        (NodeKind::Subtract, "Subtract", "Subtract B from A"),
        (NodeKind::Multiply, "Multiply", "Multiply two values"),
        (NodeKind::Divide, "Divide", "Divide A by B"),
    ];
    for (kind, name, description) in binary {
        registry.register(node_type(
            kind,
            name,
            NodeCategory::Math,
            description,
            vec![float_in("a", "A"), float_in("b", "B")],
            vec![result(PortType::Float)],
        ));
    }

    registry.register(node_type(
        NodeKind::Power,
        "Power",
        NodeCategory::Math,
        "Raise base to the power of exponent",
        vec![
            float_in("base", "Base"),
            float_in("exponent", "Exponent").with_default(PortValue::Float(2.0)),
        ],
        vec![result(PortType::Float)],
    ));

    let unary = [
        (NodeKind::Sqrt, "Square Root", "Square root of value"),
        (NodeKind::Abs, "Absolute", "Absolute value"),
        (NodeKind::Fract, "Fraction", "Fractional part of value"),
        (NodeKind::Floor, "Floor", "Round down to nearest integer"),
        (NodeKind::Ceil, "Ceiling", "Round up to nearest integer"),
        (NodeKind::Saturate, "Saturate", "Clamp value between 0 and 1"),
    ];
    for (kind, name, description) in unary {
        registry.register(node_type(
            kind,
            name,
            NodeCategory::Math,
            description,
            vec![float_in("value", "Value")],
            vec![result(PortType::Float)],
        ));
    }

    for (kind, name, description) in [
        (NodeKind::Min, "Minimum", "Minimum of two values"),
        (NodeKind::Max, "Maximum", "Maximum of two values"),
    ] {
        registry.register(node_type(
            kind,
            name,
            NodeCategory::Math,
            description,
            vec![float_in("a", "A"), float_in("b", "B")],
            vec![result(PortType::Float)],
        ));
    }

    // ========================================================================
    // Math Nodes - Trigonometry
    // ========================================================================

    for (kind, name, description) in [
        (NodeKind::Sin, "Sine", "Sine of angle (radians)"),
        (NodeKind::Cos, "Cosine", "Cosine of angle (radians)"),
        (NodeKind::Tan, "Tangent", "Tangent of angle (radians)"),
    ] {
        registry.register(node_type(
            kind,
            name,
            NodeCategory::Math,
            description,
            vec![float_in("angle", "Angle")],
            vec![result(PortType::Float)],
        ));
    }

    // ========================================================================
    // Math Nodes - Interpolation & Clamping
    // ========================================================================

    registry.register(node_type(
        NodeKind::Clamp,
        "Clamp",
        NodeCategory::Math,
        "Clamp value between min and max",
        vec![
            float_in("value", "Value"),
            float_in("min", "Min").with_default(PortValue::Float(0.0)),
            float_in("max", "Max").with_default(PortValue::Float(1.0)),
        ],
        vec![result(PortType::Float)],
    ));

    registry.register(node_type(
        NodeKind::Lerp,
        "Lerp",
        NodeCategory::Math,
        "Linear interpolation between A and B",
        vec![
            float_in("a", "A"),
            float_in("b", "B"),
            float_in("t", "T").with_default(PortValue::Float(0.5)),
        ],
        vec![result(PortType::Float)],
    ));

    registry.register(node_type(
        NodeKind::Step,
        "Step",
        NodeCategory::Math,
        "0 below the edge, 1 at or above it",
        vec![
            float_in("edge", "Edge").with_default(PortValue::Float(0.5)),
            float_in("x", "X"),
        ],
        vec![result(PortType::Float)],
    ));

    registry.register(node_type(
        NodeKind::Smoothstep,
        "Smoothstep",
        NodeCategory::Math,
        "Hermite interpolation between edges",
        vec![
            float_in("edge0", "Edge0").with_default(PortValue::Float(0.0)),
            float_in("edge1", "Edge1").with_default(PortValue::Float(1.0)),
            float_in("x", "X"),
        ],
        vec![result(PortType::Float)],
    ));

    // ========================================================================
    // Vector Operations
    // ========================================================================

    registry.register(node_type(
        NodeKind::Normalize,
        "Normalize",
        NodeCategory::Vector,
        "Normalize vector to unit length",
        vec![Port::input("vector", "Vector", PortType::Vec3)],
        vec![result(PortType::Vec3)],
    ));

    registry.register(node_type(
        NodeKind::Length,
        "Length",
        NodeCategory::Vector,
        "Length of vector",
        vec![Port::input("vector", "Vector", PortType::Vec3)],
        vec![result(PortType::Float)],
    ));

    registry.register(node_type(
        NodeKind::Distance,
        "Distance",
        NodeCategory::Vector,
        "Distance between two points",
        vec![
            Port::input("a", "A", PortType::Vec3),
            Port::input("b", "B", PortType::Vec3),
        ],
        vec![result(PortType::Float)],
    ));

    registry.register(node_type(
        NodeKind::Dot,
        "Dot Product",
        NodeCategory::Vector,
        "Dot product of two vectors",
        vec![
            Port::input("a", "A", PortType::Vec3),
            Port::input("b", "B", PortType::Vec3),
        ],
        vec![result(PortType::Float)],
    ));

    registry.register(node_type(
        NodeKind::Cross,
        "Cross Product",
        NodeCategory::Vector,
        "Cross product of two 3D vectors",
        vec![
            Port::input("a", "A", PortType::Vec3),
            Port::input("b", "B", PortType::Vec3),
        ],
        vec![result(PortType::Vec3)],
    ));

    // ========================================================================
    // Vector Composition
    // ========================================================================

    let components = ["x", "y", "z", "w"];
    let vectors = [
        (NodeKind::SplitVec2, NodeKind::CombineVec2, "Vector2", PortType::Vec2, 2),
        (NodeKind::SplitVec3, NodeKind::CombineVec3, "Vector3", PortType::Vec3, 3),
        (NodeKind::SplitVec4, NodeKind::CombineVec4, "Vector4", PortType::Vec4, 4),
    ];
    for (split, combine, name, port_type, width) in vectors {
        let scalars = &components[..width];

        registry.register(node_type(
            split,
            &format!("Split {name}"),
            NodeCategory::Vector,
            &format!("Split {name} into components"),
            vec![Port::input("vector", "Vector", port_type)],
            scalars.iter().map(|c| float_out(c, &c.to_uppercase())).collect(),
        ));

        registry.register(node_type(
            combine,
            &format!("Combine {name}"),
            NodeCategory::Vector,
            &format!("Combine components into {name}"),
            scalars.iter().map(|c| float_in(c, &c.to_uppercase())).collect(),
            vec![Port::output("vector", "Vector", port_type)],
        ));
    }

    // ========================================================================
    // Color Operations
    // ========================================================================

    registry.register(node_type(
        NodeKind::HsvToRgb,
        "HSV to RGB",
        NodeCategory::Color,
        "Convert HSV to RGB color",
        vec![
            float_in("hue", "Hue").with_default(PortValue::Float(0.0)),
            float_in("saturation", "Saturation").with_default(PortValue::Float(1.0)),
            float_in("value", "Value").with_default(PortValue::Float(1.0)),
        ],
        vec![Port::output("rgb", "RGB", PortType::Color)],
    ));

    registry.register(node_type(
        NodeKind::RgbToHsv,
        "RGB to HSV",
        NodeCategory::Color,
        "Convert RGB to HSV color",
        vec![Port::input("rgb", "RGB", PortType::Color)
            .with_default(PortValue::Color([1.0, 1.0, 1.0, 1.0]))],
        vec![
            float_out("hue", "Hue"),
            float_out("saturation", "Saturation"),
            float_out("value", "Value"),
        ],
    ));

    registry.register(node_type(
        NodeKind::ColorRamp,
        "Color Ramp",
        NodeCategory::Color,
        "Blend between two color stops by a factor",
        vec![
            float_in("factor", "Factor").with_default(PortValue::Float(0.5)),
            Port::input("color_a", "Color A", PortType::Color)
                .with_default(PortValue::Color([0.0, 0.0, 0.0, 1.0])),
            Port::input("color_b", "Color B", PortType::Color)
                .with_default(PortValue::Color([1.0, 1.0, 1.0, 1.0])),
        ],
        vec![Port::output("color", "Color", PortType::Color)],
    ));

    // ========================================================================
    // Procedural Patterns
    // ========================================================================

    registry.register(node_type(
        NodeKind::Noise,
        "Noise",
        NodeCategory::Procedural,
        "Generate smooth value noise",
        vec![
            Port::input("uv", "UV", PortType::Vec2),
            float_in("scale", "Scale").with_default(PortValue::Float(10.0)),
        ],
        vec![float_out("value", "Value")],
    ));

    registry.register(node_type(
        NodeKind::Voronoi,
        "Voronoi",
        NodeCategory::Procedural,
        "Generate Voronoi cellular noise",
        vec![
            Port::input("uv", "UV", PortType::Vec2),
            float_in("scale", "Scale").with_default(PortValue::Float(5.0)),
        ],
        vec![
            float_out("distance", "Distance"),
            Port::output("color", "Color", PortType::Color),
        ],
    ));

    // ========================================================================
    // Fresnel / Effects
    // ========================================================================

    registry.register(node_type(
        NodeKind::Fresnel,
        "Fresnel",
        NodeCategory::Math,
        "Fresnel effect based on view angle",
        vec![
            Port::input("normal", "Normal", PortType::Vec3),
            float_in("power", "Power").with_default(PortValue::Float(5.0)),
        ],
        vec![result(PortType::Float)],
    ));

    // ========================================================================
    // Texture Nodes
    // ========================================================================

    registry.register(node_type(
        NodeKind::TextureSample,
        "Texture Sample",
        NodeCategory::Texture,
        "Sample a 2D texture",
        vec![
            Port::input("texture", "Texture", PortType::Texture2d),
            Port::input("uv", "UV", PortType::Vec2),
        ],
        vec![
            Port::output("color", "Color", PortType::Color),
            float_out("alpha", "Alpha"),
        ],
    ));

    registry.register(node_type(
        NodeKind::NormalMap,
        "Normal Map",
        NodeCategory::Texture,
        "Sample and decode a normal map",
        vec![
            Port::input("texture", "Texture", PortType::Texture2d),
            Port::input("uv", "UV", PortType::Vec2),
            float_in("strength", "Strength").with_default(PortValue::Float(1.0)),
        ],
        vec![Port::output("normal", "Normal", PortType::Vec3)],
    ));

    registry
}
