// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a port, unique within its node type (e.g. `"base_color"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(pub String);

impl PortId {
    /// Create a port ID from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PortId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Data type that can flow through ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortType {
    /// Scalar float
    Float,
    /// 2D vector
    Vec2,
    /// 3D vector
    Vec3,
    /// 4D vector
    Vec4,
    /// Color (RGBA)
    Color,
    /// 2D texture binding
    Texture2d,
    /// Execution flow
    Exec,
}

impl PortType {
    /// WGSL type name for values of this port type
    pub fn wgsl_type(&self) -> &'static str {
        match self {
            Self::Float => "f32",
            Self::Vec2 => "vec2<f32>",
            Self::Vec3 => "vec3<f32>",
            Self::Vec4 | Self::Color => "vec4<f32>",
            Self::Texture2d => "texture_2d<f32>",
            Self::Exec => "void",
        }
    }

    /// Zero value used when an input has neither a connection nor a declared default.
    ///
    /// Four-component types keep alpha at one. Texture and exec ports have no
    /// value-level representation and fall back to the scalar zero.
    pub fn zero_literal(&self) -> &'static str {
        match self {
            Self::Float | Self::Texture2d | Self::Exec => "0.0",
            Self::Vec2 => "vec2<f32>(0.0, 0.0)",
            Self::Vec3 => "vec3<f32>(0.0, 0.0, 0.0)",
            Self::Vec4 | Self::Color => "vec4<f32>(0.0, 0.0, 0.0, 1.0)",
        }
    }

    /// Check if this type can connect to another type
    pub fn can_connect_to(&self, other: &PortType) -> bool {
        // Same types can always connect
        if self == other {
            return true;
        }

        // Implicit conversions
        match (self, other) {
            (Self::Float, Self::Vec2 | Self::Vec3 | Self::Vec4 | Self::Color) => true,
            (Self::Vec2, Self::Vec3 | Self::Vec4) => true,
            (Self::Vec3, Self::Vec4) => true,
            (Self::Color, Self::Vec4) | (Self::Vec4, Self::Color) => true,
            // No other implicit conversions
            _ => false,
        }
    }
}

/// Literal value declared as a port default or carried by a constant node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortValue {
    /// Float
    Float(f32),
    /// 2D vector
    Vec2([f32; 2]),
    /// 3D vector
    Vec3([f32; 3]),
    /// 4D vector
    Vec4([f32; 4]),
    /// Color
    Color([f32; 4]),
}

impl PortValue {
    /// Get the port type for this value
    pub fn port_type(&self) -> PortType {
        match self {
            Self::Float(_) => PortType::Float,
            Self::Vec2(_) => PortType::Vec2,
            Self::Vec3(_) => PortType::Vec3,
            Self::Vec4(_) => PortType::Vec4,
            Self::Color(_) => PortType::Color,
        }
    }

    /// Numeric components of the value
    pub fn components(&self) -> &[f32] {
        match self {
            Self::Float(v) => std::slice::from_ref(v),
            Self::Vec2(v) => v,
            Self::Vec3(v) => v,
            Self::Vec4(v) | Self::Color(v) => v,
        }
    }

    /// Whether every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }

    /// Render the value as a typed WGSL literal with four decimal places
    pub fn to_wgsl(&self) -> String {
        let components = self.components();
        match self {
            Self::Float(v) => format_component(*v),
            _ => {
                let parts: Vec<String> = components.iter().copied().map(format_component).collect();
                format!("{}({})", self.port_type().wgsl_type(), parts.join(", "))
            }
        }
    }
}

/// Format one numeric component with exactly four decimal places.
pub fn format_component(value: f32) -> String {
    format!("{value:.4}")
}

/// A port declared by a node type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Port ID, unique within the node type
    pub id: PortId,
    /// Display label
    pub label: String,
    /// Port direction
    pub direction: PortDirection,
    /// Data type
    pub port_type: PortType,
    /// Default value (for inputs)
    pub default_value: Option<PortValue>,
}

impl Port {
    /// Create a new input port
    pub fn input(id: &str, label: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id: PortId::from(id),
            label: label.into(),
            direction: PortDirection::Input,
            port_type,
            default_value: None,
        }
    }

    /// Create a new output port
    pub fn output(id: &str, label: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id: PortId::from(id),
            label: label.into(),
            direction: PortDirection::Output,
            port_type,
            default_value: None,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: PortValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Expression used when this input is unconnected: the declared default
    /// literal, or the type's zero value.
    pub fn default_literal(&self) -> String {
        self.default_value
            .as_ref()
            .map_or_else(|| self.port_type.zero_literal().to_string(), PortValue::to_wgsl)
    }

    /// Check if a connection from this port to another is valid
    pub fn can_connect(&self, other: &Port) -> bool {
        // Must be opposite directions
        if self.direction == other.direction {
            return false;
        }

        self.port_type.can_connect_to(&other.port_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_literals() {
        assert_eq!(PortType::Float.zero_literal(), "0.0");
        assert_eq!(PortType::Vec3.zero_literal(), "vec3<f32>(0.0, 0.0, 0.0)");
        assert_eq!(PortType::Color.zero_literal(), "vec4<f32>(0.0, 0.0, 0.0, 1.0)");
        assert_eq!(PortType::Vec4.zero_literal(), PortType::Color.zero_literal());
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(PortValue::Float(0.5).to_wgsl(), "0.5000");
        assert_eq!(
            PortValue::Color([1.0, 0.5, 0.25, 1.0]).to_wgsl(),
            "vec4<f32>(1.0000, 0.5000, 0.2500, 1.0000)"
        );
        assert_eq!(PortValue::Vec2([-2.0, 0.125]).to_wgsl(), "vec2<f32>(-2.0000, 0.1250)");
    }

    #[test]
    fn test_default_literal_prefers_declared_value() {
        let declared = Port::input("roughness", "Roughness", PortType::Float)
            .with_default(PortValue::Float(0.5));
        let bare = Port::input("a", "A", PortType::Vec2);
        assert_eq!(declared.default_literal(), "0.5000");
        assert_eq!(bare.default_literal(), "vec2<f32>(0.0, 0.0)");
    }

    #[test]
    fn test_type_compatibility() {
        assert!(PortType::Float.can_connect_to(&PortType::Vec3));
        assert!(PortType::Color.can_connect_to(&PortType::Vec4));
        assert!(!PortType::Vec3.can_connect_to(&PortType::Vec2));
        assert!(!PortType::Texture2d.can_connect_to(&PortType::Color));
        assert!(PortType::Exec.can_connect_to(&PortType::Exec));
    }

    #[test]
    fn test_port_direction_check() {
        let out = Port::output("result", "Result", PortType::Float);
        let input = Port::input("a", "A", PortType::Float);
        assert!(out.can_connect(&input));
        assert!(!input.can_connect(&Port::input("b", "B", PortType::Float)));
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(PortValue::Vec3([0.0, 1.0, 2.0]).is_finite());
        assert!(!PortValue::Float(f32::NAN).is_finite());
        assert!(!PortValue::Color([0.0, f32::INFINITY, 0.0, 1.0]).is_finite());
    }
}
