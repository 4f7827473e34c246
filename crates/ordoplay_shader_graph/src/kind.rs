// SPDX-License-Identifier: MIT OR Apache-2.0
//! Closed set of node kinds the code generator understands.
//!
//! Kind strings in a graph are parsed into [`NodeKind`]; every variant maps to
//! exactly one [`Emission`] family through an exhaustive match. Kind strings
//! that do not parse have no emission rule and produce no code.

use crate::params::ParamShape;

/// Kind ID of the material output node
pub const OUTPUT_KIND: &str = "pbr_output";

/// Fragment world position
pub const BUILTIN_WORLD_POSITION: &str = "in.world_position.xyz";
/// Interpolated fragment normal
pub const BUILTIN_WORLD_NORMAL: &str = "in.world_normal";
/// Mesh UV coordinates
pub const BUILTIN_UV: &str = "in.uv";
/// Elapsed time in seconds
pub const BUILTIN_TIME: &str = "globals.time";
/// Camera world position
pub const BUILTIN_CAMERA_POSITION: &str = "view.world_position";
/// Direction from the fragment towards the camera
pub const BUILTIN_VIEW_DIRECTION: &str = "normalize(view.world_position - in.world_position.xyz)";

macro_rules! node_kinds {
    ($($variant:ident => $id:literal),+ $(,)?) => {
        /// A node kind with a code generation rule
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $(
                #[doc = concat!("`", $id, "`")]
                $variant,
            )+
        }

        impl NodeKind {
            /// Every kind, in catalog order
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant),+];

            /// Parse a kind string
            pub fn parse(id: &str) -> Option<Self> {
                match id {
                    $($id => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The kind string
            pub fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }
        }
    };
}

node_kinds! {
    PbrOutput => "pbr_output",

    VertexPosition => "vertex_position",
    VertexNormal => "vertex_normal",
    Uv => "uv",
    Time => "time",
    CameraPosition => "camera_position",
    ViewDirection => "view_direction",

    FloatConstant => "float_constant",
    Vec2Constant => "vec2_constant",
    Vec3Constant => "vec3_constant",
    Vec4Constant => "vec4_constant",
    ColorConstant => "color_constant",

    Add => "add",
    Subtract => "subtract",
    Multiply => "multiply",
    Divide => "divide",

    Power => "power",
    Sqrt => "sqrt",
    Abs => "abs",
    Clamp => "clamp",
    Lerp => "lerp",
    Step => "step",
    Smoothstep => "smoothstep",
    Sin => "sin",
    Cos => "cos",
    Tan => "tan",
    Fract => "fract",
    Floor => "floor",
    Ceil => "ceil",
    Min => "min",
    Max => "max",
    Saturate => "saturate",
    Normalize => "normalize",
    Length => "length",
    Distance => "distance",
    Dot => "dot",
    Cross => "cross",

    SplitVec2 => "split_vec2",
    SplitVec3 => "split_vec3",
    SplitVec4 => "split_vec4",
    CombineVec2 => "combine_vec2",
    CombineVec3 => "combine_vec3",
    CombineVec4 => "combine_vec4",

    Fresnel => "fresnel",
    Noise => "noise",
    Voronoi => "voronoi",
    HsvToRgb => "hsv_to_rgb",
    RgbToHsv => "rgb_to_hsv",
    ColorRamp => "color_ramp",

    TextureSample => "texture_sample",
    NormalMap => "normal_map",
}

/// Infix operator of a binary node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl BinaryOp {
    /// WGSL operator token
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// Kinds that expand into a fixed, kind-specific block of statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainRule {
    /// View-angle falloff
    Fresnel,
    /// Hashed value noise
    Noise,
    /// Cellular distance; the color channel is a placeholder
    Voronoi,
    /// HSV to RGB conversion
    HsvToRgb,
    /// RGB to HSV conversion
    RgbToHsv,
    /// Two-stop color ramp
    ColorRamp,
}

/// Code generation family of a node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// The material output; handled by the output assembler
    Output,
    /// Binds its output to a built-in expression without emitting a statement
    Source(&'static str),
    /// Embeds its parameter literal directly
    Constant,
    /// `let varN = a <op> b;`
    Binary(BinaryOp),
    /// `let varN: T = function(args...);`
    Call(&'static str),
    /// One statement per vector component
    Decompose,
    /// Construct a vector from scalar inputs
    Compose,
    /// Fixed multi-statement expansion
    Domain(DomainRule),
    /// Not implemented yet: outputs are bound to fixed stub literals
    Placeholder,
}

impl NodeKind {
    /// The emission family of this kind
    pub fn emission(self) -> Emission {
        match self {
            Self::PbrOutput => Emission::Output,

            Self::VertexPosition => Emission::Source(BUILTIN_WORLD_POSITION),
            Self::VertexNormal => Emission::Source(BUILTIN_WORLD_NORMAL),
            Self::Uv => Emission::Source(BUILTIN_UV),
            Self::Time => Emission::Source(BUILTIN_TIME),
            Self::CameraPosition => Emission::Source(BUILTIN_CAMERA_POSITION),
            Self::ViewDirection => Emission::Source(BUILTIN_VIEW_DIRECTION),

            Self::FloatConstant
            | Self::Vec2Constant
            | Self::Vec3Constant
            | Self::Vec4Constant
            | Self::ColorConstant => Emission::Constant,

            Self::Add => Emission::Binary(BinaryOp::Add),
            Self::Subtract => Emission::Binary(BinaryOp::Subtract),
            Self::Multiply => Emission::Binary(BinaryOp::Multiply),
            Self::Divide => Emission::Binary(BinaryOp::Divide),

            Self::Power => Emission::Call("pow"),
            Self::Sqrt => Emission::Call("sqrt"),
            Self::Abs => Emission::Call("abs"),
            Self::Clamp => Emission::Call("clamp"),
            Self::Lerp => Emission::Call("mix"),
            Self::Step => Emission::Call("step"),
            Self::Smoothstep => Emission::Call("smoothstep"),
            Self::Sin => Emission::Call("sin"),
            Self::Cos => Emission::Call("cos"),
            Self::Tan => Emission::Call("tan"),
            Self::Fract => Emission::Call("fract"),
            Self::Floor => Emission::Call("floor"),
            Self::Ceil => Emission::Call("ceil"),
            Self::Min => Emission::Call("min"),
            Self::Max => Emission::Call("max"),
            Self::Saturate => Emission::Call("saturate"),
            Self::Normalize => Emission::Call("normalize"),
            Self::Length => Emission::Call("length"),
            Self::Distance => Emission::Call("distance"),
            Self::Dot => Emission::Call("dot"),
            Self::Cross => Emission::Call("cross"),

            Self::SplitVec2 | Self::SplitVec3 | Self::SplitVec4 => Emission::Decompose,
            Self::CombineVec2 | Self::CombineVec3 | Self::CombineVec4 => Emission::Compose,

            Self::Fresnel => Emission::Domain(DomainRule::Fresnel),
            Self::Noise => Emission::Domain(DomainRule::Noise),
            Self::Voronoi => Emission::Domain(DomainRule::Voronoi),
            Self::HsvToRgb => Emission::Domain(DomainRule::HsvToRgb),
            Self::RgbToHsv => Emission::Domain(DomainRule::RgbToHsv),
            Self::ColorRamp => Emission::Domain(DomainRule::ColorRamp),

            Self::TextureSample | Self::NormalMap => Emission::Placeholder,
        }
    }

    /// The parameter shape nodes of this kind must carry
    pub fn expected_params(self) -> ParamShape {
        match self {
            Self::FloatConstant => ParamShape::Float,
            Self::Vec2Constant => ParamShape::Vec2,
            Self::Vec3Constant => ParamShape::Vec3,
            Self::Vec4Constant => ParamShape::Vec4,
            Self::ColorConstant => ParamShape::Color,
            Self::ColorRamp => ParamShape::ColorRamp,
            Self::TextureSample | Self::NormalMap => ParamShape::Texture,
            _ => ParamShape::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::parse(kind.id()), Some(*kind));
        }
        assert_eq!(NodeKind::parse("not_a_kind"), None);
        assert_eq!(NodeKind::parse(OUTPUT_KIND), Some(NodeKind::PbrOutput));
    }

    #[test]
    fn test_emission_families() {
        assert_eq!(NodeKind::Add.emission(), Emission::Binary(BinaryOp::Add));
        assert_eq!(NodeKind::Lerp.emission(), Emission::Call("mix"));
        assert_eq!(
            NodeKind::VertexPosition.emission(),
            Emission::Source("in.world_position.xyz")
        );
        assert_eq!(NodeKind::TextureSample.emission(), Emission::Placeholder);
    }

    #[test]
    fn test_expected_params() {
        assert_eq!(NodeKind::ColorConstant.expected_params(), ParamShape::Color);
        assert_eq!(NodeKind::Add.expected_params(), ParamShape::None);
        assert_eq!(NodeKind::NormalMap.expected_params(), ParamShape::Texture);
    }
}
