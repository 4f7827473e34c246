// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed per-node parameters.
//!
//! Each node kind accepts exactly one [`ParamShape`]. Documents are checked
//! against it when they are loaded, so code generation only sees parameters
//! of the expected shape unless a graph was assembled by hand.

use crate::port::PortValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters attached to a node instance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum NodeParams {
    /// The kind takes no parameters
    #[default]
    None,
    /// Scalar constant
    Float {
        /// Constant value
        value: f32,
    },
    /// 2D vector constant
    Vec2 {
        /// Constant value
        value: [f32; 2],
    },
    /// 3D vector constant
    Vec3 {
        /// Constant value
        value: [f32; 3],
    },
    /// 4D vector constant
    Vec4 {
        /// Constant value
        value: [f32; 4],
    },
    /// RGBA color constant
    Color {
        /// Constant value
        value: [f32; 4],
    },
    /// Two-stop color ramp settings
    ColorRamp {
        /// How the factor is shaped before mixing the stops
        interpolation: RampInterpolation,
    },
    /// Texture reference; binding resolution happens outside the compiler
    Texture {
        /// Asset path of the bound texture, if any
        asset: Option<String>,
    },
}

/// Interpolation mode of a color ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RampInterpolation {
    /// Straight linear blend
    #[default]
    Linear,
    /// Hermite ease in and out
    Ease,
    /// Hold the first stop until the factor reaches one
    Constant,
}

/// The shape of parameters a node kind expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// No parameters
    None,
    /// [`NodeParams::Float`]
    Float,
    /// [`NodeParams::Vec2`]
    Vec2,
    /// [`NodeParams::Vec3`]
    Vec3,
    /// [`NodeParams::Vec4`]
    Vec4,
    /// [`NodeParams::Color`]
    Color,
    /// [`NodeParams::ColorRamp`]
    ColorRamp,
    /// [`NodeParams::Texture`]
    Texture,
}

impl fmt::Display for ParamShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Color => "color",
            Self::ColorRamp => "color ramp",
            Self::Texture => "texture",
        };
        f.write_str(name)
    }
}

impl NodeParams {
    /// Default parameters for a shape
    pub fn default_for(shape: ParamShape) -> Self {
        match shape {
            ParamShape::None => Self::None,
            ParamShape::Float => Self::Float { value: 0.0 },
            ParamShape::Vec2 => Self::Vec2 { value: [0.0; 2] },
            ParamShape::Vec3 => Self::Vec3 { value: [0.0; 3] },
            ParamShape::Vec4 => Self::Vec4 { value: [0.0, 0.0, 0.0, 1.0] },
            ParamShape::Color => Self::Color { value: [1.0, 1.0, 1.0, 1.0] },
            ParamShape::ColorRamp => Self::ColorRamp { interpolation: RampInterpolation::default() },
            ParamShape::Texture => Self::Texture { asset: None },
        }
    }

    /// The shape of these parameters
    pub fn shape(&self) -> ParamShape {
        match self {
            Self::None => ParamShape::None,
            Self::Float { .. } => ParamShape::Float,
            Self::Vec2 { .. } => ParamShape::Vec2,
            Self::Vec3 { .. } => ParamShape::Vec3,
            Self::Vec4 { .. } => ParamShape::Vec4,
            Self::Color { .. } => ParamShape::Color,
            Self::ColorRamp { .. } => ParamShape::ColorRamp,
            Self::Texture { .. } => ParamShape::Texture,
        }
    }

    /// The literal value carried by constant parameters
    pub fn literal(&self) -> Option<PortValue> {
        match self {
            Self::Float { value } => Some(PortValue::Float(*value)),
            Self::Vec2 { value } => Some(PortValue::Vec2(*value)),
            Self::Vec3 { value } => Some(PortValue::Vec3(*value)),
            Self::Vec4 { value } => Some(PortValue::Vec4(*value)),
            Self::Color { value } => Some(PortValue::Color(*value)),
            Self::None | Self::ColorRamp { .. } | Self::Texture { .. } => None,
        }
    }

    /// Whether all numeric data is finite
    pub fn is_finite(&self) -> bool {
        self.literal().map_or(true, |value| value.is_finite())
    }
}
