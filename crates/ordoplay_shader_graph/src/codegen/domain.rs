// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed multi-statement expansions for domain-specific kinds.

use super::emit::{placeholder_literal, Inputs};
use super::CodegenContext;
use crate::compiler::CompileError;
use crate::kind::{DomainRule, NodeKind, BUILTIN_UV, BUILTIN_VIEW_DIRECTION, BUILTIN_WORLD_NORMAL};
use crate::node::{Node, NodeType};
use crate::params::{NodeParams, RampInterpolation};
use crate::port::{PortId, PortType};

const VEC2: &str = "vec2<f32>";
const VEC3: &str = "vec3<f32>";
const VEC4: &str = "vec4<f32>";
const F32: &str = "f32";

/// Value-noise corner offsets, in mix order
const CORNERS: [&str; 4] = [
    "vec2<f32>(0.0, 0.0)",
    "vec2<f32>(1.0, 0.0)",
    "vec2<f32>(0.0, 1.0)",
    "vec2<f32>(1.0, 1.0)",
];

fn hash21(cell: &str) -> String {
    format!("fract(sin(dot({cell}, vec2<f32>(12.9898, 78.233))) * 43758.5453)")
}

/// Bind an output only if the catalog declares it for this kind
fn bind_declared(ctx: &mut CodegenContext<'_>, node: &Node, node_type: &NodeType, id: &str, expr: String) {
    let port_id = PortId::from(id);
    if node_type.output(&port_id).is_some() {
        ctx.bind(node.id, &port_id, expr);
    }
}

pub(super) fn emit(
    ctx: &mut CodegenContext<'_>,
    node: &Node,
    rule: DomainRule,
    node_type: &NodeType,
    inputs: &Inputs,
) -> Result<(), CompileError> {
    match rule {
        DomainRule::Fresnel => {
            let normal = inputs.expr_or("normal", BUILTIN_WORLD_NORMAL)?;
            let power = inputs.expr("power")?;
            let view = ctx.declare(Some(VEC3), BUILTIN_VIEW_DIRECTION);
            let facing = ctx.declare(Some(F32), format!("max(dot(normalize({normal}), {view}), 0.0)"));
            let result = ctx.declare(Some(F32), format!("pow(1.0 - {facing}, {power})"));
            bind_declared(ctx, node, node_type, "result", result);
        }
        DomainRule::Noise => {
            let uv = inputs.expr_or("uv", BUILTIN_UV)?;
            let scale = inputs.expr("scale")?;
            let p = ctx.declare(Some(VEC2), format!("{uv} * {scale}"));
            let cell = ctx.declare(Some(VEC2), format!("floor({p})"));
            let local = ctx.declare(Some(VEC2), format!("fract({p})"));
            let fade = ctx.declare(Some(VEC2), format!("{local} * {local} * (3.0 - 2.0 * {local})"));
            let [a, b, c, d] =
                CORNERS.map(|offset| ctx.declare(Some(F32), hash21(&format!("{cell} + {offset}"))));
            let value = ctx.declare(
                Some(F32),
                format!("mix(mix({a}, {b}, {fade}.x), mix({c}, {d}, {fade}.x), {fade}.y)"),
            );
            bind_declared(ctx, node, node_type, "value", value);
        }
        DomainRule::Voronoi => {
            let uv = inputs.expr_or("uv", BUILTIN_UV)?;
            let scale = inputs.expr("scale")?;
            let p = ctx.declare(Some(VEC2), format!("{uv} * {scale}"));
            let cell = ctx.declare(Some(VEC2), format!("floor({p})"));
            let nearest = ctx.declare_mut(Some(F32), "8.0");
            ctx.push_line("for (var y: i32 = -1; y <= 1; y++) {");
            ctx.push_line("    for (var x: i32 = -1; x <= 1; x++) {");
            ctx.push_line(format!("        let neighbor = {cell} + vec2<f32>(f32(x), f32(y));"));
            ctx.push_line(
                "        let jitter = fract(sin(vec2<f32>(dot(neighbor, vec2<f32>(127.1, 311.7)), \
                 dot(neighbor, vec2<f32>(269.5, 183.3)))) * 43758.5453);",
            );
            ctx.push_line(format!("        {nearest} = min({nearest}, distance({p}, neighbor + jitter));"));
            ctx.push_line("    }");
            ctx.push_line("}");
            bind_declared(ctx, node, node_type, "distance", nearest);
            // Cell color is not implemented yet
            bind_declared(ctx, node, node_type, "color", placeholder_literal(PortType::Color).to_string());
        }
        DomainRule::HsvToRgb => {
            let hue = inputs.expr("hue")?;
            let saturation = inputs.expr("saturation")?;
            let value = inputs.expr("value")?;
            let k = ctx.declare(
                Some(VEC3),
                format!(
                    "abs(fract(vec3<f32>({hue}) + vec3<f32>(1.0, 2.0 / 3.0, 1.0 / 3.0)) * 6.0 - vec3<f32>(3.0))"
                ),
            );
            let chroma = ctx.declare(
                Some(VEC3),
                format!("clamp({k} - vec3<f32>(1.0), vec3<f32>(0.0), vec3<f32>(1.0))"),
            );
            let rgb = ctx.declare(
                Some(VEC4),
                format!("vec4<f32>({value} * mix(vec3<f32>(1.0), {chroma}, {saturation}), 1.0)"),
            );
            bind_declared(ctx, node, node_type, "rgb", rgb);
        }
        DomainRule::RgbToHsv => {
            let rgb = inputs.expr("rgb")?;
            let c = ctx.declare(Some(VEC3), format!("{rgb}.rgb"));
            let p = ctx.declare(
                Some(VEC4),
                format!(
                    "mix(vec4<f32>({c}.bg, -1.0, 2.0 / 3.0), vec4<f32>({c}.gb, 0.0, -1.0 / 3.0), step({c}.b, {c}.g))"
                ),
            );
            let q = ctx.declare(
                Some(VEC4),
                format!("mix(vec4<f32>({p}.xyw, {c}.r), vec4<f32>({c}.r, {p}.yzx), step({p}.x, {c}.r))"),
            );
            let d = ctx.declare(Some(F32), format!("{q}.x - min({q}.w, {q}.y)"));
            let hue = ctx.declare(Some(F32), format!("abs({q}.z + ({q}.w - {q}.y) / (6.0 * {d} + 1.0e-10))"));
            let saturation = ctx.declare(Some(F32), format!("{d} / ({q}.x + 1.0e-10)"));
            let value = ctx.declare(Some(F32), format!("{q}.x"));
            bind_declared(ctx, node, node_type, "hue", hue);
            bind_declared(ctx, node, node_type, "saturation", saturation);
            bind_declared(ctx, node, node_type, "value", value);
        }
        DomainRule::ColorRamp => {
            let NodeParams::ColorRamp { interpolation } = node.params else {
                return Err(CompileError::InvalidParameters {
                    node: node.id,
                    kind: NodeKind::ColorRamp.id(),
                    expected: NodeKind::ColorRamp.expected_params(),
                    found: node.params.shape(),
                });
            };
            let factor = inputs.expr("factor")?;
            let color_a = inputs.expr("color_a")?;
            let color_b = inputs.expr("color_b")?;
            let shaped = match interpolation {
                RampInterpolation::Linear => format!("clamp({factor}, 0.0, 1.0)"),
                RampInterpolation::Ease => format!("smoothstep(0.0, 1.0, {factor})"),
                RampInterpolation::Constant => format!("step(1.0, {factor})"),
            };
            let t = ctx.declare(Some(F32), shaped);
            let color = ctx.declare(Some(VEC4), format!("mix({color_a}, {color_b}, {t})"));
            bind_declared(ctx, node, node_type, "color", color);
        }
    }
    Ok(())
}
