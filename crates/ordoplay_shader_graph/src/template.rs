// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed fragment shader template.
//!
//! The tokens exported here are matched verbatim by downstream consumers.

/// Fragment stage attribute
pub const FRAGMENT_ENTRY_POINT: &str = "@fragment";
/// Start of the fragment function declaration
pub const FRAGMENT_SIGNATURE: &str = "fn fragment(";
/// Construction of the material input from interpolated vertex data
pub const MATERIAL_INPUT_CONSTRUCTOR: &str =
    "var pbr_input = pbr_input_from_vertex_output(in, is_front, false);";
/// Lighting evaluation call
pub const LIGHTING_CALL: &str = "var color = apply_pbr_lighting(pbr_input);";
/// Return of the lit color
pub const RETURN_COLOR: &str = "return color;";

const STATEMENTS_SLOT: &str = "{{statements}}";
const ASSIGNMENTS_SLOT: &str = "{{assignments}}";

const SHADER_TEMPLATE: &str = r"#import bevy_pbr::{
    forward_io::VertexOutput,
    mesh_view_bindings::{globals, view},
    pbr_fragment::pbr_input_from_vertex_output,
    pbr_functions::apply_pbr_lighting,
}

@fragment
fn fragment(
    in: VertexOutput,
    @builtin(front_facing) is_front: bool,
) -> @location(0) vec4<f32> {
    var pbr_input = pbr_input_from_vertex_output(in, is_front, false);
{{statements}}{{assignments}}
    var color = apply_pbr_lighting(pbr_input);
    return color;
}
";

fn render_block(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut block = String::from("\n");
    for line in lines {
        block.push_str("    ");
        block.push_str(line);
        block.push('\n');
    }
    block
}

/// Substitute the statement and assignment blocks into the shader template
pub fn assemble_shader(statements: &[String], assignments: &[String]) -> String {
    SHADER_TEMPLATE
        .replacen(STATEMENTS_SLOT, &render_block(statements), 1)
        .replacen(ASSIGNMENTS_SLOT, &render_block(assignments), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_template_structure() {
        let shader = assemble_shader(&[], &[]);
        assert!(shader.contains(FRAGMENT_ENTRY_POINT));
        assert!(shader.contains(FRAGMENT_SIGNATURE));
        assert!(shader.contains(MATERIAL_INPUT_CONSTRUCTOR));
        assert!(shader.contains(LIGHTING_CALL));
        assert!(shader.contains(RETURN_COLOR));
        assert!(!shader.contains("{{"));
    }

    #[test]
    fn test_blocks_keep_order_and_indentation() {
        let shader = assemble_shader(
            &["let var0 = 1.0;".to_string(), "let var1 = var0;".to_string()],
            &["pbr_input.material.metallic = var1;".to_string()],
        );
        let expected = "    var pbr_input = pbr_input_from_vertex_output(in, is_front, false);\n\
                        \n    let var0 = 1.0;\n    let var1 = var0;\n\
                        \n    pbr_input.material.metallic = var1;\n\
                        \n    var color = apply_pbr_lighting(pbr_input);\n";
        assert!(shader.contains(expected), "{shader}");
    }
}
