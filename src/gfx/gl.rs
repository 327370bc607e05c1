use anyhow::{Context, Result};
use glow::HasContext;

const UI_VERT: &str = include_str!("../../assets/shaders/ui.vert.glsl");
const UI_FRAG: &str = include_str!("../../assets/shaders/ui.frag.glsl");

pub fn compile_shader(gl: &glow::Context, shader_type: u32, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl
            .create_shader(shader_type)
            .map_err(|e| anyhow::anyhow!("Failed to create shader: {}", e))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let info = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            anyhow::bail!("Shader compilation failed: {}", info);
        }

        Ok(shader)
    }
}

pub fn link_program(
    gl: &glow::Context,
    vertex_shader: glow::Shader,
    fragment_shader: glow::Shader,
) -> Result<glow::Program> {
    unsafe {
        let program = gl
            .create_program()
            .map_err(|e| anyhow::anyhow!("Failed to create program: {}", e))?;
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let info = gl.get_program_info_log(program);
            gl.delete_program(program);
            anyhow::bail!("Program linking failed: {}", info);
        }

        gl.detach_shader(program, vertex_shader);
        gl.detach_shader(program, fragment_shader);

        Ok(program)
    }
}

/// Builds the single program every page element is drawn with.
pub fn load_ui_program(gl: &glow::Context) -> Result<glow::Program> {
    let vertex_shader = compile_shader(gl, glow::VERTEX_SHADER, UI_VERT).context("ui.vert.glsl")?;
    let fragment_shader =
        compile_shader(gl, glow::FRAGMENT_SHADER, UI_FRAG).context("ui.frag.glsl")?;
    let program = link_program(gl, vertex_shader, fragment_shader)?;

    unsafe {
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);
    }

    Ok(program)
}
