// native-triangle/src/scene.rs
//
//! The fixed scene: one shader pair, one static triangle.

use crate::gl;
use crate::{Error, Gl};

use euclid::default::Size2D;
use glow::{Buffer, HasContext, Program, Shader};
use std::thread;

pub const VERTEX_SHADER_SOURCE: &str = "precision mediump float;
attribute vec2 v_pos;
void main() {
   gl_Position = vec4(v_pos.x, v_pos.y, 0.0, 1.0);
}
";

pub const FRAGMENT_SHADER_SOURCE: &str = "precision mediump float;
void main() {
   gl_FragColor = vec4(1.0);
}
";

/// Clip-space positions, two floats per vertex.
pub const TRIANGLE_VERTICES: [f32; 6] = [
    -0.5, 0.0, //
    0.5, 0.0, //
    0.0, 0.5,
];

/// The attribute index `v_pos` is bound to before linking.
pub const POSITION_ATTRIBUTE: u32 = 0;
pub const POSITION_ATTRIBUTE_NAME: &str = "v_pos";
pub const COMPONENTS_PER_VERTEX: i32 = 2;
pub const VERTEX_COUNT: i32 = TRIANGLE_VERTICES.len() as i32 / COMPONENTS_PER_VERTEX;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
        }
    }

    fn to_gl(self) -> u32 {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// The GL objects needed to draw a frame.
///
/// The objects belong to the context that was current when the scene was built, and that
/// context must be current again for `draw` and `destroy`. A scene has to be destroyed
/// explicitly; dropping one that still owns GL objects panics.
pub struct Scene {
    program: Option<Program>,
    vertex_buffer: Option<Buffer>,
    clear_color: [f32; 4],
}

impl Drop for Scene {
    fn drop(&mut self) {
        if (self.program.is_some() || self.vertex_buffer.is_some()) && !thread::panicking() {
            panic!("Scenes must be destroyed explicitly with `destroy`!")
        }
    }
}

impl Scene {
    /// Uploads the triangle and builds the program from the built-in shaders.
    pub fn new(gl: &Gl, clear_color: [f32; 4]) -> Result<Scene, Error> {
        Scene::with_shader_sources(
            gl,
            clear_color,
            VERTEX_SHADER_SOURCE,
            FRAGMENT_SHADER_SOURCE,
        )
    }

    /// Uploads the triangle and builds the program from the given sources.
    ///
    /// Compile and link failures are logged and the scene is returned anyway; only a failure
    /// to allocate a GL object is an error.
    pub fn with_shader_sources(
        gl: &Gl,
        clear_color: [f32; 4],
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Scene, Error> {
        unsafe {
            let vertex_buffer = gl.create_buffer().map_err(Error::GLObjectCreationFailed)?;
            gl.bind_buffer(gl::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(
                gl::ARRAY_BUFFER,
                bytemuck::cast_slice(&TRIANGLE_VERTICES[..]),
                gl::STATIC_DRAW,
            );
            gl.bind_buffer(gl::ARRAY_BUFFER, None);

            let program = match build_program(gl, vertex_source, fragment_source) {
                Ok(program) => program,
                Err(err) => {
                    gl.delete_buffer(vertex_buffer);
                    return Err(err);
                }
            };

            Ok(Scene {
                program: Some(program),
                vertex_buffer: Some(vertex_buffer),
                clear_color,
            })
        }
    }

    /// Clears the framebuffer and draws the triangle over a `size` viewport.
    pub fn draw(&self, gl: &Gl, size: Size2D<i32>) {
        unsafe {
            gl.viewport(0, 0, size.width, size.height);
            let [red, green, blue, alpha] = self.clear_color;
            gl.clear_color(red, green, blue, alpha);
            gl.clear(gl::COLOR_BUFFER_BIT);

            gl.use_program(self.program);
            gl.bind_buffer(gl::ARRAY_BUFFER, self.vertex_buffer);
            gl.vertex_attrib_pointer_f32(
                POSITION_ATTRIBUTE,
                COMPONENTS_PER_VERTEX,
                gl::FLOAT,
                false,
                0,
                0,
            );
            gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);
            gl.draw_arrays(gl::TRIANGLES, 0, VERTEX_COUNT);
        }
    }

    pub fn destroy(&mut self, gl: &Gl) {
        unsafe {
            if let Some(program) = self.program.take() {
                gl.use_program(None);
                gl.delete_program(program);
            }
            if let Some(vertex_buffer) = self.vertex_buffer.take() {
                gl.bind_buffer(gl::ARRAY_BUFFER, None);
                gl.delete_buffer(vertex_buffer);
            }
        }
    }
}

unsafe fn build_program(
    gl: &Gl,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<Program, Error> {
    let vertex_shader = compile_shader(gl, ShaderKind::Vertex, vertex_source)?;
    let fragment_shader =
        match compile_shader(gl, ShaderKind::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(vertex_shader);
                return Err(err);
            }
        };

    let program = match gl.create_program() {
        Ok(program) => program,
        Err(err) => {
            gl.delete_shader(vertex_shader);
            gl.delete_shader(fragment_shader);
            return Err(Error::GLObjectCreationFailed(err));
        }
    };

    gl.attach_shader(program, vertex_shader);
    gl.attach_shader(program, fragment_shader);
    gl.bind_attrib_location(program, POSITION_ATTRIBUTE, POSITION_ATTRIBUTE_NAME);
    gl.link_program(program);
    if !gl.get_program_link_status(program) {
        let info_log = gl.get_program_info_log(program);
        error!("Failed to link program: {}", trim_info_log(&info_log));
    }

    // The program keeps the linked binary; the shader objects are no longer needed.
    gl.detach_shader(program, vertex_shader);
    gl.detach_shader(program, fragment_shader);
    gl.delete_shader(vertex_shader);
    gl.delete_shader(fragment_shader);

    Ok(program)
}

unsafe fn compile_shader(gl: &Gl, kind: ShaderKind, source: &str) -> Result<Shader, Error> {
    let shader = gl
        .create_shader(kind.to_gl())
        .map_err(Error::GLObjectCreationFailed)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let info_log = gl.get_shader_info_log(shader);
        error!(
            "Failed to compile {} shader: {}",
            kind.name(),
            trim_info_log(&info_log)
        );
    }
    Ok(shader)
}

/// Strips the NUL padding and trailing newlines drivers leave on info logs.
pub(crate) fn trim_info_log(info_log: &str) -> &str {
    info_log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
}
