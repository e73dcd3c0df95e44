//! Draws one triangle offscreen with glGenBuffers, glCompileShader and
//! glUseProgram going through the overrides, so every call shows up as a
//! `wrap_*` line ahead of its GL work.

use gl::types::*;
use gles_indirect::headless::HeadlessContext;
use gles_indirect::loader::EglLoader;
use gles_indirect::wrap::{glCompileShader, glGenBuffers, glUseProgram};
use gles_indirect::{init_indirect, logger, Error, Result};
use log::*;
use std::ffi::CString;
use std::process::ExitCode;
use std::ptr::null;

const WIDTH: i32 = 64;
const HEIGHT: i32 = 64;

const VERTEX_SHADER: &str = "
attribute vec2 position;
void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
";

const FRAGMENT_SHADER: &str = "
precision mediump float;
void main() {
    gl_FragColor = vec4(1.0, 0.5, 0.0, 1.0);
}
";

const TRIANGLE: [GLfloat; 6] = [
    -0.8, -0.8,
     0.8, -0.8,
     0.0,  0.8,
];

unsafe fn compile(kind: GLenum, src: &str) -> Result<GLuint> {
    let shader = gl::CreateShader(kind);
    let source = CString::new(src)?;
    gl::ShaderSource(shader, 1, &source.as_ptr(), null());
    glCompileShader(shader);
    let mut ok: GLint = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut ok);
    if ok == 0 {
        let mut buf = vec![0u8; 1024];
        let mut len: GLsizei = 0;
        gl::GetShaderInfoLog(shader, buf.len() as GLsizei, &mut len, buf.as_mut_ptr() as *mut GLchar);
        buf.truncate(len.max(0) as usize);
        error!("Shader failed to compile: {}", String::from_utf8_lossy(&buf));
    }
    return Ok(shader);
}

unsafe fn render(graphics: &HeadlessContext) -> Result<[u8; 4]> {
    let vs = compile(gl::VERTEX_SHADER, VERTEX_SHADER)?;
    let fs = compile(gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
    let program = gl::CreateProgram();
    gl::AttachShader(program, vs);
    gl::AttachShader(program, fs);
    let position = CString::new("position")?;
    gl::BindAttribLocation(program, 0, position.as_ptr());
    gl::LinkProgram(program);
    let mut linked: GLint = 0;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut linked);
    if linked == 0 {
        warn!("Program {} did not link", program);
    }
    glUseProgram(program);

    let mut vbo: GLuint = 0;
    glGenBuffers(1, &mut vbo);
    info!("Generated buffer {}", vbo);
    gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
    gl::BufferData(
        gl::ARRAY_BUFFER,
        std::mem::size_of_val(&TRIANGLE) as GLsizeiptr,
        TRIANGLE.as_ptr() as *const _,
        gl::STATIC_DRAW,
    );
    gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, 0, null());
    gl::EnableVertexAttribArray(0);

    gl::Viewport(0, 0, graphics.width, graphics.height);
    gl::ClearColor(0.57, 0.70, 0.86, 1.0);
    gl::Clear(gl::COLOR_BUFFER_BIT);
    gl::DrawArrays(gl::TRIANGLES, 0, 3);
    gl::Finish();

    let mut pixel = [0u8; 4];
    gl::ReadPixels(
        graphics.width / 2,
        graphics.height / 2,
        1,
        1,
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        pixel.as_mut_ptr() as *mut _,
    );

    gl::DeleteBuffers(1, &vbo);
    gl::DeleteProgram(program);
    gl::DeleteShader(vs);
    gl::DeleteShader(fs);
    return Ok(pixel);
}

fn run() -> Result<()> {
    let graphics = HeadlessContext::new(WIDTH, HEIGHT)?;
    graphics.load_gl();
    init_indirect(EglLoader::new()?)?;
    let pixel = unsafe { render(&graphics)? };
    graphics.swap_buffers();
    println!("center pixel: {:?}", pixel);
    if pixel[0] < 200 {
        warn!("Triangle does not seem to cover the center pixel");
    }
    return Ok(());
}

fn main() -> ExitCode {
    logger::init();
    return match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ Error::SymbolNotFound(_)) | Err(e @ Error::ResolvedToSelf(_)) => {
            error!("Cannot interpose: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    };
}
