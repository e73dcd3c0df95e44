use core::ffi::c_void;
use gl::types::*;
use gles_indirect::indirect;
use gles_indirect::wrap::{glCompileShader, glGenBuffers, glUseProgram};
use gles_indirect::{init_indirect, Error};
use std::ptr::null;
use std::sync::{Mutex, Once};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    GenBuffers(GLsizei),
    CompileShader(GLuint),
    UseProgram(GLuint),
}

static CALLS: Mutex<Vec<Call>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();
// The tests share one process-wide set of real pointers,
// so they also have to share the call log one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

unsafe extern "system" fn fake_gen_buffers(n: GLsizei, buffers: *mut GLuint) {
    CALLS.lock().unwrap().push(Call::GenBuffers(n));
    for i in 0..n.max(0) as usize {
        *buffers.add(i) = 100 + i as GLuint;
    }
}

unsafe extern "system" fn fake_compile_shader(shader: GLuint) {
    CALLS.lock().unwrap().push(Call::CompileShader(shader));
}

unsafe extern "system" fn fake_use_program(program: GLuint) {
    CALLS.lock().unwrap().push(Call::UseProgram(program));
}

fn fake_gl(name: &str) -> *const c_void {
    return match name {
        "glGenBuffers" => fake_gen_buffers as *const c_void,
        "glCompileShader" => fake_compile_shader as *const c_void,
        "glUseProgram" => fake_use_program as *const c_void,
        _ => null(),
    };
}

fn setup() -> std::sync::MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    INIT.call_once(|| {
        let real = init_indirect(fake_gl).expect("fake GL should resolve");
        assert_eq!(real.addresses()[0], fake_gen_buffers as *const c_void);
    });
    CALLS.lock().unwrap().clear();
    return guard;
}

fn take_calls() -> Vec<Call> {
    return std::mem::take(&mut *CALLS.lock().unwrap());
}

#[test]
fn gen_buffers_reaches_real_and_fills_output() {
    let _guard = setup();
    let mut ids = [0 as GLuint; 3];
    unsafe { glGenBuffers(3, ids.as_mut_ptr()) };
    assert_eq!(ids, [100, 101, 102]);
    assert_eq!(take_calls(), vec![Call::GenBuffers(3)]);
}

#[test]
fn arguments_are_forwarded_unchanged() {
    let _guard = setup();
    unsafe {
        glCompileShader(7);
        glUseProgram(0);
        glUseProgram(GLuint::MAX);
        glCompileShader(8);
    }
    assert_eq!(take_calls(), vec![
        Call::CompileShader(7),
        Call::UseProgram(0),
        Call::UseProgram(GLuint::MAX),
        Call::CompileShader(8),
    ]);
}

#[test]
fn second_init_is_refused() {
    let _guard = setup();
    match init_indirect(fake_gl) {
        Err(Error::AlreadyInitialized) => {}
        Err(e) => panic!("unexpected error {}", e),
        Ok(_) => panic!("real pointers were replaced"),
    }
    assert!(indirect::is_initialized());
    let real = indirect::real().expect("still resolved");
    assert_eq!(real.addresses()[2], fake_use_program as *const c_void);
}
