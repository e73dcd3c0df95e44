//! The overridden entry points.
//!
//! Each one prints `wrap_<name>` on stdout and then hands its arguments,
//! untouched, to the real implementation resolved in [`crate::indirect`].

#![allow(non_snake_case)]

use crate::indirect;
use core::ffi::c_void;
use gl::types::*;
use log::*;
use std::io::{self, Write};

pub(crate) fn announce_then<W: Write, R>(out: &mut W, name: &str, call: impl FnOnce() -> R) -> R {
    // A closed stdout must not keep the call from reaching GL.
    let _ = writeln!(out, "wrap_{}", name);
    let _ = out.flush();
    return call();
}

#[no_mangle]
pub unsafe extern "system" fn glGenBuffers(n: GLsizei, buffers: *mut GLuint) {
    announce_then(&mut io::stdout(), "glGenBuffers", || match indirect::real() {
        Some(real) => {
            debug!("glGenBuffers({}, {:p})", n, buffers);
            real.gen_buffers(n, buffers);
        }
        None => debug!("glGenBuffers dropped, no real implementation"),
    });
}

#[no_mangle]
pub unsafe extern "system" fn glCompileShader(shader: GLuint) {
    announce_then(&mut io::stdout(), "glCompileShader", || match indirect::real() {
        Some(real) => {
            debug!("glCompileShader({})", shader);
            real.compile_shader(shader);
        }
        None => debug!("glCompileShader dropped, no real implementation"),
    });
}

#[no_mangle]
pub unsafe extern "system" fn glUseProgram(program: GLuint) {
    announce_then(&mut io::stdout(), "glUseProgram", || match indirect::real() {
        Some(real) => {
            debug!("glUseProgram({})", program);
            real.use_program(program);
        }
        None => debug!("glUseProgram dropped, no real implementation"),
    });
}

pub fn addresses() -> [*const c_void; 3] {
    return [
        glGenBuffers as *const c_void,
        glCompileShader as *const c_void,
        glUseProgram as *const c_void,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Probe(Rc<RefCell<Vec<u8>>>);

    impl Write for Probe {
        fn write(&mut self, b: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(b);
            Ok(b.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn label_is_written_before_the_call() {
        let mut probe = Probe::default();
        let seen = probe.clone();
        let printed_first = announce_then(&mut probe, "glGenBuffers", || {
            seen.0.borrow().as_slice() == b"wrap_glGenBuffers\n"
        });
        assert!(printed_first);
    }

    #[test]
    fn result_is_passed_through() {
        let mut out: Vec<u8> = Vec::new();
        let ret = announce_then(&mut out, "glUseProgram", || 7);
        assert_eq!(ret, 7);
        assert_eq!(out, b"wrap_glUseProgram\n");
    }

    #[test]
    fn a_failing_sink_still_forwards() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _b: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }
        let mut called = false;
        announce_then(&mut Closed, "glCompileShader", || called = true);
        assert!(called);
    }

    #[test]
    fn wrapper_addresses_are_distinct() {
        let [a, b, c] = addresses();
        assert!(a != b && b != c && a != c);
    }
}
