// Runs in its own process: resolves the real entry points lazily from
// a system GLES library chosen through the environment.
#![cfg(target_os = "linux")]

use core::ffi::c_void;
use gles_indirect::config::{DEFAULT_LIBRARY, LIBRARY_VAR, LOADER_VAR};
use gles_indirect::indirect;
use libloading::Library;

fn system_use_program(lib: &Library) -> Option<*const c_void> {
    let sym = unsafe { lib.get::<unsafe extern "system" fn()>(b"glUseProgram\0").ok()? };
    return Some(*sym as *const c_void);
}

#[test]
fn first_use_resolves_from_configured_library() {
    let lib = match unsafe { Library::new(DEFAULT_LIBRARY) } {
        Ok(lib) => lib,
        Err(e) => {
            eprintln!("skipping, {} is not loadable: {}", DEFAULT_LIBRARY, e);
            return;
        }
    };
    let expected = match system_use_program(&lib) {
        Some(p) => p,
        None => {
            eprintln!("skipping, {} has no glUseProgram", DEFAULT_LIBRARY);
            return;
        }
    };

    std::env::set_var(LOADER_VAR, "library");
    std::env::set_var(LIBRARY_VAR, DEFAULT_LIBRARY);
    assert!(!indirect::is_initialized());

    let real = indirect::real().expect("entry points should resolve lazily");
    assert!(indirect::is_initialized());
    assert_eq!(real.addresses()[2], expected);

    let [real_line, wrap_line] = indirect::format_report(real);
    assert_eq!(
        real_line,
        format!("real glGenBuffers: {:p} glCompileShader: {:p} glUseProgram: {:p}",
            real.addresses()[0], real.addresses()[1], expected),
    );
    assert!(wrap_line.starts_with("wrap glGenBuffers: 0x"));

    // Later calls reuse the same pointers.
    let again = indirect::real().expect("still resolved");
    assert_eq!(again.addresses(), real.addresses());
}
