//! Lookup of the real GL entry points by name.
//!
//! Every loader answers the same question as `eglGetProcAddress`: given a
//! symbol name, return its address or null.

use crate::config::{Config, LoaderKind};
use crate::error::Result;
use core::ffi::c_void;
use khronos_egl as egl;
use libloading::Library;
use std::ffi::CString;
use std::path::Path;
use std::ptr::null;

pub trait ProcLoader {
    fn get_proc_address(&self, name: &str) -> *const c_void;
}

// Same shape as the closure handed to gl::load_with.
impl<F> ProcLoader for F
where
    F: Fn(&str) -> *const c_void,
{
    fn get_proc_address(&self, name: &str) -> *const c_void {
        return self(name);
    }
}

/// Resolves through `dlsym(RTLD_NEXT, ..)`, i.e. the first definition that
/// comes after this library in lookup order. This is what a preloaded
/// interposer wants.
#[cfg(target_family = "unix")]
pub struct NextLoader;

#[cfg(target_family = "unix")]
impl ProcLoader for NextLoader {
    fn get_proc_address(&self, name: &str) -> *const c_void {
        let cs = match CString::new(name) {
            Ok(tmp) => tmp,
            Err(_) => return null(),
        };
        return unsafe { libc::dlsym(libc::RTLD_NEXT, cs.as_ptr()) as *const c_void };
    }
}

pub struct EglLoader {
    api: egl::DynamicInstance<egl::EGL1_0>,
}

// The instance only holds the library handle and function
// pointers, and eglGetProcAddress is callable from any thread.
unsafe impl Send for EglLoader {}
unsafe impl Sync for EglLoader {}

impl EglLoader {
    pub fn new() -> Result<EglLoader> {
        let api = unsafe { egl::DynamicInstance::<egl::EGL1_0>::load_required()? };
        return Ok(EglLoader { api: api });
    }
}

impl ProcLoader for EglLoader {
    fn get_proc_address(&self, name: &str) -> *const c_void {
        return match self.api.get_proc_address(name) {
            Some(p) => p as *const c_void,
            None => null(),
        };
    }
}

/// Looks symbols up directly in a GL library opened by path.
pub struct LibraryLoader {
    lib: Library,
}

impl LibraryLoader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<LibraryLoader> {
        let lib = unsafe { Library::new(path.as_ref().as_os_str())? };
        return Ok(LibraryLoader { lib: lib });
    }
}

impl ProcLoader for LibraryLoader {
    fn get_proc_address(&self, name: &str) -> *const c_void {
        let cs = match CString::new(name) {
            Ok(tmp) => tmp,
            Err(_) => return null(),
        };
        return match unsafe { self.lib.get::<unsafe extern "system" fn()>(cs.as_bytes_with_nul()) } {
            Ok(sym) => *sym as *const c_void,
            Err(e) => {
                log::debug!("{} not found in GL library: {}", name, e);
                null()
            }
        };
    }
}

pub type BoxedLoader = Box<dyn ProcLoader + Send + Sync>;

impl LoaderKind {
    pub fn open(self, cfg: &Config) -> Result<BoxedLoader> {
        return match self {
            #[cfg(target_family = "unix")]
            LoaderKind::Next => Ok(Box::new(NextLoader)),
            #[cfg(not(target_family = "unix"))]
            LoaderKind::Next => Err(crate::error::Error::InvalidConfig(
                "the next loader needs dlsym(RTLD_NEXT)".to_string())),
            LoaderKind::Egl => Ok(Box::new(EglLoader::new()?)),
            LoaderKind::Library => Ok(Box::new(LibraryLoader::open(&cfg.library)?)),
        };
    }
}

impl Config {
    pub fn open_loader(&self) -> Result<BoxedLoader> {
        return self.loader.open(self);
    }
}
