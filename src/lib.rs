//! Overrides `glGenBuffers`, `glCompileShader` and `glUseProgram` with
//! versions that print a label before forwarding to the real GL, which is
//! looked up by name at initialization.
//!
//! Link the crate and call [`init_indirect`], or build the `cdylib` and put
//! it in `LD_PRELOAD` in front of a GL program; in that case the real entry
//! points are resolved on the first wrapped call, as configured by
//! `GLES_INDIRECT_LOADER` and `GLES_INDIRECT_LIBRARY`.

pub mod config;
pub mod error;
pub mod headless;
pub mod indirect;
pub mod loader;
pub mod logger;
pub mod wrap;

pub use config::{Config, LoaderKind};
pub use error::{Error, Result};
pub use indirect::{init_indirect, RealFns};
pub use loader::ProcLoader;
