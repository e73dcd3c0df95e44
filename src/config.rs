use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const LOADER_VAR: &str = "GLES_INDIRECT_LOADER";
pub const LIBRARY_VAR: &str = "GLES_INDIRECT_LIBRARY";
pub const DEFAULT_LIBRARY: &str = "libGLESv2.so.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    Next,
    Egl,
    Library,
}

impl Default for LoaderKind {
    fn default() -> Self {
        if cfg!(target_family = "unix") {
            LoaderKind::Next
        } else {
            LoaderKind::Egl
        }
    }
}

impl FromStr for LoaderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        return match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(LoaderKind::Next),
            "egl" => Ok(LoaderKind::Egl),
            "library" | "lib" => Ok(LoaderKind::Library),
            other => Err(Error::InvalidConfig(format!(
                "{}={:?}, expected next, egl or library", LOADER_VAR, other))),
        };
    }
}

// Where the real GL entry points come from when the
// wrappers have to resolve them on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub loader: LoaderKind,
    pub library: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        return Config {
            loader: LoaderKind::default(),
            library: PathBuf::from(DEFAULT_LIBRARY),
        };
    }
}

impl Config {
    pub fn from_env() -> Result<Config> {
        return Self::from_vars(env::var(LOADER_VAR).ok(), env::var(LIBRARY_VAR).ok());
    }

    pub fn from_vars(loader: Option<String>, library: Option<String>) -> Result<Config> {
        let mut cfg = Config::default();
        if let Some(l) = loader.filter(|l| !l.trim().is_empty()) {
            cfg.loader = l.parse()?;
        }
        if let Some(lib) = library.filter(|l| !l.is_empty()) {
            cfg.library = PathBuf::from(lib);
        }
        return Ok(cfg);
    }
}
