use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    EglLoad(khronos_egl::LoadError<libloading::Error>),
    Egl(khronos_egl::Error),
    Library(libloading::Error),
    SymbolNotFound(&'static str),
    ResolvedToSelf(&'static str),
    InvalidSymbolName,
    InvalidConfig(String),
    AlreadyInitialized,
    NoDisplay,
    NoConfig,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EglLoad(e) => write!(f, "unable to load EGL: {:?}", e),
            Error::Egl(e) => write!(f, "EGL call failed: {}", e),
            Error::Library(e) => write!(f, "unable to load GL library: {}", e),
            Error::SymbolNotFound(name) => write!(f, "no real implementation of {}", name),
            Error::ResolvedToSelf(name) => write!(f, "{} resolved to its own wrapper", name),
            Error::InvalidSymbolName => write!(f, "symbol name contains a NUL byte"),
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Error::AlreadyInitialized => write!(f, "real GL functions are already resolved"),
            Error::NoDisplay => write!(f, "no EGL display available"),
            Error::NoConfig => write!(f, "no matching EGL config"),
        }
    }
}

impl std::error::Error for Error {}

impl From<khronos_egl::LoadError<libloading::Error>> for Error {
    fn from(e: khronos_egl::LoadError<libloading::Error>) -> Self {
        return Error::EglLoad(e);
    }
}

impl From<khronos_egl::Error> for Error {
    fn from(e: khronos_egl::Error) -> Self {
        return Error::Egl(e);
    }
}

impl From<libloading::Error> for Error {
    fn from(e: libloading::Error) -> Self {
        return Error::Library(e);
    }
}

impl From<std::ffi::NulError> for Error {
    fn from(_e: std::ffi::NulError) -> Self {
        return Error::InvalidSymbolName;
    }
}
