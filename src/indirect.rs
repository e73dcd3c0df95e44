use crate::config::Config;
use crate::error::{Error, Result};
use crate::loader::{BoxedLoader, ProcLoader};
use crate::wrap;
use core::ffi::c_void;
use gl::types::*;
use log::*;
use once_cell::sync::OnceCell;

pub type GenBuffersFn = unsafe extern "system" fn(GLsizei, *mut GLuint);
pub type CompileShaderFn = unsafe extern "system" fn(GLuint);
pub type UseProgramFn = unsafe extern "system" fn(GLuint);

/// The real implementations behind the three wrapped entry points.
#[derive(Clone, Copy)]
pub struct RealFns {
    gen_buffers: GenBuffersFn,
    compile_shader: CompileShaderFn,
    use_program: UseProgramFn,
}

fn lookup(loader: &dyn ProcLoader, name: &'static str, wrapper: *const c_void) -> Result<*const c_void> {
    let ptr = loader.get_proc_address(name);
    if ptr.is_null() {
        return Err(Error::SymbolNotFound(name));
    }
    if ptr == wrapper {
        return Err(Error::ResolvedToSelf(name));
    }
    return Ok(ptr);
}

impl RealFns {
    pub fn load(loader: &dyn ProcLoader) -> Result<RealFns> {
        let wrappers = wrap::addresses();
        let gen_buffers = lookup(loader, "glGenBuffers", wrappers[0])?;
        let compile_shader = lookup(loader, "glCompileShader", wrappers[1])?;
        let use_program = lookup(loader, "glUseProgram", wrappers[2])?;
        // Non-null and checked above; the signatures are fixed by GL.
        return Ok(unsafe {
            RealFns {
                gen_buffers: std::mem::transmute::<*const c_void, GenBuffersFn>(gen_buffers),
                compile_shader: std::mem::transmute::<*const c_void, CompileShaderFn>(compile_shader),
                use_program: std::mem::transmute::<*const c_void, UseProgramFn>(use_program),
            }
        });
    }

    pub unsafe fn gen_buffers(&self, n: GLsizei, buffers: *mut GLuint) {
        (self.gen_buffers)(n, buffers)
    }

    pub unsafe fn compile_shader(&self, shader: GLuint) {
        (self.compile_shader)(shader)
    }

    pub unsafe fn use_program(&self, program: GLuint) {
        (self.use_program)(program)
    }

    pub fn addresses(&self) -> [*const c_void; 3] {
        return [
            self.gen_buffers as *const c_void,
            self.compile_shader as *const c_void,
            self.use_program as *const c_void,
        ];
    }
}

// The loader stays alive next to the pointers it produced,
// since a library loader unmaps its symbols on drop.
struct Indirect {
    real: RealFns,
    _loader: BoxedLoader,
}

fn install(loader: BoxedLoader) -> Result<Indirect> {
    let real = RealFns::load(loader.as_ref())?;
    return Ok(Indirect { real: real, _loader: loader });
}

// Resolution happens at most once per process, whether it comes from
// init_indirect or from the first wrapped call. A failed lazy attempt
// is remembered and never retried.
struct Slot {
    indirect: OnceCell<Indirect>,
    lazy_attempt: OnceCell<()>,
}

impl Slot {
    const fn new() -> Slot {
        return Slot { indirect: OnceCell::new(), lazy_attempt: OnceCell::new() };
    }

    fn get(&self) -> Option<&RealFns> {
        return self.indirect.get().map(|i| &i.real);
    }

    fn init(&self, loader: BoxedLoader) -> Result<&RealFns> {
        if self.indirect.get().is_some() {
            return Err(Error::AlreadyInitialized);
        }
        let indirect = install(loader)?;
        if self.indirect.set(indirect).is_err() {
            return Err(Error::AlreadyInitialized);
        }
        let real = self.get().ok_or(Error::AlreadyInitialized)?;
        report(real);
        return Ok(real);
    }

    fn get_or_resolve<F>(&self, open: F) -> Option<&RealFns>
    where
        F: FnOnce() -> Result<BoxedLoader>,
    {
        if let Some(real) = self.get() {
            return Some(real);
        }
        self.lazy_attempt.get_or_init(|| {
            match open().and_then(|loader| self.init(loader)) {
                Ok(_) | Err(Error::AlreadyInitialized) => {}
                Err(e) => error!("Unable to resolve real GL entry points: {}", e),
            }
        });
        let real = self.get();
        if real.is_none() {
            debug!("Real GL entry points unavailable, call not forwarded");
        }
        return real;
    }
}

static INDIRECT: Slot = Slot::new();

fn open_from_env() -> Result<BoxedLoader> {
    crate::logger::init();
    let cfg = Config::from_env()?;
    debug!("Resolving real GL entry points with {:?}", cfg);
    return cfg.open_loader();
}

/// Resolves the real entry points through `loader` and prints where
/// they and their wrappers live. Fails if they were resolved already.
pub fn init_indirect<L>(loader: L) -> Result<&'static RealFns>
where
    L: ProcLoader + Send + Sync + 'static,
{
    return INDIRECT.init(Box::new(loader));
}

/// The resolved entry points, resolving them from the environment on
/// first use when nobody called [`init_indirect`].
pub fn real() -> Option<&'static RealFns> {
    return INDIRECT.get_or_resolve(open_from_env);
}

pub fn is_initialized() -> bool {
    return INDIRECT.get().is_some();
}

pub fn format_report(real: &RealFns) -> [String; 2] {
    let r = real.addresses();
    let w = wrap::addresses();
    return [
        format!("real glGenBuffers: {:p} glCompileShader: {:p} glUseProgram: {:p}", r[0], r[1], r[2]),
        format!("wrap glGenBuffers: {:p} glCompileShader: {:p} glUseProgram: {:p}", w[0], w[1], w[2]),
    ];
}

fn report(real: &RealFns) {
    for line in format_report(real).iter() {
        println!("{}", line);
        info!("{}", line);
    }
}
