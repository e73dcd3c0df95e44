use crate::error::{Error, Result};
use core::ffi::c_void;
use khronos_egl as egl;
use std::ptr::null;
use std::rc::Rc;

type EglApi = egl::DynamicInstance<egl::EGL1_4>;

// Wrapper around EGL surface for impl Drop
pub struct WEGLSurface(pub egl::Surface, pub egl::Display, pub Rc<EglApi>);

impl Drop for WEGLSurface {
    fn drop(&mut self) {
        match self.2.destroy_surface(self.1, self.0) {
            Err(e) => log::error!("Failed to destroy EGL surface: {:?}", e),
            Ok(_) => {},
        };
    }
}

// Wrapper around context
pub struct WEGLContext(pub egl::Context, pub egl::Display, pub Rc<EglApi>);

impl Drop for WEGLContext {
    fn drop(&mut self) {
        match self.2.destroy_context(self.1, self.0) {
            Err(e) => log::error!("Failed to destroy EGL context: {:?}", e),
            Ok(_) => {},
        };
    }
}

/// An offscreen GLES 2 context on the default display. There is no
/// window, so rendering goes to a small pbuffer.
pub struct HeadlessContext {
    // The surface has to go before the context it is bound to.
    surface: WEGLSurface,
    egl_ctx: WEGLContext,
    api: Rc<EglApi>,
    display: egl::Display,
    pub width: i32,
    pub height: i32,
}

impl HeadlessContext {
    pub fn new(width: i32, height: i32) -> Result<HeadlessContext> {
        let egl_api = Rc::new(unsafe { EglApi::load_required()? });
        let display = match unsafe { egl_api.get_display(egl::DEFAULT_DISPLAY) } {
            Some(d) => Ok(d),
            None => Err(Error::NoDisplay),
        }?;
        let (major, minor) = egl_api.initialize(display)?;
        log::info!("EGL {}.{} initialized", major, minor);
        egl_api.bind_api(egl::OPENGL_ES_API)?;
        let attrs = [
            egl::RED_SIZE, 8,
            egl::GREEN_SIZE, 8,
            egl::BLUE_SIZE, 8,
            egl::ALPHA_SIZE, 8,
            egl::SURFACE_TYPE, egl::PBUFFER_BIT,
            egl::RENDERABLE_TYPE, egl::OPENGL_ES2_BIT,
            egl::NONE,
        ];
        let cfg = match egl_api.choose_first_config(display, &attrs)? {
            Some(c) => c,
            None => return Err(Error::NoConfig),
        };
        let context_attributes = [
            egl::CONTEXT_CLIENT_VERSION, 2,
            egl::NONE,
        ];
        let ctx = WEGLContext(
            egl_api.create_context(display, cfg, None, &context_attributes)?,
            display,
            egl_api.clone(),
        );
        let surface_attributes = [
            egl::WIDTH, width,
            egl::HEIGHT, height,
            egl::NONE,
        ];
        let surface = WEGLSurface(
            egl_api.create_pbuffer_surface(display, cfg, &surface_attributes)?,
            display,
            egl_api.clone(),
        );
        egl_api.make_current(display, Some(surface.0), Some(surface.0), Some(ctx.0))?;
        return Ok(HeadlessContext {
            surface: surface,
            egl_ctx: ctx,
            api: egl_api,
            display: display,
            width: width,
            height: height,
        });
    }

    pub fn get_proc_address(&self, name: &str) -> *const c_void {
        return match self.api.get_proc_address(name) {
            Some(p) => p as *const c_void,
            None => null(),
        };
    }

    /// Points the `gl` crate at this context's entry points.
    pub fn load_gl(&self) {
        gl::load_with(|s| self.get_proc_address(s));
    }

    pub fn swap_buffers(&self) {
        match self.api.swap_buffers(self.display, self.surface.0) {
            Err(e) => { log::warn!("Failed to swap buffers: {:?}", e); }
            _ => {}
        };
    }
}

impl Drop for HeadlessContext {
    fn drop(&mut self) {
        let _ = self.api.make_current(self.display, None, None, None);
        log::debug!("Tearing down {}x{} EGL context", self.width, self.height);
    }
}
