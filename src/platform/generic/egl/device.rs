// native-triangle/src/platform/generic/egl/device.rs
//
//! The EGL display, and the loader for EGL and GLES entry points.

use super::error::ToWindowingApiError;
use crate::egl::types::{EGLDisplay, EGLNativeDisplayType};
use crate::egl::{self, Egl};
use crate::Error;

use libc::{dlopen, dlsym, RTLD_LAZY};
use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::ptr;
use std::sync::LazyLock;
use std::thread;

thread_local! {
    pub(crate) static EGL_FUNCTIONS: Egl = Egl::load_with(get_proc_address);
}

static EGL_LIBRARY: LazyLock<LibraryWrapper> =
    LazyLock::new(|| LibraryWrapper::open(&[c"libEGL.so.1", c"libEGL.so"]));

static GLES_LIBRARY: LazyLock<LibraryWrapper> =
    LazyLock::new(|| LibraryWrapper::open(&[c"libGLESv2.so.2", c"libGLESv2.so"]));

struct LibraryWrapper(*mut c_void);

unsafe impl Send for LibraryWrapper {}
unsafe impl Sync for LibraryWrapper {}

impl LibraryWrapper {
    fn open(sonames: &[&CStr]) -> LibraryWrapper {
        for soname in sonames {
            let handle = unsafe { dlopen(soname.as_ptr(), RTLD_LAZY) };
            if !handle.is_null() {
                return LibraryWrapper(handle);
            }
        }
        warn!("Unable to load any of {:?}", sonames);
        LibraryWrapper(ptr::null_mut())
    }

    fn is_loaded(&self) -> bool {
        !self.0.is_null()
    }

    fn symbol(&self, symbol_name: &str) -> *const c_void {
        if !self.is_loaded() {
            return ptr::null();
        }
        let symbol_name = match CString::new(symbol_name) {
            Ok(symbol_name) => symbol_name,
            Err(_) => return ptr::null(),
        };
        unsafe { dlsym(self.0, symbol_name.as_ptr()).cast_const() }
    }
}

fn get_proc_address(symbol_name: &str) -> *const c_void {
    EGL_LIBRARY.symbol(symbol_name)
}

/// Looks up a GLES entry point.
///
/// Before EGL 1.5, `eglGetProcAddress` is only required to report extension functions, so
/// core GLES symbols fall back to the GLES library itself.
pub(crate) fn get_gl_proc_address(symbol_name: &str) -> *const c_void {
    let symbol = EGL_FUNCTIONS.with(|egl| unsafe {
        match CString::new(symbol_name) {
            Ok(symbol_name) => egl.GetProcAddress(symbol_name.as_ptr()) as *const c_void,
            Err(_) => ptr::null(),
        }
    });
    if !symbol.is_null() {
        return symbol;
    }
    GLES_LIBRARY.symbol(symbol_name)
}

/// An initialized EGL display.
///
/// Devices must be destroyed explicitly with `destroy`; dropping a live one panics.
pub struct Device {
    pub(crate) egl_display: EGLDisplay,
    egl_version: (i32, i32),
}

impl Drop for Device {
    fn drop(&mut self) {
        if !self.is_destroyed() && !thread::panicking() {
            panic!("Devices must be destroyed explicitly with `destroy`!")
        }
    }
}

impl Device {
    /// Opens and initializes the default display.
    pub fn new() -> Result<Device, Error> {
        if !EGL_LIBRARY.is_loaded() {
            return Err(Error::NoGLLibraryFound);
        }

        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_display = egl.GetDisplay(egl::DEFAULT_DISPLAY as EGLNativeDisplayType);
            if egl_display == egl::NO_DISPLAY {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::DeviceOpenFailed(err));
            }

            let (mut major_version, mut minor_version) = (0, 0);
            let result = egl.Initialize(egl_display, &mut major_version, &mut minor_version);
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::DeviceOpenFailed(err));
            }

            info!("Initialized EGL {}.{}", major_version, minor_version);
            Ok(Device {
                egl_display,
                egl_version: (major_version, minor_version),
            })
        })
    }

    /// The `(major, minor)` EGL version reported by `eglInitialize`.
    #[inline]
    pub fn egl_version(&self) -> (i32, i32) {
        self.egl_version
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.egl_display == egl::NO_DISPLAY
    }

    /// Releases the current context and terminates the display.
    ///
    /// Contexts and surfaces created from this device should be destroyed first.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }

        EGL_FUNCTIONS.with(|egl| unsafe {
            egl.MakeCurrent(
                self.egl_display,
                egl::NO_SURFACE,
                egl::NO_SURFACE,
                egl::NO_CONTEXT,
            );
            if egl.Terminate(self.egl_display) == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                warn!("eglTerminate failed: {:?}", err);
            }
        });
        self.egl_display = egl::NO_DISPLAY;
    }
}
