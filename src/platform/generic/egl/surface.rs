// native-triangle/src/platform/generic/egl/surface.rs
//
//! Window surfaces.

use super::context::ContextDescriptor;
use super::device::{Device, EGL_FUNCTIONS};
use super::error::ToWindowingApiError;
use crate::egl;
use crate::egl::types::{EGLSurface, EGLint};
use crate::Error;

use euclid::default::Size2D;
use rwh_06::{RawWindowHandle, WindowHandle};
use std::fmt::{self, Debug, Formatter};
use std::os::raw::c_void;
use std::ptr;
use std::thread;

/// A native window that EGL can render to. On Android this is an `ANativeWindow`.
///
/// The widget does not own the window; whoever handed out the window handle has to keep the
/// window alive for as long as surfaces built on it exist.
#[derive(Clone, Copy, PartialEq)]
pub struct NativeWidget {
    pub(crate) native_window: *mut c_void,
}

impl Debug for NativeWidget {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "NativeWidget({:p})", self.native_window)
    }
}

impl NativeWidget {
    /// Extracts the `ANativeWindow` from a window handle.
    ///
    /// Any other kind of handle yields `IncompatibleNativeWidget`.
    pub fn from_window_handle(handle: WindowHandle<'_>) -> Result<NativeWidget, Error> {
        match handle.as_raw() {
            RawWindowHandle::AndroidNdk(handle) => Ok(NativeWidget {
                native_window: handle.a_native_window.as_ptr(),
            }),
            _ => Err(Error::IncompatibleNativeWidget),
        }
    }

    #[inline]
    pub fn native_window(&self) -> *mut c_void {
        self.native_window
    }
}

/// A window surface.
///
/// Surfaces must be destroyed explicitly with `Device::destroy_surface`; dropping a live one
/// panics.
pub struct Surface {
    pub(crate) egl_surface: EGLSurface,
}

impl Debug for Surface {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "Surface({:p})", self.egl_surface)
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if !self.is_destroyed() && !thread::panicking() {
            panic!("Surfaces must be destroyed explicitly with `destroy_surface`!")
        }
    }
}

impl Surface {
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.egl_surface == egl::NO_SURFACE
    }
}

impl Device {
    /// Creates a surface that renders to `native_widget` with the config of `descriptor`.
    pub fn create_window_surface(
        &self,
        descriptor: &ContextDescriptor,
        native_widget: &NativeWidget,
    ) -> Result<Surface, Error> {
        let egl_config = self.context_descriptor_to_egl_config(descriptor)?;

        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_surface = egl.CreateWindowSurface(
                self.egl_display,
                egl_config,
                native_widget.native_window as *const c_void,
                ptr::null(),
            );
            if egl_surface == egl::NO_SURFACE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::SurfaceCreationFailed(err));
            }
            Ok(Surface { egl_surface })
        })
    }

    /// Displays the back buffer of a window surface.
    pub fn present_surface(&self, surface: &Surface) -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            if egl.SwapBuffers(self.egl_display, surface.egl_surface) == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::PresentFailed(err));
            }
            Ok(())
        })
    }

    /// Returns the current size of the window behind `surface`, in pixels.
    pub fn surface_size(&self, surface: &Surface) -> Result<Size2D<i32>, Error> {
        let width = self.query_surface(surface, egl::WIDTH as EGLint)?;
        let height = self.query_surface(surface, egl::HEIGHT as EGLint)?;
        Ok(Size2D::new(width, height))
    }

    pub fn destroy_surface(&self, surface: &mut Surface) -> Result<(), Error> {
        if surface.is_destroyed() {
            return Ok(());
        }

        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.DestroySurface(self.egl_display, surface.egl_surface);
            surface.egl_surface = egl::NO_SURFACE;
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::SurfaceDestructionFailed(err));
            }
            Ok(())
        })
    }

    fn query_surface(&self, surface: &Surface, attribute: EGLint) -> Result<EGLint, Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let mut value = 0;
            let result = egl.QuerySurface(self.egl_display, surface.egl_surface, attribute, &mut value);
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::SurfaceQueryFailed(err));
            }
            Ok(value)
        })
    }
}
