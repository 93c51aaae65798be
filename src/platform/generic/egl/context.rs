// native-triangle/src/platform/generic/egl/context.rs
//
//! EGL config selection and rendering contexts.

use super::device::{Device, EGL_FUNCTIONS};
use super::error::ToWindowingApiError;
use super::surface::Surface;
use crate::egl;
use crate::egl::types::{EGLConfig, EGLContext, EGLDisplay, EGLint};
use crate::{ContextAttributeFlags, ContextAttributes, Error};

use std::os::raw::c_void;
use std::ptr;
use std::thread;

const RGB_CHANNEL_BIT_DEPTH: EGLint = 8;

/// An EGL config chosen for a set of context attributes, identified by its config ID.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextDescriptor {
    pub(crate) egl_config_id: EGLint,
    pub(crate) egl_context_client_version: EGLint,
    pub(crate) egl_context_minor_version: EGLint,
}

/// An OpenGL ES rendering context.
///
/// Contexts must be destroyed explicitly with `Device::destroy_context`; dropping a live one
/// panics.
pub struct Context {
    pub(crate) egl_context: EGLContext,
}

impl Drop for Context {
    #[inline]
    fn drop(&mut self) {
        if !self.is_destroyed() && !thread::panicking() {
            panic!("Contexts must be destroyed explicitly with `destroy_context`!")
        }
    }
}

impl Context {
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.egl_context == egl::NO_CONTEXT
    }
}

/// The attribute/value pairs that every chosen config must match exactly.
pub(crate) fn required_config_attributes(attributes: &ContextAttributes) -> [EGLint; 8] {
    let alpha_size = if attributes.flags.contains(ContextAttributeFlags::ALPHA) {
        8
    } else {
        0
    };
    [
        egl::RED_SIZE as EGLint,
        RGB_CHANNEL_BIT_DEPTH,
        egl::GREEN_SIZE as EGLint,
        RGB_CHANNEL_BIT_DEPTH,
        egl::BLUE_SIZE as EGLint,
        RGB_CHANNEL_BIT_DEPTH,
        egl::ALPHA_SIZE as EGLint,
        alpha_size,
    ]
}

/// Builds the `eglChooseConfig` attribute list: a window-renderable config for the requested
/// OpenGL ES version, terminated by `EGL_NONE`.
pub(crate) fn config_attributes(attributes: &ContextAttributes) -> Result<Vec<EGLint>, Error> {
    let renderable_type = match (attributes.version.major, attributes.version.minor) {
        (2, 0) => egl::OPENGL_ES2_BIT,
        (3, 0..=2) => egl::OPENGL_ES3_BIT,
        _ => return Err(Error::UnsupportedGLVersion),
    };
    let flags = attributes.flags;
    let depth_size = if flags.contains(ContextAttributeFlags::DEPTH) { 24 } else { 0 };
    let stencil_size = if flags.contains(ContextAttributeFlags::STENCIL) { 8 } else { 0 };

    let mut config_attributes = vec![
        egl::SURFACE_TYPE as EGLint,
        egl::WINDOW_BIT as EGLint,
        egl::RENDERABLE_TYPE as EGLint,
        renderable_type as EGLint,
    ];
    config_attributes.extend_from_slice(&required_config_attributes(attributes));
    config_attributes.extend_from_slice(&[
        egl::DEPTH_SIZE as EGLint,
        depth_size,
        egl::STENCIL_SIZE as EGLint,
        stencil_size,
        egl::NONE as EGLint,
    ]);
    Ok(config_attributes)
}

/// Builds the `eglCreateContext` attribute list. The minor version is only sent when nonzero,
/// since `EGL_CONTEXT_MINOR_VERSION` needs EGL 1.5.
pub(crate) fn context_attributes(descriptor: &ContextDescriptor) -> Vec<EGLint> {
    let mut context_attributes = vec![
        egl::CONTEXT_CLIENT_VERSION as EGLint,
        descriptor.egl_context_client_version,
    ];
    if descriptor.egl_context_minor_version != 0 {
        context_attributes.extend_from_slice(&[
            egl::CONTEXT_MINOR_VERSION as EGLint,
            descriptor.egl_context_minor_version,
        ]);
    }
    context_attributes.push(egl::NONE as EGLint);
    context_attributes
}

impl Device {
    /// Chooses an EGL config suitable for window rendering with the given attributes.
    pub fn create_context_descriptor(
        &self,
        attributes: &ContextAttributes,
    ) -> Result<ContextDescriptor, Error> {
        let requested_config_attributes = config_attributes(attributes)?;
        if attributes.version.minor != 0 && self.egl_version() < (1, 5) {
            return Err(Error::UnsupportedGLVersion);
        }
        let required_config_attributes = required_config_attributes(attributes);
        let egl_display = self.egl_display;

        EGL_FUNCTIONS.with(|egl| unsafe {
            // See how many applicable configs there are.
            let mut config_count = 0;
            let result = egl.ChooseConfig(
                egl_display,
                requested_config_attributes.as_ptr(),
                ptr::null_mut(),
                0,
                &mut config_count,
            );
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::PixelFormatSelectionFailed(err));
            }
            if config_count == 0 {
                return Err(Error::NoPixelFormatFound);
            }

            // Enumerate all those configs.
            let mut configs = vec![ptr::null(); config_count as usize];
            let mut real_config_count = config_count;
            let result = egl.ChooseConfig(
                egl_display,
                requested_config_attributes.as_ptr(),
                configs.as_mut_ptr(),
                config_count,
                &mut real_config_count,
            );
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::PixelFormatSelectionFailed(err));
            }
            configs.truncate(real_config_count.max(0) as usize);

            // `eglChooseConfig` treats sizes as minimums and sorts deeper configs first, so
            // prefer one whose channels match exactly.
            let exact_config = configs.iter().copied().find(|&egl_config| {
                required_config_attributes
                    .chunks(2)
                    .all(|pair| get_config_attr(egl_display, egl_config, pair[0]) == pair[1])
            });
            let egl_config = match exact_config.or_else(|| configs.first().copied()) {
                None => return Err(Error::NoPixelFormatFound),
                Some(egl_config) => egl_config,
            };
            if exact_config.is_none() {
                debug!("No exact RGB config match; using the driver's first choice");
            }

            let egl_config_id = get_config_attr(egl_display, egl_config, egl::CONFIG_ID as EGLint);
            Ok(ContextDescriptor {
                egl_config_id,
                egl_context_client_version: attributes.version.major as EGLint,
                egl_context_minor_version: attributes.version.minor as EGLint,
            })
        })
    }

    pub fn create_context(&self, descriptor: &ContextDescriptor) -> Result<Context, Error> {
        let egl_config = self.context_descriptor_to_egl_config(descriptor)?;
        let egl_context_attributes = context_attributes(descriptor);

        EGL_FUNCTIONS.with(|egl| unsafe {
            let egl_context = egl.CreateContext(
                self.egl_display,
                egl_config,
                egl::NO_CONTEXT,
                egl_context_attributes.as_ptr(),
            );
            if egl_context == egl::NO_CONTEXT {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::ContextCreationFailed(err));
            }
            Ok(Context { egl_context })
        })
    }

    pub fn destroy_context(&self, context: &mut Context) -> Result<(), Error> {
        if context.is_destroyed() {
            return Ok(());
        }

        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.DestroyContext(self.egl_display, context.egl_context);
            context.egl_context = egl::NO_CONTEXT;
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::ContextDestructionFailed(err));
            }
            Ok(())
        })
    }

    /// Binds `context` to this thread, drawing to and reading from `surface`.
    pub fn make_context_current(&self, context: &Context, surface: &Surface) -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.MakeCurrent(
                self.egl_display,
                surface.egl_surface,
                surface.egl_surface,
                context.egl_context,
            );
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::MakeCurrentFailed(err));
            }
            Ok(())
        })
    }

    pub fn make_no_context_current(&self) -> Result<(), Error> {
        EGL_FUNCTIONS.with(|egl| unsafe {
            let result = egl.MakeCurrent(
                self.egl_display,
                egl::NO_SURFACE,
                egl::NO_SURFACE,
                egl::NO_CONTEXT,
            );
            if result == egl::FALSE {
                let err = egl.GetError().to_windowing_api_error();
                return Err(Error::MakeCurrentFailed(err));
            }
            Ok(())
        })
    }

    /// Looks up a GLES function for the current context.
    #[inline]
    pub fn get_proc_address(&self, symbol_name: &str) -> *const c_void {
        super::device::get_gl_proc_address(symbol_name)
    }

    pub(crate) fn context_descriptor_to_egl_config(
        &self,
        descriptor: &ContextDescriptor,
    ) -> Result<EGLConfig, Error> {
        unsafe { egl_config_from_id(self.egl_display, descriptor.egl_config_id) }
    }
}

pub(crate) unsafe fn egl_config_from_id(
    egl_display: EGLDisplay,
    egl_config_id: EGLint,
) -> Result<EGLConfig, Error> {
    let config_attributes = [egl::CONFIG_ID as EGLint, egl_config_id, egl::NONE as EGLint];

    EGL_FUNCTIONS.with(|egl| {
        let (mut config, mut config_count) = (ptr::null(), 0);
        let result = egl.ChooseConfig(
            egl_display,
            config_attributes.as_ptr(),
            &mut config,
            1,
            &mut config_count,
        );
        if result == egl::FALSE {
            let err = egl.GetError().to_windowing_api_error();
            return Err(Error::PixelFormatSelectionFailed(err));
        }
        if config_count == 0 {
            return Err(Error::NoPixelFormatFound);
        }
        Ok(config)
    })
}

pub(crate) unsafe fn get_config_attr(
    egl_display: EGLDisplay,
    egl_config: EGLConfig,
    attr: EGLint,
) -> EGLint {
    EGL_FUNCTIONS.with(|egl| {
        let mut value = 0;
        let result = egl.GetConfigAttrib(egl_display, egl_config, attr, &mut value);
        if result == egl::FALSE {
            return -1;
        }
        value
    })
}
