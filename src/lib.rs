// native-triangle/src/lib.rs
//
//! A minimal Android native-activity bootstrap.
//!
//! The library opens an EGL display and context on the window the host hands over, builds one
//! GLES2 program and a static vertex buffer, and then clears the screen and draws a single
//! triangle every time around the event loop. Everything platform-neutral (the lifecycle, the
//! scene constants, the EGL wrappers) builds on any unix host; the `android_main` entry point
//! only exists on Android.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod app;
pub use crate::app::{App, AppEvent, InputKind, Renderer};

pub mod config;
pub use crate::config::AppConfig;

mod context;
pub use crate::context::{ContextAttributeFlags, ContextAttributes};

pub mod error;
pub use crate::error::{Error, WindowingApiError};

mod info;
pub use crate::info::GLVersion;

pub mod platform;

#[cfg(unix)]
pub mod renderer;
#[cfg(unix)]
pub use crate::renderer::EglRenderer;

pub mod scene;
pub use crate::scene::Scene;

use glow as gl;
pub use glow::Context as Gl;

#[cfg(unix)]
#[allow(non_camel_case_types)]
#[allow(clippy::all)]
mod egl {
    use std::os::raw::{c_long, c_void};
    pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
    pub type khronos_uint64_t = u64;
    pub type khronos_ssize_t = c_long;
    pub type EGLint = i32;
    pub type EGLNativeDisplayType = *const c_void;
    pub type EGLNativePixmapType = *const c_void;
    pub type EGLNativeWindowType = *const c_void;
    pub type NativeDisplayType = EGLNativeDisplayType;
    pub type NativePixmapType = EGLNativePixmapType;
    pub type NativeWindowType = EGLNativeWindowType;
    include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));
}
