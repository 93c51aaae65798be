// native-triangle/src/platform/generic/egl/mod.rs
//
//! Thin owning wrappers over EGL displays, contexts, and window surfaces.

pub mod context;
pub mod device;
pub(crate) mod error;
pub mod surface;
