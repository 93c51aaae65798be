// native-triangle/src/info.rs
//
//! OpenGL ES information.

/// Describes the OpenGL ES version that is requested when a context is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GLVersion {
    /// The major version; EGL's `CONTEXT_CLIENT_VERSION`.
    pub major: u8,
    /// The minor version. Only OpenGL ES 3.x contexts take a nonzero one, and only on EGL 1.5.
    pub minor: u8,
}

impl GLVersion {
    #[inline]
    pub fn new(major: u8, minor: u8) -> GLVersion {
        GLVersion { major, minor }
    }
}
