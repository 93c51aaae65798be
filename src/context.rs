// native-triangle/src/context.rs
//
//! Attributes requested when a rendering context is created.

use crate::info::GLVersion;

bitflags! {
    /// Optional buffers requested alongside the 8-bit RGB color buffer.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ContextAttributeFlags: u8 {
        const ALPHA   = 0x01;
        const DEPTH   = 0x02;
        const STENCIL = 0x04;
    }
}

/// The OpenGL ES version and buffer layout a context is created with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextAttributes {
    pub version: GLVersion,
    pub flags: ContextAttributeFlags,
}

impl Default for ContextAttributes {
    /// An OpenGL ES 2.0 context with a plain RGB color buffer.
    fn default() -> ContextAttributes {
        ContextAttributes {
            version: GLVersion::new(2, 0),
            flags: ContextAttributeFlags::empty(),
        }
    }
}
