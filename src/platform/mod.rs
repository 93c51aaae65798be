// native-triangle/src/platform/mod.rs
//
//! Platform-specific backends.

#[cfg(unix)]
pub mod generic;

#[cfg(android_platform)]
pub mod android;
