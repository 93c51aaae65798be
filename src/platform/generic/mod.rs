// native-triangle/src/platform/generic/mod.rs
//
//! Backends that are shared among the different platforms.

pub mod egl;
