// native-triangle/build.rs
//
//! The `native-triangle` build script.

use cfg_aliases::cfg_aliases;
use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::PathBuf;

fn main() {
    // Setup aliases for #[cfg] checks
    cfg_aliases! {
        android_platform: { target_os = "android" },
    }

    let target_family = env::var("CARGO_CFG_TARGET_FAMILY").ok();
    let dest = PathBuf::from(&env::var("OUT_DIR").unwrap());

    // Generate EGL bindings. Android is a unix target family, so host builds get the same
    // bindings and can exercise the EGL layer against a desktop libEGL.
    if target_family.as_deref() == Some("unix") {
        let mut file = File::create(dest.join("egl_bindings.rs")).unwrap();
        let registry = Registry::new(Api::Egl, (1, 5), Profile::Core, Fallbacks::All, []);
        registry.write_bindings(StructGenerator, &mut file).unwrap();
    }
}
