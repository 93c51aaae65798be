// native-triangle/src/config.rs
//
//! Application configuration.

use crate::context::{ContextAttributeFlags, ContextAttributes};
use crate::info::GLVersion;

use log::LevelFilter;

/// The tag Android log lines are written under.
pub const DEFAULT_LOG_TAG: &str = "NativeTriangle";

/// Magenta.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

/// Everything that can be tuned without touching the render loop.
///
/// The defaults reproduce the stock template: an ES 2.0 context on an RGB888 window, cleared
/// to magenta, logging at `Info` and above.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// The tag for platform log output.
    pub log_tag: String,
    /// The most verbose level that reaches the platform log.
    pub max_log_level: LevelFilter,
    /// The context version and optional buffers requested from EGL.
    pub context_attributes: ContextAttributes,
    /// The RGBA color the framebuffer is cleared to before drawing.
    pub clear_color: [f32; 4],
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            log_tag: DEFAULT_LOG_TAG.to_owned(),
            max_log_level: LevelFilter::Info,
            context_attributes: ContextAttributes::default(),
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }
}

impl AppConfig {
    pub fn with_log_tag(mut self, tag: &str) -> AppConfig {
        self.log_tag = tag.to_owned();
        self
    }

    pub fn with_max_log_level(mut self, level: LevelFilter) -> AppConfig {
        self.max_log_level = level;
        self
    }

    pub fn with_gl_version(mut self, version: GLVersion) -> AppConfig {
        self.context_attributes.version = version;
        self
    }

    pub fn with_context_flags(mut self, flags: ContextAttributeFlags) -> AppConfig {
        self.context_attributes.flags = flags;
        self
    }

    pub fn with_clear_color(mut self, clear_color: [f32; 4]) -> AppConfig {
        self.clear_color = clear_color;
        self
    }
}
