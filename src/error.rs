// native-triangle/src/error.rs
//
//! Various errors that methods can produce.

/// Various errors that methods can produce.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The system EGL library couldn't be located.
    NoGLLibraryFound,
    /// The default display couldn't be opened or initialized.
    DeviceOpenFailed(WindowingApiError),
    /// The system doesn't support the requested OpenGL ES version.
    UnsupportedGLVersion,
    /// Choosing an EGL config failed.
    PixelFormatSelectionFailed(WindowingApiError),
    /// The system couldn't choose an EGL config matching the requested attributes.
    NoPixelFormatFound,
    /// The system couldn't create an OpenGL ES context.
    ContextCreationFailed(WindowingApiError),
    /// The system couldn't destroy the OpenGL ES context.
    ContextDestructionFailed(WindowingApiError),
    /// The system couldn't make the OpenGL ES context current or not current.
    MakeCurrentFailed(WindowingApiError),
    /// The system couldn't create a window surface.
    SurfaceCreationFailed(WindowingApiError),
    /// The system couldn't destroy a window surface.
    SurfaceDestructionFailed(WindowingApiError),
    /// The window surface couldn't be queried.
    SurfaceQueryFailed(WindowingApiError),
    /// The system couldn't present a window surface.
    PresentFailed(WindowingApiError),
    /// A GL object (buffer, shader, program) couldn't be allocated.
    GLObjectCreationFailed(String),
    /// A frame was requested but no window is attached.
    NoWidgetAttached,
    /// The native widget is invalid.
    InvalidNativeWidget,
    /// The native widget type does not match this backend.
    IncompatibleNativeWidget,
}

/// Abstraction of the errors that EGL returns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowingApiError {
    /// Miscellaneous error.
    Failed,
    /// EGL is not initialized, or could not be initialized, for the specified EGL display
    /// connection.
    NotInitialized,
    /// EGL cannot access a requested resource (for example a context is bound in another
    /// thread).
    BadAccess,
    /// EGL failed to allocate resources for the requested operation.
    BadAlloc,
    /// An unrecognized attribute or attribute value was passed in the attribute list.
    BadAttribute,
    /// An EGLConfig argument does not name a valid EGL frame buffer configuration.
    BadConfig,
    /// An EGLContext argument does not name a valid EGL rendering context.
    BadContext,
    /// The current surface of the calling thread is a window, pixel buffer or pixmap that is
    /// no longer valid.
    BadCurrentSurface,
    /// An EGLDisplay argument does not name a valid EGL display connection.
    BadDisplay,
    /// Arguments are inconsistent (for example, a valid context requires buffers not supplied
    /// by a valid surface).
    BadMatch,
    /// A NativePixmapType argument does not refer to a valid native pixmap.
    BadNativePixmap,
    /// A NativeWindowType argument does not refer to a valid native window.
    BadNativeWindow,
    /// One or more argument values are invalid.
    BadParameter,
    /// An EGLSurface argument does not name a valid surface configured for GL rendering.
    BadSurface,
    /// A power management event has occurred. The application must destroy all contexts and
    /// reinitialise OpenGL ES state and objects to continue rendering.
    ContextLost,
}
