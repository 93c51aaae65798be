// native-triangle/src/app.rs
//
//! The platform-neutral application lifecycle.
//!
//! The host delivers window and input notifications; `App` turns them into calls on a
//! `Renderer` and keeps the one piece of state the program has: whether it is ready to draw.

use crate::Error;

/// What the graphics side of the application has to provide.
pub trait Renderer {
    /// The host's window object. The renderer keeps it alive while a surface is built on it.
    type Window;

    /// Builds a drawable surface, a current context, and the scene on `window`.
    fn attach_window(&mut self, window: Self::Window) -> Result<(), Error>;

    /// Releases everything built by `attach_window`. Does nothing if no window is attached.
    fn detach_window(&mut self);

    /// Draws and presents one frame.
    fn render_frame(&mut self) -> Result<(), Error>;

    /// Releases process-wide graphics state. Called once, after the last frame.
    fn shutdown(&mut self);
}

/// A lifecycle notification from the host, already translated out of the platform's types.
#[derive(Debug)]
pub enum AppEvent<W> {
    /// A native window is available to draw into.
    WindowCreated(W),
    /// The native window is about to go away.
    WindowDestroyed,
    /// The activity gained (`true`) or lost (`false`) input focus.
    Focus(bool),
    /// The host asked the activity to finish.
    DestroyRequested,
}

/// The coarse type of an input event. Input is read straight off the host's queue and goes
/// through `App::handle_input`, not `handle_event`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputKind {
    Key,
    Motion,
    Text,
    Other,
}

pub struct App<R: Renderer> {
    renderer: R,
    ready: bool,
    running: bool,
    frames_drawn: u64,
    last_frame_error: Option<Error>,
}

impl<R: Renderer> App<R> {
    pub fn new(renderer: R) -> App<R> {
        App {
            renderer,
            ready: false,
            running: true,
            frames_drawn: 0,
            last_frame_error: None,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent<R::Window>) {
        match event {
            AppEvent::WindowCreated(window) => {
                if self.ready {
                    debug!("Replacing the attached window");
                    self.detach();
                }
                match self.renderer.attach_window(window) {
                    Ok(()) => {
                        info!("Window attached; rendering");
                        self.ready = true;
                        self.last_frame_error = None;
                    }
                    Err(err) => error!("Failed to attach window: {:?}", err),
                }
            }
            AppEvent::WindowDestroyed => {
                if self.ready {
                    info!("Window destroyed; rendering paused");
                    self.detach();
                }
            }
            AppEvent::Focus(focused) => trace!("Focus changed: {}", focused),
            AppEvent::DestroyRequested => {
                info!("Destroy requested");
                self.running = false;
            }
        }
    }

    /// Returns whether the event was consumed. Nothing is; every event goes back to the host
    /// for default handling.
    pub fn handle_input(&mut self, kind: InputKind) -> bool {
        trace!("Ignoring {:?} input", kind);
        false
    }

    /// Draws one frame if a window is attached. Returns whether a frame was drawn.
    ///
    /// A failed frame leaves the app ready. The loop runs without blocking, so an error is
    /// only logged when it differs from the one the previous frame hit.
    pub fn render_frame(&mut self) -> bool {
        if !self.ready {
            return false;
        }
        match self.renderer.render_frame() {
            Ok(()) => {
                if self.last_frame_error.take().is_some() {
                    info!("Rendering recovered");
                }
                self.frames_drawn += 1;
                true
            }
            Err(err) => {
                if self.last_frame_error.as_ref() == Some(&err) {
                    trace!("Frame failed again: {:?}", err);
                } else {
                    error!("Failed to render frame: {:?}", err);
                    self.last_frame_error = Some(err);
                }
                false
            }
        }
    }

    /// Tears everything down. The app must not be used afterward.
    pub fn shutdown(&mut self) {
        if self.ready {
            self.detach();
        }
        self.running = false;
        self.renderer.shutdown();
        info!("Shut down after {} frames", self.frames_drawn);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[inline]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// The error the most recent frame failed with, if it failed.
    #[inline]
    pub fn last_frame_error(&self) -> Option<&Error> {
        self.last_frame_error.as_ref()
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn detach(&mut self) {
        self.renderer.detach_window();
        self.ready = false;
    }
}
