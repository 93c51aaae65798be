// native-triangle/src/renderer.rs
//
//! The `Renderer` that draws the scene through EGL and OpenGL ES.

use crate::app::Renderer;
use crate::config::AppConfig;
use crate::platform::generic::egl::context::Context;
use crate::platform::generic::egl::device::Device;
use crate::platform::generic::egl::surface::{NativeWidget, Surface};
use crate::scene::Scene;
use crate::{Error, Gl};

use glow::HasContext;
use rwh_06::HasWindowHandle;

/// Draws into whatever window the host hands over.
///
/// The EGL display is opened on the first attach and kept until `shutdown`; the context,
/// surface, and scene live exactly as long as the window they were built on.
pub struct EglRenderer<W> {
    config: AppConfig,
    device: Option<Device>,
    session: Option<Session<W>>,
}

struct Session<W> {
    gl: Gl,
    scene: Scene,
    context: Context,
    surface: Surface,
    // Held so the native window outlives the surface rendering to it.
    #[allow(dead_code)]
    window: W,
}

impl<W> EglRenderer<W> {
    pub fn new(config: AppConfig) -> EglRenderer<W> {
        EglRenderer {
            config,
            device: None,
            session: None,
        }
    }
}

impl<W: HasWindowHandle> Renderer for EglRenderer<W> {
    type Window = W;

    fn attach_window(&mut self, window: W) -> Result<(), Error> {
        self.detach_window();

        let device = match self.device.take() {
            Some(device) => device,
            None => Device::new()?,
        };
        let device = &*self.device.insert(device);

        let native_widget = match window.window_handle() {
            Ok(handle) => NativeWidget::from_window_handle(handle)?,
            Err(err) => {
                debug!("Window handle unavailable: {}", err);
                return Err(Error::InvalidNativeWidget);
            }
        };

        let descriptor = device.create_context_descriptor(&self.config.context_attributes)?;
        let mut context = device.create_context(&descriptor)?;
        let mut surface = match device.create_window_surface(&descriptor, &native_widget) {
            Ok(surface) => surface,
            Err(err) => {
                if let Err(err) = device.destroy_context(&mut context) {
                    warn!("Failed to destroy context: {:?}", err);
                }
                return Err(err);
            }
        };

        if let Err(err) = device.make_context_current(&context, &surface) {
            release_egl_objects(device, &mut context, &mut surface);
            return Err(err);
        }

        let gl = unsafe { Gl::from_loader_function(|symbol| device.get_proc_address(symbol)) };
        debug!("Loaded OpenGL ES {:?}", gl.version());

        let scene = match Scene::new(&gl, self.config.clear_color) {
            Ok(scene) => scene,
            Err(err) => {
                release_egl_objects(device, &mut context, &mut surface);
                return Err(err);
            }
        };

        self.session = Some(Session {
            gl,
            scene,
            context,
            surface,
            window,
        });
        Ok(())
    }

    fn detach_window(&mut self) {
        let device = match self.device {
            Some(ref device) => device,
            None => return,
        };
        let mut session = match self.session.take() {
            Some(session) => session,
            None => return,
        };

        // The context is still current from the last attach, so the GL objects can go first.
        session.scene.destroy(&session.gl);
        release_egl_objects(device, &mut session.context, &mut session.surface);
        debug!("Released window surface and context");
    }

    fn render_frame(&mut self) -> Result<(), Error> {
        let (device, session) = match (&self.device, &self.session) {
            (Some(device), Some(session)) => (device, session),
            _ => return Err(Error::NoWidgetAttached),
        };

        let size = device.surface_size(&session.surface)?;
        session.scene.draw(&session.gl, size);
        device.present_surface(&session.surface)
    }

    fn shutdown(&mut self) {
        self.detach_window();
        if let Some(mut device) = self.device.take() {
            device.destroy();
        }
    }
}

fn release_egl_objects(device: &Device, context: &mut Context, surface: &mut Surface) {
    if let Err(err) = device.make_no_context_current() {
        warn!("Failed to release the current context: {:?}", err);
    }
    if let Err(err) = device.destroy_surface(surface) {
        warn!("Failed to destroy surface: {:?}", err);
    }
    if let Err(err) = device.destroy_context(context) {
        warn!("Failed to destroy context: {:?}", err);
    }
}
