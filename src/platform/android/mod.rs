// native-triangle/src/platform/android/mod.rs
//
//! The `NativeActivity` entry point.
//!
//! One thread does everything: poll the activity's event queue without blocking, hand the
//! translated events to the `App`, throw the input queue away, draw a frame, repeat until the
//! activity is destroyed.

use crate::app::{App, AppEvent, InputKind};
use crate::config::AppConfig;
use crate::renderer::EglRenderer;

use android_activity::input::InputEvent;
use android_activity::{AndroidApp, InputStatus, MainEvent, PollEvent};
use ndk::native_window::NativeWindow;
use std::time::Duration;

type NativeApp = App<EglRenderer<NativeWindow>>;

#[no_mangle]
fn android_main(android_app: AndroidApp) {
    let config = AppConfig::default();
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag(config.log_tag.as_str())
            .with_max_level(config.max_log_level),
    );
    info!("android_main started");

    let mut app: NativeApp = App::new(EglRenderer::new(config));
    while app.is_running() {
        android_app.poll_events(Some(Duration::ZERO), |event| {
            if let PollEvent::Main(main_event) = event {
                if let Some(event) = translate_main_event(&android_app, main_event) {
                    app.handle_event(event);
                }
            }
        });
        drain_input(&android_app, &mut app);
        app.render_frame();
    }

    app.shutdown();
}

fn translate_main_event(
    android_app: &AndroidApp,
    event: MainEvent<'_>,
) -> Option<AppEvent<NativeWindow>> {
    match event {
        MainEvent::InitWindow { .. } => match android_app.native_window() {
            Some(window) => Some(AppEvent::WindowCreated(window)),
            None => {
                warn!("InitWindow without a native window");
                None
            }
        },
        MainEvent::TerminateWindow { .. } => Some(AppEvent::WindowDestroyed),
        MainEvent::GainedFocus => Some(AppEvent::Focus(true)),
        MainEvent::LostFocus => Some(AppEvent::Focus(false)),
        MainEvent::Destroy => Some(AppEvent::DestroyRequested),
        _ => None,
    }
}

fn drain_input(android_app: &AndroidApp, app: &mut NativeApp) {
    let mut events = match android_app.input_events_iter() {
        Ok(events) => events,
        Err(err) => {
            warn!("Failed to read input events: {:?}", err);
            return;
        }
    };

    loop {
        let read_event = events.next(|event| {
            if app.handle_input(input_kind(event)) {
                InputStatus::Handled
            } else {
                InputStatus::Unhandled
            }
        });
        if !read_event {
            break;
        }
    }
}

fn input_kind(event: &InputEvent<'_>) -> InputKind {
    match event {
        InputEvent::KeyEvent(_) => InputKind::Key,
        InputEvent::MotionEvent(_) => InputKind::Motion,
        InputEvent::TextEvent(_) => InputKind::Text,
        _ => InputKind::Other,
    }
}
