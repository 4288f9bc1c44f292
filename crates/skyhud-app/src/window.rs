//! Window creation and event handling via winit.
//!
//! [`SkyHudWindow`] implements winit's [`ApplicationHandler`]: platform events
//! are translated into [`InputEvent`]s on the session queue, and every
//! redraw runs one simulation tick and writes the HUD into the title bar.
//! Redraws are paced to the monitor's refresh rate with
//! [`ControlFlow::WaitUntil`].

use std::time::{Duration, Instant};

use skyhud_config::Config;
use skyhud_input::{InputEvent, InputSender, RawKeyEvent, scroll_lines};
use tracing::{debug, error, info, instrument};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::reload::ConfigWatcher;
use crate::session::FlightSession;

/// Refresh rate assumed when the monitor does not report one.
const FALLBACK_REFRESH_MILLIHERTZ: u32 = 60_000;

/// Time between redraws for a monitor refreshing at `refresh_millihertz`.
/// Unknown or zero rates fall back to 60 Hz.
pub fn frame_interval(refresh_millihertz: Option<u32>) -> Duration {
    let millihertz = refresh_millihertz
        .filter(|&mhz| mhz > 0)
        .unwrap_or(FALLBACK_REFRESH_MILLIHERTZ);
    Duration::from_secs_f64(1000.0 / f64::from(millihertz))
}

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ))
}

pub struct SkyHudWindow {
    attributes: WindowAttributes,
    title: String,
    session: FlightSession,
    input: InputSender,
    watcher: ConfigWatcher,
    window: Option<Window>,
    frame_interval: Duration,
    next_frame: Instant,
    failure: Option<winit::error::OsError>,
}

impl SkyHudWindow {
    pub fn new(config: &Config, session: FlightSession, watcher: ConfigWatcher) -> Self {
        Self {
            attributes: window_attributes_from_config(config),
            title: config.window.title.clone(),
            input: session.sender(),
            session,
            watcher,
            window: None,
            frame_interval: frame_interval(None),
            next_frame: Instant::now(),
            failure: None,
        }
    }

    /// Push a reloaded config into the session if one is due.
    fn poll_config(&mut self, now: Instant) {
        if let Some(config) = self.watcher.poll(now) {
            self.session.apply_config(&config);
        }
    }

    /// Move the redraw deadline forward. Returns `true` when a frame is due
    /// at `now`. A deadline missed by more than one interval restarts from
    /// `now` instead of bursting to catch up.
    fn schedule_frame(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.next_frame += self.frame_interval;
        if self.next_frame <= now {
            self.next_frame = now + self.frame_interval;
        }
        true
    }

    /// Translate a window event into queued input. Returns `false` for events
    /// that carry no input.
    fn forward_input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(raw) = RawKeyEvent::from_winit(event) {
                    self.input.send(raw.into());
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.send(InputEvent::Scroll(scroll_lines(*delta)));
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => {
                self.input.send(InputEvent::Click);
            }
            WindowEvent::Focused(false) => {
                self.input.send(InputEvent::FocusLost);
                self.session.suspend_audio();
            }
            _ => return false,
        }
        true
    }
}

impl ApplicationHandler for SkyHudWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                let size = window.inner_size();
                let refresh = window
                    .current_monitor()
                    .and_then(|m| m.refresh_rate_millihertz());
                self.frame_interval = frame_interval(refresh);
                info!(
                    "Window created: {}x{}, frame interval {:?}",
                    size.width, size.height, self.frame_interval
                );
                window.request_redraw();
                self.next_frame = Instant::now() + self.frame_interval;
                self.window = Some(window);
            }
            Err(e) => {
                error!("Window creation failed: {e}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.forward_input(&event) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.session.frame();
                if let Some(window) = &self.window {
                    window.set_title(&format!("{} | {}", self.title, self.session.hud_line()));
                }
            }
            WindowEvent::ScaleFactorChanged { .. } | WindowEvent::Moved(_) => {
                // The window may now sit on a monitor with another refresh rate.
                if let Some(window) = &self.window {
                    let refresh = window
                        .current_monitor()
                        .and_then(|m| m.refresh_rate_millihertz());
                    self.frame_interval = frame_interval(refresh);
                    debug!("Frame interval now {:?}", self.frame_interval);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        self.poll_config(now);
        if self.schedule_frame(now) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        let wake = self.next_frame.min(self.watcher.next_check());
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }
}

/// Open the window and run the event loop until it closes. `watcher`
/// feeds config edits into the running session.
#[instrument(skip_all)]
pub fn run_window(
    config: &Config,
    session: FlightSession,
    watcher: ConfigWatcher,
) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = SkyHudWindow::new(config, session, watcher);
    event_loop.run_app(&mut app)?;
    match app.failure.take() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
