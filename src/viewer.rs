// External crate imports
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::config::{Color, CountingMethod, DelegationMode};
use crate::error::GaugeError;
use crate::gauge::GaugeSlider;
use crate::geometry::{Point, Rect};
use crate::interaction::PointerEvent;
use crate::raster::Canvas;

pub const BACKGROUND: Color = Color::WHITE;

/// Command enum for type-safe gauge updates from other threads
#[derive(Debug, Clone, PartialEq)]
pub enum GaugeCommand {
    SetValue { value: f64, animated: bool },
    SetCountingMethod(CountingMethod),
    SetDelegationMode(DelegationMode),
    SetCustomControlActive(bool),
}

impl GaugeCommand {
    pub fn apply(self, gauge: &mut GaugeSlider) {
        match self {
            GaugeCommand::SetValue { value, animated } => gauge.set_current_value(value, animated),
            GaugeCommand::SetCountingMethod(method) => gauge.set_counting_method(method),
            GaugeCommand::SetDelegationMode(mode) => gauge.set_delegation_mode(mode),
            GaugeCommand::SetCustomControlActive(active) => gauge.set_custom_control_active(active),
        }
    }
}

/// Applies every queued command without blocking.
pub fn drain_commands(gauge: &mut GaugeSlider, receiver: &Receiver<GaugeCommand>) {
    while let Ok(command) = receiver.try_recv() {
        log::trace!("applying {command:?}");
        command.apply(gauge);
    }
}

fn touch_event(touch: &Touch) -> PointerEvent {
    let point = Point::new(touch.location.x, touch.location.y);
    match touch.phase {
        TouchPhase::Started => PointerEvent::Down(point),
        TouchPhase::Moved => PointerEvent::Move(point),
        TouchPhase::Ended => PointerEvent::Up(point),
        TouchPhase::Cancelled => PointerEvent::Cancel,
    }
}

// ============================================================================
// WINDOWED HOST
// ============================================================================

impl GaugeSlider {
    /// Opens a window sized to the gauge frame and runs until it is closed.
    pub fn show(&mut self, title: &str) -> Result<(), GaugeError> {
        self.run_window(title, None)
    }

    /// Like [`show`](Self::show), draining `receiver` before every frame.
    pub fn show_with_commands(
        &mut self,
        title: &str,
        receiver: Receiver<GaugeCommand>,
    ) -> Result<(), GaugeError> {
        self.run_window(title, Some(receiver))
    }

    fn run_window(
        &mut self,
        title: &str,
        receiver: Option<Receiver<GaugeCommand>>,
    ) -> Result<(), GaugeError> {
        let logical = self.frame();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(logical.width, logical.height))
            .with_resizable(true)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);

        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        // The buffer is in physical pixels, and so are pointer positions.
        self.set_frame(Rect::new(0.0, 0.0, fb_width as f64, fb_height as f64));

        let target_fps = self.config().frame_rate.max(1.0);
        let frame_duration = Duration::from_secs_f64(1.0 / target_fps);
        let mut last_frame = Instant::now();
        let mut cursor = Point::default();

        log::debug!("window opened at {fb_width}x{fb_height}, {target_fps} fps");

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                            log::error!("failed to resize buffer: {err}");
                        }
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            log::error!("failed to resize surface: {err}");
                        }
                        self.set_frame(Rect::new(0.0, 0.0, fb_width as f64, fb_height as f64));
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = Point::new(position.x, position.y);
                        self.handle_pointer(PointerEvent::Move(cursor));
                    }
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => {
                        let pointer = match state {
                            ElementState::Pressed => PointerEvent::Down(cursor),
                            ElementState::Released => PointerEvent::Up(cursor),
                        };
                        self.handle_pointer(pointer);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        self.handle_pointer(PointerEvent::Cancel);
                    }
                    WindowEvent::Touch(touch) => {
                        self.handle_pointer(touch_event(&touch));
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            drain_commands(self, receiver);
                        }
                        self.tick(Instant::now());

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        canvas.clear(BACKGROUND);
                        self.draw(&mut canvas);
                        if let Err(err) = pixels.render() {
                            log::error!("failed to render frame: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
