use crate::animation::ProgressAnimation;
use crate::config::{CountingMethod, DelegationMode, GaugeConfig};
use crate::geometry::{GeometryCache, Point, Rect};
use crate::interaction::{Gesture, GestureRecognizer, PanPhase, PointerEvent};
use crate::layout::Layout;
use crate::notify::{InternalScope, ProgressNotifier};
use crate::raster::{self, Canvas};
use crate::render::{GaugeFrame, Scene};
use rusttype::Font;
use std::cell::Cell;
use std::time::{Duration, Instant};

struct RunningAnimation {
    animation: ProgressAnimation,
    held: bool,
    // Dropped together with the run, which resumes delivery.
    _scope: Option<InternalScope>,
}

/// Circular gauge that doubles as a slider.
///
/// The gauge is headless: the host feeds it a frame, pointer events and
/// clock ticks, and paints [`GaugeSlider::scene`] whenever
/// [`GaugeSlider::needs_display`] is set. Points are in gauge-local
/// coordinates, with the origin at the top-left of the frame.
pub struct GaugeSlider {
    config: GaugeConfig,
    frame: Rect,
    progress: f64,
    notifier: ProgressNotifier,
    animation: Option<RunningAnimation>,
    last_tick: Option<Instant>,
    pan_moved: bool,
    geometry: Cell<Option<GeometryCache>>,
    gestures: GestureRecognizer,
    font: Option<Font<'static>>,
    needs_display: bool,
    on_progress_changed: Option<Box<dyn FnMut(i32)>>,
    on_button_action: Option<Box<dyn FnMut()>>,
}

impl GaugeSlider {
    pub fn new(frame: Rect, config: GaugeConfig) -> Self {
        let font = raster::load_font(config.font_data);
        Self {
            notifier: ProgressNotifier::new(config.delegation_mode),
            config,
            frame,
            progress: 0.0,
            animation: None,
            last_tick: None,
            pan_moved: false,
            geometry: Cell::new(None),
            gestures: GestureRecognizer::default(),
            font,
            needs_display: true,
            on_progress_changed: None,
            on_button_action: None,
        }
    }

    // ========================================================================
    // FRAME AND CONFIGURATION
    // ========================================================================

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        if frame != self.frame {
            log::debug!(
                "gauge frame changed to {}x{} at ({}, {})",
                frame.width,
                frame.height,
                frame.x,
                frame.y
            );
            self.frame = frame;
            self.needs_display = true;
        }
    }

    /// The frame in local coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.frame.width, self.frame.height)
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Applies `update` to the configuration and schedules a repaint.
    pub fn update_config(&mut self, update: impl FnOnce(&mut GaugeConfig)) {
        let previous_font = self.config.font_data.map(<[u8]>::as_ptr);
        update(&mut self.config);

        if self.config.delegation_mode != self.notifier.mode() {
            self.notifier.set_mode(self.config.delegation_mode);
        }
        if self.config.font_data.map(<[u8]>::as_ptr) != previous_font {
            self.font = raster::load_font(self.config.font_data);
        }
        self.needs_display = true;
    }

    pub fn set_counting_method(&mut self, method: CountingMethod) {
        self.update_config(|c| c.counting_method = method);
    }

    pub fn set_delegation_mode(&mut self, mode: DelegationMode) {
        self.update_config(|c| c.delegation_mode = mode);
    }

    pub fn set_custom_control_active(&mut self, active: bool) {
        self.update_config(|c| c.is_custom_control_active = active);
    }

    pub fn on_progress_changed(&mut self, callback: impl FnMut(i32) + 'static) {
        self.on_progress_changed = Some(Box::new(callback));
    }

    pub fn on_button_action(&mut self, callback: impl FnMut() + 'static) {
        self.on_button_action = Some(Box::new(callback));
    }

    // ========================================================================
    // PROGRESS AND VALUE
    // ========================================================================

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Sets progress directly. Non-finite input is ignored, anything else is
    /// clamped to `[0, 100]`.
    pub fn set_progress(&mut self, progress: f64) {
        if !progress.is_finite() {
            log::debug!("ignoring non-finite progress {progress}");
            return;
        }
        let new = progress.clamp(0.0, 100.0);
        let old = std::mem::replace(&mut self.progress, new);
        if old != new {
            self.needs_display = true;
        }
        if let Some(value) = self.notifier.progress_changed(old, new) {
            self.notify(value);
        }
    }

    pub fn value(&self) -> f64 {
        self.config.value_for_percent(self.progress)
    }

    /// Moves to `value` without notifying.
    pub fn set_value(&mut self, value: f64) {
        let amplitude = self.config.value_range();
        let percent = if amplitude > 0.0 {
            (value - self.config.min_value) / amplitude * 100.0
        } else {
            0.0
        };
        let _scope = self.notifier.internal_scope();
        self.set_progress(percent);
    }

    /// Moves to `value`, optionally animated. Values outside the configured
    /// range are ignored.
    pub fn set_current_value(&mut self, value: f64, animated: bool) {
        let Some(target) = self.config.percent_for_value(value) else {
            log::debug!(
                "ignoring value {value} outside {}..={}",
                self.config.min_value,
                self.config.max_value
            );
            return;
        };

        if animated {
            let scope = self.notifier.internal_scope();
            self.start_animation(target, Some(scope));
            return;
        }

        self.cancel_animation();
        if self.notifier.is_singular() {
            self.notifier.hold();
            self.set_progress(target);
            self.release();
        } else {
            self.set_progress(target);
        }
    }

    fn notify(&mut self, value: i32) {
        log::debug!("progress changed to {value}");
        if let Some(callback) = self.on_progress_changed.as_mut() {
            callback(value);
        }
    }

    fn release(&mut self) {
        if let Some(value) = self.notifier.release(self.progress) {
            self.notify(value);
        }
    }

    // ========================================================================
    // ANIMATION
    // ========================================================================

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn start_animation(&mut self, destination: f64, scope: Option<InternalScope>) {
        self.cancel_animation();

        let held = self.notifier.is_singular();
        if held {
            self.notifier.hold();
        }
        let duration =
            Duration::try_from_secs_f64(self.config.animation_duration).unwrap_or(Duration::ZERO);
        log::debug!(
            "animating progress {:.1} -> {:.1} over {:?} ({:?})",
            self.progress,
            destination,
            duration,
            self.config.counting_method
        );
        self.animation = Some(RunningAnimation {
            animation: ProgressAnimation::new(
                self.progress,
                destination,
                duration,
                self.config.counting_method.counter(),
            ),
            held,
            _scope: scope,
        });
        self.last_tick = Some(Instant::now());
        self.needs_display = true;
    }

    /// Drops a running animation where it stands. Its held notification is
    /// discarded.
    fn cancel_animation(&mut self) {
        if let Some(run) = self.animation.take() {
            log::debug!("animation cancelled at {:.1}", self.progress);
            if run.held {
                let _ = self.notifier.release(self.progress);
            }
        }
    }

    /// Advances a running animation by the wall-clock time since the
    /// previous tick, or since the run started.
    pub fn tick(&mut self, now: Instant) {
        let previous = self.last_tick.replace(now);
        if self.animation.is_none() {
            return;
        }
        let delta = previous
            .map(|previous| now.saturating_duration_since(previous))
            .unwrap_or(Duration::ZERO);
        self.advance(delta);
    }

    /// Advances a running animation by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        let Some(run) = self.animation.as_mut() else {
            return;
        };
        let frame = run.animation.tick(delta);
        log::trace!("animation tick {:?} -> {:.2}", delta, frame.progress);
        self.set_progress(frame.progress);
        if frame.is_complete {
            self.finish_animation();
        }
    }

    fn finish_animation(&mut self) {
        let Some(run) = self.animation.take() else {
            return;
        };
        log::debug!("animation finished at {:.1}", self.progress);
        if run.held {
            self.release();
        }
    }

    // ========================================================================
    // GEOMETRY AND INTERACTION
    // ========================================================================

    /// Current geometry, recomputed when the bounds, track width or
    /// constants changed. `None` while the layout is degenerate.
    pub fn geometry(&self) -> Option<GeometryCache> {
        let bounds = self.bounds();
        let track_width = self.config.track_width;
        let constants = self.config.geometry;
        if let Some(cache) = self.geometry.get() {
            if cache.is_valid_for(&bounds, track_width, &constants) {
                return Some(cache);
            }
        }
        let cache = GeometryCache::compute(bounds, track_width, constants);
        self.geometry.set(cache);
        cache
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if let Some(gesture) = self.gestures.handle(event) {
            self.handle_gesture(gesture);
        }
    }

    pub fn handle_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Tap(point) => self.tap(point),
            Gesture::Pan(phase, point) => self.pan(phase, point),
        }
    }

    /// Presses the custom control when the tap lands on it, otherwise
    /// animates towards the tapped point on the track.
    pub fn tap(&mut self, point: Point) {
        if self.custom_control_contains(point) {
            self.press_custom_control();
            return;
        }
        let Some(geometry) = self.geometry() else {
            return;
        };
        if !geometry.hit_test(point) {
            return;
        }
        let target = geometry.progress_for_point(point);
        self.start_animation(target, None);
    }

    pub fn pan(&mut self, phase: PanPhase, point: Point) {
        match phase {
            PanPhase::Began => {
                self.cancel_animation();
                if self.notifier.is_singular() {
                    self.notifier.hold();
                }
                self.pan_moved = false;
                self.track(point);
            }
            PanPhase::Changed => self.track(point),
            PanPhase::Ended => {
                self.track(point);
                // A pan that never reached the track ends silently.
                if std::mem::take(&mut self.pan_moved) {
                    self.release();
                } else {
                    let _ = self.notifier.release(self.progress);
                }
            }
        }
    }

    fn track(&mut self, point: Point) {
        let Some(geometry) = self.geometry() else {
            return;
        };
        if geometry.hit_test(point) {
            self.pan_moved = true;
            self.set_progress(geometry.progress_for_point(point));
        }
    }

    fn custom_control_contains(&self, point: Point) -> bool {
        self.config.custom_control_button_visible
            && self
                .layout()
                .custom_control
                .is_some_and(|rect| rect.contains(point))
    }

    /// Activates the custom control. Pressing an active control does nothing.
    pub fn press_custom_control(&mut self) {
        if self.config.is_custom_control_active {
            return;
        }
        log::debug!("custom control activated");
        self.config.is_custom_control_active = true;
        self.needs_display = true;
        if let Some(callback) = self.on_button_action.as_mut() {
            callback();
        }
    }

    // ========================================================================
    // DISPLAY
    // ========================================================================

    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    pub fn layout(&self) -> Layout {
        let geometry = self.geometry();
        Layout::compute(
            &self.config,
            &self.bounds(),
            self.progress,
            geometry.as_ref(),
            self.font.as_ref(),
        )
    }

    pub fn scene(&self) -> Scene {
        let geometry = self.geometry();
        let layout = self.layout();
        Scene::for_gauge(GaugeFrame {
            config: &self.config,
            bounds: self.bounds(),
            progress: self.progress,
            geometry: geometry.as_ref(),
            layout: &layout,
        })
    }

    /// Paints the gauge with its origin at the top-left of `canvas`.
    pub fn draw(&mut self, canvas: &mut Canvas) {
        self.scene().render(canvas, self.font.as_ref());
        self.needs_display = false;
    }
}
