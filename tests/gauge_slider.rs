use gauge_slider::{
    CountingMethod, DelegationMode, GaugeConfig, GaugeSlider, Point, PointerEvent, Rect,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

const FRAME_STEP: f64 = 1.0 / 30.0;

fn gauge_with(config: GaugeConfig) -> (GaugeSlider, Rc<RefCell<Vec<i32>>>) {
    let mut gauge = GaugeSlider::new(Rect::new(0.0, 0.0, 300.0, 300.0), config);
    let fired = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&fired);
    gauge.on_progress_changed(move |progress| sink.borrow_mut().push(progress));
    (gauge, fired)
}

fn gauge() -> (GaugeSlider, Rc<RefCell<Vec<i32>>>) {
    gauge_with(GaugeConfig::default())
}

/// Point on the 300x300 gauge that maps to `progress`, `rho` px from the center.
fn point_for(progress: f64, rho: f64) -> Point {
    let phi = (-45.0 - 2.7 * progress).to_radians();
    Point::new(150.0 + rho * phi.sin(), 150.0 + rho * phi.cos())
}

fn drag(gauge: &mut GaugeSlider, path: &[f64]) {
    let (first, rest) = path.split_first().unwrap();
    gauge.handle_pointer(PointerEvent::Down(point_for(*first, 110.0)));
    for &progress in rest {
        gauge.handle_pointer(PointerEvent::Move(point_for(progress, 110.0)));
    }
    let last = path.last().unwrap();
    gauge.handle_pointer(PointerEvent::Up(point_for(*last, 110.0)));
}

fn tap(gauge: &mut GaugeSlider, point: Point) {
    gauge.handle_pointer(PointerEvent::Down(point));
    gauge.handle_pointer(PointerEvent::Up(point));
}

fn run_frames(gauge: &mut GaugeSlider, frames: usize) {
    for _ in 0..frames {
        gauge.advance(Duration::from_secs_f64(FRAME_STEP));
    }
}

#[test]
fn singular_drag_notifies_once_after_release() {
    let (mut gauge, fired) = gauge();
    let path = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.4];
    let (first, rest) = path.split_first().unwrap();

    gauge.handle_pointer(PointerEvent::Down(point_for(*first, 110.0)));
    for &progress in rest {
        gauge.handle_pointer(PointerEvent::Move(point_for(progress, 110.0)));
        assert!(fired.borrow().is_empty(), "notified mid-drag");
    }
    gauge.handle_pointer(PointerEvent::Up(point_for(90.4, 110.0)));

    assert_eq!(*fired.borrow(), vec![90]);
    assert_eq!(gauge.progress() as i32, 90);
}

#[test]
fn cancelled_drag_still_releases() {
    let (mut gauge, fired) = gauge();
    gauge.handle_pointer(PointerEvent::Down(point_for(10.0, 110.0)));
    gauge.handle_pointer(PointerEvent::Move(point_for(40.5, 110.0)));
    gauge.handle_pointer(PointerEvent::Cancel);
    assert_eq!(*fired.borrow(), vec![40]);
}

#[test]
fn immediate_drag_respects_interval() {
    let config = GaugeConfig::builder()
        .delegation_mode(DelegationMode::Immediate { interval: 3.0 })
        .build();
    let (mut gauge, fired) = gauge_with(config);
    drag(&mut gauge, &[10.5, 13.5, 14.7, 16.9, 17.2, 20.8]);
    assert_eq!(*fired.borrow(), vec![13, 16, 20]);
}

#[test]
fn drag_outside_track_does_not_move() {
    let (mut gauge, _) = gauge();
    gauge.set_value(15.0);
    gauge.handle_pointer(PointerEvent::Down(Point::new(150.0, 150.0)));
    gauge.handle_pointer(PointerEvent::Move(Point::new(160.0, 160.0)));
    gauge.handle_pointer(PointerEvent::Move(Point::new(170.0, 150.0)));
    gauge.handle_pointer(PointerEvent::Up(Point::new(170.0, 150.0)));
    assert_eq!(gauge.progress(), 50.0);
}

#[test]
fn drag_that_misses_the_track_is_silent() {
    let (mut gauge, fired) = gauge();
    gauge.set_value(15.0);
    gauge.handle_pointer(PointerEvent::Down(Point::new(150.0, 150.0)));
    gauge.handle_pointer(PointerEvent::Move(Point::new(170.0, 150.0)));
    gauge.handle_pointer(PointerEvent::Up(Point::new(170.0, 150.0)));
    assert!(fired.borrow().is_empty());

    // The hold was still lifted.
    gauge.set_current_value(20.0, false);
    assert_eq!(*fired.borrow(), vec![75]);
}

#[test]
fn tap_animates_and_notifies_destination() {
    let (mut gauge, fired) = gauge();
    tap(&mut gauge, Point::new(150.0, 40.0));
    assert!(gauge.is_animating());

    run_frames(&mut gauge, 8);
    assert!(gauge.progress() > 0.0 && gauge.progress() < 50.0);
    assert!(fired.borrow().is_empty());

    run_frames(&mut gauge, 8);
    assert!(!gauge.is_animating());
    assert_eq!(gauge.progress(), 50.0);
    assert_eq!(*fired.borrow(), vec![50]);
}

#[test]
fn tap_outside_track_is_ignored() {
    let (mut gauge, _) = gauge();
    tap(&mut gauge, Point::new(150.0, 150.0));
    tap(&mut gauge, Point::new(150.0, 295.0));
    assert!(!gauge.is_animating());
}

#[test]
fn drag_interrupts_tap_animation() {
    let (mut gauge, fired) = gauge();
    tap(&mut gauge, Point::new(150.0, 40.0));
    run_frames(&mut gauge, 4);
    drag(&mut gauge, &[10.0, 30.5]);
    assert!(!gauge.is_animating());
    run_frames(&mut gauge, 20);
    assert_eq!(gauge.progress() as i32, 30);
    assert_eq!(*fired.borrow(), vec![30]);
}

#[test]
fn programmatic_animation_is_silent() {
    let (mut gauge, fired) = gauge();
    gauge.set_current_value(25.0, true);
    run_frames(&mut gauge, 20);
    assert_eq!(gauge.progress(), 100.0);
    assert_eq!(gauge.value(), 25.0);
    assert!(fired.borrow().is_empty());

    // Delivery resumes afterwards.
    gauge.set_current_value(15.0, false);
    assert_eq!(*fired.borrow(), vec![50]);
}

#[test]
fn linear_animation_samples() {
    let config = GaugeConfig::builder()
        .min_value(0.0)
        .max_value(100.0)
        .counting_method(CountingMethod::Linear)
        .build();
    let (mut gauge, _) = gauge_with(config);
    gauge.set_current_value(100.0, true);
    gauge.advance(Duration::ZERO);
    assert_eq!(gauge.progress(), 0.0);
    gauge.advance(Duration::from_millis(250));
    assert!((gauge.progress() - 50.0).abs() < 1e-9);
    gauge.advance(Duration::from_millis(250));
    assert_eq!(gauge.progress(), 100.0);
    assert!(!gauge.is_animating());
}

#[test]
fn set_current_value_round_trips() {
    let (mut gauge, _) = gauge();
    for value in [15.0, 10.0, 25.0, 5.0] {
        gauge.set_current_value(value, false);
        assert_eq!(gauge.value(), value);
    }
}

#[test]
fn value_is_bounded_and_monotone() {
    let (mut gauge, _) = gauge();
    let mut previous = f64::MIN;
    for step in 0..=1000 {
        gauge.set_value(5.0 + 20.0 * step as f64 / 1000.0);
        let value = gauge.value();
        assert!((5.0..=25.0).contains(&value), "{value} out of range");
        assert!(value >= previous);
        previous = value;
    }
}

#[test]
fn custom_control_fires_once() {
    let (mut gauge, fired) = gauge();
    let pressed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pressed);
    gauge.on_button_action(move || counter.set(counter.get() + 1));

    let button = gauge.layout().custom_control.unwrap();
    tap(&mut gauge, button.center());
    tap(&mut gauge, button.center());

    assert_eq!(pressed.get(), 1);
    assert!(gauge.config().is_custom_control_active);
    assert!(!gauge.is_animating());
    assert!(fired.borrow().is_empty());
}

#[test]
fn hidden_custom_control_lets_taps_through() {
    let config = GaugeConfig::builder()
        .custom_control_button_visible(false)
        .build();
    let (mut gauge, _) = gauge_with(config);
    let pressed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&pressed);
    gauge.on_button_action(move || flag.set(true));

    let button = gauge.layout().custom_control.unwrap();
    tap(&mut gauge, button.center());
    assert!(!pressed.get());
    assert!(gauge.is_animating());
}

#[test]
fn hit_test_annulus() {
    let (gauge, _) = gauge();
    let geometry = gauge.geometry().unwrap();
    assert!(!geometry.hit_test(Point::new(150.0, 150.0)));
    assert!(!geometry.hit_test(Point::new(150.0, -1.0)));
    assert!(geometry.hit_test(Point::new(60.0, 230.0)));
}

#[test]
fn resizing_recomputes_geometry() {
    let (mut gauge, fired) = gauge();
    let before = gauge.geometry().unwrap();

    gauge.set_frame(Rect::new(40.0, 40.0, 200.0, 200.0));
    let after = gauge.geometry().unwrap();
    assert_ne!(before.end_point(), after.end_point());
    assert!(after.total_arc_distance() < before.total_arc_distance());

    tap(&mut gauge, Point::new(100.0, 30.0));
    run_frames(&mut gauge, 16);
    assert_eq!(gauge.progress(), 50.0);
    assert_eq!(*fired.borrow(), vec![50]);
}

#[test]
fn track_width_change_invalidates_geometry() {
    let (mut gauge, _) = gauge();
    let before = gauge.geometry().unwrap();
    gauge.update_config(|c| c.track_width = 24.0);
    assert!(gauge.needs_display());
    let after = gauge.geometry().unwrap();
    assert!(after.end_point().x > before.end_point().x);
}
