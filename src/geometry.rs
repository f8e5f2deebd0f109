//! Mapping between the gauge's bounding rectangle, track angles and touch
//! points.
//!
//! All angles are in screen space: the y axis grows downward, so increasing
//! angles sweep clockwise on screen.

use crate::config::GeometryConstants;
use std::f64::consts::PI;

// ============================================================================
// PRIMITIVES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }
}

/// Circular arc swept clockwise from `start_angle` to `end_angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcPath {
    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + angle.cos() * self.radius,
            self.center.y + angle.sin() * self.radius,
        )
    }

    /// Clockwise sweep in `[0, 2π)`.
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).rem_euclid(2.0 * PI)
    }

    pub fn length(&self) -> f64 {
        self.sweep() * self.radius
    }

    /// Where stroking begins, or `None` for a degenerate path.
    pub fn first_point(&self) -> Option<Point> {
        let usable = self.radius.is_finite()
            && self.radius > 0.0
            && self.start_angle.is_finite()
            && self.end_angle.is_finite()
            && self.center.x.is_finite()
            && self.center.y.is_finite();
        usable.then(|| self.point_at(self.start_angle))
    }
}

// ============================================================================
// FORWARD MAPPING
// ============================================================================

/// Track angle (radians) for a progress percent.
pub fn angle_for_progress(constants: &GeometryConstants, percent: f64) -> f64 {
    PI * (constants.angle_min + (constants.angle_max - constants.angle_min) * percent / 100.0)
}

/// Radius of a track stroke. Wider strokes are pushed outward so they stay
/// aligned with the inner edge of the base track.
pub fn track_radius(bounds: &Rect, track_width: f64, stroke_width: f64) -> f64 {
    bounds.width / 2.0 - stroke_width + (stroke_width - track_width) * 1.5
}

pub fn track_arc(
    bounds: &Rect,
    track_width: f64,
    stroke_width: f64,
    start_angle: f64,
    end_angle: f64,
) -> ArcPath {
    ArcPath {
        center: bounds.center(),
        radius: track_radius(bounds, track_width, stroke_width),
        start_angle,
        end_angle,
    }
}

// ============================================================================
// INVERSE MAPPING
// ============================================================================

fn radians_to_degrees(angle: f64) -> f64 {
    angle / PI * 180.0
}

/// Arc length from the start of the track to the projection of `point`.
///
/// Points in the gap at the bottom of the circle clamp to either end; points
/// left of the track radius that wrap past the end snap back to the start.
pub fn distance_from_start(
    point: Point,
    bounds: &Rect,
    track_width: f64,
    constants: &GeometryConstants,
) -> f64 {
    let radii = bounds.width / 2.0 - track_width;
    let circumference = radii * 2.0 * PI;
    let max_angle = constants.max_angle();

    let mut angle = radians_to_degrees((point.x - bounds.mid_x()).atan2(point.y - bounds.mid_y()))
        + constants.starting_angle
        + 180.0;
    angle = (90.0 - angle) % 360.0;
    while angle < 0.0 {
        angle += 360.0;
    }
    if point.x - bounds.x < radii && angle > max_angle {
        angle = 0.0;
    }
    angle = angle.clamp(0.0, max_angle);

    angle / 360.0 * circumference
}

/// Whether `point` lies on the interactive part of the gauge: inside the
/// annulus between a quarter and half of the width, and above the strip that
/// holds the icons and the custom control.
pub fn hit_test(point: Point, bounds: &Rect, end_point: Point) -> bool {
    let current = bounds.center().distance_squared(point);

    let outer_limit = (bounds.width / 2.0).powi(2);
    if current > outer_limit {
        return false;
    }

    let inner_limit = (bounds.width / 4.0).powi(2);
    if current < inner_limit {
        return false;
    }

    point.y < end_point.y + bounds.height / 6.0
}

// ============================================================================
// GEOMETRY CACHE
// ============================================================================

/// Layout-derived geometry, valid only for the inputs it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryCache {
    bounds: Rect,
    track_width: f64,
    constants: GeometryConstants,
    end_point: Point,
    total_arc_distance: f64,
}

impl GeometryCache {
    /// Returns `None` when the layout cannot produce a usable track yet.
    pub fn compute(bounds: Rect, track_width: f64, constants: GeometryConstants) -> Option<Self> {
        let track = track_arc(
            &bounds,
            track_width,
            track_width,
            PI * constants.angle_min,
            PI * constants.angle_max,
        );
        let first = track.first_point()?;
        let end_point = Point::new(
            bounds.x + bounds.width - (first.x - bounds.x) - track_width * constants.end_point_inset,
            first.y,
        );
        let total_arc_distance = distance_from_start(end_point, &bounds, track_width, &constants);
        if !(total_arc_distance.is_finite() && total_arc_distance > 0.0) {
            return None;
        }

        log::debug!(
            "captured gauge geometry: end point ({:.1}, {:.1}), arc distance {:.1}",
            end_point.x,
            end_point.y,
            total_arc_distance
        );

        Some(Self {
            bounds,
            track_width,
            constants,
            end_point,
            total_arc_distance,
        })
    }

    pub fn is_valid_for(&self, bounds: &Rect, track_width: f64, constants: &GeometryConstants) -> bool {
        self.bounds == *bounds && self.track_width == track_width && self.constants == *constants
    }

    pub fn end_point(&self) -> Point {
        self.end_point
    }

    pub fn total_arc_distance(&self) -> f64 {
        self.total_arc_distance
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn hit_test(&self, point: Point) -> bool {
        hit_test(point, &self.bounds, self.end_point)
    }

    /// Progress percent for a touch point, clamped to `[0, 100]`.
    pub fn progress_for_point(&self, point: Point) -> f64 {
        let distance = distance_from_start(point, &self.bounds, self.track_width, &self.constants);
        (distance / self.total_arc_distance * 100.0).clamp(0.0, 100.0)
    }
}
