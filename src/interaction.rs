//! Turns raw pointer events into tap and pan gestures.

use crate::geometry::Point;

/// Distance a pressed pointer must travel before a pan starts.
pub const DEFAULT_PAN_SLOP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap(Point),
    Pan(PanPhase, Point),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    Idle,
    Pressed { origin: Point },
    Panning { last: Point },
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    slop: f64,
    tracking: Tracking,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_PAN_SLOP)
    }
}

impl GestureRecognizer {
    pub fn new(slop: f64) -> Self {
        Self {
            slop,
            tracking: Tracking::Idle,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.tracking, Tracking::Panning { .. })
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<Gesture> {
        let (next, gesture) = match (self.tracking, event) {
            (Tracking::Panning { last }, PointerEvent::Down(point)) => {
                // A second press while panning finishes the first gesture.
                (
                    Tracking::Pressed { origin: point },
                    Some(Gesture::Pan(PanPhase::Ended, last)),
                )
            }
            (_, PointerEvent::Down(point)) => (Tracking::Pressed { origin: point }, None),
            (Tracking::Pressed { origin }, PointerEvent::Move(point)) => {
                if origin.distance_squared(point) > self.slop * self.slop {
                    (
                        Tracking::Panning { last: point },
                        Some(Gesture::Pan(PanPhase::Began, point)),
                    )
                } else {
                    (Tracking::Pressed { origin }, None)
                }
            }
            (Tracking::Panning { .. }, PointerEvent::Move(point)) => (
                Tracking::Panning { last: point },
                Some(Gesture::Pan(PanPhase::Changed, point)),
            ),
            (Tracking::Pressed { .. }, PointerEvent::Up(point)) => {
                (Tracking::Idle, Some(Gesture::Tap(point)))
            }
            (Tracking::Panning { .. }, PointerEvent::Up(point)) => {
                (Tracking::Idle, Some(Gesture::Pan(PanPhase::Ended, point)))
            }
            (Tracking::Panning { last }, PointerEvent::Cancel) => {
                (Tracking::Idle, Some(Gesture::Pan(PanPhase::Ended, last)))
            }
            (_, PointerEvent::Cancel) => (Tracking::Idle, None),
            (Tracking::Idle, PointerEvent::Move(_) | PointerEvent::Up(_)) => (Tracking::Idle, None),
        };

        if next != self.tracking {
            log::debug!("gesture tracking {:?} -> {:?}", self.tracking, next);
        }
        self.tracking = next;
        gesture
    }
}
