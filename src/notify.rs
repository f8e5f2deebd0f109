//! Delivery policy for progress-changed notifications.

use crate::config::DelegationMode;
use std::cell::Cell;
use std::rc::Rc;

/// Marks a programmatic update. Notifications stay silent while any scope is
/// alive; dropping the last one restores delivery.
#[derive(Debug)]
#[must_use = "notifications resume as soon as the scope is dropped"]
pub struct InternalScope {
    depth: Rc<Cell<u32>>,
}

impl Drop for InternalScope {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[derive(Debug)]
pub struct ProgressNotifier {
    mode: DelegationMode,
    last_notified: f64,
    held: bool,
    internal_depth: Rc<Cell<u32>>,
}

impl ProgressNotifier {
    pub fn new(mode: DelegationMode) -> Self {
        Self {
            mode,
            last_notified: 0.0,
            held: false,
            internal_depth: Rc::new(Cell::new(0)),
        }
    }

    pub fn mode(&self) -> DelegationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DelegationMode) {
        self.mode = mode;
    }

    pub fn is_singular(&self) -> bool {
        self.mode == DelegationMode::Singular
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn is_internal(&self) -> bool {
        self.internal_depth.get() > 0
    }

    pub fn internal_scope(&self) -> InternalScope {
        self.internal_depth.set(self.internal_depth.get() + 1);
        InternalScope {
            depth: Rc::clone(&self.internal_depth),
        }
    }

    /// Stops delivery until [`release`](Self::release).
    pub fn hold(&mut self) {
        self.held = true;
    }

    /// Lifts a hold. Returns the value to deliver when a hold was lifted
    /// outside of an internal update.
    pub fn release(&mut self, progress: f64) -> Option<i32> {
        if !std::mem::replace(&mut self.held, false) {
            return None;
        }
        if self.is_internal() {
            return None;
        }
        Some(progress as i32)
    }

    /// Decides whether a progress change is delivered. Only changes of the
    /// integer part count.
    pub fn progress_changed(&mut self, old: f64, new: f64) -> Option<i32> {
        if old as i32 == new as i32 || self.held || self.is_internal() {
            return None;
        }
        match self.mode {
            DelegationMode::Immediate { interval } => {
                if (new - self.last_notified).abs() >= interval {
                    self.last_notified = new;
                    Some(new as i32)
                } else {
                    None
                }
            }
            DelegationMode::Singular => {
                self.last_notified = new;
                Some(new as i32)
            }
        }
    }
}
