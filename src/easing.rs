//! Progress counters: easing curves mapping normalized time to normalized
//! progress, both in `[0, 1]`.

use crate::config::CountingMethod;
use std::fmt::Debug;

pub const COUNTER_RATE: f64 = 3.0;

pub trait ProgressCounter: Debug {
    fn update(&self, t: f64) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

#[derive(Debug, Clone, Copy, Default)]
pub struct EaseIn;

#[derive(Debug, Clone, Copy, Default)]
pub struct EaseOut;

#[derive(Debug, Clone, Copy, Default)]
pub struct EaseInOut;

impl ProgressCounter for Linear {
    fn update(&self, t: f64) -> f64 {
        t
    }
}

impl ProgressCounter for EaseIn {
    fn update(&self, t: f64) -> f64 {
        t.powf(COUNTER_RATE)
    }
}

impl ProgressCounter for EaseOut {
    fn update(&self, t: f64) -> f64 {
        1.0 - (1.0 - t).powf(COUNTER_RATE)
    }
}

impl ProgressCounter for EaseInOut {
    fn update(&self, t: f64) -> f64 {
        let u = 2.0 * t;
        if u < 1.0 {
            0.5 * u.powf(COUNTER_RATE)
        } else {
            0.5 * (2.0 - (2.0 - u).powf(COUNTER_RATE))
        }
    }
}

impl CountingMethod {
    pub fn counter(self) -> Box<dyn ProgressCounter> {
        match self {
            CountingMethod::Linear => Box::new(Linear),
            CountingMethod::EaseIn => Box::new(EaseIn),
            CountingMethod::EaseOut => Box::new(EaseOut),
            CountingMethod::EaseInOut => Box::new(EaseInOut),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METHODS: [CountingMethod; 4] = [
        CountingMethod::Linear,
        CountingMethod::EaseIn,
        CountingMethod::EaseOut,
        CountingMethod::EaseInOut,
    ];

    #[test]
    fn counters_pin_both_ends() {
        for method in METHODS {
            let counter = method.counter();
            assert_eq!(counter.update(0.0), 0.0, "{method:?} at 0");
            assert_eq!(counter.update(1.0), 1.0, "{method:?} at 1");
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_about_midpoint() {
        assert_eq!(EaseInOut.update(0.5), 0.5);
        let a = EaseInOut.update(0.25);
        let b = EaseInOut.update(0.75);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cubic_shapes() {
        assert!((EaseIn.update(0.5) - 0.125).abs() < 1e-12);
        assert!((EaseOut.update(0.5) - 0.875).abs() < 1e-12);
        assert!((EaseInOut.update(0.25) - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn counters_are_monotonic() {
        for method in METHODS {
            let counter = method.counter();
            let mut previous = 0.0;
            for step in 0..=100 {
                let value = counter.update(step as f64 / 100.0);
                assert!(value >= previous - 1e-12, "{method:?} decreased at {step}");
                previous = value;
            }
        }
    }
}
