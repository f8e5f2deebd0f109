use crate::easing::ProgressCounter;
use std::time::Duration;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Progress reached after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub progress: f64,
    pub is_complete: bool,
}

/// Timed transition of progress from a start to a destination value.
///
/// The task is driven by feeding it elapsed time, so any host loop (or a test)
/// can advance it.
#[derive(Debug)]
pub struct ProgressAnimation {
    start_value: f64,
    destination_value: f64,
    elapsed: Duration,
    total_duration: Duration,
    counter: Box<dyn ProgressCounter>,
}

impl ProgressAnimation {
    pub fn new(
        start_value: f64,
        destination_value: f64,
        total_duration: Duration,
        counter: Box<dyn ProgressCounter>,
    ) -> Self {
        Self {
            start_value,
            destination_value,
            elapsed: Duration::ZERO,
            total_duration,
            counter,
        }
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn destination_value(&self) -> f64 {
        self.destination_value
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.total_duration
    }

    pub fn tick(&mut self, delta: Duration) -> AnimationFrame {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.total_duration);
        AnimationFrame {
            progress: self.current_value(),
            is_complete: self.is_complete(),
        }
    }

    pub fn current_value(&self) -> f64 {
        if self.is_complete() {
            return self.destination_value;
        }
        if self.elapsed.is_zero() {
            return self.start_value;
        }
        let t = self.elapsed.as_secs_f64() / self.total_duration.as_secs_f64();
        let eased = self.counter.update(t);
        self.start_value + eased * (self.destination_value - self.start_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CountingMethod;

    fn linear(start: f64, destination: f64) -> ProgressAnimation {
        ProgressAnimation::new(
            start,
            destination,
            DEFAULT_DURATION,
            CountingMethod::Linear.counter(),
        )
    }

    #[test]
    fn starts_at_start_value() {
        let animation = linear(0.0, 100.0);
        assert_eq!(animation.current_value(), 0.0);
        assert!(!animation.is_complete());
    }

    #[test]
    fn linear_half_way_after_quarter_second() {
        let mut animation = linear(0.0, 100.0);
        let frame = animation.tick(Duration::from_millis(250));
        assert!((frame.progress - 50.0).abs() < 1e-9);
        assert!(!frame.is_complete);
    }

    #[test]
    fn overshooting_delta_clamps_to_destination() {
        let mut animation = linear(20.0, 80.0);
        animation.tick(Duration::from_millis(400));
        let frame = animation.tick(Duration::from_millis(400));
        assert_eq!(frame.progress, 80.0);
        assert!(frame.is_complete);
        assert_eq!(animation.elapsed(), DEFAULT_DURATION);
    }

    #[test]
    fn reaches_destination_exactly_with_easing() {
        let mut animation = ProgressAnimation::new(
            0.0,
            100.0,
            DEFAULT_DURATION,
            CountingMethod::EaseInOut.counter(),
        );
        let mut frame = animation.tick(Duration::ZERO);
        assert_eq!(frame.progress, 0.0);
        for _ in 0..16 {
            frame = animation.tick(Duration::from_secs_f64(1.0 / 30.0));
        }
        assert_eq!(frame.progress, 100.0);
        assert!(frame.is_complete);
    }

    #[test]
    fn runs_backwards() {
        let mut animation = linear(90.0, 10.0);
        let frame = animation.tick(Duration::from_millis(125));
        assert!((frame.progress - 70.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut animation = ProgressAnimation::new(
            0.0,
            42.0,
            Duration::ZERO,
            CountingMethod::Linear.counter(),
        );
        assert!(animation.is_complete());
        assert_eq!(animation.tick(Duration::ZERO).progress, 42.0);
    }
}
