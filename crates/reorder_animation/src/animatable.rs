//! Poll-driven animated values
//!
//! An [`Animatable`] is a value, a target, a spring, and a settled predicate.
//! It does not own a clock: whatever drives frames (an event loop, an
//! animation-frame callback, a tokio interval) calls [`Animatable::tick`] with
//! the elapsed time and reads [`Animatable::value`] back.
//!
//! # Example
//!
//! ```ignore
//! let mut offset = Animatable::new(-48.0, SpringConfig::medium_low()).threshold(1.0);
//! offset.animate_to(0.0);
//! while offset.tick(1.0 / 60.0) {
//!     render_row(offset.value());
//! }
//! ```

use crate::spring::{Spring, SpringConfig};

/// A scalar animated toward a target by a spring.
#[derive(Clone, Copy, Debug)]
pub struct Animatable {
    spring: Spring,
    threshold: f32,
    running: bool,
}

impl Animatable {
    /// Create a resting value.
    pub fn new(value: f32, config: SpringConfig) -> Self {
        Self {
            spring: Spring::new(config, value),
            threshold: crate::spring::DEFAULT_REST_THRESHOLD,
            running: false,
        }
    }

    /// Distance from the target at which the animation is considered done.
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.abs().max(f32::EPSILON);
        self.spring = self.spring.with_threshold(self.threshold);
        self
    }

    /// Jump to `value` without animating. Stops any running animation.
    pub fn snap_to(&mut self, value: f32) {
        self.spring.snap_to(value);
        self.spring.set_target(value);
        self.running = false;
    }

    /// Start animating from the current value toward `target`.
    pub fn animate_to(&mut self, target: f32) {
        self.spring.set_target(target);
        self.running = !self.is_within_threshold();
        if !self.running {
            self.spring.snap_to(target);
        }
    }

    /// Advance by `dt` seconds. Returns `true` while the animation is still running.
    ///
    /// The value only ever moves toward the target: when a step lands within
    /// the threshold or would cross the target, it snaps onto the target.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }

        let target = self.spring.target();
        let before = self.spring.value() - target;
        self.spring.step(dt);
        let after = self.spring.value() - target;

        let crossed = before != 0.0 && after != 0.0 && before.signum() != after.signum();
        if crossed || self.is_within_threshold() {
            self.spring.snap_to(target);
            self.running = false;
            tracing::trace!(target, "animatable settled");
        }

        self.running
    }

    pub fn value(&self) -> f32 {
        self.spring.value()
    }

    pub fn target(&self) -> f32 {
        self.spring.target()
    }

    pub fn velocity(&self) -> f32 {
        self.spring.velocity()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn is_within_threshold(&self) -> bool {
        (self.spring.value() - self.spring.target()).abs() < self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approaches_target_monotonically() {
        let mut value = Animatable::new(-96.0, SpringConfig::medium_low()).threshold(1.0);
        value.animate_to(0.0);

        let mut last = value.value().abs();
        let mut frames = 0;
        while value.tick(1.0 / 60.0) {
            let now = value.value().abs();
            assert!(now < last, "{now} should be below {last}");
            last = now;
            frames += 1;
            assert!(frames < 600, "animation never settled");
        }

        assert_eq!(value.value(), 0.0);
        assert!(!value.is_running());
    }

    #[test]
    fn test_within_threshold_does_not_run() {
        let mut value = Animatable::new(0.6, SpringConfig::medium_low()).threshold(1.0);
        value.animate_to(0.0);
        assert!(!value.is_running());
        assert_eq!(value.value(), 0.0);
        assert!(!value.tick(1.0 / 60.0));
    }

    #[test]
    fn test_snap_stops_animation() {
        let mut value = Animatable::new(40.0, SpringConfig::medium_low());
        value.animate_to(0.0);
        assert!(value.tick(1.0 / 60.0));

        value.snap_to(12.0);
        assert!(!value.is_running());
        assert_eq!(value.value(), 12.0);
        assert_eq!(value.target(), 12.0);
    }

    #[test]
    fn test_underdamped_spring_never_crosses_target() {
        let mut value = Animatable::new(50.0, SpringConfig::with_damping_ratio(180.0, 0.4, 1.0)).threshold(1.0);
        value.animate_to(0.0);
        while value.tick(1.0 / 60.0) {
            assert!(value.value() > 0.0);
        }
        assert_eq!(value.value(), 0.0);
    }
}
