//! Spring physics
//!
//! RK4-integrated springs used to ease displaced rows back into their slots.
//! Configs are usually built from a stiffness level and a damping ratio.

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Create a spring from a damping ratio instead of a raw damping coefficient.
    ///
    /// A ratio of `1.0` is critically damped, below oscillates, above creeps.
    pub fn with_damping_ratio(stiffness: f32, ratio: f32, mass: f32) -> Self {
        let damping = ratio * 2.0 * (stiffness * mass).sqrt();
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Medium-low stiffness without bounce (critically damped).
    ///
    /// This is the settle spring for rows released after a drag.
    pub fn medium_low() -> Self {
        Self::with_damping_ratio(400.0, 1.0, 1.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping() - 0.01
    }

    /// Check if the spring is critically damped (no oscillation, fastest settling)
    pub fn is_critically_damped(&self) -> bool {
        (self.damping - self.critical_damping()).abs() < 0.01
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping() + 0.01
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::medium_low()
    }
}

/// Default distance from the target below which a spring may rest, in pixels.
pub const DEFAULT_REST_THRESHOLD: f32 = 0.5;

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    rest_threshold: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            rest_threshold: DEFAULT_REST_THRESHOLD,
        }
    }

    /// Use a different rest threshold (pixels). Velocity tolerance scales with it.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.rest_threshold = threshold.abs().max(f32::EPSILON);
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and drop any velocity.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }

    /// Check if the spring has settled (within threshold of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        let velocity_threshold = self.rest_threshold * 10.0;
        (self.value - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < velocity_threshold
    }

    /// Step the spring simulation using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}
