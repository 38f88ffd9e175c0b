//! Reorder configuration

use std::time::Duration;

use reorder_animation::SpringConfig;

/// What the auto-scroll queue does with a request that arrives while it is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Fold the new scroll delta into the newest queued delta.
    /// No distance is lost; fewer, larger scroll calls are issued.
    #[default]
    Coalesce,
    /// Discard the oldest queued scroll delta to make room.
    DropOldest,
}

/// Configuration for drag-to-reorder behavior
#[derive(Debug, Clone, Copy)]
pub struct ReorderConfig {
    /// Spring easing a released row back into its slot
    pub settle_spring: SpringConfig,
    /// Distance (pixels) from rest at which the settle animation ends
    pub settle_threshold: f32,
    /// Maximum number of pending auto-scroll requests
    pub scroll_queue_capacity: usize,
    /// Behavior once `scroll_queue_capacity` is reached
    pub overflow: OverflowPolicy,
    /// Tick interval of the settle driver task
    pub frame_interval: Duration,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            settle_spring: SpringConfig::medium_low(),
            settle_threshold: 1.0,
            scroll_queue_capacity: 64,
            overflow: OverflowPolicy::Coalesce,
            frame_interval: Duration::from_micros(8_333),
        }
    }
}

impl ReorderConfig {
    pub fn settle_spring(mut self, spring: SpringConfig) -> Self {
        self.settle_spring = spring;
        self
    }

    pub fn settle_threshold(mut self, threshold: f32) -> Self {
        self.settle_threshold = threshold;
        self
    }

    /// Capacity of the auto-scroll queue (at least 1)
    pub fn scroll_queue_capacity(mut self, capacity: usize) -> Self {
        self.scroll_queue_capacity = capacity.max(1);
        self
    }

    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }
}
