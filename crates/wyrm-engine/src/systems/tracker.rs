use glam::Vec3;

use crate::api::config::TrackerConfig;
use crate::core::time::TimingConfig;

/// Exponential follower for the raw pointer target.
///
/// Produces the lagged head position and a doubly-smoothed speed estimate,
/// so a sudden pointer jump neither teleports the head nor spikes the speed.
#[derive(Debug, Clone)]
pub struct SmoothedTracker {
    config: TrackerConfig,
    timing: TimingConfig,
    lagged: Vec3,
    speed: f32,
}

impl SmoothedTracker {
    pub fn new(config: TrackerConfig, timing: TimingConfig, start: Vec3) -> Self {
        Self {
            config,
            timing,
            lagged: start,
            speed: 0.0,
        }
    }

    /// Pull the lagged position toward `raw_target` and refresh the speed estimate.
    /// Returns `(lagged_position, speed)`.
    pub fn update(&mut self, raw_target: Vec3, dt: f32) -> (Vec3, f32) {
        let frames = self.timing.scale(dt);
        if frames == 0.0 {
            return (self.lagged, self.speed);
        }

        let previous = self.lagged;
        let lag = self.timing.blend(self.config.lag_factor, dt);
        self.lagged = previous.lerp(raw_target, lag);

        // Displacement per reference frame, whatever this tick's length.
        let raw_speed = self.lagged.distance(previous) / frames;
        let speed_lag = self.timing.blend(self.config.speed_lag, dt);
        self.speed += (raw_speed - self.speed) * speed_lag;

        (self.lagged, self.speed)
    }

    pub fn position(&self) -> Vec3 {
        self.lagged
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Snap to `position` with zero speed.
    pub fn reset(&mut self, position: Vec3) {
        self.lagged = position;
        self.speed = 0.0;
    }
}
