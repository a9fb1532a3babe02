use serde::{Deserialize, Serialize};

/// Reference frame interval the per-frame tuning constants were chosen at.
pub const REFERENCE_DT: f32 = 1.0 / 60.0;

/// Monotonic scene clock. Every phase-driven animation reads its elapsed time.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    elapsed: f32,
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds and return the new elapsed time.
    /// Negative, zero, and non-finite deltas are ignored so elapsed never runs backwards.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        } else if dt != 0.0 {
            log::warn!("frame clock ignored delta {}", dt);
        }
        self.frame += 1;
        self.elapsed
    }

    /// Seconds since the scene started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of ticks taken so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.frame = 0;
    }
}

/// Fixed timestep accumulator.
/// Runs scene ticks at the reference rate regardless of the host's frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// How per-frame constants (lag factors, decrements, spawn chances) respond to `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateMode {
    /// Apply every constant once per tick, whatever the tick length.
    /// Matches the tuned look exactly when ticks arrive at the reference rate.
    #[default]
    PerFrame,
    /// Rescale constants by `dt / reference_dt` so motion is frame-rate independent.
    TimeNormalized,
}

/// Tick pacing shared by every component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Run the scene through a `FixedTimestep` of `reference_dt`.
    pub fixed_step: bool,
    /// Frame interval the per-frame constants are tuned for.
    pub reference_dt: f32,
    pub rate_mode: RateMode,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_step: true,
            reference_dt: REFERENCE_DT,
            rate_mode: RateMode::PerFrame,
        }
    }
}

impl TimingConfig {
    /// How many reference frames a tick of `dt` seconds represents.
    pub fn scale(&self, dt: f32) -> f32 {
        match self.rate_mode {
            RateMode::PerFrame => 1.0,
            RateMode::TimeNormalized => {
                if dt.is_finite() && dt > 0.0 {
                    dt / self.reference_dt
                } else {
                    0.0
                }
            }
        }
    }

    /// Effective blend factor for a per-frame lerp factor over a tick of `dt`.
    ///
    /// Time-normalized mode compounds the factor: `1 - (1 - f)^(dt / reference_dt)`,
    /// which is `1 - exp(-dt / tau)` with `tau = -reference_dt / ln(1 - f)`.
    pub fn blend(&self, per_frame: f32, dt: f32) -> f32 {
        match self.rate_mode {
            RateMode::PerFrame => per_frame,
            RateMode::TimeNormalized => {
                let frames = self.scale(dt);
                if frames == 0.0 {
                    0.0
                } else {
                    1.0 - (1.0 - per_frame).clamp(0.0, 1.0).powf(frames)
                }
            }
        }
    }
}
