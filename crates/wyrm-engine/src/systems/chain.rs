//! Rigid-follow body chain with a slither overlay and smoothed banking.
//!
//! Each frame the head is placed, then every following segment is dragged to
//! exactly `segment_distance` from its already-updated predecessor. A speed-driven
//! sine wave is added on top of the constrained position, so the next segment
//! reads the perturbed position and the wave compounds toward the tail.

use glam::Vec3;

use crate::api::config::ChainConfig;
use crate::api::error::ConfigError;
use crate::components::segment::{heading_toward, Segment};

/// Below this planar length a look vector is too short to derive a heading from.
pub const LOOK_EPSILON: f32 = 0.001;

/// Squared length under which two segments count as coincident.
const COINCIDENT_EPSILON_SQ: f32 = 1e-12;

/// Owns the chain's segments and re-propagates them from the head each frame.
#[derive(Debug, Clone)]
pub struct ChainSolver {
    config: ChainConfig,
    segments: Vec<Segment>,
}

impl ChainSolver {
    /// Allocate `segment_count` segments hanging straight down from `origin`.
    pub fn new(config: ChainConfig, origin: Vec3) -> Result<Self, ConfigError> {
        if config.segment_count < 2 {
            return Err(ConfigError::TooFewSegments(config.segment_count));
        }
        if !config.segment_distance.is_finite() || config.segment_distance <= 0.0 {
            return Err(ConfigError::InvalidSegmentDistance(config.segment_distance));
        }
        let mut solver = Self {
            config,
            segments: vec![Segment::default(); config.segment_count],
        };
        solver.reset(origin);
        Ok(solver)
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Lay the chain out behind a head at `origin`, with no heading or bank.
    /// Zero heading faces +Y, so the body trails toward -Y.
    pub fn reset(&mut self, origin: Vec3) {
        let step = Vec3::NEG_Y * self.config.segment_distance;
        for (i, seg) in self.segments.iter_mut().enumerate() {
            *seg = Segment::at(origin + step * i as f32);
        }
    }

    /// Place the head at `head` and drag the rest of the chain after it.
    /// The head only translates; its heading and bank stay as laid out.
    ///
    /// `speed` drives the wave frequency and amplitude; `time` is the scene clock.
    pub fn propagate(&mut self, head: Vec3, speed: f32, time: f32) -> &[Segment] {
        let n = self.segments.len();
        let cfg = self.config;

        self.segments[0].position = head;

        let wave_freq = cfg.base_freq + speed * cfg.freq_gain;

        for i in 1..n {
            let (done, rest) = self.segments.split_at_mut(i);
            let prev = &done[i - 1];
            let seg = &mut rest[0];

            let offset = seg.position - prev.position;
            let coincident = offset.length_squared() <= COINCIDENT_EPSILON_SQ;
            let dir = if coincident {
                // Trail straight behind our own stored heading.
                -seg.facing_dir()
            } else {
                offset.normalize()
            };
            seg.position = prev.position + dir * cfg.segment_distance;

            let along = i as f32 / n as f32;
            let amplitude = cfg.base_amp + (speed * cfg.amp_gain) * along;
            let wave = (time * wave_freq - i as f32 * cfg.phase_step).sin() * amplitude;
            seg.position.x += wave * cfg.wave_scale;
            seg.position.y += wave * cfg.wave_scale;

            if coincident {
                continue;
            }

            let look = prev.position - seg.position;
            if look.truncate().length() > LOOK_EPSILON {
                let heading = heading_toward(look);
                let turn = prev.heading - heading;
                seg.bank += (turn * cfg.bank_gain - seg.bank) * cfg.bank_smooth;
                seg.heading = heading;
            }
        }

        &self.segments
    }
}
