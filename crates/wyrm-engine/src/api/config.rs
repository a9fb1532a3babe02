use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::core::time::TimingConfig;
use crate::renderer::viewport::Viewport;

/// Seed used when the config leaves `seed` unset.
pub const DEFAULT_SEED: u64 = 42;

/// Full scene configuration. Every field has a default, so a partial JSON
/// document (or `{}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RNG seed for particles and ambient actors. `None` falls back to `DEFAULT_SEED`.
    pub seed: Option<u64>,
    pub viewport: Viewport,
    pub timing: TimingConfig,
    pub tracker: TrackerConfig,
    pub chain: ChainConfig,
    pub particles: ParticleConfig,
    pub ambient: AmbientConfig,
}

/// Pointer smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Fraction of the gap to the raw target closed per reference frame.
    pub lag_factor: f32,
    /// Fraction of the gap to the raw speed closed per reference frame.
    pub speed_lag: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            lag_factor: 0.12,
            speed_lag: 0.08,
        }
    }
}

/// Body chain geometry, slither wave, banking, and per-index presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub segment_count: usize,
    /// Exact distance between consecutive segments.
    pub segment_distance: f32,
    pub base_freq: f32,
    pub freq_gain: f32,
    pub base_amp: f32,
    pub amp_gain: f32,
    /// Wave phase lag per segment index.
    pub phase_step: f32,
    /// Multiplier applied to the wave before it is added to x and y.
    pub wave_scale: f32,
    pub bank_gain: f32,
    pub bank_smooth: f32,
    pub base_scale: f32,
    pub taper: f32,
    /// Segments with `index > segment_count - tail_length` are tail.
    pub tail_length: usize,
    pub wing_first: usize,
    pub wing_last: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            segment_count: 45,
            segment_distance: 0.05,
            base_freq: 7.0,
            freq_gain: 12.0,
            base_amp: 0.04,
            amp_gain: 0.5,
            phase_step: 0.25,
            wave_scale: 0.1,
            bank_gain: 6.0,
            bank_smooth: 0.1,
            base_scale: 0.3,
            taper: 0.2,
            tail_length: 10,
            wing_first: 5,
            wing_last: 8,
        }
    }
}

impl ChainConfig {
    /// Presentation scale, shrinking linearly from head to tail.
    pub fn scale_at(&self, index: usize) -> f32 {
        self.base_scale - (index as f32 / self.segment_count as f32) * self.taper
    }

    pub fn is_head(&self, index: usize) -> bool {
        index == 0
    }

    pub fn is_tail(&self, index: usize) -> bool {
        index + self.tail_length > self.segment_count
    }

    pub fn has_wings(&self, index: usize) -> bool {
        (self.wing_first..=self.wing_last).contains(&index)
    }

    /// Disable the slither overlay entirely (rigid chain only).
    pub fn without_slither(mut self) -> Self {
        self.base_amp = 0.0;
        self.amp_gain = 0.0;
        self
    }
}

/// Blood-drop emitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Retention cap; the oldest particle is evicted beyond it.
    pub max_particles: usize,
    pub base_chance: f32,
    pub chance_gain: f32,
    pub life_decay: f32,
    pub stretch_gain: f32,
    pub gravity_min: f32,
    pub gravity_jitter: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_particles: 30,
            base_chance: 0.02,
            chance_gain: 0.05,
            life_decay: 0.008,
            stretch_gain: 15.0,
            gravity_min: 0.001,
            gravity_jitter: 0.001,
        }
    }
}

/// Background flyers. Placement values are in scene units; `x` offsets are
/// relative to the left edge of a viewport-wide margin (`-width`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub count: usize,
    pub speed_min: f32,
    pub speed_jitter: f32,
    pub limb_speed_min: f32,
    pub limb_speed_jitter: f32,
    pub bob_freq: f32,
    pub bob_amp: f32,
    pub sharpness: f32,
    /// Constant forward tilt of each limb, in radians.
    pub limb_tilt: f32,
    /// How far past the right edge (`width`) an actor flies before wrapping.
    pub wrap_margin: f32,
    /// Initial stagger: `x = -width - u * spawn_spread`.
    pub spawn_spread: f32,
    /// Initial height: `y = height * spawn_height_fraction + u * spawn_height_jitter`.
    pub spawn_height_fraction: f32,
    pub spawn_height_jitter: f32,
    /// Wrap gap: `x = -width - wrap_gap_min - u * wrap_gap_jitter`.
    pub wrap_gap_min: f32,
    pub wrap_gap_jitter: f32,
    /// Height after a wrap: `y = height * wrap_height_fraction + u * wrap_height_jitter`.
    pub wrap_height_fraction: f32,
    pub wrap_height_jitter: f32,
    pub depth_min: f32,
    pub depth_jitter: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            count: 6,
            speed_min: 0.005,
            speed_jitter: 0.012,
            limb_speed_min: 3.0,
            limb_speed_jitter: 2.0,
            bob_freq: 0.5,
            bob_amp: 0.002,
            sharpness: 1.2,
            limb_tilt: 0.3,
            wrap_margin: 2.0,
            spawn_spread: 10.0,
            spawn_height_fraction: 1.0 / 3.0,
            spawn_height_jitter: 1.5,
            wrap_gap_min: 5.0,
            wrap_gap_jitter: 15.0,
            wrap_height_fraction: 0.25,
            wrap_height_jitter: 2.0,
            depth_min: 3.0,
            depth_jitter: 4.0,
        }
    }
}

impl SceneConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Check the invariants the per-frame code relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain.segment_count < 2 {
            return Err(ConfigError::TooFewSegments(self.chain.segment_count));
        }
        let dist = self.chain.segment_distance;
        if !dist.is_finite() || dist <= 0.0 {
            return Err(ConfigError::InvalidSegmentDistance(dist));
        }
        if self.particles.max_particles == 0 {
            return Err(ConfigError::ZeroParticleCap);
        }
        let ref_dt = self.timing.reference_dt;
        if !ref_dt.is_finite() || ref_dt <= 0.0 {
            return Err(ConfigError::InvalidReferenceDt(ref_dt));
        }
        if !self.viewport.is_valid() {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        check_factor("tracker.lag_factor", self.tracker.lag_factor)?;
        check_factor("tracker.speed_lag", self.tracker.speed_lag)?;
        check_factor("chain.bank_smooth", self.chain.bank_smooth)?;
        Ok(())
    }
}

fn check_factor(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidFactor { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::RateMode;

    #[test]
    fn default_config_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chain.segment_count, 45);
        assert_eq!(config.particles.max_particles, 30);
        assert_eq!(config.ambient.count, 6);
        assert_eq!(config.seed(), DEFAULT_SEED);
    }

    #[test]
    fn parse_partial_config() {
        let json = r#"{
            "seed": 7,
            "chain": { "segment_count": 12 },
            "timing": { "rate_mode": "time_normalized", "fixed_step": false }
        }"#;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.seed(), 7);
        assert_eq!(config.chain.segment_count, 12);
        // Unspecified fields keep their defaults.
        assert_eq!(config.chain.segment_distance, 0.05);
        assert_eq!(config.tracker.lag_factor, 0.12);
        assert_eq!(config.timing.rate_mode, RateMode::TimeNormalized);
        assert!(!config.timing.fixed_step);
    }

    #[test]
    fn parse_empty_object() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SceneConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_short_chain() {
        let err = SceneConfig::from_json(r#"{ "chain": { "segment_count": 1 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::TooFewSegments(1)));
    }

    #[test]
    fn rejects_bad_distances_and_caps() {
        let mut config = SceneConfig::default();
        config.chain.segment_distance = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSegmentDistance(_))));

        let mut config = SceneConfig::default();
        config.chain.segment_distance = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSegmentDistance(_))));

        let mut config = SceneConfig::default();
        config.particles.max_particles = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroParticleCap)));

        let mut config = SceneConfig::default();
        config.timing.reference_dt = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidReferenceDt(_))));

        let mut config = SceneConfig::default();
        config.viewport = Viewport::new(0.0, 4.0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidViewport { .. })));

        let mut config = SceneConfig::default();
        config.tracker.lag_factor = 1.5;
        match config.validate() {
            Err(ConfigError::InvalidFactor { name, .. }) => assert_eq!(name, "tracker.lag_factor"),
            other => panic!("expected InvalidFactor, got {other:?}"),
        }
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::InvalidFactor { name: "chain.bank_smooth", value: 2.0 };
        assert_eq!(err.to_string(), "`chain.bank_smooth` must lie in [0, 1], got 2");
    }

    #[test]
    fn per_index_presentation() {
        let chain = ChainConfig::default();
        assert!(chain.is_head(0));
        assert!(!chain.is_head(1));
        // Tail is index > 45 - 10, i.e. 36..=44.
        assert!(!chain.is_tail(35));
        assert!(chain.is_tail(36));
        assert!(chain.is_tail(44));
        assert!(chain.has_wings(5) && chain.has_wings(8));
        assert!(!chain.has_wings(4) && !chain.has_wings(9));
        assert!((chain.scale_at(0) - 0.3).abs() < 1e-6);
        assert!(chain.scale_at(44) < chain.scale_at(1));
    }
}
