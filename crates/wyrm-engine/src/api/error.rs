use thiserror::Error;

/// A scene configuration that cannot be run.
///
/// Raised once, at scene construction. Nothing in the per-frame path returns errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chain needs at least 2 segments, got {0}")]
    TooFewSegments(usize),

    #[error("segment distance must be positive and finite, got {0}")]
    InvalidSegmentDistance(f32),

    #[error("particle cap must be at least 1")]
    ZeroParticleCap,

    #[error("reference dt must be positive and finite, got {0}")]
    InvalidReferenceDt(f32),

    #[error("viewport must have a positive finite size, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("`{name}` must lie in [0, 1], got {value}")]
    InvalidFactor { name: &'static str, value: f32 },

    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),
}
