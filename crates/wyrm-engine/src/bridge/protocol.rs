/// SharedArrayBuffer layout.
/// Must stay in sync with the presenter's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Segments: max_segments × 12 floats]
/// [Particles: max_particles × 8 floats]
/// [Actors: max_actors × 8 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The presenter reads them from the header to compute offsets dynamically.

use crate::api::config::SceneConfig;
use crate::renderer::instance::{ActorInstance, ParticleInstance, SegmentInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_SEGMENT_COUNT: usize = 2;
pub const HEADER_PARTICLE_COUNT: usize = 3;
pub const HEADER_ACTOR_COUNT: usize = 4;
pub const HEADER_MAX_PARTICLES: usize = 5;
pub const HEADER_VIEWPORT_WIDTH: usize = 6;
pub const HEADER_VIEWPORT_HEIGHT: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_segments: usize,
    pub max_particles: usize,
    pub max_actors: usize,

    /// Size of segment data section in floats.
    pub segment_data_floats: usize,
    /// Size of particle data section in floats.
    pub particle_data_floats: usize,
    /// Size of actor data section in floats.
    pub actor_data_floats: usize,

    /// Offset (in floats) where segment data begins.
    pub segment_data_offset: usize,
    /// Offset (in floats) where particle data begins.
    pub particle_data_offset: usize,
    /// Offset (in floats) where actor data begins.
    pub actor_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_segments: usize, max_particles: usize, max_actors: usize) -> Self {
        let segment_data_floats = max_segments * SegmentInstance::FLOATS;
        let particle_data_floats = max_particles * ParticleInstance::FLOATS;
        let actor_data_floats = max_actors * ActorInstance::FLOATS;

        let segment_data_offset = HEADER_FLOATS;
        let particle_data_offset = segment_data_offset + segment_data_floats;
        let actor_data_offset = particle_data_offset + particle_data_floats;

        let buffer_total_floats = actor_data_offset + actor_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_segments,
            max_particles,
            max_actors,
            segment_data_floats,
            particle_data_floats,
            actor_data_floats,
            segment_data_offset,
            particle_data_offset,
            actor_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a SceneConfig.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(
            config.chain.segment_count,
            config.particles.max_particles,
            config.ambient.count,
        )
    }
}
