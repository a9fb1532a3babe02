use bytemuck::{Pod, Zeroable};

/// Flag bits packed into `SegmentInstance::flags`.
pub const SEGMENT_FLAG_HEAD: u32 = 1 << 0;
pub const SEGMENT_FLAG_TAIL: u32 = 1 << 1;
pub const SEGMENT_FLAG_WINGS: u32 = 1 << 2;

/// Per-segment transform for the presenter. 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SegmentInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation about Z, in radians.
    pub heading: f32,
    /// Roll, in radians.
    pub bank: f32,
    /// Uniform model scale.
    pub scale: f32,
    /// `SEGMENT_FLAG_*` bits, stored as a float so the whole record is f32.
    pub flags: f32,
    /// Wing rotation (right wing; the left is mirrored). Zero for wingless segments.
    pub wing_flap: f32,
    /// Spine ridge rotation.
    pub spine_sway: f32,
    /// Emissive intensity.
    pub glow: f32,
    /// Pulse component of the glow, 0..1.
    pub pulse: f32,
    pub _pad: f32,
}

impl SegmentInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// Per-drop transform. 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    pub _pad: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Per-flyer transform. 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ActorInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Left limb rotation about Z.
    pub left_flap: f32,
    /// Right limb rotation about Z.
    pub right_flap: f32,
    /// Left limb forward tilt about Y.
    pub left_tilt: f32,
    /// Right limb forward tilt about Y.
    pub right_tilt: f32,
    pub _pad: f32,
}

impl ActorInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Everything the presenter draws in one frame, as flat instance arrays.
pub struct FrameBuffer {
    pub segments: Vec<SegmentInstance>,
    pub particles: Vec<ParticleInstance>,
    pub actors: Vec<ActorInstance>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64, 32, 8)
    }

    pub fn with_capacity(segments: usize, particles: usize, actors: usize) -> Self {
        Self {
            segments: Vec::with_capacity(segments),
            particles: Vec::with_capacity(particles),
            actors: Vec::with_capacity(actors),
        }
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.particles.clear();
        self.actors.clear();
    }

    pub fn segment_count(&self) -> u32 {
        self.segments.len() as u32
    }

    pub fn particle_count(&self) -> u32 {
        self.particles.len() as u32
    }

    pub fn actor_count(&self) -> u32 {
        self.actors.len() as u32
    }

    /// Raw pointer to segment data for SharedArrayBuffer reads.
    pub fn segments_ptr(&self) -> *const f32 {
        self.segments.as_ptr() as *const f32
    }

    pub fn particles_ptr(&self) -> *const f32 {
        self.particles.as_ptr() as *const f32
    }

    pub fn actors_ptr(&self) -> *const f32 {
        self.actors.as_ptr() as *const f32
    }

    pub fn segment_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.segments)
    }

    pub fn particle_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.particles)
    }

    pub fn actor_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.actors)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_strides() {
        assert_eq!(std::mem::size_of::<SegmentInstance>(), SegmentInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<ParticleInstance>(), ParticleInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<ActorInstance>(), ActorInstance::STRIDE_BYTES);
    }

    #[test]
    fn float_views_match_counts() {
        let mut buf = FrameBuffer::new();
        buf.segments.push(SegmentInstance { x: 1.0, ..Default::default() });
        buf.segments.push(SegmentInstance::default());
        buf.particles.push(ParticleInstance { opacity: 0.5, ..Default::default() });
        assert_eq!(buf.segment_count(), 2);
        assert_eq!(buf.segment_floats().len(), 2 * SegmentInstance::FLOATS);
        assert_eq!(buf.segment_floats()[0], 1.0);
        assert_eq!(buf.particle_floats()[6], 0.5);
        assert!(buf.actor_floats().is_empty());

        buf.clear();
        assert_eq!(buf.segment_count(), 0);
        assert_eq!(buf.particle_count(), 0);
        assert_eq!(buf.actor_count(), 0);
    }

    #[test]
    fn flags_round_trip_through_float() {
        let inst = SegmentInstance {
            flags: (SEGMENT_FLAG_HEAD | SEGMENT_FLAG_WINGS) as f32,
            ..Default::default()
        };
        assert!(inst.has_flag(SEGMENT_FLAG_HEAD));
        assert!(inst.has_flag(SEGMENT_FLAG_WINGS));
        assert!(!inst.has_flag(SEGMENT_FLAG_TAIL));
    }
}
