use crate::core::scene::WyrmScene;
use crate::components::segment;
use crate::renderer::instance::{
    ActorInstance, FrameBuffer, ParticleInstance, SegmentInstance, SEGMENT_FLAG_HEAD, SEGMENT_FLAG_TAIL,
    SEGMENT_FLAG_WINGS,
};

/// Build the frame buffer from the scene's current state.
/// Segments are written head first, particles oldest first.
pub fn build_frame_buffer(scene: &WyrmScene, buffer: &mut FrameBuffer) {
    buffer.clear();

    let chain = scene.config().chain;
    let time = scene.elapsed();
    let speed = scene.speed();

    for (i, seg) in scene.segments().iter().enumerate() {
        let is_head = chain.is_head(i);
        let has_wings = chain.has_wings(i);

        let mut flags = 0u32;
        if is_head {
            flags |= SEGMENT_FLAG_HEAD;
        }
        if chain.is_tail(i) {
            flags |= SEGMENT_FLAG_TAIL;
        }
        if has_wings {
            flags |= SEGMENT_FLAG_WINGS;
        }

        let pulse = segment::luminance_pulse(i, time);
        buffer.segments.push(SegmentInstance {
            x: seg.position.x,
            y: seg.position.y,
            z: seg.position.z,
            heading: seg.heading,
            bank: seg.bank,
            scale: chain.scale_at(i),
            flags: flags as f32,
            wing_flap: if has_wings { segment::wing_flap(i, time, speed) } else { 0.0 },
            spine_sway: segment::spine_sway(i, time),
            glow: segment::glow(is_head, speed, pulse),
            pulse,
            _pad: 0.0,
        });
    }

    let stretch_gain = scene.config().particles.stretch_gain;
    for p in scene.particles() {
        let scale = p.scale(stretch_gain);
        buffer.particles.push(ParticleInstance {
            x: p.position.x,
            y: p.position.y,
            z: p.position.z,
            scale_x: scale.x,
            scale_y: scale.y,
            scale_z: scale.z,
            opacity: p.opacity(),
            _pad: 0.0,
        });
    }

    let tilt = scene.config().ambient.limb_tilt;
    for a in scene.actors() {
        buffer.actors.push(ActorInstance {
            x: a.position.x,
            y: a.position.y,
            z: a.position.z,
            left_flap: a.left_limb(),
            right_flap: a.right_limb(),
            left_tilt: tilt,
            right_tilt: -tilt,
            _pad: 0.0,
        });
    }
}
