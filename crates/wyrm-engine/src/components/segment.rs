use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

/// One link of the body chain. Index 0 is the head.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    /// World-space position.
    pub position: Vec3,
    /// Model rotation about Z, in radians: travel direction minus 90°.
    pub heading: f32,
    /// Smoothed roll into turns, in radians. Carried across frames.
    pub bank: f32,
}

impl Segment {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Direction of travel as an angle from +X, in radians.
    pub fn facing(&self) -> f32 {
        self.heading + FRAC_PI_2
    }

    /// Unit vector along the direction of travel (planar).
    pub fn facing_dir(&self) -> Vec3 {
        let (sin, cos) = self.facing().sin_cos();
        Vec3::new(cos, sin, 0.0)
    }
}

/// Heading for a segment looking along `look` (planar components only).
pub fn heading_toward(look: Vec3) -> f32 {
    look.y.atan2(look.x) - FRAC_PI_2
}

/// Wing flap for winged body segments.
pub fn wing_flap(index: usize, time: f32, speed: f32) -> f32 {
    let flap_speed = 6.0 + speed * 12.0;
    (time * flap_speed - index as f32 * 0.3).sin() * (0.3 + speed * 0.5)
}

/// Sideways sway of the spine ridges.
pub fn spine_sway(index: usize, time: f32) -> f32 {
    (time * 4.0 - index as f32 * 0.4).sin() * 0.5
}

/// Travelling glow pulse, clamped at zero.
pub fn luminance_pulse(index: usize, time: f32) -> f32 {
    (time * 3.0 - index as f32 * 0.2).sin().max(0.0)
}

/// Emissive intensity: bright head, speed-boosted, pulsing.
pub fn glow(is_head: bool, speed: f32, pulse: f32) -> f32 {
    let base = if is_head { 4.0 } else { 1.0 };
    base + speed * 2.0 + pulse * 1.5
}
