use glam::Vec3;

/// A background flyer. Always flying; its only transition is wrapping back
/// to the far left once it passes the right bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientActor {
    pub position: Vec3,
    /// Horizontal distance per reference frame.
    pub speed: f32,
    /// Angular speed of the limb flap.
    pub limb_phase_speed: f32,
    /// Phase offset of the vertical bob.
    pub phase_offset: f32,
    /// Current flap angle; the left limb is rotated by `-flap`, the right by `+flap`.
    pub flap: f32,
    /// Number of times this actor has wrapped.
    pub wraps: u32,
}

impl AmbientActor {
    pub fn left_limb(&self) -> f32 {
        -self.flap
    }

    pub fn right_limb(&self) -> f32 {
        self.flap
    }
}

/// Triangular-wave flap: `asin(sin(x))` ramps linearly between ±π/2.
pub fn triangle_flap(time: f32, phase_speed: f32, sharpness: f32) -> f32 {
    (time * phase_speed).sin().asin() * sharpness
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn flap_is_triangular() {
        // asin(sin(x)) == x on [-π/2, π/2].
        assert!((triangle_flap(0.25, 1.0, 1.0) - 0.25).abs() < 1e-5);
        // Peak at π/2, then falls linearly.
        assert!((triangle_flap(FRAC_PI_2, 1.0, 1.0) - FRAC_PI_2).abs() < 1e-3);
        assert!((triangle_flap(PI - 0.25, 1.0, 1.0) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn flap_scales_with_sharpness() {
        let f = triangle_flap(0.5, 1.0, 1.2);
        assert!((f - 0.6).abs() < 1e-5);
    }

    #[test]
    fn limbs_are_mirrored() {
        let actor = AmbientActor {
            position: Vec3::ZERO,
            speed: 0.01,
            limb_phase_speed: 3.0,
            phase_offset: 0.0,
            flap: 0.4,
            wraps: 0,
        };
        assert_eq!(actor.left_limb(), -0.4);
        assert_eq!(actor.right_limb(), 0.4);
    }
}
