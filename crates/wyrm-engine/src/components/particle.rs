//! Falling drops shed by the head.

use glam::Vec3;

/// A single drop: accelerates downward while it fades out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Downward speed, in units per reference frame.
    pub velocity: f32,
    /// Per-frame increase of `velocity`. Fixed at spawn.
    pub gravity: f32,
    /// Remaining life, 1.0 at spawn. Removed once it reaches zero.
    pub life: f32,
}

impl Particle {
    pub fn new(position: Vec3, gravity: f32) -> Self {
        Particle {
            position,
            velocity: 0.0,
            gravity,
            life: 1.0,
        }
    }

    /// Advance one tick (`frames` reference frames). Returns false when expired.
    pub fn tick(&mut self, life_decay: f32, frames: f32) -> bool {
        self.velocity += self.gravity * frames;
        self.position.y -= self.velocity * frames;
        self.life -= life_decay * frames;
        self.life > 0.0
    }

    /// Vertical stretch from fall speed; presentation only.
    pub fn stretch(&self, stretch_gain: f32) -> f32 {
        1.0 + self.velocity * stretch_gain
    }

    /// Render scale: shrinks with life, elongated along Y by the stretch.
    pub fn scale(&self, stretch_gain: f32) -> Vec3 {
        Vec3::new(self.life, self.stretch(stretch_gain) * self.life, self.life)
    }

    pub fn opacity(&self) -> f32 {
        self.life
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_falls_and_accelerates() {
        let mut p = Particle::new(Vec3::new(1.0, 2.0, 0.0), 0.002);
        p.tick(0.008, 1.0);
        assert!((p.velocity - 0.002).abs() < 1e-7);
        assert!((p.position.y - 1.998).abs() < 1e-6);
        p.tick(0.008, 1.0);
        assert!((p.velocity - 0.004).abs() < 1e-7);
        assert!((p.position.y - 1.994).abs() < 1e-6);
        assert_eq!(p.position.x, 1.0);
    }

    #[test]
    fn particle_expires() {
        let mut p = Particle::new(Vec3::ZERO, 0.001);
        p.life = 0.005;
        let alive = p.tick(0.008, 1.0);
        assert!(!alive, "particle should expire");
    }

    #[test]
    fn particle_lives_while_life_positive() {
        let mut p = Particle::new(Vec3::ZERO, 0.001);
        assert!(p.tick(0.008, 1.0), "particle should still be alive");
        assert!(p.life < 1.0);
    }

    #[test]
    fn half_frames_approximate_a_full_frame() {
        let gravity = 0.002;
        let mut full = Particle::new(Vec3::ZERO, gravity);
        let mut halves = full;
        for _ in 0..60 {
            full.tick(0.008, 1.0);
            halves.tick(0.008, 0.5);
            halves.tick(0.008, 0.5);
        }
        assert!((full.life - halves.life).abs() < 1e-5);
        assert!((full.velocity - halves.velocity).abs() < 1e-6);
        // Semi-implicit Euler falls a little less with smaller steps.
        let drop_full = -full.position.y;
        let drop_halves = -halves.position.y;
        assert!(drop_halves < drop_full);
        assert!((drop_full - drop_halves) / drop_full < 0.02, "{drop_full} vs {drop_halves}");
    }

    #[test]
    fn scale_tracks_life_and_stretch() {
        let mut p = Particle::new(Vec3::ZERO, 0.001);
        p.life = 0.5;
        p.velocity = 0.02;
        let s = p.scale(15.0);
        assert_eq!(s.x, 0.5);
        assert!((s.y - 1.3 * 0.5).abs() < 1e-6);
        assert_eq!(s.z, 0.5);
        assert_eq!(p.opacity(), 0.5);
    }
}
