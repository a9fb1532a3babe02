use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::config::AmbientConfig;
use crate::components::actor::{triangle_flap, AmbientActor};
use crate::core::rng::Rng;
use crate::core::time::TimingConfig;
use crate::renderer::viewport::Viewport;

/// Fixed pool of background flyers crossing left to right.
///
/// Actors never interact with each other, the chain, or the pointer.
#[derive(Debug, Clone)]
pub struct AmbientActorPool {
    config: AmbientConfig,
    timing: TimingConfig,
    viewport: Viewport,
    actors: Vec<AmbientActor>,
    rng: Rng,
}

impl AmbientActorPool {
    pub fn new(config: AmbientConfig, timing: TimingConfig, viewport: Viewport, seed: u64) -> Self {
        let mut pool = Self {
            config,
            timing,
            viewport,
            actors: Vec::with_capacity(config.count),
            rng: Rng::new(seed.wrapping_add(15_485_863)),
        };
        pool.populate();
        pool
    }

    fn populate(&mut self) {
        self.actors.clear();
        for _ in 0..self.config.count {
            let actor = self.spawn_actor();
            self.actors.push(actor);
        }
    }

    /// Staggered off-screen-left start, high in the sky, behind the chain.
    fn spawn_actor(&mut self) -> AmbientActor {
        let cfg = self.config;
        let (w, h) = (self.viewport.width, self.viewport.height);
        let position = Vec3::new(
            -w - self.rng.next_f32() * cfg.spawn_spread,
            h * cfg.spawn_height_fraction + self.rng.next_f32() * cfg.spawn_height_jitter,
            -cfg.depth_min - self.rng.next_f32() * cfg.depth_jitter,
        );
        AmbientActor {
            position,
            speed: self.rng.jitter(cfg.speed_min, cfg.speed_jitter),
            limb_phase_speed: self.rng.jitter(cfg.limb_speed_min, cfg.limb_speed_jitter),
            phase_offset: self.rng.next_f32() * TAU,
            flap: 0.0,
            wraps: 0,
        }
    }

    /// X beyond which an actor wraps back to the left.
    pub fn right_bound(&self) -> f32 {
        self.viewport.width + self.config.wrap_margin
    }

    /// Largest x a freshly wrapped actor can land on.
    pub fn wrap_start_max(&self) -> f32 {
        -self.viewport.width - self.config.wrap_gap_min
    }

    /// Fly, bob, wrap, and flap every actor.
    pub fn step(&mut self, dt: f32, time: f32) -> &[AmbientActor] {
        let frames = self.timing.scale(dt);
        let cfg = self.config;
        let bound = self.right_bound();
        let (w, h) = (self.viewport.width, self.viewport.height);

        for (i, actor) in self.actors.iter_mut().enumerate() {
            actor.position.x += actor.speed * frames;
            actor.position.y += (time * cfg.bob_freq + actor.phase_offset).sin() * cfg.bob_amp * frames;

            if actor.position.x > bound {
                actor.position.x = -w - cfg.wrap_gap_min - self.rng.next_f32() * cfg.wrap_gap_jitter;
                actor.position.y = h * cfg.wrap_height_fraction + self.rng.next_f32() * cfg.wrap_height_jitter;
                actor.wraps += 1;
                log::debug!("ambient actor {} wrapped (x={:.2})", i, actor.position.x);
            }

            actor.flap = triangle_flap(time, actor.limb_phase_speed, cfg.sharpness);
        }

        &self.actors
    }

    pub fn actors(&self) -> &[AmbientActor] {
        &self.actors
    }

    pub fn config(&self) -> &AmbientConfig {
        &self.config
    }

    /// Follow a viewport resize. Bounds move; actors keep their positions.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Re-randomize every actor from `seed`.
    pub fn reset(&mut self, seed: u64) {
        self.rng = Rng::new(seed.wrapping_add(15_485_863));
        self.populate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::{RateMode, REFERENCE_DT};

    fn pool(seed: u64) -> AmbientActorPool {
        AmbientActorPool::new(
            AmbientConfig::default(),
            TimingConfig::default(),
            Viewport::new(8.0, 4.0),
            seed,
        )
    }

    #[test]
    fn spawns_fixed_pool_off_screen_left() {
        let p = pool(1);
        assert_eq!(p.actors().len(), 6);
        for a in p.actors() {
            assert!(a.position.x <= -8.0 && a.position.x > -18.0);
            assert!(a.position.y >= 4.0 / 3.0 && a.position.y < 4.0 / 3.0 + 1.5);
            assert!(a.position.z <= -3.0 && a.position.z > -7.0);
            assert!(a.speed >= 0.005 && a.speed < 0.017);
            assert!(a.limb_phase_speed >= 3.0 && a.limb_phase_speed < 5.0);
            assert!(a.phase_offset >= 0.0 && a.phase_offset < TAU);
        }
    }

    #[test]
    fn actors_fly_right() {
        let mut p = pool(2);
        let before: Vec<f32> = p.actors().iter().map(|a| a.position.x).collect();
        p.step(REFERENCE_DT, 0.0);
        for (a, x0) in p.actors().iter().zip(before) {
            assert!((a.position.x - (x0 + a.speed)).abs() < 1e-6);
        }
    }

    #[test]
    fn never_past_bound_after_a_step() {
        let mut p = pool(3);
        // Push one actor right up to the edge.
        p.actors[0].position.x = p.right_bound() - 1e-4;
        let z = p.actors[0].position.z;
        let bound = p.right_bound();
        let mut time = 0.0;
        for _ in 0..20_000 {
            time += REFERENCE_DT;
            p.step(REFERENCE_DT, time);
            for a in p.actors() {
                assert!(a.position.x <= bound, "actor at {} past {}", a.position.x, bound);
            }
        }
        let a = p.actors()[0];
        assert!(a.wraps >= 1);
        assert_eq!(a.position.z, z, "wrap keeps depth");
    }

    #[test]
    fn wrap_lands_far_left_with_new_height() {
        let mut p = pool(4);
        p.actors[0].position.x = p.right_bound() + 0.5;
        p.step(REFERENCE_DT, 0.0);
        let a = p.actors()[0];
        assert_eq!(a.wraps, 1);
        assert!(a.position.x <= p.wrap_start_max());
        assert!(a.position.x > p.wrap_start_max() - 15.0);
        assert!(a.position.y >= 1.0 && a.position.y < 3.0);
    }

    #[test]
    fn flaps_are_bounded_by_sharpness() {
        let mut p = pool(5);
        let limit = std::f32::consts::FRAC_PI_2 * 1.2 + 1e-4;
        for k in 0..500 {
            p.step(REFERENCE_DT, k as f32 * 0.013);
            for a in p.actors() {
                assert!(a.flap.abs() <= limit);
                assert_eq!(a.left_limb(), -a.right_limb());
            }
        }
    }

    #[test]
    fn reset_is_reproducible() {
        let mut p = pool(6);
        let initial = p.actors().to_vec();
        for k in 0..100 {
            p.step(REFERENCE_DT, k as f32 * REFERENCE_DT);
        }
        p.reset(6);
        assert_eq!(p.actors(), initial.as_slice());
    }

    #[test]
    fn placement_follows_config() {
        let config = AmbientConfig {
            spawn_height_fraction: 0.5,
            spawn_height_jitter: 0.0,
            wrap_height_fraction: 0.0,
            wrap_height_jitter: 0.0,
            ..AmbientConfig::default()
        };
        let mut p = AmbientActorPool::new(config, TimingConfig::default(), Viewport::new(8.0, 4.0), 8);
        assert!(p.actors().iter().all(|a| a.position.y == 2.0));

        p.actors[0].position.x = p.right_bound() + 0.5;
        p.step(REFERENCE_DT, 0.0);
        assert_eq!(p.actors()[0].position.y, 0.0);
    }

    #[test]
    fn time_normalized_half_steps_match_full_step() {
        let timing = TimingConfig {
            rate_mode: RateMode::TimeNormalized,
            ..TimingConfig::default()
        };
        let vp = Viewport::new(8.0, 4.0);
        let mut full = AmbientActorPool::new(AmbientConfig::default(), timing, vp, 9);
        let mut halves = AmbientActorPool::new(AmbientConfig::default(), timing, vp, 9);

        let mut time = 0.0;
        for _ in 0..120 {
            full.step(REFERENCE_DT, time + REFERENCE_DT);
            halves.step(REFERENCE_DT / 2.0, time + REFERENCE_DT / 2.0);
            halves.step(REFERENCE_DT / 2.0, time + REFERENCE_DT);
            time += REFERENCE_DT;
        }
        for (a, b) in full.actors().iter().zip(halves.actors()) {
            assert!((a.position.x - b.position.x).abs() < 1e-4, "{} vs {}", a.position.x, b.position.x);
            assert!((a.position.y - b.position.y).abs() < 1e-3, "{} vs {}", a.position.y, b.position.y);
            assert_eq!(a.flap, b.flap);
        }
    }

    #[test]
    fn resize_moves_bounds() {
        let mut p = pool(7);
        assert_eq!(p.right_bound(), 10.0);
        p.resize(Viewport::new(12.0, 6.0));
        assert_eq!(p.right_bound(), 14.0);
    }
}
