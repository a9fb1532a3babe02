use std::collections::VecDeque;

use glam::Vec3;

use crate::api::config::ParticleConfig;
use crate::components::particle::Particle;
use crate::core::rng::Rng;
use crate::core::time::TimingConfig;

/// Sheds drops from the head at a speed-dependent rate and keeps a bounded,
/// oldest-first pool of them in flight.
///
/// The spawn roll and the per-drop attributes come from separate streams, so for a
/// given seed the sequence of spawn decisions never depends on what was spawned.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    config: ParticleConfig,
    timing: TimingConfig,
    particles: VecDeque<Particle>,
    spawn_rng: Rng,
    attr_rng: Rng,
    spawned: u64,
    evicted: u64,
}

impl ParticleEmitter {
    pub fn new(config: ParticleConfig, timing: TimingConfig, seed: u64) -> Self {
        Self {
            config,
            timing,
            particles: VecDeque::with_capacity(config.max_particles),
            spawn_rng: Rng::new(seed.wrapping_add(7919)),
            attr_rng: Rng::new(seed.wrapping_add(104_729)),
            spawned: 0,
            evicted: 0,
        }
    }

    /// Probability of a spawn on one reference frame at `speed`.
    pub fn spawn_chance(&self, speed: f32) -> f32 {
        self.config.base_chance + speed * self.config.chance_gain
    }

    /// Roll for a spawn at `head`, then advance every live drop.
    /// Returns the drops still alive, oldest first.
    pub fn step(&mut self, head: Vec3, speed: f32, dt: f32) -> &VecDeque<Particle> {
        let frames = self.timing.scale(dt);
        let chance = self.timing.blend(self.spawn_chance(speed), dt);
        if self.spawn_rng.next_f32() < chance {
            self.spawn(head);
        }

        let decay = self.config.life_decay;
        self.particles.retain_mut(|p| p.tick(decay, frames));
        &self.particles
    }

    /// Add a drop at `position`, evicting the oldest ones beyond the cap.
    pub fn spawn(&mut self, position: Vec3) {
        while self.particles.len() >= self.config.max_particles.max(1) {
            self.particles.pop_front();
            self.evicted += 1;
            log::trace!("particle pool full, evicted oldest (total {})", self.evicted);
        }
        let gravity = self.attr_rng.jitter(self.config.gravity_min, self.config.gravity_jitter);
        self.particles.push_back(Particle::new(position, gravity));
        self.spawned += 1;
    }

    pub fn particles(&self) -> &VecDeque<Particle> {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.max_particles
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Drops spawned since creation or the last `reset`.
    pub fn spawned_total(&self) -> u64 {
        self.spawned
    }

    /// Drops removed by the retention cap rather than by running out of life.
    pub fn evicted_total(&self) -> u64 {
        self.evicted
    }

    /// Drop every particle. Counters and random streams are kept.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Back to the freshly constructed state for `seed`.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.config, self.timing, seed);
    }
}
