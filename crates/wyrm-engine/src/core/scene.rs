use std::collections::VecDeque;

use glam::{Vec2, Vec3};

use crate::api::config::SceneConfig;
use crate::api::error::ConfigError;
use crate::components::actor::AmbientActor;
use crate::components::particle::Particle;
use crate::components::segment::Segment;
use crate::core::time::FrameClock;
use crate::renderer::viewport::Viewport;
use crate::systems::ambient::AmbientActorPool;
use crate::systems::chain::ChainSolver;
use crate::systems::emitter::ParticleEmitter;
use crate::systems::tracker::SmoothedTracker;

/// The whole animated scene: one chain, its drops, and the background flyers.
///
/// All state is allocated in `new` and mutated in place by `update`.
pub struct WyrmScene {
    config: SceneConfig,
    viewport: Viewport,
    clock: FrameClock,
    tracker: SmoothedTracker,
    chain: ChainSolver,
    emitter: ParticleEmitter,
    ambient: AmbientActorPool,
    /// Last raw pointer target, in scene space.
    target: Vec3,
}

impl WyrmScene {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed();
        let timing = config.timing;

        let scene = Self {
            viewport: config.viewport,
            clock: FrameClock::new(),
            tracker: SmoothedTracker::new(config.tracker, timing, Vec3::ZERO),
            chain: ChainSolver::new(config.chain, Vec3::ZERO)?,
            emitter: ParticleEmitter::new(config.particles, timing, seed),
            ambient: AmbientActorPool::new(config.ambient, timing, config.viewport, seed),
            target: Vec3::ZERO,
            config,
        };
        log::info!(
            "scene created: {} segments, {} max particles, {} ambient actors, seed {}",
            scene.chain.len(),
            scene.emitter.capacity(),
            scene.ambient.actors().len(),
            seed
        );
        Ok(scene)
    }

    /// Run one tick toward `raw_target`:
    /// clock, tracker, chain, emitter, then ambient actors.
    pub fn update(&mut self, dt: f32, raw_target: Vec3) {
        self.target = raw_target;
        let time = self.clock.advance(dt);
        let (head, speed) = self.tracker.update(raw_target, dt);
        self.chain.propagate(head, speed, time);
        self.emitter.step(head, speed, dt);
        self.ambient.step(dt, time);
    }

    /// Run one tick toward the last pointer target.
    pub fn tick(&mut self, dt: f32) {
        self.update(dt, self.target);
    }

    /// Aim at a pointer given in normalized device coordinates.
    pub fn set_pointer_ndc(&mut self, x: f32, y: f32) {
        self.target = self.viewport.ndc_to_scene(Vec2::new(x, y));
    }

    /// Aim at a point already in scene space.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let mut viewport = self.viewport;
        viewport.resize(width, height);
        if !viewport.is_valid() {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.viewport = viewport;
        self.ambient.resize(viewport);
    }

    /// Restart from the initial state (same seed, current viewport).
    pub fn reset(&mut self) {
        let seed = self.config.seed();
        self.clock.reset();
        self.tracker.reset(Vec3::ZERO);
        self.chain.reset(Vec3::ZERO);
        self.emitter.reset(seed);
        self.ambient.reset(seed);
        self.target = Vec3::ZERO;
        log::info!("scene reset");
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn speed(&self) -> f32 {
        self.tracker.speed()
    }

    pub fn chain(&self) -> &ChainSolver {
        &self.chain
    }

    pub fn segments(&self) -> &[Segment] {
        self.chain.segments()
    }

    pub fn emitter(&self) -> &ParticleEmitter {
        &self.emitter
    }

    pub fn particles(&self) -> &VecDeque<Particle> {
        self.emitter.particles()
    }

    pub fn actors(&self) -> &[AmbientActor] {
        self.ambient.actors()
    }
}
