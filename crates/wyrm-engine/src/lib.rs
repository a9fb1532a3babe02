pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{AmbientConfig, ChainConfig, ParticleConfig, SceneConfig, TrackerConfig, DEFAULT_SEED};
pub use api::error::ConfigError;
pub use components::actor::AmbientActor;
pub use components::particle::Particle;
pub use components::segment::Segment;
pub use core::rng::Rng;
pub use core::scene::WyrmScene;
pub use core::time::{FixedTimestep, FrameClock, RateMode, TimingConfig, REFERENCE_DT};
pub use renderer::instance::{ActorInstance, FrameBuffer, ParticleInstance, SegmentInstance};
pub use renderer::viewport::Viewport;
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::ambient::AmbientActorPool;
pub use systems::chain::ChainSolver;
pub use systems::emitter::ParticleEmitter;
pub use systems::render::build_frame_buffer;
pub use systems::tracker::SmoothedTracker;
