pub mod ambient;
pub mod chain;
pub mod emitter;
pub mod render;
pub mod tracker;
