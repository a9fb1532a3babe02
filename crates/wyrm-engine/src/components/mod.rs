pub mod actor;
pub mod particle;
pub mod segment;
