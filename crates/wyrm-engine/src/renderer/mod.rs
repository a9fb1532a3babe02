pub mod instance;
pub mod viewport;
