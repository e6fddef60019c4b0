//! Engine configuration.

mod engine_config;

pub use engine_config::{EngineConfig, RatioPolicy};
