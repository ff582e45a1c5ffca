pub mod config;
pub mod intent;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions};
pub use intent::Intent;
