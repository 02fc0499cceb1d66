mod settings;

pub use settings::{Config, ConfigError, GameConfig, EXAMPLE_CONFIG};
