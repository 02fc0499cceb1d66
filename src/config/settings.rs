use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::replay::EngineConfig;
use crate::util::paths::config_path;
use crate::web::ServerConfig;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Web server bind address
    pub server: ServerConfig,
    /// Replay engine limits
    pub engine: EngineConfig,
    /// Guessing game range
    pub game: GameConfig,
    /// Fixed seed for random draws (None = thread RNG)
    pub random_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub low: i64,
    pub high: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { low: 1, high: 100 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlEngineConfig {
    pub max_live_steps: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlGameConfig {
    pub low: Option<i64>,
    pub high: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlRandomConfig {
    pub seed: Option<u64>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub server: Option<TomlServerConfig>,
    pub engine: Option<TomlEngineConfig>,
    pub game: Option<TomlGameConfig>,
    pub random: Option<TomlRandomConfig>,
}

impl Config {
    /// Load from `path`, or from the default location when `path` is None.
    ///
    /// An explicit path must exist. The default location is created from the
    /// bundled example on first run and otherwise falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                path.to_path_buf()
            }
            None => {
                let default = config_path();
                if !default.exists() {
                    Self::create_default_config(&default);
                }
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&config_file).map_err(|source| ConfigError::Read {
            path: config_file.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: config_file.clone(),
                source,
            },
            other => other,
        })?;

        tracing::debug!(path = %config_file.display(), "Loaded configuration");
        Ok(config)
    }

    /// Merge TOML contents on top of the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig =
            toml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;

        let mut config = Config::default();

        if let Some(server) = toml_config.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
        }

        if let Some(engine) = toml_config.engine {
            if let Some(max_live_steps) = engine.max_live_steps {
                config.engine.max_live_steps = max_live_steps;
            }
        }

        if let Some(game) = toml_config.game {
            if let Some(low) = game.low {
                config.game.low = low;
            }
            if let Some(high) = game.high {
                config.game.high = high;
            }
        }

        if let Some(random) = toml_config.random {
            config.random_seed = random.seed;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.low > self.game.high {
            return Err(ConfigError::Invalid(format!(
                "game.low ({}) must not exceed game.high ({})",
                self.game.low, self.game.high
            )));
        }
        if self.engine.max_live_steps == 0 {
            return Err(ConfigError::Invalid(
                "engine.max_live_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_range(mut self, low: i64, high: i64) -> Self {
        self.game = GameConfig { low, high };
        self
    }
}
