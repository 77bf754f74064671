//! Configuration loading and typed config structures for the Zappy server.
//!
//! Configuration comes from an optional YAML file (conventionally
//! `zappy.yaml`) whose values the command line may override. Every field
//! has a default, so an empty file or no file at all yields a playable
//! 10x10 two-team server.

use std::path::Path;

use serde::Deserialize;

use crate::clock::MAX_FREQUENCY;
use crate::command::OBSERVER_TOKEN;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of range or inconsistent.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// TCP port to listen on. 0 picks an ephemeral port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Map width in tiles.
    #[serde(default = "default_side")]
    pub width: u32,

    /// Map height in tiles.
    #[serde(default = "default_side")]
    pub height: u32,

    /// Team names, in announcement order.
    #[serde(default = "default_teams")]
    pub teams: Vec<String>,

    /// Capacity of every team.
    #[serde(default = "default_clients_per_team")]
    pub clients_per_team: u32,

    /// Time units per second.
    #[serde(default = "default_frequency")]
    pub frequency: u32,

    /// Seed for every random draw. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Gameplay tuning.
    #[serde(default)]
    pub game: GameConfig,

    /// Network tuning.
    #[serde(default)]
    pub network: NetworkConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            width: default_side(),
            height: default_side(),
            teams: default_teams(),
            clients_per_team: default_clients_per_team(),
            frequency: default_frequency(),
            seed: None,
            game: GameConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `ZAPPY_PORT` overrides `port` when set to a valid port number.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override values with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = std::env::var("ZAPPY_PORT").ok().and_then(|v| v.parse().ok()) {
            self.port = port;
        }
    }

    /// Check every bound the server relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| {
            Err(ConfigError::Invalid {
                reason: reason.to_owned(),
            })
        };
        if self.width == 0 || self.height == 0 {
            return invalid("width and height must be at least 1");
        }
        if self.clients_per_team == 0 {
            return invalid("clients per team must be at least 1");
        }
        if self.frequency == 0 || self.frequency > MAX_FREQUENCY {
            return Err(ConfigError::Invalid {
                reason: format!("frequency must be between 1 and {MAX_FREQUENCY}"),
            });
        }
        if self.teams.is_empty() {
            return invalid("at least one team is required");
        }
        for (i, name) in self.teams.iter().enumerate() {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid {
                    reason: format!("team name {name:?} must be non-empty without whitespace"),
                });
            }
            if name == OBSERVER_TOKEN {
                return Err(ConfigError::Invalid {
                    reason: format!("team name {OBSERVER_TOKEN} is reserved for observers"),
                });
            }
            if self.teams.iter().skip(i.saturating_add(1)).any(|other| other == name) {
                return Err(ConfigError::Invalid {
                    reason: format!("duplicate team name {name}"),
                });
            }
        }
        self.game.validate()?;
        self.network.validate()
    }
}

/// Gameplay tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Time units between two meals of every player.
    #[serde(default = "default_food_interval")]
    pub food_interval: u64,

    /// Time units between two spawner passes and win checks.
    #[serde(default = "default_refill_interval")]
    pub refill_interval: u64,

    /// Food a new player carries.
    #[serde(default = "default_starting_food")]
    pub starting_food: u32,

    /// Level a player must reach to count towards victory.
    #[serde(default = "default_win_level")]
    pub win_level: u8,

    /// Qualified players one team needs at once to win.
    #[serde(default = "default_win_players")]
    pub win_players: u32,
}

impl GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.food_interval == 0 || self.refill_interval == 0 {
            return Err(ConfigError::Invalid {
                reason: "food and refill intervals must be at least 1".to_owned(),
            });
        }
        if self.win_players == 0 {
            return Err(ConfigError::Invalid {
                reason: "win_players must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            food_interval: default_food_interval(),
            refill_interval: default_refill_interval(),
            starting_food: default_starting_food(),
            win_level: default_win_level(),
            win_players: default_win_players(),
        }
    }
}

/// Network tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
    /// Upper bound on how long the reactor waits between ticks.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Longest accepted line, in bytes. Longer lines drop the session.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,

    /// Milliseconds the server stays up after a team wins.
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl NetworkConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 || self.max_line_len == 0 {
            return Err(ConfigError::Invalid {
                reason: "poll interval and max line length must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_line_len: default_max_line_len(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_port() -> u16 {
    4242
}

const fn default_side() -> u32 {
    10
}

fn default_teams() -> Vec<String> {
    vec!["team1".to_owned(), "team2".to_owned()]
}

const fn default_clients_per_team() -> u32 {
    3
}

const fn default_frequency() -> u32 {
    100
}

const fn default_food_interval() -> u64 {
    1
}

const fn default_refill_interval() -> u64 {
    20
}

const fn default_starting_food() -> u32 {
    10
}

const fn default_win_level() -> u8 {
    8
}

const fn default_win_players() -> u32 {
    6
}

const fn default_poll_interval_ms() -> u64 {
    16
}

const fn default_max_line_len() -> usize {
    8192
}

const fn default_shutdown_grace_ms() -> u64 {
    5000
}
