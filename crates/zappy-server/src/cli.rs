//! Command-line arguments.
//!
//! Flags override whatever the YAML file says. Without `--config`, a
//! `zappy.yaml` in the working directory is used when present.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use zappy_core::ServerConfig;

use crate::error::ServerError;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "zappy.yaml";

/// Command-line arguments of `zappy-server`.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Zappy multiplayer simulation server", long_about = None)]
pub struct Args {
    /// TCP port to listen on.
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Map width in tiles.
    #[arg(short = 'x', long)]
    pub width: Option<u32>,

    /// Map height in tiles.
    #[arg(short = 'y', long)]
    pub height: Option<u32>,

    /// Team names.
    #[arg(short = 'n', long = "names", num_args = 1..)]
    pub names: Vec<String>,

    /// Maximum number of clients per team.
    #[arg(short = 'c', long = "clients")]
    pub clients: Option<u32>,

    /// Time units per second.
    #[arg(short = 'f', long = "freq")]
    pub freq: Option<u32>,

    /// Seed for every random draw, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Build the validated configuration: file (or defaults), then flags.
    pub fn into_config(self) -> Result<ServerConfig, ServerError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                ServerConfig::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => {
                info!("Config file not found, using defaults");
                let mut config = ServerConfig::default();
                config.apply_env_overrides();
                config
            }
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overwrite the fields given on the command line.
    pub fn apply(self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if !self.names.is_empty() {
            config.teams = self.names;
        }
        if let Some(clients) = self.clients {
            config.clients_per_team = clients;
        }
        if let Some(freq) = self.freq {
            config.frequency = freq;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn short_flags_override_defaults() {
        let args = Args::try_parse_from([
            "zappy-server", "-p", "5000", "-x", "20", "-y", "15", "-n", "red", "blue", "green",
            "-c", "4", "-f", "50",
        ])
        .unwrap();
        let mut config = ServerConfig::default();
        args.apply(&mut config);
        assert_eq!(config.port, 5000);
        assert_eq!((config.width, config.height), (20, 15));
        assert_eq!(config.teams, ["red", "blue", "green"]);
        assert_eq!(config.clients_per_team, 4);
        assert_eq!(config.frequency, 50);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let args = Args::try_parse_from(["zappy-server", "--seed", "9"]).unwrap();
        let mut config = ServerConfig::parse("width: 30\nteams: [a]\n").unwrap();
        args.apply(&mut config);
        assert_eq!(config.width, 30);
        assert_eq!(config.teams, ["a"]);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn names_need_a_value() {
        assert!(Args::try_parse_from(["zappy-server", "-n"]).is_err());
        assert!(Args::try_parse_from(["zappy-server", "-p", "notaport"]).is_err());
    }

    #[test]
    fn invalid_flags_fail_validation() {
        let args = Args {
            freq: Some(0),
            config: Some(PathBuf::from("/nonexistent/zappy.yaml")),
            ..Args::default()
        };
        assert!(matches!(args.into_config(), Err(ServerError::Config { .. })));

        let args = Args {
            names: vec!["GRAPHIC".to_owned()],
            ..Args::default()
        };
        assert!(matches!(args.into_config(), Err(ServerError::Config { .. })));
    }
}
