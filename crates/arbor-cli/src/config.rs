use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

/// Errors raised while loading `arbor.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid log level {0:?}: expected trace, debug, info, warn, or error")]
    LogLevel(String),
}

/// Defaults for the `arbor` command. Command-line arguments take precedence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborConfig {
    pub initial_path: PathBuf,
    pub new_path: PathBuf,
    pub output_path: PathBuf,
    pub log_level: String,
}

impl Default for ArborConfig {
    fn default() -> Self {
        Self {
            initial_path: PathBuf::from("initial_tree.json"),
            new_path: PathBuf::from("new_tree.json"),
            output_path: PathBuf::from("order.json"),
            log_level: "info".into(),
        }
    }
}

impl ArborConfig {
    /// File looked up in the working directory when no `--config` is given.
    pub const FILE_NAME: &'static str = "arbor.toml";

    /// Load `explicit` if given, else `arbor.toml` if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(Self::FILE_NAME);
                if local.is_file() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level).map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
