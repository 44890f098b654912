use std::env;
use std::path::PathBuf;

use tracing::Level;

use crate::error::Error;

pub const STORE_PATH_VAR: &str = "PRISM_STORE_PATH";
pub const LOG_LEVEL_VAR: &str = "PRISM_LOG_LEVEL";

const DEFAULT_STORE_PATH: &str = "prism_campaigns.json";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub store_path: PathBuf,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_level: Level::INFO,
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Config, Error> {
        dotenvy::dotenv().ok();

        Config::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = var(STORE_PATH_VAR).filter(|path| !path.trim().is_empty()) {
            config.store_path = PathBuf::from(path);
        }

        if let Some(level) = var(LOG_LEVEL_VAR) {
            config.log_level = level.trim().parse().map_err(|_| Error::InvalidConfig {
                key: LOG_LEVEL_VAR,
                value: level.clone(),
            })?;
        }

        Ok(config)
    }
}
