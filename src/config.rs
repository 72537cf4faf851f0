use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use log::debug;
use std::fs;

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// `false` never prompts, as if `--non-interactive` was passed.
    #[serde(default = "default_true")]
    pub interactive: bool,
}

fn default_true() -> bool { true }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { interactive: default_true() }
    }
}

/// Fallback values for fields the user left empty. Required fields have no
/// defaults.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub comment: Option<String>,
    pub icon: Option<String>,
    pub categories: Option<String>,
    pub app_type: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PathsConfig {
    pub local_dir: Option<PathBuf>,
    pub global_dir: Option<PathBuf>,
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "create-desktop-file", "create-desktop-file")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads the config from `explicit`, or from the default location when it
/// exists. An explicit path that is missing is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    debug!("Loading config from {:?}", config_path);
    let content = fs::read_to_string(&config_path).map_err(|e| Error::Config {
        path: config_path.clone(),
        message: e.to_string(),
    })?;
    parse_config(&content).map_err(|message| Error::Config {
        path: config_path,
        message,
    })
}

fn parse_config(content: &str) -> std::result::Result<Config, String> {
    toml::from_str(content).map_err(|e| e.to_string().trim().to_string())
}
