use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolError};

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "yamusic-tools.toml";

/// Represents the complete configuration for yamusic-tools.
///
/// Every field has a default, so an empty or missing file reproduces the
/// fixed paths the tools have always used (`.env`, `version.txt`, `origin`).
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_api_base_url() -> String {
    "https://api.music.yandex.net".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_version_file() -> PathBuf {
    PathBuf::from("version.txt")
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Settings for the `get-id` and `verify` commands.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CredentialsConfig {
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        CredentialsConfig {
            env_file: default_env_file(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Settings for the `release` command.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            version_file: default_version_file(),
            remote: default_remote(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `yamusic-tools.toml` in current directory
/// 3. `yamusic-tools.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(CONFIG_FILE_NAME);
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ToolError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    parse_config(&config_str)
        .map_err(|e| ToolError::config(format!("Invalid '{}': {}", path.display(), e)))
}

/// Parses configuration from TOML text.
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(text)
}
