use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::is_valid_branch_name;
use crate::error::{GitManagerError, Result};

/// File name looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "gitmanager.toml";

/// Represents the complete configuration for git-manager.
///
/// Holds the remote name and the defaults offered by interactive prompts.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_count() -> usize {
    10
}

fn default_subject_width() -> usize {
    30
}

fn default_name_width() -> usize {
    20
}

fn default_fallback_branch() -> String {
    "main".to_string()
}

fn default_delete_confirmation_token() -> String {
    "DELETE".to_string()
}

/// Tag listing defaults and table layout.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_tag_count")]
    pub default_count: usize,

    /// Characters of the subject shown in the tag table
    #[serde(default = "default_subject_width")]
    pub subject_width: usize,

    #[serde(default = "default_name_width")]
    pub name_width: usize,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            default_count: default_tag_count(),
            subject_width: default_subject_width(),
            name_width: default_name_width(),
        }
    }
}

/// Configuration for interactive behavior.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Branch offered when the current branch cannot be queried
    #[serde(default = "default_fallback_branch")]
    pub fallback_branch: String,

    /// Word the user must type to confirm tag deletion
    #[serde(default = "default_delete_confirmation_token")]
    pub delete_confirmation_token: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            fallback_branch: default_fallback_branch(),
            delete_confirmation_token: default_delete_confirmation_token(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            tags: TagsConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Rejects values that would let a prompt or git invocation misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.behavior.delete_confirmation_token.trim().is_empty() {
            return Err(GitManagerError::config(
                "behavior.delete_confirmation_token must not be empty",
            ));
        }
        if !is_valid_branch_name(&self.behavior.fallback_branch) {
            return Err(GitManagerError::config(format!(
                "behavior.fallback_branch is not a valid branch name: {:?}",
                self.behavior.fallback_branch
            )));
        }
        if self.remote.trim().is_empty() || self.remote.starts_with('-') {
            return Err(GitManagerError::config(format!(
                "remote is not a valid remote name: {:?}",
                self.remote
            )));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        GitManagerError::config(format!("cannot read {}: {}", path.display(), e))
    })
}

/// Parses configuration from TOML text and validates it.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| GitManagerError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitmanager.toml` in current directory
/// 3. `.gitmanager.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(GitManagerError::Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local_path = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if local_path.exists() {
        read_config_file(&local_path)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            read_config_file(&user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
