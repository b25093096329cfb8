use crate::error::{CiReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for ci-release.
///
/// Contains release settings (tag prefix, remote, pagination), the commit
/// grammar's content-filter rules, and changelog headings.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub grammar: GrammarConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_page_size() -> usize {
    100
}

/// Release mechanics: how tags are named, where they go, and how history
/// is paged.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReleaseConfig {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Repository URL used to build commit links; empty disables links
    #[serde(default)]
    pub repo_url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            tag_prefix: default_tag_prefix(),
            remote: default_remote(),
            page_size: default_page_size(),
            repo_url: String::new(),
        }
    }
}

fn default_ignored_types() -> Vec<String> {
    vec!["test".to_string()]
}

/// Commit grammar settings.
///
/// `ignored_types` lists the commit types whose blocks are excluded from
/// descriptions entirely; which keywords delimit such a block is a content
/// filter, so it lives in configuration rather than in the parser.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GrammarConfig {
    #[serde(default = "default_ignored_types")]
    pub ignored_types: Vec<String>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig {
            ignored_types: default_ignored_types(),
        }
    }
}

fn default_breaking_heading() -> String {
    "BREAKING CHANGES".to_string()
}

fn default_features_heading() -> String {
    "New Features".to_string()
}

fn default_fixes_heading() -> String {
    "Bug Fixes".to_string()
}

/// Changelog section headings, overridable per project.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChangelogConfig {
    #[serde(default = "default_breaking_heading")]
    pub breaking_heading: String,

    #[serde(default = "default_features_heading")]
    pub features_heading: String,

    #[serde(default = "default_fixes_heading")]
    pub fixes_heading: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            breaking_heading: default_breaking_heading(),
            features_heading: default_features_heading(),
            fixes_heading: default_fixes_heading(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `ci-release.toml` in current directory
/// 3. `.ci-release.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./ci-release.toml").exists() {
        fs::read_to_string("./ci-release.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".ci-release.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| CiReleaseError::config(format!("Invalid configuration: {}", e)))?;
    Ok(config)
}
