//! Configuration file support
//!
//! Handles `.ghflow.toml` loading and required-key validation. The file is
//! read once per invocation; every command validates the sections it needs
//! before performing any mutation, so a missing key stops the run up front.

use crate::errors::WorkflowError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
const CONFIG_FILE_NAME: &str = ".ghflow.toml";

/// Default trunk branch used as rebase and PR base target
fn default_trunk() -> String {
    "main".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// GitHub configuration
    #[serde(default)]
    pub github: GitHubSection,

    /// Trello configuration
    #[serde(default)]
    pub trello: TrelloSection,
}

/// GitHub-related configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubSection {
    /// OAuth token (required)
    #[serde(default)]
    pub token: Option<String>,

    /// Target repository in owner/repo format (required)
    #[serde(default)]
    pub repository: Option<String>,

    /// Trunk branch name (default: "main")
    #[serde(default = "default_trunk")]
    pub trunk: String,
}

impl Default for GitHubSection {
    fn default() -> Self {
        Self {
            token: None,
            repository: None,
            trunk: default_trunk(),
        }
    }
}

/// Trello-related configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TrelloSection {
    /// API key (required for card commands)
    #[serde(default)]
    pub key: Option<String>,

    /// Member token (required for card commands)
    #[serde(default)]
    pub token: Option<String>,

    /// Board ids keyed by kind, e.g. `work = "abc123"`
    #[serde(default)]
    pub boards: BTreeMap<String, String>,
}

/// Validated GitHub settings, ready to build a client from
#[derive(Debug, Clone)]
pub struct GitHubSettings {
    pub token: String,
    pub repository: String,
    pub trunk: String,
}

/// Validated Trello credentials
#[derive(Debug, Clone)]
pub struct TrelloSettings {
    pub key: String,
    pub token: String,
}

impl Config {
    /// Load the configuration file from the current directory
    ///
    /// A missing file is a configuration error, not a silent default: every
    /// command needs at least the GitHub section.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Err(WorkflowError::ConfigMissing(CONFIG_FILE_NAME.to_string()).into());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from specified path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate and return the GitHub settings
    pub fn github(&self) -> Result<GitHubSettings, WorkflowError> {
        let token = self
            .github
            .token
            .clone()
            .ok_or_else(|| WorkflowError::ConfigMissing("github.token".to_string()))?;
        let repository = self
            .github
            .repository
            .clone()
            .ok_or_else(|| WorkflowError::ConfigMissing("github.repository".to_string()))?;

        Ok(GitHubSettings {
            token,
            repository,
            trunk: self.github.trunk.clone(),
        })
    }

    /// Validate and return the Trello credentials
    pub fn trello(&self) -> Result<TrelloSettings, WorkflowError> {
        let key = self
            .trello
            .key
            .clone()
            .ok_or_else(|| WorkflowError::ConfigMissing("trello.key".to_string()))?;
        let token = self
            .trello
            .token
            .clone()
            .ok_or_else(|| WorkflowError::ConfigMissing("trello.token".to_string()))?;

        Ok(TrelloSettings { key, token })
    }

    /// Look up the board id configured for a board kind
    ///
    /// Board selection is a plain key lookup in `[trello.boards]`; an unknown
    /// kind reports the exact key that needs to be added.
    pub fn board_id_for(&self, kind: &str) -> Result<&str, WorkflowError> {
        self.trello
            .boards
            .get(kind)
            .map(String::as_str)
            .ok_or_else(|| WorkflowError::ConfigMissing(format!("trello.boards.{kind}")))
    }
}
