use crate::errors::{Result, StackError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub github: GitHubConfig,
    pub stack: StackSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST endpoint; change for GitHub Enterprise
    pub api_url: String,
    /// Repository owner; detected from the remote when unset
    pub owner: Option<String>,
    /// Repository name; detected from the remote when unset
    pub repo: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackSettings {
    /// Base branch for PRs of untracked branches
    pub trunk: String,
    /// Remote that `submit` pushes to
    pub remote: String,
    /// Open new PRs as drafts
    pub draft: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            owner: None,
            repo: None,
            token: None,
        }
    }
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            trunk: "main".to_string(),
            remote: "origin".to_string(),
            draft: false,
        }
    }
}

/// Environment variables checked, in order, for a GitHub token
pub const TOKEN_ENV_VARS: [&str; 2] = ["GT_GITHUB_TOKEN", "GITHUB_TOKEN"];

impl Settings {
    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| StackError::config(format!("Failed to read config file: {e}")))?;

        let settings: Settings = serde_json::from_str(&content)
            .map_err(|e| StackError::config(format!("Failed to parse config file: {e}")))?;

        Ok(settings)
    }

    /// Save settings to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StackError::config(format!("Failed to create config directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StackError::config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content)
            .map_err(|e| StackError::config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Token from the environment, falling back to the config file
    pub fn github_token(&self) -> Option<String> {
        TOKEN_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .or_else(|| self.github.token.clone())
    }

    /// Update a configuration value by key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match split_key(key)? {
            ("github", "api_url") => self.github.api_url = value.to_string(),
            ("github", "owner") => self.github.owner = Some(value.to_string()),
            ("github", "repo") => self.github.repo = Some(value.to_string()),
            ("github", "token") => self.github.token = Some(value.to_string()),
            ("stack", "trunk") => self.stack.trunk = value.to_string(),
            ("stack", "remote") => self.stack.remote = value.to_string(),
            ("stack", "draft") => {
                self.stack.draft = value
                    .parse()
                    .map_err(|_| StackError::config(format!("Invalid boolean value: {value}")))?;
            }
            _ => return Err(StackError::config(format!("Unknown config key: {key}"))),
        }

        Ok(())
    }

    /// Get a configuration value by key
    pub fn get_value(&self, key: &str) -> Result<String> {
        let value = match split_key(key)? {
            ("github", "api_url") => self.github.api_url.clone(),
            ("github", "owner") => self.github.owner.clone().unwrap_or_default(),
            ("github", "repo") => self.github.repo.clone().unwrap_or_default(),
            ("github", "token") => self.github.token.clone().unwrap_or_default(),
            ("stack", "trunk") => self.stack.trunk.clone(),
            ("stack", "remote") => self.stack.remote.clone(),
            ("stack", "draft") => self.stack.draft.to_string(),
            _ => return Err(StackError::config(format!("Unknown config key: {key}"))),
        };

        Ok(value)
    }

    /// Reset a configuration value to its default
    pub fn unset_value(&mut self, key: &str) -> Result<()> {
        let defaults = Settings::default();
        match split_key(key)? {
            ("github", "api_url") => self.github.api_url = defaults.github.api_url,
            ("github", "owner") => self.github.owner = None,
            ("github", "repo") => self.github.repo = None,
            ("github", "token") => self.github.token = None,
            ("stack", "trunk") => self.stack.trunk = defaults.stack.trunk,
            ("stack", "remote") => self.stack.remote = defaults.stack.remote,
            ("stack", "draft") => self.stack.draft = defaults.stack.draft,
            _ => return Err(StackError::config(format!("Unknown config key: {key}"))),
        }

        Ok(())
    }

    /// Every key with its current value; the token is masked
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let token = match &self.github.token {
            Some(token) if !token.is_empty() => "********".to_string(),
            _ => String::new(),
        };

        vec![
            ("github.api_url", self.github.api_url.clone()),
            ("github.owner", self.github.owner.clone().unwrap_or_default()),
            ("github.repo", self.github.repo.clone().unwrap_or_default()),
            ("github.token", token),
            ("stack.trunk", self.stack.trunk.clone()),
            ("stack.remote", self.stack.remote.clone()),
            ("stack.draft", self.stack.draft.to_string()),
        ]
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.github.api_url.starts_with("http://") && !self.github.api_url.starts_with("https://")
        {
            return Err(StackError::config(
                "GitHub API URL must start with http:// or https://",
            ));
        }

        if self.stack.trunk.trim().is_empty() {
            return Err(StackError::config("Trunk branch cannot be empty"));
        }

        if self.stack.remote.trim().is_empty() {
            return Err(StackError::config("Remote cannot be empty"));
        }

        Ok(())
    }
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    key.split_once('.')
        .filter(|(section, name)| !section.is_empty() && !name.is_empty() && !name.contains('.'))
        .ok_or_else(|| StackError::config(format!("Invalid config key format: {key}")))
}
