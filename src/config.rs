use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{ReleaseError, Result};

const DEFAULT_WORKSPACE_URL: &str = "https://linear.app/your-workspace";

#[derive(Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub workspace_url: Option<String>,
    pub notion_token: Option<String>,
    pub notion_database_id: Option<String>,
    pub notion_parent_page_id: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| ReleaseError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| ReleaseError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "relnotes")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(ReleaseError::NoConfigDir)
    }

    /// Get Linear API key with env var taking precedence over config file
    pub fn api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var("LINEAR_API_KEY") {
            return Ok(key);
        }

        self.api_key.clone().ok_or(ReleaseError::MissingApiKey)
    }

    /// Workspace base URL used to synthesize issue links when the API
    /// returns none. Validated so a typo fails up front, not per issue.
    pub fn workspace_url(&self) -> Result<String> {
        let raw = std::env::var("LINEAR_WORKSPACE_URL")
            .ok()
            .or_else(|| self.workspace_url.clone())
            .unwrap_or_else(|| DEFAULT_WORKSPACE_URL.to_string());

        Url::parse(&raw).map_err(|_| ReleaseError::InvalidWorkspaceUrl(raw.clone()))?;

        Ok(raw.trim_end_matches('/').to_string())
    }

    /// Notion token, required only when publishing
    pub fn notion_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var("NOTION_TOKEN") {
            return Ok(token);
        }

        self.notion_token
            .clone()
            .ok_or(ReleaseError::MissingNotionToken)
    }

    pub fn notion_database_id(&self) -> Option<String> {
        std::env::var("NOTION_DATABASE_ID")
            .ok()
            .or_else(|| self.notion_database_id.clone())
    }

    pub fn notion_parent_page_id(&self) -> Option<String> {
        std::env::var("NOTION_PARENT_PAGE_ID")
            .ok()
            .or_else(|| self.notion_parent_page_id.clone())
    }
}
