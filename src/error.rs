use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Linear API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No API key found. Set LINEAR_API_KEY env var or add api_key to ~/.config/relnotes/config.toml"
    )]
    MissingApiKey,

    #[error(
        "No Notion token found. Set NOTION_TOKEN env var or add notion_token to ~/.config/relnotes/config.toml"
    )]
    MissingNotionToken,

    #[error("Invalid workspace URL '{0}'")]
    InvalidWorkspaceUrl(String),

    #[error("View not found: {0}")]
    ViewNotFound(String),

    #[error(
        "Notion destination not accessible ({code}): {message}. \
         Share the target page or database with your integration and try again."
    )]
    NotionPermission { code: String, message: String },

    #[error("Notion API error (status {status}): {message}")]
    NotionApi { status: u16, message: String },

    #[error("No Notion destination configured. Set NOTION_DATABASE_ID or NOTION_PARENT_PAGE_ID")]
    NoNotionDestination,
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
