use std::io::{self, Write};

use crate::config::Config;
use crate::error::{ReleaseError, Result};

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        print!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Release Notes Configuration");
    println!("===========================\n");

    let api_key = prompt("Linear API key (create one at https://linear.app/settings/api): ")?;
    if api_key.is_empty() {
        return Err(ReleaseError::MissingApiKey);
    }

    let workspace_url =
        prompt("Workspace URL (e.g., https://linear.app/acme) [optional]: ")?;
    let notion_token = prompt("Notion integration token [optional]: ")?;

    let mut notion_database_id = String::new();
    let mut notion_parent_page_id = String::new();
    if !notion_token.is_empty() {
        notion_database_id = prompt("Notion database id [optional]: ")?;
        notion_parent_page_id = prompt("Notion parent page id [optional]: ")?;
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ReleaseError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let mut config_content = format!("api_key = \"{api_key}\"\n");
    for (key, value) in [
        ("workspace_url", &workspace_url),
        ("notion_token", &notion_token),
        ("notion_database_id", &notion_database_id),
        ("notion_parent_page_id", &notion_parent_page_id),
    ] {
        if !value.is_empty() {
            config_content.push_str(&format!("{key} = \"{value}\"\n"));
        }
    }

    std::fs::write(&config_path, config_content).map_err(|e| ReleaseError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now run 'relnotes generate <release-label>'");

    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
