use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use crate::classify::Classifier;
use crate::cli::GenerateArgs;
use crate::client::LinearClient;
use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::notes::{changelog_filename, ReleaseDocument};
use crate::notion::{Destination, NotionClient};
use crate::output;
use crate::responses::Connection;
use crate::taxonomy::Taxonomy;
use crate::types::Issue;

/// Non-subtask issues carrying the release label, exact match.
const ISSUES_BY_LABEL_QUERY: &str = r#"
query IssuesByReleaseLabel($releaseLabel: String!) {
    issues(filter: {
        labels: { name: { eq: $releaseLabel } },
        parent: { null: true }
    }) {
        nodes {
            identifier
            title
            url
            state {
                name
            }
            labels {
                nodes {
                    name
                }
            }
        }
    }
}
"#;

const ISSUES_BY_VIEW_QUERY: &str = r#"
query IssuesByView($viewId: String!) {
    customView(id: $viewId) {
        name
        issues {
            nodes {
                identifier
                title
                url
                state {
                    name
                }
                labels {
                    nodes {
                        name
                    }
                }
            }
        }
    }
}
"#;

#[derive(Deserialize)]
struct IssuesResponse {
    issues: Connection<Issue>,
}

#[derive(Deserialize)]
struct ViewResponse {
    #[serde(rename = "customView")]
    custom_view: Option<ViewData>,
}

#[derive(Deserialize)]
struct ViewData {
    name: String,
    issues: Connection<Issue>,
}

pub async fn run(client: &LinearClient, config: &Config, args: GenerateArgs) -> Result<()> {
    let (issues, release_title) = if let Some(view_id) = &args.view {
        let response: ViewResponse = client
            .query(ISSUES_BY_VIEW_QUERY, Some(json!({ "viewId": view_id })))
            .await?;

        let view = response
            .custom_view
            .ok_or_else(|| ReleaseError::ViewNotFound(view_id.clone()))?;

        (view.issues.nodes, format!("View: {}", view.name))
    } else {
        // clap guarantees label when --view is absent
        let label = args.label.as_deref().unwrap_or_default();
        let response: IssuesResponse = client
            .query(ISSUES_BY_LABEL_QUERY, Some(json!({ "releaseLabel": label })))
            .await?;

        (response.issues.nodes, label.to_string())
    };

    if issues.is_empty() {
        output::print_message(&format!("No issues found for '{release_title}'"));
        return Ok(());
    }

    let classifier = Classifier::new(Taxonomy::default(), config.workspace_url()?);
    let classified = issues.iter().map(|i| classifier.classify(i)).collect();

    let document = ReleaseDocument::build(
        &release_title,
        classified,
        classifier.taxonomy(),
        Local::now(),
    );

    if document.is_empty() {
        output::print_message(&format!(
            "All {} issues for '{release_title}' have excluded statuses; nothing to report",
            issues.len()
        ));
        return Ok(());
    }

    let text = document.render();

    if args.stdout {
        println!("{text}");
    } else {
        let dir = args.output.unwrap_or_else(|| PathBuf::from("."));
        let path = write_changelog(&dir, &release_title, &text)?;
        output::print_message(&format!(
            "Wrote {} issues to {}",
            document.issue_count(),
            path.display()
        ));
    }

    if args.publish {
        publish(config, &release_title, &text).await?;
    }

    Ok(())
}

/// Write the rendered document into `dir`, creating it if needed.
fn write_changelog(dir: &Path, release_title: &str, text: &str) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }

    let path = dir.join(changelog_filename(release_title));
    std::fs::write(&path, text)?;

    Ok(path)
}

/// Create or update the Notion page for this release. Publishing the same
/// release twice updates the existing page rather than duplicating it.
async fn publish(config: &Config, release_title: &str, text: &str) -> Result<()> {
    let notion = NotionClient::new(config.notion_token()?);
    let database_id = config.notion_database_id();

    if let Some(page_id) = notion
        .find_existing_page(release_title, database_id.as_deref())
        .await?
    {
        notion.update_page(&page_id, text).await?;
        output::print_message(&format!(
            "Updated Notion page https://notion.so/{}",
            page_id.replace('-', "")
        ));
        return Ok(());
    }

    let destination = if let Some(db) = database_id {
        Destination::Database(db)
    } else if let Some(page) = config.notion_parent_page_id() {
        Destination::ParentPage(page)
    } else {
        return Err(ReleaseError::NoNotionDestination);
    };

    let page_id = notion
        .create_release_page(release_title, text, &destination)
        .await?;
    output::print_message(&format!(
        "Created Notion page https://notion.so/{}",
        page_id.replace('-', "")
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_changelog_creates_directory_and_sanitized_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/out");

        let path = write_changelog(&dir, "a/b:c", "# doc\n").unwrap();

        assert_eq!(path.file_name().unwrap(), "changelog-a-b-c.md");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# doc\n");
    }

    #[test]
    fn view_titles_get_the_view_prefix_in_the_filename() {
        let tmp = tempfile::tempdir().unwrap();

        let path = write_changelog(tmp.path(), "View: Team Alpha", "# doc\n").unwrap();

        assert_eq!(path.file_name().unwrap(), "changelog-View- Team Alpha.md");
    }
}
