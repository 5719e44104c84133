use colored::Colorize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::client::LinearClient;
use crate::error::Result;
use crate::output::{self, is_json_output, truncate};
use crate::responses::Connection;

const LIST_LABELS_QUERY: &str = r#"
query ListLabels {
    issueLabels {
        nodes {
            name
            createdAt
            description
        }
    }
}
"#;

#[derive(Deserialize)]
struct LabelsResponse {
    #[serde(rename = "issueLabels")]
    issue_labels: Connection<Label>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Label {
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub description: Option<String>,
}

#[derive(Tabled)]
struct LabelRow {
    #[tabled(rename = "Release")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl LabelRow {
    fn from_label(label: &Label) -> Self {
        Self {
            name: if is_json_output() {
                label.name.clone()
            } else {
                label.name.cyan().to_string()
            },
            created: label
                .created_at
                .split('T')
                .next()
                .unwrap_or(&label.created_at)
                .to_string(),
            description: truncate(label.description.as_deref().unwrap_or(""), 40),
        }
    }
}

/// Keep only labels that look like release versions (X.Y.Z) and sort them
/// newest first by numeric version.
fn release_labels(labels: Vec<Label>) -> Vec<Label> {
    let version_re = Regex::new(r"^\d+\.\d+\.\d+$").unwrap();

    let mut releases: Vec<Label> = labels
        .into_iter()
        .filter(|l| version_re.is_match(&l.name))
        .collect();

    releases.sort_by_key(|l| {
        let key: Vec<u64> = l
            .name
            .split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect();
        std::cmp::Reverse(key)
    });

    releases
}

pub async fn list(client: &LinearClient) -> Result<()> {
    let response: LabelsResponse = client.query(LIST_LABELS_QUERY, None).await?;
    let releases = release_labels(response.issue_labels.nodes);

    if releases.is_empty() {
        output::print_message("No release labels found");
        return Ok(());
    }

    output::print_table(&releases, LabelRow::from_label);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(name: &str) -> Label {
        Label {
            name: name.to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            description: None,
        }
    }

    #[test]
    fn non_version_labels_are_filtered_out() {
        let labels = vec![label("106.5.0"), label("Bug"), label("1.2"), label("v1.2.3")];
        let releases = release_labels(labels);

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].name, "106.5.0");
    }

    #[test]
    fn versions_sort_numerically_newest_first() {
        let labels = vec![
            label("2.0.0"),
            label("10.0.0"),
            label("2.10.0"),
            label("2.9.1"),
        ];
        let releases = release_labels(labels);

        let names: Vec<&str> = releases.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["10.0.0", "2.10.0", "2.9.1", "2.0.0"]);
    }
}
