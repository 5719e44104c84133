use crate::taxonomy::Taxonomy;
use crate::types::{ClassifiedIssue, Issue};

/// Maps raw issues to classified ones using an injected taxonomy.
pub struct Classifier {
    taxonomy: Taxonomy,
    workspace_url: String,
}

impl Classifier {
    pub fn new(taxonomy: Taxonomy, workspace_url: String) -> Self {
        Self {
            taxonomy,
            workspace_url,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Classify one issue.
    ///
    /// Category and domain area use a first-match policy over the label
    /// sequence as delivered by the API; when an issue carries several
    /// mapped labels, source order decides. Status lookups are exact
    /// string matches.
    pub fn classify(&self, issue: &Issue) -> ClassifiedIssue {
        let category = issue
            .label_names()
            .find_map(|label| self.taxonomy.category_for_label(label))
            .unwrap_or(self.taxonomy.default_category())
            .to_string();

        let domain_area = issue
            .label_names()
            .find(|label| self.taxonomy.is_domain_area(label))
            .map(String::from);

        let status = &issue.state.name;

        ClassifiedIssue {
            identifier: issue.identifier.clone(),
            title: issue.title.clone(),
            url: issue.url.clone().unwrap_or_else(|| {
                format!("{}/issue/{}", self.workspace_url, issue.identifier)
            }),
            category,
            domain_area,
            status_indicator: self.taxonomy.indicator_for_status(status).to_string(),
            included: !self.taxonomy.is_excluded_status(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(
            Taxonomy::default(),
            "https://linear.app/acme".to_string(),
        )
    }

    #[test]
    fn feature_with_domain_label() {
        let issue = Issue::stub("ABC-123", "Add login", "Done", &["Feature", "Permissions"]);
        let classified = classifier().classify(&issue);

        assert_eq!(classified.category, "✨ New Features");
        assert_eq!(classified.domain_area.as_deref(), Some("Permissions"));
        assert_eq!(classified.status_indicator, "✅");
        assert!(classified.included);
    }

    #[test]
    fn cancelled_issue_is_excluded() {
        let issue = Issue::stub("ABC-999", "Old idea", "Cancelled", &[]);
        let classified = classifier().classify(&issue);

        assert!(!classified.included);
        assert_eq!(classified.category, "Other Changes");
    }

    #[test]
    fn unmapped_labels_fall_back_to_default_category() {
        let issue = Issue::stub("ABC-1", "Misc", "Done", &["Release 1.2.3", "Urgent"]);
        let classified = classifier().classify(&issue);

        assert_eq!(classified.category, "Other Changes");
        assert_eq!(classified.domain_area, None);
    }

    #[test]
    fn first_mapped_label_wins() {
        let issue = Issue::stub("ABC-2", "Fix it", "Done", &["Improvement", "Bug"]);
        assert_eq!(classifier().classify(&issue).category, "⚡ Improvements");

        let reversed = Issue::stub("ABC-2", "Fix it", "Done", &["Bug", "Improvement"]);
        assert_eq!(classifier().classify(&reversed).category, "🐛 Bug Fixes");
    }

    #[test]
    fn first_domain_area_wins_and_only_one_attaches() {
        let issue = Issue::stub("ABC-3", "Rework", "Done", &["Forms", "Uploader"]);
        let classified = classifier().classify(&issue);

        assert_eq!(classified.domain_area.as_deref(), Some("Forms"));
    }

    #[test]
    fn unknown_status_yields_empty_indicator() {
        let issue = Issue::stub("ABC-4", "Odd state", "Blocked", &["Bug"]);
        let classified = classifier().classify(&issue);

        assert_eq!(classified.status_indicator, "");
        assert!(classified.included);
    }

    #[test]
    fn missing_url_is_synthesized_from_workspace() {
        let issue = Issue::stub("ABC-5", "No link", "Done", &[]);
        let classified = classifier().classify(&issue);

        assert_eq!(classified.url, "https://linear.app/acme/issue/ABC-5");
    }

    #[test]
    fn source_url_is_kept_when_present() {
        let mut issue = Issue::stub("ABC-6", "Linked", "Done", &[]);
        issue.url = Some("https://linear.app/acme/issue/ABC-6/linked".to_string());
        let classified = classifier().classify(&issue);

        assert_eq!(classified.url, "https://linear.app/acme/issue/ABC-6/linked");
    }
}
