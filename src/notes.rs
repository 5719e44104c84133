//! Aggregation and rendering of the release notes document.

use chrono::{DateTime, Local};

use crate::taxonomy::Taxonomy;
use crate::types::ClassifiedIssue;

/// Characters not allowed in output filenames.
const FILENAME_UNSAFE: &[char] = &['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

pub struct ReleaseDocument {
    pub release_label: String,
    pub generated_at: DateTime<Local>,
    sections: Vec<Section>,
}

struct Section {
    category: String,
    issues: Vec<ClassifiedIssue>,
}

impl ReleaseDocument {
    /// Group classified issues into categories.
    ///
    /// Categories follow the taxonomy's declared order with the default
    /// category last; within a category, fetch order is preserved. Excluded
    /// issues are dropped and categories left empty produce no section.
    pub fn build(
        release_label: &str,
        issues: Vec<ClassifiedIssue>,
        taxonomy: &Taxonomy,
        generated_at: DateTime<Local>,
    ) -> Self {
        let included: Vec<ClassifiedIssue> =
            issues.into_iter().filter(|i| i.included).collect();

        let sections = taxonomy
            .category_order()
            .into_iter()
            .map(|category| Section {
                category: category.to_string(),
                issues: included
                    .iter()
                    .filter(|i| i.category == category)
                    .cloned()
                    .collect(),
            })
            .filter(|section| !section.issues.is_empty())
            .collect();

        Self {
            release_label: release_label.to_string(),
            generated_at,
            sections,
        }
    }

    /// True when no issues survived filtering. The caller reports this as
    /// an informational no-content outcome, not a failure.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.sections.iter().map(|s| s.issues.len()).sum()
    }

    /// Render to Markdown. A document with no sections still renders its
    /// title and timestamp so the output is always a valid document.
    pub fn render(&self) -> String {
        let mut out = format!("# 🚀 Release Notes - {}\n\n", self.release_label);
        out.push_str(&format!(
            "*Generated on {}*\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));

        for section in &self.sections {
            out.push_str(&format!("## {}\n\n", section.category));

            for issue in &section.issues {
                out.push_str(&format!(
                    "- {} **{}** ([{}]({}))",
                    issue.status_indicator, issue.title, issue.identifier, issue.url
                ));
                if let Some(area) = &issue.domain_area {
                    out.push_str(&format!(" [{area}]"));
                }
                out.push('\n');
            }

            out.push('\n');
        }

        out
    }
}

/// Deterministic output filename for a release label. Path and shell
/// metacharacters are replaced with `-`.
pub fn changelog_filename(release_label: &str) -> String {
    let sanitized: String = release_label
        .chars()
        .map(|c| if FILENAME_UNSAFE.contains(&c) { '-' } else { c })
        .collect();
    format!("changelog-{sanitized}.md")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn classified(
        identifier: &str,
        title: &str,
        category: &str,
        domain_area: Option<&str>,
        indicator: &str,
        included: bool,
    ) -> ClassifiedIssue {
        ClassifiedIssue {
            identifier: identifier.to_string(),
            title: title.to_string(),
            url: format!("https://linear.app/acme/issue/{identifier}"),
            category: category.to_string(),
            domain_area: domain_area.map(String::from),
            status_indicator: indicator.to_string(),
            included,
        }
    }

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn categories_follow_declared_order_with_default_last() {
        let issues = vec![
            classified("A-1", "misc", "Other Changes", None, "✅", true),
            classified("A-2", "feat", "✨ New Features", None, "✅", true),
            classified("A-3", "fix", "🐛 Bug Fixes", None, "✅", true),
        ];
        let doc = ReleaseDocument::build("1.0.0", issues, &Taxonomy::default(), timestamp());
        let text = doc.render();

        let bugs = text.find("## 🐛 Bug Fixes").unwrap();
        let features = text.find("## ✨ New Features").unwrap();
        let other = text.find("## Other Changes").unwrap();
        assert!(bugs < features && features < other);
    }

    #[test]
    fn fetch_order_is_preserved_within_a_category() {
        let issues = vec![
            classified("A-9", "second fix", "🐛 Bug Fixes", None, "✅", true),
            classified("A-1", "first fix", "🐛 Bug Fixes", None, "✅", true),
        ];
        let doc = ReleaseDocument::build("1.0.0", issues, &Taxonomy::default(), timestamp());
        let text = doc.render();

        assert!(text.find("second fix").unwrap() < text.find("first fix").unwrap());
    }

    #[test]
    fn excluded_issues_never_render() {
        let issues = vec![
            classified("A-1", "kept", "🐛 Bug Fixes", None, "✅", true),
            classified("A-2", "dropped", "🐛 Bug Fixes", None, "", false),
        ];
        let doc = ReleaseDocument::build("1.0.0", issues, &Taxonomy::default(), timestamp());
        let text = doc.render();

        assert!(text.contains("kept"));
        assert!(!text.contains("dropped"));
        assert_eq!(doc.issue_count(), 1);
    }

    #[test]
    fn empty_categories_are_omitted() {
        let issues = vec![classified("A-1", "fix", "🐛 Bug Fixes", None, "✅", true)];
        let doc = ReleaseDocument::build("1.0.0", issues, &Taxonomy::default(), timestamp());
        let text = doc.render();

        assert!(text.contains("## 🐛 Bug Fixes"));
        assert!(!text.contains("## ✨ New Features"));
        assert!(!text.contains("## Other Changes"));
    }

    #[test]
    fn bullet_grammar_is_exact() {
        let issues = vec![classified(
            "ABC-123",
            "Add login",
            "✨ New Features",
            Some("Permissions"),
            "✅",
            true,
        )];
        let doc = ReleaseDocument::build("106.5.0", issues, &Taxonomy::default(), timestamp());

        assert_eq!(
            doc.render(),
            "# 🚀 Release Notes - 106.5.0\n\n\
             *Generated on 2024-05-01 12:00:00*\n\n\
             ## ✨ New Features\n\n\
             - ✅ **Add login** ([ABC-123](https://linear.app/acme/issue/ABC-123)) [Permissions]\n\n"
        );
    }

    #[test]
    fn no_domain_area_means_no_suffix_and_no_trailing_space() {
        let issues = vec![classified("A-1", "fix", "🐛 Bug Fixes", None, "✅", true)];
        let doc = ReleaseDocument::build("1.0.0", issues, &Taxonomy::default(), timestamp());
        let text = doc.render();

        assert!(text.contains("([A-1](https://linear.app/acme/issue/A-1))\n"));
        assert!(!text.contains(")) \n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let issues = vec![
            classified("A-1", "fix", "🐛 Bug Fixes", Some("Forms"), "✅", true),
            classified("A-2", "feat", "✨ New Features", None, "🔶", true),
        ];
        let doc = ReleaseDocument::build("1.0.0", issues, &Taxonomy::default(), timestamp());

        assert_eq!(doc.render(), doc.render());
    }

    #[test]
    fn zero_issues_render_header_only() {
        let doc = ReleaseDocument::build("2.0.0", vec![], &Taxonomy::default(), timestamp());

        assert!(doc.is_empty());
        assert_eq!(
            doc.render(),
            "# 🚀 Release Notes - 2.0.0\n\n*Generated on 2024-05-01 12:00:00*\n\n"
        );
    }

    #[test]
    fn filename_sanitizes_unsafe_characters() {
        assert_eq!(changelog_filename("a/b:c"), "changelog-a-b-c.md");
        assert_eq!(changelog_filename("106.5.0"), "changelog-106.5.0.md");
        assert_eq!(
            changelog_filename(r#"a\b?c%d*e|f"g<h>i"#),
            "changelog-a-b-c-d-e-f-g-h-i.md"
        );
    }
}
