//! Classification tables: label-to-category mapping, domain areas, status
//! indicators and excluded statuses.
//!
//! The tables live in an immutable [`Taxonomy`] value handed to the
//! classifier at construction time, so tests can swap in alternate tables
//! without process-wide state.

pub const DEFAULT_CATEGORY: &str = "Other Changes";

/// Label-to-category mapping. Declaration order here is also the order
/// categories appear in the rendered document.
const CATEGORY_MAPPINGS: &[(&str, &str)] = &[
    ("Bug", "🐛 Bug Fixes"),
    ("Feature", "✨ New Features"),
    ("Improvement", "⚡ Improvements"),
    ("Documentation", "📚 Documentation"),
    ("Refactor", "🔧 Refactoring"),
    ("Performance", "🚀 Performance Improvements"),
];

const DOMAIN_AREAS: &[&str] = &[
    "Activity",
    "Administration",
    "Assets",
    "End of Trial",
    "Forms",
    "Manage Area",
    "Media Player",
    "Notifications",
    "Permissions",
    "Reporting",
    "Study Events / Visit",
    "Study Procedures / Assessment",
    "Subjects",
    "Trial Configuration",
    "Uploader",
];

const STATUS_INDICATORS: &[(&str, &str)] = &[
    ("Completed", "✅"),
    ("Done", "✅"),
    ("Fixed", "✅"),
    ("Resolved", "✅"),
    ("Started", "🔶"),
    ("In Progress", "🔶"),
    ("Code Review", "🔶"),
    ("Ready for Product", "🔍"),
    ("Product Review", "🔍"),
    ("Ready for Testing", "🔍"),
    ("Testing", "🔍"),
    ("Backlog", "◻️"),
    ("Unstarted", "◻️"),
    ("Todo", "◻️"),
];

const EXCLUDED_STATUSES: &[&str] = &["Canceled", "Cancelled", "Duplicate"];

pub struct Taxonomy {
    categories: Vec<(String, String)>,
    domain_areas: Vec<String>,
    status_indicators: Vec<(String, String)>,
    excluded_statuses: Vec<String>,
    default_category: String,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(
            CATEGORY_MAPPINGS
                .iter()
                .map(|(l, c)| (l.to_string(), c.to_string()))
                .collect(),
            DOMAIN_AREAS.iter().map(|s| s.to_string()).collect(),
            STATUS_INDICATORS
                .iter()
                .map(|(s, e)| (s.to_string(), e.to_string()))
                .collect(),
            EXCLUDED_STATUSES.iter().map(|s| s.to_string()).collect(),
            DEFAULT_CATEGORY.to_string(),
        )
    }
}

impl Taxonomy {
    pub fn new(
        categories: Vec<(String, String)>,
        domain_areas: Vec<String>,
        status_indicators: Vec<(String, String)>,
        excluded_statuses: Vec<String>,
        default_category: String,
    ) -> Self {
        Self {
            categories,
            domain_areas,
            status_indicators,
            excluded_statuses,
            default_category,
        }
    }

    /// Category mapped to a label, if any.
    pub fn category_for_label(&self, label: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| c.as_str())
    }

    pub fn is_domain_area(&self, label: &str) -> bool {
        self.domain_areas.iter().any(|a| a == label)
    }

    /// Indicator for a status name; unknown statuses get an empty string.
    pub fn indicator_for_status(&self, status: &str) -> &str {
        self.status_indicators
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, e)| e.as_str())
            .unwrap_or("")
    }

    /// Exact, case-sensitive match against the excluded-status list.
    pub fn is_excluded_status(&self, status: &str) -> bool {
        self.excluded_statuses.iter().any(|s| s == status)
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Document order: every mapped category in table-declaration order,
    /// then the default category last.
    pub fn category_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = self.categories.iter().map(|(_, c)| c.as_str()).collect();
        order.push(self.default_category.as_str());
        order
    }
}
