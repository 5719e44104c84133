/// An issue after classification: ready to be grouped and rendered.
#[derive(Debug, Clone)]
pub struct ClassifiedIssue {
    pub identifier: String,
    pub title: String,
    pub url: String,
    pub category: String,
    pub domain_area: Option<String>,
    pub status_indicator: String,
    pub included: bool,
}
