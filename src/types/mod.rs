mod classified;
mod issue;

pub use classified::ClassifiedIssue;
pub use issue::Issue;
