use serde::{Deserialize, Serialize};

/// Issue as returned by the Linear GraphQL API, with just the fields the
/// changelog pipeline needs.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Issue {
    pub identifier: String,
    pub title: String,
    pub url: Option<String>,
    pub state: WorkflowState,
    pub labels: LabelConnection,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WorkflowState {
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LabelConnection {
    pub nodes: Vec<LabelNode>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LabelNode {
    pub name: String,
}

impl Issue {
    /// Label names in the order the API delivered them.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.nodes.iter().map(|l| l.name.as_str())
    }
}

#[cfg(test)]
impl Issue {
    /// Test constructor; production issues come from deserialization only.
    pub fn stub(identifier: &str, title: &str, status: &str, labels: &[&str]) -> Self {
        Self {
            identifier: identifier.to_string(),
            title: title.to_string(),
            url: None,
            state: WorkflowState {
                name: status.to_string(),
            },
            labels: LabelConnection {
                nodes: labels
                    .iter()
                    .map(|name| LabelNode {
                        name: name.to_string(),
                    })
                    .collect(),
            },
        }
    }
}
