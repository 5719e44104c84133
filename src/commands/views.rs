use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::client::LinearClient;
use crate::error::Result;
use crate::output;
use crate::responses::Connection;

const LIST_TEAMS_QUERY: &str = r#"
query ListTeams {
    teams {
        nodes {
            id
            key
            name
        }
    }
}
"#;

#[derive(Deserialize)]
struct TeamsResponse {
    teams: Connection<Team>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Team {
    pub id: String,
    pub key: String,
    pub name: String,
}

#[derive(Tabled)]
struct ViewRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "View ID")]
    id: String,
}

impl ViewRow {
    fn from_team(team: &Team) -> Self {
        Self {
            key: team.key.clone(),
            name: format!("Team: {}", team.name),
            id: team.id.clone(),
        }
    }
}

/// List teams as selectable views for `generate --view`.
pub async fn list(client: &LinearClient) -> Result<()> {
    let response: TeamsResponse = client.query(LIST_TEAMS_QUERY, None).await?;
    let teams = response.teams.nodes;

    if teams.is_empty() {
        output::print_message("No teams found");
        return Ok(());
    }

    output::print_table(&teams, ViewRow::from_team);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teams_list_as_prefixed_views() {
        let team = Team {
            id: "abc123-view-id".to_string(),
            key: "ENG".to_string(),
            name: "Engineering".to_string(),
        };
        let row = ViewRow::from_team(&team);

        assert_eq!(row.key, "ENG");
        assert_eq!(row.name, "Team: Engineering");
        assert_eq!(row.id, "abc123-view-id");
    }
}
