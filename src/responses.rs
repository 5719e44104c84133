//! Shared GraphQL response types used across commands.

use serde::Deserialize;

/// Node container every Linear list query returns.
#[derive(Deserialize)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}
