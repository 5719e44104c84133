//! Notion publisher: turns a rendered release notes document into page
//! blocks and creates or updates a page under the configured destination.

use chrono::Local;
use regex::Regex;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

use crate::client::REQUEST_TIMEOUT;
use crate::error::{ReleaseError, Result};

const API_ENDPOINT: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion rejects children arrays larger than this in one request.
const MAX_BLOCKS_PER_REQUEST: usize = 100;

/// Where new release pages are created.
pub enum Destination {
    Database(String),
    ParentPage(String),
}

pub struct NotionClient {
    http: Client,
    token: String,
}

impl NotionClient {
    pub fn new(token: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            token,
        }
    }

    /// Title used both when creating a page and when searching for one,
    /// which is what makes republishing the same release an update.
    pub fn page_title(release_label: &str) -> String {
        format!("Release Notes - {release_label}")
    }

    /// Create a new release notes page. Returns the page id.
    pub async fn create_release_page(
        &self,
        release_label: &str,
        markdown: &str,
        destination: &Destination,
    ) -> Result<String> {
        let blocks = markdown_to_blocks(markdown);
        let mut chunks = blocks.chunks(MAX_BLOCKS_PER_REQUEST);
        let first_chunk = chunks.next().unwrap_or_default();

        let body = match destination {
            Destination::Database(id) => json!({
                "parent": { "database_id": id },
                "properties": database_page_properties(release_label, markdown),
                "children": first_chunk,
            }),
            // Pages under a plain parent page only accept the title property.
            Destination::ParentPage(id) => json!({
                "parent": { "page_id": id },
                "properties": {
                    "title": {
                        "title": [{ "text": { "content": Self::page_title(release_label) } }]
                    }
                },
                "children": first_chunk,
            }),
        };

        let page = self.request(Method::POST, "/pages", Some(body)).await?;
        let page_id = page["id"].as_str().unwrap_or_default().to_string();

        for chunk in chunks {
            self.append_blocks(&page_id, chunk).await?;
        }

        Ok(page_id)
    }

    /// Find an existing page for a release. Searches the database when one
    /// is configured, the whole workspace otherwise.
    pub async fn find_existing_page(
        &self,
        release_label: &str,
        database_id: Option<&str>,
    ) -> Result<Option<String>> {
        let title = Self::page_title(release_label);

        let results = if let Some(db) = database_id {
            let body = json!({
                "filter": {
                    "property": "Name",
                    "title": { "equals": title }
                }
            });
            self.request(Method::POST, &format!("/databases/{db}/query"), Some(body))
                .await?
        } else {
            let body = json!({
                "query": title,
                "filter": { "property": "object", "value": "page" }
            });
            self.request(Method::POST, "/search", Some(body)).await?
        };

        Ok(results["results"]
            .as_array()
            .and_then(|pages| pages.first())
            .and_then(|page| page["id"].as_str())
            .map(String::from))
    }

    /// Replace a page's content with a freshly rendered document.
    pub async fn update_page(&self, page_id: &str, markdown: &str) -> Result<()> {
        // Notion has no bulk replace; clear the old blocks one by one,
        // then append the new ones.
        for block_id in self.list_child_block_ids(page_id).await? {
            self.request(Method::DELETE, &format!("/blocks/{block_id}"), None)
                .await?;
        }

        let blocks = markdown_to_blocks(markdown);
        for chunk in blocks.chunks(MAX_BLOCKS_PER_REQUEST) {
            self.append_blocks(page_id, chunk).await?;
        }

        Ok(())
    }

    async fn append_blocks(&self, page_id: &str, blocks: &[Value]) -> Result<()> {
        let body = json!({ "children": blocks });
        self.request(
            Method::PATCH,
            &format!("/blocks/{page_id}/children"),
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn list_child_block_ids(&self, page_id: &str) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut path = format!("/blocks/{page_id}/children?page_size=100");
            if let Some(c) = &cursor {
                path.push_str(&format!("&start_cursor={c}"));
            }

            let response = self.request(Method::GET, &path, None).await?;

            if let Some(blocks) = response["results"].as_array() {
                ids.extend(
                    blocks
                        .iter()
                        .filter_map(|b| b["id"].as_str())
                        .map(String::from),
                );
            }

            if response["has_more"].as_bool() == Some(true) {
                cursor = response["next_cursor"].as_str().map(String::from);
            } else {
                return Ok(ids);
            }
        }
    }

    /// Send a request and map Notion failures onto the error taxonomy:
    /// permission and not-found responses need user action (sharing the
    /// destination with the integration) and get their own variant.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = self
            .http
            .request(method, format!("{API_ENDPOINT}{path}"))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION)
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let payload: Value = response.json().await.unwrap_or(Value::Null);
        let code = payload["code"].as_str().unwrap_or("").to_string();
        let message = payload["message"]
            .as_str()
            .unwrap_or("<no error message>")
            .to_string();

        if status == StatusCode::FORBIDDEN
            || status == StatusCode::NOT_FOUND
            || code == "object_not_found"
            || code == "restricted_resource"
        {
            Err(ReleaseError::NotionPermission { code, message })
        } else {
            Err(ReleaseError::NotionApi {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn database_page_properties(release_label: &str, markdown: &str) -> Value {
    let mut properties = json!({
        "Name": {
            "title": [{ "text": { "content": NotionClient::page_title(release_label) } }]
        },
        "Version": {
            "rich_text": [{ "text": { "content": release_label } }]
        },
        "Date": {
            "date": { "start": Local::now().to_rfc3339() }
        },
        "Status": {
            "select": { "name": "Published" }
        }
    });

    let categories = extract_categories(markdown);
    if !categories.is_empty() {
        properties["Categories"] = json!({
            "multi_select": categories
                .iter()
                .map(|c| json!({ "name": c }))
                .collect::<Vec<_>>()
        });
    }

    properties
}

/// Convert the rendered Markdown into Notion blocks: headings 1-3,
/// bulleted list items (first inline link lifted into a rich-text link)
/// and plain paragraphs. Blank lines produce no block.
pub fn markdown_to_blocks(markdown: &str) -> Vec<Value> {
    let link_re = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
    let mut blocks = Vec::new();

    for line in markdown.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(text) = line.strip_prefix("# ") {
            blocks.push(heading_block("heading_1", text));
        } else if let Some(text) = line.strip_prefix("## ") {
            blocks.push(heading_block("heading_2", text));
        } else if let Some(text) = line.strip_prefix("### ") {
            blocks.push(heading_block("heading_3", text));
        } else if let Some(text) = line.strip_prefix("- ") {
            blocks.push(bullet_block(text, &link_re));
        } else {
            blocks.push(json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{ "text": { "content": line } }]
                }
            }));
        }
    }

    blocks
}

fn heading_block(kind: &str, text: &str) -> Value {
    json!({
        "object": "block",
        "type": kind,
        (kind): {
            "rich_text": [{ "text": { "content": text } }]
        }
    })
}

fn bullet_block(text: &str, link_re: &Regex) -> Value {
    let rich_text = if let Some(cap) = link_re.captures(text) {
        let link_text = &cap[1];
        let link_url = &cap[2];
        let content = text.replace(&cap[0], link_text);
        json!([{
            "text": {
                "content": content,
                "link": { "url": link_url }
            }
        }])
    } else {
        json!([{ "text": { "content": text } }])
    };

    json!({
        "object": "block",
        "type": "bulleted_list_item",
        "bulleted_list_item": { "rich_text": rich_text }
    })
}

/// Category names from the document's `##` headings, stripped of emoji,
/// for the database's multi-select property.
pub fn extract_categories(markdown: &str) -> Vec<String> {
    let cleanup = Regex::new(r"[^\w\s-]").unwrap();

    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("## "))
        .map(|heading| cleanup.replace_all(heading, "").trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}
