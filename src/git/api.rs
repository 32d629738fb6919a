// src/git/api.rs
//! Walks a directory tree through the GitHub contents API.

use crate::config::SyncConfig;
use crate::constants::USER_AGENT as USER_AGENT_VALUE;
use crate::errors::{Result, SyncError};
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// One downloadable file discovered by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    /// Path relative to the walk root, e.g. `bots/crawlers.yml`.
    pub name: String,
    /// Raw download URL. Entries without one are skipped by the downloader.
    pub download_url: Option<String>,
    /// Inline base64 content, only present for a single-file hit.
    pub content: Option<String>,
}

/// The result of walking a contents URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeListing {
    /// The URL pointed at a single file.
    File(ContentEntry),
    /// Every file under the directory, flattened. Empty when the top-level listing failed.
    Entries(Vec<ContentEntry>),
}

/// Represents a file or directory item from the GitHub Contents API.
#[derive(Deserialize, Debug)]
struct ListingItem {
    name: String,
    #[serde(rename = "type")]
    item_type: String,
    url: Option<String>,
    download_url: Option<String>,
    content: Option<String>,
}

/// Builds a `reqwest` client with default headers for GitHub API interaction.
pub fn build_client(config: &SyncConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github.v3+json"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    if let Some(token) = &config.token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            SyncError::InvalidConfig("GitHub token contains invalid characters".to_string())
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        log::debug!("Using GitHub token for authentication.");
    }

    let mut builder = Client::builder().default_headers(headers);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Fetches one listing. `None` means the server answered with a non-success status.
async fn fetch_listing(client: &Client, url: &str) -> Result<Option<Value>> {
    log::debug!("Fetching directory contents from: {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        log::warn!("Listing '{}' returned HTTP {}; treating it as empty.", url, status);
        return Ok(None);
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map(Some)
        .map_err(|source| SyncError::Decode {
            url: url.to_string(),
            source,
        })
}

fn decode_items(url: &str, value: Value) -> Result<Vec<ListingItem>> {
    let decoded = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|item| vec![item])
    };
    decoded.map_err(|source| SyncError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Walks `content_url` and returns every downloadable file beneath it.
///
/// A JSON object response means the URL names a single file. An array is a
/// directory listing: files are emitted as-is and each directory is listed in
/// turn through its own `url`, with its name prefixed onto the names found
/// inside it. Sibling order follows the API.
///
/// A non-success status yields an empty result rather than an error; only
/// transport and decode failures are returned as `Err`.
pub async fn fetch_tree(client: &Client, content_url: &str) -> Result<TreeListing> {
    let Some(value) = fetch_listing(client, content_url).await? else {
        return Ok(TreeListing::Entries(Vec::new()));
    };

    if value.is_object() {
        let item: ListingItem =
            serde_json::from_value(value).map_err(|source| SyncError::Decode {
                url: content_url.to_string(),
                source,
            })?;
        return Ok(TreeListing::File(ContentEntry {
            name: item.name,
            download_url: item.download_url,
            content: item.content,
        }));
    }

    let items = decode_items(content_url, value)?;
    let entries = collect_entries(client, items, String::new()).await?;
    Ok(TreeListing::Entries(entries))
}

/// Depth-first flattening of one listing. `prefix` is the relative path of the
/// listed directory, ending in `/` unless it is the walk root.
fn collect_entries<'a>(
    client: &'a Client,
    items: Vec<ListingItem>,
    prefix: String,
) -> BoxFuture<'a, Result<Vec<ContentEntry>>> {
    async move {
        let mut entries = Vec::new();
        for item in items {
            match item.item_type.as_str() {
                "file" => entries.push(ContentEntry {
                    name: format!("{}{}", prefix, item.name),
                    download_url: item.download_url,
                    content: None,
                }),
                "dir" => {
                    let Some(url) = item.url else {
                        log::warn!("Directory '{}{}' has no listing URL; skipping.", prefix, item.name);
                        continue;
                    };
                    let Some(value) = fetch_listing(client, &url).await? else {
                        continue;
                    };
                    let children = decode_items(&url, value)?;
                    let child_prefix = format!("{}{}/", prefix, item.name);
                    entries.extend(collect_entries(client, children, child_prefix).await?);
                }
                other => {
                    log::debug!("Skipping '{}{}' of type '{}'", prefix, item.name, other);
                }
            }
        }
        Ok(entries)
    }
    .boxed()
}
