//! Lists one directory of a repository via the Contents API.
//!
//! The decode path is tolerant at record granularity: a malformed element of
//! the listing array is skipped and reported as a [`RecordDefect`] instead of
//! failing the whole listing.

use crate::errors::Error;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// One file-or-directory record returned by the Contents API for a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// File or directory name (last path segment).
    pub name: String,
    /// Path relative to the repository root. Unique within one listing and
    /// across the whole traversal.
    pub path: String,
    /// GitHub web URL of the item.
    pub html_url: String,
    /// Contents API URL of the item; for directories this is the URL the
    /// walker lists next.
    pub api_url: String,
    /// Raw-content URL. Present only for files.
    pub download_url: Option<String>,
    /// Whether the record's `type` field was `"file"`.
    pub is_file: bool,
}

/// A malformed listing record that was skipped during decoding.
#[derive(Debug, Clone)]
pub struct RecordDefect {
    /// Zero-based position of the record in the listing array.
    pub index: usize,
    /// Short description of what was wrong with the record.
    pub reason: String,
}

/// Shape of one raw Contents API record. Missing required fields make the
/// record a defect, not an error.
#[derive(Deserialize, Debug)]
struct RawEntry {
    name: String,
    path: String,
    html_url: String,
    url: String,
    download_url: Option<String>,
    #[serde(rename = "type")]
    item_type: String,
}

impl From<RawEntry> for ListingEntry {
    fn from(raw: RawEntry) -> Self {
        let is_file = raw.item_type == "file";
        ListingEntry {
            name: raw.name,
            path: raw.path,
            html_url: raw.html_url,
            api_url: raw.url,
            download_url: raw.download_url,
            is_file,
        }
    }
}

/// Decodes a listing response body into entries plus the defects found.
///
/// The body must be a JSON array; anything else is an error. Individual
/// array elements that do not match the expected record shape are collected
/// as defects and skipped.
pub fn decode_listing(body: &str) -> Result<(Vec<ListingEntry>, Vec<RecordDefect>), serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(body)?;
    let mut entries = Vec::with_capacity(values.len());
    let mut defects = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawEntry>(value) {
            Ok(raw) => entries.push(ListingEntry::from(raw)),
            Err(e) => defects.push(RecordDefect {
                index,
                reason: e.to_string(),
            }),
        }
    }
    Ok((entries, defects))
}

/// The seam between the tree walker and its data source.
///
/// The walker only ever needs "give me the records of this directory URL",
/// so tests can drive it with an in-memory implementation.
pub trait DirectoryLister {
    /// Fetches and decodes one directory listing.
    fn list(&self, url: &str) -> Result<Vec<ListingEntry>, Error>;
}

/// `DirectoryLister` backed by the Contents API over HTTP.
pub struct HttpLister {
    client: Client,
    timeout: Duration,
}

impl HttpLister {
    /// Creates a lister that issues requests through `client` with a
    /// per-request `timeout`.
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

impl DirectoryLister for HttpLister {
    fn list(&self, url: &str) -> Result<Vec<ListingEntry>, Error> {
        log::debug!("Fetching directory contents from: {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| Error::Fetch {
                url: url.to_string(),
                source,
            })?;
        let body = response.text().map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;

        let (entries, defects) = decode_listing(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })?;
        for defect in &defects {
            log::warn!(
                "Skipping malformed record {} in listing of '{}': {}",
                defect.index,
                url,
                defect.reason
            );
        }
        Ok(entries)
    }
}
