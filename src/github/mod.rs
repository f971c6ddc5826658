// src/github/mod.rs
//! Talks to the GitHub Contents API and the raw-content host.
//!
//! This module provides:
//! - URL construction for a repository branch (`Endpoints`, `RepoRef`).
//! - A tolerant listing client over the Contents API (`HttpLister`).
//! - A shared `reqwest` client with the headers both stages need.

use crate::errors::Error;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, ACCEPT, USER_AGENT};

// Declare the sub-modules.
mod endpoints;
mod listing;

// Re-export the public-facing API.
pub use endpoints::{Endpoints, RepoRef};
pub use listing::{decode_listing, DirectoryLister, HttpLister, ListingEntry, RecordDefect};

/// Builds the `reqwest` client shared by listing and download requests.
///
/// One client, one connection pool: listing calls and downloads reuse the
/// same connections. A user agent that the header type rejects is a fatal
/// configuration error.
pub fn build_client(user_agent: &str) -> Result<Client, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        "application/vnd.github.v3+json"
            .parse()
            .map_err(|_| Error::Config("invalid Accept header".to_string()))?,
    );
    headers.insert(
        USER_AGENT,
        user_agent
            .parse()
            .map_err(|_| Error::Config(format!("invalid user agent: '{}'", user_agent)))?,
    );

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_USER_AGENT;

    #[test]
    fn test_build_client_with_default_user_agent() {
        assert!(build_client(DEFAULT_USER_AGENT).is_ok());
    }

    #[test]
    fn test_build_client_rejects_invalid_user_agent() {
        let err = build_client("bad\nagent").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
