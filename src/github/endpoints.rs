//! Builds listing and raw-content URLs for a repository reference.
//!
//! Pure string substitution into the templates in [`crate::constants`];
//! no I/O happens here.

use crate::constants::{DEFAULT_API_ROOT, DEFAULT_RAW_ROOT, LISTING_URL_TEMPLATE, RAW_URL_TEMPLATE};

/// Identifies the repository branch to mirror. Immutable after construction;
/// every URL the tool touches derives from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// The owner of the repository.
    pub owner: String,
    /// The name of the repository.
    pub repo: String,
    /// The branch of the repository.
    pub branch: String,
}

impl RepoRef {
    /// Creates a new reference from owner, repository and branch names.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

/// Resolved URL endpoints for one repository branch.
///
/// # Examples
///
/// ```
/// use gitree::github::{Endpoints, RepoRef};
///
/// let repo = RepoRef::new("rust-lang", "cargo", "master");
/// let endpoints = Endpoints::new(&repo);
///
/// assert_eq!(
///     endpoints.listing_root(),
///     "https://api.github.com/repos/rust-lang/cargo/contents?ref=master"
/// );
/// assert_eq!(
///     endpoints.raw_url("src/cargo/lib.rs"),
///     "https://raw.githubusercontent.com/rust-lang/cargo/master/src/cargo/lib.rs"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Endpoints {
    listing_root: String,
    raw_prefix: String,
}

impl Endpoints {
    /// Builds endpoints against the public github.com hosts.
    pub fn new(repo: &RepoRef) -> Self {
        Self::with_roots(repo, DEFAULT_API_ROOT, DEFAULT_RAW_ROOT)
    }

    /// Builds endpoints against custom API and raw-content roots.
    ///
    /// Used for GitHub Enterprise hosts and for tests against a local server.
    /// Trailing slashes on the roots are ignored.
    pub fn with_roots(repo: &RepoRef, api_root: &str, raw_root: &str) -> Self {
        let listing_root = LISTING_URL_TEMPLATE
            .replace("{root}", api_root.trim_end_matches('/'))
            .replace("{owner}", &repo.owner)
            .replace("{repo}", &repo.repo)
            .replace("{branch}", &repo.branch);
        // The raw template ends in "{path}"; keep everything before it as a
        // prefix so raw_url() is a single concatenation.
        let raw_prefix = RAW_URL_TEMPLATE
            .replace("{root}", raw_root.trim_end_matches('/'))
            .replace("{owner}", &repo.owner)
            .replace("{repo}", &repo.repo)
            .replace("{branch}", &repo.branch)
            .replace("{path}", "");
        Self {
            listing_root,
            raw_prefix,
        }
    }

    /// The URL that lists the repository root directory.
    pub fn listing_root(&self) -> &str {
        &self.listing_root
    }

    /// Maps a relative file path to its raw-content URL.
    pub fn raw_url(&self, path: &str) -> String {
        format!("{}{}", self.raw_prefix, path.trim_start_matches('/'))
    }
}
