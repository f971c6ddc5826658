//! `gitree` is a library and command-line tool that mirrors a GitHub
//! repository's file tree to local storage through the Contents API,
//! without requiring git.
//!
//! The pipeline has two stages:
//! 1.  **Walk**: breadth-first traversal over the repository's directories,
//!     one listing request at a time, producing a flat manifest mapping each
//!     relative file path to its download URL.
//! 2.  **Download**: materialize the manifest under
//!     `<save_path>/<repo>/<branch>/`, sequentially for small trees or
//!     through a worker pool once the manifest reaches a configurable
//!     threshold.
//!
//! Failures are contained at the granularity where they occur: a directory
//! whose listing fails contributes no files but does not stop the walk, a
//! malformed listing record is skipped, and a failed download is recorded in
//! its outcome while the other files continue.
//!
//! # Example: Library Usage
//!
//! ```
//! use gitree::ConfigBuilder;
//! # use tempfile::tempdir;
//!
//! # fn main() -> Result<(), gitree::Error> {
//! # let save_dir = tempdir().unwrap();
//! // Build a Config programmatically. Explicit values mean the on-disk
//! // settings file is never consulted.
//! let config = ConfigBuilder::new("rust-lang", "log")
//!     .branch("master")
//!     .save_path(save_dir.path())
//!     .thread_threshold(6)
//!     .build()?;
//!
//! // `gitree::run(&config, &gitree::NoOpReporter)` would now walk the tree
//! // and download every file below the save path.
//! assert!(config.save_dir.ends_with("log/master"));
//! # Ok(())
//! # }
//! ```

// Make modules public if they contain public types used in the API
pub mod cli;
pub mod config;
pub mod constants;
pub mod download;
pub mod errors;
pub mod github;
pub mod report;
pub mod walker;

// Re-export key public types for easier use as a library
pub use config::{Config, ConfigBuilder, Settings};
pub use download::{DownloadMode, DownloadOutcome, DownloadSummary, Downloader};
pub use errors::{DownloadError, Error};
pub use github::{DirectoryLister, Endpoints, HttpLister, ListingEntry, RepoRef};
pub use report::{LogReporter, NoOpReporter, Reporter};
pub use walker::{walk_tree, Manifest};

use crate::config::display_forward_slashes;

/// Executes the complete pipeline: walk the tree, download the manifest,
/// report the summary.
///
/// This is the primary entry point and mirrors what the CLI does. For more
/// granular control use [`walk_tree`] and [`Downloader::fetch_all`]
/// directly.
///
/// An empty manifest (for example when every directory listing failed) is
/// not an error; the summary simply reports zero files.
///
/// # Errors
/// `Error::Config` if the HTTP client cannot be constructed from the
/// configured user agent. Listing and download failures never surface here;
/// they are reported per directory and per file through `reporter` and
/// aggregated into the returned [`DownloadSummary`].
pub fn run(config: &Config, reporter: &dyn Reporter) -> Result<DownloadSummary, Error> {
    let client = github::build_client(&config.user_agent)?;

    let lister = HttpLister::new(client.clone(), config.timeout);
    let manifest = walk_tree(&lister, config.endpoints.listing_root(), reporter);

    log::info!(
        "Repository files will be saved to: {}",
        display_forward_slashes(&config.save_dir)
    );
    log::info!("Total files to download: {}", manifest.len());

    let downloader = Downloader::new(client, config);
    let outcomes = downloader.fetch_all(&manifest, reporter);

    let summary = DownloadSummary::from_outcomes(&outcomes);
    reporter.finished(&summary);
    Ok(summary)
}
