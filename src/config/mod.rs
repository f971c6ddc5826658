//! Defines the core `Config` struct and related types for application configuration.
//!
//! This module consolidates all the settings parsed and validated from the
//! CLI and the on-disk settings file, making them available to the walker
//! and the download executor in a structured and type-safe manner. A
//! `Config` is built once at startup and passed by reference; nothing here
//! is process-global.

use crate::github::{Endpoints, RepoRef};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use builder::ConfigBuilder;
pub use settings::Settings;
mod builder;
mod settings;

/// All settings for one mirroring run.
#[derive(Debug, Clone)]
pub struct Config {
    /// The repository branch being mirrored.
    pub repo: RepoRef,
    /// Resolved listing and raw-content endpoints for `repo`.
    pub endpoints: Endpoints,
    /// Destination directory: `<save_path>/<repo>/<branch>`. Created (and
    /// validated) when the config is built.
    pub save_dir: PathBuf,
    /// Per-request timeout applied to every listing and download call.
    pub timeout: Duration,
    /// Block size for streaming response bodies to disk.
    pub chunk_size: usize,
    /// Manifest size at which downloads switch to the worker pool.
    pub thread_threshold: usize,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

/// Renders a path with separators normalized to forward slashes, matching
/// the layout the manifest uses on every platform.
pub fn display_forward_slashes(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forward_slashes_normalizes_backslashes() {
        let rendered = display_forward_slashes(Path::new("a/b/c.txt"));
        assert_eq!(rendered, "a/b/c.txt");
        assert!(!display_forward_slashes(Path::new(r"a\b")).contains('\\'));
    }
}
