//! Builds and validates a [`Config`] from CLI arguments or programmatic use.

use super::settings::Settings;
use super::Config;
use crate::cli::Cli;
use crate::constants::{
    DEFAULT_BRANCH, DEFAULT_CHUNK_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::errors::{io_error_with_path, Error};
use crate::github::{Endpoints, RepoRef};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builder for [`Config`].
///
/// Owner and repository are required up front; everything else has a
/// default. The settings file is only consulted for values the caller left
/// unset, so fully explicit builds never touch the filesystem outside the
/// save directory.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    owner: String,
    repo: String,
    branch: String,
    save_path: Option<PathBuf>,
    timeout_secs: f64,
    chunk_size: usize,
    thread_threshold: Option<usize>,
    user_agent: String,
    api_root: Option<String>,
    raw_root: Option<String>,
    settings_file: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Starts a builder for `owner/repo` with all defaults.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: DEFAULT_BRANCH.to_string(),
            save_path: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            thread_threshold: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_root: None,
            raw_root: None,
            settings_file: None,
        }
    }

    /// Maps parsed CLI arguments onto a builder.
    pub fn from_cli(cli: Cli) -> Self {
        let mut builder = Self::new(cli.owner, cli.repo);
        builder.branch = cli.branch;
        builder.save_path = cli.save_path;
        builder.timeout_secs = cli.timeout;
        builder.chunk_size = cli.chunk_size;
        builder.thread_threshold = cli.when_to_thread;
        if let Some(user_agent) = cli.user_agent {
            builder.user_agent = user_agent;
        }
        builder.api_root = cli.api_root;
        builder.raw_root = cli.raw_root;
        builder.settings_file = cli.config;
        builder
    }

    /// Branch to mirror (default `"main"`).
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Base directory to mirror into, overriding the settings file.
    pub fn save_path(mut self, path: impl AsRef<Path>) -> Self {
        self.save_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Per-request timeout in seconds. Negative values fail `build`.
    pub fn timeout_secs(mut self, secs: f64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Streaming chunk size in bytes. Zero fails `build`.
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes;
        self
    }

    /// Manifest size at which downloads go threaded, overriding the settings
    /// file.
    pub fn thread_threshold(mut self, threshold: usize) -> Self {
        self.thread_threshold = Some(threshold);
        self
    }

    /// Custom User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Custom Contents API root (GitHub Enterprise hosts, tests).
    pub fn api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = Some(root.into());
        self
    }

    /// Custom raw-content root (GitHub Enterprise hosts, tests).
    pub fn raw_root(mut self, root: impl Into<String>) -> Self {
        self.raw_root = Some(root.into());
        self
    }

    /// Settings file to consult instead of the platform default location.
    pub fn settings_file(mut self, path: impl AsRef<Path>) -> Self {
        self.settings_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Validates the options, fills unset values from the settings file, and
    /// creates the save directory.
    ///
    /// # Errors
    /// `Error::Config` for empty owner/repo/branch, a negative or non-finite
    /// timeout, or a zero chunk size. `Error::Io` if the save directory
    /// cannot be created.
    pub fn build(self) -> Result<Config, Error> {
        if self.owner.trim().is_empty() {
            return Err(Error::Config("owner must not be empty".to_string()));
        }
        if self.repo.trim().is_empty() {
            return Err(Error::Config("repo must not be empty".to_string()));
        }
        if self.branch.trim().is_empty() {
            return Err(Error::Config("branch must not be empty".to_string()));
        }
        if !self.timeout_secs.is_finite() || self.timeout_secs < 0.0 {
            return Err(Error::Config(format!(
                "timeout must be a non-negative number of seconds (got {})",
                self.timeout_secs
            )));
        }
        if self.chunk_size == 0 {
            return Err(Error::Config(
                "chunk size must be at least 1 byte".to_string(),
            ));
        }

        // Only read the settings file for values the caller left unset.
        let (save_root, thread_threshold) = match (self.save_path, self.thread_threshold) {
            (Some(save_root), Some(threshold)) => (save_root, threshold),
            (save_path, threshold) => {
                let settings = match &self.settings_file {
                    Some(path) => Settings::load_or_init_from(path)?,
                    None => Settings::load_or_init()?,
                };
                (
                    save_path.unwrap_or(settings.save_path),
                    threshold.unwrap_or(settings.when_to_thread),
                )
            }
        };

        let repo = RepoRef::new(self.owner, self.repo, self.branch);
        let save_dir = save_root.join(&repo.repo).join(&repo.branch);
        fs::create_dir_all(&save_dir).map_err(|e| io_error_with_path(e, &save_dir))?;

        let endpoints = match (&self.api_root, &self.raw_root) {
            (None, None) => Endpoints::new(&repo),
            (api, raw) => Endpoints::with_roots(
                &repo,
                api.as_deref().unwrap_or(crate::constants::DEFAULT_API_ROOT),
                raw.as_deref().unwrap_or(crate::constants::DEFAULT_RAW_ROOT),
            ),
        };

        Ok(Config {
            repo,
            endpoints,
            save_dir,
            timeout: Duration::from_secs_f64(self.timeout_secs),
            chunk_size: self.chunk_size,
            thread_threshold,
            user_agent: self.user_agent,
        })
    }
}
