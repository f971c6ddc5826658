//! The on-disk settings file.
//!
//! Supplies defaults for the save path and the threading threshold when the
//! caller does not set them explicitly. A missing or unreadable file is
//! rewritten with defaults and its location logged once, so a first run
//! tells the user where things live.

use crate::constants::{DEFAULT_THREAD_THRESHOLD, SETTINGS_FILE_NAME};
use crate::errors::{io_error_with_path, Error};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved settings, every field filled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Base directory repositories are mirrored under.
    pub save_path: PathBuf,
    /// Manifest size at which downloads switch to the worker pool.
    pub when_to_thread: usize,
}

/// What the file may actually contain; absent keys fall back to defaults.
#[derive(Deserialize, Default)]
struct PartialSettings {
    save_path: Option<PathBuf>,
    when_to_thread: Option<usize>,
}

impl Settings {
    /// Loads settings from the default platform location, creating the file
    /// with defaults if it does not exist or cannot be parsed.
    pub fn load_or_init() -> Result<Self, Error> {
        let dirs = project_dirs()?;
        let path = dirs.config_dir().join(SETTINGS_FILE_NAME);
        Self::load_or_init_from(&path)
    }

    /// Same as [`Settings::load_or_init`], against an explicit file path.
    pub fn load_or_init_from(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path) {
            Ok(body) => match serde_json::from_str::<PartialSettings>(&body) {
                Ok(partial) => Self::defaults().map(|d| d.merge(partial)),
                Err(e) => {
                    log::warn!(
                        "Settings file '{}' is not valid JSON ({}); rewriting defaults.",
                        path.display(),
                        e
                    );
                    Self::write_defaults(path)
                }
            },
            Err(_) => Self::write_defaults(path),
        }
    }

    /// Default settings: a per-user data directory for mirrored repositories.
    pub fn defaults() -> Result<Self, Error> {
        let dirs = project_dirs()?;
        Ok(Self {
            save_path: dirs.data_dir().join("repo"),
            when_to_thread: DEFAULT_THREAD_THRESHOLD,
        })
    }

    fn merge(self, partial: PartialSettings) -> Self {
        Self {
            save_path: partial.save_path.unwrap_or(self.save_path),
            when_to_thread: partial.when_to_thread.unwrap_or(self.when_to_thread),
        }
    }

    fn write_defaults(path: &Path) -> Result<Self, Error> {
        let defaults = Self::defaults()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error_with_path(e, parent))?;
        }
        let body = serde_json::to_string_pretty(&defaults)
            .map_err(|e| Error::Config(format!("could not serialize default settings: {}", e)))?;
        fs::write(path, body).map_err(|e| io_error_with_path(e, path))?;
        log::info!(
            "Default save path at: {}",
            defaults.save_path.display()
        );
        log::info!("Settings file at     : {}", path.display());
        Ok(defaults)
    }
}

fn project_dirs() -> Result<ProjectDirs, Error> {
    ProjectDirs::from("", "", "gitree")
        .ok_or_else(|| Error::Config("could not determine a home directory".to_string()))
}
