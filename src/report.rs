// src/report.rs

//! Defines a trait for reporting traversal and download progress.

use crate::download::DownloadSummary;
use crate::errors::{DownloadError, Error};

/// Receives per-directory and per-file notifications for display, plus one
/// final summary.
///
/// Sequential downloads report a `(current, total)` position with each file;
/// the threaded pool reports files in completion order without counters, so
/// `position` is `None` there.
///
/// # Examples
///
/// ```
/// use gitree::report::Reporter;
/// use gitree::download::DownloadSummary;
/// use gitree::errors::{DownloadError, Error};
/// use std::sync::Mutex;
///
/// // A mock reporter that just counts successful files.
/// struct CountingReporter {
///     files: Mutex<usize>,
/// }
/// impl Reporter for CountingReporter {
///     fn directory_failed(&self, _url: &str, _error: &Error) {}
///     fn file_done(&self, _path: &str, _position: Option<(usize, usize)>) {
///         *self.files.lock().unwrap() += 1;
///     }
///     fn file_failed(&self, _path: &str, _error: &DownloadError) {}
///     fn finished(&self, _summary: &DownloadSummary) {}
/// }
///
/// let reporter = CountingReporter { files: Mutex::new(0) };
/// reporter.file_done("README.md", Some((1, 2)));
/// reporter.file_done("src/a.py", Some((2, 2)));
/// assert_eq!(*reporter.files.lock().unwrap(), 2);
/// ```
pub trait Reporter: Send + Sync {
    /// A directory listing failed; its contribution is dropped and the walk
    /// continues.
    fn directory_failed(&self, url: &str, error: &Error);
    /// One file finished downloading. `position` is `(current, total)` in
    /// sequential mode, `None` in threaded mode.
    fn file_done(&self, path: &str, position: Option<(usize, usize)>);
    /// One file failed to download; other downloads continue.
    fn file_failed(&self, path: &str, error: &DownloadError);
    /// All downloads have been attempted.
    fn finished(&self, summary: &DownloadSummary);
}

/// A `Reporter` that does nothing.
///
/// Used as a default in non-interactive or embedded use.
pub struct NoOpReporter;

impl Reporter for NoOpReporter {
    fn directory_failed(&self, _url: &str, _error: &Error) {}
    fn file_done(&self, _path: &str, _position: Option<(usize, usize)>) {}
    fn file_failed(&self, _path: &str, _error: &DownloadError) {}
    fn finished(&self, _summary: &DownloadSummary) {}
}

/// A `Reporter` that writes through the `log` facade.
///
/// This is what the CLI installs; with `env_logger` the lines end up on
/// stderr.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn directory_failed(&self, url: &str, error: &Error) {
        log::warn!("Skipping directory listing '{}': {}", url, error);
    }

    fn file_done(&self, path: &str, position: Option<(usize, usize)>) {
        match position {
            Some((current, total)) => log::info!("Downloaded [{}/{}]: {}", current, total, path),
            None => log::info!("Downloaded: {}", path),
        }
    }

    fn file_failed(&self, path: &str, error: &DownloadError) {
        log::error!("Failed to download '{}': {}", path, error);
    }

    fn finished(&self, summary: &DownloadSummary) {
        if summary.failed == 0 {
            log::info!("All {} files downloaded successfully!", summary.downloaded);
        } else {
            log::warn!(
                "Finished with failures: {} downloaded, {} failed",
                summary.downloaded,
                summary.failed
            );
        }
    }
}
