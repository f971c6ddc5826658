//! Defines application-specific error types.
//!
//! Two enums cover the failure surface: [`Error`] for fatal configuration
//! problems and per-directory listing failures, and [`DownloadError`] for
//! per-file download failures that are recorded in an outcome instead of
//! propagated.

use thiserror::Error;

/// Errors surfaced by configuration and traversal.
///
/// `Config` is fatal and aborts startup. `Fetch` and `Decode` are recovered
/// at directory granularity: the walker drops the failing directory's
/// contribution and continues.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration settings or combinations, detected at build time.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A listing request failed in transport or returned a non-2xx status.
    #[error("Listing request for '{url}' failed: {source}")]
    Fetch {
        /// The directory URL that was being listed.
        url: String,
        /// The underlying `reqwest` error.
        #[source]
        source: reqwest::Error,
    },

    /// A listing response body was not a JSON array.
    #[error("Listing response from '{url}' was not a JSON array: {source}")]
    Decode {
        /// The directory URL that was being listed.
        url: String,
        /// The underlying `serde_json` error.
        #[source]
        source: serde_json::Error,
    },

    /// Error occurring during file or directory access (create, write).
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String, // Use String to avoid lifetime issues if PathBuf is dropped
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },
}

/// A single file's download failure, carried inside a `DownloadOutcome`.
///
/// These are never propagated as `Err` from the executor; other downloads
/// continue regardless.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The raw-content server answered with a non-200 status.
    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),

    /// The request failed in transport (connect, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Writing the body to local storage failed.
    #[error("I/O error writing '{path}': {source}")]
    Io {
        /// The destination path being written.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },
}

/// Helper function to create an `Error::Io` with path context.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}
