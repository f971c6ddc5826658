// src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Mirrors a GitHub repository's file tree to local storage, without git.
///
/// gitree walks the repository through the Contents API one directory at a
/// time, builds a manifest of every file, and then downloads them into
/// `<save-path>/<repo>/<branch>/`, preserving the remote directory layout.
/// Small trees download sequentially; larger ones fan out across a worker
/// pool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Owner of the repository to mirror.
    pub owner: String,

    /// Name of the repository to mirror.
    pub repo: String,

    /// Branch of the repository to mirror.
    #[arg(short, long, default_value = "main")]
    pub branch: String,

    /// Base directory to mirror into (overrides the settings file).
    #[arg(short = 'o', long, value_name = "DIR")]
    pub save_path: Option<PathBuf>,

    /// HTTP timeout in seconds for listing and download requests.
    #[arg(long, value_name = "SECONDS", default_value_t = 10.0)]
    pub timeout: f64,

    /// File count at which downloads switch to the worker pool (overrides the
    /// settings file).
    #[arg(long, value_name = "COUNT")]
    pub when_to_thread: Option<usize>,

    /// Chunk size in bytes for streaming downloads to disk.
    #[arg(long, value_name = "BYTES", default_value_t = 1024)]
    pub chunk_size: usize,

    /// Custom User-Agent header for all requests.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Base URL of the Contents API (for GitHub Enterprise hosts).
    #[arg(long, value_name = "URL")]
    pub api_root: Option<String>,

    /// Base URL of the raw-content host (for GitHub Enterprise hosts).
    #[arg(long, value_name = "URL")]
    pub raw_root: Option<String>,

    /// Use this settings file instead of the default location.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
