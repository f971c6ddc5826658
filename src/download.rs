// src/download.rs

//! Materializes a manifest to disk, sequentially or through a worker pool.
//!
//! Small manifests are downloaded one file at a time in manifest iteration
//! order. Once the manifest size reaches the configured threshold the files
//! are dispatched to a scoped `rayon` pool sized to the environment default,
//! and outcomes are collected in completion order over a channel. Each file
//! is attempted exactly once either way.

use crate::config::Config;
use crate::errors::DownloadError;
use crate::report::Reporter;
use crate::walker::Manifest;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Execution policy for one `fetch_all` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    /// One file at a time, in manifest iteration order.
    Sequential,
    /// All files dispatched to a bounded worker pool; completion order.
    Threaded,
}

impl DownloadMode {
    /// Chooses the policy for `count` files against the configured threshold.
    /// A manifest strictly smaller than the threshold stays sequential.
    pub fn select(count: usize, threshold: usize) -> Self {
        if count < threshold {
            DownloadMode::Sequential
        } else {
            DownloadMode::Threaded
        }
    }
}

/// Result of one download attempt. Emitted once per manifest entry.
#[derive(Debug)]
pub struct DownloadOutcome {
    /// Relative file path within the repository.
    pub path: String,
    /// `Ok` once the file is fully on disk under its final name.
    pub result: Result<(), DownloadError>,
}

impl DownloadOutcome {
    /// Whether the download completed.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregated counts over all outcomes of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Files fully written to disk.
    pub downloaded: usize,
    /// Files that failed in transport, status or I/O.
    pub failed: usize,
}

impl DownloadSummary {
    /// Tallies a slice of outcomes.
    pub fn from_outcomes(outcomes: &[DownloadOutcome]) -> Self {
        let downloaded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            downloaded,
            failed: outcomes.len() - downloaded,
        }
    }
}

/// Downloads every manifest entry below the configured save directory.
pub struct Downloader<'a> {
    client: Client,
    config: &'a Config,
}

impl<'a> Downloader<'a> {
    /// Creates a downloader over a shared HTTP client and the run's config.
    pub fn new(client: Client, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// Attempts every file in the manifest and returns one outcome per entry.
    ///
    /// Sequential mode reports `(current, total)` positions and preserves
    /// manifest iteration order in the returned vector. Threaded mode gives
    /// no ordering guarantee; outcomes arrive in completion order. The pool
    /// lives only for the duration of this call and is joined before it
    /// returns.
    pub fn fetch_all(&self, manifest: &Manifest, reporter: &dyn Reporter) -> Vec<DownloadOutcome> {
        match DownloadMode::select(manifest.len(), self.config.thread_threshold) {
            DownloadMode::Sequential => {
                log::info!("Using sequential download...");
                self.fetch_sequential(manifest, reporter)
            }
            DownloadMode::Threaded => {
                log::info!(
                    "Starting multi-threaded download for {} files...",
                    manifest.len()
                );
                self.fetch_threaded(manifest, reporter)
            }
        }
    }

    fn fetch_sequential(
        &self,
        manifest: &Manifest,
        reporter: &dyn Reporter,
    ) -> Vec<DownloadOutcome> {
        let total = manifest.len();
        manifest
            .iter()
            .enumerate()
            .map(|(i, (path, url))| {
                let result = self.fetch_one(path, url);
                match &result {
                    Ok(()) => reporter.file_done(path, Some((i + 1, total))),
                    Err(e) => reporter.file_failed(path, e),
                }
                DownloadOutcome {
                    path: path.clone(),
                    result,
                }
            })
            .collect()
    }

    fn fetch_threaded(&self, manifest: &Manifest, reporter: &dyn Reporter) -> Vec<DownloadOutcome> {
        let pool = match rayon::ThreadPoolBuilder::new().build() {
            Ok(pool) => pool,
            Err(e) => {
                log::warn!(
                    "Could not build download worker pool ({}); falling back to sequential mode.",
                    e
                );
                return self.fetch_sequential(manifest, reporter);
            }
        };

        let (tx, rx) = crossbeam_channel::unbounded();
        pool.scope(|scope| {
            for (path, url) in manifest {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let result = self.fetch_one(path, url);
                    match &result {
                        Ok(()) => reporter.file_done(path, None),
                        Err(e) => reporter.file_failed(path, e),
                    }
                    // The receiver outlives the scope; a send cannot fail here.
                    let _ = tx.send(DownloadOutcome {
                        path: path.clone(),
                        result,
                    });
                });
            }
        });
        drop(tx);

        rx.into_iter().collect()
    }

    /// Downloads one file: GET with streaming body, parent directories
    /// created, body written in chunks to a temporary file in the destination
    /// directory, then renamed over the final path.
    fn fetch_one(&self, path: &str, url: &str) -> Result<(), DownloadError> {
        log::debug!("Downloading file from: {}", url);
        let mut response = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()?;
        if response.status() != StatusCode::OK {
            return Err(DownloadError::Status(response.status()));
        }

        let dest = self.config.save_dir.join(path);
        let parent: PathBuf = match dest.parent() {
            Some(parent) => parent.to_path_buf(),
            None => self.config.save_dir.clone(),
        };
        fs::create_dir_all(&parent).map_err(|source| DownloadError::Io {
            path: parent.display().to_string(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(&parent).map_err(|source| DownloadError::Io {
            path: parent.display().to_string(),
            source,
        })?;
        copy_chunked(&mut response, tmp.as_file_mut(), self.config.chunk_size).map_err(
            |source| DownloadError::Io {
                path: dest.display().to_string(),
                source,
            },
        )?;
        tmp.persist(&dest).map_err(|e| DownloadError::Io {
            path: dest.display().to_string(),
            source: e.error,
        })?;
        Ok(())
    }
}

/// Copies `reader` into `writer` in blocks of `chunk_size` bytes, bounding
/// peak memory regardless of body size. Returns the number of bytes written.
pub fn copy_chunked<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    chunk_size: usize,
) -> io::Result<u64> {
    let mut buffer = vec![0u8; chunk_size];
    let mut written: u64 = 0;
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n])?;
        written += n as u64;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::report::NoOpReporter;
    use mockito::Server;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_mode_select_threshold_boundaries() {
        // threshold - 1 stays sequential, exactly threshold goes threaded
        assert_eq!(DownloadMode::select(5, 6), DownloadMode::Sequential);
        assert_eq!(DownloadMode::select(6, 6), DownloadMode::Threaded);
        assert_eq!(DownloadMode::select(0, 6), DownloadMode::Sequential);
        assert_eq!(DownloadMode::select(7, 6), DownloadMode::Threaded);
    }

    #[test]
    fn test_copy_chunked_is_exact_for_any_chunk_size() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(3000).collect();
        for chunk_size in [1usize, 1024, payload.len() + 1] {
            let mut reader = Cursor::new(payload.clone());
            let mut sink = Vec::new();
            let written = copy_chunked(&mut reader, &mut sink, chunk_size).unwrap();
            assert_eq!(written, payload.len() as u64, "chunk size {}", chunk_size);
            assert_eq!(sink, payload, "chunk size {}", chunk_size);
        }
    }

    #[test]
    fn test_summary_counts_failures() {
        let outcomes = vec![
            DownloadOutcome {
                path: "a".into(),
                result: Ok(()),
            },
            DownloadOutcome {
                path: "b".into(),
                result: Err(DownloadError::Status(StatusCode::NOT_FOUND)),
            },
            DownloadOutcome {
                path: "c".into(),
                result: Ok(()),
            },
        ];
        let summary = DownloadSummary::from_outcomes(&outcomes);
        assert_eq!(summary.downloaded, 2);
        assert_eq!(summary.failed, 1);
    }

    fn test_config(save_path: &std::path::Path, threshold: usize, chunk_size: usize) -> Config {
        ConfigBuilder::new("o", "r")
            .branch("main")
            .save_path(save_path)
            .thread_threshold(threshold)
            .chunk_size(chunk_size)
            .build()
            .unwrap()
    }

    fn manifest_of(pairs: &[(&str, String)]) -> Manifest {
        pairs
            .iter()
            .map(|(path, url)| (path.to_string(), url.clone()))
            .collect()
    }

    #[test]
    fn test_sequential_fetch_writes_nested_paths() {
        let mut server = Server::new();
        let _m1 = server
            .mock("GET", "/raw/README.md")
            .with_body("hello readme")
            .create();
        let _m2 = server
            .mock("GET", "/raw/src/a.py")
            .with_body("print('a')")
            .create();

        let dir = tempdir().unwrap();
        let config = test_config(dir.path(), 100, 7); // odd chunk size on purpose
        let manifest = manifest_of(&[
            ("README.md", format!("{}/raw/README.md", server.url())),
            ("src/a.py", format!("{}/raw/src/a.py", server.url())),
        ]);

        let downloader = Downloader::new(Client::new(), &config);
        let outcomes = downloader.fetch_all(&manifest, &NoOpReporter);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.is_success()));
        // Sequential outcomes preserve manifest iteration order.
        assert_eq!(outcomes[0].path, "README.md");
        assert_eq!(outcomes[1].path, "src/a.py");

        let root = config.save_dir.clone();
        assert_eq!(
            fs::read_to_string(root.join("README.md")).unwrap(),
            "hello readme"
        );
        assert_eq!(
            fs::read_to_string(root.join("src/a.py")).unwrap(),
            "print('a')"
        );
    }

    #[test]
    fn test_failed_file_is_recorded_and_does_not_block_others() {
        let mut server = Server::new();
        let _m1 = server
            .mock("GET", "/raw/missing.txt")
            .with_status(404)
            .create();
        let _m2 = server.mock("GET", "/raw/ok.txt").with_body("fine").create();

        let dir = tempdir().unwrap();
        let config = test_config(dir.path(), 100, 1024);
        let manifest = manifest_of(&[
            ("missing.txt", format!("{}/raw/missing.txt", server.url())),
            ("ok.txt", format!("{}/raw/ok.txt", server.url())),
        ]);

        let downloader = Downloader::new(Client::new(), &config);
        let outcomes = downloader.fetch_all(&manifest, &NoOpReporter);
        let summary = DownloadSummary::from_outcomes(&outcomes);

        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.failed, 1);
        let failed = outcomes.iter().find(|o| o.path == "missing.txt").unwrap();
        assert!(matches!(
            failed.result,
            Err(DownloadError::Status(StatusCode::NOT_FOUND))
        ));
        // The failed path must not leave a file behind.
        assert!(!config.save_dir.join("missing.txt").exists());
        assert!(config.save_dir.join("ok.txt").exists());
    }

    #[test]
    fn test_fetch_all_is_idempotent_over_existing_files() {
        let mut server = Server::new();
        let _m = server
            .mock("GET", "/raw/file.txt")
            .with_body("same content")
            .expect(2)
            .create();

        let dir = tempdir().unwrap();
        let config = test_config(dir.path(), 100, 1024);
        let manifest = manifest_of(&[("file.txt", format!("{}/raw/file.txt", server.url()))]);

        let downloader = Downloader::new(Client::new(), &config);
        let first = downloader.fetch_all(&manifest, &NoOpReporter);
        let second = downloader.fetch_all(&manifest, &NoOpReporter);

        assert!(first.iter().all(|o| o.is_success()));
        assert!(second.iter().all(|o| o.is_success()));
        assert_eq!(
            fs::read_to_string(config.save_dir.join("file.txt")).unwrap(),
            "same content"
        );
    }

    #[test]
    fn test_threaded_fetch_attempts_every_file_exactly_once() {
        let mut server = Server::new();
        let mut pairs = Vec::new();
        let mut mocks = Vec::new();
        for i in 0..6 {
            let path = format!("f{}.txt", i);
            mocks.push(
                server
                    .mock("GET", format!("/raw/{}", path).as_str())
                    .with_body(format!("body {}", i))
                    .expect(1)
                    .create(),
            );
            pairs.push((path.clone(), format!("{}/raw/{}", server.url(), path)));
        }

        let dir = tempdir().unwrap();
        // 6 files with threshold 6 lands exactly on the threaded boundary.
        let config = test_config(dir.path(), 6, 1024);
        let manifest: Manifest = pairs.into_iter().collect();

        let downloader = Downloader::new(Client::new(), &config);
        let outcomes = downloader.fetch_all(&manifest, &NoOpReporter);

        for mock in &mocks {
            mock.assert();
        }
        assert_eq!(outcomes.len(), 6);
        assert!(outcomes.iter().all(|o| o.is_success()));
        for i in 0..6 {
            let on_disk =
                fs::read_to_string(config.save_dir.join(format!("f{}.txt", i))).unwrap();
            assert_eq!(on_disk, format!("body {}", i));
        }
    }
}
