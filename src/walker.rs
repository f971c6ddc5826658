// src/walker.rs

//! Breadth-first traversal of a repository tree into a flat file manifest.
//!
//! The walker drives the listing client one directory at a time. Listing is
//! strictly sequential; a FIFO queue of pending directory URLs guarantees
//! that every directory at one depth is listed before any directory at the
//! next depth. A directory whose listing fails contributes nothing but does
//! not abort the walk.

use crate::github::DirectoryLister;
use crate::report::Reporter;
use std::collections::{BTreeMap, VecDeque};

/// Mapping from relative file path to download URL for every file discovered
/// during traversal. Iteration order is the sorted path order, which is also
/// the order the sequential download path uses.
pub type Manifest = BTreeMap<String, String>;

/// Walks the whole tree below `root_url` and returns the manifest.
///
/// Files are merged into the manifest as their directory is listed;
/// subdirectory API URLs are appended to the tail of the pending queue. The
/// queue is empty when this returns. If every directory fails the manifest is
/// simply empty; that is not an error.
pub fn walk_tree(
    lister: &dyn DirectoryLister,
    root_url: &str,
    reporter: &dyn Reporter,
) -> Manifest {
    let mut manifest = Manifest::new();
    let mut pending: VecDeque<String> = VecDeque::new();
    pending.push_back(root_url.to_string());

    while let Some(url) = pending.pop_front() {
        let entries = match lister.list(&url) {
            Ok(entries) => entries,
            Err(e) => {
                reporter.directory_failed(&url, &e);
                continue;
            }
        };

        for entry in entries {
            if entry.is_file {
                match entry.download_url {
                    Some(download_url) => {
                        manifest.insert(entry.path, download_url);
                    }
                    None => {
                        log::warn!("Skipping file with no download URL: {}", entry.path);
                    }
                }
            } else {
                pending.push_back(entry.api_url);
            }
        }
    }

    manifest
}
