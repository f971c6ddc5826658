// tests/cli.rs

mod common;

use assert_cmd::prelude::*;
use common::gitree_cmd;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_help_describes_the_tool() {
    gitree_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mirrors a GitHub repository"))
        .stdout(predicate::str::contains("--save-path"))
        .stdout(predicate::str::contains("--when-to-thread"));
}

#[test]
fn test_missing_repo_argument_fails() {
    gitree_cmd()
        .arg("only-owner")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_negative_timeout_is_a_fatal_config_error() {
    gitree_cmd()
        .args(["owner", "repo", "--timeout=-1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_zero_chunk_size_is_a_fatal_config_error() {
    gitree_cmd()
        .args(["owner", "repo", "--chunk-size", "0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));
}

/// Full end-to-end run against a local server standing in for both the
/// Contents API and the raw-content host.
#[test]
fn test_mirror_run_writes_the_tree_to_disk() {
    let mut server = Server::new();
    let base = server.url();

    let root_listing = json!([
        {
            "name": "README.md",
            "path": "README.md",
            "html_url": format!("{base}/html/README.md"),
            "url": format!("{base}/repos/o/r/contents/README.md?ref=main"),
            "download_url": format!("{base}/raw/o/r/main/README.md"),
            "type": "file"
        },
        {
            "name": "src",
            "path": "src",
            "html_url": format!("{base}/html/src"),
            "url": format!("{base}/repos/o/r/contents/src?ref=main"),
            "download_url": null,
            "type": "dir"
        }
    ]);
    let src_listing = json!([
        {
            "name": "a.py",
            "path": "src/a.py",
            "html_url": format!("{base}/html/src/a.py"),
            "url": format!("{base}/repos/o/r/contents/src/a.py?ref=main"),
            "download_url": format!("{base}/raw/o/r/main/src/a.py"),
            "type": "file"
        }
    ]);

    let _root = server
        .mock("GET", "/repos/o/r/contents")
        .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
        .with_header("content-type", "application/json")
        .with_body(root_listing.to_string())
        .create();
    let _src = server
        .mock("GET", "/repos/o/r/contents/src")
        .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
        .with_header("content-type", "application/json")
        .with_body(src_listing.to_string())
        .create();
    let _readme = server
        .mock("GET", "/raw/o/r/main/README.md")
        .with_body("# readme")
        .create();
    let _a_py = server
        .mock("GET", "/raw/o/r/main/src/a.py")
        .with_body("print('a')")
        .create();

    let save_root = tempdir().unwrap();
    let raw_root = format!("{base}/raw");

    gitree_cmd()
        .args(["o", "r"])
        .args(["--save-path", save_root.path().to_str().unwrap()])
        .args(["--when-to-thread", "99"])
        .args(["--api-root", base.as_str()])
        .args(["--raw-root", raw_root.as_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Total files to download: 2"))
        .stderr(predicate::str::contains("All 2 files downloaded successfully"));

    let mirror = save_root.path().join("r").join("main");
    assert_eq!(fs::read_to_string(mirror.join("README.md")).unwrap(), "# readme");
    assert_eq!(
        fs::read_to_string(mirror.join("src").join("a.py")).unwrap(),
        "print('a')"
    );
}

/// A failing directory listing is reported but does not fail the run.
#[test]
fn test_unreachable_subdirectory_still_mirrors_the_rest() {
    let mut server = Server::new();
    let base = server.url();

    let root_listing = json!([
        {
            "name": "kept.txt",
            "path": "kept.txt",
            "html_url": format!("{base}/html/kept.txt"),
            "url": format!("{base}/repos/o/r/contents/kept.txt?ref=main"),
            "download_url": format!("{base}/raw/o/r/main/kept.txt"),
            "type": "file"
        },
        {
            "name": "gone",
            "path": "gone",
            "html_url": format!("{base}/html/gone"),
            "url": format!("{base}/repos/o/r/contents/gone?ref=main"),
            "download_url": null,
            "type": "dir"
        }
    ]);

    let _root = server
        .mock("GET", "/repos/o/r/contents")
        .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
        .with_body(root_listing.to_string())
        .create();
    let _gone = server
        .mock("GET", "/repos/o/r/contents/gone")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();
    let _kept = server
        .mock("GET", "/raw/o/r/main/kept.txt")
        .with_body("still here")
        .create();

    let save_root = tempdir().unwrap();
    let raw_root = format!("{base}/raw");

    gitree_cmd()
        .args(["o", "r"])
        .args(["--save-path", save_root.path().to_str().unwrap()])
        .args(["--when-to-thread", "99"])
        .args(["--api-root", base.as_str()])
        .args(["--raw-root", raw_root.as_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping directory listing"))
        .stderr(predicate::str::contains("Total files to download: 1"));

    let mirror = save_root.path().join("r").join("main");
    assert_eq!(
        fs::read_to_string(mirror.join("kept.txt")).unwrap(),
        "still here"
    );
}
