// src/constants.rs

/// Default base URL of the GitHub Contents API.
pub const DEFAULT_API_ROOT: &str = "https://api.github.com";

/// Default base URL of the raw-content host.
pub const DEFAULT_RAW_ROOT: &str = "https://raw.githubusercontent.com";

/// Listing API URL template. Resolves to the root listing of a repository branch.
pub const LISTING_URL_TEMPLATE: &str = "{root}/repos/{owner}/{repo}/contents?ref={branch}";

/// Raw-content URL template mapping a relative file path to its download URL.
pub const RAW_URL_TEMPLATE: &str = "{root}/{owner}/{repo}/{branch}/{path}";

/// User agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; GiTreeSpider/0.1; +https://github.com/starwindv/gitree)";

/// Branch used when none is given.
pub const DEFAULT_BRANCH: &str = "main";

/// Per-request timeout in seconds for listing and download calls.
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// Block size for streaming a response body to disk.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Manifest size at which downloads switch to the worker pool.
pub const DEFAULT_THREAD_THRESHOLD: usize = 6;

/// File name of the on-disk settings file inside the project config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";
