// src/constants.rs

/// Upstream repository holding the regex definition files.
pub const DEFAULT_REPO_URL: &str = "https://github.com/matomo-org/device-detector.git";

/// Branch synchronized when none is given.
pub const DEFAULT_BRANCH: &str = "master";

/// Subdirectory of the upstream repository that is mirrored.
pub const DEFAULT_SPARSE_DIR: &str = "regexes";

/// Local destination used by the command line when `--path` is omitted.
pub const DEFAULT_TARGET_PATH: &str = "regexes/upstream";

/// Base URL of the GitHub REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Host prefix every browsing URL must start with.
pub const GITHUB_WEB_PREFIX: &str = "https://github.com/";

/// Empty file written at the target root once a sync completes.
/// Downstream loaders check for it to know the directory is populated.
pub const DEFAULT_MARKER_FILE: &str = "__init__.py";

/// Per-request timeout for the API strategy, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable consulted for an API access token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// `User-Agent` header sent with every API request.
pub const USER_AGENT: &str = concat!("regsync/", env!("CARGO_PKG_VERSION"));
