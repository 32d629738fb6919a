//! Handles parsing of git and GitHub URLs.

use crate::constants::GITHUB_WEB_PREFIX;
use crate::errors::{Result, SyncError};
use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use url::Url;

/// Bytes escaped inside one path segment of a contents URL.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Bytes escaped in the `ref` query value. `/` stays literal for branch names like `release/2.0`.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>');

/// The structured coordinates of a GitHub browsing URL.
///
/// `target_path` holds the ancestor segments of `target`, joined with `/`;
/// [`RepoCoordinate::full_path`] puts them back together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinate {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch the URL browses.
    pub branch: String,
    /// Final path segment: the file or directory being synchronized.
    pub target: String,
    /// Slash-joined ancestor segments of `target`. Empty when `target` sits at the repository root.
    pub target_path: String,
}

impl RepoCoordinate {
    /// Builds the coordinate of `dir` on `branch` of a GitHub clone URL.
    ///
    /// The branch is taken as-is, so names containing `/` survive; `dir` is
    /// split on its last `/` into `target_path` and `target`.
    ///
    /// ```
    /// use regsync::git::RepoCoordinate;
    ///
    /// let coord = RepoCoordinate::from_clone_url(
    ///     "https://github.com/matomo-org/device-detector.git",
    ///     "release/6.4",
    ///     "regexes/client",
    /// )
    /// .unwrap();
    /// assert_eq!(coord.branch, "release/6.4");
    /// assert_eq!(coord.target, "client");
    /// assert_eq!(coord.target_path, "regexes");
    /// ```
    ///
    /// # Errors
    /// Returns [`SyncError::InvalidUrl`] when the clone URL is not a GitHub
    /// repository or `dir` is empty.
    pub fn from_clone_url(clone_url: &str, branch: &str, dir: &str) -> Result<Self> {
        let (owner, repo) = parse_clone_url(clone_url)?;
        let dir = dir.trim_matches('/');
        if dir.is_empty() {
            return Err(invalid(clone_url, "no repository path to synchronize"));
        }
        let (target_path, target) = dir.rsplit_once('/').unwrap_or(("", dir));
        Ok(Self {
            owner,
            repo,
            branch: branch.to_string(),
            target: target.to_string(),
            target_path: target_path.to_string(),
        })
    }

    /// The path of `target` relative to the repository root.
    pub fn full_path(&self) -> String {
        if self.target_path.is_empty() {
            self.target.clone()
        } else {
            format!("{}/{}", self.target_path, self.target)
        }
    }

    /// The contents API listing URL for this coordinate.
    ///
    /// ```
    /// use regsync::git::normalize_github_url;
    ///
    /// let coord = normalize_github_url("https://github.com/matomo-org/device-detector/tree/master/regexes").unwrap();
    /// assert_eq!(
    ///     coord.contents_url("https://api.github.com"),
    ///     "https://api.github.com/repos/matomo-org/device-detector/contents/regexes?ref=master"
    /// );
    /// ```
    ///
    /// Path segments and the branch are percent-encoded.
    pub fn contents_url(&self, api_base_url: &str) -> String {
        let path = self
            .full_path()
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            api_base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            path,
            utf8_percent_encode(&self.branch, QUERY_VALUE)
        )
    }
}

/// Checks if a given string is a likely git repository URL.
///
/// This is a simple heuristic check and does not validate the URL's format.
///
/// # Examples
/// ```
/// use regsync::git::is_git_url;
///
/// assert!(is_git_url("https://github.com/user/repo.git"));
/// assert!(is_git_url("git@github.com:user/repo.git"));
/// assert!(!is_git_url("/local/path/to/repo"));
/// ```
pub fn is_git_url(path_str: &str) -> bool {
    path_str.starts_with("https://")
        || path_str.starts_with("http://")
        || path_str.starts_with("git@")
        || path_str.starts_with("file://")
}

fn invalid(url: &str, reason: impl Into<String>) -> SyncError {
    SyncError::InvalidUrl {
        url: url.to_string(),
        reason: reason.into(),
    }
}

/// Decomposes a GitHub browsing URL into a [`RepoCoordinate`].
///
/// The URL must look like `https://github.com/<owner>/<repo>/tree/<branch>/<path...>`.
/// Parsing is purely syntactic; nothing is fetched.
///
/// # Errors
/// Returns [`SyncError::InvalidUrl`] when the host prefix is not GitHub's, when the
/// path has fewer than five segments, or when the segment after `<repo>` is not `tree`.
///
/// # Examples
/// ```
/// use regsync::git::normalize_github_url;
///
/// let coord = normalize_github_url("https://github.com/rust-lang/cargo/tree/master/src/cargo").unwrap();
/// assert_eq!(coord.owner, "rust-lang");
/// assert_eq!(coord.repo, "cargo");
/// assert_eq!(coord.branch, "master");
/// assert_eq!(coord.target, "cargo");
/// assert_eq!(coord.target_path, "src");
///
/// assert!(normalize_github_url("https://gitlab.com/user/repo/tree/master/dir").is_err());
/// ```
pub fn normalize_github_url(github_url: &str) -> Result<RepoCoordinate> {
    let github_url = github_url.trim();
    if !github_url.to_lowercase().starts_with(GITHUB_WEB_PREFIX) {
        return Err(invalid(github_url, "not a GitHub URL"));
    }

    let parsed = Url::parse(github_url).map_err(|e| invalid(github_url, e.to_string()))?;
    let segments = parsed
        .path()
        .trim_start_matches('/')
        .trim_end_matches('/')
        .split('/')
        .map(|s| {
            percent_decode_str(s)
                .decode_utf8()
                .map(|decoded| decoded.into_owned())
                .map_err(|e| invalid(github_url, e.to_string()))
        })
        .collect::<Result<Vec<String>>>()?;

    if segments.len() < 5 {
        return Err(invalid(
            github_url,
            "expected /<owner>/<repo>/tree/<branch>/<path>",
        ));
    }
    if segments[2] != "tree" {
        return Err(invalid(
            github_url,
            format!("expected 'tree' after the repository name, found '{}'", segments[2]),
        ));
    }
    if segments[..2].iter().chain(&segments[3..]).any(|s| s.is_empty()) {
        return Err(invalid(github_url, "empty path segment"));
    }

    let last = segments.len() - 1;
    Ok(RepoCoordinate {
        owner: segments[0].clone(),
        repo: segments[1].clone(),
        branch: segments[3].clone(),
        target: segments[last].clone(),
        target_path: segments[4..last].join("/"),
    })
}

/// Parses the owner and repository name from a GitHub clone URL.
///
/// This function handles common GitHub URL formats, including `https://...` and `git@...`,
/// and with or without a `.git` suffix.
///
/// # Examples
/// ```
/// # use regsync::git::parse_clone_url;
/// let (owner, repo) = parse_clone_url("https://github.com/matomo-org/device-detector.git").unwrap();
/// assert_eq!(owner, "matomo-org");
/// assert_eq!(repo, "device-detector");
///
/// let (owner, repo) = parse_clone_url("git@github.com:rust-lang/cargo.git").unwrap();
/// assert_eq!(owner, "rust-lang");
/// assert_eq!(repo, "cargo");
/// ```
pub fn parse_clone_url(clone_url: &str) -> Result<(String, String)> {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:https?://github\.com/|git@github\.com:)([^/]+)/([^/]+?)(?:\.git)?/?$")
            .expect("clone URL regex is valid")
    });
    RE.captures(clone_url.trim())
        .and_then(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .map(|(owner, repo)| (owner.to_string(), repo.to_string()))
        .ok_or_else(|| invalid(clone_url, "could not parse owner/repo from a GitHub clone URL"))
}
