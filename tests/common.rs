// tests/common.rs
#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Mutex};

// Helper function to get the binary command
#[allow(dead_code)] // This is used by many integration tests, but not all.
pub fn regsync_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("regsync"))
}

/// Whether a `git` executable is on PATH. Clone-based tests skip without one.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[derive(Clone)]
struct MockResponse {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
}

type Routes = Arc<Mutex<HashMap<String, MockResponse>>>;

async fn serve_route(State(routes): State<Routes>, uri: Uri) -> Response {
    let found = routes.lock().unwrap().get(uri.path()).cloned();
    match found {
        Some(r) => (r.status, [(header::CONTENT_TYPE, r.content_type)], r.body).into_response(),
        None => (StatusCode::NOT_FOUND, "not mocked").into_response(),
    }
}

/// A stand-in for the GitHub contents API and raw file host.
///
/// Routes are matched on the request path only (the `?ref=` query is ignored)
/// and can be changed while the server runs.
pub struct MockGitHub {
    base_url: String,
    routes: Routes,
}

impl MockGitHub {
    /// Starts the server on `127.0.0.1` with its own runtime in a background thread.
    pub fn start() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes: Routes = Arc::new(Mutex::new(HashMap::new()));

        let app = Router::new()
            .fallback(serve_route)
            .with_state(routes.clone());
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self { base_url, routes }
    }

    /// The base URL, usable as the API base.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn set(&self, path: &str, response: MockResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), response);
    }

    /// Serves `value` as JSON at `path`.
    pub fn json(&self, path: &str, value: Value) {
        self.set(
            path,
            MockResponse {
                status: StatusCode::OK,
                content_type: "application/json",
                body: serde_json::to_vec(&value).unwrap(),
            },
        );
    }

    /// Serves raw bytes at `path`.
    pub fn file(&self, path: &str, body: &str) {
        self.set(
            path,
            MockResponse {
                status: StatusCode::OK,
                content_type: "application/octet-stream",
                body: body.as_bytes().to_vec(),
            },
        );
    }

    /// Answers `path` with an empty body and `status`.
    pub fn status(&self, path: &str, status: u16) {
        self.set(
            path,
            MockResponse {
                status: StatusCode::from_u16(status).unwrap(),
                content_type: "text/plain",
                body: Vec::new(),
            },
        );
    }

    /// Contents API path for `repo_path` of `owner/repo`.
    pub fn contents_path(owner: &str, repo: &str, repo_path: &str) -> String {
        format!("/repos/{}/{}/contents/{}", owner, repo, repo_path)
    }

    /// A `type: file` listing entry whose bytes live at `raw_path`.
    pub fn file_entry(&self, name: &str, raw_path: &str) -> Value {
        json!({
            "name": name,
            "type": "file",
            "url": self.url(&format!("/meta{}", raw_path)),
            "download_url": self.url(raw_path),
        })
    }

    /// A `type: dir` listing entry listed at `listing_path`.
    pub fn dir_entry(&self, name: &str, listing_path: &str) -> Value {
        json!({
            "name": name,
            "type": "dir",
            "url": self.url(listing_path),
            "download_url": null,
        })
    }
}

/// Relative paths of every file under `root`, sorted, with `/` separators.
pub fn list_files(root: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(
                    rel.components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect::<Vec<_>>()
                        .join("/"),
                );
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
