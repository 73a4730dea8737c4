//! CI runner context read from the environment.
//!
//! These values describe where the gate runs rather than how it judges
//! coverage, so they are read directly and never validated into warnings.

use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiEnvironment {
    /// File receiving the Markdown job summary (`GITHUB_STEP_SUMMARY`).
    pub step_summary: Option<PathBuf>,
    /// JSON payload of the triggering event (`GITHUB_EVENT_PATH`).
    pub event_path: Option<PathBuf>,
    /// REST API base URL (`GITHUB_API_URL`).
    pub api_url: String,
    /// Checkout root used to shorten absolute paths (`GITHUB_WORKSPACE`).
    pub workspace: Option<PathBuf>,
}

impl Default for CiEnvironment {
    fn default() -> Self {
        Self {
            step_summary: None,
            event_path: None,
            api_url: DEFAULT_API_URL.to_string(),
            workspace: None,
        }
    }
}

impl CiEnvironment {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            step_summary: get("GITHUB_STEP_SUMMARY").map(PathBuf::from),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            api_url: get("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            workspace: get("GITHUB_WORKSPACE").map(PathBuf::from),
        }
    }

    /// Path as shown in annotations and tables: relative to the workspace
    /// when it lies inside it, unchanged otherwise.
    pub fn display_path(&self, path: &str) -> String {
        self.workspace
            .as_deref()
            .and_then(|root| Path::new(path).strip_prefix(root).ok())
            .map(|relative| relative.to_string_lossy().into_owned())
            .filter(|relative| !relative.is_empty())
            .unwrap_or_else(|| path.to_string())
    }
}
