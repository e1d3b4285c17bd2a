//! Runtime configuration loaded from an optional TOML file.
//!
//! ```toml
//! notes_root = "Notes"
//! output = "Website/v1/courses.json"
//!
//! [links]
//! repo = "yuhesui/QRSNTU"
//!
//! [consumer]
//! app_version = "1.6"
//! ```

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "notes-catalog.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory whose immediate children are course folders
    pub notes_root: PathBuf,
    /// Repo-relative prefix placed in front of every `FileRef.path`
    pub notes_prefix: String,
    /// JSON object mapping course code to display name
    pub course_names: PathBuf,
    /// Snapshot artifact written by `build`
    pub output: PathBuf,
    pub links: RepoLinks,
    pub consumer: ConsumerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_root: PathBuf::from("Notes"),
            notes_prefix: "Notes".to_string(),
            course_names: PathBuf::from(".github/data/course-names.json"),
            output: PathBuf::from("Website/v1/courses.json"),
            links: RepoLinks::default(),
            consumer: ConsumerConfig::default(),
        }
    }
}

impl Config {
    /// Load `path`, or [`DEFAULT_CONFIG_FILE`] when none is given. A missing
    /// default file yields the built-in defaults; a missing explicit file is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if explicit {
                return Err(crate::error::CatalogError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Snapshot location the consumer reads from, defaulting to the build output
    pub fn snapshot_source(&self) -> String {
        self.consumer
            .snapshot
            .clone()
            .unwrap_or_else(|| self.output.display().to_string())
    }
}

// ============================================================================
// Download URLs
// ============================================================================

/// Where the course repository is hosted. All URLs are plain string templates
/// over a repo-relative path.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepoLinks {
    pub raw_host: String,
    pub repo_host: String,
    /// `owner/name`
    pub repo: String,
    pub branch: String,
}

impl Default for RepoLinks {
    fn default() -> Self {
        Self {
            raw_host: "https://raw.githubusercontent.com".to_string(),
            repo_host: "https://github.com".to_string(),
            repo: "yuhesui/QRSNTU".to_string(),
            branch: "main".to_string(),
        }
    }
}

impl RepoLinks {
    /// `<raw-host>/<repo>/<branch>/<path>`
    pub fn raw_url(&self, relative_path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.raw_host.trim_end_matches('/'),
            self.repo,
            self.branch,
            encode_path(relative_path)
        )
    }

    /// `<repo-host>/<repo>/raw/<branch>/<path>`, used for archives
    pub fn archive_url(&self, relative_path: &str) -> String {
        format!(
            "{}/{}/raw/{}/{}",
            self.repo_host.trim_end_matches('/'),
            self.repo,
            self.branch,
            encode_path(relative_path)
        )
    }

    /// Browse URL for a directory in the repository
    pub fn tree_url(&self, relative_path: &str) -> String {
        format!(
            "{}/{}/tree/{}/{}",
            self.repo_host.trim_end_matches('/'),
            self.repo,
            self.branch,
            encode_path(relative_path)
        )
    }
}

/// Percent-encode each segment of a `/`-separated path, keeping the separators
fn encode_path(relative_path: &str) -> String {
    relative_path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// Consumer Settings
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsumerConfig {
    /// Snapshot path or `http(s)://` URL
    pub snapshot: Option<String>,
    /// Cache-busting tag appended as `?v=`. Bump it when the snapshot changes.
    pub app_version: String,
    /// Maximum solutions rendered per bucket
    pub solutions_cap: usize,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            app_version: "1.5".to_string(),
            solutions_cap: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_links() {
        let links = RepoLinks::default();
        assert_eq!(
            links.raw_url("Notes/MH1100/MH1100_RevisionNotes.pdf"),
            "https://raw.githubusercontent.com/yuhesui/QRSNTU/main/Notes/MH1100/MH1100_RevisionNotes.pdf"
        );
        assert_eq!(
            links.archive_url("Notes/MH1100/Finals.zip"),
            "https://github.com/yuhesui/QRSNTU/raw/main/Notes/MH1100/Finals.zip"
        );
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let links = RepoLinks::default();
        assert_eq!(
            links.raw_url("Notes/MH1100/MH1100 - Finals/MH1100_Examiner's Report.pdf"),
            "https://raw.githubusercontent.com/yuhesui/QRSNTU/main/Notes/MH1100/MH1100%20-%20Finals/MH1100_Examiner%27s%20Report.pdf"
        );
        assert_eq!(
            links.tree_url("Notes/MH1100 Calculus"),
            "https://github.com/yuhesui/QRSNTU/tree/main/Notes/MH1100%20Calculus"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
notes_root = "fixtures/Notes"

[links]
repo = "someone/mirror"

[consumer]
app_version = "2.0"
"#,
        )
        .unwrap();

        assert_eq!(config.notes_root, PathBuf::from("fixtures/Notes"));
        assert_eq!(config.notes_prefix, "Notes");
        assert_eq!(config.links.repo, "someone/mirror");
        assert_eq!(config.links.branch, "main");
        assert_eq!(config.consumer.app_version, "2.0");
        assert_eq!(config.consumer.solutions_cap, 2);
        assert_eq!(config.snapshot_source(), "Website/v1/courses.json");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/notes-catalog.toml")));
        assert!(result.is_err());
    }
}
