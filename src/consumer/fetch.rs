use crate::error::{CatalogError, Result};
use crate::models::Snapshot;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// Where the consumer reads the snapshot from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    Http(Url),
    File(PathBuf),
}

impl SnapshotSource {
    /// `http://` and `https://` locations are fetched, anything else is a path
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SnapshotSource::Http(url),
            _ => SnapshotSource::File(PathBuf::from(location)),
        }
    }
}

/// Append the cache-busting `v=<version>` query parameter
pub fn cache_busted(url: &Url, version: &str) -> Url {
    let mut url = url.clone();
    url.query_pairs_mut().append_pair("v", version);
    url
}

/// Load the snapshot once. There are no retries: a failed fetch is returned to
/// the caller, which shows it instead of the course list.
pub async fn fetch_snapshot(source: &SnapshotSource, version: &str) -> Result<Snapshot> {
    fetch_snapshot_with(&reqwest::Client::new(), source, version).await
}

pub async fn fetch_snapshot_with(
    client: &reqwest::Client,
    source: &SnapshotSource,
    version: &str,
) -> Result<Snapshot> {
    match source {
        SnapshotSource::Http(url) => {
            let url = cache_busted(url, version);
            debug!("Fetching snapshot from {}", url);

            let response = client.get(url.clone()).send().await?;
            if !response.status().is_success() {
                return Err(CatalogError::SnapshotFetch {
                    status: response.status().as_u16(),
                    url: url.to_string(),
                });
            }
            Ok(response.json::<Snapshot>().await?)
        }
        SnapshotSource::File(path) => {
            debug!("Reading snapshot from {}", path.display());
            let content = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&content)?)
        }
    }
}

/// Value of the `course=` query parameter of a page URL, used to pre-populate
/// the search box
pub fn course_param(page_url: &str) -> Result<Option<String>> {
    let url = Url::parse(page_url)?;
    Ok(url
        .query_pairs()
        .find(|(key, _)| key == "course")
        .map(|(_, value)| value.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert!(matches!(
            SnapshotSource::parse("https://example.test/v1/courses.json"),
            SnapshotSource::Http(_)
        ));
        assert_eq!(
            SnapshotSource::parse("Website/v1/courses.json"),
            SnapshotSource::File(PathBuf::from("Website/v1/courses.json"))
        );
        assert!(matches!(
            SnapshotSource::parse("/abs/courses.json"),
            SnapshotSource::File(_)
        ));
    }

    #[test]
    fn test_cache_busted() {
        let url = Url::parse("https://example.test/v1/courses.json").unwrap();
        assert_eq!(
            cache_busted(&url, "1.5").as_str(),
            "https://example.test/v1/courses.json?v=1.5"
        );
    }

    #[test]
    fn test_course_param() {
        assert_eq!(
            course_param("https://example.test/v1/?course=MH1100").unwrap(),
            Some("MH1100".to_string())
        );
        assert_eq!(
            course_param("https://example.test/v1/?course=Linear%20Algebra").unwrap(),
            Some("Linear Algebra".to_string())
        );
        assert_eq!(course_param("https://example.test/v1/").unwrap(), None);
        assert!(course_param("not a url").is_err());
    }
}
