use crate::error::Result;
use crate::models::{CourseRecord, Snapshot};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use tracing::info;

/// Wrap a built catalog with its generation time
pub fn make_snapshot(courses: Vec<CourseRecord>, generated_at: DateTime<Utc>) -> Snapshot {
    Snapshot::new(courses, generated_at)
}

/// Serialize the snapshot as pretty-printed JSON, replacing whatever was at
/// `path` before. Parent directories are created as needed.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;

    info!(
        "Wrote {} courses to {}",
        snapshot.courses.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_snapshot;
    use crate::models::MaterialSet;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn course(code: &str) -> CourseRecord {
        CourseRecord {
            code: code.to_string(),
            name: code.to_string(),
            folder_name: code.to_string(),
            source_url: format!("https://github.com/yuhesui/QRSNTU/tree/main/Notes/{}", code),
            materials: MaterialSet::default(),
        }
    }

    #[test]
    fn test_write_replaces_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Website/v1/courses.json");
        let generated_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        write_snapshot(
            &path,
            &make_snapshot(vec![course("MH1100"), course("MH1200")], generated_at),
        )
        .unwrap();
        write_snapshot(&path, &make_snapshot(vec![course("HE1002")], generated_at)).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.courses.len(), 1);
        assert_eq!(loaded.courses[0].code, "HE1002");
        assert_eq!(loaded.generated_at, Some(generated_at));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"generatedAt\": \"2024-01-02T03:04:05.000Z\""));
        assert!(raw.contains("\"folderName\": \"HE1002\""));
    }
}
