use crate::error::Result;
use crate::models::{CourseNames, Snapshot};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load the course code → display name table.
///
/// A missing file is not fatal: every course then falls back to its folder
/// name. A file that exists but is not a JSON object of strings is an error.
pub fn load_course_names(path: &Path) -> Result<CourseNames> {
    if !path.exists() {
        warn!(
            "Course name table not found at {}, using folder names",
            path.display()
        );
        return Ok(CourseNames::new());
    }

    let content = fs::read_to_string(path)?;
    let names: CourseNames = serde_json::from_str(&content)?;
    debug!("Loaded {} course names from {}", names.len(), path.display());
    Ok(names)
}

/// Read a snapshot artifact from disk
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
