use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Course code to display name, read from the course-name side table
pub type CourseNames = HashMap<String, String>;

// ============================================================================
// Catalog Records
// ============================================================================

/// A single downloadable file matched by a classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub name: String,
    /// Repo-relative path, e.g. `Notes/MH1100/MH1100 - Finals/MH1100_Finals_21-22_QuestionPaper.pdf`
    pub path: String,
    pub download_url: String,
}

/// Papers, solutions and examiner's reports for one academic year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamYearBucket {
    #[serde(default)]
    pub papers: Vec<FileRef>,
    #[serde(default)]
    pub solutions: Vec<FileRef>,
    #[serde(default)]
    pub reports: Vec<FileRef>,
}

impl ExamYearBucket {
    pub fn file_count(&self) -> usize {
        self.papers.len() + self.solutions.len() + self.reports.len()
    }
}

/// Papers and solutions sharing a practice identifier ("Practice 1", "Week 2").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeBucket {
    #[serde(default)]
    pub papers: Vec<FileRef>,
    #[serde(default)]
    pub solutions: Vec<FileRef>,
}

impl PracticeBucket {
    pub fn file_count(&self) -> usize {
        self.papers.len() + self.solutions.len()
    }
}

/// Every material kind collected for a course. All fields default to empty so
/// snapshots written by older builders still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialSet {
    pub finals: BTreeMap<String, ExamYearBucket>,
    pub midterms: BTreeMap<String, ExamYearBucket>,
    pub revision_notes: Vec<FileRef>,
    pub cheat_sheets: Vec<FileRef>,
    pub problem_sheets: Vec<FileRef>,
    pub lecture_notes: Vec<FileRef>,
    pub practice_materials: BTreeMap<String, PracticeBucket>,
    pub past_year_zips: Vec<FileRef>,
}

impl MaterialSet {
    /// Sum of every file across every bucket, nested exam and practice
    /// buckets included. Used as the catalog sort key.
    pub fn file_count(&self) -> usize {
        let flat = self.revision_notes.len()
            + self.cheat_sheets.len()
            + self.problem_sheets.len()
            + self.lecture_notes.len()
            + self.past_year_zips.len();

        let exams: usize = self
            .finals
            .values()
            .chain(self.midterms.values())
            .map(ExamYearBucket::file_count)
            .sum();

        let practice: usize = self
            .practice_materials
            .values()
            .map(PracticeBucket::file_count)
            .sum();

        flat + exams + practice
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    /// Normalized course code (`MH1100`), or the folder name when it has no code prefix
    pub code: String,
    pub name: String,
    pub folder_name: String,
    /// Browse URL of the course folder on the repository host
    #[serde(alias = "githubUrl")]
    pub source_url: String,
    #[serde(default)]
    pub materials: MaterialSet,
}

// ============================================================================
// Snapshot Artifact
// ============================================================================

/// The serialized catalog: `{ "courses": [...], "generatedAt": "<ISO-8601>" }`.
///
/// `generatedAt` is always written, but snapshots without it still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub courses: Vec<CourseRecord>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub generated_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new(courses: Vec<CourseRecord>, generated_at: DateTime<Utc>) -> Self {
        Self {
            courses,
            generated_at: Some(generated_at),
        }
    }
}

/// Millisecond precision with a `Z` suffix, e.g. `2024-05-01T08:30:00.000Z`.
fn serialize_timestamp<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(at) => serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(serde::de::Error::custom)
}
