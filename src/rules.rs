//! Classification rules for course folders and the files inside them.
//!
//! Everything here is a pure function over a folder or file name. The builder
//! consults [`FOLDER_RULES`] and [`ROOT_FILE_RULES`] in order and the first
//! matching rule decides where an entry goes, so priority is the position in
//! the table.

use crate::constants::*;
use crate::models::CourseNames;
use regex::Regex;
use std::sync::LazyLock;

static COURSE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COURSE_CODE_PATTERN).expect("course code pattern"));
static ACADEMIC_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ACADEMIC_YEAR_PATTERN).expect("academic year pattern"));
static WEEK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WEEK_IDENTIFIER_PATTERN).expect("week pattern"));
static PRACTICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PRACTICE_IDENTIFIER_PATTERN).expect("practice pattern"));

// ============================================================================
// Folder Kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamKind {
    Finals,
    Midterms,
}

impl ExamKind {
    pub fn label(self) -> &'static str {
        match self {
            ExamKind::Finals => "Finals",
            ExamKind::Midterms => "Midterms",
        }
    }
}

/// What a category folder under a course folder holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderKind {
    Practice,
    Exam(ExamKind),
    ProblemSheets,
    LectureNotes,
}

pub struct FolderRule {
    pub label: &'static str,
    pub classify: fn(&str) -> Option<FolderKind>,
}

/// Folder routing table. Practice is checked before exams so a
/// "Finals - Practice" folder is not mistaken for past-year papers.
pub const FOLDER_RULES: &[FolderRule] = &[
    FolderRule {
        label: "practice",
        classify: practice_folder,
    },
    FolderRule {
        label: "exam",
        classify: exam_folder,
    },
    FolderRule {
        label: "problem-sheets",
        classify: problem_sheet_folder,
    },
    FolderRule {
        label: "lecture-notes",
        classify: lecture_notes_folder,
    },
];

fn practice_folder(name: &str) -> Option<FolderKind> {
    name.contains(PRACTICE_FOLDER_MARKER)
        .then_some(FolderKind::Practice)
}

fn exam_folder(name: &str) -> Option<FolderKind> {
    if name.contains(FINALS_FOLDER_MARKER) {
        Some(FolderKind::Exam(ExamKind::Finals))
    } else if name.contains(MIDTERMS_FOLDER_MARKER) {
        Some(FolderKind::Exam(ExamKind::Midterms))
    } else {
        None
    }
}

fn problem_sheet_folder(name: &str) -> Option<FolderKind> {
    contains_any(name, PROBLEM_SHEET_FOLDER_MARKERS).then_some(FolderKind::ProblemSheets)
}

fn lecture_notes_folder(name: &str) -> Option<FolderKind> {
    contains_any(name, LECTURE_NOTES_FOLDER_MARKERS).then_some(FolderKind::LectureNotes)
}

/// First matching folder rule, or `None` for folders that are ignored
pub fn classify_folder(name: &str) -> Option<FolderKind> {
    FOLDER_RULES.iter().find_map(|rule| (rule.classify)(name))
}

// ============================================================================
// Root Files
// ============================================================================

/// Files sitting directly in a course folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFileKind {
    RevisionNote,
    CheatSheet,
    Archive,
}

pub struct RootFileRule {
    pub kind: RootFileKind,
    pub matches: fn(&str) -> bool,
}

pub const ROOT_FILE_RULES: &[RootFileRule] = &[
    RootFileRule {
        kind: RootFileKind::RevisionNote,
        matches: is_revision_note,
    },
    RootFileRule {
        kind: RootFileKind::CheatSheet,
        matches: is_cheat_sheet,
    },
    RootFileRule {
        kind: RootFileKind::Archive,
        matches: is_archive,
    },
];

pub fn is_pdf(name: &str) -> bool {
    name.ends_with(PDF_EXTENSION)
}

pub fn is_archive(name: &str) -> bool {
    name.ends_with(ZIP_EXTENSION)
}

fn is_revision_note(name: &str) -> bool {
    name.contains(REVISION_NOTE_MARKER) && is_pdf(name)
}

fn is_cheat_sheet(name: &str) -> bool {
    contains_any(&name.to_lowercase(), CHEAT_SHEET_MARKERS) && is_pdf(name)
}

pub fn classify_root_file(name: &str) -> Option<RootFileKind> {
    ROOT_FILE_RULES
        .iter()
        .find(|rule| (rule.matches)(name))
        .map(|rule| rule.kind)
}

// ============================================================================
// File Name Extraction
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialType {
    QuestionPaper,
    ExaminerReport,
    Solution,
    Other,
}

pub fn extract_material_type(name: &str) -> MaterialType {
    if name.contains(QUESTION_PAPER_MARKER) {
        MaterialType::QuestionPaper
    } else if contains_any(name, EXAMINER_REPORT_MARKERS) {
        MaterialType::ExaminerReport
    } else if name.contains(SOLUTION_MARKER) {
        MaterialType::Solution
    } else {
        MaterialType::Other
    }
}

/// Academic year such as `21-22`. Both `_21-22_` and a trailing `_21-22` are
/// accepted.
pub fn extract_academic_year(name: &str) -> Option<String> {
    ACADEMIC_YEAR_RE
        .captures(name)
        .map(|caps| caps[1].to_string())
}

/// Bucket key for a file found in a practice folder. Never fails: files with
/// no week or practice number share the generic `Practice` bucket.
pub fn extract_practice_identifier(name: &str) -> String {
    if let Some(caps) = WEEK_RE.captures(name) {
        return format!("Week {}", &caps[1]);
    }
    if let Some(caps) = PRACTICE_RE.captures(name) {
        return format!("Practice {}", &caps[1]);
    }
    GENERIC_PRACTICE_IDENTIFIER.to_string()
}

// ============================================================================
// Course Identity
// ============================================================================

pub fn is_course_folder(name: &str) -> bool {
    COURSE_CODE_RE.is_match(name)
}

/// Leading course code of a folder name, or the whole name if it has none
pub fn normalise_course_code(folder_name: &str) -> String {
    COURSE_CODE_RE
        .captures(folder_name)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| folder_name.to_string())
}

pub fn resolve_course_name(code: &str, folder_name: &str, names: &CourseNames) -> String {
    names
        .get(code)
        .cloned()
        .unwrap_or_else(|| folder_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_rules_priority() {
        assert_eq!(
            classify_folder("MH1100 - Finals - Practice"),
            Some(FolderKind::Practice)
        );
        assert_eq!(
            classify_folder("MH1100 - Finals & Midterms"),
            Some(FolderKind::Exam(ExamKind::Finals))
        );
        assert_eq!(
            classify_folder("MH1100 - Midterms"),
            Some(FolderKind::Exam(ExamKind::Midterms))
        );
        assert_eq!(
            classify_folder("MH1100 - Tutorials (AY21-22)"),
            Some(FolderKind::ProblemSheets)
        );
        assert_eq!(
            classify_folder("MH1100 - Problem Sheets"),
            Some(FolderKind::ProblemSheets)
        );
        assert_eq!(
            classify_folder("MH1100 - Lecture Notes"),
            Some(FolderKind::LectureNotes)
        );
        assert_eq!(classify_folder("Misc"), None);
    }

    #[test]
    fn test_folder_rule_order() {
        let labels: Vec<_> = FOLDER_RULES.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec!["practice", "exam", "problem-sheets", "lecture-notes"]
        );
    }

    #[test]
    fn test_root_file_rules() {
        assert_eq!(
            classify_root_file("MH1100_RevisionNotes.pdf"),
            Some(RootFileKind::RevisionNote)
        );
        assert_eq!(
            classify_root_file("MH1100_CheatSheet.pdf"),
            Some(RootFileKind::CheatSheet)
        );
        assert_eq!(
            classify_root_file("mh1100-cheat-sheet.pdf"),
            Some(RootFileKind::CheatSheet)
        );
        assert_eq!(
            classify_root_file("MH1100_Finals.zip"),
            Some(RootFileKind::Archive)
        );
        // revision notes must be PDFs; a zip still counts as an archive
        assert_eq!(
            classify_root_file("MH1100_RevisionNotes.zip"),
            Some(RootFileKind::Archive)
        );
        assert_eq!(classify_root_file("MH1100_RevisionNotes.docx"), None);
        assert_eq!(classify_root_file("README.md"), None);
    }

    #[test]
    fn test_root_file_rule_priority() {
        assert_eq!(
            classify_root_file("MH1100_RevisionNotes_CheatSheet.pdf"),
            Some(RootFileKind::RevisionNote)
        );
        assert_eq!(
            classify_root_file("MH1100_CheatSheet.zip"),
            Some(RootFileKind::Archive)
        );
    }

    #[test]
    fn test_course_code_normalisation() {
        assert_eq!(normalise_course_code("MH1100"), "MH1100");
        assert_eq!(normalise_course_code("MH1100 - Calculus I"), "MH1100");
        assert_eq!(normalise_course_code("HE10025"), "HE1002");
        assert_eq!(normalise_course_code("mh1100"), "mh1100");
        assert_eq!(normalise_course_code("Archive"), "Archive");
        assert!(is_course_folder("CZ2001 Algorithms"));
        assert!(!is_course_folder("X1234"));
    }

    #[test]
    fn test_course_name_falls_back_to_folder() {
        let mut names = CourseNames::new();
        names.insert("MH1100".to_string(), "Calculus I".to_string());

        assert_eq!(resolve_course_name("MH1100", "MH1100", &names), "Calculus I");
        assert_eq!(
            resolve_course_name("MH1200", "MH1200 - Linear Algebra", &names),
            "MH1200 - Linear Algebra"
        );
    }

    #[test]
    fn test_academic_year_extraction() {
        assert_eq!(
            extract_academic_year("MH1100_Finals_21-22_QuestionPaper.pdf").as_deref(),
            Some("21-22")
        );
        assert_eq!(
            extract_academic_year("MH1100_Finals_21-22").as_deref(),
            Some("21-22")
        );
        assert_eq!(extract_academic_year("MH1100_Finals_21-22.pdf"), None);
        assert_eq!(extract_academic_year("MH1100_Finals_2021-2022_QuestionPaper.pdf"), None);
        assert_eq!(extract_academic_year("MH1100_Finals_QuestionPaper.pdf"), None);
    }

    #[test]
    fn test_material_type_priority() {
        assert_eq!(
            extract_material_type("X_21-22_QuestionPaper.pdf"),
            MaterialType::QuestionPaper
        );
        assert_eq!(
            extract_material_type("X_21-22_Examiner's Report.pdf"),
            MaterialType::ExaminerReport
        );
        assert_eq!(
            extract_material_type("X_21-22_ExaminersReport.pdf"),
            MaterialType::ExaminerReport
        );
        assert_eq!(
            extract_material_type("X_21-22_Solution by QRS.pdf"),
            MaterialType::Solution
        );
        assert_eq!(
            extract_material_type("X_21-22_QuestionPaper_Solution.pdf"),
            MaterialType::QuestionPaper
        );
        assert_eq!(extract_material_type("X_21-22_Notes.pdf"), MaterialType::Other);
    }

    #[test]
    fn test_practice_identifier_extraction() {
        assert_eq!(
            extract_practice_identifier("MH1100_Week 2_QuestionPaper.pdf"),
            "Week 2"
        );
        assert_eq!(
            extract_material_type("MH1100_Week 2_QuestionPaper.pdf"),
            MaterialType::QuestionPaper
        );
        assert_eq!(
            extract_practice_identifier("MH1100_Practice 1_Solution.pdf"),
            "Practice 1"
        );
        assert_eq!(
            extract_material_type("MH1100_Practice 1_Solution.pdf"),
            MaterialType::Solution
        );
        assert_eq!(
            extract_practice_identifier("MH1100_practice_notes.pdf"),
            "Practice"
        );
        assert_eq!(extract_practice_identifier("MH1100_week3.pdf"), "Week 3");
        assert_eq!(extract_practice_identifier("MH1100_weekly.pdf"), "Practice");
        assert_eq!(extract_practice_identifier("MH1100_week3_x.pdf"), "Week 3");
        assert_eq!(extract_practice_identifier("random.pdf"), "Practice");
    }
}
