// ============================================================================
// Folder Naming Conventions
// ============================================================================

/// Any category folder containing this marker holds practice materials
pub const PRACTICE_FOLDER_MARKER: &str = "Practice";

/// Exam folder markers, in priority order ("Finals" wins if both are present)
pub const FINALS_FOLDER_MARKER: &str = "Finals";
pub const MIDTERMS_FOLDER_MARKER: &str = "Midterms";

/// Problem sheets are published either as "Problem Sheets" or "Tutorials"
pub const PROBLEM_SHEET_FOLDER_MARKERS: &[&str] = &["Problem Sheets", "Tutorials"];

pub const LECTURE_NOTES_FOLDER_MARKERS: &[&str] = &["Lecture Notes"];

/// Course folders start with two uppercase letters and four digits
pub const COURSE_CODE_PATTERN: &str = r"^([A-Z]{2}\d{4})";

// ============================================================================
// File Naming Conventions
// ============================================================================

pub const PDF_EXTENSION: &str = ".pdf";
pub const ZIP_EXTENSION: &str = ".zip";

pub const REVISION_NOTE_MARKER: &str = "RevisionNotes";

/// Matched against the lowercased file name
pub const CHEAT_SHEET_MARKERS: &[&str] = &["cheatsheet", "cheat_sheet", "cheat-sheet"];

pub const QUESTION_PAPER_MARKER: &str = "QuestionPaper";
pub const EXAMINER_REPORT_MARKERS: &[&str] = &["Examiner's Report", "ExaminersReport"];
pub const SOLUTION_MARKER: &str = "Solution";

/// `_21-22_` or a trailing `_21-22`
pub const ACADEMIC_YEAR_PATTERN: &str = r"_(\d{2}-\d{2})(?:_|$)";

pub const WEEK_IDENTIFIER_PATTERN: &str = r"(?i)_Week\s*(\d+)[_. ]";
pub const PRACTICE_IDENTIFIER_PATTERN: &str = r"(?i)_Practice\s*(\d+)[_. ]";

/// Identifier for practice files carrying no week or practice number
pub const GENERIC_PRACTICE_IDENTIFIER: &str = "Practice";

// ============================================================================
// Display Conventions
// ============================================================================

/// Identifier shapes recognised when regrouping flat file lists for display
pub const DISPLAY_IDENTIFIER_PATTERN: &str =
    r"_(Week \d+|Problem[_ ]?Sheet[_ ]?\d+|Lecture[_ ]?\d+|\d+)_";

pub const UNCATEGORIZED_IDENTIFIER: &str = "Uncategorized";

/// Problem-sheet identifiers rendered as `#N`
pub const SHEET_LABEL_PATTERN: &str = r"(?i)^(?:Problem[_ ]?Sheet[_ ]?|Sheet[_ ]?)(\d+)$";

/// Academic year embedded in a category folder name, e.g. `(AY21-22)`
pub const FOLDER_YEAR_PATTERN: &str = r"\(AY(\d{2}-\d{2})\)";

pub const NUMBERED_PRACTICE_PATTERN: &str = r"^Practice\s+(\d+)$";

pub const QRS_SOLUTION_MARKER: &str = "by QRS";
pub const UNOFFICIAL_SOLUTION_MARKER: &str = "Unofficial";

/// Check if `name` contains any of `markers`
pub fn contains_any(name: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| name.contains(marker))
}
