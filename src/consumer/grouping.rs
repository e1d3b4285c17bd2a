//! Display-time regrouping of catalog file lists.
//!
//! The catalog stores problem sheets and lecture notes as flat lists. For
//! display they are split into buckets again by an identifier found in the
//! file name, and each bucket into papers and solutions.

use crate::constants::{
    DISPLAY_IDENTIFIER_PATTERN, FOLDER_YEAR_PATTERN, NUMBERED_PRACTICE_PATTERN,
    QRS_SOLUTION_MARKER, QUESTION_PAPER_MARKER, SHEET_LABEL_PATTERN, SOLUTION_MARKER,
    UNCATEGORIZED_IDENTIFIER, UNOFFICIAL_SOLUTION_MARKER,
};
use crate::models::{ExamYearBucket, FileRef, MaterialSet, PracticeBucket};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static DISPLAY_IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DISPLAY_IDENTIFIER_PATTERN).expect("display identifier pattern"));
static SHEET_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SHEET_LABEL_PATTERN).expect("sheet label pattern"));
static FOLDER_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FOLDER_YEAR_PATTERN).expect("folder year pattern"));
static NUMBERED_PRACTICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NUMBERED_PRACTICE_PATTERN).expect("numbered practice pattern"));

// ============================================================================
// Identifier Groups
// ============================================================================

/// Files sharing a display identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileGroup<'a> {
    pub papers: Vec<&'a FileRef>,
    pub solutions: Vec<&'a FileRef>,
}

/// `Week 3`, `Problem_Sheet_2`, `Lecture 4`, a bare number, or `Uncategorized`
pub fn extract_display_identifier(name: &str) -> String {
    DISPLAY_IDENTIFIER_RE
        .captures(name)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| UNCATEGORIZED_IDENTIFIER.to_string())
}

/// Split a flat list into identifier buckets. Files that are neither question
/// papers nor solutions count as papers.
pub fn group_by_identifier(items: &[FileRef]) -> BTreeMap<String, FileGroup<'_>> {
    let mut grouped: BTreeMap<String, FileGroup<'_>> = BTreeMap::new();
    for item in items {
        let group = grouped
            .entry(extract_display_identifier(&item.name))
            .or_default();
        if item.name.contains(QUESTION_PAPER_MARKER) {
            group.papers.push(item);
        } else if item.name.contains(SOLUTION_MARKER) {
            group.solutions.push(item);
        } else {
            group.papers.push(item);
        }
    }
    grouped
}

/// Problem-sheet groups in natural order (`2` before `10`)
pub fn sorted_naturally<'m, 'a>(
    grouped: &'m BTreeMap<String, FileGroup<'a>>,
) -> Vec<(&'m str, &'m FileGroup<'a>)> {
    let mut entries: Vec<_> = grouped.iter().map(|(k, v)| (k.as_str(), v)).collect();
    entries.sort_by(|(a, _), (b, _)| natural_cmp(a, b));
    entries
}

/// `#N` for problem-sheet style identifiers and bare numbers, otherwise the
/// identifier itself
pub fn problem_sheet_label(identifier: &str) -> String {
    if let Some(caps) = SHEET_LABEL_RE.captures(identifier) {
        return format!("#{}", &caps[1]);
    }
    if !identifier.is_empty() && identifier.chars().all(|c| c.is_ascii_digit()) {
        return format!("#{}", identifier);
    }
    identifier.to_string()
}

/// Case-insensitive comparison treating digit runs as numbers
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chunks = chunks(a);
    let mut b_chunks = chunks(b);

    loop {
        match (a_chunks.next(), b_chunks.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(nx), Ok(ny)) => nx.cmp(&ny),
                    _ => x.to_lowercase().cmp(&y.to_lowercase()),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Alternating runs of digits and non-digits
fn chunks(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digit)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

/// Academic year from a category folder such as `Tutorials (AY21-22)`
pub fn year_from_path(path: &str) -> Option<String> {
    FOLDER_YEAR_RE
        .captures(path)
        .map(|caps| caps[1].to_string())
}

/// Exam years newest first
pub fn years_descending(
    buckets: &BTreeMap<String, ExamYearBucket>,
) -> Vec<(&str, &ExamYearBucket)> {
    buckets
        .iter()
        .rev()
        .map(|(year, bucket)| (year.as_str(), bucket))
        .collect()
}

// ============================================================================
// Solutions
// ============================================================================

/// Solutions to show for a bucket: QRS-authored first, then names ending in
/// `Solution.pdf`, then by name; at most `cap` of them.
pub fn ordered_solutions<'a>(solutions: &[&'a FileRef], cap: usize) -> Vec<&'a FileRef> {
    let mut sorted = solutions.to_vec();
    sorted.sort_by(|a, b| {
        let a_qrs = a.name.contains(QRS_SOLUTION_MARKER);
        let b_qrs = b.name.contains(QRS_SOLUTION_MARKER);
        b_qrs
            .cmp(&a_qrs)
            .then_with(|| is_clean_solution(&b.name).cmp(&is_clean_solution(&a.name)))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted.truncate(cap);
    sorted
}

fn is_clean_solution(name: &str) -> bool {
    name.to_lowercase().ends_with("solution.pdf")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionLabel {
    Qrs,
    Handwritten,
    Scanned,
    Unofficial,
    Standard,
}

impl SolutionLabel {
    pub fn for_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if name.contains(QRS_SOLUTION_MARKER) {
            SolutionLabel::Qrs
        } else if lower.contains("handwritten") {
            SolutionLabel::Handwritten
        } else if lower.contains("scanned") {
            SolutionLabel::Scanned
        } else if name.contains(UNOFFICIAL_SOLUTION_MARKER) {
            SolutionLabel::Unofficial
        } else {
            SolutionLabel::Standard
        }
    }
}

impl fmt::Display for SolutionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolutionLabel::Qrs => "Solution (QRS)",
            SolutionLabel::Handwritten => "Solution Handwritten",
            SolutionLabel::Scanned => "Solution Scanned",
            SolutionLabel::Unofficial => "Solution (Other)",
            SolutionLabel::Standard => "Solution",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Archives and Practice Sets
// ============================================================================

/// Archives split by what they appear to contain. A practice archive that
/// mentions neither finals nor midterms is also listed under `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveGroups<'a> {
    pub finals: Vec<&'a FileRef>,
    pub midterms: Vec<&'a FileRef>,
    pub practice: Vec<&'a FileRef>,
    pub other: Vec<&'a FileRef>,
}

pub fn partition_archives(zips: &[FileRef]) -> ArchiveGroups<'_> {
    let mut groups = ArchiveGroups::default();
    for zip in zips {
        let lower = zip.name.to_lowercase();
        let is_final = lower.contains("final");
        let is_midterm = lower.contains("midterm");
        if is_final {
            groups.finals.push(zip);
        }
        if is_midterm {
            groups.midterms.push(zip);
        }
        if lower.contains("practice") {
            groups.practice.push(zip);
        }
        if !is_final && !is_midterm {
            groups.other.push(zip);
        }
    }
    groups
}

/// Practice buckets as displayed: `Practice N` sets in numeric order, and
/// every other identifier merged into a single group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeGroups<'a> {
    pub numbered: Vec<(&'a str, &'a PracticeBucket)>,
    pub other: Option<FileGroup<'a>>,
}

impl PracticeGroups<'_> {
    pub fn group_count(&self) -> usize {
        self.numbered.len() + usize::from(self.other.is_some())
    }
}

pub fn practice_groups(practice: &BTreeMap<String, PracticeBucket>) -> PracticeGroups<'_> {
    let mut numbered = Vec::new();
    let mut other: Option<FileGroup<'_>> = None;

    for (identifier, bucket) in practice {
        match NUMBERED_PRACTICE_RE
            .captures(identifier)
            .and_then(|caps| caps[1].parse::<u64>().ok())
        {
            Some(n) => numbered.push((n, identifier.as_str(), bucket)),
            None => {
                let merged = other.get_or_insert_with(FileGroup::default);
                merged.papers.extend(bucket.papers.iter());
                merged.solutions.extend(bucket.solutions.iter());
            }
        }
    }

    numbered.sort_by_key(|(n, _, _)| *n);
    PracticeGroups {
        numbered: numbered
            .into_iter()
            .map(|(_, identifier, bucket)| (identifier, bucket))
            .collect(),
        other,
    }
}

/// Badge labels for the material kinds a course has
pub fn badges(materials: &MaterialSet) -> Vec<&'static str> {
    let mut badges = Vec::new();
    if !materials.finals.is_empty() {
        badges.push("Finals");
    }
    if !materials.midterms.is_empty() {
        badges.push("Midterms");
    }
    if !materials.revision_notes.is_empty() {
        badges.push("Notes");
    }
    if !materials.cheat_sheets.is_empty() {
        badges.push("Cheat Sheets");
    }
    if !materials.problem_sheets.is_empty() {
        badges.push("Problem Sheets");
    }
    if !materials.lecture_notes.is_empty() {
        badges.push("Lecture Notes");
    }
    if !materials.practice_materials.is_empty() {
        badges.push("Practice");
    }
    badges
}
