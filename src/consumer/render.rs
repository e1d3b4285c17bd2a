//! Plain-text rendering of the course list.
//!
//! Rendering reads nothing but its arguments: the course, the filter state,
//! the selected course codes and the expanded section ids.

use super::grouping::{
    badges, group_by_identifier, ordered_solutions, partition_archives, practice_groups,
    problem_sheet_label, sorted_naturally, year_from_path, years_descending, FileGroup,
    SolutionLabel,
};
use super::view::{CatalogView, FilterState};
use crate::models::{CourseRecord, ExamYearBucket, FileRef};
use crate::rules::ExamKind;
use std::collections::BTreeSet;

const INDENT: &str = "    ";

/// Collapsible sections of a course card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Finals,
    Midterms,
    ProblemSheets,
    LectureNotes,
    Practice,
    OtherPractices,
}

/// Stable id of a section, e.g. `finals-MH1100`
pub fn section_id(section: Section, code: &str) -> String {
    match section {
        Section::Finals => format!("finals-{}", code),
        Section::Midterms => format!("midterms-{}", code),
        Section::ProblemSheets => format!("problem-sheets-{}", code),
        Section::LectureNotes => format!("lecture-notes-{}", code),
        Section::Practice => format!("practice-materials-{}", code),
        Section::OtherPractices => format!("practice-materials-{}-other", code),
    }
}

pub struct RenderContext<'a> {
    pub filter: &'a FilterState,
    pub selected: &'a BTreeSet<String>,
    pub expanded: &'a BTreeSet<String>,
    pub solutions_cap: usize,
}

impl RenderContext<'_> {
    fn is_expanded(&self, section: Section, code: &str) -> bool {
        self.expanded.contains(&section_id(section, code))
    }
}

/// Results line followed by every displayed course card
pub fn render_catalog(view: &CatalogView, solutions_cap: usize) -> String {
    let ctx = RenderContext {
        filter: view.filter(),
        selected: view.selected(),
        expanded: view.expanded(),
        solutions_cap,
    };

    let displayed = view.displayed();
    let mut out = vec![view.results_summary().to_string()];
    if displayed.is_empty() {
        out.push(String::new());
        out.push("No courses found".to_string());
    }
    for course in displayed {
        out.push(String::new());
        out.push(render_course_card(course, &ctx));
    }
    out.join("\n")
}

/// Panel shown in place of the list when the snapshot cannot be loaded
pub fn render_error_panel(message: &str) -> String {
    format!("Failed to load courses\n{}", message)
}

pub fn render_course_card(course: &CourseRecord, ctx: &RenderContext<'_>) -> String {
    let m = &course.materials;
    let marker = if ctx.selected.contains(&course.code) {
        "[x]"
    } else {
        "[ ]"
    };

    let mut lines = Vec::new();
    let badge_text: Vec<String> = badges(m).iter().map(|b| format!("[{}]", b)).collect();
    let mut header = format!("{} {} - {}", marker, course.code, course.name);
    if !badge_text.is_empty() {
        header.push_str("  ");
        header.push_str(&badge_text.join(" "));
    }
    lines.push(header);
    lines.push(format!("{}{}", INDENT, link("Folder", &course.source_url)));

    let archives = partition_archives(&m.past_year_zips);

    if ctx.filter.exam.shows_finals() && !m.finals.is_empty() {
        render_exam_section(&mut lines, course, ExamKind::Finals, &archives.finals, ctx);
    }
    if ctx.filter.exam.shows_midterms() && !m.midterms.is_empty() {
        render_exam_section(&mut lines, course, ExamKind::Midterms, &archives.midterms, ctx);
    }

    if !m.problem_sheets.is_empty() {
        let grouped = group_by_identifier(&m.problem_sheets);
        let expanded = ctx.is_expanded(Section::ProblemSheets, &course.code);
        lines.push(section_header(
            expanded,
            &format!(
                "Problem Sheets{} ({})",
                year_label(&m.problem_sheets),
                grouped.len()
            ),
            &[],
        ));
        if expanded {
            for (identifier, group) in sorted_naturally(&grouped) {
                lines.push(group_line(
                    &problem_sheet_label(identifier),
                    group,
                    "Question",
                    ctx.solutions_cap,
                ));
            }
        }
    }

    if !m.lecture_notes.is_empty() {
        let grouped = group_by_identifier(&m.lecture_notes);
        let expanded = ctx.is_expanded(Section::LectureNotes, &course.code);
        lines.push(section_header(
            expanded,
            &format!(
                "Lecture Notes{} ({})",
                year_label(&m.lecture_notes),
                grouped.len()
            ),
            &[],
        ));
        if expanded {
            for (identifier, group) in &grouped {
                let notes: Vec<String> = group
                    .papers
                    .iter()
                    .map(|f| link("Notes", &f.download_url))
                    .collect();
                lines.push(format!("{0}{0}{1}: {2}", INDENT, identifier, notes.join("  ")));
            }
        }
    }

    if !m.practice_materials.is_empty() {
        let groups = practice_groups(&m.practice_materials);
        let expanded = ctx.is_expanded(Section::Practice, &course.code);
        lines.push(section_header(
            expanded,
            &format!("Practice Materials ({})", groups.group_count()),
            &archives.practice,
        ));
        if expanded {
            for (identifier, bucket) in &groups.numbered {
                let group = FileGroup {
                    papers: bucket.papers.iter().collect(),
                    solutions: bucket.solutions.iter().collect(),
                };
                lines.push(group_line(identifier, &group, "Question", ctx.solutions_cap));
            }
            if let Some(other) = &groups.other {
                let other_expanded = ctx.is_expanded(Section::OtherPractices, &course.code);
                let arrow = if other_expanded { "v" } else { ">" };
                lines.push(format!("{0}{0}{1} Other Practices", INDENT, arrow));
                if other_expanded {
                    lines.push(format!(
                        "{0}{0}{0}{1}",
                        INDENT,
                        file_links(other, "Question", ctx.solutions_cap)
                    ));
                }
            }
        }
    }

    if !m.revision_notes.is_empty() {
        let links: Vec<String> = m
            .revision_notes
            .iter()
            .map(|f| link("Revision Notes", &f.download_url))
            .collect();
        lines.push(format!("{}Revision Notes: {}", INDENT, links.join("  ")));
    }

    if !m.cheat_sheets.is_empty() {
        let links: Vec<String> = m
            .cheat_sheets
            .iter()
            .map(|f| link("Cheat Sheet", &f.download_url))
            .collect();
        lines.push(format!("{}Cheat Sheets: {}", INDENT, links.join("  ")));
    }

    if !archives.other.is_empty() {
        let links: Vec<String> = archives
            .other
            .iter()
            .map(|f| link(&f.name, &f.download_url))
            .collect();
        lines.push(format!("{}Archives: {}", INDENT, links.join("  ")));
    }

    lines.join("\n")
}

fn render_exam_section(
    lines: &mut Vec<String>,
    course: &CourseRecord,
    exam: ExamKind,
    zips: &[&FileRef],
    ctx: &RenderContext<'_>,
) {
    let (buckets, section) = match exam {
        ExamKind::Finals => (&course.materials.finals, Section::Finals),
        ExamKind::Midterms => (&course.materials.midterms, Section::Midterms),
    };
    let expanded = ctx.is_expanded(section, &course.code);

    lines.push(section_header(
        expanded,
        &format!("{} ({} years)", exam.label(), buckets.len()),
        zips,
    ));
    if expanded {
        for (year, bucket) in years_descending(buckets) {
            lines.push(exam_year_line(year, bucket, ctx.solutions_cap));
        }
    }
}

fn exam_year_line(year: &str, bucket: &ExamYearBucket, solutions_cap: usize) -> String {
    let mut parts: Vec<String> = bucket
        .papers
        .iter()
        .map(|f| link("Paper", &f.download_url))
        .collect();
    let solutions: Vec<&FileRef> = bucket.solutions.iter().collect();
    parts.extend(solution_links(&solutions, solutions_cap));
    parts.extend(
        bucket
            .reports
            .iter()
            .map(|f| link("Report", &f.download_url)),
    );
    format!("{0}{0}AY {1}: {2}", INDENT, year, parts.join("  "))
}

fn group_line(
    label: &str,
    group: &FileGroup<'_>,
    paper_label: &str,
    solutions_cap: usize,
) -> String {
    format!(
        "{0}{0}{1}: {2}",
        INDENT,
        label,
        file_links(group, paper_label, solutions_cap)
    )
}

fn file_links(group: &FileGroup<'_>, paper_label: &str, solutions_cap: usize) -> String {
    let mut parts: Vec<String> = group
        .papers
        .iter()
        .map(|f| link(paper_label, &f.download_url))
        .collect();
    parts.extend(solution_links(&group.solutions, solutions_cap));
    parts.join("  ")
}

fn solution_links(solutions: &[&FileRef], solutions_cap: usize) -> Vec<String> {
    ordered_solutions(solutions, solutions_cap)
        .into_iter()
        .map(|f| link(&SolutionLabel::for_name(&f.name).to_string(), &f.download_url))
        .collect()
}

fn section_header(expanded: bool, title: &str, zips: &[&FileRef]) -> String {
    let arrow = if expanded { "v" } else { ">" };
    let mut header = format!("{}{} {}", INDENT, arrow, title);
    for zip in zips {
        header.push_str("  ");
        header.push_str(&link("ZIP", &zip.download_url));
    }
    header
}

/// ` (AY21-22)` when the first file's folder carries an academic year
fn year_label(files: &[FileRef]) -> String {
    files
        .first()
        .and_then(|f| year_from_path(&f.path))
        .map(|year| format!(" (AY{})", year))
        .unwrap_or_default()
}

fn link(label: &str, url: &str) -> String {
    format!("{} <{}>", label, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::view::ExamFilter;
    use crate::models::{MaterialSet, PracticeBucket};

    fn file(path: &str) -> FileRef {
        let name = path.rsplit('/').next().unwrap().to_string();
        FileRef {
            name,
            path: path.to_string(),
            download_url: format!("https://dl.test/{}", path),
        }
    }

    fn sample_course() -> CourseRecord {
        let mut m = MaterialSet::default();
        m.finals.insert(
            "21-22".to_string(),
            ExamYearBucket {
                papers: vec![file("F/MH1100_21-22_QuestionPaper.pdf")],
                solutions: vec![
                    file("F/MH1100_21-22_Solution.pdf"),
                    file("F/MH1100_21-22_Solution by QRS.pdf"),
                    file("F/MH1100_21-22_Solution_Unofficial.pdf"),
                ],
                reports: vec![],
            },
        );
        m.finals
            .insert("22-23".to_string(), ExamYearBucket::default());
        m.midterms
            .insert("20-21".to_string(), ExamYearBucket::default());
        m.problem_sheets = vec![
            file("T (AY21-22)/MH1100_Problem Sheet 10_QuestionPaper.pdf"),
            file("T (AY21-22)/MH1100_Problem Sheet 2_QuestionPaper.pdf"),
        ];
        m.practice_materials.insert(
            "Practice 1".to_string(),
            PracticeBucket {
                papers: vec![file("P/MH1100_Practice 1_QuestionPaper.pdf")],
                solutions: vec![],
            },
        );
        m.past_year_zips = vec![file("MH1100_Finals.zip"), file("MH1100_Misc.zip")];

        CourseRecord {
            code: "MH1100".to_string(),
            name: "Calculus I".to_string(),
            folder_name: "MH1100".to_string(),
            source_url: "https://repo.test/MH1100".to_string(),
            materials: m,
        }
    }

    fn render(filter: &FilterState, selected: &[&str], expanded: &[&str]) -> String {
        let selected: BTreeSet<String> = selected.iter().map(|s| s.to_string()).collect();
        let expanded: BTreeSet<String> = expanded.iter().map(|s| s.to_string()).collect();
        let ctx = RenderContext {
            filter,
            selected: &selected,
            expanded: &expanded,
            solutions_cap: 2,
        };
        render_course_card(&sample_course(), &ctx)
    }

    #[test]
    fn test_collapsed_card() {
        let out = render(&FilterState::default(), &[], &[]);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(
            lines[0],
            "[ ] MH1100 - Calculus I  [Finals] [Midterms] [Problem Sheets] [Practice]"
        );
        assert!(out.contains("> Finals (2 years)  ZIP <https://dl.test/MH1100_Finals.zip>"));
        assert!(out.contains("> Midterms (1 years)"));
        assert!(out.contains("> Problem Sheets (AY21-22) (2)"));
        assert!(out.contains("> Practice Materials (1)"));
        assert!(out.contains("Archives: MH1100_Misc.zip <https://dl.test/MH1100_Misc.zip>"));
        assert!(!out.contains("AY 21-22"));
    }

    #[test]
    fn test_expanded_sections() {
        let out = render(
            &FilterState::default(),
            &["MH1100"],
            &["finals-MH1100", "problem-sheets-MH1100"],
        );

        assert!(out.starts_with("[x] MH1100"));
        let finals_lines: Vec<_> = out.lines().filter(|l| l.contains("AY ")).collect();
        assert!(finals_lines[0].contains("AY 22-23"));
        assert!(finals_lines[1].contains("AY 21-22"));
        assert!(finals_lines[1].contains("Solution (QRS)"));
        assert!(finals_lines[1].contains("Solution <"));
        assert!(!finals_lines[1].contains("Solution (Other)"));

        let sheet_2 = out.find("#2:").unwrap();
        let sheet_10 = out.find("#10:").unwrap();
        assert!(sheet_2 < sheet_10);
    }

    #[test]
    fn test_exam_filter_hides_other_exam_section() {
        let filter = FilterState {
            exam: ExamFilter::Midterms,
            ..Default::default()
        };
        let out = render(&filter, &[], &[]);
        assert!(!out.contains("Finals ("));
        assert!(out.contains("Midterms (1 years)"));
    }

    #[test]
    fn test_section_ids() {
        assert_eq!(section_id(Section::Finals, "MH1100"), "finals-MH1100");
        assert_eq!(
            section_id(Section::OtherPractices, "MH1100"),
            "practice-materials-MH1100-other"
        );
    }

    #[test]
    fn test_empty_catalog() {
        let view = CatalogView::new(Vec::new());
        assert_eq!(
            render_catalog(&view, 2),
            "Showing 0 of 0 courses\n\nNo courses found"
        );
    }
}
