//! Aggregate statistics over a catalog.
//!
//! Everything here is derived from the course records alone, so the same report
//! can be produced right after a build or later from a snapshot file.

use crate::models::{CourseRecord, ExamYearBucket};
use crate::rules::ExamKind;
use std::collections::BTreeMap;
use std::fmt;

/// Courses having a material kind, and the number of files of that kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCount {
    pub courses: usize,
    pub files: usize,
}

impl KindCount {
    fn add(&mut self, files: usize) {
        if files > 0 {
            self.courses += 1;
        }
        self.files += files;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PracticeCount {
    pub courses: usize,
    pub sets: usize,
    pub papers: usize,
    pub solutions: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExamTotals {
    pub papers: usize,
    pub solutions: usize,
    pub reports: usize,
}

impl ExamTotals {
    fn add(&mut self, buckets: &BTreeMap<String, ExamYearBucket>) {
        for bucket in buckets.values() {
            self.papers += bucket.papers.len();
            self.solutions += bucket.solutions.len();
            self.reports += bucket.reports.len();
        }
    }
}

/// One line of the past-year paper table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastYearRow {
    pub course: String,
    pub exam: ExamKind,
    pub year: String,
    pub papers: usize,
    pub solutions: usize,
    pub reports: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub courses: usize,
    pub problem_sheets: KindCount,
    pub lecture_notes: KindCount,
    pub practice: PracticeCount,
    pub revision_notes: KindCount,
    pub cheat_sheets: KindCount,
    pub archives: KindCount,
    pub finals: ExamTotals,
    pub midterms: ExamTotals,
    pub past_year_rows: Vec<PastYearRow>,
}

impl CatalogStats {
    pub fn compute(courses: &[CourseRecord]) -> Self {
        let mut stats = CatalogStats {
            courses: courses.len(),
            ..Default::default()
        };

        for course in courses {
            let m = &course.materials;

            stats.problem_sheets.add(m.problem_sheets.len());
            stats.lecture_notes.add(m.lecture_notes.len());
            stats.revision_notes.add(m.revision_notes.len());
            stats.cheat_sheets.add(m.cheat_sheets.len());
            stats.archives.add(m.past_year_zips.len());

            if !m.practice_materials.is_empty() {
                stats.practice.courses += 1;
            }
            stats.practice.sets += m.practice_materials.len();
            for bucket in m.practice_materials.values() {
                stats.practice.papers += bucket.papers.len();
                stats.practice.solutions += bucket.solutions.len();
            }

            stats.finals.add(&m.finals);
            stats.midterms.add(&m.midterms);

            for (exam, buckets) in [
                (ExamKind::Finals, &m.finals),
                (ExamKind::Midterms, &m.midterms),
            ] {
                for (year, bucket) in buckets {
                    stats.past_year_rows.push(PastYearRow {
                        course: course.code.clone(),
                        exam,
                        year: year.clone(),
                        papers: bucket.papers.len(),
                        solutions: bucket.solutions.len(),
                        reports: bucket.reports.len(),
                    });
                }
            }
        }

        stats
    }

    /// Padded `Course | Exam | Year | ...` table of every exam year bucket
    pub fn past_year_table(&self) -> String {
        if self.past_year_rows.is_empty() {
            return "No past-year Finals/Midterms papers detected.".to_string();
        }

        let headers = [
            "Course",
            "Exam",
            "Year",
            "QuestionPapers",
            "Solutions",
            "Reports",
        ];
        let rows: Vec<[String; 6]> = self
            .past_year_rows
            .iter()
            .map(|r| {
                [
                    r.course.clone(),
                    r.exam.label().to_string(),
                    r.year.clone(),
                    r.papers.to_string(),
                    r.solutions.to_string(),
                    r.reports.to_string(),
                ]
            })
            .collect();

        let mut widths = headers.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let format_row = |cells: &[&str]| {
            cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let mut lines = vec![
            "Past-year paper summary (Finals & Midterms):".to_string(),
            format_row(&headers[..]),
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        ];
        for row in &rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            lines.push(format_row(&cells));
        }

        lines.join("\n")
    }
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  - Problem Sheets: {} courses, {} files",
            self.problem_sheets.courses, self.problem_sheets.files
        )?;
        writeln!(
            f,
            "  - Lecture Notes: {} courses, {} files",
            self.lecture_notes.courses, self.lecture_notes.files
        )?;
        writeln!(
            f,
            "  - Practice Materials: {} courses, {} sets, {} papers, {} solutions",
            self.practice.courses, self.practice.sets, self.practice.papers, self.practice.solutions
        )?;
        writeln!(
            f,
            "  - Revision Notes: {} courses, {} files",
            self.revision_notes.courses, self.revision_notes.files
        )?;
        writeln!(
            f,
            "  - Cheat Sheets: {} courses, {} files",
            self.cheat_sheets.courses, self.cheat_sheets.files
        )?;
        writeln!(
            f,
            "  - Past-year ZIPs: {} courses, {} archives",
            self.archives.courses, self.archives.files
        )?;
        writeln!(
            f,
            "  - Finals: {} papers, {} solutions, {} reports",
            self.finals.papers, self.finals.solutions, self.finals.reports
        )?;
        writeln!(
            f,
            "  - Midterms: {} papers, {} solutions, {} reports",
            self.midterms.papers, self.midterms.solutions, self.midterms.reports
        )?;
        writeln!(f)?;
        write!(f, "{}", self.past_year_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileRef, MaterialSet, PracticeBucket};

    fn file(name: &str) -> FileRef {
        FileRef {
            name: name.to_string(),
            path: name.to_string(),
            download_url: name.to_string(),
        }
    }

    fn course(code: &str, materials: MaterialSet) -> CourseRecord {
        CourseRecord {
            code: code.to_string(),
            name: code.to_string(),
            folder_name: code.to_string(),
            source_url: String::new(),
            materials,
        }
    }

    #[test]
    fn test_counts() {
        let mut a = MaterialSet::default();
        a.problem_sheets = vec![file("p1.pdf"), file("p2.pdf")];
        a.past_year_zips = vec![file("a.zip")];
        a.finals.insert(
            "21-22".to_string(),
            ExamYearBucket {
                papers: vec![file("q.pdf")],
                solutions: vec![file("s1.pdf"), file("s2.pdf")],
                reports: vec![],
            },
        );
        a.practice_materials.insert(
            "Week 1".to_string(),
            PracticeBucket {
                papers: vec![file("w.pdf")],
                solutions: vec![],
            },
        );

        let mut b = MaterialSet::default();
        b.problem_sheets = vec![file("p3.pdf")];
        b.midterms.insert("20-21".to_string(), ExamYearBucket::default());

        let stats = CatalogStats::compute(&[course("AB1000", a), course("AB2000", b)]);

        assert_eq!(stats.courses, 2);
        assert_eq!(stats.problem_sheets, KindCount { courses: 2, files: 3 });
        assert_eq!(stats.lecture_notes, KindCount::default());
        assert_eq!(
            stats.practice,
            PracticeCount {
                courses: 1,
                sets: 1,
                papers: 1,
                solutions: 0
            }
        );
        assert_eq!(stats.archives, KindCount { courses: 1, files: 1 });
        assert!(stats
            .to_string()
            .contains("  - Past-year ZIPs: 1 courses, 1 archives\n"));
        assert_eq!(stats.finals.solutions, 2);
        assert_eq!(stats.past_year_rows.len(), 2);
        assert_eq!(stats.past_year_rows[1].exam, ExamKind::Midterms);
    }

    #[test]
    fn test_past_year_table_layout() {
        let mut m = MaterialSet::default();
        m.finals.insert(
            "21-22".to_string(),
            ExamYearBucket {
                papers: vec![file("q.pdf")],
                ..Default::default()
            },
        );
        let stats = CatalogStats::compute(&[course("MH1100", m)]);
        let table = stats.past_year_table();
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(
            lines[1],
            "Course | Exam   | Year  | QuestionPapers | Solutions | Reports"
        );
        assert_eq!(
            lines[2],
            "-------+--------+-------+----------------+-----------+--------"
        );
        assert_eq!(
            lines[3],
            "MH1100 | Finals | 21-22 | 1              | 0         | 0      "
        );
    }

    #[test]
    fn test_empty_table_message() {
        let stats = CatalogStats::compute(&[]);
        assert_eq!(
            stats.past_year_table(),
            "No past-year Finals/Midterms papers detected."
        );
    }
}
