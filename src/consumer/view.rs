use crate::models::{CourseRecord, Snapshot};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt;

/// Exam-type radio filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExamFilter {
    #[default]
    All,
    Finals,
    Midterms,
}

impl ExamFilter {
    /// Whether sections of the given exam kind are shown under this filter
    pub fn shows_finals(self) -> bool {
        matches!(self, ExamFilter::All | ExamFilter::Finals)
    }

    pub fn shows_midterms(self) -> bool {
        matches!(self, ExamFilter::All | ExamFilter::Midterms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Lowercased, trimmed search text; empty matches everything
    pub query: String,
    pub exam: ExamFilter,
    pub selected_only: bool,
}

impl FilterState {
    /// Conjunction of the search text, exam-type and selected-only filters
    pub fn matches(&self, course: &CourseRecord, selected: &BTreeSet<String>) -> bool {
        if self.selected_only && !selected.contains(&course.code) {
            return false;
        }

        let has_exam = match self.exam {
            ExamFilter::All => true,
            ExamFilter::Finals => !course.materials.finals.is_empty(),
            ExamFilter::Midterms => !course.materials.midterms.is_empty(),
        };
        if !has_exam {
            return false;
        }

        self.query.is_empty()
            || course.code.to_lowercase().contains(&self.query)
            || course.name.to_lowercase().contains(&self.query)
    }
}

/// Client-side state over a loaded snapshot: the full course list, the
/// currently displayed subset, the user's selection and expanded sections.
///
/// Every state change re-derives the displayed list from the full list.
#[derive(Debug, Clone)]
pub struct CatalogView {
    courses: Vec<CourseRecord>,
    generated_at: Option<DateTime<Utc>>,
    displayed: Vec<usize>,
    selected: BTreeSet<String>,
    expanded: BTreeSet<String>,
    filter: FilterState,
}

impl CatalogView {
    pub fn new(courses: Vec<CourseRecord>) -> Self {
        let displayed = (0..courses.len()).collect();
        Self {
            courses,
            generated_at: None,
            displayed,
            selected: BTreeSet::new(),
            expanded: BTreeSet::new(),
            filter: FilterState::default(),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut view = Self::new(snapshot.courses);
        view.generated_at = snapshot.generated_at;
        view
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    pub fn displayed(&self) -> Vec<&CourseRecord> {
        self.displayed.iter().map(|&i| &self.courses[i]).collect()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn expanded(&self) -> &BTreeSet<String> {
        &self.expanded
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.contains(code)
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.trim().to_lowercase();
        self.apply_filters();
    }

    pub fn set_exam_filter(&mut self, exam: ExamFilter) {
        self.filter.exam = exam;
        self.apply_filters();
    }

    pub fn toggle_selected_only(&mut self) {
        self.filter.selected_only = !self.filter.selected_only;
        self.apply_filters();
    }

    /// Select or deselect a course. Returns whether it is now selected.
    pub fn toggle_course(&mut self, code: &str) -> bool {
        let now_selected = if self.selected.remove(code) {
            false
        } else {
            self.selected.insert(code.to_string());
            true
        };
        self.apply_filters();
        now_selected
    }

    /// Select a course if it is not selected yet. Returns whether it was newly
    /// selected.
    pub fn select_course(&mut self, code: &str) -> bool {
        let inserted = self.selected.insert(code.to_string());
        if inserted {
            self.apply_filters();
        }
        inserted
    }

    /// Drop the whole selection and leave selected-only mode
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.filter.selected_only = false;
        self.apply_filters();
    }

    /// Expand or collapse a section. Returns whether it is now expanded.
    pub fn toggle_section(&mut self, section_id: &str) -> bool {
        if self.expanded.remove(section_id) {
            false
        } else {
            self.expanded.insert(section_id.to_string());
            true
        }
    }

    fn apply_filters(&mut self) {
        self.displayed = self
            .courses
            .iter()
            .enumerate()
            .filter(|(_, course)| self.filter.matches(course, &self.selected))
            .map(|(i, _)| i)
            .collect();
    }

    pub fn results_summary(&self) -> ResultsSummary {
        ResultsSummary {
            showing: self.displayed.len(),
            total: self.courses.len(),
            selected: self.selected.len(),
            generated_at: self.generated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsSummary {
    pub showing: usize,
    pub total: usize,
    pub selected: usize,
    pub generated_at: Option<DateTime<Utc>>,
}

impl fmt::Display for ResultsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} courses", self.showing, self.total)?;
        if self.selected > 0 {
            write!(f, ", {} selected", self.selected)?;
        }
        if let Some(at) = self.generated_at {
            write!(f, " (Updated: {})", at.format("%Y-%m-%d %H:%M UTC"))?;
        }
        Ok(())
    }
}
