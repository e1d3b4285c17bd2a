//! Catalog builder: walks the notes root and turns course folders into
//! [`CourseRecord`]s.
//!
//! The traversal is two levels deep (course folder → category folder → files)
//! and entries are visited in file-name order, so two builds over the same
//! tree produce identical catalogs.

use crate::config::{Config, RepoLinks};
use crate::error::Result;
use crate::models::{CourseNames, CourseRecord, FileRef, MaterialSet};
use crate::rules::{
    classify_folder, classify_root_file, extract_academic_year, extract_material_type,
    extract_practice_identifier, is_archive, is_course_folder, is_pdf, normalise_course_code,
    resolve_course_name, ExamKind, FolderKind, MaterialType, RootFileKind,
};
use std::cmp::Reverse;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

// ============================================================================
// Category Routing
// ============================================================================

/// A file found inside a category folder, with its repo-relative path
struct CategoryFile<'a> {
    name: &'a str,
    path: String,
    links: &'a RepoLinks,
}

impl CategoryFile<'_> {
    fn raw_ref(&self) -> FileRef {
        FileRef {
            name: self.name.to_string(),
            path: self.path.clone(),
            download_url: self.links.raw_url(&self.path),
        }
    }

    fn archive_ref(&self) -> FileRef {
        FileRef {
            name: self.name.to_string(),
            path: self.path.clone(),
            download_url: self.links.archive_url(&self.path),
        }
    }
}

type CategoryHandler = fn(&mut MaterialSet, &CategoryFile<'_>);

/// Handler applied to every file of a folder of the given kind
fn handler_for(kind: FolderKind) -> CategoryHandler {
    match kind {
        FolderKind::Practice => place_practice_file,
        FolderKind::Exam(ExamKind::Finals) => place_finals_file,
        FolderKind::Exam(ExamKind::Midterms) => place_midterms_file,
        FolderKind::ProblemSheets => place_problem_sheet,
        FolderKind::LectureNotes => place_lecture_note,
    }
}

fn place_practice_file(materials: &mut MaterialSet, file: &CategoryFile<'_>) {
    if is_archive(file.name) {
        materials.past_year_zips.push(file.archive_ref());
        return;
    }
    if !is_pdf(file.name) {
        return;
    }

    let bucket = materials
        .practice_materials
        .entry(extract_practice_identifier(file.name))
        .or_default();

    match extract_material_type(file.name) {
        MaterialType::Solution => bucket.solutions.push(file.raw_ref()),
        _ => bucket.papers.push(file.raw_ref()),
    }
}

fn place_finals_file(materials: &mut MaterialSet, file: &CategoryFile<'_>) {
    place_exam_file(materials, ExamKind::Finals, file);
}

fn place_midterms_file(materials: &mut MaterialSet, file: &CategoryFile<'_>) {
    place_exam_file(materials, ExamKind::Midterms, file);
}

fn place_exam_file(materials: &mut MaterialSet, exam: ExamKind, file: &CategoryFile<'_>) {
    if is_archive(file.name) {
        materials.past_year_zips.push(file.archive_ref());
        return;
    }
    if !is_pdf(file.name) {
        return;
    }

    let Some(year) = extract_academic_year(file.name) else {
        debug!("Dropping {}: no academic year in file name", file.path);
        return;
    };
    let material_type = extract_material_type(file.name);

    let buckets = match exam {
        ExamKind::Finals => &mut materials.finals,
        ExamKind::Midterms => &mut materials.midterms,
    };
    let bucket = buckets.entry(year).or_default();

    match (exam, material_type) {
        (_, MaterialType::QuestionPaper) => bucket.papers.push(file.raw_ref()),
        (_, MaterialType::Solution) => bucket.solutions.push(file.raw_ref()),
        (ExamKind::Finals, MaterialType::ExaminerReport) => bucket.reports.push(file.raw_ref()),
        (_, other) => debug!(
            "Dropping {}: {:?} is not kept for {}",
            file.path,
            other,
            exam.label()
        ),
    }
}

fn place_problem_sheet(materials: &mut MaterialSet, file: &CategoryFile<'_>) {
    if is_pdf(file.name) {
        materials.problem_sheets.push(file.raw_ref());
    }
}

fn place_lecture_note(materials: &mut MaterialSet, file: &CategoryFile<'_>) {
    if is_pdf(file.name) {
        materials.lecture_notes.push(file.raw_ref());
    }
}

// ============================================================================
// Builder
// ============================================================================

pub struct CatalogBuilder<'a> {
    names: &'a CourseNames,
    links: &'a RepoLinks,
    notes_prefix: &'a str,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(names: &'a CourseNames, links: &'a RepoLinks, notes_prefix: &'a str) -> Self {
        Self {
            names,
            links,
            notes_prefix,
        }
    }

    pub fn from_config(config: &'a Config, names: &'a CourseNames) -> Self {
        Self::new(names, &config.links, &config.notes_prefix)
    }

    /// Build the catalog for every course folder under `root`, sorted by total
    /// file count (descending, ties keep directory order).
    ///
    /// A missing root yields an empty catalog. Any error while listing a
    /// course or category folder aborts the build.
    pub fn build(&self, root: &Path) -> Result<Vec<CourseRecord>> {
        if !root.is_dir() {
            warn!("Notes directory not found: {}", root.display());
            return Ok(Vec::new());
        }

        info!("Scanning course folders in {}", root.display());

        let mut courses = Vec::new();
        for entry in list_dir(root)? {
            let folder_name = entry_name(&entry);
            if !entry.file_type().is_dir() || !is_course_folder(&folder_name) {
                continue;
            }
            let course = self.build_course(entry.path(), &folder_name)?;
            debug!(
                "{}: {} files",
                course.code,
                course.materials.file_count()
            );
            courses.push(course);
        }

        // sort_by_key is stable, so equal counts keep listing order
        courses.sort_by_key(|c| Reverse(c.materials.file_count()));

        info!("Catalogued {} courses", courses.len());
        Ok(courses)
    }

    fn build_course(&self, folder_path: &Path, folder_name: &str) -> Result<CourseRecord> {
        let code = normalise_course_code(folder_name);
        let name = resolve_course_name(&code, folder_name, self.names);
        let mut materials = MaterialSet::default();

        for entry in list_dir(folder_path)? {
            let item_name = entry_name(&entry);
            let file_type = entry.file_type();

            if file_type.is_file() {
                self.place_root_file(&mut materials, &code, &item_name);
            } else if file_type.is_dir() {
                let Some(kind) = classify_folder(&item_name) else {
                    continue;
                };
                let handler = handler_for(kind);

                for file in list_dir(entry.path())? {
                    if !file.file_type().is_file() {
                        continue;
                    }
                    let file_name = entry_name(&file);
                    let category_file = CategoryFile {
                        name: &file_name,
                        path: format!(
                            "{}/{}/{}/{}",
                            self.notes_prefix, code, item_name, file_name
                        ),
                        links: self.links,
                    };
                    handler(&mut materials, &category_file);
                }
            }
        }

        Ok(CourseRecord {
            source_url: self
                .links
                .tree_url(&format!("{}/{}", self.notes_prefix, folder_name)),
            code,
            name,
            folder_name: folder_name.to_string(),
            materials,
        })
    }

    fn place_root_file(&self, materials: &mut MaterialSet, code: &str, file_name: &str) {
        let Some(kind) = classify_root_file(file_name) else {
            return;
        };

        let file = CategoryFile {
            name: file_name,
            path: format!("{}/{}/{}", self.notes_prefix, code, file_name),
            links: self.links,
        };

        match kind {
            RootFileKind::RevisionNote => materials.revision_notes.push(file.raw_ref()),
            RootFileKind::CheatSheet => materials.cheat_sheets.push(file.raw_ref()),
            RootFileKind::Archive => materials.past_year_zips.push(file.archive_ref()),
        }
    }
}

/// Immediate children of `dir` in file-name order. Symlinks are followed so
/// linked files and folders are classified like real ones.
fn list_dir(dir: &Path) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.map_err(Into::into))
        .collect()
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}
