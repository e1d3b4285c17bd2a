//! notes-catalog - course material catalog generator
//!
//! Walks a folder tree of per-course notes, classifies every file by naming
//! convention into a typed catalog, writes the catalog as a single JSON
//! snapshot, and renders a snapshot as a filterable course list.
//!
//! - **rules**: pure classification of folder and file names
//! - **builder**: traversal of the notes root into course records
//! - **snapshot** / **stats**: the artifact and its derived statistics
//! - **consumer**: snapshot loading, filtering, grouping and rendering

pub mod builder;
pub mod config;
pub mod constants;
pub mod consumer;
pub mod error;
pub mod loader;
pub mod models;
pub mod rules;
pub mod snapshot;
pub mod stats;

pub use builder::CatalogBuilder;
pub use config::Config;
pub use error::{CatalogError, Result};
pub use models::{CourseRecord, ExamYearBucket, FileRef, MaterialSet, PracticeBucket, Snapshot};
pub use stats::CatalogStats;
