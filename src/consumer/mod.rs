//! Catalog consumer: loads a snapshot and presents it as a filterable,
//! selectable course list.

pub mod fetch;
pub mod grouping;
pub mod render;
pub mod view;

pub use fetch::{course_param, fetch_snapshot, fetch_snapshot_with, SnapshotSource};
pub use render::{render_catalog, render_course_card, render_error_panel, section_id, Section};
pub use view::{CatalogView, ExamFilter, FilterState};
