//! notes-catalog - builds and browses the course materials catalog
//!
//! ```text
//! # Rebuild Website/v1/courses.json from the Notes tree
//! notes-catalog build
//!
//! # Print statistics for an existing snapshot
//! notes-catalog stats --snapshot Website/v1/courses.json
//!
//! # Browse courses with finals, searching for "calculus"
//! notes-catalog browse --exam finals --search calculus --expand-all
//! ```

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use notes_catalog::consumer::{
    course_param, fetch_snapshot, render_catalog, render_error_panel, section_id, CatalogView,
    ExamFilter, Section, SnapshotSource,
};
use notes_catalog::loader::{load_course_names, load_snapshot};
use notes_catalog::snapshot::{make_snapshot, write_snapshot};
use notes_catalog::{CatalogBuilder, CatalogStats, Config, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notes-catalog")]
#[command(version)]
#[command(about = "Index course notes into a catalog snapshot and browse it")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file (defaults to ./notes-catalog.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output, including files dropped during classification
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the notes tree and write the catalog snapshot
    Build(BuildArgs),

    /// Recompute statistics from an existing snapshot
    Stats {
        /// Snapshot file (defaults to the configured output)
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Load a snapshot and print the filtered course list
    Browse(BrowseArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Directory whose children are course folders
    #[arg(long)]
    root: Option<PathBuf>,

    /// Course code to name JSON table
    #[arg(long)]
    names: Option<PathBuf>,

    /// Snapshot output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Repo-relative prefix of every file path
    #[arg(long)]
    prefix: Option<String>,
}

#[derive(Args)]
struct BrowseArgs {
    /// Snapshot path or http(s) URL
    #[arg(long)]
    snapshot: Option<String>,

    /// Cache-busting version tag appended to snapshot URLs
    #[arg(long)]
    app_version: Option<String>,

    /// Search text matched against course code and name
    #[arg(short, long)]
    search: Option<String>,

    /// Page URL whose `course=` parameter pre-populates the search
    #[arg(long)]
    page_url: Option<String>,

    /// Exam type filter
    #[arg(long, value_enum, default_value_t = ExamFilter::All)]
    exam: ExamFilter,

    /// Select a course by code (repeatable)
    #[arg(long = "select")]
    selected: Vec<String>,

    /// Only show selected courses
    #[arg(long)]
    selected_only: bool,

    /// Expand a section by id, e.g. finals-MH1100 (repeatable)
    #[arg(long)]
    expand: Vec<String>,

    /// Expand every section of every displayed course
    #[arg(long)]
    expand_all: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("notes_catalog=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notes_catalog=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Build(args) => run_build(&mut config, args),
        Commands::Stats { snapshot } => {
            let path = snapshot.unwrap_or_else(|| config.output.clone());
            let snapshot = load_snapshot(&path)?;
            if let Some(generated_at) = snapshot.generated_at {
                println!("Catalog generated at {}", generated_at);
            }
            print_stats(&CatalogStats::compute(&snapshot.courses));
            Ok(())
        }
        Commands::Browse(args) => run_browse(&config, args).await,
    }
}

fn run_build(config: &mut Config, args: BuildArgs) -> Result<()> {
    if let Some(root) = args.root {
        config.notes_root = root;
    }
    if let Some(names) = args.names {
        config.course_names = names;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(prefix) = args.prefix {
        config.notes_prefix = prefix;
    }

    println!("Notes root: {}", config.notes_root.display());

    let names = load_course_names(&config.course_names)?;
    let courses = CatalogBuilder::from_config(config, &names).build(&config.notes_root)?;

    let stats = CatalogStats::compute(&courses);
    let snapshot = make_snapshot(courses, Utc::now());
    write_snapshot(&config.output, &snapshot)?;

    println!(
        "✓ Generated {} with {} courses (sorted by file count)",
        config.output.display(),
        snapshot.courses.len()
    );
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &CatalogStats) {
    println!("\n{}", stats);
}

async fn run_browse(config: &Config, args: BrowseArgs) -> Result<()> {
    let location = args.snapshot.unwrap_or_else(|| config.snapshot_source());
    let version = args
        .app_version
        .unwrap_or_else(|| config.consumer.app_version.clone());

    let snapshot = match fetch_snapshot(&SnapshotSource::parse(&location), &version).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("{}", render_error_panel(&e.to_string()));
            std::process::exit(1);
        }
    };

    let mut view = CatalogView::from_snapshot(snapshot);

    let query = match args.page_url.as_deref() {
        Some(page_url) => course_param(page_url)?,
        None => None,
    };
    if let Some(query) = query.or(args.search) {
        view.set_query(&query);
    }
    view.set_exam_filter(args.exam);
    for code in &args.selected {
        view.select_course(code);
    }
    if args.selected_only {
        view.toggle_selected_only();
    }

    let mut sections = args.expand;
    if args.expand_all {
        for course in view.displayed() {
            for section in [
                Section::Finals,
                Section::Midterms,
                Section::ProblemSheets,
                Section::LectureNotes,
                Section::Practice,
                Section::OtherPractices,
            ] {
                sections.push(section_id(section, &course.code));
            }
        }
    }
    for id in &sections {
        if !view.expanded().contains(id) {
            view.toggle_section(id);
        }
    }

    println!("{}", render_catalog(&view, config.consumer.solutions_cap));
    Ok(())
}
