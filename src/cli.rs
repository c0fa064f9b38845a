//! CLI argument parsing for gradepost
//!
//! Uses clap for argument parsing. Global flags cover the session config
//! and the course/assignment naming convention; every subcommand maps to
//! one grading workflow step.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub use gradepost_core::format::OutputFormat;

/// Adapt `OutputFormat` parsing to clap's error shape
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Gradepost - grading workflow CLI for codePost-style review
#[derive(Parser, Debug)]
#[command(name = "gradepost")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the session config file
    #[arg(long, global = true, env = "GRADEPOST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Course name (inferred from the working directory when omitted)
    #[arg(long, short = 'c', global = true)]
    pub course: Option<String>,

    /// Assignment name (inferred from the working directory when omitted)
    #[arg(long, short = 'a', global = true)]
    pub assignment: Option<String>,

    /// Directory prefix that marks course directories (e.g. CS for CS160)
    #[arg(long, global = true)]
    pub course_prefix: Option<String>,

    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report progress and timing detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level override (error|warn|info|debug|trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every submission's files into per-student directories
    Download {
        /// Only download the one specified student directory
        #[arg(long, short)]
        directory: Option<String>,
    },

    /// Download comments, compute grades, and write grade/comment files
    Grades(GradesArgs),

    /// Upload named files from every student directory
    Upload(UploadArgs),

    /// Upload named files from the current student directory
    UploadDir(UploadDirArgs),

    /// Upload each student directory's grade source file as the grade file
    UploadGrades {
        /// Only upload for the one specified student directory
        #[arg(long, short)]
        directory: Option<String>,

        /// Name the uploaded file this on the grading service
        #[arg(long, short, default_value = "grade.txt")]
        grade_file: String,
    },

    /// Create an assignment for the course
    MakeAssignment {
        /// Assignment name
        name: String,
    },

    /// Add a rubric to an assignment from a flat-text rubric file
    AddRubric {
        /// Assignment name
        assignment: String,

        /// File containing the rubric definition
        rubric_file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GradesArgs {
    /// Name of the local file the grade report is written into
    #[arg(long, short, default_value = "grade.txt")]
    pub grade_file: String,

    /// Name of the local file the feedback text is written into
    #[arg(long, default_value = "comments.txt")]
    pub comment_file: String,

    /// Only process the one specified student directory
    #[arg(long, short)]
    pub directory: Option<String>,

    /// Files to pull comments from, in report order
    #[arg(required = true)]
    pub files: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    /// Only upload for the one specified student directory
    #[arg(long, short)]
    pub directory: Option<String>,

    /// Overwrite files that already exist on the service
    #[arg(long)]
    pub overwrite: bool,

    /// Also upload a 1rubric.txt placeholder for the overall comment
    #[arg(long, short)]
    pub rubric: bool,

    /// Local file whose contents seed the rubric placeholder
    #[arg(long, short, default_value = "grade.txt")]
    pub grade_file: String,

    /// Files to upload from each student directory
    #[arg(required = true)]
    pub files: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct UploadDirArgs {
    /// Treat arguments as pairs: file1 renamed1 file2 renamed2
    #[arg(long)]
    pub rename: bool,

    /// Overwrite files that already exist on the service
    #[arg(long)]
    pub overwrite: bool,

    /// Files to upload from the current directory
    #[arg(required = true)]
    pub files: Vec<String>,
}
