//! `gradepost add-rubric` - import a flat-text rubric onto an assignment

use std::fs;
use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers;
use gradepost_core::error::{GradepostError, Result};
use gradepost_core::remote::{import_rubric, GradingService};
use gradepost_core::rubricfile::parse_rubric_text;

pub fn execute(cli: &Cli, assignment_name: &str, rubric_file: &Path) -> Result<()> {
    if !rubric_file.is_file() {
        return Err(GradepostError::not_found(
            "rubric file",
            rubric_file.display().to_string(),
        ));
    }
    let text = fs::read_to_string(rubric_file)?;
    let specs = parse_rubric_text(&text)?;

    let (_config, service, course) = helpers::open_course(cli)?;
    let assignment = service.assignment(&course, assignment_name)?;
    let summary = import_rubric(&service, assignment.id, &specs)?;

    match cli.format {
        OutputFormat::Human => {
            println!(
                "added {} categories and {} comments to {}",
                summary.categories_created, summary.comments_created, assignment.name
            );
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "assignment": assignment.name,
                "categories_created": summary.categories_created,
                "comments_created": summary.comments_created,
            })
        ),
    }

    Ok(())
}
