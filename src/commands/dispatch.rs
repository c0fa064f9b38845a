//! Command dispatch logic for gradepost

use std::time::Instant;

use crate::cli::{Cli, Commands};
use crate::commands;
use gradepost_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let result = match &cli.command {
        Commands::Download { directory } => {
            commands::download::execute(cli, directory.as_deref())
        }
        Commands::Grades(args) => commands::grades::execute(cli, args),
        Commands::Upload(args) => commands::upload::execute(cli, args),
        Commands::UploadDir(args) => commands::upload_dir::execute(cli, args),
        Commands::UploadGrades {
            directory,
            grade_file,
        } => commands::upload_grades::execute(cli, directory.as_deref(), grade_file),
        Commands::MakeAssignment { name } => commands::make_assignment::execute(cli, name),
        Commands::AddRubric {
            assignment,
            rubric_file,
        } => commands::add_rubric::execute(cli, assignment, rubric_file),
    };

    tracing::debug!(elapsed = ?start.elapsed(), "command_complete");
    result
}
