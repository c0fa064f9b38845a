//! `gradepost upload-grades` - push grade files back to the service

use std::env;

use crate::cli::Cli;
use crate::commands::helpers;
use gradepost_core::error::Result;
use gradepost_core::localfs;
use gradepost_core::remote::AssignmentClient;

pub fn execute(cli: &Cli, one_directory: Option<&str>, grade_file: &str) -> Result<()> {
    let (config, service, course) = helpers::open_course(cli)?;
    let assignment_name = helpers::resolve_assignment(cli, &config)?;
    let client = AssignmentClient::load(&service, &course, &assignment_name)?;

    let cwd = env::current_dir()?;
    let mut students = helpers::student_directories(&cwd, one_directory)?;
    students.sort();

    for student in &students {
        let Some(submission) = client.submission_for_student(student) else {
            tracing::info!(student = %student, "no submission; skipping");
            continue;
        };

        let source = cwd.join(student).join(helpers::RUBRIC_COMMENT_FILENAME);
        let text = localfs::read_text_or_empty(&source)?;
        if text.is_empty() {
            tracing::info!(student = %student, "no grade text; skipping");
            continue;
        }

        client.upload_file(
            submission,
            helpers::RUBRIC_COMMENT_FILENAME,
            &text,
            true,
            Some(grade_file),
        )?;
        if !cli.quiet {
            println!("{}", student);
        }
    }

    Ok(())
}
