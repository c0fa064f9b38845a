//! `gradepost upload` - upload named files from every student directory

use std::env;

use crate::cli::{Cli, UploadArgs};
use crate::commands::helpers;
use gradepost_core::error::Result;
use gradepost_core::localfs::{self, DirectoryListing};
use gradepost_core::remote::AssignmentClient;

/// Placeholder text for an empty rubric comment file, so the overall
/// comment has a file to attach to.
const RUBRIC_PLACEHOLDER: &str = "file for adding rubric comment\n";

pub fn execute(cli: &Cli, args: &UploadArgs) -> Result<()> {
    let (config, service, course) = helpers::open_course(cli)?;
    let assignment_name = helpers::resolve_assignment(cli, &config)?;
    let mut client = AssignmentClient::load(&service, &course, &assignment_name)?;

    let cwd = env::current_dir()?;
    let mut students = helpers::student_directories(&cwd, args.directory.as_deref())?;
    students.sort();

    for student in &students {
        let student_dir = cwd.join(student);
        let listing = DirectoryListing::read(&student_dir)?;
        let present: Vec<&String> = args
            .files
            .iter()
            .filter(|name| listing.contains_file(&student_dir.join(name)))
            .collect();
        if present.is_empty() && !args.rubric {
            tracing::info!(student = %student, "nothing to upload; skipping");
            continue;
        }

        let submission = match client.submission_for_student(student).cloned() {
            Some(submission) => submission,
            None => client.make_submission_for_student(student)?.clone(),
        };

        if !cli.quiet {
            println!("{}", student);
        }
        for name in present {
            let text = localfs::read_text_or_empty(&student_dir.join(name))?;
            if text.is_empty() {
                tracing::info!(student = %student, file = %name, "empty file; skipping");
                continue;
            }
            client.upload_file(&submission, name, &text, args.overwrite, None)?;
            if !cli.quiet {
                println!("{}", name);
            }
        }

        if args.rubric {
            let mut text = localfs::read_text_or_empty(&student_dir.join(&args.grade_file))?;
            if text.is_empty() {
                text = RUBRIC_PLACEHOLDER.to_string();
            }
            client.upload_file(
                &submission,
                helpers::RUBRIC_COMMENT_FILENAME,
                &text,
                args.overwrite,
                None,
            )?;
            if !cli.quiet {
                println!("{}", helpers::RUBRIC_COMMENT_FILENAME);
            }
        }
    }

    Ok(())
}
