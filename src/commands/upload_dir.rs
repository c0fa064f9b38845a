//! `gradepost upload-dir` - upload files from inside a student directory

use std::env;

use crate::cli::{Cli, UploadDirArgs};
use crate::commands::helpers;
use gradepost_core::error::{GradepostError, Result};
use gradepost_core::localfs;
use gradepost_core::remote::AssignmentClient;

pub fn execute(cli: &Cli, args: &UploadDirArgs) -> Result<()> {
    let cwd = env::current_dir()?;
    let student = cwd
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| localfs::is_student_directory(name))
        .map(str::to_string)
        .ok_or_else(|| {
            GradepostError::UsageError(
                "the working directory is not a student directory".to_string(),
            )
        })?;

    if args.rename && args.files.len() % 2 != 0 {
        return Err(GradepostError::UsageError(
            "--rename takes file/name pairs: file1 renamed1 file2 renamed2".to_string(),
        ));
    }

    let (config, service, course) = helpers::open_course(cli)?;
    let assignment_name = helpers::resolve_assignment(cli, &config)?;
    let mut client = AssignmentClient::load(&service, &course, &assignment_name)?;

    let submission = match client.submission_for_student(&student).cloned() {
        Some(submission) => submission,
        None => client.make_submission_for_student(&student)?.clone(),
    };

    let pairs: Vec<(&str, Option<&str>)> = if args.rename {
        args.files
            .chunks(2)
            .map(|pair| (pair[0].as_str(), Some(pair[1].as_str())))
            .collect()
    } else {
        args.files.iter().map(|name| (name.as_str(), None)).collect()
    };

    for (name, rename_to) in pairs {
        let text = localfs::read_text_or_empty(&cwd.join(name))?;
        if text.is_empty() {
            tracing::info!(file = %name, "empty or missing file; skipping");
            continue;
        }
        client.upload_file(&submission, name, &text, args.overwrite, rename_to)?;
        if !cli.quiet {
            println!("{}", rename_to.unwrap_or(name));
        }
    }

    Ok(())
}
