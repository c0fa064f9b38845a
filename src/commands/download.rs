//! `gradepost download` - download submitted files into student directories

use std::env;
use std::fs;

use crate::cli::Cli;
use crate::commands::helpers;
use gradepost_core::error::Result;
use gradepost_core::localfs;
use gradepost_core::remote::AssignmentClient;

pub fn execute(cli: &Cli, one_directory: Option<&str>) -> Result<()> {
    let (config, service, course) = helpers::open_course(cli)?;
    let assignment_name = helpers::resolve_assignment(cli, &config)?;
    let client = AssignmentClient::load(&service, &course, &assignment_name)?;

    if !cli.quiet {
        println!("{} {}", course.name, assignment_name);
    }

    let cwd = env::current_dir()?;
    let mut students: Vec<String> = match one_directory {
        Some(directory) => vec![directory.trim_end_matches('/').to_string()],
        None => client
            .submissions()
            .iter()
            .filter_map(|s| s.first_student())
            .map(str::to_string)
            .collect(),
    };
    students.sort();

    for student in &students {
        let Some(submission) = client.submission_for_student(student) else {
            tracing::info!(student = %student, "no submission; skipping");
            continue;
        };

        let student_dir = cwd.join(student);
        if !student_dir.exists() {
            fs::create_dir(&student_dir)?;
        }

        if !cli.quiet {
            println!("{}", student);
        }
        for file in client.fetch_files(submission)? {
            localfs::write_text(&student_dir.join(&file.name), &file.code)?;
            if !cli.quiet {
                println!("{}", file.name);
            }
        }
        if !cli.quiet {
            println!();
        }
    }

    Ok(())
}
