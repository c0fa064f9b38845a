//! `gradepost grades` - compute grade reports from service comments

use std::env;

use crate::cli::{Cli, GradesArgs, OutputFormat};
use crate::commands::helpers;
use gradepost_core::error::Result;
use gradepost_core::file::Submission;
use gradepost_core::localfs;
use gradepost_core::remote::AssignmentClient;
use gradepost_core::report::ReportAggregator;

pub fn execute(cli: &Cli, args: &GradesArgs) -> Result<()> {
    let (config, service, course) = helpers::open_course(cli)?;
    let assignment_name = helpers::resolve_assignment(cli, &config)?;
    let client = AssignmentClient::load(&service, &course, &assignment_name)?;

    let rubric = client.fetch_rubric()?;
    let aggregator = ReportAggregator::new(&rubric);

    let cwd = env::current_dir()?;
    let mut students = helpers::student_directories(&cwd, args.directory.as_deref())?;
    students.sort();

    for student in &students {
        let Some(submission) = client.submission_for_student(student) else {
            tracing::info!(student = %student, "no submission; skipping");
            continue;
        };

        let files = client.fetch_annotated_files(submission)?;
        let submission = Submission {
            student: student.clone(),
            files,
        };
        let report = aggregator.aggregate(&args.files, &submission)?;

        let student_dir = cwd.join(student);
        localfs::write_text(&student_dir.join(&args.grade_file), &report.render())?;
        localfs::write_text(&student_dir.join(&args.comment_file), &report.feedback_text)?;

        match cli.format {
            OutputFormat::Human => println!("{} {:.1}", student, report.total_score),
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({
                    "student": student,
                    "score": report.total_score,
                })
            ),
        }
    }

    Ok(())
}
