//! Shared session and naming resolution for commands
//!
//! Course and assignment names come from flags when given, otherwise
//! from the `<course>/<assignment>/<student>` directory convention
//! around the working directory.

use std::env;
use std::path::Path;

use crate::cli::Cli;
use gradepost_core::config::SessionConfig;
use gradepost_core::error::{GradepostError, Result};
use gradepost_core::localfs::{self, infer_course_context, CourseContext, DirectoryListing};
use gradepost_core::remote::types::Course;
use gradepost_core::remote::{GradingService, HttpGradingService};

/// File the overall-feedback rubric comment is attached to
pub const RUBRIC_COMMENT_FILENAME: &str = "1rubric.txt";

/// Load the session config, resolve the course name, and fetch the course
pub fn open_course(cli: &Cli) -> Result<(SessionConfig, HttpGradingService, Course)> {
    let config = SessionConfig::load(cli.config.as_deref())?;
    let course_name = resolve_course(cli, &config)?;

    let service = HttpGradingService::new(&config);
    let course = service.course(&course_name, config.period.as_deref())?;
    Ok((config, service, course))
}

fn inferred_context(cli: &Cli, config: &SessionConfig) -> Option<CourseContext> {
    let prefix = cli
        .course_prefix
        .as_deref()
        .unwrap_or(&config.course_prefix);
    let cwd = env::current_dir().ok()?;
    infer_course_context(&cwd, prefix)
}

pub fn resolve_course(cli: &Cli, config: &SessionConfig) -> Result<String> {
    if let Some(course) = &cli.course {
        return Ok(course.clone());
    }
    inferred_context(cli, config)
        .map(|c| c.course)
        .ok_or_else(|| {
            GradepostError::UsageError(
                "course name not given and not inferable from the working directory \
                 (use --course)"
                    .to_string(),
            )
        })
}

pub fn resolve_assignment(cli: &Cli, config: &SessionConfig) -> Result<String> {
    if let Some(assignment) = &cli.assignment {
        return Ok(assignment.clone());
    }
    inferred_context(cli, config)
        .and_then(|c| c.assignment)
        .ok_or_else(|| {
            GradepostError::UsageError(
                "assignment name not given and not inferable from the working directory \
                 (use --assignment)"
                    .to_string(),
            )
        })
}

/// Student directory names to process: the one requested (taken as
/// given, even without an `@`), or every `@`-named child directory of
/// the working directory
pub fn student_directories(cwd: &Path, one_directory: Option<&str>) -> Result<Vec<String>> {
    match one_directory {
        Some(directory) => Ok(vec![directory.trim_end_matches('/').to_string()]),
        None => Ok(DirectoryListing::read(cwd)?
            .directory_names()
            .into_iter()
            .filter(|name| localfs::is_student_directory(name))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_keeps_only_student_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir(dir.path().join("dreed@capital.edu")).unwrap();
        fs::create_dir(dir.path().join("solutions")).unwrap();

        let students = student_directories(dir.path(), None).unwrap();
        assert_eq!(students, vec!["dreed@capital.edu"]);
    }

    #[test]
    fn test_explicit_directory_is_not_filtered() {
        let dir = tempfile::TempDir::new().unwrap();
        let students = student_directories(dir.path(), Some("solutions/")).unwrap();
        assert_eq!(students, vec!["solutions"]);
    }
}
