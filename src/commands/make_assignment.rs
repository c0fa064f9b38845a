//! `gradepost make-assignment` - create an assignment for the course

use crate::cli::{Cli, OutputFormat};
use crate::commands::helpers;
use gradepost_core::error::Result;
use gradepost_core::remote::{GradingService, DEFAULT_ASSIGNMENT_POINTS};

pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let (_config, service, course) = helpers::open_course(cli)?;
    let assignment = service.create_assignment(course.id, name, DEFAULT_ASSIGNMENT_POINTS)?;

    match cli.format {
        OutputFormat::Human => {
            println!("created assignment {} ({})", assignment.name, assignment.id);
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "id": assignment.id,
                "name": assignment.name,
                "points": assignment.points,
            })
        ),
    }

    Ok(())
}
