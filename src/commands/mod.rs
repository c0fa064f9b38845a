//! Command implementations for the gradepost CLI

pub mod add_rubric;
pub mod dispatch;
pub mod download;
pub mod grades;
pub mod helpers;
pub mod make_assignment;
pub mod upload;
pub mod upload_dir;
pub mod upload_grades;
