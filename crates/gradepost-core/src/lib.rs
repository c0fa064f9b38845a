//! Gradepost Core Library
//!
//! Core domain logic for the gradepost grading workflow tools.

pub mod annotation;
pub mod config;
pub mod error;
pub mod file;
pub mod format;
pub mod localfs;
pub mod logging;
pub mod remote;
pub mod report;
pub mod rubric;
pub mod rubricfile;
