//! Wire types for the grading service API
//!
//! Field names follow the service's camelCase JSON. Records reference
//! their children by id; the child records are fetched separately.

use serde::Deserialize;

use crate::annotation::Annotation;
use crate::rubric::{RubricCategory, RubricItem};

#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub period: String,
    #[serde(default)]
    pub assignments: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub points: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRecord {
    pub id: u64,
    pub students: Vec<String>,
    #[serde(default)]
    pub files: Vec<u64>,
}

impl SubmissionRecord {
    /// Grading workflow keys submissions by their first student
    pub fn first_student(&self) -> Option<&str> {
        self.students.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub comments: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRecord {
    pub id: u64,
    pub text: String,
    #[serde(rename = "startLine")]
    pub start_line: usize,
    #[serde(rename = "endLine")]
    pub end_line: usize,
    #[serde(rename = "pointDelta", default)]
    pub point_delta: Option<f64>,
    #[serde(rename = "rubricComment", default)]
    pub rubric_comment: Option<u64>,
}

impl From<CommentRecord> for Annotation {
    fn from(record: CommentRecord) -> Self {
        Annotation::new(
            record.start_line,
            record.end_line,
            record.text,
            record.point_delta.unwrap_or(0.0),
            record.rubric_comment,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RubricCategoryRecord {
    pub id: u64,
    pub name: String,
    #[serde(rename = "pointLimit", default)]
    pub point_limit: Option<f64>,
    #[serde(rename = "sortKey", default)]
    pub sort_key: i64,
    #[serde(rename = "rubricComments", default)]
    pub rubric_comments: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RubricCommentRecord {
    pub id: u64,
    pub text: String,
    #[serde(rename = "pointDelta")]
    pub point_delta: f64,
    pub category: u64,
    #[serde(rename = "sortKey", default)]
    pub sort_key: i64,
}

impl RubricCategoryRecord {
    /// Build the core category from this record and its fetched comments
    pub fn into_category(self, comments: Vec<RubricCommentRecord>) -> RubricCategory {
        let items = comments
            .into_iter()
            .map(|c| RubricItem::new(c.id, c.text, c.point_delta))
            .collect();
        RubricCategory::new(self.name, self.point_limit, self.sort_key, items)
    }
}
