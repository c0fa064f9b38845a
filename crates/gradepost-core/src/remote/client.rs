//! Grading service capability trait and its HTTP implementation

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::SessionConfig;
use crate::error::{GradepostError, Result};

use super::types::{
    Assignment, CommentRecord, Course, FileRecord, RubricCategoryRecord, RubricCommentRecord,
    SubmissionRecord,
};

/// New assignments are worth 100 points unless told otherwise
pub const DEFAULT_ASSIGNMENT_POINTS: f64 = 100.0;

const REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Capability interface to the remote grading service.
///
/// Everything the tools need from the service goes through this trait,
/// keeping commands testable against an in-memory implementation.
pub trait GradingService {
    fn course(&self, name: &str, period: Option<&str>) -> Result<Course>;
    fn assignment(&self, course: &Course, name: &str) -> Result<Assignment>;
    fn create_assignment(&self, course_id: u64, name: &str, points: f64) -> Result<Assignment>;

    fn submissions(&self, assignment_id: u64) -> Result<Vec<SubmissionRecord>>;
    fn create_submission(&self, assignment_id: u64, student: &str) -> Result<SubmissionRecord>;

    fn file(&self, file_id: u64) -> Result<FileRecord>;
    fn file_comments(&self, file: &FileRecord) -> Result<Vec<CommentRecord>>;
    fn create_file(
        &self,
        submission_id: u64,
        name: &str,
        extension: &str,
        code: &str,
    ) -> Result<FileRecord>;
    fn delete_file(&self, file_id: u64) -> Result<()>;

    fn rubric_categories(&self, assignment_id: u64) -> Result<Vec<RubricCategoryRecord>>;
    fn rubric_comments(
        &self,
        category: &RubricCategoryRecord,
    ) -> Result<Vec<RubricCommentRecord>>;
    fn create_rubric_category(
        &self,
        assignment_id: u64,
        name: &str,
        point_limit: Option<f64>,
        sort_key: i64,
    ) -> Result<RubricCategoryRecord>;
    fn create_rubric_comment(
        &self,
        category_id: u64,
        text: &str,
        point_delta: f64,
        sort_key: i64,
    ) -> Result<RubricCommentRecord>;
}

/// Synchronous HTTP client for the grading service
pub struct HttpGradingService {
    agent: ureq::Agent,
    api_url: String,
    api_key: String,
}

impl HttpGradingService {
    pub fn new(config: &SessionConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build();
        HttpGradingService {
            agent,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let mut request = self
            .agent
            .get(&format!("{}{}", self.api_url, path))
            .set("Authorization", &format!("Token {}", self.api_key));
        for (key, value) in query {
            request = request.query(key, value);
        }

        let response = request
            .call()
            .map_err(|e| GradepostError::remote(format!("GET {}", path), e))?;
        response
            .into_json()
            .map_err(|e| GradepostError::remote(format!("GET {}", path), e))
    }

    fn post_json<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> Result<T> {
        let response = self
            .agent
            .post(&format!("{}{}", self.api_url, path))
            .set("Authorization", &format!("Token {}", self.api_key))
            .send_json(body)
            .map_err(|e| GradepostError::remote(format!("POST {}", path), e))?;
        response
            .into_json()
            .map_err(|e| GradepostError::remote(format!("POST {}", path), e))
    }

    fn delete(&self, path: &str) -> Result<()> {
        self.agent
            .delete(&format!("{}{}", self.api_url, path))
            .set("Authorization", &format!("Token {}", self.api_key))
            .call()
            .map_err(|e| GradepostError::remote(format!("DELETE {}", path), e))?;
        Ok(())
    }
}

impl GradingService for HttpGradingService {
    fn course(&self, name: &str, period: Option<&str>) -> Result<Course> {
        let mut query = vec![("name", name)];
        if let Some(period) = period {
            query.push(("period", period));
        }

        let mut courses: Vec<Course> = self.get_json("/courses/", &query)?;
        if courses.is_empty() {
            return Err(GradepostError::course_not_found(name, period));
        }
        Ok(courses.remove(0))
    }

    fn assignment(&self, course: &Course, name: &str) -> Result<Assignment> {
        for assignment_id in &course.assignments {
            let assignment: Assignment =
                self.get_json(&format!("/assignments/{}/", assignment_id), &[])?;
            if assignment.name == name {
                return Ok(assignment);
            }
        }
        Err(GradepostError::not_found("assignment", name))
    }

    fn create_assignment(&self, course_id: u64, name: &str, points: f64) -> Result<Assignment> {
        self.post_json(
            "/assignments/",
            serde_json::json!({ "course": course_id, "name": name, "points": points }),
        )
    }

    fn submissions(&self, assignment_id: u64) -> Result<Vec<SubmissionRecord>> {
        self.get_json(
            &format!("/assignments/{}/submissions/", assignment_id),
            &[],
        )
    }

    fn create_submission(&self, assignment_id: u64, student: &str) -> Result<SubmissionRecord> {
        self.post_json(
            "/submissions/",
            serde_json::json!({ "assignment": assignment_id, "students": [student] }),
        )
    }

    fn file(&self, file_id: u64) -> Result<FileRecord> {
        self.get_json(&format!("/files/{}/", file_id), &[])
    }

    fn file_comments(&self, file: &FileRecord) -> Result<Vec<CommentRecord>> {
        file.comments
            .iter()
            .map(|comment_id| self.get_json(&format!("/comments/{}/", comment_id), &[]))
            .collect()
    }

    fn create_file(
        &self,
        submission_id: u64,
        name: &str,
        extension: &str,
        code: &str,
    ) -> Result<FileRecord> {
        self.post_json(
            "/files/",
            serde_json::json!({
                "submission": submission_id,
                "name": name,
                "extension": extension,
                "code": code,
            }),
        )
    }

    fn delete_file(&self, file_id: u64) -> Result<()> {
        self.delete(&format!("/files/{}/", file_id))
    }

    fn rubric_categories(&self, assignment_id: u64) -> Result<Vec<RubricCategoryRecord>> {
        self.get_json(
            &format!("/assignments/{}/rubricCategories/", assignment_id),
            &[],
        )
    }

    fn rubric_comments(
        &self,
        category: &RubricCategoryRecord,
    ) -> Result<Vec<RubricCommentRecord>> {
        category
            .rubric_comments
            .iter()
            .map(|comment_id| self.get_json(&format!("/rubricComments/{}/", comment_id), &[]))
            .collect()
    }

    fn create_rubric_category(
        &self,
        assignment_id: u64,
        name: &str,
        point_limit: Option<f64>,
        sort_key: i64,
    ) -> Result<RubricCategoryRecord> {
        self.post_json(
            "/rubricCategories/",
            serde_json::json!({
                "assignment": assignment_id,
                "name": name,
                "pointLimit": point_limit,
                "sortKey": sort_key,
            }),
        )
    }

    fn create_rubric_comment(
        &self,
        category_id: u64,
        text: &str,
        point_delta: f64,
        sort_key: i64,
    ) -> Result<RubricCommentRecord> {
        self.post_json(
            "/rubricComments/",
            serde_json::json!({
                "category": category_id,
                "text": text,
                "pointDelta": point_delta,
                "sortKey": sort_key,
            }),
        )
    }
}
