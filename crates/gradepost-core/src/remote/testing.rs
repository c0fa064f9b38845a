//! In-memory grading service for tests

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{GradepostError, Result};

use super::client::GradingService;
use super::types::{
    Assignment, CommentRecord, Course, FileRecord, RubricCategoryRecord, RubricCommentRecord,
    SubmissionRecord,
};

#[derive(Default)]
struct MockState {
    next_id: u64,
    assignments: Vec<Assignment>,
    submissions: HashMap<u64, Vec<SubmissionRecord>>,
    files: HashMap<u64, FileRecord>,
    comments: HashMap<u64, CommentRecord>,
    categories: HashMap<u64, Vec<RubricCategoryRecord>>,
    rubric_comments: HashMap<u64, RubricCommentRecord>,
}

impl MockState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct MockGradingService {
    state: RefCell<MockState>,
}

impl MockGradingService {
    pub fn with_assignment(assignment_id: u64, name: &str) -> Self {
        let mut state = MockState {
            next_id: 1000,
            ..MockState::default()
        };
        state.assignments.push(Assignment {
            id: assignment_id,
            name: name.to_string(),
            points: 100.0,
        });
        state.submissions.insert(assignment_id, Vec::new());
        state.categories.insert(assignment_id, Vec::new());
        MockGradingService {
            state: RefCell::new(state),
        }
    }

    pub fn add_submission(&self, assignment_id: u64, student: &str) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state
            .submissions
            .entry(assignment_id)
            .or_default()
            .push(SubmissionRecord {
                id,
                students: vec![student.to_string()],
                files: Vec::new(),
            });
        id
    }

    pub fn add_file(&self, submission_id: u64, name: &str, code: &str) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.files.insert(
            id,
            FileRecord {
                id,
                name: name.to_string(),
                extension: name.rsplit('.').next().unwrap_or("").to_string(),
                code: code.to_string(),
                comments: Vec::new(),
            },
        );
        for submissions in state.submissions.values_mut() {
            if let Some(submission) = submissions.iter_mut().find(|s| s.id == submission_id) {
                submission.files.push(id);
            }
        }
        id
    }

    pub fn add_comment(
        &self,
        file_id: u64,
        start_line: usize,
        end_line: usize,
        text: &str,
        point_delta: f64,
        rubric_comment: Option<u64>,
    ) -> u64 {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.comments.insert(
            id,
            CommentRecord {
                id,
                text: text.to_string(),
                start_line,
                end_line,
                point_delta: Some(point_delta),
                rubric_comment,
            },
        );
        if let Some(file) = state.files.get_mut(&file_id) {
            file.comments.push(id);
        }
        id
    }

    pub fn file_names(&self, submission_id: u64) -> Vec<String> {
        let state = self.state.borrow();
        let mut names = Vec::new();
        for submissions in state.submissions.values() {
            if let Some(submission) = submissions.iter().find(|s| s.id == submission_id) {
                for file_id in &submission.files {
                    if let Some(file) = state.files.get(file_id) {
                        names.push(file.name.clone());
                    }
                }
            }
        }
        names
    }

    pub fn file_code(&self, submission_id: u64, name: &str) -> String {
        let state = self.state.borrow();
        for submissions in state.submissions.values() {
            if let Some(submission) = submissions.iter().find(|s| s.id == submission_id) {
                for file_id in &submission.files {
                    if let Some(file) = state.files.get(file_id) {
                        if file.name == name {
                            return file.code.clone();
                        }
                    }
                }
            }
        }
        String::new()
    }
}

impl GradingService for MockGradingService {
    fn course(&self, name: &str, period: Option<&str>) -> Result<Course> {
        let state = self.state.borrow();
        Ok(Course {
            id: 1,
            name: name.to_string(),
            period: period.unwrap_or("Spring 2020").to_string(),
            assignments: state.assignments.iter().map(|a| a.id).collect(),
        })
    }

    fn assignment(&self, course: &Course, name: &str) -> Result<Assignment> {
        let state = self.state.borrow();
        state
            .assignments
            .iter()
            .find(|a| course.assignments.contains(&a.id) && a.name == name)
            .cloned()
            .ok_or_else(|| GradepostError::not_found("assignment", name))
    }

    fn create_assignment(&self, _course_id: u64, name: &str, points: f64) -> Result<Assignment> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        let assignment = Assignment {
            id,
            name: name.to_string(),
            points,
        };
        state.assignments.push(assignment.clone());
        state.submissions.insert(id, Vec::new());
        state.categories.insert(id, Vec::new());
        Ok(assignment)
    }

    fn submissions(&self, assignment_id: u64) -> Result<Vec<SubmissionRecord>> {
        Ok(self
            .state
            .borrow()
            .submissions
            .get(&assignment_id)
            .cloned()
            .unwrap_or_default())
    }

    fn create_submission(&self, assignment_id: u64, student: &str) -> Result<SubmissionRecord> {
        let id = self.add_submission(assignment_id, student);
        Ok(SubmissionRecord {
            id,
            students: vec![student.to_string()],
            files: Vec::new(),
        })
    }

    fn file(&self, file_id: u64) -> Result<FileRecord> {
        self.state
            .borrow()
            .files
            .get(&file_id)
            .cloned()
            .ok_or_else(|| GradepostError::not_found("file", file_id))
    }

    fn file_comments(&self, file: &FileRecord) -> Result<Vec<CommentRecord>> {
        let state = self.state.borrow();
        Ok(file
            .comments
            .iter()
            .filter_map(|id| state.comments.get(id).cloned())
            .collect())
    }

    fn create_file(
        &self,
        submission_id: u64,
        name: &str,
        extension: &str,
        code: &str,
    ) -> Result<FileRecord> {
        let id = self.add_file(submission_id, name, code);
        let mut state = self.state.borrow_mut();
        if let Some(file) = state.files.get_mut(&id) {
            file.extension = extension.to_string();
        }
        state
            .files
            .get(&id)
            .cloned()
            .ok_or_else(|| GradepostError::not_found("file", id))
    }

    fn delete_file(&self, file_id: u64) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.files.remove(&file_id);
        for submissions in state.submissions.values_mut() {
            for submission in submissions.iter_mut() {
                submission.files.retain(|id| *id != file_id);
            }
        }
        Ok(())
    }

    fn rubric_categories(&self, assignment_id: u64) -> Result<Vec<RubricCategoryRecord>> {
        Ok(self
            .state
            .borrow()
            .categories
            .get(&assignment_id)
            .cloned()
            .unwrap_or_default())
    }

    fn rubric_comments(
        &self,
        category: &RubricCategoryRecord,
    ) -> Result<Vec<RubricCommentRecord>> {
        let state = self.state.borrow();
        Ok(category
            .rubric_comments
            .iter()
            .filter_map(|id| state.rubric_comments.get(id).cloned())
            .collect())
    }

    fn create_rubric_category(
        &self,
        assignment_id: u64,
        name: &str,
        point_limit: Option<f64>,
        sort_key: i64,
    ) -> Result<RubricCategoryRecord> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        let record = RubricCategoryRecord {
            id,
            name: name.to_string(),
            point_limit,
            sort_key,
            rubric_comments: Vec::new(),
        };
        state
            .categories
            .entry(assignment_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn create_rubric_comment(
        &self,
        category_id: u64,
        text: &str,
        point_delta: f64,
        sort_key: i64,
    ) -> Result<RubricCommentRecord> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        let record = RubricCommentRecord {
            id,
            text: text.to_string(),
            point_delta,
            category: category_id,
            sort_key,
        };
        state.rubric_comments.insert(id, record.clone());
        for categories in state.categories.values_mut() {
            if let Some(category) = categories.iter_mut().find(|c| c.id == category_id) {
                category.rubric_comments.push(id);
            }
        }
        Ok(record)
    }
}
