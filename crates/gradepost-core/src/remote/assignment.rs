//! Assignment-scoped convenience layer over the grading service
//!
//! Fetches an assignment's submissions once and indexes them by their
//! first student email, which is how the directory convention names
//! student work locally.

use std::collections::HashMap;

use crate::error::Result;
use crate::file::AnnotatedFile;
use crate::rubric::RubricIndex;

use super::client::GradingService;
use super::types::{Assignment, Course, FileRecord, SubmissionRecord};

pub struct AssignmentClient<'a> {
    service: &'a dyn GradingService,
    assignment: Assignment,
    submissions: Vec<SubmissionRecord>,
    by_student: HashMap<String, usize>,
}

impl<'a> AssignmentClient<'a> {
    /// Fetch the named assignment and all of its submissions
    pub fn load(service: &'a dyn GradingService, course: &Course, name: &str) -> Result<Self> {
        let assignment = service.assignment(course, name)?;
        let submissions = service.submissions(assignment.id)?;

        let mut by_student = HashMap::new();
        for (position, submission) in submissions.iter().enumerate() {
            if let Some(student) = submission.first_student() {
                by_student.insert(student.to_string(), position);
            }
        }

        tracing::debug!(
            assignment = %assignment.name,
            submissions = submissions.len(),
            "loaded assignment"
        );

        Ok(AssignmentClient {
            service,
            assignment,
            submissions,
            by_student,
        })
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn submissions(&self) -> &[SubmissionRecord] {
        &self.submissions
    }

    pub fn submission_for_student(&self, student: &str) -> Option<&SubmissionRecord> {
        self.by_student
            .get(student)
            .map(|position| &self.submissions[*position])
    }

    /// Create a submission for a student who has none yet
    pub fn make_submission_for_student(&mut self, student: &str) -> Result<&SubmissionRecord> {
        let record = self.service.create_submission(self.assignment.id, student)?;
        self.by_student
            .insert(student.to_string(), self.submissions.len());
        self.submissions.push(record);
        Ok(&self.submissions[self.submissions.len() - 1])
    }

    /// Fetch a submission's full file records (name, extension, code)
    pub fn fetch_files(&self, submission: &SubmissionRecord) -> Result<Vec<FileRecord>> {
        submission
            .files
            .iter()
            .map(|file_id| self.service.file(*file_id))
            .collect()
    }

    /// Fetch a submission's files together with their annotations
    pub fn fetch_annotated_files(
        &self,
        submission: &SubmissionRecord,
    ) -> Result<Vec<AnnotatedFile>> {
        let mut annotated = Vec::new();
        for record in self.fetch_files(submission)? {
            let annotations = self
                .service
                .file_comments(&record)?
                .into_iter()
                .map(Into::into)
                .collect();
            annotated.push(AnnotatedFile::new(record.name, &record.code, annotations));
        }
        Ok(annotated)
    }

    /// Upload a file to a submission, optionally renaming it and
    /// replacing any existing file with the target name.
    pub fn upload_file(
        &self,
        submission: &SubmissionRecord,
        filename: &str,
        text: &str,
        overwrite: bool,
        rename_to: Option<&str>,
    ) -> Result<()> {
        let target = rename_to.unwrap_or(filename);

        if overwrite {
            let existing = self.fetch_files(submission)?;
            if let Some(file) = existing.iter().find(|f| f.name == target) {
                tracing::debug!(file = %target, "replacing existing file");
                self.service.delete_file(file.id)?;
            }
        }

        // Extension follows the final name, as the service expects
        let extension = target.rsplit('.').next().unwrap_or("");
        self.service
            .create_file(submission.id, target, extension, text)?;
        Ok(())
    }

    /// Fetch the assignment's rubric and build the index, once, up front.
    /// The returned value is immutable and safe to share across
    /// aggregations.
    pub fn fetch_rubric(&self) -> Result<RubricIndex> {
        let mut categories = Vec::new();
        for record in self.service.rubric_categories(self.assignment.id)? {
            let comments = self.service.rubric_comments(&record)?;
            categories.push(record.into_category(comments));
        }
        Ok(RubricIndex::build(categories))
    }
}
