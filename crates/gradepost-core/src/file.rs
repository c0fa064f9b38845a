//! Submission files and their annotations
//!
//! An `AnnotatedFile` is a fully-materialized snapshot of one submitted
//! file: its text content plus the reviewer annotations attached to it.
//! Line numbers are 1-based and inclusive at the API boundary.

use crate::annotation::Annotation;
use crate::error::{GradepostError, Result};
use crate::rubric::RubricItem;

/// A submitted file's content and its annotations
#[derive(Debug, Clone)]
pub struct AnnotatedFile {
    name: String,
    lines: Vec<String>,
    annotations: Vec<Annotation>,
}

impl AnnotatedFile {
    pub fn new(name: impl Into<String>, code: &str, annotations: Vec<Annotation>) -> Self {
        AnnotatedFile {
            name: name.into(),
            lines: code.split('\n').map(str::to_string).collect(),
            annotations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Annotations ordered ascending by start line; annotations sharing a
    /// start line retain their original relative order.
    pub fn sorted_annotations(&self) -> Vec<&Annotation> {
        let mut sorted: Vec<&Annotation> = self.annotations.iter().collect();
        sorted.sort_by_key(|a| a.start_line);
        sorted
    }

    /// Inclusive joined text of lines `[start_line, end_line]`.
    ///
    /// An out-of-range request fails the single excerpt operation; ranges
    /// outside the file indicate a data-integrity defect upstream.
    pub fn excerpt(&self, start_line: usize, end_line: usize) -> Result<String> {
        if start_line < 1 || end_line > self.lines.len() || start_line > end_line {
            return Err(GradepostError::LineOutOfRange {
                file: self.name.clone(),
                start_line,
                end_line,
                line_count: self.lines.len(),
            });
        }
        Ok(self.lines[start_line - 1..end_line].join("\n"))
    }

    /// Format one annotation as a feedback block:
    ///
    /// ```text
    /// <filename> lines: <start>-<end>
    /// <excerpt>
    ///
    /// [<rubric item display>]
    /// <annotation display>
    ///
    /// ```
    ///
    /// The rubric item line is omitted entirely when the annotation has no
    /// resolved rubric item. The block ends with a blank line so that
    /// separators between consecutive blocks do not abut the comment text.
    pub fn format_annotation(
        &self,
        annotation: &Annotation,
        item: Option<&RubricItem>,
    ) -> Result<String> {
        let excerpt = self.excerpt(annotation.start_line, annotation.end_line)?;

        let mut block = format!(
            "{} lines: {}-{}\n{}\n\n",
            self.name, annotation.start_line, annotation.end_line, excerpt
        );
        if let Some(item) = item {
            block.push_str(&format!("[{}]\n", item.display()));
        }
        block.push_str(&annotation.display());
        block.push_str("\n\n");
        Ok(block)
    }
}

/// One student's submission: identity plus its files
#[derive(Debug, Clone)]
pub struct Submission {
    pub student: String,
    pub files: Vec<AnnotatedFile>,
}

impl Submission {
    pub fn file_with_name(&self, name: &str) -> Option<&AnnotatedFile> {
        self.files.iter().find(|f| f.name() == name)
    }
}
